//! winmon: terminal dashboard for CPU, memory and disk metrics of remote Windows
//! hosts, fetched through a metrics backend, with a local list of saved servers.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod form;
pub mod logging;
pub mod panel;
pub mod profiles;
pub mod storage;
pub mod types;
pub mod ui;
