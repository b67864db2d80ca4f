//! UI module root: exposes drawing functions for individual panels.

pub mod banner;
pub mod cpu;
pub mod disks;
pub mod form;
pub mod header;
pub mod mem;
pub mod saved;
pub mod theme;
pub mod util;
