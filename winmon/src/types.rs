//! Types that mirror the backend's JSON schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WinRM authentication transport requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Ntlm,
    Basic,
    Kerberos,
}

impl Transport {
    pub const ALL: [Transport; 3] = [Transport::Ntlm, Transport::Basic, Transport::Kerberos];

    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Ntlm => "ntlm",
            Transport::Basic => "basic",
            Transport::Kerberos => "kerberos",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Transport::Ntlm => Transport::Basic,
            Transport::Basic => Transport::Kerberos,
            Transport::Kerberos => Transport::Ntlm,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Transport::Ntlm => Transport::Kerberos,
            Transport::Basic => Transport::Ntlm,
            Transport::Kerberos => Transport::Basic,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ntlm" => Ok(Transport::Ntlm),
            "basic" => Ok(Transport::Basic),
            "kerberos" => Ok(Transport::Kerberos),
            other => Err(format!("unknown transport '{other}'")),
        }
    }
}

/// Request body for `POST /api/monitor`. Also the input to a profile save.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub server: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub transport: Transport,
}

// Never print the password, even in debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .field("transport", &self.transport)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub name: String,
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent_used: f64,
}

/// One point-in-time set of readings for a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    #[serde(default)]
    pub disk: Vec<DiskInfo>,
}

/// Success envelope returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorResponse {
    pub success: bool,
    #[serde(default)]
    pub server: String,
    pub data: Option<MetricsSnapshot>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A successful monitor call: the host name echoed by the backend plus its snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorReport {
    pub server: String,
    pub snapshot: MetricsSnapshot,
}
