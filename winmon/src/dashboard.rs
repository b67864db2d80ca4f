//! Severity levels for usage percentages and a plain-text dashboard.

use std::fmt::Write;

use crate::types::MonitorReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub const WARNING_AT: f64 = 75.0;
    pub const CRITICAL_AT: f64 = 90.0;

    pub fn from_percent(pct: f64) -> Self {
        if pct >= Self::CRITICAL_AT {
            Severity::Critical
        } else if pct >= Self::WARNING_AT {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

const BAR_WIDTH: usize = 30;

fn bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Text rendering used by the one-shot `monitor` command.
pub fn render_text(report: &MonitorReport) -> String {
    let s = &report.snapshot;
    let mut out = String::new();
    let _ = writeln!(out, "Monitoring: {}", report.server);
    let _ = writeln!(out);

    let cpu = s.cpu.percent;
    let _ = writeln!(
        out,
        "CPU     {} {:>6.2}%  {}",
        bar(cpu),
        cpu,
        Severity::from_percent(cpu).label()
    );

    let m = &s.memory;
    let _ = writeln!(
        out,
        "Memory  {} {:>6.2}%  {}",
        bar(m.percent_used),
        m.percent_used,
        Severity::from_percent(m.percent_used).label()
    );
    let _ = writeln!(
        out,
        "        total {:.2} GB | used {:.2} GB | free {:.2} GB",
        m.total_gb, m.used_gb, m.free_gb
    );
    let _ = writeln!(out);

    if s.disk.is_empty() {
        let _ = writeln!(out, "No disk information available");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<8} {:>12} {:>12} {:>12} {:>8}  {}",
        "Drive", "Total", "Used", "Free", "Usage", "Status"
    );
    for d in &s.disk {
        let _ = writeln!(
            out,
            "{:<8} {:>9.2} GB {:>9.2} GB {:>9.2} GB {:>7.2}%  {}",
            d.name,
            d.total_gb,
            d.used_gb,
            d.free_gb,
            d.percent_used,
            Severity::from_percent(d.percent_used).label()
        );
    }
    out
}
