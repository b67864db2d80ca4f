//! Saved-server panel: list state, selection, and the two-press delete confirmation.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};
use tracing::warn;

use crate::profiles::{ProfileStore, ServerProfile, StoreError};
use crate::types::Credentials;

pub const CONFIRM_WINDOW: Duration = Duration::from_secs(3);

/// Idle -> Armed(id, expiry) -> Idle. A second press on the armed entry before
/// expiry confirms; anything else re-arms or lets it lapse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteConfirm {
    #[default]
    Idle,
    Armed { id: String, expires_at: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    Armed,
    Confirmed,
}

impl DeleteConfirm {
    pub fn press(&mut self, id: &str, now: Instant) -> PressOutcome {
        self.tick(now);
        if self.is_armed_for(id, now) {
            *self = DeleteConfirm::Idle;
            return PressOutcome::Confirmed;
        }
        *self = DeleteConfirm::Armed {
            id: id.to_string(),
            expires_at: now + CONFIRM_WINDOW,
        };
        PressOutcome::Armed
    }

    /// Disarm once the window has passed.
    pub fn tick(&mut self, now: Instant) {
        if let DeleteConfirm::Armed { expires_at, .. } = self {
            if now >= *expires_at {
                *self = DeleteConfirm::Idle;
            }
        }
    }

    pub fn is_armed_for(&self, id: &str, now: Instant) -> bool {
        matches!(self, DeleteConfirm::Armed { id: armed, expires_at } if armed == id && now < *expires_at)
    }
}

pub struct SavedPanel {
    store: ProfileStore,
    entries: Vec<ServerProfile>,
    selected: usize,
    confirm: DeleteConfirm,
    seen_signal: u64,
}

impl SavedPanel {
    pub fn new(store: ProfileStore) -> Self {
        let mut p = Self {
            store,
            entries: Vec::new(),
            selected: 0,
            confirm: DeleteConfirm::Idle,
            seen_signal: 0,
        };
        p.reload();
        p
    }

    pub fn reload(&mut self) {
        self.entries = self.store.get_all();
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }

    /// Reload when the external refresh counter moved.
    pub fn sync(&mut self, signal: u64) {
        if signal != self.seen_signal {
            self.seen_signal = signal;
            self.reload();
        }
    }

    pub fn entries(&self) -> &[ServerProfile] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn confirm_state(&self) -> &DeleteConfirm {
        &self.confirm
    }

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Use the highlighted entry: touch its `last_used` and hand back the full
    /// credentials for a new monitor request.
    pub fn activate(&mut self) -> Option<Credentials> {
        let entry = self.entries.get(self.selected)?;
        let creds = entry.credentials();
        if let Err(e) = self.store.update_last_used(&entry.id) {
            warn!("could not record last use of {}: {e}", entry.server);
        }
        self.reload();
        Some(creds)
    }

    /// Delete button on the highlighted entry. Returns the removed id on the
    /// confirming press.
    pub fn press_delete(&mut self, now: Instant) -> Result<Option<String>, StoreError> {
        let Some(id) = self.entries.get(self.selected).map(|e| e.id.clone()) else {
            return Ok(None);
        };
        match self.confirm.press(&id, now) {
            PressOutcome::Armed => Ok(None),
            PressOutcome::Confirmed => {
                let removed = self.store.delete(&id)?;
                self.reload();
                Ok(removed.then_some(id))
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.confirm.tick(now);
    }
}

/// "Just now", "5 mins ago", "1 hour ago", ... and an absolute local time past a week.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(then);
    let mins = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();
    let plural = |n: i64| if n > 1 { "s" } else { "" };

    if mins < 1 {
        "Just now".to_string()
    } else if mins < 60 {
        format!("{mins} min{} ago", plural(mins))
    } else if hours < 24 {
        format!("{hours} hour{} ago", plural(hours))
    } else if days < 7 {
        format!("{days} day{} ago", plural(days))
    } else {
        then.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let ago = |secs: i64| relative_time(now - chrono::Duration::seconds(secs), now);
        assert_eq!(ago(0), "Just now");
        assert_eq!(ago(59), "Just now");
        assert_eq!(ago(60), "1 min ago");
        assert_eq!(ago(59 * 60), "59 mins ago");
        assert_eq!(ago(3600), "1 hour ago");
        assert_eq!(ago(5 * 3600 + 10), "5 hours ago");
        assert_eq!(ago(86_400), "1 day ago");
        assert_eq!(ago(6 * 86_400), "6 days ago");
        assert!(ago(8 * 86_400).starts_with("2024-06-0"));
    }

    #[test]
    fn clock_skew_reads_as_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_time(now + chrono::Duration::minutes(5), now), "Just now");
    }

    #[test]
    fn confirm_expires_without_second_press() {
        let t0 = Instant::now();
        let mut c = DeleteConfirm::Idle;
        assert_eq!(c.press("a", t0), PressOutcome::Armed);
        assert!(c.is_armed_for("a", t0 + Duration::from_secs(2)));
        c.tick(t0 + CONFIRM_WINDOW);
        assert_eq!(c, DeleteConfirm::Idle);
    }

    #[test]
    fn pressing_another_entry_rearms_for_it() {
        let t0 = Instant::now();
        let mut c = DeleteConfirm::Idle;
        c.press("a", t0);
        assert_eq!(c.press("b", t0 + Duration::from_secs(1)), PressOutcome::Armed);
        assert!(c.is_armed_for("b", t0 + Duration::from_secs(1)));
        assert!(!c.is_armed_for("a", t0 + Duration::from_secs(1)));
        // the window restarts with the new arm
        assert_eq!(c.press("b", t0 + Duration::from_millis(3500)), PressOutcome::Confirmed);
    }
}
