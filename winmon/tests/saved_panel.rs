//! Saved-server panel: selection and the timed delete confirmation.
use std::sync::Arc;
use std::time::{Duration, Instant};

use winmon::panel::{DeleteConfirm, SavedPanel, CONFIRM_WINDOW};
use winmon::profiles::ProfileStore;
use winmon::storage::MemoryStore;
use winmon::types::{Credentials, Transport};

fn creds(server: &str) -> Credentials {
    Credentials {
        server: server.into(),
        username: "admin".into(),
        password: format!("pw-{server}"),
        port: 5985,
        transport: Transport::Basic,
    }
}

fn panel_with(servers: &[&str]) -> (ProfileStore, SavedPanel) {
    let store = ProfileStore::new(Arc::new(MemoryStore::new()));
    for s in servers {
        store.save(&creds(s)).unwrap();
    }
    let panel = SavedPanel::new(store.clone());
    (store, panel)
}

#[test]
fn two_presses_inside_window_delete_exactly_one() {
    let (store, mut panel) = panel_with(&["a", "b", "c"]);
    let b_id = store.get_all()[1].id.clone();
    panel.select_next();
    let t0 = Instant::now();
    assert_eq!(panel.press_delete(t0).unwrap(), None);
    assert_eq!(store.get_all().len(), 3);
    let removed = panel.press_delete(t0 + Duration::from_millis(2900)).unwrap();
    let all = store.get_all();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|p| p.server != "b"));
    assert_eq!(removed, Some(b_id));
    assert_eq!(panel.entries().len(), 2);
    assert_eq!(*panel.confirm_state(), DeleteConfirm::Idle);
}

#[test]
fn single_press_deletes_nothing() {
    let (store, mut panel) = panel_with(&["a"]);
    let t0 = Instant::now();
    panel.press_delete(t0).unwrap();
    panel.tick(t0 + CONFIRM_WINDOW);
    assert_eq!(store.get_all().len(), 1);
    assert_eq!(*panel.confirm_state(), DeleteConfirm::Idle);
}

#[test]
fn presses_further_apart_than_window_delete_nothing() {
    let (store, mut panel) = panel_with(&["a"]);
    let t0 = Instant::now();
    panel.press_delete(t0).unwrap();
    // second press lands after the window: it re-arms instead of deleting
    assert_eq!(panel.press_delete(t0 + Duration::from_millis(3100)).unwrap(), None);
    assert_eq!(store.get_all().len(), 1);
}

#[test]
fn activate_returns_full_credentials_and_touches_last_used() {
    let (store, mut panel) = panel_with(&["a", "b"]);
    let before = store.get_all()[1].clone();
    panel.select_next();
    std::thread::sleep(Duration::from_millis(5));
    let c = panel.activate().unwrap();
    assert_eq!(c, creds("b"));
    let after = store.get_by_id(&before.id).unwrap();
    assert!(after.last_used > before.last_used);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn refresh_signal_reloads_list() {
    let (store, mut panel) = panel_with(&[]);
    assert!(panel.entries().is_empty());
    assert!(panel.activate().is_none());
    store.save(&creds("late")).unwrap();
    panel.sync(0);
    assert!(panel.entries().is_empty());
    panel.sync(1);
    assert_eq!(panel.entries().len(), 1);
}

#[test]
fn selection_stays_in_bounds_after_delete() {
    let (_store, mut panel) = panel_with(&["a", "b"]);
    panel.select_next();
    panel.select_next();
    assert_eq!(panel.selected(), 1);
    let t0 = Instant::now();
    panel.press_delete(t0).unwrap();
    panel.press_delete(t0 + Duration::from_secs(1)).unwrap();
    assert_eq!(panel.selected(), 0);
    assert_eq!(panel.entries()[0].server, "a");
}
