use super::*;

fn registry() -> HandleRegistry<SimulatedHandle> {
    let mut r = HandleRegistry::new();
    r.register("a", SimulatedHandle::new(10.0));
    r.register("b", SimulatedHandle::new(10.0));
    r.register("c", SimulatedHandle::new(10.0));
    r
}

#[test]
fn registered_handles_start_paused() {
    let r = registry();
    assert_eq!(r.len(), 3);
    assert_eq!(r.playing_count(), 0);
    assert_eq!(r.owner(), None);
}

#[test]
fn transfer_pauses_previous_owner() {
    let mut r = registry();
    assert!(r.transfer_to("a"));
    r.get_mut("a").unwrap().play();
    assert_eq!(r.playing_count(), 1);

    assert!(r.transfer_to("b"));
    assert!(r.get("a").unwrap().is_paused());
    r.get_mut("b").unwrap().play();
    assert_eq!(r.playing_count(), 1);
    assert_eq!(r.owner(), Some("b"));
}

#[test]
fn transfer_to_current_owner_is_not_a_change() {
    let mut r = registry();
    assert!(r.transfer_to("a"));
    assert!(!r.transfer_to("a"));
    assert!(!r.transfer_to("missing"));
    assert_eq!(r.owner(), Some("a"));
}

#[test]
fn stray_players_are_paused_on_transfer() {
    let mut r = registry();
    r.get_mut("c").unwrap().play();
    r.transfer_to("a");
    assert!(r.get("c").unwrap().is_paused());
}

#[test]
fn unregister_owner_revokes_token() {
    let mut r = registry();
    r.transfer_to("b");
    r.retain_sources(["a", "c"]);
    assert_eq!(r.owner(), None);
    assert!(!r.contains("b"));
    assert_eq!(r.len(), 2);
}

#[test]
fn rate_applies_to_late_registrations() {
    let mut r = registry();
    r.set_rate(2.0);
    r.register("d", SimulatedHandle::new(3.0));
    assert_eq!(r.get("a").unwrap().rate(), 2.0);
    assert_eq!(r.get("d").unwrap().rate(), 2.0);
    r.set_rate(1.0);
    assert_eq!(r.get("d").unwrap().rate(), 1.0);
}

#[test]
fn simulated_handle_stops_at_duration() {
    let mut h = SimulatedHandle::new(2.0);
    h.advance(1.0);
    assert_eq!(h.current_time(), 0.0);

    h.play();
    h.set_playback_rate(2.0);
    assert_eq!(h.advance(0.5), 1.0);
    assert_eq!(h.advance(5.0), 2.0);
    assert!(h.is_paused());

    h.seek(-1.0);
    assert_eq!(h.current_time(), 0.0);
    assert_eq!(h.seeks, 1);
}
