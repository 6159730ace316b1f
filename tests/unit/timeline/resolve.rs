use super::*;
use crate::{project::model::total_duration, test_support::clip};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_trimmed_clip_offsets() {
    let clips = vec![clip("a", "s", 2.0, 7.0)];
    assert_eq!(total_duration(&clips), 5.0);

    let active = resolve(&clips, 3.0);
    let a = active.active().unwrap();
    assert_eq!(a.clip_id, "a");
    assert!(approx(a.local_offset, 5.0));
}

#[test]
fn second_clip_is_active_past_first_duration() {
    let clips = vec![clip("a", "s", 0.0, 4.0), clip("b", "t", 1.5, 7.5)];
    let a = resolve(&clips, 5.0);
    let a = a.active().unwrap();
    assert_eq!(a.clip_id, "b");
    assert_eq!(a.index, 1);
    assert!(approx(a.cum_start, 4.0));
    assert!(approx(a.local_offset, 5.0 - 4.0 + 1.5));
}

#[test]
fn intervals_are_half_open() {
    let clips = vec![clip("a", "s", 0.0, 4.0), clip("b", "t", 0.0, 6.0)];
    assert_eq!(resolve(&clips, 0.0).active().unwrap().clip_id, "a");
    assert_eq!(resolve(&clips, 4.0).active().unwrap().clip_id, "b");
    assert_eq!(resolve(&clips, 10.0), Resolution::End);
    assert_eq!(resolve(&clips, 12.0), Resolution::End);
}

#[test]
fn empty_timeline_resolves_to_end() {
    assert_eq!(resolve(&[], 0.0), Resolution::End);
}

#[test]
fn negative_time_clamps_to_start() {
    let clips = vec![clip("a", "s", 1.0, 2.0)];
    assert!(approx(resolve(&clips, -3.0).active().unwrap().local_offset, 1.0));
}

#[test]
fn virtual_time_from_native_handle_time() {
    let clips = vec![clip("a", "s", 0.0, 4.0), clip("b", "t", 2.0, 8.0)];
    let b = resolve(&clips, 4.0).active().unwrap().clone();
    assert!(approx(b.virtual_time_at(3.0), 5.0));
    assert!(approx(b.virtual_time_at(8.0), 10.0));
    assert!(approx(b.virtual_time_at(9.3), 10.0));
    assert!(approx(b.virtual_time_at(1.0), 4.0));
}

#[test]
fn total_duration_resolves_to_end_for_inexact_sums() {
    let clips = vec![clip("a", "s", 0.0, 1.1), clip("b", "t", 0.0, 1.7)];
    let total = total_duration(&clips);
    assert_eq!(resolve(&clips, total), Resolution::End);
    assert_eq!(resolve(&clips, 2.7).active().unwrap().clip_id, "b");

    let a = resolve(&clips, 0.0).active().unwrap().clone();
    assert_eq!(a.cum_end(), 1.1);
    assert_eq!(resolve(&clips, a.cum_end()).active().unwrap().clip_id, "b");
}

#[test]
fn end_boundary_holds_across_many_durations() {
    for n in 1..40 {
        let d1 = 0.1 * f64::from(n);
        let d2 = 0.3 + 0.07 * f64::from(n);
        let clips = vec![
            clip("a", "s", 0.2, 0.2 + d1),
            clip("b", "t", 1.0, 1.0 + d2),
            clip("c", "s", 0.5, 0.5 + d1),
        ];
        let total = total_duration(&clips);
        assert_eq!(resolve(&clips, total), Resolution::End, "n = {n}");
        let last = resolve(&clips, total - 1e-6);
        assert_eq!(last.active().unwrap().cum_end(), total, "n = {n}");
    }
}
