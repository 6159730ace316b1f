use super::*;

#[test]
fn no_override_is_identity() {
    let r = preview_rotation(Rotation::Pos90, None);
    assert!(r.is_identity());
    assert!(!r.swaps_aspect());
}

#[test]
fn override_counter_rotates_by_angle_difference() {
    assert_eq!(preview_rotation(Rotation::Unrotated, Some(Rotation::Pos90)).degrees, -90);
    assert_eq!(preview_rotation(Rotation::Pos90, Some(Rotation::Unrotated)).degrees, 90);
    assert_eq!(preview_rotation(Rotation::Neg90, Some(Rotation::Pos90)).degrees, -180);
    assert!(preview_rotation(Rotation::Neg180, Some(Rotation::Unrotated)).swaps_aspect());
}

#[test]
fn override_equal_to_native_is_identity() {
    assert!(preview_rotation(Rotation::Neg90, Some(Rotation::Neg90)).is_identity());
}
