use super::*;

#[test]
fn hms_rolls_minutes_into_hours() {
    assert_eq!(format_hms(59.9), "0:00:59");
    assert_eq!(format_hms(60.0), "0:01:00");
    assert_eq!(format_hms(3600.0), "1:00:00");
}

#[test]
fn mm_ss_keeps_counting_minutes() {
    assert_eq!(format_mm_ss(0.0), "00:00");
    assert_eq!(format_mm_ss(65.2), "01:05");
    assert_eq!(format_mm_ss(3725.0), "62:05");
}

#[test]
fn negative_inputs_format_as_zero() {
    assert_eq!(format_hms(-3.0), "0:00:00");
    assert_eq!(format_mm_ss(-0.5), "00:00");
}

#[test]
fn seconds_have_two_decimals() {
    assert_eq!(format_seconds(4.0), "4.00s");
    assert_eq!(format_seconds(1.0 / 60.0), "0.02s");
}
