use super::*;

#[test]
fn test_parse_valid_times() {
    let t = ClockTime::parse("09:30").unwrap();
    assert_eq!(t.hour(), 9);
    assert_eq!(t.minute(), 30);

    assert!(ClockTime::parse("00:00").is_some());
    assert!(ClockTime::parse("23:59").is_some());
}

#[test]
fn test_parse_rejects_out_of_range() {
    assert!(ClockTime::parse("24:00").is_none());
    assert!(ClockTime::parse("25:00").is_none());
    assert!(ClockTime::parse("12:60").is_none());
}

#[test]
fn test_parse_rejects_malformed() {
    assert!(ClockTime::parse("").is_none());
    assert!(ClockTime::parse("9:00").is_none());
    assert!(ClockTime::parse("09:00:00").is_none());
    assert!(ClockTime::parse("09-00").is_none());
    assert!(ClockTime::parse("ab:cd").is_none());
    assert!(ClockTime::parse(" 9:00").is_none());
    assert!(ClockTime::parse("+9:00").is_none());
}

#[test]
fn test_display_is_zero_padded() {
    let t = ClockTime::new(7, 5).unwrap();
    assert_eq!(t.to_string(), "07:05");
    assert_eq!(ClockTime::parse(&t.to_string()), Some(t));
}

#[test]
fn test_ordering_matches_string_ordering() {
    let a = ClockTime::parse("09:59").unwrap();
    let b = ClockTime::parse("10:00").unwrap();
    assert!(a < b);
    assert!("09:59" < "10:00");
    assert_eq!(b.minutes_since_midnight(), 600);
}

#[test]
fn test_is_clock_time() {
    assert!(is_clock_time("18:45"));
    assert!(!is_clock_time("18:4"));
}

#[test]
fn test_is_calendar_date() {
    assert!(is_calendar_date("2025-01-20"));
    assert!(is_calendar_date("2024-02-29"));
    assert!(!is_calendar_date("2025-02-30"));
    assert!(!is_calendar_date("2025-1-20"));
    assert!(!is_calendar_date("20-01-2025"));
    assert!(!is_calendar_date(""));
}
