use alert_extract::{AlertRecord, Marker, UNKNOWN, extract_field};
use proptest::prelude::*;

const SAMPLE: &str =
    "Time of detection: 2024-01-01 08:00\nLocation: Main St\nDirection: E\nSome other line";

#[test]
fn test_sample_alert() {
    let alert = AlertRecord::build(SAMPLE, "/tmp/alertEmail1.txt", "alert.msg", "");

    assert_eq!(alert.timestamp(), "2024-01-01 08:00");
    assert_eq!(alert.location(), "Main St");
    assert_eq!(alert.direction(), "E");
    assert_eq!(alert.raw_text(), SAMPLE);
    assert!(!alert.has_unknown_fields());
}

#[test]
fn test_no_markers() {
    let body = "Hello team,\nnothing to report today.\n";
    let alert = AlertRecord::build(body, "", "quiet.msg", "");

    assert_eq!(alert.timestamp(), UNKNOWN);
    assert_eq!(alert.location(), UNKNOWN);
    assert_eq!(alert.direction(), UNKNOWN);
    assert_eq!(alert.raw_text(), body);
    assert!(alert.has_unknown_fields());
}

#[test]
fn test_partial_markers() {
    let alert = AlertRecord::build("Direction: W\n", "", "p.msg", "");

    assert_eq!(alert.direction(), "W");
    assert_eq!(alert.field(Marker::Location), UNKNOWN);
    assert_eq!(alert.field(Marker::TimeOfDetection), UNKNOWN);
}

#[test]
fn test_bare_marker_is_unknown() {
    let alert = AlertRecord::build("Location:   \nDirection: E", "", "b.msg", "");

    assert_eq!(alert.location(), UNKNOWN);
    assert_eq!(alert.direction(), "E");
}

#[test]
fn test_marker_prefixes() {
    let prefixes: Vec<&str> = Marker::ALL.iter().map(|m| m.prefix()).collect();
    assert_eq!(prefixes, ["Time of detection:", "Location:", "Direction:"]);
}

#[test]
fn test_extract_field_absent() {
    assert_eq!(extract_field("", "Location:"), None);
    assert_eq!(extract_field("Direction: E", "Location:"), None);
}

proptest! {
    #[test]
    fn location_line_is_extracted(
        value in "[A-Za-z0-9][A-Za-z0-9 ./-]{0,30}[A-Za-z0-9]",
        pad in "[ \t]{0,3}",
    ) {
        let body = format!("Alert\n{pad}Location:{pad}{value}{pad}\nDirection: E");
        let alert = AlertRecord::build(&body, "", "x.msg", "");
        prop_assert_eq!(alert.location(), value.as_str());
    }

    #[test]
    fn raw_text_is_verbatim(body in any::<String>()) {
        let alert = AlertRecord::build(&body, "", "x.msg", "");
        prop_assert_eq!(alert.raw_text(), body.as_str());
    }

    #[test]
    fn missing_marker_is_sentinel(body in "[a-z \n]{0,200}") {
        let alert = AlertRecord::build(&body, "", "x.msg", "");
        prop_assert_eq!(alert.timestamp(), UNKNOWN);
        prop_assert_eq!(alert.location(), UNKNOWN);
        prop_assert_eq!(alert.direction(), UNKNOWN);
    }
}
