use proptest::prelude::*;
use squawk_core::{identifier::Id, semantic::TimestampFormat};
use squawk_parser::{error::ErrorKind, parse, parse_timestamp};

const TOWER_SCRIPT: &str = r#"
; Approach briefing
[metaTypes.Timestamp]
format = mm:ss
cps = 14

[meta.T]
type = Timestamp

[metaTypes.Comment]
position = top-center
background = rgba(0, 0, 0, 0.6)

[meta.NOTE]
type = Comment
name = Note

[speakerTypes.Controller]
color = #9ad1ff
position = bottom-left

[speakers.APP]
type = Controller
name = "Approach"

[speakers.DLH97V]
name = Lufthansa 97 Victor
position = bottom-right

[acronyms.FL]
extension = Flight Level

[waypoints.STAR]
LAZET, RULOX

[comms]
T = 00:00
APP = "DLH97V, descend FL80"
DLH97V = Descending FL80, DLH97V
NOTE = Handoff pending
T = 00:30
APP = "Contact Tower 118.5, it's been a pleasure"
DLH97V = 'Tower 118.5, DLH97V'
"#;

#[test]
fn test_tower_script() {
    let script = parse(TOWER_SCRIPT).expect("Failed to parse");

    assert_eq!(script.lines().len(), 7);
    assert_eq!(script.markers().len(), 2);
    assert_eq!(script.markers()[1].time_ms(), 30_000);
    assert_eq!(script.markers()[1].cps(), 14.0);

    let keys: Vec<_> = script.style_keys().iter().map(Id::as_string).collect();
    assert_eq!(keys, ["APP", "DLH97V", "NOTE"]);

    assert!(script.is_meta_rail_key(Id::new("NOTE")));
    assert!(!script.is_meta_rail_key(Id::new("T")));
    assert!(!script.is_meta_rail_key(Id::new("APP")));

    assert_eq!(
        script.lines()[5].text(),
        "Contact Tower 118.5, it's been a pleasure"
    );
    assert_eq!(script.lines()[6].text(), "Tower 118.5, DLH97V");
    assert_eq!(script.lines()[6].line_number(), 43);
}

#[test]
fn test_error_categories() {
    let structure = "[comms]\nAPP = hello\n";
    assert_eq!(parse(structure).unwrap_err().kind(), Some(ErrorKind::Structure));

    let schema = "[speakers.APP]\ncps = 20\n[comms]\n";
    assert_eq!(parse(schema).unwrap_err().kind(), Some(ErrorKind::Schema));

    let timestamp = "[meta.T]\ntype = Timestamp\n[comms]\nT = soon\n";
    assert_eq!(
        parse(timestamp).unwrap_err().kind(),
        Some(ErrorKind::TimestampFormat)
    );

    let value = "[speakers.APP]\nshow_name = perhaps\n[comms]\n";
    assert_eq!(parse(value).unwrap_err().kind(), Some(ErrorKind::ConfigValue));
}

#[test]
fn test_diagnostic_spans_point_into_source() {
    let source = "[speakers.APP]\ncolor = chartreuse-ish\n[comms]\n";
    let err = parse(source).unwrap_err();
    let label = &err.diagnostics()[0].labels()[0];
    assert_eq!(
        &source[label.span().start()..label.span().end()],
        "chartreuse-ish"
    );
}

fn check_minutes_seconds(minutes: u64, seconds: u64, millis: u64) -> Result<(), TestCaseError> {
    let value = format!("{minutes:02}:{seconds:02}.{millis:03}");
    let parsed = parse_timestamp(&value, TimestampFormat::MinutesSeconds);
    prop_assert_eq!(parsed, Ok((minutes * 60 + seconds) * 1000 + millis));
    Ok(())
}

proptest! {
    #[test]
    fn prop_minutes_seconds(minutes in 0u64..600, seconds in 0u64..60, millis in 0u64..1000) {
        check_minutes_seconds(minutes, seconds, millis)?;
    }
}
