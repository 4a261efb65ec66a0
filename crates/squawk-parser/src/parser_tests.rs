//! Unit tests for the section parser and the elaboration phase.
//!
//! These tests run the lexer, parser and builder over small scripts and
//! check the resulting document, model and diagnostics.

use squawk_core::{
    color::Color,
    identifier::Id,
    position::{Horizontal, Position, Vertical},
    semantic::{Background, TimestampFormat},
};

use crate::{
    error::{ErrorCode, ErrorKind, Severity},
    lexer, parse, parser,
    parser_types::{Document, SectionKind},
};

/// Helper function to run the lexer and section parser.
fn build_document(source: &str) -> Document<'_> {
    let tokens = lexer::tokenize(source).expect("Lexer should succeed");
    parser::build_document(&tokens).expect("Parser should succeed")
}

/// Helper to collect the error codes of a failed parse, in order.
fn error_codes(source: &str) -> Vec<ErrorCode> {
    let err = parse(source).expect_err("Expected parsing to fail");
    err.diagnostics()
        .iter()
        .filter(|diag| diag.severity() == Severity::Error)
        .filter_map(|diag| diag.code())
        .collect()
}

fn assert_error_codes(source: &str, expected: &[ErrorCode]) {
    assert_eq!(error_codes(source), expected, "unexpected errors for:\n{source}");
}

const HEADER: &str = "\
[metaTypes.Timestamp]
format = mm:ss
cps = 12

[meta.TS]
type = Timestamp

[speakerTypes.Controller]
position = top-right
color = #ffcc00
";

fn script_with(extra: &str, comms: &str) -> String {
    format!("{HEADER}\n{extra}\n[comms]\n{comms}")
}

mod section_parsing_tests {
    use super::*;

    #[test]
    fn test_sections_in_source_order() {
        let source = script_with("[speakers.ATC]\ntype = Controller", "TS = 00:00");
        let document = build_document(&source);

        let kinds: Vec<_> = document.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SectionKind::MetaType, SectionKind::Meta, SectionKind::SpeakerType, SectionKind::Speaker]
        );
        assert!(document.comms.is_some());
        assert_eq!(document.dialogue.len(), 1);
    }

    #[test]
    fn test_family_prefix_is_case_insensitive() {
        let document = build_document("[SPEAKERS.atc]\nname = Tower\n[MetaTypes.Radio]\n[Comms]\n");
        assert_eq!(document.sections[0].kind, SectionKind::Speaker);
        assert_eq!(*document.sections[0].name.as_ref().unwrap().inner(), "atc");
        assert_eq!(document.sections[1].kind, SectionKind::MetaType);
        assert!(document.comms.is_some());
    }

    #[test]
    fn test_attribute_names_lowercased_and_values_unquoted() {
        let document = build_document("[speakers.ATC]\nName = \"Tower's \\\"main\\\"\"\n");
        let attr = &document.sections[0].attributes[0];
        assert_eq!(*attr.name.inner(), "name");
        assert_eq!(*attr.value.inner(), "Tower's \"main\"");
    }

    #[test]
    fn test_dialogue_keeps_order_and_duplicates() {
        let document = build_document("[comms]\nATC = one\nPILOT = two\nATC = one\n");
        let keys: Vec<_> = document.dialogue.iter().map(|l| *l.key.inner()).collect();
        assert_eq!(keys, ["ATC", "PILOT", "ATC"]);
        assert_eq!(*document.dialogue[2].text.inner(), "one");
        assert_eq!(document.dialogue[2].line_number, 4);
    }

    #[test]
    fn test_dialogue_line_without_equals_is_skipped() {
        let document = build_document("[comms]\nATC = one\njust words\nATC = two\n");
        assert_eq!(document.dialogue.len(), 2);
    }

    #[test]
    fn test_waypoint_tokens() {
        let document = build_document("[waypoints.rnav]\nLAZET, RULOX,\n  ; comment\nKORD\n");
        let group = &document.waypoints[0];
        assert_eq!(*group.name.inner(), "rnav");
        let tokens: Vec<_> = group.tokens.iter().map(|t| *t.inner()).collect();
        assert_eq!(tokens, ["LAZET", "RULOX", "KORD"]);
    }

    #[test]
    fn test_unknown_section_is_a_warning() {
        let document = build_document("[colors]\nprimary = red\n[comms]\n");
        assert!(document.sections.is_empty());
    }
}

mod structure_error_tests {
    use super::*;

    #[test]
    fn test_entry_outside_section() {
        assert_error_codes("ATC = hello\n[comms]\n", &[ErrorCode::E102]);
    }

    #[test]
    fn test_malformed_line_in_section() {
        assert_error_codes("[speakers.ATC]\nname Tower\n[comms]\n", &[ErrorCode::E100]);
    }

    #[test]
    fn test_malformed_line_in_unknown_section() {
        assert_error_codes("[misc]\nnot a pair\n[comms]\n", &[ErrorCode::E100]);
    }

    #[test]
    fn test_family_without_name() {
        assert_error_codes("[speakers]\nname = Tower\n[comms]\n", &[ErrorCode::E101]);
        assert_error_codes("[meta. ]\n[comms]\n", &[ErrorCode::E101]);
    }

    #[test]
    fn test_duplicate_section() {
        let source = "[speakers.ATC]\nname = A\n[speakers.atc]\nname = B\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E105]);
    }

    #[test]
    fn test_same_key_in_both_families_is_not_a_duplicate() {
        let source = "[meta.ATC]\n[speakers.ATC]\n[comms]\n";
        assert!(parse(source).is_ok());
    }

    #[test]
    fn test_duplicate_attribute() {
        let source = "[speakers.ATC]\ncolor = red\nCOLOR = blue\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E106]);
    }

    #[test]
    fn test_first_line_must_be_marker() {
        let source = script_with("[speakers.ATC]", "ATC = hello\nTS = 00:05");
        let err = parse(&source).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Structure));
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E103));
    }

    #[test]
    fn test_unknown_dialogue_key() {
        let source = script_with("[speakers.ATC]", "TS = 00:00\nATC = hi\nGHOST = boo");
        assert_error_codes(&source, &[ErrorCode::E104]);
    }

    #[test]
    fn test_every_error_reported() {
        let source = script_with(
            "[speakers.ATC]\ncolor = notacolor\nshow_name = maybe",
            "TS = 00:00\nGHOST = boo",
        );
        assert_error_codes(&source, &[ErrorCode::E402, ErrorCode::E104]);
    }

    #[test]
    fn test_invalid_color_falls_back_to_white() {
        let source = script_with(
            "[speakers.ATC]\ncolor = notacolor\nbackground = blurple",
            "TS = 00:00\nATC = hello",
        );
        let script = parse(&source).expect("Invalid colors are only a warning");

        let attributes = script.entry(Id::new("ATC")).expect("speaker").attributes();
        assert_eq!(attributes.color(), Some(Color::white()));
        assert_eq!(attributes.background(), Some(Background::Fill(Color::white())));
    }
}

mod schema_error_tests {
    use super::*;

    #[test]
    fn test_timing_attribute_on_speaker_type() {
        let source = "[speakerTypes.Pilot]\ncps = 10\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E200]);
    }

    #[test]
    fn test_timing_attribute_on_untyped_entry() {
        let source = "[meta.NOTE]\nformat = ss\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E200]);
    }

    #[test]
    fn test_visual_attribute_on_timestamp_type() {
        let source = "[metaTypes.Timestamp]\ncolor = red\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E201]);
    }

    #[test]
    fn test_visual_attribute_on_timestamp_entry() {
        let source = "[meta.TS]\ntype = timestamp\nposition = top\n[comms]\nTS = 00:00\n";
        assert_error_codes(source, &[ErrorCode::E201]);
    }

    #[test]
    fn test_schema_check_counts_empty_values() {
        let source = "[speakerTypes.Pilot]\ncps =\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E200]);
    }

    #[test]
    fn test_undefined_type_falls_back_to_defaults() {
        let source = "[meta.TS]\ntype = Timestamp\n\
                      [meta.C]\ntype = Comment\n\
                      [comms]\nTS = 00:00\nC = static on frequency\n";
        let script = parse(source).expect("Undefined types are only a warning");

        let entry = script.entry(Id::new("C")).expect("meta entry");
        assert_eq!(entry.type_name(), Some("Comment"));
        assert!(script.type_of(entry).is_none());
        assert!(script.is_meta_rail_key(Id::new("C")));
        assert_eq!(script.markers().len(), 1);
    }

    #[test]
    fn test_undefined_type_does_not_exempt_timing_attributes() {
        let source = "[speakers.ATC]\ntype = Controler\ncps = 12\n[comms]\n";
        let err = parse(source).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| (d.severity(), d.code())).collect();
        assert_eq!(
            codes,
            [
                (Severity::Warning, Some(ErrorCode::E202)),
                (Severity::Error, Some(ErrorCode::E200)),
            ]
        );
        let span = err.diagnostics()[0].labels()[0].span();
        assert_eq!(&source[span.start()..span.end()], "Controler");
    }

    #[test]
    fn test_type_declared_in_both_families() {
        let source = "[speakerTypes.Radio]\n[metaTypes.radio]\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E203]);
    }
}

mod value_error_tests {
    use super::*;

    #[test]
    fn test_cps_must_be_positive() {
        for bad in ["0", "-3", "fast", "inf"] {
            let source = format!("[metaTypes.Timestamp]\ncps = {bad}\n[comms]\n");
            assert_error_codes(&source, &[ErrorCode::E400]);
        }
    }

    #[test]
    fn test_threshold_must_be_at_least_one() {
        for bad in ["0", "1.5", "two"] {
            let source = format!("[speakerTypes.Pilot]\nbackground_lines_threshold = {bad}\n[comms]\n");
            assert_error_codes(&source, &[ErrorCode::E401]);
        }
    }

    #[test]
    fn test_unknown_format() {
        let source = "[metaTypes.Timestamp]\nformat = mm:ss:ff\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E404]);
    }

    #[test]
    fn test_render_values() {
        let source = "[render]\nplay_res_x = wide\nwrap_width_ratio = nan\n[comms]\n";
        assert_error_codes(source, &[ErrorCode::E401, ErrorCode::E400]);
    }
}

mod timestamp_error_tests {
    use super::*;

    #[test]
    fn test_marker_errors() {
        let empty = script_with("", "TS =");
        assert_error_codes(&empty, &[ErrorCode::E300]);

        let mismatch = script_with("", "TS = 00:00:00");
        assert_error_codes(&mismatch, &[ErrorCode::E301]);

        let non_numeric = script_with("", "TS = 0a:00");
        assert_error_codes(&non_numeric, &[ErrorCode::E302]);

        let err = parse(&non_numeric).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::TimestampFormat));
    }

    #[test]
    fn test_marker_format_from_entry_override() {
        let source = "[meta.TS]\ntype = Timestamp\nformat = hh:mm:ss\n[comms]\nTS = 00:01:00\n";
        let script = parse(source).unwrap();
        assert_eq!(script.markers()[0].time_ms(), 60_000);
    }
}

mod elaboration_tests {
    use super::*;

    #[test]
    fn test_full_script() {
        let source = script_with(
            "[speakers.atc]\nname = \"Tower\"\ntype = controller\nshow_name = yes\n\
             [meta.NOTE]\nbackground = rgba(0, 0, 0, 0.5)\n\
             [acronyms.fl]\nextension = Flight Level\n\
             [waypoints.star]\nLAZET\n\
             [render]\nplay_res_x = 1280\nwrap_width_ratio = 0.5",
            "TS = 00:00.250\nATC = climb FL350\nNOTE = handoff\nTS = 01:00\nATC = ATC again",
        );
        let script = parse(&source).unwrap();

        let atc = Id::new("ATC");
        let entry = script.entry(atc).unwrap();
        assert_eq!(entry.display_name(), "Tower");
        assert_eq!(entry.type_name(), Some("controller"));

        let style = script.resolve_style(atc);
        assert_eq!(style.position(), Position::new(Vertical::Top, Horizontal::Right));
        assert_eq!(style.color(), Color::new("#ffcc00").unwrap());
        assert!(style.show_name());

        let note = script.resolve_style(Id::new("note"));
        assert!(matches!(note.background(), Background::Fill(_)));

        let markers = script.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].line_index(), 0);
        assert_eq!(markers[0].time_ms(), 250);
        assert_eq!(markers[1].line_index(), 3);
        assert_eq!(markers[1].time_ms(), 60_000);
        assert_eq!(markers[0].cps(), 12.0);

        assert_eq!(script.lines().len(), 5);
        assert_eq!(script.lines()[4].key(), atc);
        assert_eq!(script.lines()[4].text(), "ATC again");

        assert_eq!(script.acronyms().get("FL"), Some("Flight Level"));
        assert!(script.waypoints().contains("lazet"));
        assert_eq!(script.render().play_res_x(), Some(1280));
        assert_eq!(script.render().play_res_y(), None);
        assert_eq!(script.render().wrap_width_ratio(), Some(0.5));
    }

    #[test]
    fn test_builtin_timestamp_type() {
        let source = "[meta.T]\ntype = Timestamp\n[speakers.P]\n[comms]\nT = 00:10\nP = go\n";
        let script = parse(source).unwrap();
        assert!(script.is_marker_key(Id::new("T")));
        assert_eq!(script.resolve_timing(Id::new("T")).format(), TimestampFormat::MinutesSeconds);
        assert_eq!(script.markers()[0].time_ms(), 10_000);
        assert_eq!(script.markers()[0].cps(), 15.0);
    }

    #[test]
    fn test_untyped_meta_is_not_a_marker() {
        let source = "[meta.TS]\n[comms]\nTS = 00:00\n";
        assert_error_codes(source, &[ErrorCode::E103]);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let source = "[speakers.ATC]\nname =\ncolor = \"\"\n[comms]\n";
        let script = parse(source).unwrap();
        let style = script.resolve_style(Id::new("ATC"));
        assert_eq!(style.display_name(), "ATC");
        assert_eq!(style.color(), Color::white());
    }

    #[test]
    fn test_acronym_without_extension_is_ignored() {
        let source = "[acronyms.ILS]\nextension =\n[comms]\n";
        let script = parse(source).unwrap();
        assert!(script.acronyms().is_empty());
    }

    #[test]
    fn test_missing_comms_is_empty_script() {
        let script = parse("[speakers.ATC]\nname = Tower\n").unwrap();
        assert!(script.lines().is_empty());
        assert!(script.markers().is_empty());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let source = "[speakers.ATC]\ncolour = red\n[extras]\nfoo = bar\n[comms]\n";
        assert!(parse(source).is_ok());
    }
}
