use crate::*;
use gp_core::config::ParserConfig;
use std::path::Path;

fn parse(text: &str) -> Transcript {
    ChatExportParser::new().parse_content(text)
}

// ========== Normalization ==========

#[test]
fn test_normalize_no_break_spaces() {
    assert_eq!(normalize_line("  10:05\u{202F}AM\u{00A0}x  "), "10:05 AM x");
}

#[test]
fn test_normalize_plain_line_unchanged() {
    assert_eq!(normalize_line("hello world"), "hello world");
}

#[test]
fn test_split_lines_terminators() {
    assert_eq!(split_lines("a\nb\r\nc\rd\u{2028}e"), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
    assert_eq!(split_lines("\r\n"), vec![""]);
    assert!(split_lines("").is_empty());
}

// ========== Line pattern ==========

#[test]
fn test_match_basic_line() {
    let m = match_message_line("1/2/24, 10:05 AM - Alice: Hello").unwrap();
    assert_eq!(m.date, "1/2/24");
    assert_eq!(m.time, "10:05 am");
    assert_eq!(m.sender, "Alice");
    assert_eq!(m.body, "Hello");
}

#[test]
fn test_match_four_digit_year() {
    let m = match_message_line("12/31/2023, 9:59 pm - Bob: bye").unwrap();
    assert_eq!(m.date, "12/31/2023");
    assert_eq!(m.time, "9:59 pm");
}

#[test]
fn test_match_three_digit_year_rejected() {
    assert!(match_message_line("1/2/202, 9:59 pm - Bob: bye").is_none());
}

#[test]
fn test_match_meridiem_case_insensitive() {
    assert_eq!(match_message_line("1/2/24, 10:05 Pm - A: x").unwrap().time, "10:05 pm");
    assert_eq!(match_message_line("1/2/24, 10:05AM - A: x").unwrap().time, "10:05 am");
}

#[test]
fn test_match_narrow_space_after_normalize() {
    let line = normalize_line("1/2/24, 10:05\u{202F}AM - Alice: Hello");
    assert!(match_message_line(&line).is_some());
}

#[test]
fn test_match_sender_stops_at_first_colon() {
    let m = match_message_line("1/2/24, 10:05 AM - Alice: time is 10:30: ok").unwrap();
    assert_eq!(m.sender, "Alice");
    assert_eq!(m.body, "time is 10:30: ok");
}

#[test]
fn test_match_empty_body() {
    let m = match_message_line("1/2/24, 10:05 AM - Alice:").unwrap();
    assert_eq!(m.body, "");
}

#[test]
fn test_non_message_lines() {
    assert!(match_message_line("just text").is_none());
    assert!(match_message_line("").is_none());
    assert!(match_message_line("1/2/24, 10:05 - Alice: no meridiem").is_none());
}

// ========== Junk filter ==========

#[test]
fn test_junk_default_list() {
    let f = JunkFilter::default();
    assert_eq!(f.len(), 3);
    assert!(f.is_junk("Messages and calls are end-to-end encrypted. No one outside..."));
    assert!(f.is_junk("THIS MESSAGE WAS DELETED"));
    assert!(!f.is_junk("hello"));
}

#[test]
fn test_junk_empty_needles_ignored() {
    let f = JunkFilter::new(["", "spam"]);
    assert_eq!(f.len(), 1);
    assert!(!f.is_junk("anything"));
    assert!(f.is_junk("SPAM here"));
}

#[test]
fn test_junk_disabled() {
    let f = JunkFilter::new(Vec::<String>::new());
    assert!(f.is_empty());
    assert!(!f.is_junk("This message was deleted"));
}

// ========== Grouping ==========

#[test]
fn test_single_day_three_messages() {
    let t = parse(
        "1/2/24, 10:05 AM - Alice: Hello\n\
         1/2/24, 10:06 AM - Bob: Hi\n\
         1/2/24, 10:05 AM - Alice: Hello",
    );
    assert_eq!(t.groups.len(), 1);
    assert_eq!(t.groups[0].date, "1/2/24");
    assert_eq!(t.message_count(), 3);
    assert_eq!(t.groups[0].messages[1].sender, "Bob");
    assert_eq!(t.groups[0].messages[1].time, "10:06 am");
}

#[test]
fn test_new_group_per_date_change() {
    let t = parse(
        "1/2/24, 10:05 AM - A: one\n\
         1/3/24, 10:05 AM - A: two\n\
         1/3/24, 11:05 AM - B: three",
    );
    assert_eq!(t.groups.len(), 2);
    assert_eq!(t.groups[0].messages.len(), 1);
    assert_eq!(t.groups[1].messages.len(), 2);
}

#[test]
fn test_returning_date_opens_new_run() {
    let t = parse(
        "1/2/24, 10:05 AM - A: one\n\
         1/3/24, 10:05 AM - A: two\n\
         1/2/24, 10:06 AM - A: three",
    );
    let dates: Vec<&str> = t.groups.iter().map(|g| g.date.as_str()).collect();
    assert_eq!(dates, vec!["1/2/24", "1/3/24", "1/2/24"]);
    assert_eq!(t.to_lines()[2], "1/2/24 10:06 am A: three");
}

// ========== Continuations ==========

#[test]
fn test_continuation_appended() {
    let t = parse("1/2/24, 10:05 AM - Alice: first line\n  second line  \nthird");
    assert_eq!(t.message_count(), 1);
    assert_eq!(t.groups[0].messages[0].body, "first line second line third");
}

#[test]
fn test_continuation_before_any_message_dropped() {
    let (t, stats) = ChatExportParser::new()
        .parse_with_stats("orphan line\n1/2/24, 10:05 AM - Alice: Hello");
    assert_eq!(t.message_count(), 1);
    assert_eq!(t.groups[0].messages[0].body, "Hello");
    assert_eq!(stats.dropped, 1);
}

#[test]
fn test_blank_line_is_noop() {
    let t = parse("1/2/24, 10:05 AM - Alice: Hello\n\n   \n1/2/24, 10:06 AM - Bob: Hi");
    assert_eq!(t.groups[0].messages[0].body, "Hello");
    assert_eq!(t.message_count(), 2);
}

#[test]
fn test_crlf_lines() {
    let t = parse("1/2/24, 10:05 AM - Alice: Hello\r\nmore\r\n");
    assert_eq!(t.groups[0].messages[0].body, "Hello more");
}

#[test]
fn test_carriage_return_only_line_endings() {
    let t = parse("1/2/24, 10:05 AM - Alice: Hi\r1/2/24, 10:06 AM - Bob: Yo\r");
    assert_eq!(t.to_lines(), vec!["1/2/24 10:05 am Alice: Hi", "1/2/24 10:06 am Bob: Yo"]);
}

// ========== Junk in transcripts ==========

#[test]
fn test_junk_message_removed() {
    let (t, stats) = ChatExportParser::new().parse_with_stats(
        "1/1/24, 9:00 AM - Group: Messages and calls are end-to-end encrypted.\n\
         1/2/24, 10:05 AM - Alice: Hello\n\
         1/2/24, 10:06 AM - Bob: This message was deleted",
    );
    assert_eq!(stats.junk, 2);
    assert_eq!(t.groups.len(), 1);
    assert_eq!(t.groups[0].date, "1/2/24");
    assert_eq!(t.message_count(), 1);
}

#[test]
fn test_junk_continuation_extends_previous_kept_message() {
    let (t, stats) = ChatExportParser::new().parse_with_stats(
        "1/2/24, 10:05 AM - Alice: Hello\n\
         1/2/24, 10:06 AM - Bob: This message was deleted\n\
         trailing\n\
         1/2/24, 10:07 AM - Alice: Bye",
    );
    assert_eq!(t.to_lines(), vec!["1/2/24 10:05 am Alice: Hello trailing", "1/2/24 10:07 am Alice: Bye"]);
    assert_eq!(stats.continuations, 1);
    assert_eq!(stats.dropped, 0);
}

#[test]
fn test_junk_continuation_before_any_message_dropped() {
    let (t, stats) = ChatExportParser::new().parse_with_stats(
        "1/1/24, 9:00 AM - Group: Messages and calls are end-to-end encrypted.\n\
         tap to learn more\n\
         1/2/24, 10:05 AM - Alice: Hello",
    );
    assert_eq!(t.to_lines(), vec!["1/2/24 10:05 am Alice: Hello"]);
    assert_eq!(stats.dropped, 1);
}

#[test]
fn test_custom_blocklist() {
    let config = ParserConfig { junk_substrings: vec!["<Media omitted>".into()] };
    let t = ChatExportParser::from_config(&config).parse_content(
        "1/2/24, 10:05 AM - Alice: <media OMITTED>\n1/2/24, 10:06 AM - Bob: This message was deleted",
    );
    assert_eq!(t.message_count(), 1);
    assert_eq!(t.groups[0].messages[0].sender, "Bob");
}

// ========== Stats / trait ==========

#[test]
fn test_parse_stats() {
    let (_, stats) = ChatExportParser::new().parse_with_stats(
        "header\n1/2/24, 10:05 AM - Alice: Hello\ncont\n1/2/24, 10:06 AM - Bob: This message was deleted",
    );
    assert_eq!(stats.lines, 4);
    assert_eq!(stats.messages, 1);
    assert_eq!(stats.continuations, 1);
    assert_eq!(stats.junk, 1);
    assert_eq!(stats.dropped, 1);
}

#[test]
fn test_empty_input() {
    assert!(parse("").is_empty());
}

#[test]
fn test_supported_extensions() {
    let parser = ChatExportParser::new();
    assert!(parser.can_parse(Path::new("chat.txt")));
    assert!(parser.can_parse(Path::new("CHAT.TXT")));
    assert!(!parser.can_parse(Path::new("chat.lzma")));
}

#[test]
fn test_parse_file_lossy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    std::fs::write(&path, b"1/2/24, 10:05 AM - Alice: caf\xe9\n").unwrap();
    let t = ChatExportParser::new().parse_file(&path).unwrap();
    assert_eq!(t.groups[0].messages[0].body, "caf\u{FFFD}");
}

#[test]
fn test_parse_file_missing() {
    let err = ChatExportParser::new().parse_file(Path::new("/nonexistent/chat.txt")).unwrap_err();
    assert!(matches!(err, gp_core::GlampressError::InputNotFound { .. }));
}
