use p2p_assist::ui::text::wrap_text;

#[test]
fn test_wrap_text_basic() {
    let text = "Hello world this is a test";
    let wrapped = wrap_text(text, 15);

    assert_eq!(wrapped.len(), 2);
    assert_eq!(wrapped[0], "Hello world");
    assert_eq!(wrapped[1], "this is a test");
}

#[test]
fn test_wrap_text_single_line() {
    let text = "Short text";
    let wrapped = wrap_text(text, 20);

    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0], "Short text");
}

#[test]
fn test_wrap_text_empty_string() {
    let wrapped = wrap_text("", 20);

    // Empty text should return a single empty line
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0], "");
}

#[test]
fn test_wrap_text_width_zero() {
    let wrapped = wrap_text("Hello world", 0);

    // Width 0 returns the original text as-is
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0], "Hello world");
}

#[test]
fn test_wrap_text_long_single_word() {
    let text = "supercalifragilisticexpialidocious";
    let wrapped = wrap_text(text, 10);

    // A word longer than width is broken into width-sized pieces
    assert_eq!(
        wrapped,
        vec![
            "supercalif".to_string(),
            "ragilistic".to_string(),
            "expialidoc".to_string(),
            "ious".to_string(),
        ]
    );
}

#[test]
fn test_wrap_text_breaks_long_tracking_link() {
    let link = format!("https://example.com/{}", "x".repeat(60));
    let text = format!("Track it here: {} today", link);
    let wrapped = wrap_text(&text, 20);

    for line in &wrapped {
        assert!(line.chars().count() <= 20, "line too long: {:?}", line);
    }
    assert_eq!(wrapped[0], "Track it here:");
    // Nothing of the link is lost
    assert_eq!(wrapped.concat().replace(' ', ""), text.replace(' ', ""));
    assert!(wrapped.last().unwrap().ends_with("today"));
}

#[test]
fn test_wrap_text_exact_width() {
    let wrapped = wrap_text("Hello", 5);

    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0], "Hello");
}

#[test]
fn test_wrap_text_counts_chars_not_bytes() {
    // "£30" is 3 chars but 4 bytes
    let wrapped = wrap_text("£30 £60", 7);

    assert_eq!(wrapped, vec!["£30 £60".to_string()]);
}

#[test]
fn test_wrap_text_keeps_explicit_newlines() {
    let text = "UK rates:\n- 0 - 2kg: £30\n\nUSA rates:";
    let wrapped = wrap_text(text, 40);

    assert_eq!(
        wrapped,
        vec![
            "UK rates:".to_string(),
            "- 0 - 2kg: £30".to_string(),
            String::new(),
            "USA rates:".to_string(),
        ]
    );
}

#[test]
fn test_wrap_text_lines_fit_width() {
    let text = "Packages are consolidated and re-packed for safety before the flight to Accra";
    let wrapped = wrap_text(text, 20);

    assert!(wrapped.len() >= 4);
    for line in &wrapped {
        assert!(line.chars().count() <= 20, "line too long: {:?}", line);
    }
    assert_eq!(wrapped.join(" "), text);
}
