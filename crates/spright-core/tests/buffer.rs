use spright_core::{DocumentPatch, LineEnding, Position, RopeBuffer, SyncError, TextBuffer};

#[test]
fn test_replace_and_undo_redo() {
    let mut buffer = RopeBuffer::new("héllo\nworld");
    buffer.replace(1..2, "e").unwrap();
    buffer.replace(6..11, "there").unwrap();
    assert_eq!(buffer.text(), "hello\nthere");
    assert_eq!(buffer.undo_depth(), 2);

    assert!(buffer.undo());
    assert!(buffer.undo());
    assert!(!buffer.undo());
    assert_eq!(buffer.text(), "héllo\nworld");
    assert_eq!(buffer.redo_depth(), 2);

    assert!(buffer.redo());
    assert_eq!(buffer.text(), "hello\nworld");
    assert_eq!(buffer.version(), 5);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut buffer = RopeBuffer::new("abc");
    buffer.replace(0..1, "x").unwrap();
    buffer.undo();
    buffer.replace(2..3, "y").unwrap();
    assert_eq!(buffer.redo_depth(), 0);
    assert!(!buffer.redo());
}

#[test]
fn test_caret_anchoring() {
    let mut buffer = RopeBuffer::new("0123456789");

    buffer.set_caret(2);
    buffer.replace(5..6, "xyz").unwrap();
    assert_eq!(buffer.caret(), 2);

    buffer.set_caret(8);
    buffer.replace(0..1, "").unwrap();
    assert_eq!(buffer.caret(), 7);

    buffer.set_caret(5);
    buffer.replace(3..7, "ab").unwrap();
    assert_eq!(buffer.caret(), 5);

    buffer.undo();
    assert_eq!(buffer.caret(), 5);

    buffer.set_caret(1000);
    assert_eq!(buffer.caret(), buffer.len_chars());
}

#[test]
fn test_replace_rejects_out_of_range() {
    let mut buffer = RopeBuffer::new("abc");
    let err = buffer.replace(2..5, "").unwrap_err();
    assert!(matches!(err, SyncError::PatchOutOfRange { start: 2, end: 5, len: 3 }));
    assert_eq!(buffer.undo_depth(), 0);
}

#[test]
fn test_apply_patch_with_crlf_positions() {
    let mut buffer = RopeBuffer::new("a\r\nb\r\nc");
    assert_eq!(buffer.line_ending(), LineEnding::Crlf);

    let patch = DocumentPatch {
        start: Position::new(1, 0),
        end: Position::new(2, 0),
        new_text: "x\r\n".to_string(),
    };
    buffer.apply_patch(&patch).unwrap();
    assert_eq!(buffer.text(), "a\r\nx\r\nc");
    assert_eq!(buffer.undo_depth(), 1);
}

#[test]
fn test_line_ending_detection() {
    assert_eq!(LineEnding::detect_in_text("a\r\nb\nc"), LineEnding::Crlf);
    assert_eq!(LineEnding::detect_in_text("a\rb"), LineEnding::Cr);
    assert_eq!(LineEnding::detect_in_text("a\nb\r\n"), LineEnding::Lf);
    assert_eq!(LineEnding::detect_in_text("abc"), LineEnding::Lf);
    assert_eq!(LineEnding::Crlf.normalize("a\r\nb"), "a\nb");
    assert_eq!(LineEnding::Cr.apply_to_text("a\nb"), "a\rb");
}
