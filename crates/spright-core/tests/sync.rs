use pretty_assertions::assert_eq;
use spright_core::{
    CommitDebounce, DocumentSync, InputType, LineEnding, RopeBuffer, SyncOptions, TextBuffer,
    compute_patch,
};
use std::time::{Duration, Instant};

#[test]
fn test_replace_input_type_end_to_end() {
    let mut buffer = RopeBuffer::new("input \"a.png\"\n  grid 16 16");
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
    let input = sync.config().inputs().next().unwrap();

    let (changed, patch) = sync
        .edit(&mut buffer, |config| config.replace_input_type(input, InputType::Atlas))
        .unwrap();

    assert!(changed);
    let patch = patch.unwrap();
    assert_eq!(patch.new_text, "");
    assert_eq!(patch.start.line, 0);
    assert_eq!(patch.end.line, 1);
    assert_eq!(buffer.text(), "input \"a.png\"");
    assert_eq!(buffer.undo_depth(), 1);
}

#[test]
fn test_commit_only_touches_changed_lines() {
    let text = "sheet s\r\n  padding 1\r\n  input a.png\r\n    sprite a\r\n    sprite b\r\n";
    let mut buffer = RopeBuffer::new(text);
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
    let input = sync.config().inputs().next().unwrap();

    let (_, patch) = sync
        .edit(&mut buffer, |config| config.set_property(input, "grid", &["8", "8"]))
        .unwrap();

    let patch = patch.unwrap();
    assert_eq!(patch.start.line, 3);
    assert_eq!(patch.end.line, 3);
    assert_eq!(patch.new_text, "    grid 8 8\r\n");
    assert_eq!(
        buffer.text(),
        "sheet s\r\n  padding 1\r\n  input a.png\r\n    grid 8 8\r\n    sprite a\r\n    sprite b\r\n"
    );
    assert_eq!(buffer.line_ending(), LineEnding::Crlf);
}

#[test]
fn test_caret_after_edit_is_shifted() {
    let mut buffer = RopeBuffer::new("input a.png\n  sprite hero");
    let caret = buffer.len_chars();
    buffer.set_caret(caret);
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
    let input = sync.config().inputs().next().unwrap();

    sync.edit(&mut buffer, |config| config.set_property(input, "trim", &["none"]))
        .unwrap();

    assert_eq!(buffer.caret(), caret + "  trim none\n".len());
}

#[test]
fn test_edit_without_change_produces_no_patch() {
    let mut buffer = RopeBuffer::new("input a.png\n  grid 16 16");
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
    let input = sync.config().inputs().next().unwrap();

    let (_, patch) = sync
        .edit(&mut buffer, |config| config.set_property(input, "grid", &["16", "16"]))
        .unwrap();
    assert_eq!(patch, None);
    assert_eq!(buffer.version(), 0);
}

#[test]
fn test_refresh_skips_text_the_model_already_represents() {
    let mut buffer = RopeBuffer::new("input a.png");
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
    let input = sync.config().inputs().next().unwrap();

    sync.edit(&mut buffer, |config| config.set_property(input, "trim", &["none"]))
        .unwrap();

    // The echo of our own edit keeps the model and its subject ids.
    assert!(!sync.refresh(&buffer.text()));
    assert!(sync.config().subjects().contains(input));

    assert!(sync.refresh("input b.png"));
    assert_eq!(sync.config().source(), "input b.png");
    assert_eq!(sync.config().inputs().count(), 1);
}

#[test]
fn test_refresh_normalizes_separators() {
    let mut sync = DocumentSync::new(SyncOptions::default());
    assert!(sync.refresh("input a.png\r\n  sprite"));
    assert!(!sync.refresh("input a.png\n  sprite"));
    assert_eq!(sync.config().line_count(), 2);
}

#[test]
fn test_refresh_bytes_skips_invalid_utf8() {
    let mut sync = DocumentSync::new(SyncOptions::default());
    assert!(sync.refresh_bytes(b"input a.png"));
    assert!(!sync.refresh_bytes(&[0x69, 0xff, 0xfe]));
    assert_eq!(sync.config().source(), "input a.png");
}

#[test]
fn test_refresh_then_edit_keeps_host_changes() {
    let mut buffer = RopeBuffer::new("input a.png\n  sprite");
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());

    buffer.replace(0..0, "# header\n").unwrap();
    assert!(sync.refresh(&buffer.text()));
    let input = sync.config().inputs().next().unwrap();

    let (_, patch) = sync
        .edit(&mut buffer, |config| config.set_property(input, "trim", &["none"]))
        .unwrap();
    assert_eq!(patch.unwrap().start.line, 2);
    assert_eq!(buffer.text(), "# header\ninput a.png\n  trim none\n  sprite");
    assert_eq!(buffer.undo_depth(), 2);
}

#[test]
fn test_staged_edits_flush_after_debounce() {
    let options = SyncOptions {
        commit_debounce_ms: 100,
        ..SyncOptions::default()
    };
    let mut buffer = RopeBuffer::new("input a.png");
    let mut sync = DocumentSync::attach(&buffer, options);
    let input = sync.config().inputs().next().unwrap();
    let start = Instant::now();

    sync.stage(start, |config| config.set_property(input, "trim", &["none"]));
    sync.stage(start + Duration::from_millis(60), |config| {
        config.set_property(input, "extrude", &["1"])
    });
    assert!(sync.has_pending());

    let early = sync
        .flush_due(start + Duration::from_millis(120), &mut buffer)
        .unwrap();
    assert_eq!(early, None);
    assert_eq!(buffer.text(), "input a.png");

    let patch = sync
        .flush_due(start + Duration::from_millis(160), &mut buffer)
        .unwrap();
    assert!(patch.is_some());
    assert!(!sync.has_pending());
    assert_eq!(buffer.text(), "input a.png\n  extrude 1\n  trim none");
    assert_eq!(buffer.undo_depth(), 1);
}

#[test]
fn test_external_change_discards_staged_edits() {
    let mut sync = DocumentSync::new(SyncOptions::default());
    sync.refresh("input a.png");
    let input = sync.config().inputs().next().unwrap();

    sync.stage(Instant::now(), |config| config.set_property(input, "trim", &["none"]));
    assert!(sync.refresh("input b.png"));
    assert!(!sync.has_pending());
    assert_eq!(sync.config().source(), "input b.png");
}

#[test]
fn test_commit_debounce() {
    let start = Instant::now();
    let mut debounce = CommitDebounce::new(Duration::from_millis(50));
    assert!(!debounce.is_due(start));

    debounce.touch(start);
    assert!(debounce.is_pending());
    assert!(!debounce.take_due(start + Duration::from_millis(10)));
    assert!(debounce.take_due(start + Duration::from_millis(50)));
    assert!(!debounce.is_pending());
}

#[test]
fn test_undo_restores_text_before_commit() {
    let original = "input a.png\n  grid 16 16\n  sprite";
    let mut buffer = RopeBuffer::new(original);
    let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
    let input = sync.config().inputs().next().unwrap();

    sync.edit(&mut buffer, |config| config.replace_input_type(input, InputType::Atlas))
        .unwrap();
    assert_eq!(buffer.text(), "input a.png\n  atlas\n  sprite");

    assert!(buffer.undo());
    assert_eq!(buffer.text(), original);
    assert!(buffer.redo());
    assert_eq!(buffer.text(), "input a.png\n  atlas\n  sprite");
    assert_eq!(compute_patch(&buffer.text(), &sync.config().source()), None);

    assert!(buffer.undo());
    assert!(sync.refresh(&buffer.text()));
    let input = sync.config().inputs().next().unwrap();
    assert_eq!(sync.config().input_type(input), InputType::Grid);
}
