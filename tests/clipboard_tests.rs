//! Clipboard access integration tests
//!
//! Drive the public operations against the in-memory clipboard, checking
//! both results and that sessions, locks and allocations are released.

use std::time::{Duration, Instant};

use winclip::application::ports::ClipboardBackend;
use winclip::application::ClipboardAccess;
use winclip::domain::error::{ClipboardError, ERROR_ACCESS_DENIED, ERROR_NOT_ENOUGH_MEMORY};
use winclip::domain::format::{
    CharacterSize, FileListBlock, TextFormatDescriptor, TextKind, ALL_TEXT_KINDS,
};
use winclip::domain::retry::RetryPolicy;
use winclip::infrastructure::MemoryClipboard;

fn clipboard() -> ClipboardAccess<MemoryClipboard> {
    ClipboardAccess::new(MemoryClipboard::new()).unwrap()
}

fn format(clipboard: &ClipboardAccess<MemoryClipboard>, kind: TextKind) -> TextFormatDescriptor {
    clipboard.formats().by_kind(kind).clone()
}

/// Sessions closed, locks released, nothing left allocated by the process
fn assert_released(clipboard: &ClipboardAccess<MemoryClipboard>) {
    let backend = clipboard.backend();
    assert!(!backend.is_open(), "clipboard left open");
    assert_eq!(backend.opens(), backend.closes());
    assert_eq!(backend.outstanding_locks(), 0);
    assert_eq!(backend.live_allocations(), 0);
}

#[test]
fn text_round_trips_for_every_text_kind() {
    let clipboard = clipboard();
    let samples = [("plain ascii text", CharacterSize::Narrow), ("wide ✓ Ünïcödé", CharacterSize::Wide)];

    for kind in ALL_TEXT_KINDS.iter().filter(|k| **k != TextKind::FileList) {
        let format = format(&clipboard, *kind);
        for (value, width) in samples {
            if width == CharacterSize::Wide && format.character_size() == CharacterSize::Narrow {
                continue;
            }
            clipboard.set_text(value, &format).unwrap();
            assert_eq!(
                clipboard.get_text(&format).unwrap().as_deref(),
                Some(value),
                "round trip through {}",
                format.name()
            );
        }
    }
    assert_released(&clipboard);
}

#[test]
fn wide_text_is_stored_as_utf16() {
    let clipboard = clipboard();
    let unicode = format(&clipboard, TextKind::Unicode);
    clipboard.set_text("hé", &unicode).unwrap();

    assert_eq!(
        clipboard.backend().raw_data(13).unwrap(),
        vec![b'h', 0, 0xE9, 0, 0, 0]
    );
}

#[test]
fn narrow_text_is_stored_in_code_page() {
    let clipboard = clipboard();
    let text = format(&clipboard, TextKind::PlainAnsi);
    clipboard.set_text("hé", &text).unwrap();

    assert_eq!(clipboard.backend().raw_data(1).unwrap(), vec![b'h', 0xE9, 0]);
}

#[test]
fn clear_removes_every_format() {
    let clipboard = clipboard();
    let kinds = [TextKind::Unicode, TextKind::Html, TextKind::Rtf, TextKind::Csv];
    for kind in kinds {
        clipboard.set_text("data", &format(&clipboard, kind)).unwrap();
    }
    clipboard.set_file_list(&["C:\\file.txt"]).unwrap();

    clipboard.clear().unwrap();

    for kind in kinds {
        assert!(!clipboard.contains(&format(&clipboard, kind)));
    }
    assert!(!clipboard.contains(clipboard.formats().file_list()));
    assert!(clipboard.list_formats().unwrap().is_empty());
    assert_released(&clipboard);
}

#[test]
fn empty_file_list_round_trips() {
    let clipboard = clipboard();
    let empty: [&str; 0] = [];
    clipboard.set_file_list(&empty).unwrap();

    assert_eq!(clipboard.backend().raw_data(15).unwrap().len(), 22);
    assert!(clipboard.get_file_list().unwrap().is_empty());
    assert_released(&clipboard);
}

#[test]
fn file_list_round_trips_in_order() {
    let clipboard = clipboard();
    clipboard.set_file_list(&["a.txt", "b.txt"]).unwrap();

    assert_eq!(clipboard.get_file_list().unwrap(), vec!["a.txt", "b.txt"]);
    assert_eq!(
        clipboard.backend().raw_data(15).unwrap(),
        FileListBlock::build(&["a.txt", "b.txt"]).as_bytes()
    );
    assert_released(&clipboard);
}

#[test]
fn missing_file_list_is_empty() {
    let clipboard = clipboard();
    assert!(clipboard.get_file_list().unwrap().is_empty());
    assert_released(&clipboard);
}

#[test]
fn long_paths_are_truncated() {
    let clipboard = clipboard();
    let long = "x".repeat(1500);
    clipboard.set_file_list(&[long.as_str(), "short"]).unwrap();

    let files = clipboard.get_file_list().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].len(), 999);
    assert_eq!(files[1], "short");
}

#[test]
fn brief_contention_is_waited_out() {
    let clipboard = clipboard().with_policy(RetryPolicy::new(3, Duration::from_millis(5)));
    clipboard.backend().hold_for_attempts(2);

    clipboard.clear().unwrap();
    assert_released(&clipboard);
}

#[test]
fn long_contention_fails_with_access_denied() {
    let clipboard = clipboard().with_policy(RetryPolicy::new(3, Duration::from_millis(5)));
    clipboard.backend().hold_for_attempts(3);

    let started = Instant::now();
    let err = clipboard.clear().unwrap_err();

    assert!(matches!(err, ClipboardError::OsOperationFailed { .. }));
    assert_eq!(err.os_code(), Some(ERROR_ACCESS_DENIED));
    assert!(started.elapsed() >= Duration::from_millis(10));
    assert_eq!(clipboard.backend().opens(), 0);
}

#[test]
fn default_policy_tolerates_two_refusals() {
    let clipboard = clipboard();
    clipboard.backend().hold_for_attempts(2);
    let unicode = format(&clipboard, TextKind::Unicode);

    clipboard.set_text("eventually", &unicode).unwrap();
    assert_eq!(clipboard.get_text(&unicode).unwrap().as_deref(), Some("eventually"));
}

#[test]
fn csv_variants_share_id_but_not_width() {
    let clipboard = clipboard();
    let csv = format(&clipboard, TextKind::Csv);
    let csv_unicode = format(&clipboard, TextKind::CsvUnicode);

    assert_eq!(csv.id(), csv_unicode.id());
    assert_ne!(csv.name(), csv_unicode.name());
    assert_ne!(csv.character_size(), csv_unicode.character_size());

    clipboard.set_text("a,b", &csv_unicode).unwrap();
    assert_eq!(
        clipboard.backend().raw_data(csv.id()).unwrap(),
        vec![b'a', 0, b',', 0, b'b', 0, 0, 0]
    );
    // read back narrow, the first UTF-16 unit's high byte ends the string
    assert_eq!(clipboard.get_text(&csv).unwrap().as_deref(), Some("a"));
    assert_eq!(clipboard.get_text(&csv_unicode).unwrap().as_deref(), Some("a,b"));

    clipboard.set_text("c,d", &csv).unwrap();
    assert_eq!(clipboard.backend().raw_data(csv.id()).unwrap(), b"c,d\0".to_vec());
    assert_eq!(clipboard.get_text(&csv).unwrap().as_deref(), Some("c,d"));
}

#[test]
fn unregistered_id_is_resolved_once() {
    let clipboard = clipboard();
    clipboard.backend().seed(0xC0FF, b"opaque");

    let first = clipboard.list_formats().unwrap();
    let queries = clipboard.backend().name_queries();
    let second = clipboard.list_formats().unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].id(), 0xC0FF);
    assert_eq!(first[0].name(), "Unknown");
    assert_eq!(clipboard.backend().name_queries(), queries);
}

#[test]
fn list_formats_keeps_os_order_and_names() {
    let clipboard = clipboard();
    let html = format(&clipboard, TextKind::Html);
    clipboard.set_text("<i>x</i>", &html).unwrap();
    clipboard.set_text("x", &format(&clipboard, TextKind::Unicode)).unwrap();
    clipboard.set_file_list(&["x.txt"]).unwrap();

    let names: Vec<String> = clipboard
        .list_formats()
        .unwrap()
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(names, vec!["HTML Format", "Unicode", "HDrop"]);
}

#[test]
fn set_data_failure_frees_text_block() {
    let clipboard = clipboard();
    clipboard.backend().fail_next_set_data(ERROR_ACCESS_DENIED);
    let unicode = format(&clipboard, TextKind::Unicode);

    let err = clipboard.set_text("lost", &unicode).unwrap_err();

    assert_eq!(err.os_code(), Some(ERROR_ACCESS_DENIED));
    assert!(err.to_string().starts_with("Failed to set the clipboard"));
    assert!(!clipboard.contains(&unicode));
    assert_released(&clipboard);
}

#[test]
fn set_data_failure_frees_file_list_block() {
    let clipboard = clipboard();
    clipboard.backend().fail_next_set_data(ERROR_NOT_ENOUGH_MEMORY);

    let err = clipboard.set_file_list(&["a.txt"]).unwrap_err();

    assert_eq!(err.os_code(), Some(ERROR_NOT_ENOUGH_MEMORY));
    assert_released(&clipboard);
}

#[test]
fn allocation_failure_is_reported() {
    let clipboard = clipboard();
    clipboard.backend().fail_next_allocate();

    let err = clipboard.set_text("x", &format(&clipboard, TextKind::Html)).unwrap_err();

    assert_eq!(err.os_code(), Some(ERROR_NOT_ENOUGH_MEMORY));
    assert_released(&clipboard);
}

#[test]
fn lock_failure_while_writing_frees_block() {
    let clipboard = clipboard();
    clipboard.backend().fail_next_lock();

    let err = clipboard.set_file_list(&["a.txt"]).unwrap_err();

    assert!(err.to_string().contains("lock memory"));
    assert_released(&clipboard);
}

#[test]
fn file_list_block_is_not_leaked_when_open_fails() {
    let clipboard = clipboard().with_policy(RetryPolicy::no_retry());
    clipboard.backend().hold_for_attempts(1);

    assert!(clipboard.set_file_list(&["a.txt"]).is_err());
    assert_eq!(clipboard.backend().live_allocations(), 0);
}

#[test]
fn clear_failure_is_surfaced() {
    let clipboard = clipboard();
    clipboard.backend().fail_next_empty(ERROR_ACCESS_DENIED);

    let err = clipboard.clear().unwrap_err();
    assert!(err.to_string().starts_with("Failed to empty the clipboard"));
    assert_released(&clipboard);
}

#[test]
fn absent_text_is_not_an_error() {
    let clipboard = clipboard();
    for kind in ALL_TEXT_KINDS.iter().filter(|k| **k != TextKind::FileList) {
        assert_eq!(clipboard.get_text(&format(&clipboard, *kind)).unwrap(), None);
    }
    assert_released(&clipboard);
}

#[test]
fn set_text_keeps_other_formats() {
    let clipboard = clipboard();
    let unicode = format(&clipboard, TextKind::Unicode);
    let rtf = format(&clipboard, TextKind::Rtf);

    clipboard.set_text("one", &unicode).unwrap();
    clipboard.set_text("{\\rtf1 two}", &rtf).unwrap();

    assert!(clipboard.contains(&unicode));
    assert_eq!(clipboard.get_text(&rtf).unwrap().as_deref(), Some("{\\rtf1 two}"));
}

#[test]
fn operations_need_no_prior_open() {
    let backend = MemoryClipboard::new();
    assert_eq!(backend.enumerate_formats(0), 0);
    let clipboard = ClipboardAccess::new(backend).unwrap();
    assert!(clipboard.list_formats().unwrap().is_empty());
}
