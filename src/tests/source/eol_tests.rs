//! Tests for line terminator scanning.

use std::num::NonZeroUsize;

use rstest::rstest;

use crate::InputSourceBuilder;
use crate::handle::{InMemoryStream, Whence};
use crate::source::StreamInputSource;

fn source_with_window(data: &[u8], window: usize) -> StreamInputSource<InMemoryStream> {
    InputSourceBuilder::new()
        .with_scan_buffer_size(NonZeroUsize::new(window).unwrap())
        .build(InMemoryStream::new("doc", data.to_vec()))
        .unwrap()
}

#[rstest]
#[case(b"AB\r\nCD", 2, 4)]
#[case(b"AB\n\rCD", 2, 4)]
#[case(b"AB\r\n\r\nCD", 2, 6)]
#[case(b"AB\nCD", 2, 3)]
#[case(b"AB\rCD", 2, 3)]
#[case(b"", 0, 0)]
#[case(b"ABCDEF", 6, 6)]
#[case(b"\nA", 0, 1)]
#[case(b"AB\r", 2, 3)]
#[case(b"AB\n\n\n", 2, 5)]
#[case(b"ABCDEFGH\n\r\n\r\n\rX", 8, 14)]
fn finds_and_skips_terminator_run(
    #[case] data: &[u8],
    #[case] expected: u64,
    #[case] position: u64,
    #[values(1, 2, 3, 4096)] window: usize,
) {
    let mut src = source_with_window(data, window);

    assert_eq!(src.find_and_skip_next_eol().unwrap(), expected);
    assert_eq!(src.tell().unwrap(), position);
}

#[rstest]
fn walks_successive_lines(#[values(1, 2, 4096)] window: usize) {
    let mut src = source_with_window(b"one\ntwo\r\nthree", window);

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 3);
    assert_eq!(src.tell().unwrap(), 4);
    assert_eq!(src.find_and_skip_next_eol().unwrap(), 7);
    assert_eq!(src.tell().unwrap(), 9);
    assert_eq!(src.find_and_skip_next_eol().unwrap(), 14);
    assert_eq!(src.tell().unwrap(), 14);

    // Exhausted: stays at the end.
    assert_eq!(src.find_and_skip_next_eol().unwrap(), 14);
    assert_eq!(src.tell().unwrap(), 14);
}

#[rstest]
fn starts_from_current_position(#[values(1, 2, 4096)] window: usize) {
    let mut src = source_with_window(b"AB\r\nCD\nE", window);
    src.seek(4, Whence::Start).unwrap();

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 6);
    assert_eq!(src.tell().unwrap(), 7);
}

#[rstest]
fn no_terminator_returns_length(#[values(1, 2, 7, 4096)] window: usize) {
    let data = vec![b'x'; 10_000];
    let mut src = source_with_window(&data, window);

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 10_000);
    assert_eq!(src.tell().unwrap(), 10_000);
    assert_eq!(src.last_offset(), 10_000);
}

#[test]
fn terminator_beyond_first_window() {
    let mut data = vec![b'a'; 5000];
    data.extend_from_slice(b"\r\n\nrest");
    let mut src = source_with_window(&data, 4096);

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 5000);
    assert_eq!(src.tell().unwrap(), 5003);
}

#[test]
fn run_straddling_window_boundary_is_consumed() {
    // Window ends on the '\r'; the rest of the run sits in the next window.
    let mut src = source_with_window(b"abc\r\n\r\nd", 4);

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 3);
    assert_eq!(src.tell().unwrap(), 7);
}

#[test]
fn short_reads_from_handle_do_not_skip_bytes() {
    let handle = InMemoryStream::from_string("doc", "abcdefg\r\nh").with_max_chunk(3);
    let mut src = StreamInputSource::new(handle).unwrap();

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 7);
    assert_eq!(src.tell().unwrap(), 9);
}

#[test]
fn scan_leaves_no_stale_window_data() {
    // A second scan over a shorter tail must not see bytes from the first window.
    let mut src = source_with_window(b"xxxxxxx\nyy", 8);

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 7);
    assert_eq!(src.find_and_skip_next_eol().unwrap(), 10);
}
