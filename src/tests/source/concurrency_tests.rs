//! Tests for per-call locking of shared handles.

use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::InputSourceBuilder;
use crate::error::Operation;
use crate::handle::{InMemoryStream, StreamHandle, Whence};
use crate::source::StreamInputSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Call(Operation),
    External,
}

/// Stream that records every primitive call, optionally taking a while for each.
#[derive(Debug)]
struct RecordingStream {
    inner: InMemoryStream,
    events: Vec<Event>,
    delay: Option<Duration>,
}

impl RecordingStream {
    fn new(data: &str) -> Self {
        Self {
            inner: InMemoryStream::from_string("doc", data),
            events: Vec::new(),
            delay: None,
        }
    }

    fn record(&mut self, op: Operation) {
        self.events.push(Event::Call(op));
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
    }
}

impl StreamHandle for RecordingStream {
    fn readable(&self) -> bool {
        true
    }

    fn seekable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "<recording>".into()
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.record(Operation::Tell);
        self.inner.tell()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<()> {
        self.record(Operation::Seek);
        self.inner.seek(offset, whence)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        self.record(Operation::Read);
        self.inner.read_into(buf)
    }
}

#[test]
fn line_scan_is_a_sequence_of_single_primitive_calls() {
    let handle = Arc::new(Mutex::new(RecordingStream::new("ab\nc")));
    let mut src = InputSourceBuilder::new()
        .with_scan_buffer_size(NonZeroUsize::new(1).unwrap())
        .build_shared(handle.clone())
        .unwrap();

    assert_eq!(src.find_and_skip_next_eol().unwrap(), 2);

    use Operation::{Read, Seek, Tell};
    #[rustfmt::skip]
    let expected: Vec<Event> = [
        // one fill per byte: tell, then read's own tell and read
        Tell, Tell, Read,
        Tell, Tell, Read,
        Tell, Tell, Read,
        // jump past the '\n', read 'c', step back over it
        Seek, Tell, Read, Seek,
    ]
    .into_iter()
    .map(Event::Call)
    .collect();
    assert_eq!(handle.lock().events, expected);
}

#[test]
fn other_holders_interleave_between_primitive_calls() {
    let mut stream = RecordingStream::new(&"x".repeat(40));
    stream.delay = Some(Duration::from_millis(1));
    let handle = Arc::new(Mutex::new(stream));
    let done = Arc::new(AtomicBool::new(false));

    let intruder = {
        let handle = handle.clone();
        let done = done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                handle.lock().events.push(Event::External);
                thread::sleep(Duration::from_micros(100));
            }
        })
    };

    let mut src = InputSourceBuilder::new()
        .with_scan_buffer_size(NonZeroUsize::new(1).unwrap())
        .build_shared(handle.clone())
        .unwrap();
    assert_eq!(src.find_and_skip_next_eol().unwrap(), 40);

    done.store(true, Ordering::Release);
    intruder.join().unwrap();

    let events = handle.lock().events.clone();
    let first = events.iter().position(|e| matches!(e, Event::Call(_))).unwrap();
    let last = events.iter().rposition(|e| matches!(e, Event::Call(_))).unwrap();
    assert!(
        events[first..last].contains(&Event::External),
        "no access from another holder during the scan"
    );
}

#[test]
fn lock_is_free_once_an_operation_returns() {
    let handle = Arc::new(Mutex::new(InMemoryStream::from_string("doc", "AB\r\nCD")));
    let mut src = StreamInputSource::from_shared(handle.clone()).unwrap();

    assert!(handle.try_lock().is_some());
    src.find_and_skip_next_eol().unwrap();
    assert!(handle.try_lock().is_some());

    let mut buf = [0u8; 2];
    src.read(&mut buf).unwrap();
    assert!(handle.try_lock().is_some());
}

#[test]
fn position_is_never_cached() {
    let handle = Arc::new(Mutex::new(InMemoryStream::from_string("doc", "0123456789")));
    let mut src = StreamInputSource::from_shared(handle.clone()).unwrap();
    assert_eq!(src.tell().unwrap(), 0);

    handle.lock().seek(7, Whence::Start).unwrap();
    assert_eq!(src.tell().unwrap(), 7);

    let mut buf = [0u8; 3];
    assert_eq!(src.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf, b"789");
    assert_eq!(handle.lock().position(), 10);
}

#[test]
fn source_can_move_to_another_thread() {
    let src = StreamInputSource::new(InMemoryStream::from_string("doc", "a\nb\nc")).unwrap();

    let offsets = thread::spawn(move || {
        let mut src = src;
        (0..3)
            .map(|_| src.find_and_skip_next_eol().unwrap())
            .collect::<Vec<_>>()
    })
    .join()
    .unwrap();

    assert_eq!(offsets, vec![1, 3, 5]);
}

#[test]
fn handle_shared_across_threads_stays_consistent() {
    let data = "x".repeat(64);
    let handle = Arc::new(Mutex::new(InMemoryStream::from_string("doc", data)));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            thread::spawn(move || {
                let mut src = StreamInputSource::from_shared(handle).unwrap();
                for _ in 0..100 {
                    src.rewind().unwrap();
                    let pos = src.tell().unwrap();
                    assert!(pos <= 64);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert!(handle.lock().position() <= 64);
}
