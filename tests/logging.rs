mod common;

use std::{
    io::Cursor,
    sync::atomic::{AtomicUsize, Ordering},
};

use log::{Level, LevelFilter, Log, Metadata, Record};
use wrcdata::avec::{self, FromSamples};

use common::{Document, motion};

/// Counts warnings.
struct WarnCounter(AtomicUsize);

impl Log for WarnCounter {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static WARNINGS: WarnCounter = WarnCounter(AtomicUsize::new(0));

struct Ignore;

impl FromSamples for Ignore {}

// A single test, so the global logger sees nothing else.
#[test]
fn warn_on_trailing_bytes() {
    log::set_logger(&WARNINGS).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let mut doc = Document::new(b"WRC_COACH_V2");
    doc.motion = vec![motion(0.0, 0.5), motion(20.0, 1.0)];
    let exact = doc.encode();

    let mut padded = exact.clone();
    padded.extend_from_slice(&[0xAA; 7]);

    let warnings = || WARNINGS.0.load(Ordering::SeqCst);

    avec::decode_slice(&exact, &mut Ignore).unwrap();
    avec::decode_reader(&mut Cursor::new(&exact), &mut Ignore).unwrap();
    assert_eq!(warnings(), 0);

    avec::decode_slice(&padded, &mut Ignore).unwrap();
    assert_eq!(warnings(), 1);

    avec::decode_reader(&mut Cursor::new(&padded), &mut Ignore).unwrap();
    assert_eq!(warnings(), 2);
}
