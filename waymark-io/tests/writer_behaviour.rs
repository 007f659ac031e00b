//! End-to-end behaviour tests for the writer pipeline with the line
//! format.

use std::io;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone as _, Utc};
use geo::Coord;
use rstest::rstest;
use waymark_core::{Buffer, Entity, Meta, Path, PathNodeList, Point, TagCollection};
use waymark_io::{Compressor, LineFormat, PlainCompressor, Writer, WriterOptions};

/// Compressor writing into storage the test keeps a handle on.
#[derive(Clone, Default)]
struct SharedSink {
    bytes: Arc<Mutex<Vec<u8>>>,
    closes: Arc<AtomicUsize>,
}

impl SharedSink {
    fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }
}

impl Compressor for SharedSink {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.bytes.lock().unwrap().extend_from_slice(data);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn sample_meta(id: i64) -> Meta {
    Meta {
        id,
        version: 3,
        visible: true,
        changeset: 333,
        timestamp: Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap(),
        uid: 21,
        user: "foo".into(),
    }
}

fn point_buffer(id: i64) -> Buffer {
    let mut buffer = Buffer::new();
    buffer.push(Entity::Point(Point::new(
        sample_meta(id),
        TagCollection::new(),
        Some(Coord { x: 9.5, y: 47.1 }),
    )));
    buffer
}

fn expected_point_line(id: i64) -> String {
    format!("n{id} v3 dV c333 t2014-01-01T00:00:00Z i21 ufoo T x9.5000000 y47.1000000\n")
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(25)]
fn output_is_the_ordered_concatenation_of_all_blocks(#[case] buffers: i64) {
    let sink = SharedSink::default();
    let options = WriterOptions {
        threads: NonZeroUsize::new(4),
        queue_depth: 3,
    };
    let mut writer = Writer::with_options(LineFormat, sink.clone(), options).unwrap();
    for id in 0..buffers {
        writer.submit(point_buffer(id)).unwrap();
    }
    writer.close().unwrap();

    let expected: String = (0..buffers).map(expected_point_line).collect();
    assert_eq!(sink.contents(), expected);
    assert_eq!(sink.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn mixed_entities_keep_their_buffer_order_on_the_wire() {
    let sink = SharedSink::default();
    let mut writer = Writer::new(LineFormat, sink.clone()).unwrap();

    let mut first = Buffer::new();
    first.push(Entity::Path(Path::new(
        sample_meta(17),
        TagCollection::from_pairs([("highway", "residential")]),
        PathNodeList::from_ids([1, 3, 2]),
    )));
    let second = point_buffer(18);

    writer.submit(first).unwrap();
    writer.submit(second).unwrap();
    writer.close().unwrap();

    let expected = format!(
        "w17 v3 dV c333 t2014-01-01T00:00:00Z i21 ufoo T highway=residential N n1,n3,n2\n{}",
        expected_point_line(18)
    );
    assert_eq!(sink.contents(), expected);
}

#[test]
fn dropping_an_unclosed_writer_still_drains_and_closes() {
    let sink = SharedSink::default();
    {
        let mut writer = Writer::new(LineFormat, sink.clone()).unwrap();
        writer.submit(point_buffer(1)).unwrap();
    }
    assert_eq!(sink.contents(), expected_point_line(1));
    assert_eq!(sink.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn plain_compressor_writes_blocks_to_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("entities.txt");
    let file = std::fs::File::create(&destination).unwrap();

    let mut writer = Writer::new(LineFormat, PlainCompressor::new(file)).unwrap();
    writer.submit(point_buffer(7)).unwrap();
    writer.close().unwrap();

    let written = std::fs::read_to_string(&destination).unwrap();
    assert_eq!(written, expected_point_line(7));
}

#[cfg(feature = "compress-bz2")]
#[test]
fn bzip2_compressor_round_trips_through_the_pipeline() {
    use std::io::Read as _;

    use waymark_io::Bzip2Compressor;

    /// Adapter exposing shared storage as `io::Write` for the encoder.
    #[derive(Clone, Default)]
    struct SharedWrite(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedWrite {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let storage = SharedWrite::default();
    let mut writer = Writer::new(LineFormat, Bzip2Compressor::new(storage.clone())).unwrap();
    writer.submit(point_buffer(3)).unwrap();
    writer.submit(point_buffer(4)).unwrap();
    writer.close().unwrap();

    let compressed = storage.0.lock().unwrap().clone();
    let mut decoded = String::new();
    bzip2::read::BzDecoder::new(compressed.as_slice())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(
        decoded,
        format!("{}{}", expected_point_line(3), expected_point_line(4))
    );
}
