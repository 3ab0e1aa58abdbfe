//! End-to-end tests across streams, typed values, bits and frames.

use std::io::{Read, Seek, SeekFrom};
use std::sync::{Arc, Once};

use binary_io::prelude::*;
use binary_io::{StreamError, ViewError, cast_mut, swap_slice};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, SwapLayout)]
struct Reading {
    stamp: u64,
    sensor: u32,
    level: U24,
    quality: u8,
}

fn readings() -> Vec<Reading> {
    (0..5u32)
        .map(|i| Reading {
            stamp: 1_000 + u64::from(i),
            sensor: 0xA000 + i,
            level: U24::truncating(i * 300_000),
            quality: i as u8,
        })
        .collect()
}

#[test]
fn records_round_trip_through_pooled_stream() -> binary_io::Result<()> {
    init_tracing();
    let pool = Arc::new(SharedPool::new());
    let records = readings();

    for order in [ByteOrder::Little, ByteOrder::Big] {
        let mut writer = ValueWriter::new(LinearStream::with_pool(pool.clone(), 16), order);
        writer.write_batch(&records)?;
        writer.write(&records[0])?;

        let mut stream = writer.into_inner();
        assert_eq!(stream.len(), 6 * 16);
        stream.seek_to(SeekFrom::Start(0))?;

        let mut reader = ValueReader::new(stream, order);
        assert_eq!(reader.read_batch::<Reading>(5)?, records);
        assert_eq!(reader.read::<Reading>()?, records[0]);
        assert!(reader.try_read::<Reading>()?.is_none());
    }

    let stats = pool.stats();
    assert_eq!(stats.rented, stats.released);
    Ok(())
}

#[test]
fn in_place_swap_of_a_stream_region() -> binary_io::Result<()> {
    let records = readings();
    let mut stream = LinearStream::new();
    let mut writer = ValueWriter::new(&mut stream, ByteOrder::NATIVE.opposite());
    writer.write_batch(&records)?;

    // the stream holds foreign-order records; fix them in place
    let mut copy = stream.to_vec()?;
    let mut backing = vec![0u64; copy.len() / 8];
    bytemuck::cast_slice_mut::<u64, u8>(&mut backing).copy_from_slice(&copy);
    let typed: &mut [Reading] = cast_mut(&mut backing)?;
    swap_slice(typed)?;
    assert_eq!(typed, &records[..]);

    copy.truncate(17);
    assert!(matches!(
        binary_io::cast::<u8, Reading>(&copy),
        Err(ViewError::SizeMismatch { bytes: 17, elem: 16 })
    ));
    Ok(())
}

#[test]
fn bits_and_values_share_a_stream() -> binary_io::Result<()> {
    let spec = ByteOrderSpec::new(ByteOrder::Big, BitOrder::Big);
    let mut stream = LinearStream::new();

    let mut bits = BitWriter::new(&mut stream, spec);
    bits.write_bool(true)?;
    bits.write_u8(0b011, 3)?;
    bits.write_u16(0x3C0, 12)?;
    bits.flush()?;
    drop(bits);
    ValueWriter::new(&mut stream, ByteOrder::Big).write(&0xBEEFu16)?;

    assert_eq!(stream.as_bytes()?, &[0b1011_0011, 0xC0, 0xBE, 0xEF]);

    stream.set_position(0)?;
    let mut bits = BitReader::new(&mut stream, spec);
    assert!(bits.read_bool()?);
    assert_eq!(bits.read_u8(3)?, 0b011);
    assert_eq!(bits.read_u16(12)?, 0x3C0);
    drop(bits);
    assert_eq!(ValueReader::new(&mut stream, ByteOrder::Big).read::<u16>()?, 0xBEEF);
    Ok(())
}

#[test]
fn ring_keeps_latest_bytes() -> binary_io::Result<()> {
    let mut ring = RingStream::new(8)?;
    for chunk in [&b"abcd"[..], b"efgh", b"ijkl"] {
        ring.write_from(chunk)?;
    }
    assert_eq!(ring.to_vec()?, b"efghijkl");

    ring.seek(SeekFrom::Start(0)).unwrap();
    let mut out = Vec::new();
    ring.read_to_end(&mut out).unwrap();
    assert_eq!(out, b"efghijkl");
    Ok(())
}

#[test]
fn frames_nest() -> binary_io::Result<()> {
    init_tracing();
    let mut inner = FrameBuilder::new(LengthPrefix::U16, ByteOrder::Little);
    inner.push_bytes(b"inner")?;
    let inner = inner.finish()?;

    let mut outer = FrameBuilder::new(LengthPrefix::U32, ByteOrder::Big);
    outer.push_bytes(&inner)?;
    outer.push_value(&U24::new(0x010203)?)?;
    let bytes = outer.finish()?;

    let payload = read_frame(bytes.as_slice(), LengthPrefix::U32, ByteOrder::Big)?;
    assert_eq!(&payload[..3], &[1, 2, 3]);
    let nested = read_frame(&payload[3..], LengthPrefix::U16, ByteOrder::Little)?;
    assert_eq!(nested, b"inner");
    Ok(())
}

#[test]
fn disposed_stream_rejects_access() {
    let mut stream = LinearStream::new();
    stream.write_from(b"data").unwrap();
    stream.dispose();
    assert!(matches!(stream.write_from(b"x"), Err(StreamError::Disposed)));
    assert!(matches!(stream.seek_to(SeekFrom::Start(0)), Err(StreamError::Disposed)));

    let mut buf = [0u8; 1];
    assert!(matches!(stream.read_into(&mut buf), Err(StreamError::Disposed)));
}
