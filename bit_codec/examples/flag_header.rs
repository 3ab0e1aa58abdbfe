//! Pack a small header of flags and short fields, then read it back.
//!
//! Run with: cargo run -p bit_codec --example flag_header

use std::io::{Seek, SeekFrom};

use bit_codec::{BitError, BitReader, BitWriter, ByteOrderSpec};
use pooled_bytes::LinearStream;

fn main() -> Result<(), BitError> {
    let spec: ByteOrderSpec = "be:msb".parse()?;
    let mut stream = LinearStream::new();

    {
        let mut w = BitWriter::new(&mut stream, spec);
        w.write_bool(true)?; // keyframe
        w.write_bool(false)?; // encrypted
        w.write_u8(5, 3)?; // channel
        w.write_u16(1000, 11)?; // sample count
        w.write_signed(-12, 7)?; // gain
        w.write_u32(0xC0FF_EE00, 32)?;
        w.flush()?;
    }
    println!("{} bytes: {:02X?}", stream.len(), stream.as_bytes().unwrap_or(&[]));

    stream.seek(SeekFrom::Start(0))?;
    let mut r = BitReader::new(&mut stream, spec);
    println!("keyframe  = {}", r.read_bool()?);
    println!("encrypted = {}", r.read_bool()?);
    println!("channel   = {}", r.read_u8(3)?);
    println!("samples   = {}", r.read_u16(11)?);
    println!("gain      = {}", r.read_signed(7)?);
    println!("tag       = {:#X}", r.read_u32(32)?);
    Ok(())
}
