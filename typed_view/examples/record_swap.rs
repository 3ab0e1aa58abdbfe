//! Read a big-endian header table with one layout lookup.
//!
//! Run with: cargo run -p typed_view --example record_swap

use bytemuck_derive::{Pod, Zeroable};
use typed_view::{ByteOrder, LayoutCache, SwapLayout, U24, ValueReader, ValueWriter, ViewError};

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, SwapLayout)]
struct Kind(u16);

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, SwapLayout)]
struct Entry {
    offset: u32,
    kind: Kind,
    name: [u8; 2],
    length: U24,
    checksum: u8,
}

fn main() -> Result<(), ViewError> {
    let entries = [
        Entry {
            offset: 0x40,
            kind: Kind(1),
            name: *b"hd",
            length: U24::new(1024)?,
            checksum: 0x5A,
        },
        Entry {
            offset: 0x440,
            kind: Kind(2),
            name: *b"tx",
            length: U24::new(70_000)?,
            checksum: 0xA5,
        },
    ];

    let mut writer = ValueWriter::new(Vec::new(), ByteOrder::Big);
    writer.write_batch(&entries)?;
    let wire = writer.into_inner();
    println!("wire bytes: {wire:02X?}");

    let mut reader = ValueReader::new(wire.as_slice(), ByteOrder::Big);
    let back = reader.read_batch::<Entry>(entries.len())?;
    assert_eq!(back, entries);

    let layout = LayoutCache::global().get_or_compute::<Entry>()?;
    println!("{layout:?}");
    for entry in &back {
        println!("{entry:?} length={}", entry.length.get());
    }
    Ok(())
}
