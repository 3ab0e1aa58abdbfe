use binary_io::prelude::*;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, SwapLayout)]
#[bytemuck(crate = "binary_io::bytemuck")]
#[swap_layout(crate = "binary_io::typed_view")]
struct Player {
    id: u32,
    x: i16,
    y: i16,
    health: u8,
    mana: u8,
    flags: u16,
}

fn main() -> Result<()> {
    println!("=== Binary I/O Quick Start ===\n");

    let players = vec![
        Player { id: 1, x: 100, y: 200, health: 100, mana: 50, flags: 0b01 },
        Player { id: 2, x: 150, y: -250, health: 80, mana: 75, flags: 0b10 },
        Player { id: 3, x: -200, y: 300, health: 90, mana: 60, flags: 0b11 },
    ];

    // Big-endian records on a pooled stream
    let mut writer = ValueWriter::new(LinearStream::new(), ByteOrder::Big);
    writer.write_batch(&players)?;
    let mut stream = writer.into_inner();
    println!("Wrote {} players in {} bytes", players.len(), stream.len());
    println!("First record on the wire: {:02X?}", &stream.as_bytes()?[..12]);

    stream.set_position(0)?;
    let mut reader = ValueReader::new(stream, ByteOrder::Big);
    let loaded = reader.read_batch::<Player>(players.len())?;
    assert_eq!(loaded, players);
    println!("✓ Read them back\n");

    // Same records swapped in memory
    let swapped: Vec<Player> = players.iter().map(|p| swap(*p)).collect();
    println!("id {} swapped is {:#010X}", players[0].id, swapped[0].id);

    // Zero-copy view of the raw bytes
    let words: &[u16] = cast(&players)?;
    println!("{} players viewed as {} u16 words", players.len(), words.len());

    // Health packed into 7 bits each, plus a flag bit
    let spec = ByteOrderSpec::new(ByteOrder::Little, BitOrder::Little);
    let mut bits = BitWriter::new(Vec::new(), spec);
    for p in &players {
        bits.write_u8(p.health, 7)?;
        bits.write_bool(p.flags & 1 == 1)?;
    }
    let packed = bits.finish()?;
    println!("\nPacked health+flag: {packed:02X?}");

    let mut bits = BitReader::new(packed.as_slice(), spec);
    for p in &players {
        assert_eq!(bits.read_u8(7)?, p.health);
        assert_eq!(bits.read_bool()?, p.flags & 1 == 1);
    }
    println!("✓ Bit-packed fields verified");

    Ok(())
}
