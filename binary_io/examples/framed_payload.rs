//! Build a message back to front so its length header can be prepended,
//! then keep a rolling log of the last few messages in a ring.

use std::sync::Arc;

use binary_io::prelude::*;
use binary_io::PoolConfig;

fn build_message(seq: u32, body: &str) -> Result<Vec<u8>> {
    let mut frame = FrameBuilder::new(LengthPrefix::U16, ByteOrder::Big);
    // last field first
    frame.push_bytes(body.as_bytes())?;
    frame.push_value(&(body.len() as u16))?;
    frame.push_value(&seq)?;
    frame.finish()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let pool = Arc::new(SharedPool::with_config(PoolConfig {
        max_arrays_per_bucket: 4,
        ..PoolConfig::default()
    }));

    let mut log = RingStream::with_pool(pool.clone(), 64)?;
    for (seq, body) in ["hello", "framed", "world", "of", "pooled", "bytes"].iter().enumerate() {
        let message = build_message(seq as u32, body)?;
        println!("message {seq}: {message:02X?}");
        log.write_from(&message)?;
    }

    println!("\nring holds the last {} bytes", log.len());
    println!("{:02X?}", log.to_vec()?);

    let decoded = read_frame(build_message(9, "again")?.as_slice(), LengthPrefix::U16, ByteOrder::Big)?;
    println!("\ndecoded payload: {decoded:02X?}");

    let stats = pool.stats();
    println!("pool: rented={} released={} retained={}", stats.rented, stats.released, stats.retained);
    Ok(())
}
