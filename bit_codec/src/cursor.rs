//! Sub-byte packing state shared by [`BitReader`](crate::BitReader) and
//! [`BitWriter`](crate::BitWriter).
//!
//! An `L`-bit value is split into value-bytes, the partial one being the
//! most significant. Value-bytes travel in `ByteOrder` order; bits inside
//! each value-byte travel in `BitOrder` order and fill stream bytes from the
//! `BitOrder` end. Whole bytes at a byte boundary therefore come out exactly
//! as ordinary endianness, whatever the bit order.
//!
//! The cursor does no I/O itself: bytes leave through a sink closure and
//! arrive through a fetch closure, so every transition can be tested in
//! isolation.

use typed_view::ByteOrder;

use crate::order::{BitOrder, ByteOrderSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitCursor {
    spec: ByteOrderSpec,
    /// Writer: bits placed so far. Reader: the byte being consumed.
    pending: u8,
    /// Bits of `pending` already placed or consumed, always below 8.
    bit_offset: u8,
}

impl BitCursor {
    pub fn new(spec: ByteOrderSpec) -> Self {
        Self {
            spec,
            pending: 0,
            bit_offset: 0,
        }
    }

    #[inline]
    pub fn spec(&self) -> ByteOrderSpec {
        self.spec
    }

    #[inline]
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// True when byte-aligned with nothing pending.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.bit_offset == 0
    }

    /// Drops pending bits and returns to the aligned state.
    pub fn reset(&mut self) {
        self.pending = 0;
        self.bit_offset = 0;
    }

    /// Continues mid-byte: `byte` is the current stream byte and `bit_offset`
    /// bits of it count as already processed.
    pub fn resume(&mut self, byte: u8, bit_offset: u8) {
        self.pending = byte;
        self.bit_offset = bit_offset % 8;
    }

    /// Writer side: the pending byte zero-padded, if any bits are waiting.
    pub fn flush(&mut self) -> Option<u8> {
        if self.is_idle() {
            return None;
        }
        let byte = self.pending;
        self.reset();
        Some(byte)
    }

    /// Emits the low `len` bits of `value`, handing every completed stream
    /// byte to `sink`.
    ///
    /// If `sink` fails, bytes it already accepted stay emitted and the
    /// rejected byte is dropped; the cursor is left byte-aligned and empty,
    /// so later writes start a fresh byte.
    pub fn put_bits<E>(
        &mut self,
        value: u64,
        len: u32,
        mut sink: impl FnMut(u8) -> Result<(), E>,
    ) -> Result<(), E> {
        debug_assert!((1..=64).contains(&len));

        if self.is_idle() && len % 8 == 0 {
            for index in value_byte_indices(len, self.spec.byte_order) {
                sink((value >> (index * 8)) as u8)?;
            }
            return Ok(());
        }

        for index in value_byte_indices(len, self.spec.byte_order) {
            let width = value_byte_width(len, index);
            let byte = (value >> (index * 8)) as u8;
            for k in 0..width {
                let nth = self.bit_index(k, width);
                self.put_bit((byte >> nth) & 1);
                if self.bit_offset == 0 {
                    sink(core::mem::take(&mut self.pending))?;
                }
            }
        }
        Ok(())
    }

    /// Reads `len` bits, pulling stream bytes from `fetch` as needed. The
    /// result is right-aligned.
    ///
    /// `fetch` is only called at a byte boundary, so a failed fetch leaves
    /// the cursor aligned just past the last byte it consumed. Bits of the
    /// interrupted value are lost; reposition the stream to retry.
    pub fn take_bits<E>(
        &mut self,
        len: u32,
        mut fetch: impl FnMut() -> Result<u8, E>,
    ) -> Result<u64, E> {
        debug_assert!((1..=64).contains(&len));

        let mut value = 0u64;
        if self.is_idle() && len % 8 == 0 {
            for index in value_byte_indices(len, self.spec.byte_order) {
                value |= u64::from(fetch()?) << (index * 8);
            }
            return Ok(value);
        }

        for index in value_byte_indices(len, self.spec.byte_order) {
            let width = value_byte_width(len, index);
            let mut byte = 0u8;
            for k in 0..width {
                let nth = self.bit_index(k, width);
                if self.bit_offset == 0 {
                    self.pending = fetch()?;
                }
                byte |= self.take_bit() << nth;
            }
            value |= u64::from(byte) << (index * 8);
        }
        Ok(value)
    }

    #[inline]
    fn put_bit(&mut self, bit: u8) {
        self.pending |= bit << self.spec.bit_order.slot(self.bit_offset);
        self.bit_offset = (self.bit_offset + 1) % 8;
    }

    #[inline]
    fn take_bit(&mut self) -> u8 {
        let bit = (self.pending >> self.spec.bit_order.slot(self.bit_offset)) & 1;
        self.bit_offset = (self.bit_offset + 1) % 8;
        bit
    }

    /// Index inside a `width`-bit value-byte of the `k`-th bit to travel.
    #[inline]
    fn bit_index(&self, k: u32, width: u32) -> u32 {
        match self.spec.bit_order {
            BitOrder::Little => k,
            BitOrder::Big => width - 1 - k,
        }
    }
}

/// Value-byte indices (0 = least significant) in travel order.
fn value_byte_indices(len: u32, order: ByteOrder) -> impl Iterator<Item = u32> {
    let count = len.div_ceil(8);
    (0..count).map(move |k| match order {
        ByteOrder::Little => k,
        ByteOrder::Big => count - 1 - k,
    })
}

/// Width of value-byte `index`; only the top one may be partial.
#[inline]
fn value_byte_width(len: u32, index: u32) -> u32 {
    (len - index * 8).min(8)
}
