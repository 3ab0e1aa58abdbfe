//! Streaming readers and writers of fixed-layout values.

use std::io::{self, Read, Write};

use crate::ViewError;
use crate::cache::LayoutCache;
use crate::layout::SwapLayout;
use crate::order::ByteOrder;
use crate::swap::{swap_region, to_order};

/// Writes values to a byte sink in a fixed byte order.
#[derive(Debug)]
pub struct ValueWriter<W: Write> {
    writer: W,
    order: ByteOrder,
}

impl<W: Write> ValueWriter<W> {
    pub fn new(writer: W, order: ByteOrder) -> Self {
        Self { writer, order }
    }

    #[inline]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn write<T: SwapLayout>(&mut self, item: &T) -> Result<(), ViewError> {
        let value = to_order(*item, self.order);
        self.writer.write_all(bytemuck::bytes_of(&value))?;
        Ok(())
    }

    pub fn write_batch<T: SwapLayout>(&mut self, items: &[T]) -> Result<(), ViewError> {
        if self.order.is_native() {
            self.writer.write_all(bytemuck::cast_slice(items))?;
            return Ok(());
        }

        let layout = LayoutCache::global().get_or_compute::<T>()?;
        let mut bytes = bytemuck::cast_slice::<T, u8>(items).to_vec();
        swap_region(&mut bytes, &layout, items.len())?;
        self.writer.write_all(&bytes)?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads values from a byte source in a fixed byte order.
#[derive(Debug)]
pub struct ValueReader<R: Read> {
    reader: R,
    order: ByteOrder,
}

impl<R: Read> ValueReader<R> {
    pub fn new(reader: R, order: ByteOrder) -> Self {
        Self { reader, order }
    }

    #[inline]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Reads one value; a short source is `EndOfStream`.
    pub fn read<T: SwapLayout>(&mut self) -> Result<T, ViewError> {
        let mut value = T::zeroed();
        self.reader.read_exact(bytemuck::bytes_of_mut(&mut value))?;
        Ok(to_order(value, self.order))
    }

    /// Like [`read`](Self::read), but a source that is already exhausted
    /// yields `None`. A partial value is still `EndOfStream`.
    pub fn try_read<T: SwapLayout>(&mut self) -> Result<Option<T>, ViewError> {
        let mut value = T::zeroed();
        let buf = bytemuck::bytes_of_mut(&mut value);
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(ViewError::EndOfStream),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(to_order(value, self.order)))
    }

    /// Reads `count` values with a single layout lookup.
    pub fn read_batch<T: SwapLayout>(&mut self, count: usize) -> Result<Vec<T>, ViewError> {
        let mut items = vec![T::zeroed(); count];
        self.reader.read_exact(bytemuck::cast_slice_mut(&mut items))?;
        if !self.order.is_native() {
            let layout = LayoutCache::global().get_or_compute::<T>()?;
            swap_region(bytemuck::cast_slice_mut(&mut items), &layout, count)?;
        }
        Ok(items)
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
