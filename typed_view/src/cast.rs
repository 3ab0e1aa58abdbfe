//! Zero-copy reinterpretation of slices and single-element access.

use bytemuck::{Pod, PodCastError};

use crate::ViewError;
use crate::layout::SwapLayout;
use crate::order::ByteOrder;
use crate::swap::to_order;

/// Reinterprets `src` as a slice of `B` sharing the same memory.
///
/// The total byte length must be a whole number of `B` elements; that is
/// checked before alignment, so an odd-sized source reports `SizeMismatch`
/// even when it also happens to be misaligned.
///
/// ```
/// let words = [0x0102_0304u32, 0x0506_0708];
/// let halves: &[u16] = typed_view::cast(&words).unwrap();
/// assert_eq!(halves.len(), 4);
/// ```
pub fn cast<A: Pod, B: Pod>(src: &[A]) -> Result<&[B], ViewError> {
    let bytes = core::mem::size_of_val(src);
    check_whole::<B>(bytes)?;
    bytemuck::try_cast_slice(src).map_err(|e| map_cast_error::<B>(e, bytes))
}

/// Mutable variant of [`cast`]. Writes through the view are visible in
/// `src`.
pub fn cast_mut<A: Pod, B: Pod>(src: &mut [A]) -> Result<&mut [B], ViewError> {
    let bytes = core::mem::size_of_val(src);
    check_whole::<B>(bytes)?;
    bytemuck::try_cast_slice_mut(src).map_err(|e| map_cast_error::<B>(e, bytes))
}

/// Copies exactly one `T` out of `bytes`, whatever their alignment.
pub fn from_bytes<T: Pod>(bytes: &[u8]) -> Result<T, ViewError> {
    bytemuck::try_pod_read_unaligned(bytes).map_err(|e| map_cast_error::<T>(e, bytes.len()))
}

/// Reads element `index` of a byte region holding values in `order`.
pub fn read_at<T: SwapLayout>(bytes: &[u8], index: usize, order: ByteOrder) -> Result<T, ViewError> {
    let range = element_range::<T>(bytes.len(), index)?;
    let value: T = from_bytes(&bytes[range])?;
    Ok(to_order(value, order))
}

/// Stores `value` as element `index` of a byte region in `order`.
pub fn write_at<T: SwapLayout>(
    bytes: &mut [u8],
    index: usize,
    value: T,
    order: ByteOrder,
) -> Result<(), ViewError> {
    let range = element_range::<T>(bytes.len(), index)?;
    let value = to_order(value, order);
    bytes[range].copy_from_slice(bytemuck::bytes_of(&value));
    Ok(())
}

fn element_range<T>(len: usize, index: usize) -> Result<core::ops::Range<usize>, ViewError> {
    let size = core::mem::size_of::<T>();
    let count = len.checked_div(size).unwrap_or(0);
    if index >= count {
        return Err(ViewError::OutOfRange { index, len: count });
    }
    let start = index * size;
    Ok(start..start + size)
}

fn check_whole<B>(bytes: usize) -> Result<(), ViewError> {
    let elem = core::mem::size_of::<B>();
    if elem == 0 || bytes % elem != 0 {
        return Err(ViewError::SizeMismatch { bytes, elem });
    }
    Ok(())
}

fn map_cast_error<B>(err: PodCastError, bytes: usize) -> ViewError {
    match err {
        PodCastError::TargetAlignmentGreaterAndInputNotAligned | PodCastError::AlignmentMismatch => {
            ViewError::Misaligned {
                align: core::mem::align_of::<B>(),
            }
        }
        PodCastError::OutputSliceWouldHaveSlop | PodCastError::SizeMismatch => {
            ViewError::SizeMismatch {
                bytes,
                elem: core::mem::size_of::<B>(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_alias_memory() -> Result<(), ViewError> {
        let mut backing = [0u64; 2];
        {
            let ints: &mut [i32] = cast_mut(&mut backing)?;
            assert_eq!(ints.len(), 4);
            ints[0] = -1;
        }
        let bytes: &[u8] = cast(&backing)?;
        assert_eq!(&bytes[..4], &[0xFF; 4]);
        Ok(())
    }

    #[test]
    fn odd_length_is_size_mismatch() {
        let bytes = [0u8; 7];
        assert!(matches!(
            cast::<u8, u16>(&bytes),
            Err(ViewError::SizeMismatch { bytes: 7, elem: 2 })
        ));
    }

    #[test]
    fn misaligned_source() {
        let backing = [0u64; 2];
        let bytes: &[u8] = bytemuck::cast_slice(&backing);
        assert!(matches!(
            cast::<u8, u32>(&bytes[1..13]),
            Err(ViewError::Misaligned { align: 4 })
        ));
    }

    #[test]
    fn element_access_in_both_orders() -> Result<(), ViewError> {
        let mut region = [0u8; 8];
        write_at(&mut region, 0, 0x0102_0304u32, ByteOrder::Big)?;
        write_at(&mut region, 1, 0x0102_0304u32, ByteOrder::Little)?;
        assert_eq!(region, [1, 2, 3, 4, 4, 3, 2, 1]);

        assert_eq!(read_at::<u32>(&region, 0, ByteOrder::Big)?, 0x0102_0304);
        assert_eq!(read_at::<u32>(&region, 1, ByteOrder::Little)?, 0x0102_0304);
        assert_eq!(read_at::<u16>(&region[1..], 0, ByteOrder::Big)?, 0x0203);
        Ok(())
    }

    #[test]
    fn element_out_of_range() {
        let region = [0u8; 7];
        assert!(matches!(
            read_at::<u32>(&region, 1, ByteOrder::Little),
            Err(ViewError::OutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn from_bytes_needs_exact_length() {
        assert_eq!(from_bytes::<u16>(&[1, 0]).unwrap(), u16::from_ne_bytes([1, 0]));
        assert!(matches!(
            from_bytes::<u16>(&[1, 0, 0]),
            Err(ViewError::SizeMismatch { bytes: 3, elem: 2 })
        ));
    }
}
