//! Single-value and bulk endianness reversal.

use crate::cache::LayoutCache;
use crate::layout::{SwapLayout, TypeLayout};
use crate::order::ByteOrder;
use crate::ViewError;

/// Reverses the byte order of `value`. Applying it twice is the identity.
#[inline]
pub fn swap<T: SwapLayout>(value: T) -> T {
    value.swap_bytes()
}

/// Layout-driven reversal using an explicit cache.
pub fn swap_with<T: SwapLayout>(cache: &LayoutCache, mut value: T) -> Result<T, ViewError> {
    let layout = cache.get_or_compute::<T>()?;
    layout.reverse_in_place(bytemuck::bytes_of_mut(&mut value));
    Ok(value)
}

/// Converts between native order and `order`. The same call works in both
/// directions.
#[inline]
pub fn to_order<T: SwapLayout>(value: T, order: ByteOrder) -> T {
    if order.is_native() {
        value
    } else {
        value.swap_bytes()
    }
}

/// Reverses every element of `values` in place with one layout lookup.
pub fn swap_slice<T: SwapLayout>(values: &mut [T]) -> Result<(), ViewError> {
    swap_slice_with(LayoutCache::global(), values)
}

pub fn swap_slice_with<T: SwapLayout>(
    cache: &LayoutCache,
    values: &mut [T],
) -> Result<(), ViewError> {
    let layout = cache.get_or_compute::<T>()?;
    let count = values.len();
    swap_region(bytemuck::cast_slice_mut(values), &layout, count)
}

/// Applies `layout` to `count` contiguous elements at the start of `region`.
///
/// This is the hot path for arrays of records read from a stream: the plan
/// is looked up once and replayed per element.
pub fn swap_region(region: &mut [u8], layout: &TypeLayout, count: usize) -> Result<(), ViewError> {
    let size = layout.size();
    if size == 0 || count == 0 {
        return Ok(());
    }
    let needed = size
        .checked_mul(count)
        .filter(|&n| n <= region.len())
        .ok_or(ViewError::SizeMismatch {
            bytes: region.len(),
            elem: size,
        })?;

    for element in region[..needed].chunks_exact_mut(size) {
        layout.reverse_in_place(element);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;

    #[test]
    fn primitive_swaps() {
        assert_eq!(swap(0x1122u16), 0x2211);
        assert_eq!(swap(0x1122_3344u32), 0x4433_2211);
        assert_eq!(swap(0x0102_0304_0506_0708u64), 0x0807_0605_0403_0201);
        assert_eq!(swap(0x7Fu8), 0x7F);
        assert_eq!(swap(-2i32), (-2i32).swap_bytes());
    }

    #[test]
    fn to_order_is_identity_for_native() {
        assert_eq!(to_order(0x1234u16, ByteOrder::NATIVE), 0x1234);
        assert_eq!(to_order(0x1234u16, ByteOrder::NATIVE.opposite()), 0x3412);
    }

    #[test]
    fn bulk_matches_single() -> Result<(), ViewError> {
        let mut values = [0x0102u16, 0x0304, 0x0506];
        swap_slice(&mut values)?;
        assert_eq!(values, [0x0201, 0x0403, 0x0605]);
        Ok(())
    }

    #[test]
    fn region_too_short() {
        let layout = compute_layout::<u32>().unwrap();
        let mut region = [0u8; 7];
        assert!(matches!(
            swap_region(&mut region, &layout, 2),
            Err(ViewError::SizeMismatch { bytes: 7, elem: 4 })
        ));
        // a prefix is fine
        assert!(swap_region(&mut region, &layout, 1).is_ok());
    }

    #[test]
    fn explicit_cache_is_used() -> Result<(), ViewError> {
        let cache = LayoutCache::new();
        assert_eq!(swap_with(&cache, [0x0102u16, 0x0304])?, [0x0201, 0x0403]);
        assert_eq!(cache.len(), 1);
        Ok(())
    }
}
