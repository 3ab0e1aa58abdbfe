//! Compile-time layout tables for endianness reversal.
//!
//! Every type that can be byte-swapped describes itself as an ordered list
//! of primitive spans. Composite records are flattened field by field in
//! declaration order; a span is reversed as one unit, so an atomic 3-byte
//! integer stays one span instead of three single bytes.

use std::fmt;

use bytemuck::Pod;

use crate::ViewError;
use crate::cache::LayoutCache;

/// Collects the primitive spans of a type while it describes itself.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    widths: Vec<usize>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one indivisible span of `width` bytes.
    #[inline]
    pub fn span(&mut self, width: usize) -> &mut Self {
        self.widths.push(width);
        self
    }

    /// Appends the spans of `T`.
    #[inline]
    pub fn field<T: SwapLayout>(&mut self) -> &mut Self {
        T::describe(self);
        self
    }
}

/// The flattened primitive spans of one type.
#[derive(Clone, PartialEq, Eq)]
pub struct TypeLayout {
    type_name: &'static str,
    widths: Box<[usize]>,
    size: usize,
}

impl TypeLayout {
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Span widths in declaration order.
    #[inline]
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Reverses every span of one element in place, preserving span order.
    pub fn reverse_in_place(&self, element: &mut [u8]) {
        debug_assert_eq!(element.len(), self.size);
        let mut offset = 0;
        for &width in self.widths.iter() {
            if width > 1 {
                element[offset..offset + width].reverse();
            }
            offset += width;
        }
    }
}

impl fmt::Debug for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeLayout")
            .field("type", &self.type_name)
            .field("widths", &self.widths)
            .finish()
    }
}

/// Computes the layout of `T` without touching any cache.
///
/// Fails with `InvalidLayout` when the described spans do not add up to
/// `size_of::<T>()`.
pub fn compute_layout<T: SwapLayout>() -> Result<TypeLayout, ViewError> {
    let mut builder = LayoutBuilder::new();
    T::describe(&mut builder);

    let described: usize = builder.widths.iter().sum();
    let size = core::mem::size_of::<T>();
    if described != size {
        return Err(ViewError::InvalidLayout {
            type_name: core::any::type_name::<T>(),
            described,
            size,
        });
    }

    Ok(TypeLayout {
        type_name: core::any::type_name::<T>(),
        widths: builder.widths.into_boxed_slice(),
        size,
    })
}

/// A fixed-layout value whose byte order can be reversed.
///
/// Primitives swap directly. Composite records get the default
/// implementation, which reverses each primitive span independently using
/// the layout cached in [`LayoutCache::global`]. Records normally derive
/// this trait:
///
/// ```
/// use typed_view::SwapLayout;
/// use bytemuck_derive::{Pod, Zeroable};
///
/// #[repr(C)]
/// #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, SwapLayout)]
/// struct Header {
///     magic: u32,
///     version: u16,
///     flags: u16,
/// }
///
/// let h = Header { magic: 0x0102_0304, version: 0x0506, flags: 0x0708 };
/// let s = h.swap_bytes();
/// assert_eq!(s.magic, 0x0403_0201);
/// assert_eq!(s.version, 0x0605);
/// assert_eq!(s.swap_bytes(), h);
/// ```
pub trait SwapLayout: Pod {
    /// Total bytes covered by the spans `describe` emits.
    const SIZE: usize;

    /// Emits this type's spans in declaration order.
    fn describe(layout: &mut LayoutBuilder);

    /// Returns the value with every primitive span byte-reversed.
    ///
    /// # Panics
    ///
    /// Panics if a hand-written `describe` does not cover the type exactly;
    /// derived layouts are checked at compile time.
    fn swap_bytes(self) -> Self {
        match crate::swap::swap_with(LayoutCache::global(), self) {
            Ok(swapped) => swapped,
            Err(err) => panic!("cannot swap {}: {err}", core::any::type_name::<Self>()),
        }
    }
}

macro_rules! impl_swap_int {
    ($($t:ty),* $(,)?) => {$(
        impl SwapLayout for $t {
            const SIZE: usize = core::mem::size_of::<$t>();

            #[inline]
            fn describe(layout: &mut LayoutBuilder) {
                layout.span(Self::SIZE);
            }

            #[inline]
            fn swap_bytes(self) -> Self {
                <$t>::swap_bytes(self)
            }
        }
    )*};
}

impl_swap_int!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);

macro_rules! impl_swap_float {
    ($($t:ty),* $(,)?) => {$(
        impl SwapLayout for $t {
            const SIZE: usize = core::mem::size_of::<$t>();

            #[inline]
            fn describe(layout: &mut LayoutBuilder) {
                layout.span(Self::SIZE);
            }

            #[inline]
            fn swap_bytes(self) -> Self {
                <$t>::from_bits(self.to_bits().swap_bytes())
            }
        }
    )*};
}

impl_swap_float!(f32, f64);

impl<T: SwapLayout, const N: usize> SwapLayout for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn describe(layout: &mut LayoutBuilder) {
        for _ in 0..N {
            T::describe(layout);
        }
    }

    #[inline]
    fn swap_bytes(self) -> Self {
        self.map(T::swap_bytes)
    }
}
