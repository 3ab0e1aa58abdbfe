//! Three-byte integers, swapped as one atomic span.

use core::fmt;

use bytemuck_derive::{Pod, Zeroable};

use crate::ViewError;
use crate::layout::{LayoutBuilder, SwapLayout};

macro_rules! int24 {
    ($name:ident, $wide:ty, $max:expr, $min:expr) => {
        #[repr(transparent)]
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
        pub struct $name([u8; 3]);

        impl $name {
            pub const MAX: $wide = $max;
            pub const MIN: $wide = $min;

            /// Builds the value, failing when it does not fit in 24 bits.
            pub fn new(value: $wide) -> Result<Self, ViewError> {
                if !(Self::MIN..=Self::MAX).contains(&value) {
                    return Err(ViewError::InvalidArgument(format!(
                        "{value} does not fit in {}",
                        stringify!($name)
                    )));
                }
                Ok(Self::truncating(value))
            }

            /// Keeps the low 24 bits of `value`.
            #[inline]
            pub fn truncating(value: $wide) -> Self {
                let bytes = value.to_ne_bytes();
                #[cfg(target_endian = "little")]
                let low = [bytes[0], bytes[1], bytes[2]];
                #[cfg(target_endian = "big")]
                let low = [bytes[1], bytes[2], bytes[3]];
                Self(low)
            }

            #[inline]
            pub fn get(self) -> $wide {
                #[cfg(target_endian = "little")]
                let wide = [self.0[0], self.0[1], self.0[2], 0];
                #[cfg(target_endian = "big")]
                let wide = [0, self.0[0], self.0[1], self.0[2]];
                // shift up then back down so the signed variant sign-extends
                <$wide>::from_ne_bytes(wide) << 8 >> 8
            }
        }

        impl SwapLayout for $name {
            const SIZE: usize = 3;

            #[inline]
            fn describe(layout: &mut LayoutBuilder) {
                layout.span(3);
            }

            #[inline]
            fn swap_bytes(self) -> Self {
                Self([self.0[2], self.0[1], self.0[0]])
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.get())
            }
        }

        impl From<$name> for $wide {
            fn from(v: $name) -> $wide {
                v.get()
            }
        }

        impl TryFrom<$wide> for $name {
            type Error = ViewError;

            fn try_from(value: $wide) -> Result<Self, ViewError> {
                Self::new(value)
            }
        }
    };
}

int24!(U24, u32, 0x00FF_FFFF, 0);
int24!(I24, i32, 0x007F_FFFF, -0x0080_0000);
