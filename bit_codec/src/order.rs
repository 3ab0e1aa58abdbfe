use std::fmt;
use std::str::FromStr;

use typed_view::ByteOrder;

use crate::BitError;

/// Which bit of a stream byte is consumed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BitOrder {
    /// Bit 0 first.
    #[default]
    Little,
    /// Bit 7 first.
    Big,
}

impl BitOrder {
    /// Stream-byte slot of the `nth` bit written into a byte.
    #[inline]
    pub(crate) fn slot(self, nth: u8) -> u8 {
        match self {
            BitOrder::Little => nth,
            BitOrder::Big => 7 - nth,
        }
    }
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BitOrder::Little => "little",
            BitOrder::Big => "big",
        })
    }
}

impl FromStr for BitOrder {
    type Err = BitError;

    /// Accepts `little`/`lsb` and `big`/`msb`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "lsb" => Ok(BitOrder::Little),
            "big" | "msb" => Ok(BitOrder::Big),
            other => Err(BitError::InvalidArgument(format!(
                "unknown bit order `{other}`"
            ))),
        }
    }
}

/// Byte order and bit order of a bit codec. The two are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteOrderSpec {
    pub byte_order: ByteOrder,
    pub bit_order: BitOrder,
}

impl ByteOrderSpec {
    pub const fn new(byte_order: ByteOrder, bit_order: BitOrder) -> Self {
        Self {
            byte_order,
            bit_order,
        }
    }
}

impl fmt::Display for ByteOrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.byte_order, self.bit_order)
    }
}

impl FromStr for ByteOrderSpec {
    type Err = BitError;

    /// Parses `byte:bit` such as `be:msb`; a lone byte order keeps the
    /// default bit order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (byte, bit) = match s.split_once(':') {
            Some((byte, bit)) => (byte, Some(bit)),
            None => (s, None),
        };
        Ok(Self {
            byte_order: byte.trim().parse()?,
            bit_order: match bit {
                Some(bit) => bit.trim().parse()?,
                None => BitOrder::default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots() {
        assert_eq!(BitOrder::Little.slot(0), 0);
        assert_eq!(BitOrder::Big.slot(0), 7);
        assert_eq!(BitOrder::Big.slot(7), 0);
    }

    #[test]
    fn parse_spec() {
        assert_eq!(
            "be:msb".parse::<ByteOrderSpec>().unwrap(),
            ByteOrderSpec::new(ByteOrder::Big, BitOrder::Big)
        );
        assert_eq!(
            "little".parse::<ByteOrderSpec>().unwrap(),
            ByteOrderSpec::default()
        );
        assert!(matches!(
            "be:sideways".parse::<ByteOrderSpec>(),
            Err(BitError::InvalidArgument(_))
        ));
        assert!(matches!(
            "mixed".parse::<ByteOrderSpec>(),
            Err(BitError::InvalidArgument(_))
        ));
        let spec = ByteOrderSpec::new(ByteOrder::Little, BitOrder::Big);
        assert_eq!(spec.to_string().parse::<ByteOrderSpec>().unwrap(), spec);
    }
}
