//! Register widths and their wire encoding
//!
//! Every register holds either an 8-bit or a 16-bit value. The [`Width`] trait
//! is sealed and implemented for exactly `u8` and `u16`, so the value type of a
//! [`Register`](crate::Register) also fixes how many bytes travel over the
//! transport and in which order.
//!
//! ## Wire format
//! - **8-bit**: one byte, sent as is
//! - **16-bit**: two bytes, most significant byte first (big-endian)
//!
//! The byte order is fixed by the transport protocol and does not depend on
//! the host.

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// Register width selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWidth {
    /// 8-bit register
    Bits8,
    /// 16-bit register
    Bits16,
}

impl RegisterWidth {
    /// Number of bytes transferred for this width
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
        }
    }

    /// Number of bits held by this width
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
        }
    }
}

/// A scalar type that can be stored in a register
///
/// Implemented for `u8` and `u16` only.
pub trait Width: sealed::Sealed + Copy + PartialEq + core::fmt::Debug {
    /// Width tag for this type
    const KIND: RegisterWidth;

    /// Number of bytes on the wire
    const BYTES: usize = Self::KIND.bytes();

    /// Wire representation
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Convert a value into its wire bytes
    fn encode(self) -> Self::Bytes;

    /// Convert wire bytes back into a value
    fn decode(bytes: Self::Bytes) -> Self;
}

impl Width for u8 {
    const KIND: RegisterWidth = RegisterWidth::Bits8;

    type Bytes = [u8; 1];

    fn encode(self) -> [u8; 1] {
        [self]
    }

    fn decode(bytes: [u8; 1]) -> Self {
        bytes[0]
    }
}

impl Width for u16 {
    const KIND: RegisterWidth = RegisterWidth::Bits16;

    type Bytes = [u8; 2];

    fn encode(self) -> [u8; 2] {
        self.to_be_bytes()
    }

    fn decode(bytes: [u8; 2]) -> Self {
        Self::from_be_bytes(bytes)
    }
}
