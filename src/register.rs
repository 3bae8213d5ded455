//! Register descriptors
//!
//! A [`Register`] binds a logical register to its page, its address within the
//! page and its width. Descriptors are plain values meant to be declared once
//! as `const` items and shared by every call site:
//!
//! ```
//! use paged_regs::Register;
//!
//! const CONTROL: Register<u8> = Register::new(0x00, 0x10).with_default(0x80);
//! const THRESHOLD: Register<u16> = Register::new(0x01, 0x20);
//!
//! assert_eq!(CONTROL.default_value(), Some(0x80));
//! assert!(!CONTROL.overlaps(&THRESHOLD));
//! ```

use core::marker::PhantomData;

use crate::width::{RegisterWidth, Width};

/// Location of a register: page plus address within the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterAddress {
    /// Memory page on the device
    pub page: u8,
    /// Address on the page
    pub address: u8,
}

impl RegisterAddress {
    /// Create a new register address
    #[must_use]
    pub const fn new(page: u8, address: u8) -> Self {
        Self { page, address }
    }

    /// Fold the location into a single 16-bit address (`page` in the high byte)
    #[must_use]
    pub const fn to_u16(self) -> u16 {
        ((self.page as u16) << 8) | self.address as u16
    }

    /// Split a folded 16-bit address back into page and address
    #[must_use]
    pub const fn from_u16(raw: u16) -> Self {
        Self {
            page: (raw >> 8) as u8,
            address: (raw & 0xFF) as u8,
        }
    }
}

impl From<u16> for RegisterAddress {
    fn from(raw: u16) -> Self {
        Self::from_u16(raw)
    }
}

impl From<RegisterAddress> for u16 {
    fn from(location: RegisterAddress) -> Self {
        location.to_u16()
    }
}

/// Immutable descriptor of a register holding a value of type `W`
///
/// The value type is part of the descriptor type, so a `Register<u16>` only
/// accepts and returns `u16` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register<W: Width> {
    location: RegisterAddress,
    default: Option<W>,
    _width: PhantomData<W>,
}

impl<W: Width> Register<W> {
    /// Describe a register at `page`/`address` without a default value
    #[must_use]
    pub const fn new(page: u8, address: u8) -> Self {
        Self {
            location: RegisterAddress::new(page, address),
            default: None,
            _width: PhantomData,
        }
    }

    /// Attach a default value, written by
    /// [`Device::write_default`](crate::Device::write_default)
    #[must_use]
    pub const fn with_default(self, value: W) -> Self {
        Self {
            location: self.location,
            default: Some(value),
            _width: PhantomData,
        }
    }

    /// Memory page of the register
    #[must_use]
    pub const fn page(&self) -> u8 {
        self.location.page
    }

    /// Address of the register within its page
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.location.address
    }

    /// Page and address of the register
    #[must_use]
    pub const fn location(&self) -> RegisterAddress {
        self.location
    }

    /// Width of the register
    #[must_use]
    pub const fn width(&self) -> RegisterWidth {
        W::KIND
    }

    /// Default value, if one was declared
    #[must_use]
    pub const fn default_value(&self) -> Option<W> {
        self.default
    }

    /// Check whether two registers share at least one byte
    ///
    /// A 16-bit register occupies its address and the next one on the same
    /// page, wrapping from 0xFF to 0x00. Nothing prevents overlapping
    /// descriptors from being declared; this is for callers that want to rule
    /// it out, e.g. in a `const` assertion.
    #[must_use]
    pub const fn overlaps<V: Width>(&self, other: &Register<V>) -> bool {
        if self.location.page != other.location.page {
            return false;
        }
        let a = self.location.address;
        let b = other.location.address;
        (b.wrapping_sub(a) as usize) < W::BYTES || (a.wrapping_sub(b) as usize) < V::BYTES
    }
}
