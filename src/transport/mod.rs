//! Byte-oriented device transports
//!
//! A [`Transport`] is the driver underneath a [`Device`](crate::Device). It
//! opens and closes devices by a numeric parameter and moves raw bytes to and
//! from a (page, address) location. Results follow the driver convention of a
//! signed length: negative values are failures, anything else is the number of
//! bytes transferred.
//!
//! Two implementations ship with the crate:
//! - [`ReferenceTransport`](reference::ReferenceTransport): the scripted
//!   black-box driver, useful for bring-up and demos
//! - [`I2cTransport`](i2c::I2cTransport): paged registers behind an I2C bus
//!   using a page-select register

pub mod i2c;
pub mod reference;

/// Device identifier issued by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(u8);

impl DeviceId {
    /// Sentinel returned by [`Transport::open`] when the device cannot be opened
    pub const INVALID: Self = Self(0xFF);

    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw identifier value
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Whether this is a real identifier rather than [`DeviceId::INVALID`]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

/// Driver-level access to paged devices
///
/// Implementations do not need to guard against double close;
/// [`Device`](crate::Device) calls [`close`](Transport::close) at most once
/// per identifier.
pub trait Transport {
    /// Open a device, returning [`DeviceId::INVALID`] if it cannot be opened
    fn open(&mut self, param: u8) -> DeviceId;

    /// Close a previously opened device
    fn close(&mut self, id: DeviceId);

    /// Write `data` at `page`/`address`
    ///
    /// Returns the number of bytes written, or a negative error code.
    fn write(&mut self, id: DeviceId, page: u8, address: u8, data: &[u8]) -> i32;

    /// Read `buf.len()` bytes from `page`/`address`
    ///
    /// Returns the number of bytes read, or a negative error code.
    fn read(&mut self, id: DeviceId, page: u8, address: u8, buf: &mut [u8]) -> i32;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn open(&mut self, param: u8) -> DeviceId {
        T::open(self, param)
    }

    fn close(&mut self, id: DeviceId) {
        T::close(self, id);
    }

    fn write(&mut self, id: DeviceId, page: u8, address: u8, data: &[u8]) -> i32 {
        T::write(self, id, page, address, data)
    }

    fn read(&mut self, id: DeviceId, page: u8, address: u8, buf: &mut [u8]) -> i32 {
        T::read(self, id, page, address, buf)
    }
}
