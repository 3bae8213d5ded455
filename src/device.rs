//! Scoped device handle and typed register access
//!
//! A [`Device`] owns one identifier obtained from a [`Transport`] and gives it
//! back exactly once: on [`close`](Device::close) or when the handle goes out
//! of scope, whichever comes first. Register reads and writes go through
//! [`Register`] descriptors, so the value type and the number of bytes on the
//! wire always match the register being accessed.
//!
//! # Example
//!
//! ```
//! use paged_regs::{Device, ReferenceTransport, registers};
//!
//! let mut transport = ReferenceTransport::new();
//! let mut device = Device::open(&mut transport, 1)?;
//!
//! device.write_default(&registers::POWER_ON)?;
//! assert_eq!(device.read(&registers::READABLE_VALUE)?, 42);
//! device.write(&registers::HELLO, 0x0100)?;
//! # Ok::<(), paged_regs::Error>(())
//! ```

use crate::register::Register;
use crate::transport::{DeviceId, Transport};
use crate::width::Width;
use crate::Error;

/// Open connection to a paged device
///
/// The identifier is released when the handle is closed or dropped. It never
/// leaves the handle, so nothing else can pass it back to the transport. After
/// [`close`](Self::close) every register access fails with [`Error::Usage`].
pub struct Device<T: Transport> {
    transport: T,
    id: Option<DeviceId>,
}

impl<T: Transport> Device<T> {
    /// Open the device selected by `param`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the transport refuses the parameter. No
    /// handle exists in that case, so nothing needs to be released.
    pub fn open(mut transport: T, param: u8) -> Result<Self, Error> {
        let id = transport.open(param);
        if !id.is_valid() {
            #[cfg(feature = "defmt")]
            defmt::warn!("cannot open connection to the device {=u8}", param);
            return Err(Error::Open(param));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("opened device {=u8} as {}", param, id);

        Ok(Self {
            transport,
            id: Some(id),
        })
    }

    /// Release the device
    ///
    /// Only the first call reaches the transport; later calls do nothing.
    pub fn close(&mut self) {
        if let Some(id) = self.id.take() {
            #[cfg(feature = "defmt")]
            defmt::debug!("closing device {}", id);

            self.transport.close(id);
        }
    }

    /// Whether the device has not been closed yet
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.id.is_some()
    }

    /// Get a reference to the underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn live_id(&self) -> Result<DeviceId, Error> {
        self.id.ok_or(Error::Usage)
    }

    /// Write `value` to a register
    ///
    /// Exactly `W::BYTES` bytes are handed to the transport, 16-bit values
    /// most significant byte first.
    ///
    /// # Errors
    ///
    /// - [`Error::Usage`] if the device was closed (no transport call is made)
    /// - [`Error::Write`] if the transport reports a failure
    /// - [`Error::ShortTransfer`] if the transport wrote a different length
    pub fn write<W: Width>(&mut self, register: &Register<W>, value: W) -> Result<(), Error> {
        let id = self.live_id()?;
        let bytes = value.encode();
        let status = self.transport.write(
            id,
            register.page(),
            register.address(),
            bytes.as_ref(),
        );

        if status < 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "write to {} failed with status {=i32}",
                register.location(),
                status
            );
            return Err(Error::Write(status));
        }
        check_length(W::BYTES, status)
    }

    /// Read the value of a register
    ///
    /// The transport is asked for exactly `W::BYTES` bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::Usage`] if the device was closed (no transport call is made)
    /// - [`Error::Read`] if the transport reports a failure
    /// - [`Error::ShortTransfer`] if the transport read a different length
    pub fn read<W: Width>(&mut self, register: &Register<W>) -> Result<W, Error> {
        let id = self.live_id()?;
        let mut bytes = W::Bytes::default();
        let status = self.transport.read(
            id,
            register.page(),
            register.address(),
            bytes.as_mut(),
        );

        if status < 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "read from {} failed with status {=i32}",
                register.location(),
                status
            );
            return Err(Error::Read(status));
        }
        check_length(W::BYTES, status)?;

        Ok(W::decode(bytes))
    }

    /// Read a register, transform its value and write the result back
    ///
    /// # Errors
    ///
    /// Returns the first error of the underlying [`read`](Self::read) or
    /// [`write`](Self::write). Nothing is written if the read fails.
    pub fn modify<W, F>(&mut self, register: &Register<W>, f: F) -> Result<W, Error>
    where
        W: Width,
        F: FnOnce(W) -> W,
    {
        let value = f(self.read(register)?);
        self.write(register, value)?;
        Ok(value)
    }

    /// Write the register's declared default value
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDefault`] without touching the transport if the
    /// register has no default, otherwise the errors of [`write`](Self::write).
    pub fn write_default<W: Width>(&mut self, register: &Register<W>) -> Result<(), Error> {
        let value = register.default_value().ok_or(Error::NoDefault)?;
        self.write(register, value)
    }

    /// Write raw bytes at a folded register location
    ///
    /// Used by the [`device_driver`] bridge, where the register size is only
    /// known at run time.
    pub(crate) fn write_raw(&mut self, page: u8, address: u8, data: &[u8]) -> Result<(), Error> {
        let id = self.live_id()?;
        let status = self.transport.write(id, page, address, data);
        if status < 0 {
            return Err(Error::Write(status));
        }
        check_length(data.len(), status)
    }

    /// Read raw bytes at a folded register location
    pub(crate) fn read_raw(&mut self, page: u8, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        let id = self.live_id()?;
        let status = self.transport.read(id, page, address, buf);
        if status < 0 {
            return Err(Error::Read(status));
        }
        check_length(buf.len(), status)
    }
}

impl<T: Transport> Drop for Device<T> {
    fn drop(&mut self) {
        self.close();
    }
}

fn check_length(expected: usize, status: i32) -> Result<(), Error> {
    // Callers have already rejected negative statuses
    let actual = usize::try_from(status).unwrap_or(0);
    if actual == expected {
        Ok(())
    } else {
        Err(Error::ShortTransfer { expected, actual })
    }
}
