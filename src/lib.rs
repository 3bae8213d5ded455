#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod register;
pub mod registers;
pub mod transport;
pub mod width;

// Re-export main types
pub use device::Device;
pub use register::{Register, RegisterAddress};
pub use transport::{DeviceId, Transport};
pub use width::{RegisterWidth, Width};

pub use transport::i2c::I2cTransport;
pub use transport::reference::ReferenceTransport;

/// Largest register width handled by the codec, in bytes
pub const MAX_WIDTH_BYTES: usize = 2;

/// Register access errors
///
/// Transport failures carry the negative status code the transport returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The transport refused to open the device (contains the device parameter)
    Open(u8),
    /// Accessor invoked on a handle that has already been closed
    Usage,
    /// The transport reported a failed write (contains the status code)
    Write(i32),
    /// The transport reported a failed read (contains the status code)
    Read(i32),
    /// The transport moved a byte count other than the register width
    ShortTransfer {
        /// Register width in bytes
        expected: usize,
        /// Byte count reported by the transport
        actual: usize,
    },
    /// `write_default` on a register declared without a default value
    NoDefault,
}
