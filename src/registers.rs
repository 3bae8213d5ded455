//! Well-known registers
//!
//! | Register | Page | Address | Width | Default |
//! |---|---|---|---|---|
//! | [`POWER_ON`] | 0x00 | 0x00 | 8-bit | 0xFD |
//! | [`HELLO`] | 0xAA | 0xFF | 16-bit | - |
//! | [`READABLE_VALUE`] | 0x10 | 0xA0 | 8-bit | - |
//!
//! The same map is also available as the `device-driver` register block
//! [`Demo`], addressed by folded 16-bit locations (`page << 8 | address`).

use crate::register::Register;

/// Power-on command register (write 0xFD to power the device on)
pub const POWER_ON: Register<u8> = Register::new(0x00, 0x00).with_default(0xFD);

/// Hello message register
pub const HELLO: Register<u16> = Register::new(0xAA, 0xFF);

/// Readable value register (reads back the universal answer)
pub const READABLE_VALUE: Register<u8> = Register::new(0x10, 0xA0);

const _: () = assert!(!POWER_ON.overlaps(&HELLO));
const _: () = assert!(!POWER_ON.overlaps(&READABLE_VALUE));
const _: () = assert!(!HELLO.overlaps(&READABLE_VALUE));

device_driver::create_device!(
    device_name: Demo,
    dsl: {
        config {
            type RegisterAddressType = u16;
            type DefaultByteOrder = BE;
        }

        /// POWER_ON - Power-on command (page 0x00, 0x00)
        register PowerOn {
            const ADDRESS = 0x0000;
            const SIZE_BITS = 8;

            /// Command byte (0xFD = power on)
            value: uint = 0..8,
        },

        /// HELLO - Hello message (page 0xAA, 0xFF)
        register Hello {
            const ADDRESS = 0xAAFF;
            const SIZE_BITS = 16;

            /// Message word
            value: uint = 0..16,
        },

        /// READABLE_VALUE - Readable value (page 0x10, 0xA0)
        register ReadableValue {
            const ADDRESS = 0x10A0;
            const SIZE_BITS = 8;

            /// Value reported by the device
            value: uint = 0..8,
        },
    }
);
