//! `device-driver` register interface for open devices
//!
//! Register blocks generated with [`device_driver::create_device!`] address
//! registers with a single integer. An open [`Device`] implements
//! [`RegisterInterface`] with a `u16` address type, where the high byte is the
//! page and the low byte the address on that page (see
//! [`RegisterAddress::to_u16`]). Any generated block with
//! `type RegisterAddressType = u16;` can therefore run over any
//! [`Transport`].
//!
//! ```ignore
//! let device = Device::open(&mut transport, 1)?;
//! let mut block = registers::Demo::new(device);
//! block.hello().write(|w| w.set_value(0x0100))?;
//! ```

use device_driver::RegisterInterface;

use crate::device::Device;
use crate::register::RegisterAddress;
use crate::transport::Transport;
use crate::Error;

impl<T: Transport> RegisterInterface for Device<T> {
    type Error = Error;
    type AddressType = u16;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len()
        let location = RegisterAddress::from_u16(address);
        self.read_raw(location.page, location.address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len()
        let location = RegisterAddress::from_u16(address);
        self.write_raw(location.page, location.address, write_data)
    }
}
