//! I2C transport for paged register devices
//!
//! Many I2C peripherals expose more registers than fit in an 8-bit address by
//! splitting them into pages (banks). The active page is chosen by writing
//! its number to a page-select register that is reachable from every page,
//! `0x7F` by default.
//!
//! The device parameter passed to [`Transport::open`] is the 7-bit bus address
//! of the peripheral, which also serves as the [`DeviceId`].

use super::{DeviceId, Transport};

/// Default page-select register address
pub const DEFAULT_PAGE_SELECT: u8 = 0x7F;

/// Lowest non-reserved 7-bit I2C address
pub const FIRST_BUS_ADDRESS: u8 = 0x08;

/// Highest non-reserved 7-bit I2C address
pub const LAST_BUS_ADDRESS: u8 = 0x77;

/// Status returned when the bus reports an error
pub const BUS_ERROR: i32 = -1;

/// Status returned when a write does not fit in one transfer
pub const OVERSIZED: i32 = -2;

/// Largest payload accepted by a single write
const MAX_PAYLOAD: usize = 32;

/// I2C transport with page selection
pub struct I2cTransport<I2C> {
    i2c: I2C,
    page_select: u8,
    /// Last (bus address, page) selected
    selected: Option<(u8, u8)>,
}

impl<I2C> I2cTransport<I2C> {
    /// Create a new transport using the default page-select register (0x7F)
    ///
    /// # Example
    /// ```ignore
    /// let mut transport = I2cTransport::new(i2c);
    /// let mut device = Device::open(&mut transport, 0x68)?;
    /// ```
    pub const fn new(i2c: I2C) -> Self {
        Self::with_page_select(i2c, DEFAULT_PAGE_SELECT)
    }

    /// Create a new transport with a custom page-select register address
    pub const fn with_page_select(i2c: I2C, page_select: u8) -> Self {
        Self {
            i2c,
            page_select,
            selected: None,
        }
    }

    /// Page-select register address in use
    pub const fn page_select(&self) -> u8 {
        self.page_select
    }

    /// Consume the transport and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> I2cTransport<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn select_page(&mut self, bus_address: u8, page: u8) -> Result<(), I2C::Error> {
        if self.selected != Some((bus_address, page)) {
            // A failed select leaves the device page unknown
            self.selected = None;
            self.i2c.write(bus_address, &[self.page_select, page])?;
            self.selected = Some((bus_address, page));
        }
        Ok(())
    }
}

fn status<E: embedded_hal::i2c::Error>(result: Result<usize, E>) -> i32 {
    match result {
        Ok(len) => i32::try_from(len).unwrap_or(i32::MAX),
        Err(_error) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("I2C transfer failed: {}", defmt::Debug2Format(&_error.kind()));
            BUS_ERROR
        }
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn open(&mut self, param: u8) -> DeviceId {
        if (FIRST_BUS_ADDRESS..=LAST_BUS_ADDRESS).contains(&param) {
            DeviceId::new(param)
        } else {
            DeviceId::INVALID
        }
    }

    fn close(&mut self, id: DeviceId) {
        if matches!(self.selected, Some((bus_address, _)) if bus_address == id.raw()) {
            self.selected = None;
        }
    }

    fn write(&mut self, id: DeviceId, page: u8, address: u8, data: &[u8]) -> i32 {
        if data.len() > MAX_PAYLOAD {
            return OVERSIZED;
        }

        let bus_address = id.raw();
        let mut buffer = [0u8; MAX_PAYLOAD + 1];
        buffer[0] = address;
        buffer[1..=data.len()].copy_from_slice(data);

        let result = self
            .select_page(bus_address, page)
            .and_then(|()| self.i2c.write(bus_address, &buffer[..=data.len()]))
            .map(|()| data.len());

        // A write covering the page-select register changes the active page
        let select_offset = usize::from(self.page_select.wrapping_sub(address));
        if let Some(&new_page) = data.get(select_offset) {
            self.selected = result.as_ref().ok().map(|_| (bus_address, new_page));
        }
        status(result)
    }

    fn read(&mut self, id: DeviceId, page: u8, address: u8, buf: &mut [u8]) -> i32 {
        let bus_address = id.raw();
        let len = buf.len();

        let result = self
            .select_page(bus_address, page)
            .and_then(|()| self.i2c.write_read(bus_address, &[address], buf))
            .map(|()| len);
        status(result)
    }
}
