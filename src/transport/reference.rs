//! Scripted reference transport
//!
//! Behaves like the black-box device driver the register layer was first
//! brought up against:
//! - devices `1..=9` can be opened and the parameter doubles as the identifier
//! - writes are accepted and logged
//! - reads return a fixed answer (42 unless configured) in the first byte

use core::ops::RangeInclusive;

use super::{DeviceId, Transport};

/// Device parameters accepted by [`ReferenceTransport::open`]
pub const ACCEPTED_PARAMS: RangeInclusive<u8> = 1..=9;

/// Answer returned by reads unless configured otherwise
pub const DEFAULT_ANSWER: u8 = 42;

/// Reference transport with scripted read results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceTransport {
    answer: u8,
}

impl ReferenceTransport {
    /// Create a transport answering reads with [`DEFAULT_ANSWER`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            answer: DEFAULT_ANSWER,
        }
    }

    /// Create a transport answering reads with `answer`
    #[must_use]
    pub const fn with_answer(answer: u8) -> Self {
        Self { answer }
    }

    /// Byte placed first in every read buffer
    #[must_use]
    pub const fn answer(&self) -> u8 {
        self.answer
    }
}

impl Default for ReferenceTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn transferred(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

impl Transport for ReferenceTransport {
    fn open(&mut self, param: u8) -> DeviceId {
        if ACCEPTED_PARAMS.contains(&param) {
            DeviceId::new(param)
        } else {
            DeviceId::INVALID
        }
    }

    fn close(&mut self, id: DeviceId) {
        #[cfg(feature = "defmt")]
        defmt::trace!("device[{=u8:02X}] closed", id.raw());
        let _ = id;
    }

    fn write(&mut self, id: DeviceId, page: u8, address: u8, data: &[u8]) -> i32 {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "device[{=u8:02X}] page[{=u8:02X}] address[{=u8:02X}] write {=[u8]:02X}",
            id.raw(),
            page,
            address,
            data
        );
        let _ = (id, page, address);
        transferred(data.len())
    }

    fn read(&mut self, id: DeviceId, page: u8, address: u8, buf: &mut [u8]) -> i32 {
        buf.fill(0);
        if let Some(first) = buf.first_mut() {
            *first = self.answer;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "device[{=u8:02X}] page[{=u8:02X}] address[{=u8:02X}] read {=[u8]:02X}",
            id.raw(),
            page,
            address,
            &buf[..]
        );
        let _ = (id, page, address);
        transferred(buf.len())
    }
}
