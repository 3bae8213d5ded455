//! Mock transport implementation for testing the register layer

use paged_regs::{DeviceId, Transport};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Records operations performed on the mock transport
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open call
    Open {
        /// Device parameter passed in
        param: u8,
        /// Identifier that was returned
        id: DeviceId,
    },
    /// Close call
    Close {
        /// Identifier being released
        id: DeviceId,
    },
    /// Write call
    Write {
        /// Device identifier
        id: DeviceId,
        /// Page written
        page: u8,
        /// Address written
        address: u8,
        /// Bytes handed to the transport
        data: Vec<u8>,
    },
    /// Read call
    Read {
        /// Device identifier
        id: DeviceId,
        /// Page read
        page: u8,
        /// Address read
        address: u8,
        /// Requested length
        len: usize,
    },
}

/// Shared state for mock transport (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated memory (page, address) -> byte
    memory: HashMap<(u8, u8), u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection
    reject_open: bool,
    fail_next_read: Option<i32>,
    fail_next_write: Option<i32>,
    fail_all_reads: Option<i32>,
    short_next_read: Option<usize>,
}

impl MockState {
    fn new() -> Self {
        Self {
            memory: HashMap::new(),
            operations: Vec::new(),
            reject_open: false,
            fail_next_read: None,
            fail_next_write: None,
            fail_all_reads: None,
            short_next_read: None,
        }
    }

    fn count(&self, predicate: impl Fn(&Operation) -> bool) -> usize {
        self.operations.iter().filter(|op| predicate(op)).count()
    }
}

/// Mock transport for testing
///
/// Accepts device parameters `1..=9`, like the reference driver, and stores
/// written bytes so they can be read back.
#[derive(Clone)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    /// Create a new mock transport with empty memory
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a byte of device memory
    pub fn set_byte(&self, page: u8, address: u8, value: u8) {
        self.state
            .borrow_mut()
            .memory
            .insert((page, address), value);
    }

    /// Get a byte of device memory
    pub fn byte(&self, page: u8, address: u8) -> u8 {
        self.state
            .borrow()
            .memory
            .get(&(page, address))
            .copied()
            .unwrap_or(0)
    }

    /// Refuse every open call
    pub fn reject_open(&self) {
        self.state.borrow_mut().reject_open = true;
    }

    /// Inject a read failure with `code` on the next read operation
    pub fn fail_next_read(&self, code: i32) {
        self.state.borrow_mut().fail_next_read = Some(code);
    }

    /// Inject a write failure with `code` on the next write operation
    pub fn fail_next_write(&self, code: i32) {
        self.state.borrow_mut().fail_next_write = Some(code);
    }

    /// Make every read fail with `code`
    pub fn fail_all_reads(&self, code: i32) {
        self.state.borrow_mut().fail_all_reads = Some(code);
    }

    /// Report `len` bytes read on the next read operation
    pub fn short_next_read(&self, len: usize) {
        self.state.borrow_mut().short_next_read = Some(len);
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Count close operations
    pub fn close_count(&self) -> usize {
        self.state
            .borrow()
            .count(|op| matches!(op, Operation::Close { .. }))
    }

    /// Count read and write operations
    pub fn io_count(&self) -> usize {
        self.state
            .borrow()
            .count(|op| matches!(op, Operation::Read { .. } | Operation::Write { .. }))
    }

    /// Data of every write, in order
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Write { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Requested length of every read, in order
    pub fn read_lengths(&self) -> Vec<usize> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Read { len, .. } => Some(*len),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn length(len: usize) -> i32 {
    i32::try_from(len).unwrap()
}

impl Transport for MockTransport {
    fn open(&mut self, param: u8) -> DeviceId {
        let mut state = self.state.borrow_mut();

        let id = if state.reject_open || param == 0 || param > 9 {
            DeviceId::INVALID
        } else {
            DeviceId::new(param)
        };

        state.operations.push(Operation::Open { param, id });
        id
    }

    fn close(&mut self, id: DeviceId) {
        self.state
            .borrow_mut()
            .operations
            .push(Operation::Close { id });
    }

    fn write(&mut self, id: DeviceId, page: u8, address: u8, data: &[u8]) -> i32 {
        let mut state = self.state.borrow_mut();

        state.operations.push(Operation::Write {
            id,
            page,
            address,
            data: data.to_vec(),
        });

        // Check for injected failure
        if let Some(code) = state.fail_next_write.take() {
            return code;
        }

        for (i, &byte) in data.iter().enumerate() {
            state.memory.insert((page, address.wrapping_add(i as u8)), byte);
        }

        length(data.len())
    }

    fn read(&mut self, id: DeviceId, page: u8, address: u8, buf: &mut [u8]) -> i32 {
        let mut state = self.state.borrow_mut();

        state.operations.push(Operation::Read {
            id,
            page,
            address,
            len: buf.len(),
        });

        // Check for injected failures
        if let Some(code) = state.fail_next_read.take() {
            return code;
        }
        if let Some(code) = state.fail_all_reads {
            return code;
        }

        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = state
                .memory
                .get(&(page, address.wrapping_add(i as u8)))
                .copied()
                .unwrap_or(0);
        }

        match state.short_next_read.take() {
            Some(len) => length(len),
            None => length(buf.len()),
        }
    }
}
