//! Virtual stack frame
//!
//! A [`StackFrame`] is a contiguous block of bytes with named slots laid out
//! one after another, starting at [`STACK_ADDRESS_START`]. Slots are declared
//! once and live as long as the frame.
//!
//! # Initialization Tracking
//!
//! Every byte carries an initialization bit. Declaring a slot leaves it
//! uninitialized; writing a value marks it initialized. Swapping moves the
//! initialization bits together with the bytes.

use super::value::{Address, Scalar, SlotRef, NULL_ADDRESS};
use crate::memory::constants::STACK_ADDRESS_START;
use rustc_hash::FxHashMap;

/// Metadata for a declared slot
#[derive(Debug, Clone)]
pub struct SlotInfo {
    pub name: String,
    pub address: Address,
    pub size: usize,
    pub type_name: &'static str,
    render: fn(&[u8]) -> String, // Decodes the slot's bytes for display
}

impl SlotInfo {
    /// Decode `bytes` as this slot's scalar type
    pub fn render(&self, bytes: &[u8]) -> String {
        (self.render)(bytes)
    }
}

fn render_scalar<T: Scalar>(bytes: &[u8]) -> String {
    T::read_bytes(bytes).to_string()
}

/// A single activation record holding named value slots
#[derive(Debug, Clone)]
pub struct StackFrame {
    pub function_name: String,
    base: Address,
    data: Vec<u8>,
    init_map: Vec<bool>,
    slots: FxHashMap<String, SlotInfo>,
    insertion_order: Vec<String>, // Declaration order, for display
}

impl StackFrame {
    pub fn new(function_name: impl Into<String>) -> Self {
        StackFrame {
            function_name: function_name.into(),
            base: STACK_ADDRESS_START,
            data: Vec::new(),
            init_map: Vec::new(),
            slots: FxHashMap::default(),
            insertion_order: Vec::new(),
        }
    }

    /// Declare a new slot of type `T` at the end of the frame
    pub fn declare<T: Scalar>(&mut self, name: &str) -> Result<SlotRef<T>, String> {
        if self.slots.contains_key(name) {
            return Err(format!("Slot '{}' is already declared", name));
        }

        let address = self.base + self.data.len() as Address;
        self.data.resize(self.data.len() + T::SIZE, 0);
        self.init_map.resize(self.data.len(), false);
        self.slots.insert(
            name.to_string(),
            SlotInfo {
                name: name.to_string(),
                address,
                size: T::SIZE,
                type_name: T::TYPE_NAME,
                render: render_scalar::<T>,
            },
        );
        self.insertion_order.push(name.to_string());

        Ok(SlotRef::new(address))
    }

    /// Look up a slot by name
    pub fn slot(&self, name: &str) -> Option<&SlotInfo> {
        self.slots.get(name)
    }

    /// All slots in declaration order
    pub fn slots(&self) -> impl Iterator<Item = &SlotInfo> {
        self.insertion_order
            .iter()
            .filter_map(move |name| self.slots.get(name))
    }

    /// Write a value into a slot
    pub fn write<T: Scalar>(&mut self, slot: SlotRef<T>, value: T) -> Result<(), String> {
        let offset = self.offset_of(slot.address(), T::SIZE)?;
        value.write_bytes(&mut self.data[offset..offset + T::SIZE]);
        self.mark_initialized(offset, T::SIZE);
        Ok(())
    }

    /// Read a value from a slot
    pub fn read<T: Scalar>(&self, slot: SlotRef<T>) -> Result<T, String> {
        let offset = self.offset_of(slot.address(), T::SIZE)?;
        if !self.is_initialized(offset, T::SIZE) {
            return Err(format!(
                "Uninitialized read at address 0x{:x}",
                slot.address()
            ));
        }
        Ok(T::read_bytes(&self.data[offset..offset + T::SIZE]))
    }

    /// Raw bytes of a region, without initialization checks
    pub fn bytes(&self, address: Address, size: usize) -> Result<&[u8], String> {
        let offset = self.offset_of(address, size)?;
        Ok(&self.data[offset..offset + size])
    }

    /// Whether every byte of a region has been written
    pub fn region_initialized(&self, address: Address, size: usize) -> bool {
        self.offset_of(address, size)
            .is_ok_and(|offset| self.is_initialized(offset, size))
    }

    /// First address of the frame
    pub fn base(&self) -> Address {
        self.base
    }

    /// Total size of all declared slots in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Translate an address range to an offset into `data`
    pub(crate) fn offset_of(&self, address: Address, size: usize) -> Result<usize, String> {
        if address == NULL_ADDRESS {
            return Err("Null address".to_string());
        }
        let end = self.base + self.data.len() as Address;
        if address < self.base || address.saturating_add(size as Address) > end {
            return Err(format!(
                "Buffer overrun: {} bytes at 0x{:x} fall outside frame [0x{:x}, 0x{:x})",
                size, address, self.base, end
            ));
        }
        Ok((address - self.base) as usize)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn mark_initialized(&mut self, offset: usize, size: usize) {
        for flag in &mut self.init_map[offset..offset + size] {
            *flag = true;
        }
    }

    /// Exchange initialization bits of two non-overlapping ranges
    pub(crate) fn swap_init_flags(&mut self, offset_a: usize, offset_b: usize, size: usize) {
        for i in 0..size {
            self.init_map.swap(offset_a + i, offset_b + i);
        }
    }

    fn is_initialized(&self, offset: usize, size: usize) -> bool {
        self.init_map[offset..offset + size].iter().all(|&b| b)
    }
}
