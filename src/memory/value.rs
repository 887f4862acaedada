//! Scalar value representation
//!
//! This module defines the [`Scalar`] trait, implemented by every plain-data
//! type that can live in a stack slot, and [`SlotRef`], the typed handle used
//! to address a slot.
//!
//! # Encoding
//!
//! Scalars are stored little-endian, with the same fixed sizes Rust gives
//! them (`i32` is 4 bytes, `i64` is 8 bytes, and so on). There is no padding.

use std::fmt;
use std::marker::PhantomData;

/// Memory address type (64-bit)
pub type Address = u64;

/// The null address. No slot is ever placed here.
pub const NULL_ADDRESS: Address = 0;

/// A fixed-size plain-data value that can be stored in a stack slot
pub trait Scalar: Copy + fmt::Debug + fmt::Display {
    /// Size of the encoded value in bytes
    const SIZE: usize;

    /// Human-readable type name shown in the memory view
    const TYPE_NAME: &'static str;

    /// Encode into exactly `SIZE` little-endian bytes
    fn write_bytes(&self, out: &mut [u8]);

    /// Decode from exactly `SIZE` little-endian bytes
    fn read_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();
                const TYPE_NAME: &'static str = $name;

                fn write_bytes(&self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }

                fn read_bytes(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => "char",
    i16 => "short",
    i32 => "int",
    i64 => "long",
    u8 => "uchar",
    u32 => "uint",
    u64 => "ulong",
}

/// Typed handle to a slot in a [`StackFrame`](super::stack::StackFrame)
///
/// The handle only records where the slot lives and what it holds; the frame
/// owns the bytes. Two handles of the same `T` always describe regions of the
/// same size, which is what makes [`swap_slots`](super::swap::swap_slots)
/// size-safe.
pub struct SlotRef<T: Scalar> {
    address: Address,
    _marker: PhantomData<T>,
}

impl<T: Scalar> SlotRef<T> {
    pub(crate) fn new(address: Address) -> Self {
        SlotRef {
            address,
            _marker: PhantomData,
        }
    }

    /// Address of the first byte of the slot
    pub fn address(&self) -> Address {
        self.address
    }

    /// Size of the slot in bytes
    pub fn size(&self) -> usize {
        T::SIZE
    }
}

// Manual impls: derives would add a `T: Clone`/`T: PartialEq` bound we don't need.
impl<T: Scalar> Clone for SlotRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for SlotRef<T> {}

impl<T: Scalar> PartialEq for SlotRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl<T: Scalar> Eq for SlotRef<T> {}

impl<T: Scalar> fmt::Debug for SlotRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotRef<{}>(0x{:08x})", T::TYPE_NAME, self.address)
    }
}
