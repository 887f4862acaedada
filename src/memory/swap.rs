//! Byte-region swap
//!
//! [`swap_regions`] exchanges two equal-size regions of a [`StackFrame`]
//! through a scratch buffer. [`swap_slots`] is the typed front door: both
//! handles carry the same [`Scalar`] type, so the byte count comes from the
//! type instead of the caller.
//!
//! All preconditions are checked before the first byte moves. Once the scratch
//! buffer is in hand the three copies cannot fail, so a swap is either complete
//! or has not touched memory at all.

use super::scratch::ScratchAllocator;
use super::stack::StackFrame;
use super::value::{Address, Scalar, SlotRef, NULL_ADDRESS};
use crate::session::errors::SwapError;

/// Exchange `size` bytes at `a` with `size` bytes at `b`
pub fn swap_regions(
    frame: &mut StackFrame,
    a: Address,
    b: Address,
    size: usize,
    scratch: &mut ScratchAllocator,
) -> Result<(), SwapError> {
    if a == NULL_ADDRESS || b == NULL_ADDRESS {
        return Err(SwapError::NullRegion);
    }

    if size == 0 {
        return Ok(());
    }

    let offset_a = frame
        .offset_of(a, size)
        .map_err(|_| SwapError::OutOfBounds { address: a, size })?;
    let offset_b = frame
        .offset_of(b, size)
        .map_err(|_| SwapError::OutOfBounds { address: b, size })?;

    if offset_a < offset_b + size && offset_b < offset_a + size {
        return Err(SwapError::Overlap { a, b, size });
    }

    let mut buffer = scratch.acquire(size)?;

    let data = frame.data_mut();
    buffer
        .as_mut_slice()
        .copy_from_slice(&data[offset_a..offset_a + size]);
    data.copy_within(offset_b..offset_b + size, offset_a);
    data[offset_b..offset_b + size].copy_from_slice(buffer.as_slice());

    scratch.release(buffer);

    frame.swap_init_flags(offset_a, offset_b, size);

    log::debug!("swapped {} bytes between 0x{:x} and 0x{:x}", size, a, b);
    Ok(())
}

/// Exchange the values held by two slots of the same type
pub fn swap_slots<T: Scalar>(
    frame: &mut StackFrame,
    a: SlotRef<T>,
    b: SlotRef<T>,
    scratch: &mut ScratchAllocator,
) -> Result<(), SwapError> {
    swap_regions(frame, a.address(), b.address(), T::SIZE, scratch)
}
