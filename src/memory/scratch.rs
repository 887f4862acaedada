//! Scratch buffer allocation for swaps
//!
//! This module provides the transient buffers used by the swap routine:
//! - Explicit acquisition/release bracketing a single swap
//! - A configurable byte limit, so exhaustion can be exercised deterministically
//! - Fallible allocation through `Vec::try_reserve_exact`, so a refusal from the
//!   system allocator is reported instead of aborting
//! - Usage statistics for the memory view
//!
//! A [`ScratchBuffer`] is not `Clone` and is consumed by
//! [`ScratchAllocator::release`], so a buffer cannot be reused across swaps.

use crate::memory::constants::DEFAULT_SCRATCH_LIMIT;
use crate::session::errors::SwapError;

/// A transient buffer sized exactly for one swap
#[derive(Debug)]
pub struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Running totals of scratch usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScratchStats {
    pub acquisitions: usize,
    pub releases: usize,
    pub live_bytes: usize,
    pub peak_bytes: usize,
}

/// Hands out scratch buffers under a byte limit
#[derive(Debug, Clone)]
pub struct ScratchAllocator {
    limit: usize,
    stats: ScratchStats,
}

impl ScratchAllocator {
    /// Create an allocator that never holds more than `limit` live bytes
    pub fn new(limit: usize) -> Self {
        ScratchAllocator {
            limit,
            stats: ScratchStats::default(),
        }
    }

    /// Acquire a zeroed buffer of exactly `size` bytes
    pub fn acquire(&mut self, size: usize) -> Result<ScratchBuffer, SwapError> {
        let out_of_memory = SwapError::OutOfMemory {
            requested: size,
            limit: self.limit,
        };
        match self.stats.live_bytes.checked_add(size) {
            Some(total) if total <= self.limit => {}
            _ => return Err(out_of_memory),
        }

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| SwapError::AllocationFailed { requested: size })?;
        data.resize(size, 0);

        self.stats.acquisitions += 1;
        self.stats.live_bytes += size;
        self.stats.peak_bytes = self.stats.peak_bytes.max(self.stats.live_bytes);
        log::trace!("scratch: acquired {} bytes ({} live)", size, self.stats.live_bytes);

        Ok(ScratchBuffer { data })
    }

    /// Return a buffer; its memory is dropped here
    pub fn release(&mut self, buffer: ScratchBuffer) {
        self.stats.releases += 1;
        self.stats.live_bytes -= buffer.len();
        log::trace!(
            "scratch: released {} bytes ({} live)",
            buffer.len(),
            self.stats.live_bytes
        );
    }

    pub fn stats(&self) -> ScratchStats {
        self.stats
    }
}

impl Default for ScratchAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_SCRATCH_LIMIT)
    }
}
