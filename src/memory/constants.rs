// Constants for the memory model

/// Starting address for stack slots
/// Stack addresses start at 0x00000004 so that no slot ever sits at the null address
pub const STACK_ADDRESS_START: u64 = 0x0000_0004;

/// Default cap on bytes held by live scratch buffers (1 MiB)
pub const DEFAULT_SCRATCH_LIMIT: usize = 1024 * 1024;
