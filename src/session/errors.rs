//! Error types for the swap session
//!
//! [`SwapError`] covers everything the byte-region swap can refuse to do.
//! [`SessionError`] is what ends a session early.
//!
//! Only allocation failures are fatal. A rejected precondition is reported and
//! the session moves on; malformed operator input never surfaces here at all
//! unless a retry cap is configured.

use crate::memory::value::Address;
use std::fmt;
use std::io;

/// Reasons a swap did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// One of the region addresses is null
    NullRegion,

    /// A region extends outside the frame
    OutOfBounds { address: Address, size: usize },

    /// The two regions share at least one byte
    Overlap { a: Address, b: Address, size: usize },

    /// Scratch acquisition would exceed the configured limit
    OutOfMemory { requested: usize, limit: usize },

    /// The system allocator refused the scratch buffer
    AllocationFailed { requested: usize },
}

impl SwapError {
    /// Whether the session must stop after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SwapError::OutOfMemory { .. } | SwapError::AllocationFailed { .. }
        )
    }
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::NullRegion => write!(f, "Cannot swap using null pointers."),
            SwapError::OutOfBounds { address, size } => {
                write!(
                    f,
                    "Cannot swap: {} bytes at 0x{:x} lie outside the stack frame.",
                    size, address
                )
            }
            SwapError::Overlap { a, b, size } => {
                write!(
                    f,
                    "Cannot swap overlapping regions: {} bytes at 0x{:x} and 0x{:x}.",
                    size, a, b
                )
            }
            SwapError::OutOfMemory { requested, limit } => {
                write!(
                    f,
                    "Out of memory: scratch buffer of {} bytes exceeds limit of {}",
                    requested, limit
                )
            }
            SwapError::AllocationFailed { requested } => {
                write!(
                    f,
                    "Allocation failed: could not acquire {} byte scratch buffer",
                    requested
                )
            }
        }
    }
}

impl std::error::Error for SwapError {}

/// Conditions that end a session before the operator declines to repeat
#[derive(Debug)]
pub enum SessionError {
    /// Reading or writing the console failed
    Io(io::Error),

    /// Input ended while a prompt was waiting
    InputClosed { prompt: String },

    /// Scripted mode gave up after too many malformed answers
    RetriesExhausted { prompt: String, attempts: usize },

    /// A fatal swap failure
    Swap(SwapError),
}

impl SessionError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionError::InputClosed { .. } => 0,
            SessionError::Swap(_) | SessionError::Io(_) => 1,
            SessionError::RetriesExhausted { .. } => 2,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "Console I/O failed: {}", e),
            SessionError::InputClosed { prompt } => {
                write!(f, "Input closed while waiting for: {}", prompt.trim_end())
            }
            SessionError::RetriesExhausted { prompt, attempts } => {
                write!(
                    f,
                    "Gave up after {} invalid attempt{} at: {}",
                    attempts,
                    if *attempts == 1 { "" } else { "s" },
                    prompt.trim_end()
                )
            }
            SessionError::Swap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) => Some(e),
            SessionError::Swap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<SwapError> for SessionError {
    fn from(e: SwapError) -> Self {
        SessionError::Swap(e)
    }
}
