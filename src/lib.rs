//! # Introduction
//!
//! slotswap reads two integers from an operator, stores them in the slots of a
//! virtual stack frame, exchanges the slots' bytes through a scratch buffer,
//! and prints the values before and after. The loop repeats until the operator
//! declines.
//!
//! ## Pipeline
//!
//! ```text
//! stdin → InputReader → StackFrame slots → swap_slots → display → stdout
//!                                              ↓
//!                                   SwapSnapshot → memory view
//! ```
//!
//! 1. [`session`]: the prompt/swap/confirm state machine, operator input,
//!    result formatting and diagnostics.
//! 2. [`memory`]: the memory model, with [`memory::value::Scalar`] values in a
//!    [`memory::stack::StackFrame`], swapped by [`memory::swap::swap_slots`]
//!    with buffers from [`memory::scratch::ScratchAllocator`].
//! 3. [`snapshot`]: frame captures taken around each swap.
//! 4. [`ui`]: ratatui rendering of the stack frame pane.
//! 5. [`config`] and [`logging`]: command line and stderr logging for the
//!    binary.

pub mod config;
pub mod logging;
pub mod memory;
pub mod session;
pub mod snapshot;
pub mod ui;
