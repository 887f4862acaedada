//! Memory model for the swapper
//!
//! This module provides the core memory abstractions:
//! - [`value`]: The [`value::Scalar`] trait and typed [`value::SlotRef`] handles
//! - [`stack`]: A virtual stack frame with named, contiguous value slots
//! - [`scratch`]: Transient scratch buffers with a byte limit
//! - [`swap`]: The byte-region swap routine
//!
//! # Addresses
//!
//! Slots are addressed like C locals: the frame starts at
//! [`constants::STACK_ADDRESS_START`] and each slot follows the previous one
//! with no padding. Address `0` is null and never resolves.
//!
//! ```text
//! 0x04  num1  int  [05 00 00 00]
//! 0x08  num2  int  [0a 00 00 00]
//! ```

pub mod constants;
pub mod scratch;
pub mod stack;
pub mod swap;
pub mod value;
