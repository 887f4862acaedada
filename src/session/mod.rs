//! Interactive swap session
//!
//! This module drives the operator-facing loop:
//! - [`engine`]: The [`engine::Session`] state machine (prompting, swapping, done)
//! - [`input`]: Token input with re-prompting on malformed answers
//! - [`display`]: `message: a, b` result lines through a printer capability
//! - [`diagnostics`]: One-line, optionally colored, stderr reporting
//! - [`errors`]: Swap and session error types
//!
//! # Cycle
//!
//! ```text
//! read num1, num2 → "Before swap" → swap slots → "After swap" → repeat? → …
//! ```
//!
//! The only fatal condition is failing to acquire a scratch buffer. Everything
//! else is reported and the loop carries on.

pub mod constants;
pub mod diagnostics;
pub mod display;
pub mod engine;
pub mod errors;
pub mod input;
