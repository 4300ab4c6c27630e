//! Various utility types and functions.

pub mod buf;
