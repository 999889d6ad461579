#![no_std]

pub mod keycodes;

/// The numeric value a firmware protocol stores for one key.
pub type Byte = u16;
