//! Core data types: wire enums, order request/record, symbol helpers.

pub mod enums;
pub mod order;
pub mod symbol;

pub use enums::*;
pub use order::*;
pub use symbol::*;
