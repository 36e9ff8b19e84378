//! Command implementations

pub mod gather;

pub use gather::*;
