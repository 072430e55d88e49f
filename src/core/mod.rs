//! Core domain logic, UI-free.
//!
//! Everything here is pure data + functions so it can be unit tested
//! without a terminal.

pub mod grid;
pub mod search;
pub mod table;
