//! Application layer — state, event plumbing, and input handling.

pub mod event;
pub mod handler;
pub mod search_runtime;
pub mod state;
