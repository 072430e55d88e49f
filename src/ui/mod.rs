//! Rendering layer — ratatui widgets and layout.

pub mod grid;
pub mod layout;
pub mod search;
pub mod spinner;
pub mod theme;
