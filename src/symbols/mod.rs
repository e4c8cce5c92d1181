// src/symbols/mod.rs
pub mod ticker;

pub use ticker::normalize_ticker;
