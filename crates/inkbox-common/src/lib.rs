//! Common utilities for the inkbox layout engine.
//!
//! This crate provides shared infrastructure used by all inkbox components:
//! - **Warning System** - deduplicated warnings for input the engine degrades on

pub mod warning;
