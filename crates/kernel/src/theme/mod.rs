//! Theme engine and template rendering.
//!
//! Page templates are compiled into the binary and may be replaced one by
//! one from a directory at startup.

mod engine;

pub use engine::ThemeEngine;
