//! El Attaouia Association website library
//!
//! Locale negotiation, the locale prefix guard, content access and page
//! rendering. The `attaouia` binary wires these into a server; integration
//! tests drive the same router.

pub mod config;
pub mod content;
pub mod error;
pub mod locale;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod theme;
