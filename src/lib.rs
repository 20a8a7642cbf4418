//! verex - verbal expressions for Rust
//!
//! Build regular expressions from readable method chains instead of raw
//! pattern syntax.
//!
//! ```
//! use verex::verex;
//!
//! let mut ex = verex();
//! ex.find("foo").begin_capture().then("bar").end_capture().then("baz");
//!
//! let m = ex.exec("foobarbaz")?.expect("should match");
//! assert_eq!(m.group(1), Some("bar"));
//! # Ok::<(), verex::EngineError>(())
//! ```

pub mod core;

pub use crate::core::*;
