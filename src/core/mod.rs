//! Expression building and compilation
//!
//! This module contains the builder, the literal sanitizer, the flag
//! registry and the glue to the regex engines.

pub mod chain;
pub mod engine;
pub mod expression;
pub mod flags;
pub mod pattern;
pub mod sanitize;

// Re-export commonly used types
pub use chain::{build, parse_chain, Step};
pub use engine::{
    AutoEngine, CompiledPattern, CompiledRegex, Engine, EngineError, EngineType, ForcedEngine,
    Match,
};
pub use expression::{verex, Expression};
pub use flags::{Flag, Flags};
pub use pattern::Pattern;
pub use sanitize::{sanitize, CharSet, Literal};
