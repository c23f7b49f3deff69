//! quill_core: Core utilities for the Quill parser.
//!
//! Provides text positions and ranges, string interning, ordered collections
//! and the fatal error type shared by every stage of the pipeline.

pub mod collections;
pub mod error;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use error::FatalError;
pub use intern::{global_interner, reset_global_interner, InternedString, StringInterner};
pub use text::{LineMap, TextPos, TextRange, TextSpan};
