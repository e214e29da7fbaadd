//! The binary-parsing capability the dispatcher depends on.
//!
//! The parser is passed in as `Option<&dyn BinaryParser>` so callers (and
//! tests) decide whether one is available. [`default_parser`] returns the
//! implementation compiled into this crate, if any.

#[cfg(feature = "goblin-parser")]
mod goblin_backend;

#[cfg(feature = "goblin-parser")]
pub use goblin_backend::GoblinParser;

use crate::{ParseResult, ParsedBinary};

/// Classifies raw bytes as PE, ELF or Mach-O.
pub trait BinaryParser: Send + Sync {
    /// Returns `Ok(None)` when the bytes are not a format this parser handles.
    fn parse(&self, data: &[u8], name: &str) -> ParseResult<Option<ParsedBinary>>;
}

/// The parser built into this crate, or `None` when built without one.
pub fn default_parser() -> Option<&'static dyn BinaryParser> {
    #[cfg(feature = "goblin-parser")]
    {
        Some(&GoblinParser)
    }
    #[cfg(not(feature = "goblin-parser"))]
    {
        None
    }
}
