//! binobj-core
//!
//! Classifies a binary as PE, ELF or Mach-O and describes it as a set of
//! MISP-style records: a `file` object, one format object, and the format
//! object's sections.
//!
//! Parsing is delegated to a [`BinaryParser`]; with the default
//! `goblin-parser` feature that is [`GoblinParser`]. Everything else here is
//! wiring between the parser's output and the record model.

pub mod binary;
pub mod create;
pub mod error;
pub mod hashes;
pub mod header;
pub mod objects;
pub mod parser;
pub mod sections;

pub use binary::*;
pub use create::*;
pub use error::*;
pub use header::Header;
pub use objects::{MispObject, ObjectOptions};
pub use parser::*;
pub use sections::*;
