//! # xcodepatch-pbxproj
//!
//! Reader and writer for Xcode `project.pbxproj` files (OpenStep property lists).
//! Documents keep their source text; edits splice new values into it, so comments, section
//! markers and whitespace survive a round trip and an unedited document is written back
//! byte for byte.

pub mod document;
pub mod format;
pub mod parser;
pub mod quote;
pub mod value;

pub use document::{BUILD_CONFIGURATION_ISA, PbxprojDocument};
pub use format::PbxprojFormat;
