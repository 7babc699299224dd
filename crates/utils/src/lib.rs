mod compare_versions;
mod detect_indent;
mod display_configuration;
mod get_xcodepatch_config;

pub use compare_versions::{DottedNumericComparator, compare_versions};
pub use detect_indent::{detect_indent, line_indent};
pub use display_configuration::display_configuration;
pub use get_xcodepatch_config::{get_xcodepatch_config, get_xcodepatch_dir};
