mod config_overrides;
mod format_options;

pub use config_overrides::ConfigOverrides;
pub use format_options::FormatOptions;
