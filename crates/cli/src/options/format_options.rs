use clap::ValueEnum;

/// CLI output format selection.
///
/// Controls whether commands print human-readable output or JSON for build pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatOptions {
    /// JSON format for build pipelines
    #[value(name = "json")]
    Json,
    /// Human-readable colored terminal output
    #[value(name = "stdout")]
    Stdout,
}

impl FormatOptions {
    pub fn print(&self, stdout_msg: &str, json_msg: &str) {
        match self {
            Self::Stdout => println!("{stdout_msg}"),
            Self::Json => println!("{json_msg}"),
        }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FormatOptions::Json, true)]
    #[case(FormatOptions::Stdout, false)]
    fn test_format_options_is_json(#[case] format: FormatOptions, #[case] expected: bool) {
        assert_eq!(format.is_json(), expected);
    }

    #[rstest]
    #[case("json", FormatOptions::Json)]
    #[case("stdout", FormatOptions::Stdout)]
    fn test_format_options_from_str(#[case] input: &str, #[case] expected: FormatOptions) {
        assert_eq!(FormatOptions::from_str(input, false).unwrap(), expected);
    }
}
