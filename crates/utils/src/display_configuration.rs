use colored::Colorize;

/// One line of `check` output: a configuration record and where its deployment target stands
/// against the threshold.
#[must_use]
pub fn display_configuration(
    configuration: &str,
    current: Option<&str>,
    threshold: &str,
    needs_update: bool,
) -> String {
    let current = current.unwrap_or("unset");
    if needs_update {
        format!(
            "{} {} {} {}",
            format!("[{configuration}]").bright_blue().bold(),
            current.bright_red(),
            "→".bright_cyan(),
            threshold.bright_green()
        )
    } else {
        format!(
            "{} {} {}",
            format!("[{configuration}]").bright_blue().bold(),
            current.bright_green(),
            "(ok)".bright_black()
        )
    }
}
