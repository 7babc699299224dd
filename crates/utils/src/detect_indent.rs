/// Detects the indentation unit (tab, 4 spaces or 2 spaces) of a descriptor file.
///
/// Scans content line-by-line and returns the leading whitespace style of the first indented
/// line. Xcode writes tabs, so tab is the default when nothing is indented.
#[must_use]
pub fn detect_indent(content: &str) -> &'static str {
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('\t') {
            return "\t";
        } else if line.starts_with("    ") {
            return "    ";
        } else if line.starts_with("  ") {
            return "  ";
        }
    }
    "\t"
}

/// Leading whitespace of the line containing byte `offset`.
#[must_use]
pub fn line_indent(content: &str, offset: usize) -> &str {
    let offset = offset.min(content.len());
    let start = content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let line = &content[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}
