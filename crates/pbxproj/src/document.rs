use std::path::{Path, PathBuf};

use xcodepatch_core::{
    BuildConfiguration, COMMENT_KEY_SUFFIX, ConfigurationSection, DescriptorIoError,
    ProjectDescriptor, SectionEntry,
};
use xcodepatch_utils::{detect_indent, line_indent};

use crate::{
    parser::{SyntaxError, line_column, parse},
    quote::quote_value,
    value::{Dict, Entry, Value},
};

pub const BUILD_CONFIGURATION_ISA: &str = "XCBuildConfiguration";

/// A parsed `project.pbxproj`.
///
/// Edits are spliced into the original text and the text is parsed again, so bytes outside
/// an edited value are never rewritten.
#[derive(Debug, Clone)]
pub struct PbxprojDocument {
    path: PathBuf,
    source: String,
    root: Dict,
}

impl PbxprojDocument {
    /// # Errors
    /// Returns error if `source` is not a valid pbxproj property list.
    pub fn parse(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Result<Self, DescriptorIoError> {
        let path = path.into();
        let source = source.into();
        let root = parse(&source).map_err(|err| syntax_error(&path, &source, err))?;
        Ok(Self { path, source, root })
    }

    #[must_use]
    pub fn root(&self) -> &Dict {
        &self.root
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Entries of the `objects` dictionary whose `isa` equals `isa`, in document order.
    pub fn objects_of<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.root
            .get_dict("objects")
            .into_iter()
            .flat_map(|objects| objects.entries.iter())
            .filter(move |entry| {
                entry
                    .value
                    .as_dict()
                    .and_then(|object| object.get_str("isa"))
                    == Some(isa)
            })
    }

    fn build_settings(&self, key: &str) -> Option<&Dict> {
        self.objects_of(BUILD_CONFIGURATION_ISA)
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.as_dict())
            .and_then(|object| object.get_dict("buildSettings"))
    }

    fn splice(&mut self, start: usize, end: usize, text: &str) -> Result<(), DescriptorIoError> {
        let mut source = String::with_capacity(self.source.len() + text.len());
        source.push_str(&self.source[..start]);
        source.push_str(text);
        source.push_str(&self.source[end..]);
        let root = parse(&source).map_err(|err| DescriptorIoError::Edit {
            path: self.path.clone(),
            message: err.message,
        })?;
        self.source = source;
        self.root = root;
        Ok(())
    }

    /// Text inserting `setting = value;` as the last entry of `settings`.
    fn insertion(&self, settings: &Dict, setting: &str, value: &str) -> (usize, String) {
        let close = settings.close_offset();
        let close_indent = line_indent(&self.source, close);
        let line_start = self.source[..close].rfind('\n').map_or(0, |pos| pos + 1);
        let entry_indent = settings
            .entries
            .last()
            .map(|entry| line_indent(&self.source, entry.value.span().start))
            .filter(|indent| indent.len() > close_indent.len())
            .map_or_else(
                || format!("{close_indent}{}", detect_indent(&self.source)),
                str::to_string,
            );
        let line = format!(
            "{entry_indent}{} = {};",
            quote_value(setting),
            quote_value(value)
        );
        if self.source[line_start..close].trim().is_empty() {
            // closing brace sits on its own line
            (line_start, format!("{line}\n"))
        } else {
            (close, format!("\n{line}\n{close_indent}"))
        }
    }
}

fn syntax_error(path: &Path, source: &str, err: SyntaxError) -> DescriptorIoError {
    let (line, column) = line_column(source, err.offset);
    DescriptorIoError::Parse {
        path: path.to_path_buf(),
        line,
        column,
        message: err.message,
    }
}

impl ProjectDescriptor for PbxprojDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn configuration_section(&self) -> ConfigurationSection {
        let mut section = Vec::new();
        for entry in self.objects_of(BUILD_CONFIGURATION_ISA) {
            let Some(object) = entry.value.as_dict() else {
                continue;
            };
            let build_settings = object
                .get_dict("buildSettings")
                .map(|settings| {
                    settings
                        .entries
                        .iter()
                        .filter_map(|setting| match &setting.value {
                            Value::String(scalar) => {
                                Some((setting.key.clone(), scalar.text.clone()))
                            }
                            _ => None,
                        })
                        .collect()
                })
                .unwrap_or_default();
            section.push((
                entry.key.clone(),
                SectionEntry::Record(BuildConfiguration {
                    name: object.get_str("name").map(str::to_string),
                    build_settings,
                }),
            ));
            if let Some(annotation) = &entry.annotation {
                section.push((
                    format!("{}{COMMENT_KEY_SUFFIX}", entry.key),
                    SectionEntry::Comment(annotation.clone()),
                ));
            }
        }
        section
    }

    fn set_build_setting(
        &mut self,
        key: &str,
        setting: &str,
        value: &str,
    ) -> Result<(), DescriptorIoError> {
        let Some(settings) = self.build_settings(key) else {
            return Err(DescriptorIoError::Edit {
                path: self.path.clone(),
                message: format!("no {BUILD_CONFIGURATION_ISA} with buildSettings keyed {key}"),
            });
        };
        match settings.get(setting) {
            Some(existing) => {
                if existing.as_str() == Some(value) {
                    return Ok(());
                }
                let span = existing.span();
                self.splice(span.start, span.end, &quote_value(value))
            }
            None => {
                let (offset, text) = self.insertion(settings, setting, value);
                self.splice(offset, offset, &text)
            }
        }
    }

    fn to_source(&self) -> String {
        self.source.clone()
    }
}
