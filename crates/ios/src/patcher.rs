use colored::Colorize;
use std::collections::BTreeSet;
use xcodepatch_core::{
    BuildConfiguration, Config, DescriptorFormat, DescriptorIoError, PatchReport,
    ProjectDescriptor, SectionEntry, SettingChange, VersionComparator, is_comment_key,
};

pub const DEPLOYMENT_TARGET_SETTING: &str = "IPHONEOS_DEPLOYMENT_TARGET";
pub const ENTITLEMENTS_SETTING: &str = "CODE_SIGN_ENTITLEMENTS";

/// Deployment target of one build configuration record against the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationStatus {
    pub configuration: String,
    pub deployment_target: Option<String>,
    pub needs_update: bool,
}

/// Raises the deployment target of every build configuration and wires the entitlements
/// file reference.
#[derive(Debug)]
pub struct ConfigurationPatcher {
    comparator: Box<dyn VersionComparator>,
    deployment_target: String,
    entitlements: Option<String>,
    quiet: bool,
}

/// Build configuration records of a descriptor with comment pseudo-entries removed.
fn records(descriptor: &dyn ProjectDescriptor) -> Vec<(String, BuildConfiguration)> {
    descriptor
        .configuration_section()
        .into_iter()
        .filter(|(key, _)| !is_comment_key(key))
        .filter_map(|(key, entry)| match entry {
            SectionEntry::Record(record) => Some((key, record)),
            SectionEntry::Comment(_) => None,
        })
        .collect()
}

fn label(key: &str, record: &BuildConfiguration) -> String {
    record.name.clone().unwrap_or_else(|| key.to_string())
}

impl ConfigurationPatcher {
    pub fn new(comparator: Box<dyn VersionComparator>, deployment_target: impl Into<String>) -> Self {
        Self {
            comparator,
            deployment_target: deployment_target.into(),
            entitlements: None,
            quiet: false,
        }
    }

    pub fn from_config(config: &Config, comparator: Box<dyn VersionComparator>) -> Self {
        Self::new(comparator, config.deployment_target.clone())
            .with_entitlements(config.entitlements.clone())
    }

    #[must_use]
    pub fn with_entitlements(mut self, entitlements: Option<String>) -> Self {
        self.entitlements = entitlements;
        self
    }

    /// Suppress the notice printed when something was updated.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn deployment_target(&self) -> &str {
        &self.deployment_target
    }

    #[must_use]
    pub fn needs_update(&self, current: Option<&str>) -> bool {
        current.is_none_or(|version| self.comparator.is_below(version, &self.deployment_target))
    }

    #[must_use]
    pub fn statuses(&self, descriptor: &dyn ProjectDescriptor) -> Vec<ConfigurationStatus> {
        records(descriptor)
            .into_iter()
            .map(|(key, record)| {
                let deployment_target = record
                    .setting(DEPLOYMENT_TARGET_SETTING)
                    .map(str::to_string);
                ConfigurationStatus {
                    configuration: label(&key, &record),
                    needs_update: self.needs_update(deployment_target.as_deref()),
                    deployment_target,
                }
            })
            .collect()
    }

    /// Updates the descriptor in memory without printing or writing anything.
    ///
    /// # Errors
    /// Returns error if the descriptor rejects an edit.
    pub fn apply(
        &self,
        descriptor: &mut dyn ProjectDescriptor,
    ) -> Result<PatchReport, DescriptorIoError> {
        let project_name = descriptor.project_name();
        let mut report = PatchReport::new(descriptor.path().to_path_buf(), project_name.clone());

        for (key, record) in records(descriptor) {
            let configuration = label(&key, &record);

            let current = record.setting(DEPLOYMENT_TARGET_SETTING);
            if self.needs_update(current) {
                descriptor.set_build_setting(
                    &key,
                    DEPLOYMENT_TARGET_SETTING,
                    &self.deployment_target,
                )?;
                report.push(SettingChange {
                    record: key.clone(),
                    configuration: configuration.clone(),
                    setting: DEPLOYMENT_TARGET_SETTING.to_string(),
                    from: current.map(str::to_string),
                    to: self.deployment_target.clone(),
                });
            }

            if let Some(file) = &self.entitlements
                && record.setting(ENTITLEMENTS_SETTING).is_none()
            {
                let reference = match &project_name {
                    Some(name) => format!("{name}/Resources/{file}"),
                    None => file.clone(),
                };
                descriptor.set_build_setting(&key, ENTITLEMENTS_SETTING, &reference)?;
                report.push(SettingChange {
                    record: key.clone(),
                    configuration,
                    setting: ENTITLEMENTS_SETTING.to_string(),
                    from: None,
                    to: reference,
                });
            }
        }
        Ok(report)
    }

    /// Applies the patch, prints a notice when something changed and writes the descriptor
    /// back. The descriptor is written even when nothing changed.
    ///
    /// # Errors
    /// Returns error if an edit is rejected or the descriptor cannot be written.
    pub async fn patch(
        &self,
        descriptor: &mut dyn ProjectDescriptor,
        format: &dyn DescriptorFormat,
    ) -> Result<PatchReport, DescriptorIoError> {
        let mut report = self.apply(descriptor)?;
        if report.is_updated() && !self.quiet {
            println!("{}", self.notice(&report));
        }
        format.write(descriptor).await?;
        report.set_written(true);
        Ok(report)
    }

    fn notice(&self, report: &PatchReport) -> String {
        let updated = report
            .changes()
            .iter()
            .map(|change| change.record.as_str())
            .collect::<BTreeSet<_>>();
        format!(
            "{} Updated {} build configuration(s) of {} (deployment target {})",
            "✓".bright_green().bold(),
            updated.len(),
            report
                .project_name()
                .unwrap_or("project")
                .bright_white()
                .bold(),
            self.deployment_target.bright_green()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::{
        path::{Path, PathBuf},
        sync::Mutex,
    };
    use xcodepatch_core::ConfigurationSection;
    use xcodepatch_pbxproj::PbxprojDocument;
    use xcodepatch_utils::DottedNumericComparator;

    fn patcher(threshold: &str) -> ConfigurationPatcher {
        ConfigurationPatcher::new(Box::new(DottedNumericComparator), threshold).quiet(true)
    }

    fn project(debug_settings: &str, release_settings: &str) -> String {
        format!(
            "// !$*UTF8*$!\n{{\n\tobjects = {{\n\
\t\tD1 /* Debug */ = {{\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {{\n{debug_settings}\t\t\t}};\n\t\t\tname = Debug;\n\t\t}};\n\
\t\tR1 /* Release */ = {{\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {{\n{release_settings}\t\t\t}};\n\t\t\tname = Release;\n\t\t}};\n\
\t}};\n}}\n"
        )
    }

    fn document(source: &str) -> PbxprojDocument {
        PbxprojDocument::parse("/p/platforms/ios/MyApp.xcodeproj/project.pbxproj", source).unwrap()
    }

    fn targets(descriptor: &dyn ProjectDescriptor) -> Vec<Option<String>> {
        records(descriptor)
            .into_iter()
            .map(|(_, record)| {
                record
                    .setting(DEPLOYMENT_TARGET_SETTING)
                    .map(str::to_string)
            })
            .collect()
    }

    #[test]
    fn test_apply_sets_missing_deployment_target() {
        let mut document = document(&project(
            "\t\t\t\tPRODUCT_NAME = MyApp;\n",
            "\t\t\t\tPRODUCT_NAME = MyApp;\n",
        ));
        let report = patcher("11.0").apply(&mut document).unwrap();

        assert_eq!(
            targets(&document),
            vec![Some("11.0".to_string()), Some("11.0".to_string())]
        );
        assert_eq!(report.changes().len(), 2);
        assert_eq!(report.changes()[0].configuration, "Debug");
        assert_eq!(report.changes()[0].from, None);
        assert_eq!(report.project_name(), Some("MyApp"));
        assert!(!report.is_written());
    }

    #[test]
    fn test_apply_raises_lower_target_to_exact_threshold() {
        let mut document = document(&project(
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 8.0;\n",
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 10.3;\n",
        ));
        let report = patcher("11.0").apply(&mut document).unwrap();

        assert_eq!(
            targets(&document),
            vec![Some("11.0".to_string()), Some("11.0".to_string())]
        );
        assert_eq!(report.changes()[1].from.as_deref(), Some("10.3"));
        assert_eq!(report.changes()[1].to, "11.0");
    }

    #[test]
    fn test_apply_never_lowers_target() {
        let source = project(
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 12.0;\n",
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 11.0;\n",
        );
        let mut document = document(&source);
        let report = patcher("11.0").apply(&mut document).unwrap();

        assert!(!report.is_updated());
        assert_eq!(document.to_source(), source);
    }

    #[test]
    fn test_apply_compares_segments_numerically() {
        let source = project(
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 8.10;\n",
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 8.1;\n",
        );
        let mut document = document(&source);
        let report = patcher("8.2").apply(&mut document).unwrap();

        assert_eq!(
            targets(&document),
            vec![Some("8.10".to_string()), Some("8.2".to_string())]
        );
        assert_eq!(report.changes().len(), 1);
        assert_eq!(report.changes()[0].configuration, "Release");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut document = document(&project("", "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 9.0;\n"));
        patcher("11.0").apply(&mut document).unwrap();
        let once = document.to_source();

        let report = patcher("11.0").apply(&mut document).unwrap();
        assert!(!report.is_updated());
        assert_eq!(document.to_source(), once);
    }

    #[test]
    fn test_apply_wires_entitlements_when_missing() {
        let mut document = document(&project(
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 12.0;\n",
            "\t\t\t\tCODE_SIGN_ENTITLEMENTS = Custom.entitlements;\n\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 12.0;\n",
        ));
        let report = patcher("11.0")
            .with_entitlements(Some("App.entitlements".to_string()))
            .apply(&mut document)
            .unwrap();

        let section = records(&document);
        assert_eq!(
            section[0].1.setting(ENTITLEMENTS_SETTING),
            Some("MyApp/Resources/App.entitlements")
        );
        assert_eq!(
            section[1].1.setting(ENTITLEMENTS_SETTING),
            Some("Custom.entitlements")
        );
        assert_eq!(report.changes().len(), 1);
        assert_eq!(report.changes()[0].setting, ENTITLEMENTS_SETTING);
    }

    #[test]
    fn test_statuses() {
        let document = document(&project(
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 8.0;\n",
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 13.0;\n",
        ));
        let statuses = patcher("11.0").statuses(&document);
        assert_eq!(
            statuses,
            vec![
                ConfigurationStatus {
                    configuration: "Debug".to_string(),
                    deployment_target: Some("8.0".to_string()),
                    needs_update: true,
                },
                ConfigurationStatus {
                    configuration: "Release".to_string(),
                    deployment_target: Some("13.0".to_string()),
                    needs_update: false,
                },
            ]
        );
    }

    #[derive(Debug, Default)]
    struct RecordingDescriptor {
        section: ConfigurationSection,
        edits: Vec<(String, String, String)>,
        path: PathBuf,
    }

    impl ProjectDescriptor for RecordingDescriptor {
        fn path(&self) -> &Path {
            &self.path
        }
        fn configuration_section(&self) -> ConfigurationSection {
            self.section.clone()
        }
        fn set_build_setting(
            &mut self,
            key: &str,
            setting: &str,
            value: &str,
        ) -> Result<(), DescriptorIoError> {
            self.edits
                .push((key.to_string(), setting.to_string(), value.to_string()));
            Ok(())
        }
        fn to_source(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_apply_skips_comment_keys() {
        let mut descriptor = RecordingDescriptor {
            section: vec![
                ("A".to_string(), SectionEntry::Record(BuildConfiguration::default())),
                ("A_comment".to_string(), SectionEntry::Comment("Debug".to_string())),
                // records under a comment key are still annotations
                (
                    "B_comment".to_string(),
                    SectionEntry::Record(BuildConfiguration::default()),
                ),
            ],
            ..RecordingDescriptor::default()
        };
        patcher("11.0").apply(&mut descriptor).unwrap();

        assert_eq!(
            descriptor.edits,
            vec![(
                "A".to_string(),
                DEPLOYMENT_TARGET_SETTING.to_string(),
                "11.0".to_string()
            )]
        );
    }

    #[derive(Debug, Default)]
    struct RecordingFormat {
        written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DescriptorFormat for RecordingFormat {
        fn descriptor_file_name(&self) -> &'static str {
            "project.pbxproj"
        }
        async fn read(
            &self,
            _path: &Path,
        ) -> Result<Box<dyn ProjectDescriptor>, DescriptorIoError> {
            unreachable!()
        }
        async fn write(&self, descriptor: &dyn ProjectDescriptor) -> Result<(), DescriptorIoError> {
            self.written.lock().unwrap().push(descriptor.to_source());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_patch_writes_even_when_unchanged() {
        let source = project(
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 12.0;\n",
            "\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 12.0;\n",
        );
        let mut document = document(&source);
        let format = RecordingFormat::default();

        let report = patcher("11.0").patch(&mut document, &format).await.unwrap();

        assert!(!report.is_updated());
        assert!(report.is_written());
        assert_eq!(*format.written.lock().unwrap(), vec![source]);
    }

    #[tokio::test]
    async fn test_patch_writes_updated_source() {
        let mut document = document(&project("", ""));
        let format = RecordingFormat::default();

        let report = patcher("11.0").patch(&mut document, &format).await.unwrap();

        assert!(report.is_updated());
        let written = format.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].matches("IPHONEOS_DEPLOYMENT_TARGET = 11.0;").count(), 2);
    }

    #[test]
    fn test_notice_counts_configurations() {
        let mut document = document(&project("", ""));
        let patcher = patcher("11.0").with_entitlements(Some("App.entitlements".to_string()));
        let report = patcher.apply(&mut document).unwrap();
        assert_eq!(report.changes().len(), 4);

        let notice = patcher.notice(&report);
        assert!(notice.contains("Updated 2 build configuration(s)"));
        assert!(notice.contains("MyApp"));
        assert!(notice.contains("11.0"));
    }

    #[test]
    fn test_notice_counts_records_sharing_a_name() {
        let source = "// !$*UTF8*$!\n{\n\tobjects = {\n\
\t\tP1 /* Debug */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t};\n\t\t\tname = Debug;\n\t\t};\n\
\t\tP2 /* Release */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t};\n\t\t\tname = Release;\n\t\t};\n\
\t\tT1 /* Debug */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t};\n\t\t\tname = Debug;\n\t\t};\n\
\t\tT2 /* Release */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t};\n\t\t\tname = Release;\n\t\t};\n\
\t};\n}\n";
        let mut document = document(source);
        let patcher = patcher("11.0");
        let report = patcher.apply(&mut document).unwrap();
        assert_eq!(report.changes().len(), 4);
        assert_eq!(report.changes()[2].record, "T1");

        assert!(
            patcher
                .notice(&report)
                .contains("Updated 4 build configuration(s)")
        );
    }
}
