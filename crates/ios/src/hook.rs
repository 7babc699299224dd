use anyhow::Result;
use xcodepatch_core::{Config, DescriptorFormat, HookContext, HookOutcome, ProjectDescriptor};
use xcodepatch_pbxproj::PbxprojFormat;
use xcodepatch_utils::DottedNumericComparator;

use crate::{finder::IosProjectFinder, patcher::ConfigurationPatcher};

/// One build-hook invocation: locate the project, parse its descriptor, patch it.
#[derive(Debug)]
pub struct Hook {
    finder: IosProjectFinder,
    format: Box<dyn DescriptorFormat>,
    patcher: ConfigurationPatcher,
    dry_run: bool,
}

impl Hook {
    pub fn new(
        finder: IosProjectFinder,
        format: Box<dyn DescriptorFormat>,
        patcher: ConfigurationPatcher,
    ) -> Self {
        Self {
            finder,
            format,
            patcher,
            dry_run: false,
        }
    }

    /// Hook wired with the pbxproj format and numeric version comparison.
    pub fn from_config(config: &Config) -> Self {
        let format = PbxprojFormat;
        Self::new(
            IosProjectFinder::new(config, format.descriptor_file_name()),
            Box::new(format),
            ConfigurationPatcher::from_config(config, Box::new(DottedNumericComparator)),
        )
    }

    /// Patch in memory only; nothing is printed or written.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn finder(&self) -> &IosProjectFinder {
        &self.finder
    }

    #[must_use]
    pub fn patcher(&self) -> &ConfigurationPatcher {
        &self.patcher
    }

    /// The descriptor handed over in `context`, or the one read from the located bundle.
    /// `None` when the platform folder is absent.
    ///
    /// # Errors
    /// Returns error if no bundle is found or the descriptor cannot be read.
    pub async fn load(
        &self,
        context: &mut HookContext,
    ) -> Result<Option<Box<dyn ProjectDescriptor>>> {
        if let Some(project) = context.take_project() {
            return Ok(Some(project));
        }
        let Some(project) = self.finder.locate(context.project_root()).await? else {
            return Ok(None);
        };
        Ok(Some(self.format.read(project.descriptor_path()).await?))
    }

    /// # Errors
    /// Returns error if locating, parsing, editing or writing the descriptor fails.
    pub async fn run(&self, context: &mut HookContext) -> Result<HookOutcome> {
        let Some(mut descriptor) = self.load(context).await? else {
            return Ok(HookOutcome::Skipped {
                searched: self.finder.platform_dir(context.project_root()),
            });
        };
        let report = if self.dry_run {
            self.patcher.apply(descriptor.as_mut())?
        } else {
            self.patcher
                .patch(descriptor.as_mut(), self.format.as_ref())
                .await?
        };
        Ok(HookOutcome::Patched(report))
    }
}
