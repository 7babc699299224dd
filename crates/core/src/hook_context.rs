use std::path::{Path, PathBuf};

use crate::descriptor::ProjectDescriptor;

/// Inputs of one hook invocation: the build root and, when the caller already parsed the
/// descriptor, the handle to reuse instead of reading it again.
#[derive(Debug)]
pub struct HookContext {
    project_root: PathBuf,
    project: Option<Box<dyn ProjectDescriptor>>,
}

impl HookContext {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            project: None,
        }
    }

    #[must_use]
    pub fn with_project(mut self, project: Box<dyn ProjectDescriptor>) -> Self {
        self.project = Some(project);
        self
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn take_project(&mut self) -> Option<Box<dyn ProjectDescriptor>> {
        self.project.take()
    }
}
