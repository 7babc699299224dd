use std::path::Path;

use async_trait::async_trait;
use tokio::fs::read_to_string;
use xcodepatch_core::{DescriptorFormat, DescriptorIoError, ProjectDescriptor};

use crate::document::PbxprojDocument;

/// Reads and writes `project.pbxproj` descriptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct PbxprojFormat;

impl PbxprojFormat {
    pub const DESCRIPTOR_FILE_NAME: &'static str = "project.pbxproj";
}

#[async_trait]
impl DescriptorFormat for PbxprojFormat {
    fn descriptor_file_name(&self) -> &'static str {
        Self::DESCRIPTOR_FILE_NAME
    }

    async fn read(&self, path: &Path) -> Result<Box<dyn ProjectDescriptor>, DescriptorIoError> {
        let source = read_to_string(path)
            .await
            .map_err(|source| DescriptorIoError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Box::new(PbxprojDocument::parse(path, source)?))
    }
}
