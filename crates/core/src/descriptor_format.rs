use std::{fmt::Debug, path::Path};

use async_trait::async_trait;
use tokio::fs::write;

use crate::{descriptor::ProjectDescriptor, error::DescriptorIoError};

/// Parser and serializer for one descriptor file format.
#[async_trait]
pub trait DescriptorFormat: Debug + Send + Sync {
    /// File name of the descriptor inside a project bundle (e.g. `project.pbxproj`).
    fn descriptor_file_name(&self) -> &'static str;

    /// # Errors
    /// Returns error if the file cannot be read or is not a valid descriptor.
    async fn read(&self, path: &Path) -> Result<Box<dyn ProjectDescriptor>, DescriptorIoError>;

    /// Writes the descriptor back to [`ProjectDescriptor::path`], replacing the whole file.
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    async fn write(&self, descriptor: &dyn ProjectDescriptor) -> Result<(), DescriptorIoError> {
        write(descriptor.path(), descriptor.to_source())
            .await
            .map_err(|source| DescriptorIoError::Write {
                path: descriptor.path().to_path_buf(),
                source,
            })
    }
}
