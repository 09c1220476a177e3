use crate::codegen::Artifact;
use crate::errors::InternalError;
use std::path::Path;
use std::path::PathBuf;

/// Writes and deletes artifact files, or — in validate mode — only detects
/// what would change.
///
/// Every write is preceded by an on-disk comparison, so an unchanged
/// artifact never touches the filesystem and `NO_CHANGES` holds across
/// process restarts.
#[derive(Debug)]
pub struct ArtifactFileWriter {
    deleted: usize,
    only_validate: bool,
    written: usize,
}
impl ArtifactFileWriter {
    pub fn new(only_validate: bool) -> Self {
        Self {
            deleted: 0,
            only_validate,
            written: 0,
        }
    }

    pub fn artifact_path(
        output_dir: &Path,
        document_name: &str,
        extension: &str,
    ) -> PathBuf {
        output_dir.join(format!("{document_name}.{extension}"))
    }

    /// Write the artifact unless the on-disk copy already matches. Returns
    /// whether a change was (or would have been) made.
    pub fn write(
        &mut self,
        output_dir: &Path,
        artifact: &Artifact,
        extension: &str,
    ) -> Result<bool, InternalError> {
        let path = Self::artifact_path(output_dir, artifact.name.as_str(), extension);

        if let Ok(existing) = std::fs::read_to_string(path.as_path())
            && existing == artifact.text
        {
            return Ok(false);
        }

        if !self.only_validate {
            std::fs::create_dir_all(output_dir).map_err(|err| {
                InternalError::Io {
                    action: "create artifact directory",
                    path: output_dir.to_path_buf(),
                    err,
                }
            })?;
            std::fs::write(path.as_path(), artifact.text.as_str()).map_err(
                |err| InternalError::Io {
                    action: "write artifact",
                    path: path.clone(),
                    err,
                },
            )?;
            log::debug!("Wrote artifact {path:#?}.");
        }

        self.written += 1;
        Ok(true)
    }

    /// Delete the artifact for a document that no longer exists. Returns
    /// whether a file was (or would have been) removed.
    pub fn delete(
        &mut self,
        output_dir: &Path,
        document_name: &str,
        extension: &str,
    ) -> Result<bool, InternalError> {
        let path = Self::artifact_path(output_dir, document_name, extension);
        if !path.is_file() {
            return Ok(false);
        }

        if !self.only_validate {
            std::fs::remove_file(path.as_path()).map_err(|err| {
                InternalError::Io {
                    action: "delete artifact",
                    path: path.clone(),
                    err,
                }
            })?;
            log::debug!("Deleted orphaned artifact {path:#?}.");
        }

        self.deleted += 1;
        Ok(true)
    }

    pub fn changed_count(&self) -> usize {
        self.written + self.deleted
    }
}
