//! Post-read/post-write processor hooks
//!
//! An `IoProcessor` runs after a file read or write completes, receiving
//! the container involved. Processors are side-effect hooks: they cannot
//! return data through the container's interface, only succeed or fail.

use std::path::Path;

use tracing::debug;

use crate::container::GenericDataContainer;
use crate::error::{SharedError, SharedResult};

/// Hook invoked after a read or write completes.
///
/// Implementations must decide what to do with the container; there is no
/// default behavior to fall back on.
pub trait IoProcessor: Send + Sync {
    /// Perform a side-effect pass over a filled container
    fn process(&self, data: &GenericDataContainer) -> SharedResult<()>;
}

/// Processor verifying that a container's string value names an existing
/// regular file on the filesystem.
#[derive(Debug, Default)]
pub struct FileExistsProcessor;

impl FileExistsProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl IoProcessor for FileExistsProcessor {
    fn process(&self, data: &GenericDataContainer) -> SharedResult<()> {
        let path = data.data().as_text().ok_or_else(|| SharedError::Validation {
            message: format!(
                "container \"{}\" does not hold a textual value (shape: {})",
                data.name(),
                data.data_type()
            ),
        })?;

        if !Path::new(path).is_file() {
            return Err(SharedError::Validation {
                message: format!("\"{path}\" does not refer to an existing file"),
            });
        }

        debug!("verified that \"{}\" exists", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::DataKind;
    use crate::value::Value;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_existing_file_passes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "content").unwrap();

        let mut container = GenericDataContainer::new("path", DataKind::String);
        container
            .store(Value::from(file.path().to_string_lossy().as_ref()), None)
            .unwrap();

        assert!(FileExistsProcessor::new().process(&container).is_ok());
    }

    #[test]
    fn test_missing_file_fails() {
        let mut container = GenericDataContainer::new("path", DataKind::String);
        container
            .store(Value::from("/no/such/file/anywhere"), None)
            .unwrap();

        assert_matches!(
            FileExistsProcessor::new().process(&container),
            Err(SharedError::Validation { .. })
        );
    }

    #[test]
    fn test_non_textual_container_fails() {
        let mut container = GenericDataContainer::new("count", DataKind::Integer);
        container.store(Value::from(1i64), None).unwrap();

        assert_matches!(
            FileExistsProcessor::new().process(&container),
            Err(SharedError::Validation { .. })
        );
    }
}
