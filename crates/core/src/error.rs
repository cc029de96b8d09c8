use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcomes of a batch run. None of them is recovered locally.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{0} was cancelled")]
    Cancelled(String),
    #[error("could not read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "rename #{} failed: {} -> {}: {source}",
        .index + 1,
        .from.display(),
        .to.display()
    )]
    RenameFailed {
        index: usize,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BatchError {
    pub fn cancelled(step: impl Into<String>) -> Self {
        Self::Cancelled(step.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_failed_message_is_one_based() {
        let err = BatchError::RenameFailed {
            index: 0,
            from: PathBuf::from("a.txt"),
            to: PathBuf::from("b.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("rename #1 failed"));
        assert!(msg.contains("a.txt -> b.txt"));
    }

    #[test]
    fn cancelled_reports_step() {
        let err = BatchError::cancelled("directory selection");
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "directory selection was cancelled");
    }
}
