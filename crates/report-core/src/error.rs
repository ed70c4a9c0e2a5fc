use crate::model::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("object {0} does not exist")]
    UnknownObject(ObjectId),
    #[error("block definition {0:?} does not exist")]
    UnknownBlock(String),
    #[error("object {0} is not a block instance")]
    NotAnInstance(ObjectId),
    #[error("object {0} is not a light")]
    NotALight(ObjectId),
    #[error("mesh face {face} references a missing vertex")]
    InvalidMesh { face: usize },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("does not support host version {version}")]
    UnsupportedVersion { version: u32 },
    #[error("save document before exporting")]
    NoSaveLocation,
    #[error("no export location selected")]
    UserCancelled,
    #[error("export failed: {path:?}")]
    HostExport { path: PathBuf },
    #[error("block {name:?} contains itself")]
    CyclicBlock { name: String },
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Aborts the user asked for, as opposed to failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ExportError::UserCancelled)
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
