use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque identifier of a record within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub(crate) u64);

impl RecordId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| format!("Invalid record id: {}", s))
    }
}

/// Commit lifecycle of a record.
///
/// `Pending -> Success` is terminal. `Pending -> Error` is not: a later
/// commit attempt targets the record again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Pending,
    Success,
    Error {
        reason: String,
    },
}

impl RecordStatus {
    /// True once the record has been committed and must not be recomputed
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error { .. } => "error",
        }
    }
}

/// Capability to rename an entry in place inside its parent directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritableHandle {
    dir: PathBuf,
}

impl WritableHandle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where an entry named `name` lives under this handle
    pub fn entry(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// The underlying content of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSource {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable: Option<WritableHandle>,
}

impl FileSource {
    /// Content that can be read and exported but not renamed in place
    pub fn detached(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writable: None,
        }
    }

    /// Content obtained through direct storage access
    pub fn writable(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            path,
            writable: Some(WritableHandle::new(dir)),
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable.is_some()
    }
}

/// One file tracked by a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: RecordId,
    pub original_name: String,
    pub new_name: String,
    pub relative_path: String,
    #[serde(flatten)]
    pub status: RecordStatus,
    pub source: FileSource,
}

impl FileRecord {
    pub fn is_changed(&self) -> bool {
        self.original_name != self.new_name
    }

    /// Changed and not yet committed
    pub fn is_eligible(&self) -> bool {
        self.is_changed() && !self.status.is_final()
    }

    /// Directory portion of `relative_path`, without trailing slash
    pub fn directory(&self) -> Option<&str> {
        self.relative_path
            .rfind('/')
            .map(|idx| &self.relative_path[..idx])
    }

    /// `relative_path` with its last component replaced by `new_name`
    pub fn target_path(&self) -> String {
        match self.directory() {
            Some(dir) => format!("{}/{}", dir, self.new_name),
            None => self.new_name.clone(),
        }
    }
}
