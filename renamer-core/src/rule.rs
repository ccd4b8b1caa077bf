use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which transformation a rule performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Find and replace, literal unless `use_regex` is set
    #[default]
    Replace,
    /// Delete every occurrence of `find`
    Remove,
    /// Insert `replace` before the whole name
    Prepend,
    /// Insert `replace` before the last extension
    Append,
    /// Pattern replacement with capture-group expansion
    Regex,
}

impl RuleKind {
    pub const ALL: [Self; 5] = [
        Self::Replace,
        Self::Remove,
        Self::Prepend,
        Self::Append,
        Self::Regex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Remove => "remove",
            Self::Prepend => "prepend",
            Self::Append => "append",
            Self::Regex => "regex",
        }
    }

    /// Whether `find` is consulted by this kind
    pub fn uses_find(self) -> bool {
        matches!(self, Self::Replace | Self::Remove | Self::Regex)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "remove" => Ok(Self::Remove),
            "prepend" | "prefix" => Ok(Self::Prepend),
            "append" | "suffix" => Ok(Self::Append),
            "regex" => Ok(Self::Regex),
            _ => Err(format!("Invalid rule mode: {}", s)),
        }
    }
}

/// A single renaming transformation.
///
/// `kind` decides which of the other fields are consulted. Fields that the
/// kind ignores are kept as-is so switching modes back and forth does not
/// lose what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(default)]
    pub find: String,
    #[serde(default)]
    pub replace: String,
    #[serde(default)]
    pub use_regex: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for RenameRule {
    fn default() -> Self {
        Self {
            kind: RuleKind::Replace,
            find: String::new(),
            replace: String::new(),
            use_regex: false,
            is_active: true,
        }
    }
}

impl RenameRule {
    pub fn new(kind: RuleKind, find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            kind,
            find: find.into(),
            replace: replace.into(),
            ..Self::default()
        }
    }

    pub fn replace(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::new(RuleKind::Replace, find, replace)
    }

    pub fn remove(find: impl Into<String>) -> Self {
        Self::new(RuleKind::Remove, find, "")
    }

    pub fn prepend(prefix: impl Into<String>) -> Self {
        Self::new(RuleKind::Prepend, "", prefix)
    }

    pub fn append(suffix: impl Into<String>) -> Self {
        Self::new(RuleKind::Append, "", suffix)
    }

    pub fn regex(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::new(RuleKind::Regex, pattern, replace)
    }

    #[must_use]
    pub fn with_regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// One-line description used in previews and logs
    pub fn describe(&self) -> String {
        let body = match self.kind {
            RuleKind::Replace if self.use_regex => {
                format!("replace /{}/ -> \"{}\"", self.find, self.replace)
            },
            RuleKind::Replace => format!("replace \"{}\" -> \"{}\"", self.find, self.replace),
            RuleKind::Remove => format!("remove \"{}\"", self.find),
            RuleKind::Prepend => format!("prepend \"{}\"", self.replace),
            RuleKind::Append => format!("append \"{}\"", self.replace),
            RuleKind::Regex => format!("regex /{}/ -> \"{}\"", self.find, self.replace),
        };

        if self.is_active {
            body
        } else {
            format!("{} (inactive)", body)
        }
    }
}
