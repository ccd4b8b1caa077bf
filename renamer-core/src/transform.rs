//! Name transformation.
//!
//! A [`Transformer`] is a rule compiled once and applied to many names. It is
//! total: a pattern that cannot be compiled turns the transformer into the
//! identity, and the compile error is kept only for diagnostics.
//!
//! Pattern replacements use the regex crate's syntax. A group reference
//! takes the longest run of name characters after `$`, so `$1_x` names a
//! group called `1_x` and expands to nothing. Write `${1}_x` to follow
//! group 1 with `_x`.

use crate::rule::{RenameRule, RuleKind};
use regex::{NoExpand, Regex};
use thiserror::Error;

/// Characters escaped when `find` is taken literally
pub const LITERAL_METACHARACTERS: [char; 14] = [
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[derive(Debug, Clone)]
enum Compiled {
    Identity,
    Substitute {
        regex: Regex,
        replacement: String,
        expand: bool,
    },
    Prepend(String),
    Append(String),
}

/// A rule compiled for repeated application
#[derive(Debug, Clone)]
pub struct Transformer {
    compiled: Compiled,
    error: Option<TransformError>,
}

impl Transformer {
    pub fn new(rule: &RenameRule) -> Self {
        match compile(rule) {
            Ok(compiled) => Self {
                compiled,
                error: None,
            },
            Err(err) => {
                log::debug!("rule falls back to identity: {}", err);
                Self {
                    compiled: Compiled::Identity,
                    error: Some(err),
                }
            },
        }
    }

    /// Compute the new name for `name`. Never fails.
    pub fn apply(&self, name: &str) -> String {
        match &self.compiled {
            Compiled::Identity => name.to_string(),
            Compiled::Substitute {
                regex,
                replacement,
                expand: true,
            } => regex.replace_all(name, replacement.as_str()).into_owned(),
            Compiled::Substitute {
                regex,
                replacement,
                expand: false,
            } => regex
                .replace_all(name, NoExpand(replacement.as_str()))
                .into_owned(),
            Compiled::Prepend(prefix) => format!("{}{}", prefix, name),
            Compiled::Append(suffix) => insert_before_extension(name, suffix),
        }
    }

    /// The compile error that made this transformer an identity, if any
    pub fn error(&self) -> Option<&TransformError> {
        self.error.as_ref()
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.compiled, Compiled::Identity)
    }
}

/// Apply `rule` to a single name
pub fn transform(name: &str, rule: &RenameRule) -> String {
    Transformer::new(rule).apply(name)
}

/// Escape `find` so it matches itself when compiled as a pattern
pub fn escape_literal(find: &str) -> String {
    let mut escaped = String::with_capacity(find.len() * 2);
    for ch in find.chars() {
        if LITERAL_METACHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn compile(rule: &RenameRule) -> Result<Compiled, TransformError> {
    if !rule.is_active {
        return Ok(Compiled::Identity);
    }

    match rule.kind {
        RuleKind::Replace | RuleKind::Remove => {
            if rule.find.is_empty() {
                return Ok(Compiled::Identity);
            }
            let pattern = if rule.use_regex {
                rule.find.clone()
            } else {
                escape_literal(&rule.find)
            };
            let replacement = if rule.kind == RuleKind::Remove {
                String::new()
            } else {
                rule.replace.clone()
            };
            Ok(Compiled::Substitute {
                regex: build_regex(&pattern)?,
                replacement,
                expand: rule.use_regex,
            })
        },
        RuleKind::Regex => {
            if rule.find.is_empty() {
                return Ok(Compiled::Identity);
            }
            Ok(Compiled::Substitute {
                regex: build_regex(&rule.find)?,
                replacement: rule.replace.clone(),
                expand: true,
            })
        },
        RuleKind::Prepend => Ok(Compiled::Prepend(rule.replace.clone())),
        RuleKind::Append => Ok(Compiled::Append(rule.replace.clone())),
    }
}

fn build_regex(pattern: &str) -> Result<Regex, TransformError> {
    Regex::new(pattern).map_err(|e| TransformError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Split at the last dot and put `suffix` between stem and extension
fn insert_before_extension(name: &str, suffix: &str) -> String {
    match name.rfind('.') {
        Some(dot) => {
            let (stem, ext) = name.split_at(dot);
            format!("{}{}{}", stem, suffix, ext)
        },
        None => format!("{}{}", name, suffix),
    }
}
