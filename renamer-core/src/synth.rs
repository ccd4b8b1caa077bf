//! Rule synthesis from a free-text instruction.
//!
//! Synthesis is optional and may be unavailable. Every failure mode collapses
//! to `None`, which callers treat as "keep the current rule".

use crate::rule::{RenameRule, RuleKind};
use serde::Deserialize;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

pub trait RuleSynthesizer {
    fn synthesize(&self, instruction: &str) -> Option<RenameRule>;
}

/// Used when no synthesizer is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl RuleSynthesizer for Unavailable {
    fn synthesize(&self, _instruction: &str) -> Option<RenameRule> {
        log::warn!("rule synthesis is not configured");
        None
    }
}

/// Runs an external program that reads the prompt on stdin and prints a JSON
/// rule on stdout
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn run(&self, prompt: &str) -> std::io::Result<std::process::Output> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program may answer without reading the prompt
            match stdin.write_all(prompt.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e),
                _ => {},
            }
        }

        child.wait_with_output()
    }
}

impl RuleSynthesizer for CommandSynthesizer {
    fn synthesize(&self, instruction: &str) -> Option<RenameRule> {
        let output = match self.run(&build_prompt(instruction)) {
            Ok(output) => output,
            Err(e) => {
                log::warn!("failed to run rule synthesizer '{}': {}", self.program, e);
                return None;
            },
        };

        if !output.status.success() {
            log::warn!(
                "rule synthesizer exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        let rule = parse_rule_response(&String::from_utf8_lossy(&output.stdout));
        if rule.is_none() {
            log::warn!("rule synthesizer returned no usable rule");
        }
        rule
    }
}

/// Instruction text sent to the model
pub fn build_prompt(instruction: &str) -> String {
    format!(
        "User wants to rename files. Create a renaming rule based on this request: \"{}\".\n\
         If the user wants to remove text, use replacement with empty string.\n\
         If complex matching is needed, set useRegex to true and provide a valid regular \
         expression (without slash wrappers).\n\
         Respond with a single JSON object with the keys \"find\" (string), \"replace\" \
         (string), \"useRegex\" (boolean) and \"explanation\" (string).",
        instruction
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleResponse {
    #[serde(default)]
    find: Option<String>,
    #[serde(default)]
    replace: Option<String>,
    #[serde(default)]
    use_regex: bool,
    #[serde(default)]
    explanation: Option<String>,
}

/// Interpret a model response as a rule.
///
/// A fenced code block around the object is tolerated. Malformed JSON or an
/// empty `find` produce `None`.
pub fn parse_rule_response(text: &str) -> Option<RenameRule> {
    let json = extract_object(text)?;
    let response: RuleResponse = match serde_json::from_str(json) {
        Ok(response) => response,
        Err(e) => {
            log::debug!("malformed rule response: {}", e);
            return None;
        },
    };

    let find = response.find.filter(|f| !f.is_empty())?;
    if let Some(explanation) = &response.explanation {
        log::debug!("synthesized rule: {}", explanation);
    }

    let kind = if response.use_regex {
        RuleKind::Regex
    } else {
        RuleKind::Replace
    };

    Some(RenameRule {
        kind,
        find,
        replace: response.replace.unwrap_or_default(),
        use_regex: response.use_regex,
        is_active: true,
    })
}

fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_rule() {
        let rule = parse_rule_response(
            r#"{"find": "IMG_", "replace": "photo_", "useRegex": false, "explanation": "x"}"#,
        )
        .unwrap();
        assert_eq!(rule.kind, RuleKind::Replace);
        assert_eq!(rule.find, "IMG_");
        assert_eq!(rule.replace, "photo_");
        assert!(!rule.use_regex);
        assert!(rule.is_active);
    }

    #[test]
    fn test_parse_regex_rule() {
        let rule =
            parse_rule_response(r#"{"find": "\\d{4}-\\d{2}-\\d{2}", "useRegex": true}"#).unwrap();
        assert_eq!(rule.kind, RuleKind::Regex);
        assert_eq!(rule.find, r"\d{4}-\d{2}-\d{2}");
        assert_eq!(rule.replace, "");
        assert!(rule.use_regex);
    }

    #[test]
    fn test_parse_fenced_response() {
        let text = "```json\n{\"find\": \"old\", \"replace\": \"new\", \"useRegex\": false}\n```";
        let rule = parse_rule_response(text).unwrap();
        assert_eq!(rule.find, "old");
        assert_eq!(rule.replace, "new");
    }

    #[test]
    fn test_empty_find_is_no_rule() {
        assert!(parse_rule_response(r#"{"find": "", "replace": "x", "useRegex": false}"#).is_none());
        assert!(parse_rule_response(r#"{"replace": "x"}"#).is_none());
    }

    #[test]
    fn test_malformed_response_is_no_rule() {
        assert!(parse_rule_response("not json").is_none());
        assert!(parse_rule_response("{ broken").is_none());
        assert!(parse_rule_response(r#"{"find": 12}"#).is_none());
    }

    #[test]
    fn test_prompt_mentions_instruction() {
        let prompt = build_prompt("remove dates");
        assert!(prompt.contains("\"remove dates\""));
        assert!(prompt.contains("useRegex"));
    }

    #[test]
    fn test_unavailable() {
        assert!(Unavailable.synthesize("anything").is_none());
    }

    #[test]
    fn test_missing_program_is_no_rule() {
        let synth = CommandSynthesizer::new("renamer-no-such-program-xyz", vec![]);
        assert!(synth.synthesize("remove dates").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_synthesizer_reads_stdout() {
        let synth = CommandSynthesizer::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"cat >/dev/null; echo '{"find":"a","replace":"b","useRegex":false}'"#
                    .to_string(),
            ],
        );
        let rule = synth.synthesize("swap a for b").unwrap();
        assert_eq!(rule, RenameRule::replace("a", "b"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_synthesizer_failure_exit() {
        let synth = CommandSynthesizer::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
        assert!(synth.synthesize("anything").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_synthesizer_that_ignores_stdin() {
        let synth = CommandSynthesizer::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"echo '{"find":"x","replace":"y","useRegex":true}'"#.to_string(),
            ],
        );
        // Larger than a pipe buffer, so the write outlives the child
        let instruction = "rename ".repeat(50_000);
        let rule = synth.synthesize(&instruction).unwrap();
        assert_eq!(rule.kind, RuleKind::Regex);
        assert_eq!(rule.find, "x");
        assert_eq!(rule.replace, "y");
    }
}
