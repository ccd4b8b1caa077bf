use crate::batch::Batch;
use crate::drivers::{render_script, write_script_file};
use crate::output::ScriptResult;
use anyhow::{Context, Result};
use std::path::Path;

/// Render the rename script and write it to `out` when given
pub fn script_operation(batch: &Batch, out: Option<&Path>) -> Result<ScriptResult> {
    let Some(script) = render_script(batch) else {
        return Ok(ScriptResult {
            path: None,
            commands: 0,
            script: None,
        });
    };

    let commands = batch.changed_records().count();
    if let Some(out) = out {
        write_script_file(&script, out)
            .with_context(|| format!("Failed to write script {}", out.display()))?;
    }

    Ok(ScriptResult {
        path: out.map(Path::to_path_buf),
        commands,
        script: Some(script),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportedFile;
    use crate::record::FileSource;
    use crate::rule::RenameRule;
    use tempfile::TempDir;

    fn batch() -> Batch {
        let mut batch = Batch::new(RenameRule::append("_old"));
        batch.import_files(vec![ImportedFile {
            name: "a.txt".to_string(),
            relative_path: "a.txt".to_string(),
            source: FileSource::detached("/tmp/a.txt"),
        }]);
        batch
    }

    #[test]
    fn test_script_inline() {
        let result = script_operation(&batch(), None).unwrap();
        assert_eq!(result.commands, 1);
        assert_eq!(result.path, None);
        assert!(result.script.unwrap().ends_with("mv \"a.txt\" \"a_old.txt\""));
    }

    #[test]
    fn test_script_written_to_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("rename.sh");
        let result = script_operation(&batch(), Some(&out)).unwrap();
        assert_eq!(result.path.as_deref(), Some(out.as_path()));
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("#!/bin/bash\n"));
        assert!(written.ends_with("\n"));
    }

    #[test]
    fn test_no_changes_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("rename.sh");
        let mut batch = batch();
        batch.set_rule(RenameRule::default());
        let result = script_operation(&batch, Some(&out)).unwrap();
        assert!(result.script.is_none());
        assert!(!out.exists());
    }
}
