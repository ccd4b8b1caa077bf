use crate::batch::Batch;
use crate::drivers::DriverError;
use std::fs;
use std::path::Path;

pub const SCRIPT_HEADER: &str = "#!/bin/bash\n# Batch Rename Script\n\n";

/// Render a shell script with one `mv` per changed record.
///
/// Returns `None` when no record differs from its new name.
pub fn render_script(batch: &Batch) -> Option<String> {
    let moves: Vec<String> = batch
        .changed_records()
        .map(|record| {
            format!(
                "mv {} {}",
                quote(&record.relative_path),
                quote(&record.target_path())
            )
        })
        .collect();

    if moves.is_empty() {
        return None;
    }

    Some(format!("{}{}", SCRIPT_HEADER, moves.join("\n")))
}

/// Double-quote `value` for bash, escaping the characters that stay special
/// inside double quotes. A leading `-` gets a `./` prefix so `mv` does not
/// read the path as an option.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 4);
    quoted.push('"');
    if value.starts_with('-') {
        quoted.push_str("./");
    }
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Write `script` to `path` and make it executable where that applies
pub fn write_script_file(script: &str, path: &Path) -> Result<(), DriverError> {
    let mut contents = script.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|e| DriverError::io(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(path)
            .map_err(|e| DriverError::io(path, e))?
            .permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        fs::set_permissions(path, permissions).map_err(|e| DriverError::io(path, e))?;
    }

    Ok(())
}
