//! Edit a code block in the user's editor.

use std::io::Write;
use std::process::Command;

use anyhow::{anyhow, Context, Result};

/// File extension for a normalized language name, so editors pick the right mode.
pub fn extension_for(language: &str) -> &str {
    match language {
        "typescript" => "ts",
        "javascript" => "js",
        "python" => "py",
        "rust" => "rs",
        "bash" => "sh",
        "cpp" => "cpp",
        "csharp" => "cs",
        "go" => "go",
        "yaml" => "yaml",
        "" => "txt",
        other => other,
    }
}

/// `$VISUAL`, then `$EDITOR`, then `vi`, split into program and arguments.
fn editor_command() -> (String, Vec<String>) {
    let raw = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());
    let mut parts = raw.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_else(|| "vi".to_string());
    (program, parts.collect())
}

/// Open `code` in the editor and return what was saved. `None` when unchanged.
pub fn edit(code: &str, language: &str) -> Result<Option<String>> {
    let mut file = tempfile::Builder::new()
        .prefix("devmate-")
        .suffix(&format!(".{}", extension_for(language)))
        .tempfile()
        .context("creating temp file for editing")?;
    file.write_all(code.as_bytes())?;
    file.flush()?;

    let (program, args) = editor_command();
    let status = Command::new(&program)
        .args(&args)
        .arg(file.path())
        .status()
        .with_context(|| format!("launching editor '{}'", program))?;
    if !status.success() {
        return Err(anyhow!("editor '{}' exited with {}", program, status));
    }

    let edited = std::fs::read_to_string(file.path())?;
    let edited = edited.trim_end_matches(['\n', '\r']).to_string();
    Ok((edited != code).then_some(edited))
}
