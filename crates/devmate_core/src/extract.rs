//! Response extractor: split a model reply into prose and its first fenced code block.

use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    // First fenced block: optional language tag on the opening line, lazy body.
    static ref FIRST_CODE_BLOCK: Regex =
        Regex::new(r"(?s)```(?:([A-Za-z0-9_+#.-]+)?[ \t]*\r?\n)?(.*?)```").unwrap();

    // Any fenced block, for stripping prose.
    static ref ANY_CODE_BLOCK: Regex = Regex::new(r"(?s)```.*?```").unwrap();
}

/// Shown in place of code when the reply has no fenced block.
pub const NO_CODE_SENTINEL: &str = "⚠️ No code found in response";

/// Language assumed when a block carries no hint.
const DEFAULT_LANGUAGE: &str = "typescript";

/// A fenced code block pulled out of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Tag written after the opening fence, if any
    pub language: Option<String>,
    /// Block body, trimmed
    pub code: String,
}

impl CodeBlock {
    /// Language name handed to the renderer.
    pub fn render_language(&self) -> String {
        normalize_language(self.language.as_deref())
    }
}

/// Result of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extracted {
    /// Reply with every fenced block removed, trimmed
    pub prose: String,
    /// First fenced block; `None` when the reply has none
    pub code: Option<CodeBlock>,
}

impl Extracted {
    /// The code text, or [`NO_CODE_SENTINEL`] when absent.
    pub fn code_or_sentinel(&self) -> &str {
        self.code
            .as_ref()
            .map(|block| block.code.as_str())
            .unwrap_or(NO_CODE_SENTINEL)
    }

    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }
}

/// Split `raw` into prose and the first fenced code block.
///
/// Only the first block fills the code slot; every block is removed from the prose.
pub fn extract(raw: &str) -> Extracted {
    let code = FIRST_CODE_BLOCK.captures(raw).map(|caps| CodeBlock {
        language: caps.get(1).map(|m| m.as_str().to_string()),
        code: caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    });

    let prose = ANY_CODE_BLOCK.replace_all(raw, "").trim().to_string();

    Extracted { prose, code }
}

/// Map a fence tag to the name a syntax highlighter knows.
pub fn normalize_language(tag: Option<&str>) -> String {
    let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
        return DEFAULT_LANGUAGE.to_string();
    };
    let lower = tag.to_ascii_lowercase();
    let name = match lower.as_str() {
        "ts" | "tsx" | "typescript" => "typescript",
        "js" | "jsx" | "javascript" | "node" => "javascript",
        "py" | "python" | "python3" => "python",
        "rs" | "rust" => "rust",
        "sh" | "bash" | "shell" | "zsh" => "bash",
        "c++" | "cpp" | "cc" => "cpp",
        "c#" | "cs" | "csharp" => "csharp",
        "yml" | "yaml" => "yaml",
        "golang" | "go" => "go",
        other => other,
    };
    name.to_string()
}

/// How a reply is shown: split into prose + code, or as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    #[default]
    Extracted,
    Raw,
}

impl PresentationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationMode::Extracted => "extracted",
            PresentationMode::Raw => "raw",
        }
    }
}

impl FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extracted" | "split" => Ok(PresentationMode::Extracted),
            "raw" | "full" => Ok(PresentationMode::Raw),
            other => Err(format!("unknown presentation mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reply prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Raw(String),
    Split(Extracted),
}

pub fn present(mode: PresentationMode, raw: &str) -> Presentation {
    match mode {
        PresentationMode::Raw => Presentation::Raw(raw.to_string()),
        PresentationMode::Extracted => Presentation::Split(extract(raw)),
    }
}
