//! Syntax highlighting for the code panel.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const THEME: &str = "base16-ocean.dark";

fn syntaxes() -> &'static SyntaxSet {
    static SET: OnceLock<SyntaxSet> = OnceLock::new();
    SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn themes() -> &'static ThemeSet {
    static SET: OnceLock<ThemeSet> = OnceLock::new();
    SET.get_or_init(ThemeSet::load_defaults)
}

/// Syntax for a normalized language name. TypeScript has no bundled grammar,
/// so it borrows JavaScript's.
fn syntax_for(language: &str) -> &'static SyntaxReference {
    let set = syntaxes();
    set.find_syntax_by_token(language)
        .or_else(|| match language {
            "typescript" => set.find_syntax_by_token("js"),
            "bash" => set.find_syntax_by_token("sh"),
            _ => None,
        })
        .unwrap_or_else(|| set.find_syntax_plain_text())
}

/// Highlight `code` for a 24-bit terminal. Falls back to the plain text on any failure.
pub fn highlight(code: &str, language: &str) -> String {
    let Some(theme) = themes().themes.get(THEME) else {
        return code.to_string();
    };
    let mut highlighter = HighlightLines::new(syntax_for(language), theme);

    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, syntaxes()) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(e) => {
                tracing::debug!(error = %e, language, "highlighting failed");
                return code.to_string();
            }
        }
    }
    out.push_str("\x1b[0m");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_fallback_syntaxes() {
        assert_eq!(syntax_for("rust").name, "Rust");
        assert_ne!(syntax_for("typescript").name, "Plain Text");
        assert_eq!(syntax_for("no-such-language").name, "Plain Text");
    }

    #[test]
    fn test_highlight_keeps_text() {
        let out = highlight("let x = 1;\n", "javascript");
        assert!(out.contains("let"));
        assert!(out.contains('\x1b'));
    }
}
