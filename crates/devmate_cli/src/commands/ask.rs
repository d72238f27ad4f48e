//! `devmate ask`: post a question to a running relay and show the answer.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use console::style;
use devmate_constant::app;
use devmate_core::{
    present, CodePanel, Extracted, Presentation, PresentationMode, SolveRequest, SolveResponse,
    NO_CODE_SENTINEL,
};
use indicatif::ProgressBar;
use serde_json::{json, Value};

use crate::clipboard::SystemClipboard;
use crate::{editor, output, render};

pub struct AskOptions {
    pub server: String,
    pub raw: bool,
    pub copy: bool,
    pub edit: bool,
}

impl AskOptions {
    fn mode(&self) -> PresentationMode {
        if self.raw {
            PresentationMode::Raw
        } else {
            PresentationMode::Extracted
        }
    }
}

pub async fn handle(problem: &str, options: &AskOptions) -> Result<()> {
    let url = solve_url(&options.server);

    let spinner = output::spinner("Asking DevMate...");
    let result = request_solution(&url, problem).await;
    spinner.finish_and_clear();
    let solution = result?;

    match present(options.mode(), &solution) {
        Presentation::Raw(text) => {
            if output::is_json() {
                output::data("solution", &json!({ "solution": text }));
            } else {
                output::body(&text);
            }
            if options.copy || options.edit {
                output::warning("--copy and --edit work on the extracted code; drop --raw to use them");
            }
            Ok(())
        }
        Presentation::Split(extracted) => show_split(&extracted, options).await,
    }
}

fn solve_url(server: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), app::SOLVE_ROUTE)
}

/// One POST to the relay. The relay's `{ error }` text becomes the error message.
async fn request_solution(url: &str, problem: &str) -> Result<String> {
    let response = reqwest::Client::new()
        .post(url)
        .json(&SolveRequest::new(problem))
        .send()
        .await
        .with_context(|| format!("could not reach relay at {}", url))?;

    let status = response.status();
    let body: SolveResponse = response
        .json()
        .await
        .with_context(|| format!("unexpected reply from relay (HTTP {})", status.as_u16()))?;

    match body {
        SolveResponse::Solution { solution } => Ok(solution),
        SolveResponse::Error { error } => Err(anyhow!("{} (HTTP {})", error, status.as_u16())),
    }
}

async fn show_split(extracted: &Extracted, options: &AskOptions) -> Result<()> {
    if !extracted.prose.is_empty() {
        output::body(&extracted.prose);
        output::body("");
    }

    let Some(mut panel) = CodePanel::from_extracted(extracted) else {
        if output::is_json() {
            output::data("solution", &solution_json(extracted, None));
        } else {
            output::warning(NO_CODE_SENTINEL);
        }
        return Ok(());
    };

    print_code(&panel);

    if options.edit {
        edit_code(&mut panel);
    }

    if options.copy {
        copy_code(&mut panel).await;
    }

    if output::is_json() {
        output::data("solution", &solution_json(extracted, Some(&panel)));
    }
    Ok(())
}

/// JSON view of a split answer. `language` is the fence tag as written.
fn solution_json(extracted: &Extracted, panel: Option<&CodePanel>) -> Value {
    json!({
        "prose": extracted.prose,
        "has_code": extracted.has_code(),
        "language": panel.and_then(|p| p.language()),
        "highlight": panel.map(|p| p.render_language()),
        "code": panel.map(|p| p.current_code()),
    })
}

fn print_code(panel: &CodePanel) {
    if output::is_json() {
        return;
    }
    let language = panel.render_language();
    output::header(&format!("── code ({}) ──", language));
    output::body(&render::highlight(panel.current_code(), &language));
}

/// Editing → saved or cancelled. The panel always ends up viewing.
fn edit_code(panel: &mut CodePanel) {
    panel.begin_edit();
    match editor::edit(panel.current_code(), &panel.render_language()) {
        Ok(Some(text)) => {
            panel.update_draft(text);
            panel.save();
            output::success("Saved edits");
            print_code(panel);
        }
        Ok(None) => {
            panel.cancel_edit();
            output::dim("No changes");
        }
        Err(e) => {
            panel.cancel_edit();
            output::warning(&format!("Edit discarded: {:#}", e));
        }
    }
}

/// Copy the committed code and hold the "Copied!" indicator while it is lit.
async fn copy_code(panel: &mut CodePanel) {
    if let Err(e) = panel.copy(&mut SystemClipboard, Instant::now()) {
        output::warning(&format!("Could not copy: {}", e));
        return;
    }

    if output::is_json() {
        output::success("Copied to clipboard");
        return;
    }

    let indicator = ProgressBar::new_spinner();
    indicator.set_message(format!("{} Copied!", style("✓").green()));
    indicator.tick();
    while panel.is_copied(Instant::now()) {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    indicator.finish_and_clear();
    output::dim("Code copied to clipboard");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_url_joins_route() {
        assert_eq!(solve_url("http://127.0.0.1:3000"), "http://127.0.0.1:3000/api/solve");
        assert_eq!(solve_url("http://host/"), "http://host/api/solve");
    }

    #[test]
    fn test_mode_from_flags() {
        let options = AskOptions {
            server: app::DEFAULT_SERVER_URL.to_string(),
            raw: true,
            copy: false,
            edit: false,
        };
        assert_eq!(options.mode(), PresentationMode::Raw);
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_an_error() {
        let err = request_solution("http://127.0.0.1:9/api/solve", "q").await.unwrap_err();
        assert!(err.to_string().contains("could not reach relay"));
    }

    #[test]
    fn test_solution_json_with_code() {
        let extracted = devmate_core::extract("Here:\n```js\nconsole.log(1)\n```");
        let panel = CodePanel::from_extracted(&extracted).unwrap();
        let value = solution_json(&extracted, Some(&panel));
        assert_eq!(value["has_code"], true);
        assert_eq!(value["language"], "js");
        assert_eq!(value["highlight"], "javascript");
        assert_eq!(value["code"], "console.log(1)");
    }

    #[test]
    fn test_solution_json_without_code() {
        let extracted = devmate_core::extract("Just prose.");
        let value = solution_json(&extracted, None);
        assert_eq!(value["has_code"], false);
        assert!(value["code"].is_null());
        assert!(value["language"].is_null());
    }
}
