//! Priming history: the scripted turns that set the assistant's persona and scope.
//!
//! Priming is data. The DevMate script ships embedded as TOML and can be
//! replaced with an operator file or dropped entirely for stateless calls.

use std::path::Path;

use devmate_llms::{ConversationTurn, Role};
use serde::{Deserialize, Serialize};

use crate::error::{DevmateError, Result};

/// Embedded default persona.
const DEVMATE_PERSONA: &str = include_str!("../persona/devmate.toml");

/// Persona/scope context sent ahead of every question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Priming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_instruction: Option<String>,
    #[serde(default)]
    turns: Vec<ConversationTurn>,
}

impl Priming {
    /// Validated priming. Turns, when present, alternate user/model starting
    /// with user and ending with model.
    pub fn new(system_instruction: Option<String>, turns: Vec<ConversationTurn>) -> Result<Self> {
        validate_turns(&turns)?;
        let system_instruction = system_instruction.filter(|s| !s.trim().is_empty());
        Ok(Self {
            system_instruction,
            turns,
        })
    }

    /// No persona at all: a single-turn call.
    pub fn stateless() -> Self {
        Self::default()
    }

    /// The built-in DevMate persona.
    pub fn devmate() -> Result<Self> {
        Self::from_toml_str(DEVMATE_PERSONA)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: Priming = toml::from_str(source)?;
        Self::new(raw.system_instruction, raw.turns)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.system_instruction.is_none() && self.turns.is_empty()
    }

    /// Collapse the scripted turns into one system instruction, for providers
    /// that cannot take a prior conversation.
    pub fn flattened(&self) -> Self {
        if self.turns.is_empty() {
            return self.clone();
        }

        let mut sections = Vec::with_capacity(self.turns.len() + 1);
        if let Some(instruction) = &self.system_instruction {
            sections.push(instruction.trim().to_string());
        }
        let transcript = self
            .turns
            .iter()
            .map(|turn| {
                let speaker = match turn.role {
                    Role::User => "User",
                    Role::Model => "Assistant",
                };
                format!("{}: {}", speaker, turn.text.trim())
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        sections.push(format!(
            "Stay consistent with this earlier exchange:\n\n{}",
            transcript
        ));

        Self {
            system_instruction: Some(sections.join("\n\n")),
            turns: Vec::new(),
        }
    }
}

fn validate_turns(turns: &[ConversationTurn]) -> Result<()> {
    let (Some(first), Some(last)) = (turns.first(), turns.last()) else {
        return Ok(());
    };
    if first.role != Role::User {
        return Err(DevmateError::InvalidPriming(
            "history must start with a user turn".to_string(),
        ));
    }
    if last.role != Role::Model {
        return Err(DevmateError::InvalidPriming(
            "history must end with a model turn".to_string(),
        ));
    }
    for (index, pair) in turns.windows(2).enumerate() {
        if pair[0].role == pair[1].role {
            return Err(DevmateError::InvalidPriming(format!(
                "turns {} and {} are both {}",
                index,
                index + 1,
                pair[1].role
            )));
        }
    }
    if let Some(index) = turns.iter().position(|t| t.text.trim().is_empty()) {
        return Err(DevmateError::InvalidPriming(format!("turn {} is blank", index)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use devmate_llms::Message;

    #[test]
    fn test_devmate_persona_is_valid() {
        let priming = Priming::devmate().unwrap();
        assert_eq!(priming.turns().len(), 10);
        assert_eq!(priming.turns()[0].role, Role::User);
        assert!(priming.turns()[0].text.contains("coding assistant"));
        assert!(priming.turns()[9].text.contains("DevMate"));
        assert!(priming.system_instruction().is_none());
    }

    #[test]
    fn test_stateless_is_empty() {
        assert!(Priming::stateless().is_empty());
    }

    #[test]
    fn test_must_start_with_user() {
        let err = Priming::new(None, vec![Message::model("a"), Message::user("b")]).unwrap_err();
        assert!(matches!(err, DevmateError::InvalidPriming(_)));
    }

    #[test]
    fn test_must_end_with_model() {
        let err = Priming::new(None, vec![Message::user("a")]).unwrap_err();
        assert!(err.to_string().contains("end with a model turn"));
    }

    #[test]
    fn test_must_alternate() {
        let turns = vec![
            Message::user("a"),
            Message::user("b"),
            Message::model("c"),
        ];
        let err = Priming::new(None, turns).unwrap_err();
        assert!(err.to_string().contains("turns 0 and 1"));
    }

    #[test]
    fn test_blank_turn_rejected() {
        let err = Priming::new(None, vec![Message::user("  "), Message::model("ok")]).unwrap_err();
        assert!(err.to_string().contains("turn 0 is blank"));
    }

    #[test]
    fn test_blank_system_instruction_dropped() {
        let priming = Priming::new(Some("   ".into()), Vec::new()).unwrap();
        assert!(priming.is_empty());
    }

    #[test]
    fn test_from_toml_with_system_instruction() {
        let source = r#"
system_instruction = "Only answer coding questions."

[[turns]]
role = "user"
text = "hi"

[[turns]]
role = "model"
text = "hello"
"#;
        let priming = Priming::from_toml_str(source).unwrap();
        assert_eq!(priming.system_instruction(), Some("Only answer coding questions."));
        assert_eq!(priming.turns().len(), 2);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persona.toml");
        std::fs::write(&path, "system_instruction = \"be terse\"\n").unwrap();
        let priming = Priming::from_path(&path).unwrap();
        assert_eq!(priming.system_instruction(), Some("be terse"));
        assert!(priming.turns().is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Priming::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DevmateError::Io(_)));
    }

    #[test]
    fn test_flattened_moves_turns_into_instruction() {
        let priming = Priming::new(
            Some("You are DevMate.".into()),
            vec![Message::user("only code"), Message::model("Understood.")],
        )
        .unwrap();
        let flat = priming.flattened();
        assert!(flat.turns().is_empty());
        let instruction = flat.system_instruction().unwrap();
        assert!(instruction.starts_with("You are DevMate."));
        assert!(instruction.contains("User: only code"));
        assert!(instruction.contains("Assistant: Understood."));
    }
}
