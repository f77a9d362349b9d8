//! Skill configuration
//!
//! Configuration is passed explicitly into the skill's constructor. It can be
//! read from a JSON document and then overridden from `SKILL_*` environment
//! variables. Every field has a default, so an empty document is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{SkillError, SkillResult};
use crate::routing::{CANCEL_INTENT, STOP_INTENT};

/// Intent name carrying the free-text dialog slot
pub const DEFAULT_DIALOG_INTENT: &str = "DialogTideIntent";
/// Slot inspected by the dialog state advancer
pub const DEFAULT_DIALOG_SLOT: &str = "Everywhere";

/// Intent names owned by fixed handlers; the dialog intent may not reuse them
pub const RESERVED_INTENTS: [&str; 2] = [STOP_INTENT, CANCEL_INTENT];

/// How the dialog advancer resolves a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    /// Every branch falls through to the one-time-password prompt and the
    /// closing confirmation, matching the deployed skill
    #[default]
    Legacy,
    /// Each slot value maps to exactly one response
    SingleExit,
}

impl FromStr for DialogMode {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(DialogMode::Legacy),
            "single_exit" | "single-exit" => Ok(DialogMode::SingleExit),
            other => Err(SkillError::UnknownDialogMode(other.to_string())),
        }
    }
}

/// Configuration for a skill instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Only accept callers presenting this application id; `None` accepts any
    #[serde(default)]
    pub app_id: Option<String>,

    /// Dialog resolution mode
    #[serde(default)]
    pub dialog_mode: DialogMode,

    /// Name of the free-text dialog intent
    #[serde(default = "default_dialog_intent")]
    pub dialog_intent: String,

    /// Name of the slot read by the dialog intent
    #[serde(default = "default_dialog_slot")]
    pub dialog_slot: String,
}

fn default_dialog_intent() -> String {
    DEFAULT_DIALOG_INTENT.to_string()
}

fn default_dialog_slot() -> String {
    DEFAULT_DIALOG_SLOT.to_string()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            dialog_mode: DialogMode::default(),
            dialog_intent: default_dialog_intent(),
            dialog_slot: default_dialog_slot(),
        }
    }
}

impl SkillConfig {
    /// Restrict the skill to a single caller
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Select the dialog resolution mode
    pub fn with_dialog_mode(mut self, mode: DialogMode) -> Self {
        self.dialog_mode = mode;
        self
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(raw: &str) -> SkillResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| SkillError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> SkillResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Apply `SKILL_*` overrides from the process environment
    pub fn apply_env(self) -> SkillResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> SkillResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(app_id) = lookup("SKILL_APP_ID") {
            // An empty value clears the restriction
            self.app_id = if app_id.is_empty() { None } else { Some(app_id) };
        }
        if let Some(mode) = lookup("SKILL_DIALOG_MODE") {
            self.dialog_mode = mode.parse()?;
        }
        if let Some(intent) = lookup("SKILL_DIALOG_INTENT") {
            self.dialog_intent = intent;
        }
        if let Some(slot) = lookup("SKILL_DIALOG_SLOT") {
            self.dialog_slot = slot;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the configuration yields a usable router
    pub fn validate(&self) -> SkillResult<()> {
        if self.dialog_intent.trim().is_empty() {
            return Err(SkillError::Config("dialog_intent must not be empty".to_string()));
        }
        if RESERVED_INTENTS.contains(&self.dialog_intent.as_str()) {
            return Err(SkillError::Config(format!(
                "dialog_intent '{}' is reserved for a built-in handler",
                self.dialog_intent
            )));
        }
        if self.dialog_slot.trim().is_empty() {
            return Err(SkillError::Config("dialog_slot must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SkillConfig::default();
        assert_eq!(config.app_id, None);
        assert_eq!(config.dialog_mode, DialogMode::Legacy);
        assert_eq!(config.dialog_intent, "DialogTideIntent");
        assert_eq!(config.dialog_slot, "Everywhere");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SkillConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SkillConfig::default());
    }

    #[test]
    fn test_parse_document() {
        let config = SkillConfig::from_json_str(
            r#"{ "app_id": "amzn1.echo-sdk-ams.app.123", "dialog_mode": "single_exit" }"#,
        )
        .unwrap();
        assert_eq!(config.app_id.as_deref(), Some("amzn1.echo-sdk-ams.app.123"));
        assert_eq!(config.dialog_mode, DialogMode::SingleExit);
        assert_eq!(config.dialog_slot, "Everywhere");
    }

    #[test]
    fn test_bad_document() {
        let result = SkillConfig::from_json_str(r#"{ "dialog_mode": "chatty" }"#);
        assert!(matches!(result, Err(SkillError::Config(_))));
    }

    #[test]
    fn test_document_is_validated() {
        let empty = SkillConfig::from_json_str(r#"{ "dialog_intent": "" }"#);
        assert!(matches!(empty, Err(SkillError::Config(_))));

        let blank_slot = SkillConfig::from_json_str(r#"{ "dialog_slot": "  " }"#);
        assert!(matches!(blank_slot, Err(SkillError::Config(_))));
    }

    #[test]
    fn test_reserved_dialog_intent_is_rejected() {
        for name in RESERVED_INTENTS {
            let raw = format!(r#"{{ "dialog_intent": "{}" }}"#, name);
            let result = SkillConfig::from_json_str(&raw);
            assert!(
                matches!(result, Err(SkillError::Config(ref m)) if m.contains("reserved")),
                "intent {}",
                name
            );

            let result = SkillConfig::default()
                .apply_overrides(|key| (key == "SKILL_DIALOG_INTENT").then(|| name.to_string()));
            assert!(matches!(result, Err(SkillError::Config(_))), "intent {}", name);
        }
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = SkillConfig::default()
            .with_app_id("amzn1.echo-sdk-ams.app.visa")
            .with_dialog_mode(DialogMode::SingleExit);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
            .unwrap();

        let loaded = SkillConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = SkillConfig::from_file(dir.path().join("skill.json"));
        assert!(matches!(result, Err(SkillError::Io(_))));
    }

    #[test]
    fn test_overrides() {
        let mut env = HashMap::new();
        env.insert("SKILL_APP_ID", "app-7".to_string());
        env.insert("SKILL_DIALOG_MODE", "Single-Exit".to_string());

        let config = SkillConfig::default()
            .apply_overrides(|key| env.get(key).cloned())
            .unwrap();
        assert_eq!(config.app_id.as_deref(), Some("app-7"));
        assert_eq!(config.dialog_mode, DialogMode::SingleExit);
    }

    #[test]
    fn test_empty_app_id_override_clears_restriction() {
        let config = SkillConfig::default()
            .with_app_id("app-7")
            .apply_overrides(|key| (key == "SKILL_APP_ID").then(String::new))
            .unwrap();
        assert_eq!(config.app_id, None);
    }

    #[test]
    fn test_unknown_mode_override() {
        let result = SkillConfig::default()
            .apply_overrides(|key| (key == "SKILL_DIALOG_MODE").then(|| "chatty".to_string()));
        assert!(matches!(result, Err(SkillError::UnknownDialogMode(m)) if m == "chatty"));
    }

    #[test]
    fn test_empty_slot_override_is_rejected() {
        let result = SkillConfig::default()
            .apply_overrides(|key| (key == "SKILL_DIALOG_SLOT").then(|| " ".to_string()));
        assert!(matches!(result, Err(SkillError::Config(_))));
    }
}
