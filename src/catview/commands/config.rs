use crate::commands::{CmdMessage, CmdResult};
use crate::config::CatviewConfig;
use crate::error::{CatalogError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

const KEYS: &[&str] = &["endpoint"];

fn unknown_key(key: &str) -> CatalogError {
    CatalogError::Api(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        KEYS.join(", ")
    ))
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = CatviewConfig::load(config_dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => match key.as_str() {
            "endpoint" => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::info(config.endpoint));
                Ok(result)
            }
            _ => Err(unknown_key(&key)),
        },
        ConfigAction::Set(key, value) => {
            match key.as_str() {
                "endpoint" => config.set_endpoint(&value)?,
                _ => return Err(unknown_key(&key)),
            }
            config.save(config_dir)?;
            tracing::info!(key = %key, dir = %config_dir.display(), "config updated");
            let mut result = CmdResult::default().with_config(config.clone());
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, config.endpoint
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn shows_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(CatviewConfig::default()));
    }

    #[test]
    fn set_then_show_key() {
        let dir = tempfile::tempdir().unwrap();
        let set = run(
            dir.path(),
            ConfigAction::Set("endpoint".into(), "https://catalog.test/api".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].level, MessageLevel::Success);

        let shown = run(dir.path(), ConfigAction::ShowKey("endpoint".into())).unwrap();
        assert_eq!(shown.messages[0].content, "https://catalog.test/api");
    }

    #[test]
    fn unknown_key_is_api_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), ConfigAction::ShowKey("theme".into())).unwrap_err();
        assert!(matches!(err, CatalogError::Api(_)));

        let err = run(dir.path(), ConfigAction::Set("theme".into(), "dark".into())).unwrap_err();
        assert!(matches!(err, CatalogError::Api(_)));
        assert!(!dir.path().join("config.json").exists());
    }
}
