use std::path::Path;

use air_hockey_shared::config::MatchConfig;

pub const CONFIG_ENV_VAR: &str = "AIR_HOCKEY_CONFIG";

/// Match configuration from the JSON file named by `AIR_HOCKEY_CONFIG`, or
/// the defaults when the variable is unset.
pub fn match_config_from_env() -> Result<MatchConfig, String> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.is_empty() => load_match_config(Path::new(&path)),
        _ => Ok(MatchConfig::default()),
    }
}

pub fn load_match_config(path: &Path) -> Result<MatchConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let config = MatchConfig::from_json(&text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_hockey_shared::config::DragMode;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("air-hockey-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_partial_config_file() {
        let path = write_temp("partial.json", r#"{"dragMode": "anchored", "roundPauseSecs": 2.5}"#);
        let config = load_match_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.drag_mode, DragMode::Anchored);
        assert_eq!(config.round_pause_secs, 2.5);
        assert_eq!(config.winning_score, 4);
    }

    #[test]
    fn rejects_invalid_values() {
        let path = write_temp("invalid.json", r#"{"winningScore": 9}"#);
        let err = load_match_config(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(err.contains("winning_score"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_match_config(Path::new("/nonexistent/air-hockey.json")).unwrap_err();
        assert!(err.starts_with("cannot read"));
    }
}
