use crate::{ConfigError, LogLevel, MshConfig};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/msh/msh.yaml"));
        }
        search_paths.push(PathBuf::from("./msh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<MshConfig, ConfigError> {
        let mut config = MshConfig::default();

        if let Some(ref explicit) = self.explicit_file {
            config = self.parse_yaml(&read_file(explicit)?)?;
        } else if let Ok(env_path) = std::env::var("MSH_CONFIG") {
            config = self.parse_yaml(&read_file(Path::new(&env_path))?)?;
        } else {
            config = self.load_search_paths()?;
        }

        self.apply_env_overrides(&mut config);
        Ok(config)
    }

    fn load_search_paths(&self) -> Result<MshConfig, ConfigError> {
        let mut config = MshConfig::default();
        for path in &self.search_paths {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(content) => config = self.merge_yaml(&config, &content)?,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config file");
                    }
                }
            }
        }
        Ok(config)
    }

    fn parse_yaml(&self, content: &str) -> Result<MshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &MshConfig, content: &str) -> Result<MshConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(Self::merge_configs(base, &overlay))
    }

    fn merge_configs(base: &MshConfig, overlay: &MshConfig) -> MshConfig {
        let defaults = MshConfig::default();
        let mut result = base.clone();

        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt.clone_from(&overlay.shell.prompt);
        }
        if overlay.shell.history != defaults.shell.history {
            result.shell.history = overlay.shell.history.clone();
        }
        if overlay.logging != defaults.logging {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        static VAR_RE: OnceLock<Regex> = OnceLock::new();
        let re = VAR_RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid pattern"));
        re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut MshConfig) {
        apply_overrides(config, |name| std::env::var(name).ok());
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn apply_overrides(config: &mut MshConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(level) = lookup("MSH_LOG_LEVEL") {
        match serde_yaml::from_str::<LogLevel>(&level) {
            Ok(l) => config.logging.level = l,
            Err(_) => tracing::warn!(value = %level, "Ignoring invalid MSH_LOG_LEVEL"),
        }
    }
    if let Some(prompt) = lookup("MSH_PROMPT") {
        config.shell.prompt = prompt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_from_file;
    use std::collections::HashMap;

    #[test]
    fn expand_env_vars_works() {
        std::env::set_var("MSH_TEST_VAR_123", "hello");
        let loader = ConfigLoader::new();
        let result = loader.expand_env_vars("value: ${MSH_TEST_VAR_123}");
        assert_eq!(result, "value: hello");
        std::env::remove_var("MSH_TEST_VAR_123");
    }

    #[test]
    fn missing_env_var_becomes_empty() {
        let loader = ConfigLoader::new();
        let result = loader.expand_env_vars("value: ${NONEXISTENT_VAR_XYZ}");
        assert_eq!(result, "value: ");
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> =
            [("MSH_LOG_LEVEL", "debug"), ("MSH_PROMPT", "% ")].into_iter().collect();
        let mut config = MshConfig::default();
        apply_overrides(&mut config, |name| vars.get(name).map(ToString::to_string));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.shell.prompt, "% ");
    }

    #[test]
    fn invalid_log_level_override_is_ignored() {
        let mut config = MshConfig::default();
        apply_overrides(&mut config, |name| {
            (name == "MSH_LOG_LEVEL").then(|| "loud".to_string())
        });
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn later_search_paths_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user.yaml");
        let local = dir.path().join("local.yaml");
        std::fs::write(&user, "shell:\n  prompt: \"user> \"\nlogging:\n  level: info\n").unwrap();
        std::fs::write(&local, "shell:\n  prompt: \"local> \"\n").unwrap();

        let loader = ConfigLoader::new().with_search_paths(vec![
            user,
            dir.path().join("missing.yaml"),
            local,
        ]);
        let config = loader.load_search_paths().unwrap();

        assert_eq!(config.shell.prompt, "local> ");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("msh.yaml");
        std::fs::write(&file, "shell:\n  history:\n    max_entries: 7\n").unwrap();

        let config = load_from_file(file.to_str().unwrap()).unwrap();
        assert_eq!(config.shell.history.max_entries, 7);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = read_file(Path::new("/definitely/not/here/msh.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
