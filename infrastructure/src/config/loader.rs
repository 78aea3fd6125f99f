//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: &[&str] = &["toolpilot.toml", ".toolpilot.toml"];

/// Prefix for environment overrides, e.g. `TOOLPILOT_AGENT__MAX_ITERATIONS=3`
const ENV_PREFIX: &str = "TOOLPILOT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TOOLPILOT_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./toolpilot.toml` or `./.toolpilot.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/toolpilot/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// The merged provider chain, without extracting.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/toolpilot/config.toml if set,
    /// otherwise falls back to the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("toolpilot").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] Environment: {}*", ENV_PREFIX));

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!(
                "  [     ] Project: ./{}",
                PROJECT_CONFIG_FILES.join(" or ./")
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }

    /// The merged configuration as TOML (for --show-config)
    pub fn render_effective(config: &FileConfig) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.provider.kind, "openai");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("toolpilot"));
    }

    #[test]
    fn test_project_file_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "toolpilot.toml",
                r#"
                [agent]
                max_iterations = 4

                [provider]
                kind = "gemini"
                "#,
            )?;
            jail.set_env("TOOLPILOT_AGENT__MAX_EXECUTION_SECS", "15");
            jail.set_env("TOOLPILOT_PROVIDER__KIND", "ollama");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.agent.max_iterations, 4);
            assert_eq!(config.agent.max_execution_secs, 15);
            assert_eq!(config.provider.kind, "ollama");
            assert_eq!(config.repl.history_size, 100);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_beats_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".toolpilot.toml", "[agent]\nmax_iterations = 4\n")?;
            jail.create_file("custom.toml", "[agent]\nmax_iterations = 7\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.agent.max_iterations, 7);
            Ok(())
        });
    }

    #[test]
    fn test_render_effective_round_trips() {
        let rendered = ConfigLoader::render_effective(&FileConfig::default()).unwrap();
        assert!(rendered.contains("[agent]"));
        assert!(rendered.contains("max_iterations = 10"));

        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, FileConfig::default());
    }

    #[test]
    fn test_invalid_type_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("toolpilot.toml", "[agent]\nmax_iterations = \"many\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
