//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "quorum-debate";
const PROJECT_FILES: [&str; 2] = ["debate.toml", ".debate.toml"];
const ENV_PREFIX: &str = "DEBATE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `DEBATE_<SECTION>__<KEY>` (e.g. `DEBATE_DEBATE__MAX_ROUNDS=2`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./debate.toml` or `./.debate.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/quorum-debate/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file on top of the defaults, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/quorum-debate/config.toml if set,
    /// otherwise falls back to ~/.config/quorum-debate/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Default location of the REPL history file
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join("history.txt"))
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./debate.toml or ./.debate.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.debate.participants.len(), 3);
        assert_eq!(config.debate.max_rounds, 3);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quorum-debate"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.toml");
        std::fs::write(
            &path,
            r#"
[debate]
participants = [{ label = "Atlas", model = "gpt-5" }]

[judge]
model = "o3-pro"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.debate.participants.len(), 1);
        assert_eq!(config.debate.max_rounds, 3);
        assert_eq!(config.judge.model.as_deref(), Some("o3-pro"));
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_load_file_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.toml");
        std::fs::write(&path, "[debate]\nmax_rounds = \"many\"\n").unwrap();

        assert!(ConfigLoader::load_file(&path).is_err());
    }
}
