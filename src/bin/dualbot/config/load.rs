use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    load_from(ConfigPaths::resolve(path_override)?)
}

pub(super) fn load_from(paths: ConfigPaths) -> Result<LoadedConfig, ConfigError> {
    ensure_dirs(&paths)?;
    let read = read_config(&paths.config_file)?;
    secure_file_permissions(&paths.config_file)?;
    Ok(LoadedConfig {
        config: read.config,
        paths,
        config_exists: read.exists,
    })
}

fn read_config(path: &Path) -> Result<ConfigRead, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(ConfigRead {
            config: toml::from_str(&contents)?,
            exists: true,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigRead {
            config: AppConfig::default(),
            exists: false,
        }),
        Err(err) => Err(ConfigError::Io(err)),
    }
}

struct ConfigRead {
    config: AppConfig,
    exists: bool,
}

fn ensure_dirs(paths: &ConfigPaths) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.config_dir)?;
    fs::create_dir_all(&paths.data_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    Ok(())
}

/// The config may hold an API key; keep it owner-readable only.
fn secure_file_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            let mode = perms.mode() & 0o777;
            if mode & 0o077 != 0 {
                perms.set_mode(0o600);
                fs::set_permissions(path, perms)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults_and_creates_dirs() {
        let root = tempfile::tempdir().expect("tempdir");
        let loaded = load_from(ConfigPaths::under(root.path())).expect("load");

        assert!(!loaded.config_exists);
        assert_eq!(loaded.config.engine.id, "openai");
        assert_eq!(loaded.config.models.debater.model, "gpt-4");
        assert!(loaded.paths.logs_dir.is_dir());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let root = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::under(root.path());
        fs::create_dir_all(&paths.config_dir).expect("config dir");
        fs::write(
            &paths.config_file,
            r#"
[engine]
id = "ollama"
base_url = "http://localhost:11434/v1/"

[engine.resilience]
max_attempts = 5

[models]
history_window = 3

[models.debater]
model = "llama3.1"
temperature = 0.6

[logging]
level = "debug"
"#,
        )
        .expect("write");

        let loaded = load_from(paths).expect("load");
        let config = loaded.config;
        assert!(loaded.config_exists);
        assert_eq!(config.engine.id, "ollama");
        assert_eq!(config.engine.api_key_env, "OPENAI_API_KEY");
        assert_eq!(
            config.engine.resilience.map(|r| r.max_attempts),
            Some(5)
        );
        assert_eq!(config.models.debater.model, "llama3.1");
        assert_eq!(config.models.history_window, Some(3));
        assert_eq!(config.models.journalist.model, "gpt-3.5-turbo");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotate_keep, 5);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let root = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::under(root.path());
        fs::create_dir_all(&paths.config_dir).expect("config dir");
        fs::write(&paths.config_file, "[engine\nid = 1").expect("write");

        assert!(matches!(load_from(paths), Err(ConfigError::Toml(_))));
    }

    #[cfg(unix)]
    #[test]
    fn config_file_is_made_private() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::under(root.path());
        fs::create_dir_all(&paths.config_dir).expect("config dir");
        fs::write(&paths.config_file, "").expect("write");
        fs::set_permissions(&paths.config_file, fs::Permissions::from_mode(0o644))
            .expect("chmod");

        let loaded = load_from(paths).expect("load");
        let mode = fs::metadata(&loaded.paths.config_file)
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
