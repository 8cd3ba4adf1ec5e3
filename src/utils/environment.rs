use std::env;
use std::path::PathBuf;

/// Environment variable that points at the configuration file
pub const CONFIG_ENV_VAR: &str = "EXPLORE_INDEX_CONFIG";

const CONFIG_DIR_NAME: &str = "explore-index";
const CONFIG_FILENAME: &str = "config.json";

/// Locate the configuration file
///
/// `EXPLORE_INDEX_CONFIG` wins when set. Otherwise the platform config directory is
/// checked (`~/.config/explore-index/config.json` on Linux) and used only if the file
/// exists. `None` means "run with defaults".
pub fn get_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }

    let candidate = dirs::config_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME);
    candidate.is_file().then_some(candidate)
}
