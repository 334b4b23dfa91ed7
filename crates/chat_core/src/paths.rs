use std::path::PathBuf;

/// Application directory (~/.aura-agent)
pub fn app_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".aura-agent")
}

/// Path of the JSON configuration file
pub fn config_json_path() -> PathBuf {
    app_dir().join("config.json")
}
