use std::path::PathBuf;

/// Core configuration locating the data directory.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("folio.redb")
    }

    pub fn exports_path(&self) -> PathBuf {
        self.base_path.join("exports")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_path.join("config.toml")
    }

    pub fn default_profile_path(&self) -> PathBuf {
        self.base_path.join("profile.json")
    }
}
