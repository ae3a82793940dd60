use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override, mainly for containers and tests.
fn base_path_override() -> Option<PathBuf> {
    std::env::var("REELIST_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelist");

        Ok(Self::with_base(&base_dir))
    }

    /// Root all managed paths under an explicit base directory.
    pub fn with_base(base: &Path) -> Self {
        Self {
            config_dir: base.to_path_buf(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// The single on-device document holding the serialized watchlist.
    pub fn watchlist_file(&self) -> PathBuf {
        self.data_dir.join("watchlist.json")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::with_base(&base);
        }

        // Platform-specific paths (e.g. ~/.config/reelist on Linux), falling
        // back to the current directory when no home is resolvable.
        Self::new().unwrap_or_else(|_| Self::with_base(Path::new(".reelist")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_base() {
        let pm = PathManager::with_base(Path::new("/tmp/reelist-test"));
        assert_eq!(pm.config_file(), PathBuf::from("/tmp/reelist-test/config.toml"));
        assert_eq!(
            pm.watchlist_file(),
            PathBuf::from("/tmp/reelist-test/data/watchlist.json")
        );
        assert_eq!(pm.log_dir(), Path::new("/tmp/reelist-test/logs"));
    }
}
