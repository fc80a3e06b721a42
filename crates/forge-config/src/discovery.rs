//! Filesystem discovery of the project's config directory and make manifests.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Candidate config directory names, tried in order.
const CONFIG_DIR_NAMES: &[&str] = &[".enb", ".bem"];

/// Prefixes tried when looking for a make manifest, in order: the
/// historically-named `enb-make` file first, then the bare `make` file.
const MAKEFILE_PREFIXES: &[&str] = &["enb-", ""];

/// Which make manifest is being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakefileKind {
    /// The project-wide, checked-in make manifest.
    Make,
    /// A personal, usually gitignored, override manifest.
    MakePersonal,
}

impl MakefileKind {
    fn stem(self) -> &'static str {
        match self {
            MakefileKind::Make => "make",
            MakefileKind::MakePersonal => "make.personal",
        }
    }
}

/// Locates a project's config directory and make manifests on disk.
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find the project's config directory (`.enb` or `.bem`, in that order).
    pub fn get_config_dir(&self) -> Result<PathBuf> {
        for name in CONFIG_DIR_NAMES {
            let candidate = self.root.join(name);
            if candidate.is_dir() {
                return Ok(candidate);
            }
        }

        Err(ConfigError::ConfigDirNotFound {
            root: self.root.clone(),
        })
    }

    /// Find a make manifest of the given kind inside `config_dir`.
    ///
    /// Tries `enb-make.toml` before `make.toml` (and the `.personal` variants
    /// analogously). Returns `MakefileNotFound` when neither exists — this is
    /// only an error for `MakefileKind::Make`; callers treat a missing
    /// personal manifest as "none declared".
    pub fn get_make_file(&self, config_dir: &Path, kind: MakefileKind) -> Result<Option<PathBuf>> {
        for prefix in MAKEFILE_PREFIXES {
            let candidate = config_dir.join(format!("{prefix}{}.toml", kind.stem()));
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }

    /// Convenience: discover the config dir, then require a primary make
    /// manifest to exist within it.
    pub fn discover_primary_makefile(&self) -> Result<(PathBuf, PathBuf)> {
        let config_dir = self.get_config_dir()?;
        let makefile = self
            .get_make_file(&config_dir, MakefileKind::Make)?
            .ok_or_else(|| ConfigError::MakefileNotFound {
                config_dir: config_dir.clone(),
            })?;
        Ok((config_dir, makefile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_config_dir_fails_when_absent() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(matches!(
            discovery.get_config_dir(),
            Err(ConfigError::ConfigDirNotFound { .. })
        ));
    }

    #[test]
    fn get_config_dir_prefers_enb_over_bem() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".enb")).unwrap();
        std::fs::create_dir(dir.path().join(".bem")).unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.get_config_dir().unwrap(), dir.path().join(".enb"));
    }

    #[test]
    fn get_make_file_prefers_enb_prefixed() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".enb");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(config_dir.join("enb-make.toml"), "").unwrap();
        std::fs::write(config_dir.join("make.toml"), "").unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        let found = discovery
            .get_make_file(&config_dir, MakefileKind::Make)
            .unwrap()
            .unwrap();
        assert_eq!(found, config_dir.join("enb-make.toml"));
    }

    #[test]
    fn get_make_file_personal_is_none_when_absent() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".enb");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(config_dir.join("make.toml"), "").unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        let personal = discovery
            .get_make_file(&config_dir, MakefileKind::MakePersonal)
            .unwrap();
        assert!(personal.is_none());
    }

    #[test]
    fn discover_primary_makefile_errors_without_manifest() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".enb")).unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert!(matches!(
            discovery.discover_primary_makefile(),
            Err(ConfigError::MakefileNotFound { .. })
        ));
    }
}
