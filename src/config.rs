use std::path::PathBuf;

use derive_more::IsVariant;

use crate::{
    grid::Grid,
    tool::{ImageTool, Native, Sips},
};

pub const ASSETS_DIR_DEFAULT: &str = "public/assets/upgrades";
pub const ASSETS_DIR_VAR: &str = "UPGRADE_ASSETS_DIR";
pub const BACKEND_VAR: &str = "UPGRADE_SLICER_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Backend {
    Sips,
    Native,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Backend::Sips
        } else {
            Backend::Native
        }
    }
}

impl Backend {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sips" => Some(Backend::Sips),
            "native" => Some(Backend::Native),
            _ => None,
        }
    }

    pub fn tool(self) -> Box<dyn ImageTool> {
        match self {
            Backend::Sips => Box::new(Sips::default()),
            Backend::Native => Box::new(Native::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    /// Tiles land next to the sheets unless this is changed
    pub output_dir: PathBuf,
    pub grid: Grid,
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            input_dir: ASSETS_DIR_DEFAULT.into(),
            output_dir: ASSETS_DIR_DEFAULT.into(),
            grid: Grid::default(),
            backend: Backend::default(),
        };
    }
}

impl Config {
    pub fn from_env() -> Self {
        return Self::from_vars(|key| std::env::var(key).ok());
    }

    /// Defaults overridden by whatever `lookup` knows about
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(ASSETS_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.input_dir = PathBuf::from(&dir);
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(BACKEND_VAR) {
            match Backend::from_name(&name) {
                Some(backend) => config.backend = backend,
                None => log::warn!(
                    "unknown {} {name:?}, using {:?}",
                    BACKEND_VAR,
                    config.backend
                ),
            }
        }
        return config;
    }

    pub fn with_dirs(mut self, input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self.output_dir = output_dir.into();
        return self;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_vars(vars(&[]));
        assert_eq!(config.input_dir, PathBuf::from(ASSETS_DIR_DEFAULT));
        assert_eq!(config.output_dir, config.input_dir);
        assert_eq!(config.grid, Grid::default());
        assert_eq!(config.backend, Backend::default());
    }

    #[test]
    fn env_overrides_dir_and_backend() {
        let config = Config::from_vars(vars(&[
            (ASSETS_DIR_VAR, "/tmp/upgrades"),
            (BACKEND_VAR, "Native"),
        ]));
        assert_eq!(config.input_dir, PathBuf::from("/tmp/upgrades"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/upgrades"));
        assert!(config.backend.is_native());
    }

    #[test]
    fn unknown_backend_keeps_default() {
        let config = Config::from_vars(vars(&[(BACKEND_VAR, "imagemagick")]));
        assert_eq!(config.backend, Backend::default());
    }

    #[test]
    fn backend_names() {
        assert_eq!(Backend::from_name("sips"), Some(Backend::Sips));
        assert_eq!(Backend::from_name(" NATIVE "), Some(Backend::Native));
        assert_eq!(Backend::from_name(""), None);
    }
}
