//! Layered configuration: built-in defaults, the user's config directory,
//! the workspace `releng.toml` (or an explicit file), then `RELENG_*`
//! environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::error::Result;

pub const WORKSPACE_CONFIG_FILE: &str = "releng.toml";

/// Location of the per-user configuration file, if the platform has one.
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("releng").join("config.toml"))
}

pub mod syntax {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct RelengConfiguration {
        pub workspace: WorkspaceConfiguration,

        pub copyright: CopyrightConfiguration,

        pub version: VersionConfiguration,

        pub settings: SettingsConfiguration,

        pub nature: NatureConfiguration,
    }

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct WorkspaceConfiguration {
        /// Projects whose name starts with this take part in version updates
        /// and settings copies.
        pub project_prefix: String,

        #[serde(default)]
        pub exclude_dirs: Vec<String>,
    }

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct CopyrightConfiguration {
        pub file_pattern: String,

        pub marker: String,

        pub notice: String,
    }

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct VersionConfiguration {
        pub default: String,

        #[serde(default)]
        pub reminder: Option<String>,
    }

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct SettingsConfiguration {
        pub folder: String,

        /// Empty to copy into every filtered project.
        #[serde(default)]
        pub require_file: String,
    }

    #[derive(Clone, Debug, Deserialize, Serialize)]
    pub struct NatureConfiguration {
        pub id: String,
    }
}

#[derive(Clone, Debug)]
pub struct ConfigurationFile {
    pub workspace: syntax::WorkspaceConfiguration,
    pub copyright: syntax::CopyrightConfiguration,
    pub version: syntax::VersionConfiguration,
    pub settings: syntax::SettingsConfiguration,
    pub nature: syntax::NatureConfiguration,
}

impl ConfigurationFile {
    /// Loads the configuration for the workspace at `root`. An `explicit`
    /// file replaces the workspace `releng.toml` and must exist.
    pub fn get(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let embedded_config_str = super::embed::EmbeddedConfig::get_config_string()?;

        let mut builder =
            Config::builder().add_source(File::from_str(&embedded_config_str, FileFormat::Toml));

        if let Some(user_config) = user_config_file() {
            builder = builder.add_source(File::from(user_config).required(false));
        }

        let (workspace_config, required): (PathBuf, bool) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (root.join(WORKSPACE_CONFIG_FILE), false),
        };
        debug!("workspace configuration: {}", workspace_config.display());
        builder = builder.add_source(
            File::from(workspace_config)
                .format(FileFormat::Toml)
                .required(required),
        );

        let cfg: syntax::RelengConfiguration = builder
            .add_source(
                Environment::with_prefix("RELENG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(ConfigurationFile {
            workspace: cfg.workspace,
            copyright: cfg.copyright,
            version: cfg.version,
            settings: cfg.settings,
            nature: cfg.nature,
        })
    }

    pub fn required_settings_file(&self) -> Option<&str> {
        let file = self.settings.require_file.trim();
        (!file.is_empty()).then_some(file)
    }
}
