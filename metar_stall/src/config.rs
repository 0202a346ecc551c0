use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use indexmap::IndexMap;
use metar_decoder::AirportRegistry;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");
const ENV_PREFIX: &str = "METAR_STALL";

pub(crate) fn metar_stall_project_dir() -> Option<ProjectDirs> {
    ProjectDirs::from("", "metar_stall", "metar_stall")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub min_length: usize,
    pub max_length: usize,
    pub output: OutputFormat,
    pub log_filter: Option<String>,
    #[serde(default)]
    pub extra_airports: IndexMap<String, String>,
}

impl Settings {
    /// Built-in defaults, then the user file, then `METAR_STALL_*` variables.
    ///
    /// An explicit `path` must exist. The file in the project config directory
    /// is optional.
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        let user_file = match path {
            Some(path) => Some((path.to_path_buf(), true)),
            None => metar_stall_project_dir()
                .map(|dirs| (dirs.config_dir().join("config.toml"), false)),
        };
        Self::load_from(user_file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(
        user_file: Option<(PathBuf, bool)>,
        environment: Environment,
    ) -> ApplicationResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some((path, required)) = user_file {
            debug!(?path, required, "Reading settings file");
            builder = builder.add_source(File::from(path).required(required));
        }
        let settings = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.check()?;
        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    fn check(&self) -> ApplicationResult<()> {
        if self.min_length > self.max_length {
            return Err(ApplicationError::InvalidSettings(format!(
                "min_length ({}) is greater than max_length ({})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The built-in table with the configured airports on top.
    pub fn airport_registry(&self) -> AirportRegistry {
        let mut registry = AirportRegistry::spanish();
        registry.extend(&self.extra_airports);
        registry
    }
}
