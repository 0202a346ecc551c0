use std::{io, process::ExitCode};

use config::ConfigError;
use metar_decoder::FormatError;
use thiserror::Error;

use crate::input::InputError;

pub(crate) type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub(crate) enum ApplicationError {
    #[error("Error regarding config: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("System input/output error: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to serialize JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to serialize TOML: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("{0}")]
    InvalidInput(#[from] InputError),
    #[error("{0}")]
    MetarFormatError(#[from] FormatError),
}

impl ApplicationError {
    /// 2 for input the user can fix, 1 for everything else.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ApplicationError::InvalidInput(_) | ApplicationError::MetarFormatError(_) => {
                ExitCode::from(2)
            }
            _ => ExitCode::FAILURE,
        }
    }

    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            ApplicationError::InvalidInput(_) | ApplicationError::MetarFormatError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_input_classification() {
        assert!(ApplicationError::from(FormatError::MissingStationOrTime).is_bad_input());
        assert!(ApplicationError::from(InputError::Empty).is_bad_input());
        assert!(!ApplicationError::InvalidSettings("x".to_string()).is_bad_input());
        assert!(!ApplicationError::from(io::Error::other("broken pipe")).is_bad_input());
    }

    #[test]
    fn test_messages_are_passed_through() {
        assert_eq!(
            ApplicationError::from(FormatError::MissingStationOrTime).to_string(),
            "Formato METAR inválido: faltan estación o fecha/hora"
        );
        assert_eq!(
            ApplicationError::from(InputError::InvalidCharacters).to_string(),
            "El METAR contiene caracteres no válidos."
        );
    }
}
