use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("El METAR está vacío.")]
    Empty,
    #[error("El METAR debe tener entre {min} y {max} caracteres (tiene {length}).")]
    Length {
        length: usize,
        min: usize,
        max: usize,
    },
    #[error("El METAR contiene caracteres no válidos.")]
    InvalidCharacters,
}

static REPORT_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s/+=.\-]+$").unwrap());

/// Trims the report and checks its length and character set. The decoder
/// itself never re-checks any of this.
pub(crate) fn validate_report<'a>(raw: &'a str, settings: &Settings) -> Result<&'a str, InputError> {
    let report = raw.trim();
    if report.is_empty() {
        return Err(InputError::Empty);
    }
    let length = report.chars().count();
    if !(settings.min_length..=settings.max_length).contains(&length) {
        debug!(length, "Report length out of bounds");
        return Err(InputError::Length {
            length,
            min: settings.min_length,
            max: settings.max_length,
        });
    }
    if !REPORT_CHARSET.is_match(report) {
        return Err(InputError::InvalidCharacters);
    }
    Ok(report)
}
