use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("Formato METAR inválido: faltan estación o fecha/hora")]
    MissingStationOrTime,
}
