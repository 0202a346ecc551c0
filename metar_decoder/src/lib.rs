//! Decoder for METAR and SPECI reports issued by Spanish airports.
//!
//! A report is split into tokens, every field is recognized by its own small
//! grammar and the results are composed into a [`DecodedReport`] together with
//! a narrative in Spanish. Only a report without a station code or a day/time
//! stamp is rejected; every other irregularity degrades to "no disponible".

pub mod airports;
pub mod error;
pub mod metar;
pub mod obscuration;
pub mod optional_data;
pub mod pressure;
pub mod report;
pub mod temperature;
pub mod tokens;
pub mod trend;
pub mod units;
pub mod weather;
pub mod wind;

pub use airports::AirportRegistry;
pub use error::FormatError;
pub use metar::{DecodedReport, MetarDecoder};
