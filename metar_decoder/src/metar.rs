use jiff::Timestamp;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    airports::AirportRegistry,
    error::FormatError,
    obscuration::{Visibility, decode_obscuration},
    pressure::decode_pressure,
    report::compose_narrative,
    temperature::{Temperature, decode_temperature},
    tokens::RawReport,
    trend::decode_trends,
    units::timestamp::ReportTime,
    weather::decode_weather,
    wind::{Wind, decode_wind},
};

const AUTO_REMARKS: &str = "Reporte Automático";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedReport {
    pub raw: String,
    pub station: String,
    pub airport_name: String,
    pub datetime: Option<String>,
    pub auto_report: bool,
    pub wind: Wind,
    pub visibility: Visibility,
    pub weather: Vec<String>,
    pub recent_weather: Vec<String>,
    pub clouds: Vec<String>,
    pub temperature: Temperature,
    pub qnh: Option<String>,
    pub qnh_text: Option<String>,
    pub rvr: Vec<String>,
    pub remarks: Option<String>,
    pub trends: Vec<String>,
    pub unavailable_groups: Vec<String>,
    pub report_text: String,
}

/// Decodes reports against a fixed airport registry. Holds no other state, so
/// one decoder can serve any number of threads.
#[derive(Debug, Clone)]
pub struct MetarDecoder {
    registry: AirportRegistry,
}

impl Default for MetarDecoder {
    fn default() -> Self {
        Self::new(AirportRegistry::spanish())
    }
}

impl MetarDecoder {
    pub fn new(registry: AirportRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AirportRegistry {
        &self.registry
    }

    /// Decodes a report observed relative to the current instant.
    pub fn decode(&self, raw: &str) -> Result<DecodedReport, FormatError> {
        self.decode_at(raw, Timestamp::now())
    }

    /// Decodes a report, placing its day/time stamp in the month nearest to
    /// `now`.
    pub fn decode_at(&self, raw: &str, now: Timestamp) -> Result<DecodedReport, FormatError> {
        let report = RawReport::new(raw);
        report.validate()?;
        let body = report.body()?;
        let tokens = body.tokens.as_slice();
        debug!(station = body.station, kind = ?body.kind, "Decoding report");

        let datetime = body
            .day_time
            .and_then(|day_time| ReportTime::resolve(day_time, now))
            .map(|time| time.to_string());

        let obscuration = decode_obscuration(tokens);
        let (mut weather, recent_weather) = decode_weather(tokens);
        if obscuration.cavok {
            weather.clear();
        }
        let pressure = decode_pressure(tokens);

        let unavailable_groups = tokens
            .iter()
            .filter(|token| token.contains("//"))
            .map(|token| token.to_string())
            .collect::<Vec<_>>();
        if !unavailable_groups.is_empty() {
            trace!(?unavailable_groups, "Groups with unavailable data");
        }

        let remarks = body.auto.then(|| AUTO_REMARKS.to_string());

        let mut decoded = DecodedReport {
            raw: report.raw().to_string(),
            station: body.station.to_string(),
            airport_name: self.registry.display_name(body.station).to_string(),
            datetime,
            auto_report: body.auto,
            wind: decode_wind(tokens),
            visibility: obscuration.visibility,
            weather,
            recent_weather,
            clouds: obscuration.clouds,
            temperature: decode_temperature(tokens),
            qnh: pressure.as_ref().map(|p| p.value()),
            qnh_text: pressure.as_ref().map(|p| p.sentence()),
            rvr: obscuration.rvr,
            remarks,
            trends: decode_trends(tokens),
            unavailable_groups,
            report_text: String::new(),
        };
        decoded.report_text = compose_narrative(&decoded);
        debug!(station = decoded.station, "Report decoded");
        Ok(decoded)
    }
}
