use std::io::Write;

use itertools::Itertools;
use metar_decoder::DecodedReport;

use crate::{config::OutputFormat, error::ApplicationResult};

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn list_or_na(values: &[String], separator: &str) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.iter().join(separator)
    }
}

pub(crate) fn write_report<W: Write>(
    writer: &mut W,
    report: &DecodedReport,
    format: OutputFormat,
) -> ApplicationResult<()> {
    match format {
        OutputFormat::Text => write_text(writer, report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn write_text<W: Write>(writer: &mut W, report: &DecodedReport) -> ApplicationResult<()> {
    writeln!(writer, "RAW: {}", report.raw)?;
    writeln!(
        writer,
        "Aeropuerto: {} ({})",
        report.airport_name, report.station
    )?;
    writeln!(writer, "Fecha/hora: {}", or_na(report.datetime.as_deref()))?;

    let mut wind = format!(
        "{} {}",
        or_na(report.wind.direction.as_deref()),
        or_na(report.wind.speed.as_deref())
    );
    if let Some(gusts) = &report.wind.gusts {
        wind.push_str(&format!(" Ráfagas: {gusts}"));
    }
    if let Some(variation) = &report.wind.variation {
        wind.push_str(&format!(" ({variation})"));
    }
    writeln!(writer, "Viento: {wind}")?;

    writeln!(
        writer,
        "Visibilidad: {}",
        or_na(report.visibility.main.as_deref())
    )?;
    if let Some(vertical) = &report.visibility.vertical {
        writeln!(writer, "Visibilidad vertical: {vertical}")?;
    }
    if !report.rvr.is_empty() {
        writeln!(writer, "RVR: {}", report.rvr.iter().join("; "))?;
    }
    writeln!(writer, "Meteorología: {}", list_or_na(&report.weather, ", "))?;
    if !report.recent_weather.is_empty() {
        writeln!(
            writer,
            "Tiempo reciente: {}",
            report.recent_weather.iter().join(", ")
        )?;
    }
    writeln!(writer, "Nubes: {}", list_or_na(&report.clouds, ", "))?;
    writeln!(
        writer,
        "Temp/PR: {} / {}",
        or_na(report.temperature.air.as_deref()),
        or_na(report.temperature.dewpoint.as_deref())
    )?;
    writeln!(writer, "Presión: {}", or_na(report.qnh.as_deref()))?;
    if !report.trends.is_empty() {
        writeln!(writer, "Tendencias: {}", report.trends.iter().join(", "))?;
    }
    if let Some(remarks) = &report.remarks {
        writeln!(writer, "Observaciones: {remarks}")?;
    }
    writeln!(writer, "{}", "-".repeat(30))?;
    writeln!(writer, "{}", report.report_text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use metar_decoder::MetarDecoder;

    use super::*;

    fn decode(raw: &str) -> DecodedReport {
        let now: Timestamp = "2024-06-12T15:00:00Z".parse().unwrap();
        MetarDecoder::default().decode_at(raw, now).unwrap()
    }

    fn render(report: &DecodedReport, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, report, format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_text_summary() {
        let report = decode("METAR LEMD 121330Z 21015G25KT 180V250 9999 FEW030 14/05 Q1012=");
        let text = render(&report, OutputFormat::Text);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "RAW: METAR LEMD 121330Z 21015G25KT 180V250 9999 FEW030 14/05 Q1012=");
        assert_eq!(
            lines[1],
            "Aeropuerto: Aeropuerto Adolfo Suárez Madrid-Barajas (LEMD)"
        );
        assert!(lines.contains(&"Viento: 210° (suroeste) 15 kt Ráfagas: 25 kt (Entre 180° y 250°)"));
        assert!(lines.contains(&"Visibilidad: 10 km o más"));
        assert!(lines.contains(&"Meteorología: N/A"));
        assert!(lines.contains(&"Temp/PR: 14°C / 5°C"));
        assert!(lines.contains(&"Presión: 1012 hPa"));
        assert_eq!(lines.last(), Some(&report.report_text.as_str()));
    }

    #[test]
    fn test_text_summary_missing_fields() {
        let report = decode("LEMD 121330Z");
        let text = render(&report, OutputFormat::Text);
        assert!(text.contains("Viento: N/A N/A\n"));
        assert!(text.contains("Temp/PR: N/A / N/A\n"));
        assert!(!text.contains("Tendencias:"));
    }

    #[test]
    fn test_json_output() {
        let report = decode("METAR LEVC 121430Z 12005KT CAVOK 18/12 Q1015=");
        let json = render(&report, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["station"], "LEVC");
        assert_eq!(value["visibility"]["main"], "CAVOK");
        assert_eq!(value["clouds"][0], "Cielo despejado (CAVOK)");
        assert_eq!(value["weather"], serde_json::json!([]));
        assert!(json.ends_with("}\n"));
    }
}
