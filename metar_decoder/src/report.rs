use itertools::Itertools;

use crate::metar::DecodedReport;

/// Ends a sentence with exactly one period.
fn clean_sentence(text: &str) -> String {
    format!("{}.", text.trim_end_matches([' ', '.']))
}

/// The narrative of a decoded report, one sentence per populated field in a
/// fixed order.
pub fn compose_narrative(report: &DecodedReport) -> String {
    let mut parts = vec![format!(
        "Informe METAR decodificado para {} ({})",
        report.airport_name, report.station
    )];

    if let Some(datetime) = &report.datetime {
        parts.push(datetime.clone());
    }
    if report.auto_report {
        parts.push(
            "Este es un reporte automático (AUTO), por lo que algunos campos pueden venir \
             incompletos"
                .to_string(),
        );
    }
    if let Some(text) = &report.wind.text {
        parts.push(text.clone());
    }
    if let Some(text) = &report.visibility.text {
        parts.push(text.clone());
    }
    if !report.weather.is_empty() {
        parts.push(format!("Fenómenos actuales: {}", report.weather.join(", ")));
    }
    if !report.recent_weather.is_empty() {
        parts.push(format!(
            "Tiempo reciente observado: {}",
            report.recent_weather.join(", ")
        ));
    }
    if !report.clouds.is_empty() {
        parts.push(format!("Estado de nubes: {}", report.clouds.join("; ")));
    }
    if let Some(text) = &report.temperature.text {
        parts.push(text.clone());
    }
    if let Some(text) = &report.qnh_text {
        parts.push(text.clone());
    }
    if !report.trends.is_empty() {
        parts.push(format!("Tendencias: {}", report.trends.join(", ")));
    }
    if !report.unavailable_groups.is_empty() {
        parts.push(format!(
            "Se detectaron grupos con barras ('/' o '//'), que indican dato no disponible o \
             parcial: {}",
            report.unavailable_groups.join(", ")
        ));
    }

    parts.iter().map(|part| clean_sentence(part)).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> DecodedReport {
        DecodedReport {
            raw: "LEMD 121330Z".to_string(),
            station: "LEMD".to_string(),
            airport_name: "Aeropuerto Adolfo Suárez Madrid-Barajas".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_sentence() {
        assert_eq!(clean_sentence("Viento de 210 grados"), "Viento de 210 grados.");
        assert_eq!(clean_sentence("datos no disponibles. "), "datos no disponibles.");
        assert_eq!(clean_sentence("grupo ////).."), "grupo ////).");
    }

    #[test]
    fn test_identity_only() {
        assert_eq!(
            compose_narrative(&minimal()),
            "Informe METAR decodificado para Aeropuerto Adolfo Suárez Madrid-Barajas (LEMD)."
        );
    }

    #[test]
    fn test_order_of_sentences() {
        let mut report = minimal();
        report.auto_report = true;
        report.wind.text = Some("Viento variable con 2 nudos".to_string());
        report.weather = vec!["neblina".to_string(), "lluvia ligera".to_string()];
        report.clouds = vec!["NSC: sin nubes significativas".to_string()];
        report.qnh_text = Some("QNH de 1013 hectopascales".to_string());
        report.unavailable_groups = vec!["//////CB".to_string()];
        assert_eq!(
            compose_narrative(&report),
            "Informe METAR decodificado para Aeropuerto Adolfo Suárez Madrid-Barajas (LEMD). \
             Este es un reporte automático (AUTO), por lo que algunos campos pueden venir \
             incompletos. Viento variable con 2 nudos. Fenómenos actuales: neblina, lluvia \
             ligera. Estado de nubes: NSC: sin nubes significativas. QNH de 1013 hectopascales. \
             Se detectaron grupos con barras ('/' o '//'), que indican dato no disponible o \
             parcial: //////CB."
        );
    }
}
