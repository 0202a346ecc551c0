use nom::{Parser, combinator::all_consuming};

use crate::{
    error::FormatError,
    units::timestamp::{DayTime, nom_metar_timestamp},
};

/// A report normalized to upper case and split on whitespace.
///
/// The end-of-message marker `=` is dropped from the last token so the field
/// grammars can match whole tokens; `raw` keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    raw: String,
    tokens: Vec<String>,
}

/// Identification groups at the start of a report and the tokens left for the
/// field decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBody<'a> {
    pub kind: Option<ReportKind>,
    pub station: &'a str,
    pub day_time: Option<DayTime>,
    pub auto: bool,
    pub tokens: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Metar,
    Speci,
}

impl RawReport {
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_uppercase();
        let mut tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if let Some(last) = tokens.last_mut() {
            let trimmed_len = last.trim_end_matches('=').len();
            last.truncate(trimmed_len);
            if last.is_empty() {
                tokens.pop();
            }
        }
        Self { raw, tokens }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// A station code among the first three tokens and a day/time stamp among
    /// the first four.
    pub fn validate(&self) -> Result<(), FormatError> {
        let has_station = self.tokens().take(3).any(is_station_code);
        let has_time = self.tokens().take(4).any(is_day_time);
        if has_station && has_time {
            Ok(())
        } else {
            Err(FormatError::MissingStationOrTime)
        }
    }

    /// Splits off the identification groups. Expects a validated report.
    pub fn body(&self) -> Result<ReportBody<'_>, FormatError> {
        let mut tokens = self.tokens().peekable();

        let kind = match tokens.peek() {
            Some(&"METAR") => Some(ReportKind::Metar),
            Some(&"SPECI") => Some(ReportKind::Speci),
            _ => None,
        };
        if kind.is_some() {
            tokens.next();
        }

        let station = tokens.next().ok_or(FormatError::MissingStationOrTime)?;

        let day_time = tokens
            .peek()
            .and_then(|token| all_consuming(nom_metar_timestamp).parse(*token).ok())
            .map(|(_, day_time)| day_time);
        if day_time.is_some() {
            tokens.next();
        }

        let mut rest: Vec<&str> = tokens.collect();

        let before = rest.len();
        rest.retain(|token| *token != "AUTO");
        let auto = rest.len() != before;

        Ok(ReportBody {
            kind,
            station,
            day_time,
            auto,
            tokens: rest,
        })
    }
}

fn is_station_code(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_day_time(token: &str) -> bool {
    all_consuming(nom_metar_timestamp).parse(token).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_end_marker() {
        let report = RawReport::new("  metar lebl 121400Z 02010kt q1008=  ");
        assert_eq!(report.raw(), "METAR LEBL 121400Z 02010KT Q1008=");
        assert_eq!(
            report.tokens().collect::<Vec<_>>(),
            ["METAR", "LEBL", "121400Z", "02010KT", "Q1008"]
        );

        let detached = RawReport::new("LEBL 121400Z Q1008 =");
        assert_eq!(detached.tokens().last(), Some("Q1008"));
    }

    #[test]
    fn test_validate() {
        assert!(RawReport::new("METAR LEMD 121330Z 21015KT").validate().is_ok());
        assert!(RawReport::new("LEMD 121330Z").validate().is_ok());
        assert_eq!(
            RawReport::new("").validate(),
            Err(FormatError::MissingStationOrTime)
        );
        assert_eq!(
            RawReport::new("METAR 121330Z 21015KT 9999").validate(),
            Err(FormatError::MissingStationOrTime)
        );
        assert_eq!(
            RawReport::new("METAR LEMD 21015KT 9999 121330Z").validate(),
            Err(FormatError::MissingStationOrTime)
        );
        assert_eq!(
            RawReport::new("HELLO WORLD").validate(),
            Err(FormatError::MissingStationOrTime)
        );
    }

    #[test]
    fn test_body() {
        let report = RawReport::new("SPECI LEZG 121415Z AUTO 30020KT 2000 +TSGR RMK QBB020");
        let body = report.body().unwrap();
        assert_eq!(body.kind, Some(ReportKind::Speci));
        assert_eq!(body.station, "LEZG");
        assert_eq!(
            body.day_time,
            Some(DayTime {
                day: 12,
                hour: 14,
                minute: 15
            })
        );
        assert!(body.auto);
        assert_eq!(body.tokens, ["30020KT", "2000", "+TSGR", "RMK", "QBB020"]);
    }

    #[test]
    fn test_body_without_stamp_after_station() {
        let report = RawReport::new("LEMD COR 121330Z 21015KT");
        let body = report.body().unwrap();
        assert_eq!(body.kind, None);
        assert_eq!(body.station, "LEMD");
        assert_eq!(body.day_time, None);
        assert_eq!(body.tokens, ["COR", "121330Z", "21015KT"]);
    }
}
