//! Present and recent weather groups, e.g. `-RA`, `+TSGR`, `VCFG`, `RESHRA`.
//!
//! A group is an optional intensity, an optional `VC`, an optional descriptor
//! and one or more two letter codes. A group with an unknown or incomplete
//! code is rejected as a whole.

use std::fmt;

use itertools::Itertools;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take},
    combinator::{all_consuming, map_opt, opt, value},
    multi::many1,
};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIntensity {
    Light, // -
    Heavy, // +
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    Shallow,      // MI
    Patches,      // BC
    Partial,      // PR
    LowDrifting,  // DR
    Blowing,      // BL
    Showers,      // SH
    Thunderstorm, // TS
    Freezing,     // FZ
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phenomenon {
    Drizzle,     // DZ
    Rain,        // RA
    Snow,        // SN
    SnowGrains,  // SG
    IceCrystals, // IC
    IcePellets,  // PL
    Hail,        // GR
    SmallHail,   // GS
    Mist,        // BR
    Fog,         // FG
    Smoke,       // FU
    VolcanicAsh, // VA
    Dust,        // DU
    Sand,        // SA
    Haze,        // HZ
}

/// A two letter code in the phenomena part of a group. Descriptor codes are
/// accepted there too, so `RASH` reads as rain and showers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCode {
    Phenomenon(Phenomenon),
    Descriptor(Descriptor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentWeather {
    pub intensity: Option<WeatherIntensity>,
    pub vicinity: bool,
    pub descriptor: Option<Descriptor>,
    pub phenomena: Vec<WeatherCode>,
}

impl Descriptor {
    pub const ALL: [Descriptor; 8] = [
        Descriptor::Shallow,
        Descriptor::Patches,
        Descriptor::Partial,
        Descriptor::LowDrifting,
        Descriptor::Blowing,
        Descriptor::Showers,
        Descriptor::Thunderstorm,
        Descriptor::Freezing,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Descriptor::Shallow => "MI",
            Descriptor::Patches => "BC",
            Descriptor::Partial => "PR",
            Descriptor::LowDrifting => "DR",
            Descriptor::Blowing => "BL",
            Descriptor::Showers => "SH",
            Descriptor::Thunderstorm => "TS",
            Descriptor::Freezing => "FZ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    pub const fn spanish(&self) -> &'static str {
        match self {
            Descriptor::Shallow => "bajo",
            Descriptor::Patches => "bancos",
            Descriptor::Partial => "parcial",
            Descriptor::LowDrifting => "ventisca baja",
            Descriptor::Blowing => "ventisca alta",
            Descriptor::Showers => "chubasco",
            Descriptor::Thunderstorm => "tormenta",
            Descriptor::Freezing => "engelante",
        }
    }
}

impl Phenomenon {
    pub const ALL: [Phenomenon; 15] = [
        Phenomenon::Drizzle,
        Phenomenon::Rain,
        Phenomenon::Snow,
        Phenomenon::SnowGrains,
        Phenomenon::IceCrystals,
        Phenomenon::IcePellets,
        Phenomenon::Hail,
        Phenomenon::SmallHail,
        Phenomenon::Mist,
        Phenomenon::Fog,
        Phenomenon::Smoke,
        Phenomenon::VolcanicAsh,
        Phenomenon::Dust,
        Phenomenon::Sand,
        Phenomenon::Haze,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Phenomenon::Drizzle => "DZ",
            Phenomenon::Rain => "RA",
            Phenomenon::Snow => "SN",
            Phenomenon::SnowGrains => "SG",
            Phenomenon::IceCrystals => "IC",
            Phenomenon::IcePellets => "PL",
            Phenomenon::Hail => "GR",
            Phenomenon::SmallHail => "GS",
            Phenomenon::Mist => "BR",
            Phenomenon::Fog => "FG",
            Phenomenon::Smoke => "FU",
            Phenomenon::VolcanicAsh => "VA",
            Phenomenon::Dust => "DU",
            Phenomenon::Sand => "SA",
            Phenomenon::Haze => "HZ",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub const fn spanish(&self) -> &'static str {
        match self {
            Phenomenon::Drizzle => "llovizna",
            Phenomenon::Rain => "lluvia",
            Phenomenon::Snow => "nieve",
            Phenomenon::SnowGrains => "cinarra",
            Phenomenon::IceCrystals => "cristales de hielo",
            Phenomenon::IcePellets => "hielo granulado",
            Phenomenon::Hail => "granizo",
            Phenomenon::SmallHail => "granizo pequeño",
            Phenomenon::Mist => "neblina",
            Phenomenon::Fog => "niebla",
            Phenomenon::Smoke => "humo",
            Phenomenon::VolcanicAsh => "ceniza volcánica",
            Phenomenon::Dust => "polvo",
            Phenomenon::Sand => "arena",
            Phenomenon::Haze => "calima",
        }
    }
}

impl WeatherCode {
    pub fn from_code(code: &str) -> Option<Self> {
        Phenomenon::from_code(code)
            .map(WeatherCode::Phenomenon)
            .or_else(|| Descriptor::from_code(code).map(WeatherCode::Descriptor))
    }

    pub const fn spanish(&self) -> &'static str {
        match self {
            WeatherCode::Phenomenon(phenomenon) => phenomenon.spanish(),
            WeatherCode::Descriptor(descriptor) => descriptor.spanish(),
        }
    }
}

impl WeatherIntensity {
    pub const fn spanish(&self) -> &'static str {
        match self {
            WeatherIntensity::Light => "ligera",
            WeatherIntensity::Heavy => "fuerte",
        }
    }
}

impl fmt::Display for PresentWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phenomena = self.phenomena.iter().map(WeatherCode::spanish).join(" y ");
        let mut core = match self.descriptor {
            Some(descriptor) => format!("{} con {phenomena}", descriptor.spanish()),
            None => phenomena,
        };
        if self.vicinity {
            core.push_str(" en proximidades");
        }
        match (self.intensity, self.descriptor) {
            (Some(intensity), Some(_)) => write!(f, "{} {core}", intensity.spanish()),
            (Some(intensity), None) => write!(f, "{core} {}", intensity.spanish()),
            (None, _) => f.write_str(&core),
        }
    }
}

fn nom_descriptor(input: &str) -> IResult<&str, Descriptor> {
    map_opt(take(2usize), Descriptor::from_code).parse(input)
}

fn nom_weather_code(input: &str) -> IResult<&str, WeatherCode> {
    map_opt(take(2usize), WeatherCode::from_code).parse(input)
}

pub(crate) fn nom_present_weather(input: &str) -> IResult<&str, PresentWeather> {
    (
        opt(alt((
            value(WeatherIntensity::Light, tag("-")),
            value(WeatherIntensity::Heavy, tag("+")),
        ))),
        opt(tag("VC")).map(|vc| vc.is_some()),
        opt(nom_descriptor),
        many1(nom_weather_code),
    )
        .map(|(intensity, vicinity, descriptor, phenomena)| PresentWeather {
            intensity,
            vicinity,
            descriptor,
            phenomena,
        })
        .parse(input)
}

/// Decodes a whole token as a weather group.
pub fn decode_weather_token(token: &str) -> Option<PresentWeather> {
    all_consuming(nom_present_weather)
        .parse(token)
        .ok()
        .map(|(_, weather)| weather)
}

/// Current and recent (`RE` prefixed) weather phrases, in report order.
pub fn decode_weather(tokens: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut current = Vec::new();
    let mut recent = Vec::new();
    for token in tokens {
        match token.strip_prefix("RE") {
            Some(rest) if !rest.is_empty() => {
                if let Some(weather) = decode_weather_token(rest) {
                    trace!(token, ?weather, "Recent weather");
                    recent.push(weather.to_string());
                }
            }
            _ => {
                if let Some(weather) = decode_weather_token(token) {
                    trace!(token, ?weather, "Present weather");
                    current.push(weather.to_string());
                }
            }
        }
    }
    (current, recent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(token: &str) -> Option<String> {
        decode_weather_token(token).map(|w| w.to_string())
    }

    #[test]
    fn test_parse_structure() {
        assert_eq!(
            decode_weather_token("+TSGR"),
            Some(PresentWeather {
                intensity: Some(WeatherIntensity::Heavy),
                vicinity: false,
                descriptor: Some(Descriptor::Thunderstorm),
                phenomena: vec![WeatherCode::Phenomenon(Phenomenon::Hail)],
            })
        );
        assert_eq!(
            decode_weather_token("RASH").map(|w| w.phenomena),
            Some(vec![
                WeatherCode::Phenomenon(Phenomenon::Rain),
                WeatherCode::Descriptor(Descriptor::Showers),
            ])
        );
    }

    #[test]
    fn test_composition() {
        assert_eq!(decoded("-RA").as_deref(), Some("lluvia ligera"));
        assert_eq!(decoded("BR").as_deref(), Some("neblina"));
        assert_eq!(decoded("+TSGR").as_deref(), Some("fuerte tormenta con granizo"));
        assert_eq!(decoded("SHRASN").as_deref(), Some("chubasco con lluvia y nieve"));
        assert_eq!(decoded("VCFG").as_deref(), Some("niebla en proximidades"));
        assert_eq!(
            decoded("-VCSHRA").as_deref(),
            Some("ligera chubasco con lluvia en proximidades")
        );
        assert_eq!(decoded("FZFG").as_deref(), Some("engelante con niebla"));
        assert_eq!(decoded("+DZ").as_deref(), Some("llovizna fuerte"));
    }

    #[test]
    fn test_rejected_tokens() {
        for token in [
            "", "-", "TS", "VCSH", "RAS", "RAXX", "NOSIG", "CAVOK", "BKN010", "Q1008", "10/09",
            "BECMG", "NSW",
        ] {
            assert_eq!(decoded(token), None, "{token}");
        }
    }

    #[test]
    fn test_code_table_has_23_codes() {
        let codes = Phenomenon::ALL
            .iter()
            .map(Phenomenon::code)
            .chain(Descriptor::ALL.iter().map(Descriptor::code))
            .collect::<Vec<_>>();
        assert_eq!(codes.len(), 23);
        for code in codes {
            assert!(WeatherCode::from_code(code).is_some(), "{code}");
        }
        assert_eq!(WeatherCode::from_code("VC"), None);
    }

    #[test]
    fn test_decode_current_and_recent() {
        let (current, recent) = decode_weather(&["-RA", "BR", "BKN010", "RETSRA", "RE", "REXX"]);
        assert_eq!(current, ["lluvia ligera", "neblina"]);
        assert_eq!(recent, ["tormenta con lluvia"]);
    }
}
