use std::fmt;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, opt, value},
    sequence::{preceded, terminated},
};
use serde::Serialize;
use tracing::trace;

use crate::units::nom_digits;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Wind {
    pub direction: Option<String>,
    pub speed: Option<String>,
    pub gusts: Option<String>,
    pub variation: Option<String>,
    pub degrees: Option<u16>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindDirection {
    Heading(u16),
    Variable,
}

/// A `dddffGggKT` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindGroup {
    pub direction: WindDirection,
    pub speed: u16,
    pub gust: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassSector {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassSector {
    const ORDER: [CompassSector; 8] = [
        CompassSector::North,
        CompassSector::NorthEast,
        CompassSector::East,
        CompassSector::SouthEast,
        CompassSector::South,
        CompassSector::SouthWest,
        CompassSector::West,
        CompassSector::NorthWest,
    ];

    /// Sector of 45 degrees centred on each compass point:
    /// `floor(((deg mod 360) + 22.5) / 45) mod 8`.
    pub fn from_degrees(degrees: u16) -> Self {
        let index = ((u32::from(degrees % 360) * 2 + 45) / 90) % 8;
        Self::ORDER[index as usize]
    }
}

impl fmt::Display for CompassSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompassSector::North => "norte",
            CompassSector::NorthEast => "noreste",
            CompassSector::East => "este",
            CompassSector::SouthEast => "sureste",
            CompassSector::South => "sur",
            CompassSector::SouthWest => "suroeste",
            CompassSector::West => "oeste",
            CompassSector::NorthWest => "noroeste",
        })
    }
}

pub(crate) fn nom_wind(input: &str) -> IResult<&str, WindGroup> {
    terminated(
        (
            alt((
                value(WindDirection::Variable, tag("VRB")),
                nom_digits(3, 3).map(WindDirection::Heading),
            )),
            nom_digits(2, 3),
            opt(preceded(char('G'), nom_digits(2, 3))),
        ),
        tag("KT"),
    )
    .map(|(direction, speed, gust)| WindGroup {
        direction,
        speed,
        gust,
    })
    .parse(input)
}

/// `dddVddd`, the extremes of a varying wind direction.
pub(crate) fn nom_wind_variation(input: &str) -> IResult<&str, (u16, u16)> {
    (nom_digits(3, 3), preceded(char('V'), nom_digits(3, 3))).parse(input)
}

pub fn decode_wind(tokens: &[&str]) -> Wind {
    let mut wind = match tokens
        .iter()
        .find(|token| token.ends_with("KT") && token.contains('/'))
    {
        Some(partial) => Wind {
            direction: Some("No disponible".to_string()),
            speed: Some("No disponible".to_string()),
            text: Some(format!(
                "Viento reportado como {partial}, con datos parciales o no disponibles."
            )),
            ..Default::default()
        },
        None => tokens
            .iter()
            .find_map(|token| all_consuming(nom_wind).parse(*token).ok())
            .map(|(_, group)| describe_wind(group))
            .unwrap_or_default(),
    };

    if let Some((_, (from, to))) = tokens
        .iter()
        .find_map(|token| all_consuming(nom_wind_variation).parse(*token).ok())
    {
        trace!(from, to, "Wind direction varies");
        wind.variation = Some(format!("Entre {from:03}° y {to:03}°"));
        if let Some(text) = wind.text.as_mut() {
            text.truncate(text.trim_end_matches('.').len());
            text.push_str(&format!(", variando entre {from:03} y {to:03} grados"));
        }
    }

    wind
}

fn describe_wind(group: WindGroup) -> Wind {
    trace!(?group, "Wind group");
    let speed = group.speed;
    let mut wind = Wind {
        speed: Some(format!("{speed} kt")),
        ..Default::default()
    };

    let mut text = match group.direction {
        WindDirection::Heading(degrees) => {
            let sector = CompassSector::from_degrees(degrees);
            wind.degrees = Some(degrees);
            wind.direction = Some(format!("{degrees}° ({sector})"));
            format!("Viento de {degrees} grados ({sector}) con {speed} nudos")
        }
        WindDirection::Variable => {
            wind.direction = Some("Variable".to_string());
            format!("Viento variable con {speed} nudos")
        }
    };

    if let Some(gust) = group.gust {
        wind.gusts = Some(format!("{gust} kt"));
        text.push_str(&format!(" y ráfagas de hasta {gust} nudos"));
    }

    wind.text = Some(text);
    wind
}
