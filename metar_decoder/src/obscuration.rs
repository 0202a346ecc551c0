use std::fmt;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, one_of},
    combinator::{all_consuming, opt, recognize, value},
    sequence::preceded,
};
use serde::Serialize;
use tracing::trace;

use crate::{
    optional_data::OptionalData,
    units::{
        altitudes::{CloudHeight, nom_cloud_height},
        distance::format_distance_meters,
        nom_digits,
    },
};

pub const CAVOK_CLOUD: &str = "Cielo despejado (CAVOK)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub main: Option<String>,
    pub minimum: Option<String>,
    pub vertical: Option<String>,
    pub text: Option<String>,
}

/// Visibility, runway visual range and cloud phrases decoded together, since
/// CAVOK replaces all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObscurationReport {
    pub cavok: bool,
    pub visibility: Visibility,
    pub rvr: Vec<String>,
    pub clouds: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceModifier {
    LessThan,
    GreaterThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RvrTendency {
    Increasing,
    Decreasing,
    NoDistinctChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RvrUnit {
    Meters,
    Feet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RvrReading {
    pub modifier: Option<DistanceModifier>,
    pub value: u32,
}

/// `R<runway>/<reading>[V<reading>][U|D|N][FT]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rvr {
    pub runway: String,
    pub reading: OptionalData<RvrReading, 4>,
    pub variable: Option<RvrReading>,
    pub tendency: Option<RvrTendency>,
    pub unit: RvrUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudCoverage {
    Few,
    Scattered,
    Broken,
    Overcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvectiveCloud {
    Cumulonimbus,
    ToweringCumulus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cloud {
    NCD, // No cloud detected
    NSC, // No significant clouds
    CloudData(CloudData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudData {
    pub coverage: CloudCoverage,
    pub height: Option<OptionalData<CloudHeight, 3>>,
    pub cloud_type: Option<ConvectiveCloud>,
}

impl RvrUnit {
    const fn spanish(&self) -> &'static str {
        match self {
            RvrUnit::Meters => "metros",
            RvrUnit::Feet => "pies",
        }
    }
}

impl RvrTendency {
    const fn spanish(&self) -> &'static str {
        match self {
            RvrTendency::Increasing => "en aumento",
            RvrTendency::Decreasing => "en descenso",
            RvrTendency::NoDistinctChange => "sin cambio",
        }
    }
}

impl Rvr {
    fn describe_reading(&self, reading: &RvrReading) -> String {
        let prefix = match reading.modifier {
            Some(DistanceModifier::GreaterThan) => "más de ",
            Some(DistanceModifier::LessThan) => "menos de ",
            None => "",
        };
        format!("{prefix}{} {}", reading.value, self.unit.spanish())
    }
}

impl fmt::Display for Rvr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = match &self.reading {
            OptionalData::Data(reading) => self.describe_reading(reading),
            OptionalData::Undefined => "dato no disponible".to_string(),
        };
        write!(f, "RVR en pista {}: {reading}", self.runway)?;
        if let Some(variable) = &self.variable {
            write!(f, ", variable hasta {}", self.describe_reading(variable))?;
        }
        if let Some(tendency) = self.tendency {
            write!(f, " ({})", tendency.spanish())?;
        }
        Ok(())
    }
}

impl CloudCoverage {
    const fn spanish(&self) -> &'static str {
        match self {
            CloudCoverage::Few => "Pocas nubes (1 a 2 octas)",
            CloudCoverage::Scattered => "Nubes dispersas (3 a 4 octas)",
            CloudCoverage::Broken => "Parcialmente cubierto (5 a 7 octas)",
            CloudCoverage::Overcast => "Completamente cubierto (8 octas)",
        }
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = match self {
            Cloud::NSC => return f.write_str("NSC: sin nubes significativas"),
            Cloud::NCD => return f.write_str("NCD: no se detectan nubes"),
            Cloud::CloudData(data) => data,
        };
        match data.height {
            Some(OptionalData::Data(height)) => {
                write!(f, "{} a {} pies", data.coverage.spanish(), height.feet())?
            }
            _ => write!(f, "{} con altura no disponible", data.coverage.spanish())?,
        }
        match data.cloud_type {
            Some(ConvectiveCloud::Cumulonimbus) => f.write_str(" (cumulonimbos)"),
            Some(ConvectiveCloud::ToweringCumulus) => f.write_str(" (torres de cúmulos)"),
            None => Ok(()),
        }
    }
}

fn nom_distance_modifier(input: &str) -> IResult<&str, DistanceModifier> {
    alt((
        value(DistanceModifier::LessThan, tag("M")),
        value(DistanceModifier::GreaterThan, tag("P")),
    ))
    .parse(input)
}

fn nom_rvr_reading(input: &str) -> IResult<&str, RvrReading> {
    (opt(nom_distance_modifier), nom_digits(4, 4))
        .map(|(modifier, value)| RvrReading { modifier, value })
        .parse(input)
}

pub(crate) fn nom_rvr(input: &str) -> IResult<&str, Rvr> {
    (
        preceded(
            char('R'),
            recognize((nom_digits::<u8>(2, 2), opt(one_of("LRC")))),
        ),
        preceded(char('/'), OptionalData::optional_field(nom_rvr_reading)),
        opt(preceded(char('V'), nom_rvr_reading)),
        opt(alt((
            value(RvrTendency::Increasing, tag("U")),
            value(RvrTendency::Decreasing, tag("D")),
            value(RvrTendency::NoDistinctChange, tag("N")),
        ))),
        opt(tag("FT")).map(|ft| if ft.is_some() { RvrUnit::Feet } else { RvrUnit::Meters }),
    )
        .map(|(runway, reading, variable, tendency, unit)| Rvr {
            runway: runway.to_string(),
            reading,
            variable,
            tendency,
            unit,
        })
        .parse(input)
}

/// `VVddd` or `VV///`, vertical visibility in hundreds of feet.
pub(crate) fn nom_vertical_visibility(input: &str) -> IResult<&str, OptionalData<u32, 3>> {
    preceded(tag("VV"), OptionalData::optional_field(nom_digits(3, 3))).parse(input)
}

fn nom_cloud_coverage(input: &str) -> IResult<&str, CloudCoverage> {
    alt((
        value(CloudCoverage::Few, tag("FEW")),
        value(CloudCoverage::Scattered, tag("SCT")),
        value(CloudCoverage::Broken, tag("BKN")),
        value(CloudCoverage::Overcast, tag("OVC")),
    ))
    .parse(input)
}

fn nom_convective_cloud(input: &str) -> IResult<&str, ConvectiveCloud> {
    alt((
        value(ConvectiveCloud::Cumulonimbus, tag("CB")),
        value(ConvectiveCloud::ToweringCumulus, tag("TCU")),
    ))
    .parse(input)
}

fn nom_cloud_data(input: &str) -> IResult<&str, CloudData> {
    (
        nom_cloud_coverage,
        opt(nom_cloud_height),
        opt(nom_convective_cloud),
    )
        .map(|(coverage, height, cloud_type)| CloudData {
            coverage,
            height,
            cloud_type,
        })
        .parse(input)
}

pub(crate) fn nom_cloud(input: &str) -> IResult<&str, Cloud> {
    alt((
        value(Cloud::NCD, tag("NCD")),
        value(Cloud::NSC, tag("NSC")),
        nom_cloud_data.map(Cloud::CloudData),
    ))
    .parse(input)
}

/// A cloud group, allowing a trailing placeholder for an undetermined cloud
/// type as in `BKN028///`.
fn parse_cloud_token(token: &str) -> Option<Cloud> {
    all_consuming((nom_cloud, take_while_m_n(0, 3, |c: char| c == '/')))
        .parse(token)
        .ok()
        .map(|(_, (cloud, _))| cloud)
}

pub fn is_cavok(tokens: &[&str]) -> bool {
    tokens.contains(&"CAVOK")
}

pub fn decode_visibility(tokens: &[&str]) -> Visibility {
    let meters = tokens.iter().find_map(|token| {
        all_consuming(nom_digits::<u32>(4, 4))
            .parse(*token)
            .ok()
            .map(|(_, meters)| meters)
    });
    if let Some(meters) = meters {
        trace!(meters, "Prevailing visibility");
        let main = if meters == 9999 {
            "10 km o más".to_string()
        } else {
            format!("{meters} m")
        };
        return Visibility {
            main: Some(main),
            text: Some(format!("Visibilidad de {}", format_distance_meters(meters))),
            ..Default::default()
        };
    }

    let partial = tokens.iter().find(|token| {
        token.len() == 4
            && token.contains('/')
            && token.chars().all(|c| c.is_ascii_digit() || c == '/')
    });
    match partial {
        Some(group) => Visibility {
            main: Some(group.to_string()),
            text: Some(format!(
                "Visibilidad no disponible o parcial (grupo {group})."
            )),
            ..Default::default()
        },
        None => Visibility::default(),
    }
}

pub fn decode_rvr(tokens: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| token.starts_with('R') && token.contains('/'))
        .filter_map(|token| all_consuming(nom_rvr).parse(*token).ok())
        .map(|(_, rvr)| {
            trace!(?rvr, "Runway visual range");
            rvr.to_string()
        })
        .collect()
}

/// Vertical visibility as the field value and its sentence.
pub fn decode_vertical_visibility(tokens: &[&str]) -> Option<(String, String)> {
    let (_, vv) = tokens
        .iter()
        .find_map(|token| all_consuming(nom_vertical_visibility).parse(*token).ok())?;
    Some(match vv {
        OptionalData::Data(hundreds) => {
            let feet = hundreds * 100;
            (
                format!("{feet} ft"),
                format!("Visibilidad vertical de {feet} pies"),
            )
        }
        OptionalData::Undefined => (
            "No disponible".to_string(),
            "Visibilidad vertical no disponible".to_string(),
        ),
    })
}

pub fn decode_clouds(tokens: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| parse_cloud_token(token))
        .map(|cloud| cloud.to_string())
        .collect()
}

pub fn decode_obscuration(tokens: &[&str]) -> ObscurationReport {
    if is_cavok(tokens) {
        return ObscurationReport {
            cavok: true,
            visibility: Visibility {
                main: Some("CAVOK".to_string()),
                text: Some(
                    "Visibilidad de 10 kilómetros o más y sin nubes significativas".to_string(),
                ),
                ..Default::default()
            },
            rvr: Vec::new(),
            clouds: vec![CAVOK_CLOUD.to_string()],
        };
    }

    let mut visibility = decode_visibility(tokens);
    let rvr = decode_rvr(tokens);
    if !rvr.is_empty() {
        append_sentence(&mut visibility.text, &rvr.join(". "));
    }
    if let Some((vertical, sentence)) = decode_vertical_visibility(tokens) {
        visibility.vertical = Some(vertical);
        append_sentence(&mut visibility.text, &sentence);
    }

    ObscurationReport {
        cavok: false,
        visibility,
        rvr,
        clouds: decode_clouds(tokens),
    }
}

fn append_sentence(text: &mut Option<String>, sentence: &str) {
    match text {
        Some(text) => {
            text.truncate(text.trim_end_matches(['.', ' ']).len());
            text.push_str(". ");
            text.push_str(sentence);
        }
        None => *text = Some(sentence.to_string()),
    }
}
