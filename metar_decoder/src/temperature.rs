use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, opt},
    sequence::{separated_pair, terminated},
};
use serde::Serialize;

use crate::{optional_data::OptionalData, units::nom_digits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Temperature {
    pub air: Option<String>,
    pub dewpoint: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureInfo {
    pub temp: OptionalData<i32, 2>,
    pub dew_point: OptionalData<i32, 2>,
}

/// `M05` is minus five degrees.
pub(crate) fn nom_maybe_negative_temp(input: &str) -> IResult<&str, i32> {
    (opt(char('M')), nom_digits::<i32>(2, 2))
        .map(|(sign, temp)| if sign.is_some() { -temp } else { temp })
        .parse(input)
}

pub(crate) fn nom_temperature_info(input: &str) -> IResult<&str, TemperatureInfo> {
    let known_air = separated_pair(
        nom_maybe_negative_temp.map(OptionalData::Data),
        char('/'),
        OptionalData::lenient_field(nom_maybe_negative_temp),
    );
    let known_dew_point = (
        alt((terminated(tag("//"), char('/')), terminated(tag("/"), char('/'))))
            .map(|_| OptionalData::Undefined),
        nom_maybe_negative_temp.map(OptionalData::Data),
    );
    alt((known_air, known_dew_point))
        .map(|(temp, dew_point)| TemperatureInfo { temp, dew_point })
        .parse(input)
}

fn degrees_field(value: OptionalData<i32, 2>) -> String {
    match value {
        OptionalData::Data(temp) => format!("{temp}°C"),
        OptionalData::Undefined => "No disponible".to_string(),
    }
}

fn degrees_sentence(value: OptionalData<i32, 2>) -> String {
    match value {
        OptionalData::Data(temp) => format!("{temp} grados"),
        OptionalData::Undefined => "dato no disponible".to_string(),
    }
}

pub fn decode_temperature(tokens: &[&str]) -> Temperature {
    let Some(info) = tokens.iter().find_map(|token| {
        all_consuming(nom_temperature_info)
            .parse(*token)
            .ok()
            .map(|(_, info)| info)
    }) else {
        return Temperature::default();
    };
    Temperature {
        air: Some(degrees_field(info.temp)),
        dewpoint: Some(degrees_field(info.dew_point)),
        text: Some(format!(
            "Temperatura de {} y punto de rocío de {}",
            degrees_sentence(info.temp),
            degrees_sentence(info.dew_point)
        )),
    }
}
