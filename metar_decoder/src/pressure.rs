use nom::{
    IResult, Parser,
    bytes::complete::take_while_m_n,
    character::complete::char,
    sequence::preceded,
};
use tracing::trace;

/// A `Q` group: QNH in hectopascals as transmitted (`0998` keeps its leading
/// zero), or the literal group when any digit was replaced by a slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pressure {
    Hectopascals(String),
    Unavailable(String),
}

impl Pressure {
    /// Field value, e.g. `1013 hPa`.
    pub fn value(&self) -> String {
        match self {
            Pressure::Hectopascals(hpa) => format!("{hpa} hPa"),
            Pressure::Unavailable(_) => "No disponible".to_string(),
        }
    }

    pub fn sentence(&self) -> String {
        match self {
            Pressure::Hectopascals(hpa) => format!("QNH de {hpa} hectopascales"),
            Pressure::Unavailable(group) => format!("QNH no disponible (grupo Q{group})"),
        }
    }
}

pub(crate) fn nom_pressure(input: &str) -> IResult<&str, Pressure> {
    preceded(
        char('Q'),
        take_while_m_n(4, 4, |c: char| c.is_ascii_digit() || c == '/'),
    )
    .map(|group: &str| {
        if group.bytes().all(|b| b.is_ascii_digit()) {
            Pressure::Hectopascals(group.to_string())
        } else {
            Pressure::Unavailable(group.to_string())
        }
    })
    .parse(input)
}

/// The first `Q` group. Anything after the four characters is ignored.
pub fn decode_pressure(tokens: &[&str]) -> Option<Pressure> {
    let pressure = tokens
        .iter()
        .find_map(|token| nom_pressure(token).ok())
        .map(|(_, pressure)| pressure)?;
    trace!(?pressure, "Pressure group");
    Some(pressure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qnh() {
        let pressure = decode_pressure(&["10/09", "Q1008", "NOSIG"]).unwrap();
        assert_eq!(pressure, Pressure::Hectopascals("1008".to_string()));
        assert_eq!(pressure.value(), "1008 hPa");
        assert_eq!(pressure.sentence(), "QNH de 1008 hectopascales");

        let pressure = decode_pressure(&["Q0998"]).unwrap();
        assert_eq!(pressure.value(), "0998 hPa");
        assert_eq!(pressure.sentence(), "QNH de 0998 hectopascales");
    }

    #[test]
    fn test_unavailable_qnh() {
        let pressure = decode_pressure(&["Q10//"]).unwrap();
        assert_eq!(pressure, Pressure::Unavailable("10//".to_string()));
        assert_eq!(pressure.value(), "No disponible");
        assert_eq!(pressure.sentence(), "QNH no disponible (grupo Q10//)");
    }

    #[test]
    fn test_no_qnh() {
        assert_eq!(decode_pressure(&["Q101", "QNH", "A2992"]), None);
    }
}
