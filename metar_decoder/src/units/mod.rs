use std::str::FromStr;

use nom::{Parser, bytes::complete::take_while_m_n, combinator::map_res};

pub mod altitudes;
pub mod distance;
pub mod timestamp;

/// Parses between `min` and `max` ASCII digits into a number.
pub(crate) fn nom_digits<'a, T: FromStr>(
    min: usize,
    max: usize,
) -> impl Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>> {
    map_res(
        take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
        str::parse::<T>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_stop_at_max() {
        assert_eq!(nom_digits::<u16>(2, 3).parse("1015KT"), Ok(("5KT", 101)));
        assert_eq!(nom_digits::<u16>(2, 3).parse("10KT"), Ok(("KT", 10)));
        assert!(nom_digits::<u16>(2, 3).parse("1KT").is_err());
    }
}
