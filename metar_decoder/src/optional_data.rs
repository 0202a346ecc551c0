use nom::{Parser, branch::alt, bytes::complete::take_while_m_n};

/// A field that may be replaced by `N` slashes when the sensor or the data
/// link could not provide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalData<T, const N: usize> {
    Data(T),
    Undefined,
}

impl<T, const N: usize> OptionalData<T, N> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            OptionalData::Data(data) => Some(data),
            OptionalData::Undefined => None,
        }
    }

    /// Parses either the field itself or exactly `N` slashes.
    pub(crate) fn optional_field<'a, P>(
        parser: P,
    ) -> impl Parser<&'a str, Output = Self, Error = nom::error::Error<&'a str>>
    where
        P: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
    {
        alt((
            parser.map(Self::Data),
            take_while_m_n(N, N, |c: char| c == '/').map(|_| Self::Undefined),
        ))
    }

    /// Like [`OptionalData::optional_field`], but accepts between one and `N`
    /// slashes as the placeholder.
    pub(crate) fn lenient_field<'a, P>(
        parser: P,
    ) -> impl Parser<&'a str, Output = Self, Error = nom::error::Error<&'a str>>
    where
        P: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
    {
        alt((
            parser.map(Self::Data),
            take_while_m_n(1, N, |c: char| c == '/').map(|_| Self::Undefined),
        ))
    }
}

#[cfg(test)]
mod tests {
    use nom::{character::complete::u32, combinator::all_consuming};

    use super::*;

    #[test]
    fn test_optional_field() {
        let mut parser = all_consuming(OptionalData::<u32, 4>::optional_field(u32));
        assert_eq!(parser.parse("1013"), Ok(("", OptionalData::Data(1013))));
        assert_eq!(parser.parse("////"), Ok(("", OptionalData::Undefined)));
        assert!(parser.parse("///").is_err());
    }

    #[test]
    fn test_lenient_field() {
        let mut parser = all_consuming(OptionalData::<u32, 2>::lenient_field(u32));
        assert_eq!(parser.parse("/"), Ok(("", OptionalData::Undefined)));
        assert_eq!(parser.parse("//"), Ok(("", OptionalData::Undefined)));
        assert!(parser.parse("///").is_err());
        assert_eq!(OptionalData::<u32, 2>::Data(7).as_option(), Some(&7));
    }
}
