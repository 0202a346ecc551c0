use nom::{IResult, Parser};

use crate::{optional_data::OptionalData, units::nom_digits};

/// Cloud base as reported: a three digit value in hundreds of feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudHeight {
    pub height: u32,
}

impl CloudHeight {
    pub const fn feet(&self) -> u32 {
        self.height * 100
    }
}

pub(crate) fn nom_cloud_height(input: &str) -> IResult<&str, OptionalData<CloudHeight, 3>> {
    OptionalData::optional_field(nom_digits(3, 3).map(|height| CloudHeight { height })).parse(input)
}
