use crate::constants::filters;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FilterGrouping {
    And,
    Or,
    Not,
}

impl FromStr for FilterGrouping {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            filters::AND => Ok(Self::And),
            filters::OR => Ok(Self::Or),
            filters::NOT => Ok(Self::Not),
            _ => Err(()),
        }
    }
}
