use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::property::InputError;

pub const DISTRICT_COUNT: u8 = 15;

/// One of the fifteen comunas of Buenos Aires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct District(u8);

impl District {
    pub fn from_index(index: u8) -> Result<Self, InputError> {
        if (1..=DISTRICT_COUNT).contains(&index) {
            Ok(District(index))
        } else {
            Err(InputError::UnknownDistrict(index.to_string()))
        }
    }

    pub fn all() -> impl Iterator<Item = District> {
        (1..=DISTRICT_COUNT).map(District)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> String {
        format!("Comuna {}", self.0)
    }

    /// Reads the trailing integer of a label, so both "Comuna 7" and "7" work.
    pub fn parse_label(label: &str) -> Result<Self, InputError> {
        lazy_static! {
            static ref TRAILING_INDEX_REGEX: Regex = Regex::new(r"(\d+)\s*$").unwrap();
        }

        let trimmed = label.trim();
        let unknown = || InputError::UnknownDistrict(trimmed.to_string());

        let digits = TRAILING_INDEX_REGEX
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .ok_or_else(unknown)?;

        let prefix = trimmed[..digits.start()].trim();
        if !prefix.is_empty() && !prefix.eq_ignore_ascii_case("comuna") {
            return Err(unknown());
        }

        let index = digits.as_str().parse::<u8>().map_err(|_| unknown())?;

        District::from_index(index).map_err(|_| unknown())
    }
}

impl Default for District {
    fn default() -> Self {
        District(1)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comuna {}", self.0)
    }
}

impl FromStr for District {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        District::parse_label(s)
    }
}

impl TryFrom<String> for District {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        District::parse_label(&value)
    }
}

impl From<District> for String {
    fn from(district: District) -> Self {
        district.label()
    }
}
