use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod draft;

pub use draft::{normalize_phone, only_digits, DraftPatch, RentalPreferenceDraft};

/// Raised when a literal does not name one of the fixed option values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized {kind} value: {value:?}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// One of the three covered suburbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suburb {
    Malad,
    Kandivali,
    Borivali,
}

impl Suburb {
    /// Fixed search order used wherever all suburbs are scanned
    pub const ALL: [Suburb; 3] = [Suburb::Malad, Suburb::Kandivali, Suburb::Borivali];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malad => "Malad",
            Self::Kandivali => "Kandivali",
            Self::Borivali => "Borivali",
        }
    }

    /// Lowercase keyword used for free-text matching
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Malad => "malad",
            Self::Kandivali => "kandivali",
            Self::Borivali => "borivali",
        }
    }
}

impl fmt::Display for Suburb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    East,
    West,
}

/// Suburb plus side, e.g. "Malad West"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "Malad West")]
    MaladWest,
    #[serde(rename = "Malad East")]
    MaladEast,
    #[serde(rename = "Kandivali West")]
    KandivaliWest,
    #[serde(rename = "Kandivali East")]
    KandivaliEast,
    #[serde(rename = "Borivali West")]
    BorivaliWest,
    #[serde(rename = "Borivali East")]
    BorivaliEast,
}

impl Area {
    pub const ALL: [Area; 6] = [
        Area::MaladWest,
        Area::MaladEast,
        Area::KandivaliWest,
        Area::KandivaliEast,
        Area::BorivaliWest,
        Area::BorivaliEast,
    ];

    pub fn new(suburb: Suburb, side: Side) -> Self {
        match (suburb, side) {
            (Suburb::Malad, Side::West) => Self::MaladWest,
            (Suburb::Malad, Side::East) => Self::MaladEast,
            (Suburb::Kandivali, Side::West) => Self::KandivaliWest,
            (Suburb::Kandivali, Side::East) => Self::KandivaliEast,
            (Suburb::Borivali, Side::West) => Self::BorivaliWest,
            (Suburb::Borivali, Side::East) => Self::BorivaliEast,
        }
    }

    pub fn suburb(&self) -> Suburb {
        match self {
            Self::MaladWest | Self::MaladEast => Suburb::Malad,
            Self::KandivaliWest | Self::KandivaliEast => Suburb::Kandivali,
            Self::BorivaliWest | Self::BorivaliEast => Suburb::Borivali,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::MaladWest | Self::KandivaliWest | Self::BorivaliWest => Side::West,
            Self::MaladEast | Self::KandivaliEast | Self::BorivaliEast => Side::East,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaladWest => "Malad West",
            Self::MaladEast => "Malad East",
            Self::KandivaliWest => "Kandivali West",
            Self::KandivaliEast => "Kandivali East",
            Self::BorivaliWest => "Borivali West",
            Self::BorivaliEast => "Borivali East",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseOptionError::new("area", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bhk {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4+")]
    FourPlus,
}

impl Bhk {
    pub const ALL: [Bhk; 4] = [Bhk::One, Bhk::Two, Bhk::Three, Bhk::FourPlus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::FourPlus => "4+",
        }
    }
}

impl FromStr for Bhk {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ParseOptionError::new("bhk", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Furnishing {
    #[serde(rename = "F")]
    Furnished,
    #[serde(rename = "S")]
    SemiFurnished,
    #[serde(rename = "U")]
    Unfurnished,
}

impl Furnishing {
    pub const ALL: [Furnishing; 3] = [
        Furnishing::Furnished,
        Furnishing::SemiFurnished,
        Furnishing::Unfurnished,
    ];

    /// Wire code: F, S or U
    pub fn code(&self) -> &'static str {
        match self {
            Self::Furnished => "F",
            Self::SemiFurnished => "S",
            Self::Unfurnished => "U",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Furnished => "Furnished",
            Self::SemiFurnished => "Semi-furnished",
            Self::Unfurnished => "Unfurnished",
        }
    }
}

impl FromStr for Furnishing {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.code() == s)
            .ok_or_else(|| ParseOptionError::new("furnishing", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    Family,
    Bachelor,
    Company,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Family, Profile::Bachelor, Profile::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Bachelor => "Bachelor",
            Self::Company => "Company",
        }
    }
}

impl FromStr for Profile {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseOptionError::new("profile", s))
    }
}

/// Move-in timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveIn {
    Immediate,
    #[serde(rename = "7")]
    Within7Days,
    #[serde(rename = "15")]
    Within15Days,
    #[serde(rename = "30+")]
    ThirtyPlusDays,
}

impl MoveIn {
    pub const ALL: [MoveIn; 4] = [
        MoveIn::Immediate,
        MoveIn::Within7Days,
        MoveIn::Within15Days,
        MoveIn::ThirtyPlusDays,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::Within7Days => "7",
            Self::Within15Days => "15",
            Self::ThirtyPlusDays => "30+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "Immediately",
            Self::Within7Days => "Within 7 days",
            Self::Within15Days => "Within 15 days",
            Self::ThirtyPlusDays => "30+ days",
        }
    }
}

impl FromStr for MoveIn {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or_else(|| ParseOptionError::new("moveIn", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_parts() {
        let area = Area::new(Suburb::Kandivali, Side::East);
        assert_eq!(area, Area::KandivaliEast);
        assert_eq!(area.suburb(), Suburb::Kandivali);
        assert_eq!(area.side(), Side::East);
        assert_eq!(area.to_string(), "Kandivali East");
    }

    #[test]
    fn test_unknown_literals_rejected() {
        assert!("Andheri West".parse::<Area>().is_err());
        assert!("5".parse::<Bhk>().is_err());
        assert!("X".parse::<Furnishing>().is_err());
        assert!("family".parse::<Profile>().is_err());
        assert!("60".parse::<MoveIn>().is_err());
    }

    #[test]
    fn test_codes_parse_back() {
        assert_eq!("4+".parse::<Bhk>(), Ok(Bhk::FourPlus));
        assert_eq!("S".parse::<Furnishing>(), Ok(Furnishing::SemiFurnished));
        assert_eq!("30+".parse::<MoveIn>(), Ok(MoveIn::ThirtyPlusDays));
        assert_eq!("Company".parse::<Profile>(), Ok(Profile::Company));
    }

    #[test]
    fn test_serde_uses_wire_literals() {
        let json = serde_json::to_string(&(Area::BorivaliWest, Bhk::Two, MoveIn::Within15Days)).unwrap();
        assert_eq!(json, r#"["Borivali West","2","15"]"#);

        let furnishing: Furnishing = serde_json::from_str(r#""U""#).unwrap();
        assert_eq!(furnishing, Furnishing::Unfurnished);
    }
}
