//! Search radius options offered by the resource browsers

use std::fmt;

use crate::error::Error;

/// One of the fixed search radii
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchRadius {
    Km5,
    #[default]
    Km10,
    Km20,
    Km50,
}

impl SearchRadius {
    pub const ALL: [SearchRadius; 4] = [Self::Km5, Self::Km10, Self::Km20, Self::Km50];

    pub fn km(&self) -> u32 {
        match self {
            Self::Km5 => 5,
            Self::Km10 => 10,
            Self::Km20 => 20,
            Self::Km50 => 50,
        }
    }

    /// Distance sent as `maxDistance`
    pub fn meters(&self) -> u32 {
        self.km() * 1000
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = Error;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|radius| radius.km() == km)
            .ok_or_else(|| Error::validation(format!("Unsupported search radius: {} km", km)))
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Within {} km", self.km())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_are_km_times_thousand() {
        for radius in SearchRadius::ALL {
            assert_eq!(radius.meters(), radius.km() * 1000);
        }
        assert_eq!(SearchRadius::Km50.meters(), 50_000);
    }

    #[test]
    fn test_parse_radius() {
        assert_eq!(SearchRadius::try_from(20).unwrap(), SearchRadius::Km20);
        assert!(SearchRadius::try_from(15).is_err());
        assert_eq!(SearchRadius::default().to_string(), "Within 10 km");
    }
}
