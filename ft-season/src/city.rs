use serde::{Deserialize, Serialize};
use std::fmt;

/// Line color for cities other than the two tracked ones.
pub const DEFAULT_CITY_COLOR: &str = "#7f7f7f";

/// Cities with weather data on the dashboard, in display order.
pub const DEFAULT_CITIES: [City; 2] = [City::Ely, City::Orr];

/// A weather city. Ely and Orr, Minnesota are tracked; any other code is kept
/// as-is so a stray row can still be plotted in the default color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum City {
    Ely,
    Orr,
    Other(String),
}

impl City {
    /// Parse a city code. Codes are case-insensitive and stored uppercase.
    pub fn parse(code: &str) -> City {
        let key = code.trim().to_uppercase();
        match key.as_str() {
            "ELY" => City::Ely,
            "ORR" => City::Orr,
            _ => City::Other(key),
        }
    }

    /// Uppercase city key, e.g. `ELY`.
    pub fn code(&self) -> &str {
        match self {
            City::Ely => "ELY",
            City::Orr => "ORR",
            City::Other(code) => code,
        }
    }

    /// Fixed chart color; unknown cities fall back to [`DEFAULT_CITY_COLOR`].
    pub fn display_color(&self) -> &'static str {
        match self {
            City::Ely => "#1f77b4",
            City::Orr => "#ff7f0e",
            City::Other(_) => DEFAULT_CITY_COLOR,
        }
    }

    /// Human-readable name for chart titles.
    pub fn display_name(&self) -> String {
        match self {
            City::Ely => "Ely, MN".to_string(),
            City::Orr => "Orr, MN".to_string(),
            City::Other(code) => code.clone(),
        }
    }

    /// Latitude and longitude in decimal degrees, known cities only.
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        match self {
            City::Ely => Some((47.9, -91.86)),
            City::Orr => Some((48.05, -92.83)),
            City::Other(_) => None,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for City {
    fn from(value: String) -> Self {
        City::parse(&value)
    }
}

impl From<City> for String {
    fn from(value: City) -> Self {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(City::parse("ely"), City::Ely);
        assert_eq!(City::parse(" Orr "), City::Orr);
        assert_eq!(City::parse("duluth"), City::Other("DULUTH".to_string()));
        assert_eq!(City::parse("duluth").code(), "DULUTH");
    }

    #[test]
    fn test_colors_are_fixed_with_default() {
        assert_eq!(City::Ely.display_color(), "#1f77b4");
        assert_eq!(City::Orr.display_color(), "#ff7f0e");
        assert_ne!(City::Ely.display_color(), City::Orr.display_color());
        assert_eq!(City::parse("XYZ").display_color(), DEFAULT_CITY_COLOR);
    }

    #[test]
    fn test_lat_lon() {
        assert_eq!(City::Ely.lat_lon(), Some((47.9, -91.86)));
        assert!(City::parse("XYZ").lat_lon().is_none());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&vec![City::Ely, City::parse("abc")]).unwrap();
        assert_eq!(json, r#"["ELY","ABC"]"#);
        let back: Vec<City> = serde_json::from_str(r#"["orr"]"#).unwrap();
        assert_eq!(back, vec![City::Orr]);
    }
}
