use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a `"lat,lng"` string cannot be read as coordinates
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid coordinates '{0}': expected \"lat,lng\"")]
pub struct CoordinateParseError(pub String);

/// Geographic position of the assessed area in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }
}

impl FromStr for Coordinates {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoordinateParseError(s.to_string());

        let mut parts = s.split(',');
        let lat = parts.next().ok_or_else(invalid)?.trim();
        let lng = parts.next().ok_or_else(invalid)?.trim();
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Coordinates {
            lat: lat.parse().map_err(|_| invalid())?,
            lng: lng.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

// Clients send either `{"lat": .., "lng": ..}` or the string form `"lat,lng"`.
impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Point { lat: f64, lng: f64 },
        }

        match Wire::deserialize(deserializer)? {
            Wire::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Wire::Point { lat, lng } => Ok(Coordinates { lat, lng }),
        }
    }
}

/// Category of disaster being assessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    Flood,
    Cyclone,
    Earthquake,
    Drought,
    Wildfire,
    Tsunami,
    Landslide,
    Volcanic,
    /// Anything unrecognised lands here and is scored with a neutral multiplier
    #[default]
    #[serde(other)]
    Other,
}

impl HazardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardType::Flood => "flood",
            HazardType::Cyclone => "cyclone",
            HazardType::Earthquake => "earthquake",
            HazardType::Drought => "drought",
            HazardType::Wildfire => "wildfire",
            HazardType::Tsunami => "tsunami",
            HazardType::Landslide => "landslide",
            HazardType::Volcanic => "volcanic",
            HazardType::Other => "other",
        }
    }

    /// Lenient parse: unknown names become `Other`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "flood" => HazardType::Flood,
            "cyclone" => HazardType::Cyclone,
            "earthquake" => HazardType::Earthquake,
            "drought" => HazardType::Drought,
            "wildfire" => HazardType::Wildfire,
            "tsunami" => HazardType::Tsunami,
            "landslide" => HazardType::Landslide,
            "volcanic" => HazardType::Volcanic,
            _ => HazardType::Other,
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to a risk assessment
///
/// Numeric fields are optional; the scorer substitutes its configured
/// defaults for anything absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "RequestWire")]
pub struct RiskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub hazard_type: HazardType,
    /// Hazard name exactly as the caller sent it, echoed back in reports
    #[serde(skip)]
    pub hazard_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_density: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrastructure_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_index: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_frequency: Option<f64>,
}

/// Wire shape of a request; `hazardType` may be missing, null or unknown
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestWire {
    #[serde(default)]
    coordinates: Option<Coordinates>,
    #[serde(default)]
    hazard_type: Option<String>,
    #[serde(default)]
    population_density: Option<f64>,
    #[serde(default)]
    infrastructure_age: Option<f64>,
    #[serde(default)]
    economic_index: Option<f64>,
    #[serde(default, alias = "historicalFreq")]
    historical_frequency: Option<f64>,
}

impl From<RequestWire> for RiskRequest {
    fn from(wire: RequestWire) -> Self {
        RiskRequest {
            coordinates: wire.coordinates,
            hazard_type: wire
                .hazard_type
                .as_deref()
                .map(HazardType::from_name)
                .unwrap_or_default(),
            hazard_name: wire.hazard_type,
            population_density: wire.population_density,
            infrastructure_age: wire.infrastructure_age,
            economic_index: wire.economic_index,
            historical_frequency: wire.historical_frequency,
        }
    }
}

impl RiskRequest {
    /// Name to report for the hazard: the caller's own string when one was sent
    pub fn hazard_label(&self) -> &str {
        self.hazard_name
            .as_deref()
            .unwrap_or_else(|| self.hazard_type.as_str())
    }

    pub fn new(hazard_type: HazardType) -> Self {
        RiskRequest {
            hazard_type,
            ..Default::default()
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn with_population_density(mut self, value: f64) -> Self {
        self.population_density = Some(value);
        self
    }

    pub fn with_infrastructure_age(mut self, value: f64) -> Self {
        self.infrastructure_age = Some(value);
        self
    }

    pub fn with_economic_index(mut self, value: f64) -> Self {
        self.economic_index = Some(value);
        self
    }

    pub fn with_historical_frequency(mut self, value: f64) -> Self {
        self.historical_frequency = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_from_string() {
        let coords: Coordinates = " 19.0760 , 72.8777 ".parse().unwrap();
        assert_eq!(coords, Coordinates::new(19.0760, 72.8777));
    }

    #[test]
    fn test_coordinates_rejects_garbage() {
        assert!("19.07".parse::<Coordinates>().is_err());
        assert!("a,b".parse::<Coordinates>().is_err());
        assert!("1,2,3".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_request_accepts_both_coordinate_shapes() {
        let as_object: RiskRequest =
            serde_json::from_str(r#"{"coordinates": {"lat": 10.5, "lng": 76.2}, "hazardType": "flood"}"#)
                .unwrap();
        let as_string: RiskRequest =
            serde_json::from_str(r#"{"coordinates": "10.5,76.2", "hazardType": "flood"}"#).unwrap();

        assert_eq!(as_object, as_string);
        assert_eq!(as_object.hazard_type, HazardType::Flood);
    }

    #[test]
    fn test_unknown_hazard_falls_back_to_other() {
        let request: RiskRequest = serde_json::from_str(r#"{"hazardType": "meteor"}"#).unwrap();
        assert_eq!(request.hazard_type, HazardType::Other);

        let request: RiskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.hazard_type, HazardType::Other);
        assert!(request.population_density.is_none());
        assert_eq!(request.hazard_label(), "other");
    }

    #[test]
    fn test_null_hazard_is_other() {
        let request: RiskRequest =
            serde_json::from_str(r#"{"hazardType": null, "populationDensity": null}"#).unwrap();
        assert_eq!(request.hazard_type, HazardType::Other);
        assert!(request.hazard_name.is_none());
        assert!(request.population_density.is_none());
    }

    #[test]
    fn test_raw_hazard_name_is_kept() {
        let request: RiskRequest = serde_json::from_str(r#"{"hazardType": "meteor"}"#).unwrap();
        assert_eq!(request.hazard_label(), "meteor");

        let built = RiskRequest::new(HazardType::Drought);
        assert_eq!(built.hazard_label(), "drought");
    }

    #[test]
    fn test_historical_freq_alias() {
        let request: RiskRequest =
            serde_json::from_str(r#"{"hazardType": "drought", "historicalFreq": 4}"#).unwrap();
        assert_eq!(request.historical_frequency, Some(4.0));
    }

    #[test]
    fn test_hazard_from_name() {
        assert_eq!(HazardType::from_name("Cyclone"), HazardType::Cyclone);
        assert_eq!(HazardType::from_name("unknown"), HazardType::Other);
    }
}
