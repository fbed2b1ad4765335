use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// OSRM routing profile, used as the profile segment of the route URL.
#[derive(Deserialize, Serialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Cycling,
    Walking,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Cycling => "cycling",
            TravelMode::Walking => "walking",
        }
    }

    /// Human label used when describing a single route.
    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Driving => "by car",
            TravelMode::Cycling => "by bicycle",
            TravelMode::Walking => "on foot",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
