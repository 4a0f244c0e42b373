//! Planet models

use serde::{Deserialize, Serialize};

/// A persisted planet. Planets are read-only through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub id: i32,
    pub name: Option<String>,
    pub distance_from_earth: Option<i32>,
    pub nearest_star: Option<String>,
}

/// Columns for seeding a planet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlanet {
    pub name: Option<String>,
    pub distance_from_earth: Option<i32>,
    pub nearest_star: Option<String>,
}

// Only seeding code builds planets
#[allow(dead_code)]
impl NewPlanet {
    pub fn new(name: &str, distance_from_earth: i32, nearest_star: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            distance_from_earth: Some(distance_from_earth),
            nearest_star: Some(nearest_star.to_string()),
        }
    }
}
