use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use fxhash::FxHashMap;
use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};
use thiserror::Error;

pub type CityIdx = usize;

#[derive(Debug, Error)]
pub enum CityMapError {
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Duplicate city: {0}")]
    DuplicateCity(String),

    #[error("Invalid coordinates for {name}: ({lat}, {lon})")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },

    #[error("Unsupported city file format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

impl From<&City> for geo_types::Point {
    fn from(city: &City) -> Self {
        geo_types::Point::new(city.lon, city.lat)
    }
}

/// Ordered set of uniquely named cities.
///
/// The insertion order is the canonical order used for matrix rows, columns
/// and export headers.
#[derive(Debug, Default, Clone)]
pub struct CityMap {
    cities: Vec<City>,
    index: FxHashMap<String, CityIdx>,
}

impl CityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cities<I>(cities: I) -> Result<Self, CityMapError>
    where
        I: IntoIterator<Item = City>,
    {
        let mut map = Self::new();
        for city in cities {
            map.insert(city)?;
        }
        Ok(map)
    }

    pub fn insert(&mut self, city: City) -> Result<CityIdx, CityMapError> {
        if !city.lat.is_finite()
            || !city.lon.is_finite()
            || !(-90.0..=90.0).contains(&city.lat)
            || !(-180.0..=180.0).contains(&city.lon)
        {
            return Err(CityMapError::InvalidCoordinates {
                name: city.name,
                lat: city.lat,
                lon: city.lon,
            });
        }

        if self.index.contains_key(&city.name) {
            return Err(CityMapError::DuplicateCity(city.name));
        }

        let idx = self.cities.len();
        self.index.insert(city.name.clone(), idx);
        self.cities.push(city);

        Ok(idx)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn get(&self, idx: CityIdx) -> Option<&City> {
        self.cities.get(idx)
    }

    pub fn city_index(&self, name: &str) -> Result<CityIdx, CityMapError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CityMapError::UnknownCity(name.to_string()))
    }

    pub fn city(&self, name: &str) -> Result<&City, CityMapError> {
        let idx = self.city_index(name)?;
        Ok(&self.cities[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.cities.iter().map(|city| city.name.clone()).collect()
    }

    /// Reads `{ "name": [lat, lon], ... }`, keeping the file order.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CityMapError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a CSV file with a `name,lat,lon` header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CityMapError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut map = Self::new();

        for city in reader.deserialize::<City>() {
            map.insert(city?)?;
        }

        Ok(map)
    }

    pub fn from_file(path: &Path) -> Result<Self, CityMapError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json_reader(BufReader::new(File::open(path)?)),
            Some("csv") => Self::from_csv_reader(BufReader::new(File::open(path)?)),
            _ => Err(CityMapError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for CityMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CityMapVisitor;

        impl<'de> Visitor<'de> for CityMapVisitor {
            type Value = CityMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of city names to [latitude, longitude]")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = CityMap::new();
                while let Some((name, [lat, lon])) = access.next_entry::<String, [f64; 2]>()? {
                    map.insert(City::new(name, lat, lon))
                        .map_err(de::Error::custom)?;
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(CityMapVisitor)
    }
}
