use serde::Serialize;

use super::{coordinate::Coordinate, property::PropertyAttributes};

/// Column names in the order the trained model consumes them.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "sup_m2",
    "lat",
    "lon",
    "banos",
    "comuna_num",
    "ambientes",
    "dormitorios",
];

/// The single row handed to a predictor. Field order matches `FEATURE_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub sup_m2: f64,
    pub lat: f64,
    pub lon: f64,
    pub banos: u32,
    pub comuna_num: u8,
    pub ambientes: u32,
    pub dormitorios: u32,
}

impl FeatureRecord {
    pub fn assemble(coordinate: Coordinate, attributes: &PropertyAttributes) -> Self {
        FeatureRecord {
            sup_m2: attributes.surface_m2,
            lat: coordinate.lat,
            lon: coordinate.lon,
            banos: attributes.bathrooms,
            comuna_num: attributes.district.index(),
            ambientes: attributes.rooms,
            dormitorios: attributes.bedrooms,
        }
    }

    pub fn values(&self) -> [f64; 7] {
        [
            self.sup_m2,
            self.lat,
            self.lon,
            self.banos as f64,
            self.comuna_num as f64,
            self.ambientes as f64,
            self.dormitorios as f64,
        ]
    }
}
