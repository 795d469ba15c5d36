use serde::Serialize;
use thiserror::Error;

use super::{
    coordinate::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE},
    district::District,
};

pub const MAX_BEDROOMS: u32 = 10;
pub const MAX_BATHROOMS: u32 = 10;
pub const MAX_ROOMS: u32 = 20;
pub const MAX_SURFACE_M2: f64 = 10000.0;

/// Rejected form input. The form keeps its previous value when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{0} is not a known comuna, use a number between 1 and 15")]
    UnknownDistrict(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("could not read {field} from '{input}'")]
    Unparsable { field: &'static str, input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyAttributes {
    pub district: District,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub rooms: u32,
    pub surface_m2: f64,
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        PropertyAttributes {
            district: District::default(),
            bedrooms: 2,
            bathrooms: 1,
            rooms: 3,
            surface_m2: 50.0,
        }
    }
}

impl PropertyAttributes {
    pub fn validate(&self) -> Result<(), InputError> {
        check_count("dormitorios", self.bedrooms, MAX_BEDROOMS)?;
        check_count("banos", self.bathrooms, MAX_BATHROOMS)?;
        check_count("ambientes", self.rooms, MAX_ROOMS)?;
        check_surface(self.surface_m2)
    }

    pub fn set_bedrooms(&mut self, bedrooms: u32) -> Result<(), InputError> {
        check_count("dormitorios", bedrooms, MAX_BEDROOMS)?;
        self.bedrooms = bedrooms;
        Ok(())
    }

    pub fn set_bathrooms(&mut self, bathrooms: u32) -> Result<(), InputError> {
        check_count("banos", bathrooms, MAX_BATHROOMS)?;
        self.bathrooms = bathrooms;
        Ok(())
    }

    pub fn set_rooms(&mut self, rooms: u32) -> Result<(), InputError> {
        check_count("ambientes", rooms, MAX_ROOMS)?;
        self.rooms = rooms;
        Ok(())
    }

    pub fn set_surface(&mut self, surface_m2: f64) -> Result<(), InputError> {
        check_surface(surface_m2)?;
        self.surface_m2 = surface_m2;
        Ok(())
    }
}

pub fn check_coordinate(coordinate: &Coordinate) -> Result<(), InputError> {
    let (min_lat, max_lat) = LATITUDE_RANGE;
    let (min_lon, max_lon) = LONGITUDE_RANGE;
    if !(min_lat..=max_lat).contains(&coordinate.lat) {
        return Err(InputError::OutOfRange {
            field: "latitud",
            min: min_lat,
            max: max_lat,
            value: coordinate.lat,
        });
    }
    if !(min_lon..=max_lon).contains(&coordinate.lon) {
        return Err(InputError::OutOfRange {
            field: "longitud",
            min: min_lon,
            max: max_lon,
            value: coordinate.lon,
        });
    }
    Ok(())
}

fn check_count(field: &'static str, value: u32, max: u32) -> Result<(), InputError> {
    if value > max {
        return Err(InputError::OutOfRange {
            field,
            min: 0.0,
            max: max as f64,
            value: value as f64,
        });
    }
    Ok(())
}

fn check_surface(value: f64) -> Result<(), InputError> {
    // NaN fails the range check too
    if !(0.0..=MAX_SURFACE_M2).contains(&value) {
        return Err(InputError::OutOfRange {
            field: "sup_m2",
            min: 0.0,
            max: MAX_SURFACE_M2,
            value,
        });
    }
    Ok(())
}
