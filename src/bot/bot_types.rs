use crate::models::district::District;

/// A single form value sent through one of the field commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    District(District),
    Bedrooms(u32),
    Bathrooms(u32),
    Rooms(u32),
    Surface(f64),
}

/// Which command the raw text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Coordinates,
    District,
    Bedrooms,
    Bathrooms,
    Rooms,
    Surface,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldReply {
    /// Carries the new form summary.
    Updated(String),
    Usage(&'static str),
    Rejected(String),
}

impl FieldReply {
    pub fn text(&self) -> &str {
        match self {
            FieldReply::Updated(text) | FieldReply::Rejected(text) => text,
            FieldReply::Usage(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateArgs {
    pub lat: f64,
    pub lon: f64,
}
