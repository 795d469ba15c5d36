use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    estimator::format::{district_line, format_coordinate, format_surface},
    models::{
        coordinate::Coordinate,
        district::District,
        property::{check_coordinate, InputError},
        session::FormSession,
    },
};

use super::bot_types::{CoordinateArgs, FieldKind, FieldReply, FormField};

impl FieldKind {
    fn usage(&self) -> &'static str {
        match self {
            FieldKind::Coordinates => {
                "Indicá latitud y longitud, e.g. /coordenadas -34.6037 -58.3816."
            }
            FieldKind::District => "Indicá la comuna, e.g. /comuna 7.",
            FieldKind::Bedrooms => "Indicá la cantidad, e.g. /dormitorios 2.",
            FieldKind::Bathrooms => "Indicá la cantidad, e.g. /banos 1.",
            FieldKind::Rooms => "Indicá la cantidad, e.g. /ambientes 3.",
            FieldKind::Surface => "Indicá la superficie, e.g. /superficie 50.",
        }
    }
}

/// Validates the text after a field command and applies it to the session.
///
/// Only `FieldReply::Updated` changes the session.
pub fn submit_field(session: &mut FormSession, kind: FieldKind, input: &str) -> FieldReply {
    let input = input.trim();
    if input.is_empty() {
        return FieldReply::Usage(kind.usage());
    }

    let applied = match kind {
        FieldKind::Coordinates => {
            parse_coordinates(input).and_then(|args| manual_update(session, args))
        }
        FieldKind::District => District::parse_label(input)
            .and_then(|district| apply_field(session, FormField::District(district))),
        FieldKind::Bedrooms => parse_count("dormitorios", input)
            .and_then(|value| apply_field(session, FormField::Bedrooms(value))),
        FieldKind::Bathrooms => parse_count("banos", input)
            .and_then(|value| apply_field(session, FormField::Bathrooms(value))),
        FieldKind::Rooms => parse_count("ambientes", input)
            .and_then(|value| apply_field(session, FormField::Rooms(value))),
        FieldKind::Surface => parse_surface(input)
            .and_then(|value| apply_field(session, FormField::Surface(value))),
    };

    match applied {
        Ok(()) => FieldReply::Updated(describe_form(session)),
        Err(e) => FieldReply::Rejected(format!("Valor rechazado: {}", e)),
    }
}

pub fn apply_field(session: &mut FormSession, field: FormField) -> Result<(), InputError> {
    let attributes = &mut session.attributes;
    match field {
        FormField::District(district) => attributes.district = district,
        FormField::Bedrooms(value) => attributes.set_bedrooms(value)?,
        FormField::Bathrooms(value) => attributes.set_bathrooms(value)?,
        FormField::Rooms(value) => attributes.set_rooms(value)?,
        FormField::Surface(value) => attributes.set_surface(value)?,
    }
    debug!("Form updated: {:?}", session.attributes);
    Ok(())
}

/// Confirmed manual entry. Out-of-range values leave the location untouched.
pub fn manual_update(session: &mut FormSession, args: CoordinateArgs) -> Result<(), InputError> {
    check_coordinate(&Coordinate::new(args.lat, args.lon))?;
    session.location.on_manual_update(args.lat, args.lon);
    Ok(())
}

pub fn map_click(session: &mut FormSession, lat: f64, lon: f64) -> bool {
    let moved = session.location.on_map_click(lat, lon);
    debug!("Map click at {lat}, {lon} (moved: {moved})");
    moved
}

pub fn describe_form(session: &FormSession) -> String {
    let attributes = &session.attributes;
    format!(
        "Coordenadas: {}\n{}\nDormitorios: {}\nBaños: {}\nAmbientes: {}\nSuperficie: {}",
        format_coordinate(&session.location.current()),
        district_line(&attributes.district),
        attributes.bedrooms,
        attributes.bathrooms,
        attributes.rooms,
        format_surface(attributes.surface_m2),
    )
}

pub fn parse_coordinates(input: &str) -> Result<CoordinateArgs, InputError> {
    lazy_static! {
        static ref COORDINATE_REGEX: Regex =
            Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*[,\s]\s*(-?\d+(?:\.\d+)?)\s*$").unwrap();
    }

    let unparsable = || InputError::Unparsable {
        field: "coordenadas",
        input: input.to_string(),
    };

    let caps = COORDINATE_REGEX.captures(input).ok_or_else(unparsable)?;
    let lat = caps[1].parse::<f64>().map_err(|_| unparsable())?;
    let lon = caps[2].parse::<f64>().map_err(|_| unparsable())?;

    Ok(CoordinateArgs { lat, lon })
}

pub fn parse_count(field: &'static str, input: &str) -> Result<u32, InputError> {
    input.trim().parse::<u32>().map_err(|_| InputError::Unparsable {
        field,
        input: input.to_string(),
    })
}

/// Accepts a decimal comma, e.g. `52,5`.
pub fn parse_surface(input: &str) -> Result<f64, InputError> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| InputError::Unparsable {
            field: "sup_m2",
            input: input.to_string(),
        })
}
