use crate::models::{coordinate::Coordinate, district::District};

use super::DisplayState;

pub const SUCCESS_TEXT: &str = "✅ Predicción completada";
pub const UNAVAILABLE_TEXT: &str = "No se puede hacer la predicción sin el modelo cargado.";

pub fn error_text(message: &str) -> String {
    format!("Error al hacer la predicción: {}", message)
}

/// Rounds to whole units and groups thousands with commas, e.g. `$120,000`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}${grouped}")
}

pub fn format_surface(surface_m2: f64) -> String {
    format!("{:.0} m²", surface_m2)
}

pub fn format_coordinate(coordinate: &Coordinate) -> String {
    format!("{:.4}, {:.4}", coordinate.lat, coordinate.lon)
}

pub fn format_price_per_m2(price_per_m2: Option<f64>) -> String {
    price_per_m2
        .map(format_currency)
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn district_line(district: &District) -> String {
    format!("Comuna: {}", district)
}

/// One status line followed by the labelled values, ready to send as text.
pub fn render_text(state: &DisplayState) -> String {
    match state {
        DisplayState::Idle => "Usá /calcular para obtener una estimación.".to_string(),
        DisplayState::Result {
            prediction,
            coordinate,
            attributes,
        } => format!(
            "{}\n\nPrecio Estimado: {}\nPrecio por m²: {}\nSuperficie: {}\nAmbientes: {}\n\nCoordenadas: {}\n{}",
            SUCCESS_TEXT,
            format_currency(prediction.price),
            format_price_per_m2(prediction.price_per_m2),
            format_surface(attributes.surface_m2),
            attributes.rooms,
            format_coordinate(coordinate),
            district_line(&attributes.district),
        ),
        DisplayState::Error { message } => error_text(message),
        DisplayState::Unavailable => UNAVAILABLE_TEXT.to_string(),
    }
}
