#[cfg(test)]
mod display_format {
    use tasador::{
        estimator::format::{
            error_text, format_coordinate, format_currency, format_price_per_m2, format_surface,
            render_text,
        },
        estimator::DisplayState,
        models::coordinate::Coordinate,
    };

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(120000.0), "$120,000");
        assert_eq!(format_currency(2400.0), "$2,400");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1234567.89), "$1,234,568");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn price_per_m2_without_surface() {
        assert_eq!(format_price_per_m2(None), "N/A");
        assert_eq!(format_price_per_m2(Some(2400.0)), "$2,400");
    }

    #[test]
    fn surface_and_coordinates() {
        assert_eq!(format_surface(50.0), "50 m²");
        assert_eq!(
            format_coordinate(&Coordinate::new(-34.60, -58.40)),
            "-34.6000, -58.4000"
        );
    }

    #[test]
    fn error_state_is_labelled() {
        let state = DisplayState::Error {
            message: "boom".to_string(),
        };
        assert_eq!(render_text(&state), "Error al hacer la predicción: boom");
        assert_eq!(error_text("boom"), render_text(&state));
    }
}
