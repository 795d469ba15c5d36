#[cfg(test)]
mod location_state {
    use tasador::models::coordinate::{
        Coordinate, LocationState, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
    };

    #[test]
    fn starts_at_default_coordinate() {
        let state = LocationState::new();
        assert_eq!(state.current(), Coordinate::new(-34.6037, -58.3816));
        assert_eq!(state.current(), Coordinate::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE));
    }

    #[test]
    fn map_click_replaces_coordinate() {
        let mut state = LocationState::new();
        let moved = state.on_map_click(-34.5875, -58.4203);
        assert!(moved);
        assert_eq!(state.current(), Coordinate::new(-34.5875, -58.4203));
    }

    #[test]
    fn map_click_on_same_point_is_noop() {
        let mut state = LocationState::new();
        assert!(!state.on_map_click(DEFAULT_LATITUDE, DEFAULT_LONGITUDE));
        assert_eq!(state.current(), Coordinate::default());
    }

    #[test]
    fn map_click_with_one_component_changed() {
        let mut state = LocationState::new();
        assert!(state.on_map_click(DEFAULT_LATITUDE, -58.5));
        assert_eq!(state.current(), Coordinate::new(DEFAULT_LATITUDE, -58.5));
    }

    #[test]
    fn map_clicks_follow_each_other() {
        let mut state = LocationState::new();
        let clicks = [(-34.61, -58.37), (-34.55, -58.45), (-34.64, -58.52), (0.0, 0.0)];
        for (lat, lon) in clicks {
            state.on_map_click(lat, lon);
            assert_eq!(state.current(), Coordinate::new(lat, lon));
        }
    }

    #[test]
    fn manual_update_overrides_map_click() {
        let mut state = LocationState::new();
        state.on_map_click(-34.5, -58.3);
        state.on_manual_update(-34.60, -58.40);
        assert_eq!(state.current(), Coordinate::new(-34.60, -58.40));
    }

    #[test]
    fn manual_update_with_same_value_keeps_it() {
        let mut state = LocationState::new();
        state.on_manual_update(DEFAULT_LATITUDE, DEFAULT_LONGITUDE);
        assert_eq!(state.current(), Coordinate::default());
    }
}
