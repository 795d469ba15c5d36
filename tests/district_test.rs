#[cfg(test)]
mod districts {
    use tasador::models::{district::District, property::InputError};

    #[test]
    fn every_label_maps_to_its_trailing_index() {
        for index in 1..=15u8 {
            let label = format!("Comuna {}", index);
            let district = District::parse_label(&label).unwrap();
            assert_eq!(district.index(), index);
            assert_eq!(district.label(), label);
        }
    }

    #[test]
    fn all_lists_fifteen_in_order() {
        let indices: Vec<u8> = District::all().map(|d| d.index()).collect();
        assert_eq!(indices, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn comuna_seven() {
        let district: District = "Comuna 7".parse().unwrap();
        assert_eq!(district.index(), 7);
    }

    #[test]
    fn accepts_bare_number_and_lowercase() {
        assert_eq!(District::parse_label("12").unwrap().index(), 12);
        assert_eq!(District::parse_label("  comuna 3 ").unwrap().index(), 3);
    }

    #[test]
    fn rejects_out_of_range_and_unknown_labels() {
        assert!(matches!(
            District::parse_label("Comuna 0"),
            Err(InputError::UnknownDistrict(_))
        ));
        assert!(District::parse_label("Comuna 16").is_err());
        assert!(District::parse_label("Palermo").is_err());
        assert!(District::parse_label("Barrio 4").is_err());
        assert!(District::parse_label("").is_err());
    }

    #[test]
    fn default_is_comuna_one() {
        assert_eq!(District::default().index(), 1);
    }

    #[test]
    fn serializes_as_label() {
        let district = District::from_index(9).unwrap();
        assert_eq!(serde_json::to_string(&district).unwrap(), "\"Comuna 9\"");
        let parsed: District = serde_json::from_str("\"Comuna 9\"").unwrap();
        assert_eq!(parsed, district);
    }
}
