//! Unit tests for incident dates and farm locations

use std::str::FromStr;

use chrono::NaiveDate;
use core_kernel::temporal::FORM_DATE_FORMAT;
use core_kernel::{parse_form_date, GeoPoint, IncidentPeriod, LocationError, TemporalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod form_dates {
    use super::*;

    #[test]
    fn test_parses_html_date_input_format() {
        assert_eq!(parse_form_date("2024-07-01").unwrap(), date(2024, 7, 1));
        assert_eq!(date(2024, 7, 1).format(FORM_DATE_FORMAT).to_string(), "2024-07-01");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_form_date(" 2024-02-29\n").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_impossible_dates_are_rejected() {
        assert!(matches!(
            parse_form_date("2023-02-29"),
            Err(TemporalError::InvalidDate { .. })
        ));
        assert!(parse_form_date("2024-13-01").is_err());
        assert!(parse_form_date("01-07-2024").is_err());
    }
}

mod incident_period {
    use super::*;

    #[test]
    fn test_week_long_flood() {
        let period = IncidentPeriod::parse("2024-07-01", "2024-07-07").unwrap();
        assert!(period.is_ordered());
        assert_eq!(period.days(), Some(7));
        assert!(period.contains(date(2024, 7, 4)));
        assert!(!period.contains(date(2024, 7, 8)));
    }

    #[test]
    fn test_single_day_event() {
        let period = IncidentPeriod::new(date(2024, 3, 15), date(2024, 3, 15));
        assert_eq!(period.days(), Some(1));
    }

    #[test]
    fn test_reversed_period_has_no_length() {
        let period = IncidentPeriod::new(date(2024, 7, 8), date(2024, 7, 1));
        assert!(!period.is_ordered());
        assert_eq!(period.days(), None);
    }

    #[test]
    fn test_missing_end_date() {
        assert_eq!(
            IncidentPeriod::parse("2024-07-01", ""),
            Err(TemporalError::MissingDate)
        );
    }
}

mod geo_point {
    use super::*;

    #[test]
    fn test_parses_lat_lon_text() {
        let point = GeoPoint::from_str("28.6139, 77.2090").unwrap();
        assert_eq!(point.latitude, 28.6139);
        assert_eq!(point.longitude, 77.2090);
    }

    #[test]
    fn test_spacing_is_optional() {
        assert!(GeoPoint::from_str("-33.9,18.4").is_ok());
        assert!(GeoPoint::from_str("  -33.9 ,  18.4  ").is_ok());
    }

    #[test]
    fn test_malformed_text() {
        for text in ["", "28.6", "north, east", "28.6, 77.2, 10", "NaN, 77"] {
            assert!(
                matches!(GeoPoint::from_str(text), Err(LocationError::Malformed(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            GeoPoint::from_str("10, 181"),
            Err(LocationError::LongitudeOutOfRange(181.0))
        );
    }
}
