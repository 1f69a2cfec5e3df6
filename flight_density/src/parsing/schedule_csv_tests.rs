#[cfg(test)]
mod tests {
    use crate::error::DensityError;
    use crate::parsing::schedule_csv::{
        dataframe_to_legs, parse_schedule_csv, parse_schedule_csv_to_legs,
    };
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Carrier Code,Flight No,International/Domestic,Dep Airport Code,Arr Airport Code,Effective From,Effective To,Local Dep Time,Local Arr Time,Flying Time,Seats";

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    fn schedule_with_rows(rows: &[&str]) -> NamedTempFile {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        create_temp_csv(&content)
    }

    /// Only domestic rows and the seven needed columns survive pruning
    #[test]
    fn test_parse_schedule_keeps_domestic_rows() {
        let file = schedule_with_rows(&[
            "NH,995,Domestic,HND,OKA,01/04/2024,30/04/2024,1000,1200,200,300",
            "NH,101,International,HND,ICN,01/04/2024,30/04/2024,0900,1130,230,250",
            "JL,903,Domestic,HND,OKA,01/04/2024,30/04/2024,1100,1340,240,350",
        ]);

        let df = parse_schedule_csv(file.path(), "Domestic").unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 7);

        let col_names = df.get_column_names();
        assert!(col_names.iter().any(|s| s.as_str() == "Dep Airport Code"));
        assert!(col_names.iter().any(|s| s.as_str() == "Flying Time"));
        assert!(!col_names.iter().any(|s| s.as_str() == "Seats"));
        assert!(!col_names.iter().any(|s| s.as_str() == "International/Domestic"));
    }

    #[test]
    fn test_parse_schedule_to_legs() {
        let file = schedule_with_rows(&[
            "NH,995,Domestic,HND,OKA,01/04/2024,30/04/2024,1000,1200,200,300",
            "JL,931,Domestic,OKA,HND,01/04/2024,30/04/2024,2330,0130,200,300",
        ]);

        let legs = parse_schedule_csv_to_legs(file.path(), "Domestic").unwrap();
        assert_eq!(legs.len(), 2);

        let first = &legs[0];
        assert_eq!(first.departure_airport, "HND");
        assert_eq!(first.arrival_airport, "OKA");
        assert_eq!(first.departure_time.hhmm(), 1000);
        assert_eq!(first.arrival_time.hhmm(), 1200);
        assert_eq!(first.validity.from, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(first.validity.to, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert_eq!(first.flying_time.as_deref(), Some("200"));

        // Leading zero is dropped by integer inference but decodes the same
        assert_eq!(legs[1].arrival_time.hhmm(), 130);
    }

    #[test]
    fn test_custom_domestic_flag() {
        let file = schedule_with_rows(&[
            "NH,995,D,HND,OKA,01/04/2024,30/04/2024,1000,1200,200,300",
            "NH,996,Domestic,OKA,HND,01/04/2024,30/04/2024,1300,1500,200,300",
        ]);

        let legs = parse_schedule_csv_to_legs(file.path(), "D").unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].departure_airport, "HND");
    }

    #[test]
    fn test_parse_schedule_without_flying_time() {
        let content = "International/Domestic,Dep Airport Code,Arr Airport Code,Effective From,Effective To,Local Dep Time,Local Arr Time\nDomestic,HND,CTS,01/04/2024,30/04/2024,0700,0835\n";
        let file = create_temp_csv(content);

        let legs = parse_schedule_csv_to_legs(file.path(), "Domestic").unwrap();
        assert_eq!(legs.len(), 1);
        assert!(legs[0].flying_time.is_none());
        assert_eq!(legs[0].departure_time.hhmm(), 700);
    }

    #[test]
    fn test_missing_required_column() {
        let content = "International/Domestic,Dep Airport Code,Arr Airport Code,Effective From,Local Dep Time,Local Arr Time\nDomestic,HND,CTS,01/04/2024,0700,0835\n";
        let file = create_temp_csv(content);

        let result = parse_schedule_csv(file.path(), "Domestic");
        assert!(result.is_err());
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("Effective To"), "{}", message);
    }

    #[test]
    fn test_malformed_date_fails_load() {
        let file = schedule_with_rows(&[
            "NH,995,Domestic,HND,OKA,01/04/2024,30/04/2024,1000,1200,200,300",
            "NH,997,Domestic,HND,OKA,2024-04-01,30/04/2024,1300,1500,200,300",
        ]);

        let err = parse_schedule_csv_to_legs(file.path(), "Domestic").unwrap_err();
        match err.downcast_ref::<DensityError>() {
            Some(DensityError::MalformedTimeOrDate { row, column, value }) => {
                assert_eq!(*row, 1);
                assert_eq!(column, "Effective From");
                assert_eq!(value, "2024-04-01");
            }
            other => panic!("expected MalformedTimeOrDate, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_time_fails_load() {
        let file = schedule_with_rows(&[
            "NH,995,Domestic,HND,OKA,01/04/2024,30/04/2024,1075,1200,200,300",
        ]);

        let err = parse_schedule_csv_to_legs(file.path(), "Domestic").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DensityError>(),
            Some(DensityError::MalformedTimeOrDate { row: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_time_reports_raw_text() {
        let file = schedule_with_rows(&[
            "NH,995,Domestic,HND,OKA,01/04/2024,30/04/2024,1000,1200,200,300",
            "NH,997,Domestic,HND,OKA,01/04/2024,30/04/2024,1300,15:00,200,300",
        ]);

        let err = parse_schedule_csv_to_legs(file.path(), "Domestic").unwrap_err();
        match err.downcast_ref::<DensityError>() {
            Some(DensityError::MalformedTimeOrDate { row, column, value }) => {
                assert_eq!(*row, 1);
                assert_eq!(column, "Local Arr Time");
                assert_eq!(value, "15:00");
            }
            other => panic!("expected MalformedTimeOrDate, got {:?}", other),
        }
    }

    #[test]
    fn test_international_rows_are_not_validated() {
        // A broken international row never reaches conversion
        let file = schedule_with_rows(&[
            "NH,101,International,HND,ICN,not a date,30/04/2024,9999,1130,230,250",
            "NH,995,Domestic,HND,OKA,01/04/2024,30/04/2024,1000,1200,200,300",
        ]);

        let df = parse_schedule_csv(file.path(), "Domestic").unwrap();
        let legs = dataframe_to_legs(&df).unwrap();
        assert_eq!(legs.len(), 1);
    }
}
