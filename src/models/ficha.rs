use serde::{Deserialize, Serialize};

use super::status::FichaStatus;

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
const DATE_LEN: usize = 10;

/// A cohort record as exchanged with the API.
///
/// Dates are kept exactly as the server sent them (either `YYYY-MM-DD` or a
/// full ISO-8601 timestamp); use [`date_part`] to render them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ficha {
    pub code: i64,
    pub start_date: String,
    pub end_classwork_date: String,
    pub end_record_date: String,
    pub program_id: i64,
    pub site_id: i64,
    pub status: FichaStatus,
}

impl Ficha {
    pub fn new(code: i64, status: FichaStatus) -> Self {
        Self {
            code,
            start_date: String::new(),
            end_classwork_date: String::new(),
            end_record_date: String::new(),
            program_id: 0,
            site_id: 0,
            status,
        }
    }

    pub fn with_dates(
        mut self,
        start: impl Into<String>,
        end_classwork: impl Into<String>,
        end_record: impl Into<String>,
    ) -> Self {
        self.start_date = start.into();
        self.end_classwork_date = end_classwork.into();
        self.end_record_date = end_record.into();
        self
    }

    pub fn with_program(mut self, program_id: i64) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_site(mut self, site_id: i64) -> Self {
        self.site_id = site_id;
        self
    }
}

/// Returns the date portion of an ISO-8601 timestamp.
///
/// Strings shorter than a date are returned unchanged.
pub fn date_part(value: &str) -> &str {
    value.get(..DATE_LEN).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ficha {
        Ficha::new(1, FichaStatus::Lectiva)
            .with_dates("2024-01-01", "2024-06-01", "2024-07-01")
            .with_program(5)
            .with_site(2)
    }

    #[test]
    fn test_date_part_truncates_timestamp() {
        assert_eq!(date_part("2024-01-01T00:00:00.000Z"), "2024-01-01");
        assert_eq!(date_part("2024-01-01"), "2024-01-01");
        assert_eq!(date_part("2024"), "2024");
        assert_eq!(date_part(""), "");
    }

    #[test]
    fn test_ficha_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["code"], 1);
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endClassworkDate"], "2024-06-01");
        assert_eq!(json["endRecordDate"], "2024-07-01");
        assert_eq!(json["programId"], 5);
        assert_eq!(json["siteId"], 2);
        assert_eq!(json["status"], "lectiva");
    }

    #[test]
    fn test_ficha_rejects_missing_fields() {
        let result: Result<Ficha, _> =
            serde_json::from_str(r#"{"code": 1, "startDate": "2024-01-01"}"#);
        assert!(result.is_err());
    }
}
