use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use crate::registration::RegistrationRecord;

/// Column order of the admin CSV download.
pub const EXPORT_HEADERS: [&str; 9] = [
    "Registration ID",
    "Name",
    "Email",
    "Mobile",
    "Pincode",
    "Age",
    "Eligible",
    "Notified",
    "Submitted At",
];

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("unable to serialize export rows: {0}")]
    Write(#[from] csv::Error),
    #[error("unable to assemble export output: {0}")]
    Buffer(String),
}

/// Suggested download name, stamped with the export date.
pub fn export_filename(today: NaiveDate) -> String {
    format!("registrations-{}.csv", today.format("%Y-%m-%d"))
}

/// Render the records as CSV with every field quoted, headers first.
pub fn export_csv(records: &[RegistrationRecord]) -> Result<String, CsvExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        writer.write_record(&export_row(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| CsvExportError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| CsvExportError::Buffer(err.to_string()))
}

fn export_row(record: &RegistrationRecord) -> [String; 9] {
    [
        record.id.0.clone(),
        record.registrant.full_name.clone(),
        record.registrant.email.clone(),
        record.registrant.mobile.clone(),
        record.registrant.pincode.clone(),
        record.registrant.age.to_string(),
        yes_no(record.eligible).to_string(),
        yes_no(record.notified).to_string(),
        record.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
    ]
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{Registrant, RegistrationId};
    use chrono::TimeZone;

    fn record(name: &str) -> RegistrationRecord {
        RegistrationRecord {
            id: RegistrationId("reg-000007".to_string()),
            registrant: Registrant {
                full_name: name.to_string(),
                email: "sample@example.com".to_string(),
                mobile: "9876543210".to_string(),
                pincode: "560034".to_string(),
                age: 34,
                health_note: "No chronic conditions reported".to_string(),
            },
            eligible: true,
            notified: false,
            submitted_at: chrono::Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn export_quotes_every_field() {
        let csv = export_csv(&[record("Jane Doe")]).expect("export succeeds");
        let mut lines = csv.lines();

        let header = lines.next().expect("header row");
        assert!(header.starts_with("\"Registration ID\",\"Name\""));

        let row = lines.next().expect("data row");
        assert_eq!(
            row,
            "\"reg-000007\",\"Jane Doe\",\"sample@example.com\",\"9876543210\",\"560034\",\
             \"34\",\"Yes\",\"No\",\"2026-03-14 09:30\""
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = export_csv(&[record("Jane \"JD\" Doe")]).expect("export succeeds");
        assert!(csv.contains("\"Jane \"\"JD\"\" Doe\""));
    }

    #[test]
    fn empty_export_still_has_headers() {
        let csv = export_csv(&[]).expect("export succeeds");
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn filename_carries_export_date() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date");
        assert_eq!(export_filename(today), "registrations-2026-08-25.csv");
    }
}
