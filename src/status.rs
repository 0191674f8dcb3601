//! Status reporter: human-readable current time for diagnostics.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::clock::CalendarFields;
use crate::error::StatusError;

/// Format fields as an en-GB full date with medium time,
/// e.g. `Friday 5 December 2025 at 14:30:00`.
pub fn format_label(fields: &CalendarFields, _tz: Tz) -> Result<String, StatusError> {
    let datetime = NaiveDate::from_ymd_opt(fields.year, fields.month, fields.day)
        .and_then(|date| date.and_hms_opt(fields.hour, fields.minute, fields.second))
        .ok_or_else(|| {
            StatusError::InvalidFields(format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                fields.year, fields.month, fields.day, fields.hour, fields.minute, fields.second
            ))
        })?;

    Ok(datetime.format("%A %-d %B %Y at %H:%M:%S").to_string())
}

/// The `Current time (<tz>): <label>` line, or `None` if formatting failed.
///
/// Failure is logged and swallowed; it must never block rendering.
pub fn status_line(fields: &CalendarFields, tz: Tz) -> Option<String> {
    match format_label(fields, tz) {
        Ok(label) => Some(format!("Current time ({}): {}", tz.name(), label)),
        Err(e) => {
            tracing::debug!("Omitting status label: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Madrid;

    #[test]
    fn test_format_label() {
        let fields = CalendarFields {
            year: 2025,
            month: 12,
            day: 5,
            hour: 14,
            minute: 30,
            second: 0,
        };
        assert_eq!(
            format_label(&fields, Madrid).unwrap(),
            "Friday 5 December 2025 at 14:30:00"
        );
    }

    #[test]
    fn test_format_label_pads_time() {
        let mut fields = CalendarFields::date(2026, 1, 1);
        fields.second = 7;
        assert_eq!(
            format_label(&fields, Madrid).unwrap(),
            "Thursday 1 January 2026 at 00:00:07"
        );
    }

    #[test]
    fn test_invalid_fields_fail() {
        let fields = CalendarFields::date(2025, 4, 31);
        assert!(matches!(
            format_label(&fields, Madrid),
            Err(StatusError::InvalidFields(_))
        ));
    }

    #[test]
    fn test_status_line() {
        let fields = CalendarFields::date(2025, 12, 24);
        assert_eq!(
            status_line(&fields, Madrid).as_deref(),
            Some("Current time (Europe/Madrid): Wednesday 24 December 2025 at 00:00:00")
        );
        assert_eq!(status_line(&CalendarFields::date(2025, 2, 30), Madrid), None);
    }
}
