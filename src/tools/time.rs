//! Clock and calendar tools

use super::{PrimitiveType, ToolDefinition, ToolProvider, ToolSignature};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::info;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct TimeTools;

impl ToolProvider for TimeTools {
    fn namespace(&self) -> &str {
        "Time"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        vec![
            ToolSignature::new("getCurrentTime", "Current local date and time").handler(|_| {
                info!("getCurrentTime");
                Ok(format!("Current time: {}", Local::now().format(DATETIME_FORMAT)))
            }),
            ToolSignature::new("getTimeByTimezone", "Current time in a given time zone")
                .param(
                    "timezone",
                    PrimitiveType::String,
                    "IANA time zone id, e.g. Asia/Shanghai, America/New_York, Europe/London",
                )
                .handler(|args| {
                    let timezone = args.text(0)?;
                    info!("getTimeByTimezone: {}", timezone);
                    Ok(time_in_zone(timezone))
                }),
            ToolSignature::new("getDayOfWeek", "Current day of the week").handler(|_| {
                info!("getDayOfWeek");
                let today = Local::now();
                Ok(format!(
                    "Today is {} ({})",
                    today.format("%A"),
                    today.format(DATE_FORMAT)
                ))
            }),
            ToolSignature::new("daysBetween", "Number of days between two dates")
                .param("startDate", PrimitiveType::String, "Start date, format yyyy-MM-dd")
                .param("endDate", PrimitiveType::String, "End date, format yyyy-MM-dd")
                .handler(|args| {
                    let (start, end) = (args.text(0)?, args.text(1)?);
                    info!("daysBetween: {} to {}", start, end);
                    Ok(days_between(start, end))
                }),
        ]
    }
}

fn time_in_zone(timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => format!(
            "Current time in {}: {}",
            timezone,
            Utc::now().with_timezone(&tz).format(DATETIME_FORMAT)
        ),
        Err(_) => format!(
            "Error: invalid time zone id '{}'. Valid examples: Asia/Shanghai, America/New_York, Europe/London",
            timezone
        ),
    }
}

fn days_between(start: &str, end: &str) -> String {
    let parsed = NaiveDate::parse_from_str(start, DATE_FORMAT)
        .and_then(|s| NaiveDate::parse_from_str(end, DATE_FORMAT).map(|e| (s, e)));

    match parsed {
        Ok((s, e)) => format!(
            "{} days between {} and {}",
            (e - s).num_days().abs(),
            start,
            end
        ),
        Err(_) => "Error: dates must use the yyyy-MM-dd format, e.g. 2024-01-15".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::call;
    use serde_json::json;

    #[test]
    fn test_days_between() {
        assert_eq!(
            call(&TimeTools, "daysBetween", json!({"startDate": "2024-01-01", "endDate": "2024-03-01"})).unwrap(),
            "60 days between 2024-01-01 and 2024-03-01"
        );
        // Order does not matter
        assert!(call(&TimeTools, "daysBetween", json!({"startDate": "2024-03-01", "endDate": "2024-01-01"}))
            .unwrap()
            .starts_with("60 days"));
    }

    #[test]
    fn test_days_between_bad_format() {
        let result = call(&TimeTools, "daysBetween", json!({"startDate": "01/15/2024", "endDate": "2024-01-20"})).unwrap();
        assert!(result.starts_with("Error:"));
    }

    #[test]
    fn test_time_by_timezone() {
        let result = call(&TimeTools, "getTimeByTimezone", json!({"timezone": "Asia/Shanghai"})).unwrap();
        assert!(result.starts_with("Current time in Asia/Shanghai: "));

        let result = call(&TimeTools, "getTimeByTimezone", json!({"timezone": "Mars/Olympus"})).unwrap();
        assert!(result.starts_with("Error: invalid time zone id 'Mars/Olympus'"));
    }

    #[test]
    fn test_current_time_format() {
        let result = call(&TimeTools, "getCurrentTime", json!({})).unwrap();
        let stamp = result.strip_prefix("Current time: ").unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, DATETIME_FORMAT).is_ok());
    }

    #[test]
    fn test_day_of_week() {
        let result = call(&TimeTools, "getDayOfWeek", json!({})).unwrap();
        assert!(result.starts_with("Today is "));
        assert!(result.ends_with(')'));
    }
}
