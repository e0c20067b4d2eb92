//! Garde validation utilities.

use crate::domain::DomainError;
use garde::{Report, Validate};

/// Run garde rules on a value, flattening the report into a `ValidationError`
pub fn validate_struct<T>(value: &T) -> Result<(), DomainError>
where
    T: Validate,
    T::Context: Default,
{
    value
        .validate()
        .map_err(|report| DomainError::ValidationError(format_report(&report)))
}

fn format_report(report: &Report) -> String {
    report
        .iter()
        .map(|(path, error)| {
            let path = path.to_string();
            if path.is_empty() {
                error.message().to_string()
            } else {
                format!("{}: {}", path, error.message())
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct WidgetKey {
        #[garde(length(min = 1))]
        dashboard_name: String,
        #[garde(length(min = 1))]
        widget_name: String,
    }

    #[test]
    fn test_validate_success() {
        let key = WidgetKey {
            dashboard_name: "wellgroup".to_string(),
            widget_name: "alarms".to_string(),
        };
        assert!(validate_struct(&key).is_ok());
    }

    #[test]
    fn test_validate_reports_every_field() {
        let key = WidgetKey {
            dashboard_name: String::new(),
            widget_name: String::new(),
        };
        match validate_struct(&key) {
            Err(DomainError::ValidationError(msg)) => {
                assert!(msg.contains("dashboard_name"));
                assert!(msg.contains("widget_name"));
            }
            other => panic!("expected ValidationError, got {:?}", other.err()),
        }
    }
}
