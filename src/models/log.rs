//! Log record: the denormalized, store-resident view over one log datum.

use chrono::{DateTime, Utc};

use super::attribute::AttributeSet;

/// Maps an OTel severity *name* to its numeric threshold.
/// Unknown names disable the predicate (return 0).
pub fn severity_threshold(name: &str) -> u8 {
    match name.to_ascii_lowercase().as_str() {
        "trace" => 1,
        "debug" => 5,
        "info" => 9,
        "warn" | "warning" => 13,
        "error" => 17,
        "fatal" => 21,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time_unix_nano: u64,
    pub observed_time_unix_nano: u64,
    pub severity_number: u8,
    pub severity_text: String,
    pub body: String,
    pub attributes: AttributeSet,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub flags: u32,
    pub service_name: String,
    pub resource_attributes: AttributeSet,
    pub scope_name: String,
    pub scope_version: String,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds_match_known_names() {
        assert_eq!(severity_threshold("trace"), 1);
        assert_eq!(severity_threshold("debug"), 5);
        assert_eq!(severity_threshold("info"), 9);
        assert_eq!(severity_threshold("warn"), 13);
        assert_eq!(severity_threshold("WARN"), 13);
        assert_eq!(severity_threshold("error"), 17);
        assert_eq!(severity_threshold("fatal"), 21);
    }

    #[test]
    fn unknown_severity_name_disables_threshold() {
        assert_eq!(severity_threshold("bogus"), 0);
    }
}
