//! Resource and instrumentation-scope identity, denormalized onto every
//! record at ingest time.

use super::attribute::AttributeSet;

/// The originating entity of a batch — mirrors OTLP's `Resource` message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    pub attributes: AttributeSet,
}

impl Resource {
    /// Resolve the service name: the `service.name` resource attribute value
    /// if present and non-empty, otherwise the literal `"unknown"`.
    pub fn service_name(&self) -> String {
        self.attributes
            .iter()
            .find(|(k, _)| k == "service.name")
            .map(|(_, v)| v.as_display_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// The instrumentation library that emitted a signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attribute::AttributeValue;

    #[test]
    fn service_name_falls_back_to_unknown() {
        let r = Resource::default();
        assert_eq!(r.service_name(), "unknown");
    }

    #[test]
    fn service_name_reads_resource_attribute() {
        let r = Resource {
            attributes: vec![(
                "service.name".to_string(),
                AttributeValue::String("checkout".to_string()),
            )],
        };
        assert_eq!(r.service_name(), "checkout");
    }

    #[test]
    fn empty_service_name_attribute_falls_back_to_unknown() {
        let r = Resource {
            attributes: vec![(
                "service.name".to_string(),
                AttributeValue::String(String::new()),
            )],
        };
        assert_eq!(r.service_name(), "unknown");
    }
}
