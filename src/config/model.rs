use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigError;

/// Check name to URL. The name only appears in log lines.
pub type Checks = BTreeMap<String, String>;

/// Settings read from the YAML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckerConfig {
    /// Sent as the `X-Scope-OrgID` header on metric pushes.
    #[serde(default)]
    pub organisation_id: Option<String>,

    /// Seconds between invocations. Without it a single invocation runs.
    #[serde(default)]
    pub polling_interval_seconds: Option<u64>,

    #[serde(default)]
    pub checks: Checks,
}

/// Parses an invocation event: a JSON object of check name to URL string.
pub fn parse_event(json: &str) -> Result<Checks, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
                    organisation_id: demo
                    polling_interval_seconds: 60
                    checks:
                        "My google test URL": http://google.com
                        "My test URL that will fail": http://google.com/xyz
                    "#;

        let config: CheckerConfig = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(config.organisation_id.as_deref(), Some("demo"));
        assert_eq!(config.polling_interval_seconds, Some(60));
        assert_eq!(config.checks.len(), 2);
        assert_eq!(
            config.checks.get("My google test URL").map(String::as_str),
            Some("http://google.com")
        );
    }

    #[test]
    fn test_config_defaults() {
        let config: CheckerConfig = serde_yaml::from_str("{}").expect("Invalid YAML");
        assert!(config.organisation_id.is_none());
        assert!(config.polling_interval_seconds.is_none());
        assert!(config.checks.is_empty());
    }

    #[test]
    fn test_parse_event() {
        let checks = parse_event(r#"{ "My google test URL": "http://google.com" }"#)
            .expect("valid event");
        assert_eq!(checks.len(), 1);
        assert_eq!(checks["My google test URL"], "http://google.com");

        assert!(parse_event("{}").expect("empty event").is_empty());
    }

    #[test]
    fn test_parse_event_rejects_non_string_urls() {
        assert!(matches!(
            parse_event(r#"{ "A": 42 }"#),
            Err(ConfigError::Event(_))
        ));
        assert!(parse_event(r#"["http://google.com"]"#).is_err());
    }
}
