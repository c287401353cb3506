use anyhow::Context;

pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Connection settings for the review backend, read from the environment.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_url: String,
    pub api_key: String,
    pub base_id: String,
    pub review_table: String,
    pub indemnity_table: Option<String>,
}

impl BackendConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{key} must be set to fetch reviews from the backend"))
        };

        Ok(Self {
            api_url: lookup("AIRTABLE_API_URL")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key: required("AIRTABLE_API_KEY")?,
            base_id: required("AIRTABLE_BASE_ID")?,
            review_table: required("AIRTABLE_REVIEW_TABLE_NAME")?,
            indemnity_table: lookup("AIRTABLE_INDEMNITY_TABLE_NAME")
                .filter(|value| !value.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_and_optional_settings() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("AIRTABLE_API_KEY", "key"),
            ("AIRTABLE_BASE_ID", "app123"),
            ("AIRTABLE_REVIEW_TABLE_NAME", "Reviews"),
            ("AIRTABLE_INDEMNITY_TABLE_NAME", "Indemnity"),
        ]))
        .expect("config loads");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.base_id, "app123");
        assert_eq!(config.indemnity_table.as_deref(), Some("Indemnity"));
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let err = BackendConfig::from_lookup(lookup(&[
            ("AIRTABLE_BASE_ID", "app123"),
            ("AIRTABLE_REVIEW_TABLE_NAME", "Reviews"),
        ]))
        .expect_err("api key is required");
        assert!(err.to_string().contains("AIRTABLE_API_KEY"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = BackendConfig::from_lookup(lookup(&[
            ("AIRTABLE_API_KEY", "key"),
            ("AIRTABLE_BASE_ID", "  "),
            ("AIRTABLE_REVIEW_TABLE_NAME", "Reviews"),
        ]))
        .expect_err("base id is required");
        assert!(err.to_string().contains("AIRTABLE_BASE_ID"));
    }
}
