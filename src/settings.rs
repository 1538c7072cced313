use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        http::HttpAnalysisClient,
        AnalyzerError,
        OutputFormat,
    },
    persistence::load_json_or_default,
};

pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_ENDPOINT: &str = "https://myapp-1000379470338.us-central1.run.app/api/textanalysis";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

impl ServiceSettings {
    pub fn client(&self) -> Result<HttpAnalysisClient, AnalyzerError> {
        HttpAnalysisClient::new(self.endpoint.clone(), Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub service: ServiceSettings,
    pub default_output_format: OutputFormat,
}

impl SettingsData {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{"default_output_format":"xml","service":{"timeout_secs":5}}"#)
                .unwrap();

        assert_eq!(settings.default_output_format, OutputFormat::Xml);
        assert_eq!(settings.service.timeout_secs, 5);
        assert_eq!(settings.service.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_client_uses_configured_endpoint() {
        let settings = ServiceSettings {
            endpoint: "http://localhost:5000/api/textanalysis".to_string(),
            timeout_secs: 1,
        };
        let client = settings.client().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/api/textanalysis");
    }
}
