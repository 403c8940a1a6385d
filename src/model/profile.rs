//! Scholar-profile configuration (`data/scholar_config.json`).

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Delay between fetch requests below which the external service rate-limits.
pub const MIN_RECOMMENDED_DELAY_SECS: f64 = 1.0;

/// Profile of the lab lead whose publications are tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScholarProfile {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub affiliation: String,
    /// ISO 8601 timestamp of the last successful publication update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default)]
    pub settings: ProfileSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `settings` object of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default)]
    pub use_proxy: bool,
    /// Seconds between requests to the academic-search service.
    #[serde(default = "default_delay")]
    pub delay_between_requests: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            use_proxy: false,
            delay_between_requests: default_delay(),
            extra: Map::new(),
        }
    }
}

fn default_delay() -> f64 {
    2.0
}

impl ScholarProfile {
    /// Stamps `last_update` with `now`.
    pub fn touch(&mut self, now: DateTime<Local>) {
        self.last_update = Some(now.to_rfc3339_opts(SecondsFormat::Secs, false));
    }

    /// Lead author name, if configured.
    #[must_use]
    pub fn lead_author(&self) -> Option<&str> {
        let name = self.author_name.trim();
        (!name.is_empty()).then_some(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_profile_deserializes_minimal_document() {
        let profile: ScholarProfile =
            serde_json::from_str(r#"{"author_name":"Chen Zhang","affiliation":"Tsinghua"}"#)
                .unwrap();
        assert_eq!(profile.lead_author(), Some("Chen Zhang"));
        assert!(!profile.settings.use_proxy);
        assert!((profile.settings.delay_between_requests - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profile_touch_sets_last_update() {
        let mut profile = ScholarProfile::default();
        let now = Local.with_ymd_and_hms(2025, 4, 1, 9, 30, 0).unwrap();
        profile.touch(now);
        let stamp = profile.last_update.unwrap();
        assert!(stamp.starts_with("2025-04-01T09:30:00"), "got {stamp}");
    }

    #[test]
    fn test_profile_keeps_unknown_settings() {
        let raw = r#"{"author_name":"A","affiliation":"B","settings":{"use_proxy":true,"delay_between_requests":3,"max_results":50}}"#;
        let profile: ScholarProfile = serde_json::from_str(raw).unwrap();
        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["settings"]["max_results"], 50);
        assert_eq!(back["settings"]["use_proxy"], true);
    }

    #[test]
    fn test_lead_author_none_when_blank() {
        let profile = ScholarProfile {
            author_name: "  ".to_string(),
            ..ScholarProfile::default()
        };
        assert_eq!(profile.lead_author(), None);
    }
}
