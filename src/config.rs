use std::env;

use anyhow::{Context, Result};

/// Where the fixture service lives. The binary loads `.env.local` / `.env`
/// before this is read.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("FIXTURE_SERVICE_URL").context("FIXTURE_SERVICE_URL is not set")?;
        Ok(Self { base_url })
    }
}

/// Substrings driving the club/category filters. All markers are matched
/// case-insensitively and stored lowercased.
#[derive(Debug, Clone)]
pub struct FilterLexicon {
    /// Fixtures survive the first pipeline stage when either team name
    /// contains this.
    pub club_marker: String,
    /// Competitions whose name contains this pass the first stage too.
    pub event_marker: String,
    /// Competitions whose name contains any of these are user-editable.
    pub editable_markers: Vec<String>,
}

impl FilterLexicon {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let club_marker = env::var("CLUB_NAME")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(|val| val.to_lowercase())
            .unwrap_or(defaults.club_marker);
        let event_marker = env::var("EVENT_MARKER")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(|val| val.to_lowercase())
            .unwrap_or(defaults.event_marker);
        let editable_markers = env::var("EDITABLE_COMPETITIONS")
            .ok()
            .map(|val| {
                val.split(',')
                    .map(|part| part.trim().to_lowercase())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|markers| !markers.is_empty())
            .unwrap_or(defaults.editable_markers);
        Self {
            club_marker,
            event_marker,
            editable_markers,
        }
    }
}

impl Default for FilterLexicon {
    fn default() -> Self {
        Self {
            club_marker: "nemo rangers".to_string(),
            event_marker: "event".to_string(),
            editable_markers: vec![
                "challenge".to_string(),
                "camogie".to_string(),
                "club".to_string(),
            ],
        }
    }
}
