//! Session-description document parsing.
//!
//! iRacing describes the current session as a nested YAML document. This
//! module types the subset of that document the event engine consumes
//! (weekend metadata, the session list, and the driver roster) and handles
//! iRacing's non-standard YAML output, which can contain control characters
//! that break standard parsers.

use serde::Deserialize;

use crate::error::{PitwireError, Result};

/// Weekend and track information.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct WeekendInfo {
    #[serde(rename = "SessionID")]
    pub session_id: Option<i64>,
    #[serde(rename = "SubSessionID")]
    pub sub_session_id: Option<i64>,
    /// Internal track name
    pub track_name: Option<String>,
    /// Human-facing track name
    pub track_display_name: Option<String>,
    /// Track configuration name (layout)
    pub track_config_name: Option<String>,
}

/// One entry of the session list.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SessionEntry {
    pub session_num: Option<i32>,
    /// "unlimited" or a lap count
    pub session_laps: Option<serde_yaml_ng::Value>,
    /// "unlimited" or a duration like "90.00 min"
    pub session_time: Option<String>,
    pub session_type: Option<String>,
    pub session_state: Option<String>,
}

/// Session list with the index of the active session.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SessionList {
    pub current_session_num: i32,
    pub sessions: Vec<SessionEntry>,
}

/// One driver of the roster.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct DriverEntry {
    pub car_idx: Option<i32>,
    pub user_name: Option<String>,
    pub car_screen_name: Option<String>,
}

/// Driver roster information.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct DriverInfo {
    pub driver_car_idx: Option<i32>,
    pub drivers: Vec<DriverEntry>,
}

/// The nested session-description document.
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SessionDocument {
    pub weekend_info: WeekendInfo,
    pub session_info: SessionList,
    pub driver_info: Option<DriverInfo>,
}

impl SessionDocument {
    /// Parse a raw YAML document, preprocessing iRacing's output first.
    pub fn parse(yaml: &str) -> Result<Self> {
        let cleaned = preprocess_yaml(yaml)?;
        serde_yaml_ng::from_str(&cleaned).map_err(|e| PitwireError::Parse {
            context: "SessionDocument deserialization".to_string(),
            details: e.to_string(),
        })
    }

    /// The active session entry: the one matching `CurrentSessionNum`,
    /// falling back to the first listed session.
    pub fn active_session(&self) -> Option<&SessionEntry> {
        let current = self.session_info.current_session_num;
        self.session_info
            .sessions
            .iter()
            .find(|s| s.session_num == Some(current))
            .or_else(|| self.session_info.sessions.first())
    }
}

/// Strip control characters (except newline, carriage return, tab) that
/// iRacing leaves in its YAML output.
fn preprocess_yaml(yaml: &str) -> Result<String> {
    let mut result = String::with_capacity(yaml.len());

    for ch in yaml.chars() {
        match ch {
            '\x00'..='\x08' | '\x0B'..='\x0C' | '\x0E'..='\x1F' => continue,
            _ => result.push(ch),
        }
    }

    if result.trim().is_empty() {
        return Err(PitwireError::Parse {
            context: "YAML preprocessing".to_string(),
            details: "document is empty after preprocessing".to_string(),
        });
    }

    Ok(result)
}
