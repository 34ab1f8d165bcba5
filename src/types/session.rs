//! Derived session identity and metadata.

use serde::Serialize;

use crate::schema::SessionDocument;

/// One contiguous track/car/event configuration, identified by `session_id`.
///
/// Built from the session-description document with deterministic defaults:
/// missing numerics become 0, missing identifiers become "Unknown", missing
/// nullable fields stay `None`. Immutable once created; superseded wholesale
/// when the tracker observes a different `session_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: i64,
    pub subsession_id: Option<i64>,
    pub track_name: String,
    pub track_config: Option<String>,
    pub car_name: String,
    pub session_type: String,
    pub session_laps: Option<i32>,
    pub session_time_seconds: Option<f64>,
    pub is_time_limited: bool,
    pub session_state: String,
}

impl Session {
    /// Derive a session from a parsed description document.
    pub fn from_document(doc: &SessionDocument) -> Self {
        let weekend = &doc.weekend_info;
        let active = doc.active_session();

        let track_name = weekend
            .track_display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(weekend.track_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("Unknown")
            .to_string();

        let car_name = doc
            .driver_info
            .as_ref()
            .and_then(|info| info.drivers.first())
            .and_then(|driver| driver.car_screen_name.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        let (session_time_seconds, is_time_limited) =
            parse_time_limit(active.and_then(|s| s.session_time.as_deref()));

        Self {
            session_id: weekend.session_id.unwrap_or(0),
            subsession_id: weekend.sub_session_id,
            track_name,
            track_config: weekend.track_config_name.clone().filter(|s| !s.is_empty()),
            car_name,
            session_type: active
                .and_then(|s| s.session_type.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            session_laps: parse_session_laps(active.and_then(|s| s.session_laps.as_ref())),
            session_time_seconds,
            is_time_limited,
            session_state: active
                .and_then(|s| s.session_state.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Parse a session time-limit string to seconds.
///
/// Accepts `"<number> min"` and `"<number> hour[s]"` (case-insensitive).
/// The literal `"unlimited"` means no limit at all; anything else that does
/// not parse keeps the session flagged time-limited with unknown duration.
fn parse_time_limit(text: Option<&str>) -> (Option<f64>, bool) {
    let Some(text) = text else {
        return (None, true);
    };

    let lowered = text.trim().to_ascii_lowercase();
    if lowered == "unlimited" {
        return (None, false);
    }

    let number: String =
        lowered.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
    let unit = lowered[number.len()..].trim_start();

    let seconds = number.parse::<f64>().ok().and_then(|n| {
        if unit.starts_with("min") {
            Some(n * 60.0)
        } else if unit.starts_with("hour") {
            Some(n * 3600.0)
        } else {
            None
        }
    });

    (seconds, true)
}

/// Parse the lap count: "unlimited" (or anything non-numeric) means no cap.
fn parse_session_laps(value: Option<&serde_yaml_ng::Value>) -> Option<i32> {
    match value {
        Some(serde_yaml_ng::Value::Number(n)) => n.as_i64().map(|v| v as i32),
        Some(serde_yaml_ng::Value::String(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SessionDocument;

    fn doc(yaml: &str) -> SessionDocument {
        SessionDocument::parse(yaml).unwrap()
    }

    #[test]
    fn derives_full_session_from_document() {
        let session = Session::from_document(&doc(r#"
WeekendInfo:
  SessionID: 100
  SubSessionID: 555
  TrackDisplayName: Watkins Glen
  TrackConfigName: Boot
SessionInfo:
  CurrentSessionNum: 0
  Sessions:
    - SessionNum: 0
      SessionLaps: 20
      SessionTime: 45.00 min
      SessionType: Race
      SessionState: Racing
DriverInfo:
  Drivers:
    - CarIdx: 0
      CarScreenName: Mazda MX-5
"#));

        assert_eq!(session.session_id, 100);
        assert_eq!(session.subsession_id, Some(555));
        assert_eq!(session.track_name, "Watkins Glen");
        assert_eq!(session.track_config.as_deref(), Some("Boot"));
        assert_eq!(session.car_name, "Mazda MX-5");
        assert_eq!(session.session_type, "Race");
        assert_eq!(session.session_laps, Some(20));
        assert_eq!(session.session_time_seconds, Some(2700.0));
        assert!(session.is_time_limited);
        assert_eq!(session.session_state, "Racing");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let session = Session::from_document(&doc("WeekendInfo:\n  TrackName: spa\n"));
        assert_eq!(session.session_id, 0);
        assert_eq!(session.subsession_id, None);
        assert_eq!(session.track_name, "spa");
        assert_eq!(session.track_config, None);
        assert_eq!(session.car_name, "Unknown");
        assert_eq!(session.session_type, "Unknown");
        assert_eq!(session.session_laps, None);
        assert_eq!(session.session_state, "Unknown");
    }

    #[test]
    fn display_name_preferred_over_internal_name() {
        let session = Session::from_document(&doc(
            "WeekendInfo:\n  TrackName: watkinsglen 2021\n  TrackDisplayName: Watkins Glen\n",
        ));
        assert_eq!(session.track_name, "Watkins Glen");
    }

    #[test]
    fn unlimited_time_is_not_time_limited() {
        assert_eq!(parse_time_limit(Some("unlimited")), (None, false));
        assert_eq!(parse_time_limit(Some("UNLIMITED")), (None, false));
    }

    #[test]
    fn minute_and_hour_limits_convert_to_seconds() {
        assert_eq!(parse_time_limit(Some("90 min")), (Some(5400.0), true));
        assert_eq!(parse_time_limit(Some("120.00 min")), (Some(7200.0), true));
        assert_eq!(parse_time_limit(Some("2 hours")), (Some(7200.0), true));
        assert_eq!(parse_time_limit(Some("1.5 Hour")), (Some(5400.0), true));
    }

    #[test]
    fn unparsable_limit_stays_time_limited_without_seconds() {
        assert_eq!(parse_time_limit(Some("soonish")), (None, true));
        assert_eq!(parse_time_limit(Some("90 parsecs")), (None, true));
        assert_eq!(parse_time_limit(None), (None, true));
    }

    #[test]
    fn unlimited_laps_parse_to_none() {
        let session = Session::from_document(&doc(r#"
SessionInfo:
  CurrentSessionNum: 0
  Sessions:
    - SessionNum: 0
      SessionLaps: unlimited
"#));
        assert_eq!(session.session_laps, None);
    }
}
