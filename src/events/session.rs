//! Session change detection.

use tracing::info;

use crate::schema::SessionDocument;
use crate::types::Session;

/// Detects a new or changed session from the description document.
///
/// Identity is the parsed `sessionId`; repeated documents for the same
/// session are idempotent. The caller is responsible for resetting detector
/// state and histories when a change is reported.
#[derive(Debug, Default)]
pub struct SessionTracker {
    current_id: Option<i64>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a session document. Returns the freshly derived session when
    /// its identity differs from the stored one, `None` otherwise.
    pub fn update(&mut self, doc: &SessionDocument) -> Option<Session> {
        let session = Session::from_document(doc);

        if self.current_id == Some(session.session_id) {
            return None;
        }

        info!(
            session_id = session.session_id,
            track = %session.track_name,
            car = %session.car_name,
            "New session"
        );
        self.current_id = Some(session.session_id);
        Some(session)
    }

    /// Forget the stored identity so the next document registers as new.
    /// Called on disconnect.
    pub fn reset(&mut self) {
        self.current_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64) -> SessionDocument {
        SessionDocument::parse(&format!("WeekendInfo:\n  SessionID: {id}\n")).unwrap()
    }

    #[test]
    fn first_document_registers_as_new_session() {
        let mut tracker = SessionTracker::new();
        let session = tracker.update(&doc(100)).expect("should emit session");
        assert_eq!(session.session_id, 100);
    }

    #[test]
    fn repeated_documents_are_idempotent() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.update(&doc(100)).is_some());
        assert!(tracker.update(&doc(100)).is_none());
        assert!(tracker.update(&doc(100)).is_none());
    }

    #[test]
    fn changed_id_supersedes_stored_session() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.update(&doc(100)).is_some());
        let session = tracker.update(&doc(200)).expect("id change should emit");
        assert_eq!(session.session_id, 200);
        assert!(tracker.update(&doc(200)).is_none());
    }

    #[test]
    fn reset_forgets_identity() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.update(&doc(100)).is_some());
        tracker.reset();
        assert!(tracker.update(&doc(100)).is_some());
    }
}
