use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Error returned when a client-requested meeting id already has an active
/// stream in this process.
#[derive(Debug)]
pub struct MeetingBusy(pub String);

impl fmt::Display for MeetingBusy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meeting {} already has an active stream", self.0)
    }
}

impl std::error::Error for MeetingBusy {}

/// Process-level meeting id allocation.
///
/// The only state shared across sessions: guarantees meeting id uniqueness
/// under concurrent session creation. Server-assigned ids are fresh UUIDs;
/// client-supplied ids are rejected while another stream holds them.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: Mutex<HashSet<String>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a meeting id for a new session. The claim is released when the
    /// returned guard is dropped.
    pub fn claim(
        self: &Arc<Self>,
        requested: Option<String>,
    ) -> Result<MeetingClaim, MeetingBusy> {
        let mut active = self.active.lock().expect("session registry poisoned");

        let meeting_id = match requested {
            Some(id) => {
                if active.contains(&id) {
                    return Err(MeetingBusy(id));
                }
                id
            }
            None => format!("meeting-{}", uuid::Uuid::new_v4()),
        };

        active.insert(meeting_id.clone());
        info!(meeting_id, sessions = active.len(), "meeting id claimed");

        Ok(MeetingClaim {
            meeting_id,
            registry: Arc::clone(self),
        })
    }

    pub fn is_active(&self, meeting_id: &str) -> bool {
        self.active
            .lock()
            .expect("session registry poisoned")
            .contains(meeting_id)
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().expect("session registry poisoned").len()
    }

    fn release(&self, meeting_id: &str) {
        let mut active = self.active.lock().expect("session registry poisoned");
        active.remove(meeting_id);
        debug!(meeting_id, sessions = active.len(), "meeting id released");
    }
}

/// Guard for a claimed meeting id. Dropping it releases the id, including
/// when the session task is aborted mid-flight.
#[derive(Debug)]
pub struct MeetingClaim {
    meeting_id: String,
    registry: Arc<SessionRegistry>,
}

impl MeetingClaim {
    pub fn id(&self) -> &str {
        &self.meeting_id
    }
}

impl Drop for MeetingClaim {
    fn drop(&mut self) {
        self.registry.release(&self.meeting_id);
    }
}
