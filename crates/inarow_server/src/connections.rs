//! Registry of participant handles keyed by uid.

use crate::participant::{Outbound, ParticipantHandle, lock};
use derive_new::new;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Result of attaching a connection to a uid.
#[derive(Debug, Clone, new)]
pub struct Attachment {
    /// Handle for the uid.
    pub handle: Arc<ParticipantHandle>,
    /// Generation of this connection.
    pub generation: u64,
    /// True when an existing handle was taken over.
    pub resumed: bool,
}

/// Maps uids to their [`ParticipantHandle`]s.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    handles: Arc<Mutex<HashMap<String, Arc<ParticipantHandle>>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating connection registry");
        Self::default()
    }

    /// Binds a new connection to `uid`, taking over the existing handle when
    /// the uid is known.
    #[instrument(skip(self, sender))]
    pub fn attach(&self, uid: &str, sender: Outbound) -> Attachment {
        let mut handles = lock(&self.handles);
        if let Some(handle) = handles.get(uid) {
            let generation = handle.rebind(sender);
            info!(generation, "Participant reconnected");
            return Attachment::new(Arc::clone(handle), generation, true);
        }
        let handle = Arc::new(ParticipantHandle::new(uid, sender));
        handles.insert(uid.to_string(), Arc::clone(&handle));
        info!("Participant connected");
        Attachment::new(handle, 0, false)
    }

    /// Drops the handle for `uid` unless it was rebound after `generation`.
    #[instrument(skip(self))]
    pub fn forget(&self, uid: &str, generation: u64) -> bool {
        let mut handles = lock(&self.handles);
        match handles.get(uid) {
            Some(handle) if handle.generation() == generation => {
                handles.remove(uid);
                debug!("Forgot participant");
                true
            }
            _ => false,
        }
    }

    /// Looks up a handle.
    pub fn get(&self, uid: &str) -> Option<Arc<ParticipantHandle>> {
        lock(&self.handles).get(uid).cloned()
    }

    /// Number of known participants.
    pub fn len(&self) -> usize {
        lock(&self.handles).len()
    }

    /// True when no participant is known.
    pub fn is_empty(&self) -> bool {
        lock(&self.handles).is_empty()
    }
}
