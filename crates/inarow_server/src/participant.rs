//! Stable participant identity that outlives a single connection.
//!
//! A browser that reloads opens a new WebSocket but presents the same uid.
//! The [`ParticipantHandle`] for that uid keeps its room seat and simply
//! swaps the outbound channel, so rooms never notice the reconnect. Each swap
//! bumps a generation counter; the disconnect grace check compares
//! generations to tell "came back" from "gone".

use derive_getters::Getters;
use inarow_board::ServerMessage;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, instrument, trace};

/// Outbound channel to one connection.
pub type Outbound = UnboundedSender<ServerMessage>;

/// Marks a participant as seated in a room under a username.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoomBinding {
    #[getter(skip)]
    id: u64,
    /// Room name.
    room: String,
    /// Name the participant plays under.
    username: String,
}

#[derive(Debug)]
struct HandleState {
    sender: Outbound,
    generation: u64,
    binding: Option<RoomBinding>,
    next_binding: u64,
}

/// Per-uid handle shared by the connection registry, the participant's
/// current connection and the room it sits in.
#[derive(Debug)]
pub struct ParticipantHandle {
    uid: String,
    state: Mutex<HandleState>,
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ParticipantHandle {
    /// Creates a handle delivering to `sender`.
    pub fn new(uid: impl Into<String>, sender: Outbound) -> Self {
        Self {
            uid: uid.into(),
            state: Mutex::new(HandleState {
                sender,
                generation: 0,
                binding: None,
                next_binding: 0,
            }),
        }
    }

    /// The participant's uid.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Queues `message` for the current connection. A closed connection is
    /// logged and otherwise ignored; returns whether the message was queued.
    pub fn send(&self, message: ServerMessage) -> bool {
        let state = lock(&self.state);
        let event = message.name();
        match state.sender.send(message) {
            Ok(()) => {
                trace!(uid = %self.uid, event, "Queued message");
                true
            }
            Err(_) => {
                debug!(uid = %self.uid, event, "Dropped message for closed connection");
                false
            }
        }
    }

    /// Generation of the current connection.
    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }

    /// Points the handle at a new connection and returns the new generation.
    #[instrument(skip(self, sender), fields(uid = %self.uid))]
    pub fn rebind(&self, sender: Outbound) -> u64 {
        let mut state = lock(&self.state);
        state.sender = sender;
        state.generation += 1;
        debug!(generation = state.generation, "Connection rebound");
        state.generation
    }

    /// The room seat currently held, if any.
    pub fn binding(&self) -> Option<RoomBinding> {
        lock(&self.state).binding.clone()
    }

    /// Records a seat in `room` under `username`, replacing any previous one.
    pub fn bind_room(&self, room: &str, username: &str) -> RoomBinding {
        let mut state = lock(&self.state);
        let binding = RoomBinding {
            id: state.next_binding,
            room: room.to_string(),
            username: username.to_string(),
        };
        state.next_binding += 1;
        state.binding = Some(binding.clone());
        binding
    }

    /// Clears the seat if it is still `binding`. Returns whether it was.
    pub fn release(&self, binding: &RoomBinding) -> bool {
        let mut state = lock(&self.state);
        if state.binding.as_ref().is_some_and(|b| b.id == binding.id) {
            state.binding = None;
            true
        } else {
            false
        }
    }
}
