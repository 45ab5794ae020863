//! Owned registry of live rooms.
//!
//! The registry is an explicit value handed to every connection handler
//! rather than process-wide state, so tests can run independent servers side
//! by side. Rooms that close are dropped from it right after the operation
//! that closed them.

use crate::error::JoinError;
use crate::participant::{ParticipantHandle, lock};
use crate::room::{DEFAULT_MAX_USERNAME_LEN, Room};
use inarow_board::{RoomOptions, RoomSummary};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// A room shared between the registry and timers.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Cloneable handle to the set of rooms, keyed by name.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<BTreeMap<String, SharedRoom>>>,
    next_id: Arc<AtomicU64>,
    seed: Option<u64>,
    max_username_len: usize,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_USERNAME_LEN)
    }
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new(max_username_len: usize) -> Self {
        info!("Creating room registry");
        Self {
            rooms: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            seed: None,
            max_username_len,
        }
    }

    /// Creates a registry whose rooms draw random insertion positions from
    /// `seed` (offset by each room's id).
    pub fn seeded(max_username_len: usize, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(max_username_len)
        }
    }

    /// Creates room `name` and seats its creator.
    ///
    /// If the creator cannot be seated the empty room is discarded again.
    #[instrument(skip(self, options, participant), fields(uid = participant.uid()))]
    pub fn create(
        &self,
        name: &str,
        options: RoomOptions,
        participant: &Arc<ParticipantHandle>,
        username: &str,
    ) -> Result<SharedRoom, JoinError> {
        if name.trim().is_empty() {
            return Err(JoinError::BadRoomName);
        }
        options.validate()?;

        let room = {
            let mut rooms = lock(&self.rooms);
            if rooms.contains_key(name) {
                warn!(room = %name, "Room already exists");
                return Err(JoinError::RoomExists);
            }
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let room = match self.seed {
                Some(seed) => Room::seeded(id, name.to_string(), options, seed.wrapping_add(id)),
                None => Room::new(id, name.to_string(), options),
            }
            .with_max_username_len(self.max_username_len);
            let room = Arc::new(Mutex::new(room));
            rooms.insert(name.to_string(), Arc::clone(&room));
            room
        };

        let joined = lock(&room).join(participant, username);
        if let Err(e) = joined {
            debug!(error = %e, "Creator rejected; discarding room");
            self.remove_if_current(name, &room);
            return Err(e);
        }
        Ok(room)
    }

    /// Seats `participant` in the existing room `name`.
    #[instrument(skip(self, participant), fields(uid = participant.uid()))]
    pub fn join(
        &self,
        name: &str,
        participant: &Arc<ParticipantHandle>,
        username: &str,
    ) -> Result<usize, JoinError> {
        let room = self.get(name).ok_or(JoinError::NotFound)?;
        let mut guard = lock(&room);
        guard.join(participant, username)
    }

    /// Runs `f` on room `name`, then drops the room if `f` closed it.
    /// Returns `None` when no such room exists.
    pub fn with_room<R>(&self, name: &str, f: impl FnOnce(&mut Room) -> R) -> Option<R> {
        let room = self.get(name)?;
        let (result, closed) = {
            let mut guard = lock(&room);
            let result = f(&mut guard);
            (result, guard.is_closed())
        };
        if closed {
            self.remove_if_current(name, &room);
        }
        Some(result)
    }

    /// Looks up a room.
    pub fn get(&self, name: &str) -> Option<SharedRoom> {
        lock(&self.rooms).get(name).cloned()
    }

    /// Removes room `name`, closing it if it was still running.
    #[instrument(skip(self))]
    pub fn remove(&self, name: &str) -> Option<SharedRoom> {
        let room = lock(&self.rooms).remove(name)?;
        lock(&room).end("Room closed.");
        info!("Room removed");
        Some(room)
    }

    /// Directory of every live room, ordered by name.
    pub fn directory(&self) -> Vec<RoomSummary> {
        let rooms: Vec<SharedRoom> = lock(&self.rooms).values().cloned().collect();
        rooms.iter().map(|room| lock(room).summary()).collect()
    }

    /// Number of live rooms.
    pub fn len(&self) -> usize {
        lock(&self.rooms).len()
    }

    /// True when no room is live.
    pub fn is_empty(&self) -> bool {
        lock(&self.rooms).is_empty()
    }

    fn remove_if_current(&self, name: &str, room: &SharedRoom) {
        let mut rooms = lock(&self.rooms);
        if rooms.get(name).is_some_and(|current| Arc::ptr_eq(current, room)) {
            rooms.remove(name);
            debug!(room = %name, "Dropped closed room");
        }
    }
}
