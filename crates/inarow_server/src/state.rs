//! Shared server state handed to every connection.

use crate::config::ServerConfig;
use crate::connections::ConnectionRegistry;
use crate::registry::RoomRegistry;
use derive_getters::Getters;
use std::sync::Arc;
use tracing::instrument;

/// Rooms, participants and configuration for one server instance.
#[derive(Debug, Clone, Getters)]
pub struct ServerState {
    /// Live rooms.
    rooms: RoomRegistry,
    /// Known participants.
    connections: ConnectionRegistry,
    /// Settings.
    config: Arc<ServerConfig>,
}

impl ServerState {
    /// Creates empty state for `config`.
    #[instrument(skip(config))]
    pub fn new(config: ServerConfig) -> Self {
        let rooms = RoomRegistry::new(*config.max_username_len());
        Self::with_rooms(config, rooms)
    }

    /// Creates state around an existing room registry.
    pub fn with_rooms(config: ServerConfig, rooms: RoomRegistry) -> Self {
        Self {
            rooms,
            connections: ConnectionRegistry::new(),
            config: Arc::new(config),
        }
    }
}
