//! Authoritative room server for N-in-a-row games.
//!
//! Participants connect over WebSocket, identify themselves with a stable
//! uid, and create or join named rooms. Each room runs the game rules from
//! [`inarow_board`] and broadcasts every accepted placement.
//!
//! # Architecture
//!
//! - **Participants**: per-uid handles that survive page reloads
//! - **Rooms**: the `Open -> Started -> Closed` state machine
//! - **Registry**: explicitly owned map of live rooms
//! - **Handler**: routes one connection's messages, runs the reconnect grace timer
//! - **HTTP**: `/ws`, `/rooms` and `/health` routes
//!
//! # Example
//!
//! ```no_run
//! use inarow_server::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default().with_overrides(None, Some(8080));
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod connections;
mod directory_client;
mod error;
mod handler;
mod http;
mod participant;
mod registry;
mod room;
mod state;

// Crate-level exports - Configuration and errors
pub use config::ServerConfig;
pub use error::{ActionError, ConfigError, JoinError};

// Crate-level exports - Participants
pub use connections::{Attachment, ConnectionRegistry};
pub use participant::{Outbound, ParticipantHandle, RoomBinding};

// Crate-level exports - Rooms
pub use registry::{RoomRegistry, SharedRoom};
pub use room::{ActionOutcome, CloseReason, DEFAULT_MAX_USERNAME_LEN, Room, RoomPhase};

// Crate-level exports - Transport
pub use directory_client::DirectoryClient;
pub use handler::ConnectionHandler;
pub use http::{Health, router, serve, serve_on};
pub use state::ServerState;
