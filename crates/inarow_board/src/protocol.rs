//! Wire vocabulary between rooms and their participants.
//!
//! Every message is a named event with positional arguments, encoded as JSON
//! `{"event": "actionTaken", "args": [3, 5, 1, 2]}`. Events with a single
//! field carry it directly: `{"event": "chat", "args": "gg"}`.

use crate::board::Line;
use crate::color::PlayerColor;
use crate::options::RoomOptions;
use serde::{Deserialize, Serialize};

/// Messages sent by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "event", content = "args", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ClientMessage {
    /// Liveness probe carrying a client timestamp (ms).
    Ping(u64),
    /// Connection handshake: binds this connection to a stable participant.
    Uid(String),
    /// `uid, username, roomName`: enter an existing room.
    Join(String, String, String),
    /// `uid, username, roomName, options`: create a room and enter it.
    Create(String, String, String, RoomOptions),
    /// `x, y`: place a piece.
    Action(i64, i64),
    /// Free-text chat.
    Chat(String),
}

/// Messages sent by a room (or the server) to participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "event", content = "args", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ServerMessage {
    /// Reply to [`ClientMessage::Ping`] echoing its timestamp.
    Pong(u64),
    /// Join or create succeeded; the room's options.
    JoinAccept(RoomOptions),
    /// Join or create failed.
    JoinReject(String),
    /// Roster snapshot; list order is turn order.
    Players(Vec<String>),
    /// The game began; the receiver's turn slot.
    GameStarted(usize),
    /// `x, y, color, nextTurnIndex` of a successful placement.
    ActionTaken(i64, i64, PlayerColor, usize),
    /// Placement refused; sent only to the requester.
    ActionReject(String),
    /// Terminal: a team completed one or more lines.
    GameWon(PlayerColor, Vec<Line>),
    /// Terminal: the game ended without a winner.
    GameEnd(String),
    /// `username, message` chat relay.
    PlayerChat(String, String),
}

/// Directory entry: `(roomName, currentPlayerCount, maxPlayers)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary(pub String, pub usize, pub usize);

impl RoomSummary {
    /// Room name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Participants currently seated.
    pub fn players(&self) -> usize {
        self.1
    }

    /// Seats available in total.
    pub fn max_players(&self) -> usize {
        self.2
    }
}

impl ClientMessage {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Encodes to JSON text.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes from JSON text.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl ServerMessage {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Encodes to JSON text.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes from JSON text.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// True for the messages that end a game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameWon(..) | Self::GameEnd(_))
    }
}
