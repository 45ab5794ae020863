//! Routes one connection's messages to the rooms.

use crate::participant::{Outbound, ParticipantHandle, lock};
use crate::registry::SharedRoom;
use crate::state::ServerState;
use inarow_board::{ClientMessage, RoomOptions, ServerMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Per-connection message router.
///
/// Created once the connection has identified itself with `uid`. Room seats
/// belong to the participant handle, not the connection, so a handler for a
/// reconnected uid picks up where the old connection left off.
#[derive(Debug)]
pub struct ConnectionHandler {
    state: ServerState,
    participant: Arc<ParticipantHandle>,
    generation: u64,
}

impl ConnectionHandler {
    /// Attaches a connection delivering to `sender` to participant `uid`.
    #[instrument(skip(state, sender))]
    pub fn attach(state: ServerState, uid: &str, sender: Outbound) -> Self {
        let attachment = state.connections().attach(uid, sender);
        Self {
            state,
            participant: attachment.handle,
            generation: attachment.generation,
        }
    }

    /// The participant this connection speaks for.
    pub fn participant(&self) -> &Arc<ParticipantHandle> {
        &self.participant
    }

    /// Generation of this connection.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Processes one message to completion.
    #[instrument(skip(self, message), fields(uid = self.participant.uid(), event = message.name()))]
    pub fn handle(&self, message: ClientMessage) {
        match message {
            ClientMessage::Ping(timestamp) => {
                self.participant.send(ServerMessage::Pong(timestamp));
            }
            ClientMessage::Uid(uid) => {
                warn!(%uid, "Ignoring repeated uid handshake");
            }
            ClientMessage::Join(uid, username, room) => {
                self.check_uid(&uid);
                self.join(&room, &username);
            }
            ClientMessage::Create(uid, username, room, options) => {
                self.check_uid(&uid);
                self.create(&room, &username, options);
            }
            ClientMessage::Action(x, y) => self.action(x, y),
            ClientMessage::Chat(text) => self.chat(&text),
        }
    }

    fn check_uid(&self, uid: &str) {
        if uid != self.participant.uid() {
            warn!(claimed = %uid, "Message uid differs from connection uid");
        }
    }

    fn join(&self, room: &str, username: &str) {
        if let Err(e) = self.state.rooms().join(room, &self.participant, username) {
            info!(%room, player = %username, reason = %e, "Join rejected");
            self.participant.send(ServerMessage::JoinReject(e.to_string()));
        }
    }

    fn create(&self, room: &str, username: &str, options: RoomOptions) {
        match self
            .state
            .rooms()
            .create(room, options, &self.participant, username)
        {
            Ok(shared) => {
                if let Some(timeout) = self.state.config().start_timeout() {
                    self.schedule_start(&shared, timeout);
                }
            }
            Err(e) => {
                info!(%room, player = %username, reason = %e, "Create rejected");
                self.participant.send(ServerMessage::JoinReject(e.to_string()));
            }
        }
    }

    fn action(&self, x: i64, y: i64) {
        let Some(binding) = self.participant.binding() else {
            debug!("Action outside a room ignored");
            return;
        };
        let result = self
            .state
            .rooms()
            .with_room(binding.room(), |room| room.action(binding.username(), x, y));
        match result {
            Some(Ok(outcome)) => debug!(?outcome, "Action accepted"),
            Some(Err(e)) => {
                self.participant.send(ServerMessage::ActionReject(e.to_string()));
            }
            None => debug!(room = %binding.room(), "Action for vanished room ignored"),
        }
    }

    fn chat(&self, text: &str) {
        let Some(binding) = self.participant.binding() else {
            debug!("Chat outside a room ignored");
            return;
        };
        self.state
            .rooms()
            .with_room(binding.room(), |room| room.chat(binding.username(), text));
    }

    /// Starts `room` after `timeout` unless it already started, filled or
    /// closed. A newer room reusing the name is left alone.
    fn schedule_start(&self, room: &SharedRoom, timeout: Duration) {
        let (name, id) = {
            let guard = lock(room);
            (guard.name().to_string(), guard.id())
        };
        let rooms = self.state.rooms().clone();
        debug!(room = %name, ?timeout, "Scheduled idle start");
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let started = rooms.with_room(&name, |room| room.id() == id && room.start());
            if started == Some(true) {
                info!(room = %name, "Room started after idle timeout");
            }
        });
    }

    /// The connection closed. After the reconnect grace period, if the uid
    /// has not reconnected, ends any game the participant sits in and
    /// forgets the uid. The task resolves to whether the participant was
    /// dropped.
    #[instrument(skip(self), fields(uid = self.participant.uid(), generation = self.generation))]
    pub fn disconnected(self) -> JoinHandle<bool> {
        let grace = self.state.config().reconnect_grace();
        debug!(?grace, "Connection closed; waiting for reconnect");
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            self.expire()
        })
    }

    fn expire(&self) -> bool {
        if self.participant.generation() != self.generation {
            debug!(uid = self.participant.uid(), "Participant reconnected in time");
            return false;
        }
        if let Some(binding) = self.participant.binding() {
            info!(room = %binding.room(), player = %binding.username(), "Participant did not return");
            self.state
                .rooms()
                .with_room(binding.room(), |room| room.participant_left(binding.username()));
        }
        self.state
            .connections()
            .forget(self.participant.uid(), self.generation)
    }
}
