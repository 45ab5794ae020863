//! The authoritative room state machine.
//!
//! A room moves `Open -> Started -> Closed`. It owns its board and roster
//! outright; callers serialise access (the registry keeps each room behind
//! its own mutex), so the turn check and the placement in [`Room::action`]
//! happen atomically.

use crate::error::{ActionError, JoinError};
use crate::participant::{ParticipantHandle, RoomBinding};
use inarow_board::{
    Board, Coord, Line, PlacementError, PlayerColor, RoomOptions, RoomSummary, ServerMessage,
    TeamOrderPolicy, TurnOrder,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default longest username, in characters.
pub const DEFAULT_MAX_USERNAME_LEN: usize = 32;

/// How a room ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// A team completed a line.
    Won(PlayerColor),
    /// The game ended without a winner.
    Ended(String),
}

/// Lifecycle phase of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomPhase {
    /// Accepting joins.
    Open,
    /// Accepting placements.
    Started,
    /// Terminal.
    Closed(CloseReason),
}

/// Result of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Play continues.
    Placed {
        /// Where the piece landed.
        at: Coord,
        /// Turn index now to move.
        next_turn: usize,
    },
    /// The placement won; the room closed.
    Won {
        /// Winning color.
        color: PlayerColor,
        /// Completed lines.
        lines: Vec<Line>,
    },
    /// The board filled without a winner; the room closed.
    BoardFull,
}

#[derive(Debug)]
struct Seat {
    username: String,
    participant: Arc<ParticipantHandle>,
    binding: RoomBinding,
}

/// One game and its participants.
#[derive(Debug)]
pub struct Room {
    id: u64,
    name: String,
    options: RoomOptions,
    board: Board,
    order: TurnOrder,
    seats: Vec<Seat>,
    turn: usize,
    phase: RoomPhase,
    rng: StdRng,
    max_username_len: usize,
}

impl Room {
    /// Creates an open room with an entropy-seeded order policy.
    #[instrument(skip(options))]
    pub fn new(id: u64, name: String, options: RoomOptions) -> Self {
        Self::with_rng(id, name, options, StdRng::from_os_rng())
    }

    /// Creates an open room whose random insertion positions are
    /// reproducible from `seed`.
    #[instrument(skip(options))]
    pub fn seeded(id: u64, name: String, options: RoomOptions, seed: u64) -> Self {
        Self::with_rng(id, name, options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: u64, name: String, options: RoomOptions, rng: StdRng) -> Self {
        info!(room = %name, seats = options.seat_count(), "Game created");
        Self {
            id,
            board: Board::from_options(&options),
            order: TurnOrder::new(&options),
            name,
            options,
            seats: Vec::new(),
            turn: 0,
            phase: RoomPhase::Open,
            rng,
            max_username_len: DEFAULT_MAX_USERNAME_LEN,
        }
    }

    /// Sets the longest accepted username.
    pub fn with_max_username_len(mut self, len: usize) -> Self {
        self.max_username_len = len;
        self
    }

    /// Seats `participant` under `username`.
    ///
    /// On success the participant receives `joinAccept`, everyone receives
    /// the new roster, and the game starts once every seat is filled.
    /// Returns the roster position the participant was inserted at.
    #[instrument(skip(self, participant), fields(room = %self.name, uid = participant.uid()))]
    pub fn join(
        &mut self,
        participant: &Arc<ParticipantHandle>,
        username: &str,
    ) -> Result<usize, JoinError> {
        if self.is_closed() {
            return Err(JoinError::NotFound);
        }
        if self.seats.len() >= self.options.seat_count() {
            return Err(JoinError::Full);
        }
        if self.phase == RoomPhase::Started {
            return Err(JoinError::Started);
        }
        if username.trim().is_empty() {
            return Err(JoinError::BadUsername);
        }
        if username.chars().count() > self.max_username_len {
            return Err(JoinError::UsernameTooLong);
        }
        if self.seats.iter().any(|s| s.username == username) {
            return Err(JoinError::UsernameTaken);
        }
        if participant.binding().is_some() {
            return Err(JoinError::AlreadySeated);
        }

        participant.send(ServerMessage::JoinAccept(self.options));

        let len = self.seats.len();
        let position = match self.options.team_order_policy {
            TeamOrderPolicy::Join => len,
            TeamOrderPolicy::Random => self.rng.random_range(0..=len),
        };
        let binding = participant.bind_room(&self.name, username);
        self.seats.insert(
            position,
            Seat {
                username: username.to_string(),
                participant: Arc::clone(participant),
                binding,
            },
        );
        info!(player = %username, position, policy = %self.options.team_order_policy, "Player joined");

        self.broadcast(ServerMessage::Players(self.players()));
        if self.seats.len() == self.options.seat_count() {
            self.start();
        }
        Ok(position)
    }

    /// Starts the game with whoever is seated.
    ///
    /// A start before the roster fills (the idle-start timeout) fixes the
    /// turn order to the current roster. Returns false when the room is not
    /// open or nobody is seated.
    #[instrument(skip(self), fields(room = %self.name))]
    pub fn start(&mut self) -> bool {
        if self.phase != RoomPhase::Open || self.seats.is_empty() {
            return false;
        }
        if self.seats.len() < self.options.seat_count() {
            info!(seated = self.seats.len(), "Starting under-full room");
            self.order = TurnOrder::with_seats(&self.options, self.seats.len());
        }
        self.phase = RoomPhase::Started;
        for (slot, seat) in self.seats.iter().enumerate() {
            seat.participant.send(ServerMessage::GameStarted(slot));
        }
        info!("Game started");
        true
    }

    /// Places a piece for `username` at `(x, y)`.
    ///
    /// Rejections leave the room untouched and are for the caller to relay
    /// to the requester. Accepted placements are broadcast, followed by
    /// `gameWon` or `gameEnd` when they close the room.
    #[instrument(skip(self), fields(room = %self.name, turn = self.turn))]
    pub fn action(&mut self, username: &str, x: i64, y: i64) -> Result<ActionOutcome, ActionError> {
        match self.phase {
            RoomPhase::Started => {}
            RoomPhase::Open => return Err(ActionError::NotStarted),
            RoomPhase::Closed(_) => return Err(ActionError::Closed),
        }
        let slot = self
            .seats
            .iter()
            .position(|s| s.username == username)
            .ok_or(ActionError::NotSeated)?;
        if self.options.enforce_turns && slot != self.order.slot_for(self.turn) {
            debug!(slot, expected = self.order.slot_for(self.turn), "Out of turn");
            return Err(ActionError::NotYourTurn);
        }

        let team = self.order.team_for(self.turn);
        let color = self
            .order
            .color_for(self.turn)
            .ok_or(PlacementError::InvalidColor(u8::try_from(team).unwrap_or(u8::MAX)))?;
        let placement = self.board.set_cell(x, y, color).inspect_err(|e| {
            debug!(error = %e, "Placement rejected");
        })?;

        self.turn = self.order.advance(self.turn);
        let at = placement.at;
        self.broadcast(ServerMessage::ActionTaken(at.x, at.y, color, self.turn));

        if let Some(lines) = placement.winning_lines {
            self.broadcast(ServerMessage::GameWon(color, lines.clone()));
            self.close(CloseReason::Won(color));
            return Ok(ActionOutcome::Won { color, lines });
        }
        if self.board.is_full() {
            self.end("Board full.");
            return Ok(ActionOutcome::BoardFull);
        }
        Ok(ActionOutcome::Placed {
            at,
            next_turn: self.turn,
        })
    }

    /// Relays chat from a seated participant. Blank messages are dropped.
    #[instrument(skip(self, message), fields(room = %self.name))]
    pub fn chat(&mut self, username: &str, message: &str) -> bool {
        if matches!(self.phase, RoomPhase::Closed(_)) || message.trim().is_empty() {
            return false;
        }
        if !self.seats.iter().any(|s| s.username == username) {
            warn!(player = %username, "Chat from unseated participant");
            return false;
        }
        self.broadcast(ServerMessage::PlayerChat(
            username.to_string(),
            message.to_string(),
        ));
        true
    }

    /// Ends the game because `username` did not come back in time.
    pub fn participant_left(&mut self, username: &str) -> bool {
        if !self.seats.iter().any(|s| s.username == username) {
            return false;
        }
        self.end(&format!("Player {} left.", username))
    }

    /// Broadcasts `gameEnd` and closes. A closed room is left untouched.
    #[instrument(skip(self), fields(room = %self.name))]
    pub fn end(&mut self, reason: &str) -> bool {
        if self.is_closed() {
            return false;
        }
        self.broadcast(ServerMessage::GameEnd(reason.to_string()));
        self.close(CloseReason::Ended(reason.to_string()))
    }

    /// Closes the room and releases every seat so no participant message
    /// reaches it again. Idempotent: returns false if already closed.
    #[instrument(skip(self), fields(room = %self.name))]
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if self.is_closed() {
            return false;
        }
        for seat in &self.seats {
            seat.participant.release(&seat.binding);
        }
        info!(?reason, "Game ended");
        self.phase = RoomPhase::Closed(reason);
        true
    }

    /// Directory entry for this room.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary(
            self.name.clone(),
            self.seats.len(),
            self.options.seat_count(),
        )
    }

    /// Registry-assigned identity, distinct across rooms reusing a name.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options the room was created with.
    pub fn options(&self) -> &RoomOptions {
        &self.options
    }

    /// Current phase.
    pub fn phase(&self) -> &RoomPhase {
        &self.phase
    }

    /// True once closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.phase, RoomPhase::Closed(_))
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current turn index.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Usernames in turn order.
    pub fn players(&self) -> Vec<String> {
        self.seats.iter().map(|s| s.username.clone()).collect()
    }

    fn broadcast(&self, message: ServerMessage) {
        debug!(event = message.name(), recipients = self.seats.len(), "Broadcast");
        for seat in &self.seats {
            seat.participant.send(message.clone());
        }
    }
}
