//! Client-side projection of a server room.
//!
//! A [`ClientRoom`] keeps a read-only mirror of the authoritative board,
//! updated only from [`ServerMessage`]s, and answers the queries a renderer
//! needs. Renderers and UI chrome observe it through [`ViewEvent`]s.

use crate::board::{Board, Line, PlacementError};
use crate::color::PlayerColor;
use crate::coord::Coord;
use crate::dispatch::{Dispatcher, Subscription};
use crate::options::RoomOptions;
use crate::protocol::ServerMessage;
use crate::turn::TurnOrder;
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

/// Something a view may want to redraw for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// New roster, in turn order.
    RosterChanged(Vec<String>),
    /// The game began.
    Started {
        /// This participant's slot.
        my_slot: usize,
    },
    /// A piece landed.
    CellPlaced {
        /// Where it landed.
        at: Coord,
        /// Its color.
        color: PlayerColor,
        /// Turn index after the placement.
        next_turn: usize,
    },
    /// A team won.
    Won {
        /// Winning color.
        color: PlayerColor,
        /// Lines to highlight.
        lines: Vec<Line>,
    },
    /// The game ended without a winner.
    Ended(String),
    /// Chat relay.
    Chat {
        /// Sender's display name.
        from: String,
        /// Message body.
        message: String,
    },
    /// The server refused this participant's last placement.
    ActionRejected(String),
}

/// The mirror diverged from the server.
#[derive(Debug, Clone, Display, Error, From)]
pub enum ProjectionError {
    /// A broadcast placement could not be replayed locally.
    #[display("Broadcast placement rejected locally: {}", _0)]
    Placement(PlacementError),
}

/// Local mirror of one room, as seen by one participant.
#[derive(Debug)]
pub struct ClientRoom {
    room_name: String,
    options: RoomOptions,
    board: Board,
    order: TurnOrder,
    players: Vec<String>,
    turn: usize,
    my_slot: Option<usize>,
    winner: Option<PlayerColor>,
    winning_lines: Vec<Line>,
    ended: bool,
    events: Dispatcher<ViewEvent>,
}

impl ClientRoom {
    /// Builds the mirror from a `joinAccept`.
    #[instrument(skip(options))]
    pub fn new(room_name: String, options: RoomOptions) -> Self {
        info!(room = %room_name, "Joined room");
        Self {
            room_name,
            board: Board::from_options(&options),
            order: TurnOrder::new(&options),
            options,
            players: Vec::new(),
            turn: 0,
            my_slot: None,
            winner: None,
            winning_lines: Vec::new(),
            ended: false,
            events: Dispatcher::new(),
        }
    }

    /// Registers a view handler.
    pub fn subscribe(&mut self, handler: impl FnMut(&ViewEvent) + Send + 'static) -> Subscription {
        self.events.subscribe(handler)
    }

    /// Removes a view handler.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    /// Applies one server message.
    #[instrument(skip(self, message), fields(room = %self.room_name, event = message.name()))]
    pub fn apply(&mut self, message: &ServerMessage) -> Result<(), ProjectionError> {
        if self.ended {
            debug!("Ignoring message after game end");
            return Ok(());
        }
        let event = match message {
            ServerMessage::Players(names) => {
                self.players = names.clone();
                ViewEvent::RosterChanged(names.clone())
            }
            ServerMessage::GameStarted(slot) => {
                self.my_slot = Some(*slot);
                ViewEvent::Started { my_slot: *slot }
            }
            ServerMessage::ActionTaken(x, y, color, next_turn) => {
                let placement = self.board.set_cell(*x, *y, *color).inspect_err(|e| {
                    warn!(x, y, %color, error = %e, "Mirror rejected broadcast placement");
                })?;
                self.turn = *next_turn;
                ViewEvent::CellPlaced {
                    at: placement.at,
                    color: *color,
                    next_turn: *next_turn,
                }
            }
            ServerMessage::GameWon(color, lines) => {
                self.winner = Some(*color);
                self.winning_lines = lines.clone();
                self.ended = true;
                ViewEvent::Won {
                    color: *color,
                    lines: lines.clone(),
                }
            }
            ServerMessage::GameEnd(reason) => {
                self.ended = true;
                ViewEvent::Ended(reason.clone())
            }
            ServerMessage::PlayerChat(from, text) => ViewEvent::Chat {
                from: from.clone(),
                message: text.clone(),
            },
            ServerMessage::ActionReject(reason) => ViewEvent::ActionRejected(reason.clone()),
            ServerMessage::Pong(_) | ServerMessage::JoinAccept(_) | ServerMessage::JoinReject(_) => {
                return Ok(());
            }
        };
        self.events.emit(&event);
        Ok(())
    }

    /// Whether the cell exists (is inside the current bounds).
    pub fn cell_exists(&self, x: i64, y: i64) -> bool {
        self.board.within_bounds(x, y)
    }

    /// Color of the cell, if occupied.
    pub fn cell(&self, x: i64, y: i64) -> Option<PlayerColor> {
        self.board.cell(x, y)
    }

    /// Most recent placement, for highlighting.
    pub fn last_placed(&self) -> Option<Coord> {
        *self.board.last_placed()
    }

    /// True when this participant may place now.
    pub fn is_my_turn(&self) -> bool {
        !self.ended && self.my_slot == Some(self.order.slot_for(self.turn))
    }

    /// Color that places next.
    pub fn current_color(&self) -> Option<PlayerColor> {
        self.order.color_for(self.turn)
    }

    /// Room name.
    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    /// Options the room was created with.
    pub fn options(&self) -> &RoomOptions {
        &self.options
    }

    /// The mirrored board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Roster in turn order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Current turn index.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Slot assigned at game start.
    pub fn my_slot(&self) -> Option<usize> {
        self.my_slot
    }

    /// Winning color, once won.
    pub fn winner(&self) -> Option<PlayerColor> {
        self.winner
    }

    /// Winning lines, once won.
    pub fn winning_lines(&self) -> &[Line] {
        &self.winning_lines
    }

    /// True after `gameWon`, `gameEnd` or teardown.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Ends the view and unregisters every handler. Returns the number of
    /// handlers removed; a second call removes none.
    #[instrument(skip(self), fields(room = %self.room_name))]
    pub fn teardown(&mut self) -> usize {
        self.ended = true;
        let removed = self.events.clear();
        debug!(removed, "View torn down");
        removed
    }
}
