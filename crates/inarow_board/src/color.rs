//! Player and team colors.

use crate::board::PlacementError;
use serde::{Deserialize, Serialize};

/// The mark a player or team leaves on the board.
///
/// On the wire a color is its numeric index (0-7).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::FromRepr,
)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum PlayerColor {
    /// Team 0.
    Red = 0,
    /// Team 1.
    Green = 1,
    /// Team 2.
    Blue = 2,
    /// Team 3.
    Yellow = 3,
    /// Team 4.
    Magenta = 4,
    /// Team 5.
    Cyan = 5,
    /// Team 6.
    Orange = 6,
    /// Team 7.
    Pink = 7,
}

impl PlayerColor {
    /// Number of distinct colors, and so the maximum team count.
    pub const COUNT: usize = 8;

    /// Returns the color for a team index, if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// Team index of this color.
    pub fn index(self) -> usize {
        self as usize
    }

    /// CSS hex code used by renderers.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#ff0000",
            Self::Green => "#00ff00",
            Self::Blue => "#0000ff",
            Self::Yellow => "#ffff00",
            Self::Magenta => "#dd00bb",
            Self::Cyan => "#00ffff",
            Self::Orange => "#ff8000",
            Self::Pink => "#ff80ff",
        }
    }
}

impl TryFrom<u8> for PlayerColor {
    type Error = PlacementError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_repr(raw).ok_or(PlacementError::InvalidColor(raw))
    }
}

impl From<PlayerColor> for u8 {
    fn from(color: PlayerColor) -> Self {
        color as u8
    }
}
