//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! A duel always has exactly two seats, `A` and `B`. Seat A is the player
//! who opened the match; seat B is either a second human or left unbound
//! for the scripted opponent.
//!
//! ## SeatMap
//!
//! Fixed two-slot storage indexed by `Seat`, the two-seat counterpart of a
//! per-player map.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combat slots in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The seat that opened the match and commits first in round 1.
    A,
    /// The second seat; unbound when the scripted opponent plays it.
    B,
}

impl Seat {
    /// Both seats, in order.
    pub const BOTH: [Seat; 2] = [Seat::A, Seat::B];

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// Raw index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    /// Seat that commits first in the given round.
    ///
    /// Odd rounds open with seat A, even rounds with seat B.
    #[must_use]
    pub const fn opening(round: u32) -> Self {
        if round % 2 == 1 {
            Seat::A
        } else {
            Seat::B
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::A => write!(f, "Seat A"),
            Seat::B => write!(f, "Seat B"),
        }
    }
}

/// External identity of a human occupying a seat.
///
/// Opaque to the engine; callers map it to their own user ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant({})", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use slap_duel::core::{Seat, SeatMap};
///
/// let mut hp: SeatMap<i32> = SeatMap::with_value(20);
/// hp[Seat::B] -= 4;
///
/// assert_eq!(hp[Seat::A], 20);
/// assert_eq!(hp[Seat::B], 16);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: [factory(Seat::A), factory(Seat::B)],
        }
    }

    /// Create a new SeatMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::BOTH.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
