// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Entrants of a match: single players or teams of players.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Anything that can take part in a match.
///
/// Two distinct entrants must never compare equal, even when their names are
/// the same. Scheduling, scoring and ranking all rely on it.
pub trait Participation: Clone + fmt::Debug + PartialEq {
    type Player: Player;

    /// The players forming this participation. Never empty.
    fn players(&self) -> Vec<Self::Player>;

    /// The display name, also used to order participations before ranking.
    fn name(&self) -> String;
}

/// A single person. A player participates on their own or as part of a
/// [`Team`].
pub trait Player: Clone + fmt::Debug + PartialEq {
    fn name(&self) -> &str;
}

impl<P: Player> Participation for P {
    type Player = P;

    fn players(&self) -> Vec<P> {
        vec![self.clone()]
    }

    fn name(&self) -> String {
        Player::name(self).to_string()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Team<P> {
    players: Vec<P>,
}

impl<P: Player> Team<P> {
    /// # Panics
    ///
    /// If `players` is empty.
    #[must_use]
    pub fn new(players: Vec<P>) -> Self {
        assert!(!players.is_empty(), "a team needs at least one player");
        Self { players }
    }
}

impl<P: Player> Participation for Team<P> {
    type Player = P;

    fn players(&self) -> Vec<P> {
        self.players.clone()
    }

    fn name(&self) -> String {
        self.players
            .iter()
            .map(Player::name)
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

impl<P: Player> fmt::Display for Team<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Participation::name(self))
    }
}

/// A named player, enough for hosts that need nothing else.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Named(pub String);

impl Player for Named {
    fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Named {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for Named {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
