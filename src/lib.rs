//! Round robin schedules, score validation and rankings for tournaments played
//! over several match days.
//!
//! * [`generator`] - pair every participation with every other one once
//! * [`scoring`] - judge the scores of a match and hand out rewards
//! * [`tournament`] - rank participations by their accumulated rewards
//! * [`manager`] - enter scores and add or remove deciders between tied leaders
//! * [`rules`] - read match types from a RON file
//!
//! ## Binaries
//!
//! `round-robin` prints a schedule for the given participants.

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

#![deny(clippy::panic)]

pub mod generator;
pub mod manager;
pub mod match_day;
pub mod match_type;
pub mod participation;
pub mod result;
pub mod reward;
pub mod rules;
pub mod scoring;
pub mod status;
pub mod tournament;
pub mod utils;

pub use generator::{RoundRobinGenerator, Schedule, TournamentGenerator};
pub use manager::{ResultError, TournamentManager};
pub use match_day::{Match, MatchDay};
pub use participation::{Named, Participation, Player, Team};
pub use tournament::{RoundRobin, RoundRobinTournament, Standing, Tournament};

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the tournament-kit project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Licensed under the AGPLv3"
);
