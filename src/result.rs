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

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scoring::Score;

/// Whether a scored match went to overtime.
///
/// A match that was not scored yet has no `OvertimeResult` at all.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OvertimeResult {
    NoOvertime,
    Overtime { suffix: Option<String> },
}

impl fmt::Display for OvertimeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOvertime => write!(f, "regular"),
            Self::Overtime { suffix: None } => write!(f, "overtime"),
            Self::Overtime {
                suffix: Some(suffix),
            } => write!(f, "overtime ({suffix})"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Outcome<R> {
    Unscored,
    /// `rank` 0 is the best, equal scores share a rank.
    Scored { score: Score, rank: usize, reward: R },
}

/// One participation's part in a match.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MatchResult<P, R> {
    participation: P,
    outcome: Outcome<R>,
}

impl<P, R> MatchResult<P, R> {
    #[must_use]
    pub fn new(participation: P) -> Self {
        Self {
            participation,
            outcome: Outcome::Unscored,
        }
    }

    #[must_use]
    pub fn participation(&self) -> &P {
        &self.participation
    }

    #[must_use]
    pub fn outcome(&self) -> &Outcome<R> {
        &self.outcome
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        matches!(self.outcome, Outcome::Scored { .. })
    }

    #[must_use]
    pub fn score(&self) -> Option<Score> {
        match self.outcome {
            Outcome::Scored { score, .. } => Some(score),
            Outcome::Unscored => None,
        }
    }

    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Scored { rank, .. } => Some(rank),
            Outcome::Unscored => None,
        }
    }

    #[must_use]
    pub fn reward(&self) -> Option<&R> {
        match &self.outcome {
            Outcome::Scored { reward, .. } => Some(reward),
            Outcome::Unscored => None,
        }
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome<R>) {
        self.outcome = outcome;
    }
}
