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

use std::{fmt, sync::Arc};

use crate::{reward::Reward, scoring::ScoringConfiguration};

/// Identifies the kind of a match and how it is scored.
pub trait MatchType: Clone + fmt::Debug + PartialEq {
    type Reward: Reward;

    fn scoring_configuration(&self) -> &ScoringConfiguration<Self::Reward>;

    /// A decider settles a tie between the leaders of a round robin
    /// tournament. There should be at most one per tournament.
    fn is_decider(&self) -> bool;
}

/// A match type defined by configuration, see [`crate::rules::RuleSet`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedMatchType<R> {
    pub name: String,
    pub scoring: Arc<ScoringConfiguration<R>>,
    pub decider: bool,
}

impl<R: Reward> MatchType for NamedMatchType<R> {
    type Reward = R;

    fn scoring_configuration(&self) -> &ScoringConfiguration<R> {
        &self.scoring
    }

    fn is_decider(&self) -> bool {
        self.decider
    }
}

impl<R> fmt::Display for NamedMatchType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
