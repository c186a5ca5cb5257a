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

use crate::{
    match_type::MatchType,
    participation::Participation,
    result::{MatchResult, OvertimeResult},
};

/// A single match. Scores are entered through
/// [`crate::manager::TournamentManager::apply_scores`].
#[derive(Clone, Debug, PartialEq)]
pub struct Match<T: MatchType, P> {
    match_type: T,
    results: Vec<MatchResult<P, T::Reward>>,
    overtime_result: Option<OvertimeResult>,
}

impl<T: MatchType, P> Match<T, P> {
    #[must_use]
    pub fn new(match_type: T, participations: Vec<P>) -> Self {
        Self {
            match_type,
            results: participations.into_iter().map(MatchResult::new).collect(),
            overtime_result: None,
        }
    }

    #[must_use]
    pub fn match_type(&self) -> &T {
        &self.match_type
    }

    #[must_use]
    pub fn results(&self) -> &[MatchResult<P, T::Reward>] {
        &self.results
    }

    /// `None` until the match is scored.
    #[must_use]
    pub fn overtime_result(&self) -> Option<&OvertimeResult> {
        self.overtime_result.as_ref()
    }

    pub fn participations(&self) -> impl Iterator<Item = &P> {
        self.results.iter().map(MatchResult::participation)
    }

    #[must_use]
    pub fn is_decider(&self) -> bool {
        self.match_type.is_decider()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.overtime_result.is_some() && self.results.iter().all(MatchResult::is_scored)
    }

    pub(crate) fn results_mut(&mut self) -> &mut [MatchResult<P, T::Reward>] {
        &mut self.results
    }

    pub(crate) fn set_overtime_result(&mut self, overtime_result: OvertimeResult) {
        self.overtime_result = Some(overtime_result);
    }
}

impl<T: MatchType, P: PartialEq> Match<T, P> {
    /// Whether exactly `participations` take part in this match, in any
    /// order.
    #[must_use]
    pub fn has_participations(&self, participations: &[P]) -> bool {
        self.results.len() == participations.len()
            && participations
                .iter()
                .all(|participation| self.participations().any(|p| p == participation))
    }
}

impl<T: MatchType, P: Participation> fmt::Display for Match<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.participations().map(Participation::name).collect();
        write!(f, "{}", names.join(" - "))?;

        if let Some(overtime_result) = &self.overtime_result {
            let scores: Vec<_> = self
                .results
                .iter()
                .filter_map(|result| result.score().map(|score| score.to_string()))
                .collect();
            write!(f, " {} {overtime_result}", scores.join(":"))?;
        }

        Ok(())
    }
}

/// Matches held at the same time.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchDay<T: MatchType, P> {
    matches: Vec<Match<T, P>>,
}

impl<T: MatchType, P> MatchDay<T, P> {
    #[must_use]
    pub fn new(matches: Vec<Match<T, P>>) -> Self {
        Self { matches }
    }

    #[must_use]
    pub fn matches(&self) -> &[Match<T, P>] {
        &self.matches
    }

    /// Gives access to the matches to score them.
    pub fn matches_mut(&mut self) -> &mut [Match<T, P>] {
        &mut self.matches
    }

    pub fn push(&mut self, game: Match<T, P>) {
        self.matches.push(game);
    }

    pub fn remove(&mut self, index: usize) -> Match<T, P> {
        self.matches.remove(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.matches.iter().all(Match::is_finished)
    }
}
