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

//! Entering scores and keeping deciders in line with the ranking.

use log::{debug, info};
use thiserror::Error;

use crate::{
    match_day::Match,
    match_type::MatchType,
    result::{MatchResult, Outcome, OvertimeResult},
    scoring::Score,
    status::DeciderStatus,
    tournament::{RoundRobinTournament, shared_ranks},
    utils::join_names,
};

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ResultError {
    #[error("results: the provided results do not match the results of the match")]
    InvalidResultsProvided,
    #[error("results: the scores are invalid")]
    InvalidScores,
}

/// Manages the scores and the state of tournaments. Holds no state itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct TournamentManager;

#[allow(clippy::unused_self)]
impl TournamentManager {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scores `game` as judged by its match type.
    ///
    /// `scores` pairs each result of the match, in any order, with its score.
    /// On success every result holds its score, rank and reward and the
    /// overtime result is set. On failure `game` is left as it was.
    ///
    /// # Errors
    ///
    /// [`ResultError::InvalidResultsProvided`] if `scores` does not name every
    /// result of the match exactly once, [`ResultError::InvalidScores`] if the
    /// scores break the rules of the match type.
    pub fn apply_scores<T: MatchType, P: PartialEq>(
        &self,
        scores: &[(MatchResult<P, T::Reward>, Score)],
        game: &mut Match<T, P>,
        overtime_suffix: Option<&str>,
    ) -> Result<(), ResultError> {
        if scores.len() != game.results().len() {
            debug!(
                "{} scores for a match of {}",
                scores.len(),
                game.results().len()
            );
            return Err(ResultError::InvalidResultsProvided);
        }

        let mut taken = vec![false; scores.len()];
        let mut keyed = Vec::with_capacity(scores.len());

        for (result, score) in scores {
            let index = game
                .results()
                .iter()
                .enumerate()
                .find(|(index, existing)| !taken[*index] && *existing == result)
                .map(|(index, _)| index)
                .ok_or(ResultError::InvalidResultsProvided)?;

            taken[index] = true;
            keyed.push((index, *score));
        }

        let evaluation = game
            .match_type()
            .scoring_configuration()
            .evaluate(keyed, overtime_suffix)
            .map_err(|rejection| {
                debug!("{rejection}");
                ResultError::InvalidScores
            })?;

        let scores: Vec<_> = evaluation
            .placements
            .iter()
            .map(|placement| placement.score)
            .collect();
        let ranks = shared_ranks(&scores);
        let results = game.results_mut();

        for (placement, rank) in evaluation.placements.into_iter().zip(ranks) {
            results[placement.key].set_outcome(Outcome::Scored {
                score: placement.score,
                rank,
                reward: placement.reward,
            });
        }

        game.set_overtime_result(if evaluation.is_overtime {
            OvertimeResult::Overtime {
                suffix: overtime_suffix.map(str::to_string),
            }
        } else {
            OvertimeResult::NoOvertime
        });

        Ok(())
    }

    /// Like [`Self::apply_scores`] with the scores given in the order of the
    /// match's results.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_scores`].
    pub fn apply_scores_in_order<T: MatchType, P: Clone + PartialEq>(
        &self,
        scores: &[Score],
        game: &mut Match<T, P>,
        overtime_suffix: Option<&str>,
    ) -> Result<(), ResultError> {
        if scores.len() != game.results().len() {
            return Err(ResultError::InvalidResultsProvided);
        }

        let scores: Vec<_> = game
            .results()
            .iter()
            .cloned()
            .zip(scores.iter().copied())
            .collect();

        self.apply_scores(&scores, game, overtime_suffix)
    }

    /// Adds or removes deciders so that a decider exists exactly when the
    /// regular matches are over and the leaders are tied.
    ///
    /// Unfinished deciders between anybody but the current leaders are
    /// removed. Finished deciders are never touched.
    pub fn adjust_decider_existence<T: RoundRobinTournament>(
        &self,
        tournament: &mut T,
    ) -> DeciderStatus {
        let ready = tournament
            .matches()
            .filter(|game| !game.is_decider())
            .all(Match::is_finished);

        let leaders: Vec<T::Participation> = if ready {
            let ranking = tournament.ranking_without_deciders();
            let best_rank = ranking.first().map(|standing| standing.rank);

            ranking
                .into_iter()
                .take_while(|standing| Some(standing.rank) == best_rank)
                .map(|standing| standing.participation)
                .collect()
        } else {
            Vec::new()
        };

        let deciders: Vec<_> = tournament
            .matches()
            .filter(|game| game.is_decider())
            .cloned()
            .collect();

        for decider in deciders
            .iter()
            .filter(|decider| !decider.is_finished())
            .filter(|decider| leaders.len() < 2 || !decider.has_participations(&leaders))
        {
            info!("removing the decider {decider}");
            tournament.remove_decider(decider);
        }

        if leaders.len() < 2 {
            return if ready {
                DeciderStatus::NotRequired
            } else {
                DeciderStatus::NotReady
            };
        }

        if deciders.iter().any(|decider| decider.has_participations(&leaders)) {
            DeciderStatus::Kept
        } else {
            info!("adding a decider between {}", join_names(&leaders, ", "));
            tournament.add_decider(leaders);
            DeciderStatus::Created
        }
    }
}
