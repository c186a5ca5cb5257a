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

//! Tournaments, their rankings and deciders.

use log::trace;
use rustc_hash::FxHashSet;

use crate::{
    match_day::{Match, MatchDay},
    match_type::MatchType,
    participation::Participation,
    result::MatchResult,
    reward::Reward,
};

pub type RewardOf<T> = <<T as Tournament>::MatchType as MatchType>::Reward;
pub type StandingOf<T> = Standing<<T as Tournament>::Participation, RewardOf<T>>;

/// A participation's place in a tournament. Rank 0 is the best.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Standing<P, R> {
    pub participation: P,
    pub rank: usize,
    pub reward: R,
}

/// Some tournament made of match days.
///
/// How match results decide the outcome is up to the kind of tournament.
pub trait Tournament {
    type MatchType: MatchType;
    type Participation: Participation;

    fn match_days(&self) -> &[MatchDay<Self::MatchType, Self::Participation>];

    /// Every participation of the tournament once, in order of first
    /// appearance.
    #[must_use]
    fn participations(&self) -> Vec<Self::Participation> {
        let mut participations: Vec<Self::Participation> = Vec::new();

        for participation in self.matches().flat_map(Match::participations) {
            if !participations.contains(participation) {
                participations.push(participation.clone());
            }
        }

        participations
    }

    /// All matches, match day by match day.
    fn matches(&self) -> impl Iterator<Item = &Match<Self::MatchType, Self::Participation>> {
        self.match_days().iter().flat_map(MatchDay::matches)
    }

    #[must_use]
    fn is_finished(&self) -> bool {
        self.match_days().iter().all(MatchDay::is_finished)
    }
}

/// A tournament won by the highest accumulated reward.
///
/// If the leaders end up tied, a decider between them settles the ranking.
/// Deciders are added and removed by
/// [`crate::manager::TournamentManager::adjust_decider_existence`] only.
pub trait RoundRobinTournament: Tournament {
    fn add_decider(&mut self, participations: Vec<Self::Participation>);

    fn remove_decider(&mut self, decider: &Match<Self::MatchType, Self::Participation>);

    #[must_use]
    fn accumulated_reward(&self, participation: &Self::Participation) -> RewardOf<Self> {
        accumulate(self.matches(), participation)
    }

    /// The standings sorted by rank.
    ///
    /// A finished decider ranks its participations above everybody else in
    /// the order it was decided. All other participations are ranked by their
    /// accumulated reward, sharing a rank on equal rewards.
    #[must_use]
    fn ranking(&self) -> Vec<StandingOf<Self>> {
        let rewards: Vec<_> = sorted_by_name(self.participations())
            .into_iter()
            .map(|participation| {
                let reward = self.accumulated_reward(&participation);
                (participation, reward)
            })
            .collect();

        let Some(decider) = self
            .matches()
            .find(|game| game.is_decider() && game.is_finished())
        else {
            let ranking = rank_by_reward(rewards, 0);
            trace!("ranking: {ranking:?}");
            return ranking;
        };

        let (deciding, others): (Vec<_>, Vec<_>) = rewards
            .into_iter()
            .partition(|(participation, _)| decider.participations().any(|p| p == participation));

        let mut ranking: Vec<_> = deciding
            .into_iter()
            .map(|(participation, reward)| {
                let rank = decider
                    .results()
                    .iter()
                    .find(|result| result.participation() == &participation)
                    .and_then(MatchResult::rank)
                    .unwrap_or_default();

                Standing {
                    participation,
                    rank,
                    reward,
                }
            })
            .collect();
        ranking.sort_by_key(|standing| standing.rank);

        let offset = ranking
            .iter()
            .map(|standing| standing.rank)
            .collect::<FxHashSet<_>>()
            .len();
        ranking.extend(rank_by_reward(others, offset));

        trace!("ranking with decider: {ranking:?}");
        ranking
    }

    /// The standings by accumulated reward as if there were no deciders.
    #[must_use]
    fn ranking_without_deciders(&self) -> Vec<StandingOf<Self>> {
        let rewards = sorted_by_name(self.participations())
            .into_iter()
            .map(|participation| {
                let reward = accumulate(
                    self.matches().filter(|game| !game.is_decider()),
                    &participation,
                );
                (participation, reward)
            })
            .collect();

        rank_by_reward(rewards, 0)
    }

    /// The sole best participation of a finished tournament.
    #[must_use]
    fn winner(&self) -> Option<Self::Participation> {
        if !self.is_finished() {
            return None;
        }

        let ranking = self.ranking();
        match ranking.as_slice() {
            [first, second, ..] if second.rank == first.rank => None,
            [first, ..] => Some(first.participation.clone()),
            [] => None,
        }
    }
}

/// A round robin tournament holding its match days in memory.
///
/// New deciders get `decider_type` and are held on a match day of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundRobin<T: MatchType, P> {
    match_days: Vec<MatchDay<T, P>>,
    decider_type: T,
}

impl<T: MatchType, P> RoundRobin<T, P> {
    #[must_use]
    pub fn new(match_days: Vec<MatchDay<T, P>>, decider_type: T) -> Self {
        debug_assert!(decider_type.is_decider(), "the decider type has to be a decider");

        Self {
            match_days,
            decider_type,
        }
    }

    #[must_use]
    pub fn decider_type(&self) -> &T {
        &self.decider_type
    }

    pub fn match_days_mut(&mut self) -> &mut [MatchDay<T, P>] {
        &mut self.match_days
    }

    pub fn match_mut(&mut self, match_day: usize, index: usize) -> Option<&mut Match<T, P>> {
        self.match_days
            .get_mut(match_day)
            .and_then(|match_day| match_day.matches_mut().get_mut(index))
    }
}

impl<T: MatchType, P: Participation> Tournament for RoundRobin<T, P> {
    type MatchType = T;
    type Participation = P;

    fn match_days(&self) -> &[MatchDay<T, P>] {
        &self.match_days
    }
}

impl<T: MatchType, P: Participation> RoundRobinTournament for RoundRobin<T, P> {
    fn add_decider(&mut self, participations: Vec<P>) {
        let decider = Match::new(self.decider_type.clone(), participations);
        self.match_days.push(MatchDay::new(vec![decider]));
    }

    fn remove_decider(&mut self, decider: &Match<T, P>) {
        let Some((day, index)) = self
            .match_days
            .iter()
            .enumerate()
            .find_map(|(day, match_day)| {
                match_day
                    .matches()
                    .iter()
                    .position(|game| game == decider)
                    .map(|index| (day, index))
            })
        else {
            return;
        };

        self.match_days[day].remove(index);
        if self.match_days[day].is_empty() {
            self.match_days.remove(day);
        }
    }
}

/// Ranks by reward, best first.
///
/// Equal rewards keep the order they are given in and share the rank of the
/// first of them. Ranks count positions, so they skip after a shared rank.
#[must_use]
pub fn rank_by_reward<P, R: Reward>(mut rewards: Vec<(P, R)>, offset: usize) -> Vec<Standing<P, R>> {
    rewards.sort_by(|a, b| b.1.cmp(&a.1));

    let sorted: Vec<_> = rewards.iter().map(|(_, reward)| reward).collect();
    let ranks = shared_ranks(&sorted);

    rewards
        .into_iter()
        .zip(ranks)
        .map(|((participation, reward), rank)| Standing {
            participation,
            rank: rank + offset,
            reward,
        })
        .collect()
}

/// The rank of every position of a sorted list: its index, or the rank of the
/// previous position if both are equal.
#[must_use]
pub(crate) fn shared_ranks<T: PartialEq>(sorted: &[T]) -> Vec<usize> {
    let mut ranks: Vec<usize> = Vec::with_capacity(sorted.len());

    for (index, value) in sorted.iter().enumerate() {
        let rank = match ranks.last() {
            Some(previous) if sorted[index - 1] == *value => *previous,
            _ => index,
        };
        ranks.push(rank);
    }

    ranks
}

fn sorted_by_name<P: Participation>(mut participations: Vec<P>) -> Vec<P> {
    participations.sort_by_cached_key(Participation::name);
    participations
}

fn accumulate<'a, T, P>(matches: impl Iterator<Item = &'a Match<T, P>>, participation: &P) -> T::Reward
where
    T: MatchType + 'a,
    P: PartialEq + 'a,
{
    matches
        .flat_map(Match::results)
        .filter(|result| result.participation() == participation)
        .filter_map(MatchResult::reward)
        .cloned()
        .fold(T::Reward::zero(), |total, reward| total + reward)
}
