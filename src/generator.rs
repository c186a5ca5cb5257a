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

//! Round robin schedules using the circle method.

use std::{collections::VecDeque, fmt};

use log::trace;
use rand::{Rng, seq::SliceRandom};

use crate::{
    match_day::{Match, MatchDay},
    match_type::MatchType,
    participation::Participation,
    tournament::RoundRobin,
};

/// Builds the structure of a tournament for a set of participations.
pub trait TournamentGenerator {
    type MatchType: MatchType;

    /// # Panics
    ///
    /// If there are fewer than 2 participations.
    fn generate<P: Participation>(&self, participations: &[P]) -> Schedule<Self::MatchType, P>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchDescription<T, P> {
    pub match_type: T,
    pub participations: Vec<P>,
}

impl<T, P> MatchDescription<T, P> {
    #[must_use]
    pub fn home(&self) -> Option<&P> {
        self.participations.first()
    }

    #[must_use]
    pub fn away(&self) -> Option<&P> {
        self.participations.get(1)
    }
}

impl<T, P: Participation> fmt::Display for MatchDescription<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.participations.iter().map(Participation::name).collect();
        write!(f, "{}", names.join(" - "))
    }
}

/// The matches of a tournament grouped by match day.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule<T, P> {
    pub match_days: Vec<Vec<MatchDescription<T, P>>>,
}

impl<T, P> Schedule<T, P> {
    pub fn matches(&self) -> impl Iterator<Item = &MatchDescription<T, P>> {
        self.match_days.iter().flatten()
    }
}

impl<T: MatchType, P> Schedule<T, P> {
    /// Creates the unscored tournament. Deciders added later get
    /// `decider_type`.
    #[must_use]
    pub fn into_tournament(self, decider_type: T) -> RoundRobin<T, P> {
        let match_days = self
            .match_days
            .into_iter()
            .map(|descriptions| {
                MatchDay::new(
                    descriptions
                        .into_iter()
                        .map(|description| Match::new(description.match_type, description.participations))
                        .collect(),
                )
            })
            .collect();

        RoundRobin::new(match_days, decider_type)
    }
}

impl<T, P: Participation> fmt::Display for Schedule<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, match_day) in self.match_days.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            writeln!(f, "{}", index + 1)?;
            for description in match_day {
                writeln!(f, "   {description}")?;
            }
        }

        Ok(())
    }
}

/// Generates one against one round robin schedules where every participation
/// plays once per match day.
///
/// With an odd number of participations a different one pauses each match
/// day. Home and away are drawn at random per match and are not balanced.
#[derive(Clone, Debug)]
pub struct RoundRobinGenerator<T> {
    match_type: T,
}

impl<T: MatchType> RoundRobinGenerator<T> {
    #[must_use]
    pub fn new(match_type: T) -> Self {
        Self { match_type }
    }

    /// Like [`TournamentGenerator::generate`] but draws from `rng`.
    ///
    /// # Panics
    ///
    /// If there are fewer than 2 participations.
    pub fn generate_with_rng<P: Clone, G: Rng + ?Sized>(
        &self,
        participations: &[P],
        rng: &mut G,
    ) -> Schedule<T, P> {
        let mut match_days = Vec::new();

        for mut round in pairings(participations) {
            round.shuffle(rng);

            let mut match_day = Vec::with_capacity(round.len());
            for (first, second) in round {
                let participations = if rng.random_bool(0.5) {
                    vec![first, second]
                } else {
                    vec![second, first]
                };

                match_day.push(MatchDescription {
                    match_type: self.match_type.clone(),
                    participations,
                });
            }

            match_days.push(match_day);
        }

        Schedule { match_days }
    }
}

impl<T: MatchType> TournamentGenerator for RoundRobinGenerator<T> {
    type MatchType = T;

    fn generate<P: Participation>(&self, participations: &[P]) -> Schedule<T, P> {
        self.generate_with_rng(participations, &mut rand::rng())
    }
}

/// The first participation that appears more than once, if any.
///
/// Pairing such a list would schedule a participation against itself.
#[must_use]
pub fn first_duplicate<P: PartialEq>(participations: &[P]) -> Option<&P> {
    participations
        .iter()
        .enumerate()
        .find(|(index, participation)| participations[..*index].contains(*participation))
        .map(|(_, participation)| participation)
}

/// Pairs every participation with every other one exactly once.
///
/// The circle method: the first participation stays in place while the others
/// rotate around it. An odd number of participations is padded with a bye and
/// whoever meets the bye pauses.
///
/// # Panics
///
/// If there are fewer than 2 participations.
#[must_use]
pub fn pairings<P: Clone>(participations: &[P]) -> Vec<Vec<(P, P)>> {
    assert!(
        participations.len() >= 2,
        "at least 2 participations are required, got {}",
        participations.len()
    );

    let mut slots: Vec<Option<P>> = participations.iter().cloned().map(Some).collect();
    if !slots.len().is_multiple_of(2) {
        slots.insert(0, None);
    }

    let rounds = slots.len() - 1;
    let mut second: VecDeque<Option<P>> = slots.split_off(slots.len() / 2).into();
    let mut first = slots;
    let mut result = Vec::with_capacity(rounds);

    for round in 0..rounds {
        let pairs: Vec<(P, P)> = first
            .iter()
            .zip(&second)
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => None,
            })
            .collect();
        trace!("round {round}: {} pairs", pairs.len());
        result.push(pairs);

        if let Some(next) = second.pop_front() {
            first.insert(1, next);
        }
        if let Some(last) = first.pop() {
            second.push_back(last);
        }
    }

    result
}
