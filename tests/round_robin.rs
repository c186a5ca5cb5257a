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

use std::sync::Arc;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;

use tournament_kit::{
    Named, RoundRobinGenerator, TournamentManager, Tournament,
    generator::pairings,
    match_type::NamedMatchType,
    scoring::{ScoringConfiguration, WinningMethod},
};

fn match_type(winning_method: WinningMethod) -> NamedMatchType<u32> {
    NamedMatchType {
        name: "property".to_string(),
        scoring: Arc::new(
            ScoringConfiguration::new(winning_method, vec![5, 3, 1], None)
                .expect("the configuration is valid"),
        ),
        decider: false,
    }
}

proptest! {
    #[test]
    fn every_pair_meets_once(count in 2usize..40) {
        let participations: Vec<usize> = (0..count).collect();
        let rounds = pairings(&participations);

        let expected_rounds = if count.is_multiple_of(2) { count - 1 } else { count };
        prop_assert_eq!(rounds.len(), expected_rounds);

        let mut pairs = FxHashSet::default();
        let mut paused: Vec<&usize> = Vec::new();

        for round in &rounds {
            prop_assert_eq!(round.len(), count / 2);

            let mut playing = FxHashSet::default();
            for &(a, b) in round {
                prop_assert_ne!(a, b);
                prop_assert!(playing.insert(a), "{} plays twice in a round", a);
                prop_assert!(playing.insert(b), "{} plays twice in a round", b);
                prop_assert!(pairs.insert((a.min(b), a.max(b))), "{} and {} meet twice", a, b);
            }

            paused.extend(participations.iter().filter(|p| !playing.contains(*p)));
        }

        prop_assert_eq!(pairs.len(), count * (count - 1) / 2);

        if count.is_multiple_of(2) {
            prop_assert!(paused.is_empty());
        } else {
            paused.sort_unstable();
            prop_assert_eq!(paused, participations.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn generated_schedules_hold_every_pairing(count in 2usize..24, seed in any::<u64>()) {
        let participations: Vec<Named> = (0..count).map(|i| Named(format!("P{i}"))).collect();
        let generator = RoundRobinGenerator::new(match_type(WinningMethod::HighestScore));
        let schedule = generator.generate_with_rng(&participations, &mut StdRng::seed_from_u64(seed));

        let mut pairs = FxHashSet::default();
        for description in schedule.matches() {
            prop_assert_eq!(description.participations.len(), 2);
            let mut pair = [
                description.participations[0].0.clone(),
                description.participations[1].0.clone(),
            ];
            pair.sort();
            prop_assert!(pairs.insert(pair));
        }
        prop_assert_eq!(pairs.len(), count * (count - 1) / 2);

        let tournament = schedule.into_tournament(NamedMatchType {
            decider: true,
            ..match_type(WinningMethod::HighestScore)
        });
        prop_assert_eq!(tournament.participations().len(), count);
        prop_assert!(!tournament.is_finished());
    }

    #[test]
    fn distinct_scores_always_rank(scores in prop::collection::hash_set(-50i64..50, 2..6), lowest in any::<bool>()) {
        let scores: Vec<i64> = scores.into_iter().collect();
        let winning_method = if lowest { WinningMethod::LowestScore } else { WinningMethod::HighestScore };
        let participations: Vec<Named> = (0..scores.len()).map(|i| Named(format!("P{i}"))).collect();

        let mut game = tournament_kit::Match::new(match_type(winning_method), participations);
        TournamentManager::new()
            .apply_scores_in_order(&scores, &mut game, None)
            .expect("distinct scores are valid");

        let best = if lowest { scores.iter().min() } else { scores.iter().max() };
        for result in game.results() {
            let rank = result.rank().expect("the match is scored");
            let reward = result.reward().copied().expect("the match is scored");
            prop_assert_eq!(rank == 0, result.score().as_ref() == best);
            prop_assert_eq!(reward, [5, 3, 1].get(rank).copied().unwrap_or(0));
        }
    }
}
