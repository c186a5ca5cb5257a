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

//! Winning methods, reward tables and the validation of submitted scores.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reward::Reward;

pub type Score = i64;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum WinningMethod {
    HighestScore,
    LowestScore,
    /// The winner has to reach exactly `score`.
    FixedScore { score: Score },
    /// The winner needs a lead of at least `difference`. Past `minimal_score`
    /// the lead has to be exactly `difference`, as in a deuce.
    FlexibleScoreWithDifference {
        minimal_score: Score,
        difference: u64,
    },
}

impl WinningMethod {
    #[must_use]
    pub fn sorts_descending(&self) -> bool {
        !matches!(self, Self::LowestScore)
    }

    /// `sorted` holds the scores best first.
    fn validate(&self, sorted: &[Score]) -> Result<(), Rejection> {
        let valid = match *self {
            Self::HighestScore | Self::LowestScore => true,
            Self::FixedScore { score } => sorted.first() == Some(&score),
            Self::FlexibleScoreWithDifference {
                minimal_score,
                difference,
            } => match sorted {
                [best, second, ..] => {
                    let lead = best.abs_diff(*second);
                    if *best > minimal_score {
                        lead == difference
                    } else {
                        lead >= difference
                    }
                }
                _ => false,
            },
        };

        if valid {
            Ok(())
        } else {
            Err(Rejection::WinningMethod(*self))
        }
    }
}

impl fmt::Display for WinningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighestScore => write!(f, "the highest score wins"),
            Self::LowestScore => write!(f, "the lowest score wins"),
            Self::FixedScore { score } => write!(f, "the first to reach {score} wins"),
            Self::FlexibleScoreWithDifference {
                minimal_score,
                difference,
            } => write!(
                f,
                "the first to reach {minimal_score} with a lead of {difference} wins, \
                 past {minimal_score} the lead has to be exactly {difference}"
            ),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OvertimeTrigger {
    /// The match went to overtime if one of `suffixes` is given with the
    /// scores.
    BySuffix { suffixes: Vec<String> },
    /// The match went to overtime if every score is at least `score`.
    ByAllReachingScore { score: Score },
}

impl OvertimeTrigger {
    fn is_triggered(&self, sorted: &[Score], suffix: Option<&str>) -> bool {
        match self {
            Self::BySuffix { .. } => suffix.is_some(),
            Self::ByAllReachingScore { score } => sorted.iter().all(|s| s >= score),
        }
    }

    fn accepts(&self, suffix: Option<&str>) -> Result<(), Rejection> {
        match (self, suffix) {
            (Self::BySuffix { suffixes }, Some(suffix)) => {
                if suffixes.iter().any(|s| s == suffix) {
                    Ok(())
                } else {
                    Err(Rejection::UnknownSuffix(suffix.to_string()))
                }
            }
            (Self::BySuffix { .. }, None) => Err(Rejection::MissingSuffix),
            (Self::ByAllReachingScore { .. }, _) => Ok(()),
        }
    }
}

impl fmt::Display for OvertimeTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BySuffix { suffixes } => {
                write!(f, "overtime when marked as {}", suffixes.join(" or "))
            }
            Self::ByAllReachingScore { score } => {
                write!(f, "overtime when every score reaches {score}")
            }
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "RawOvertimeConfiguration<R>")]
pub struct OvertimeConfiguration<R> {
    ranked_rewards: Vec<R>,
    trigger: OvertimeTrigger,
}

impl<R> OvertimeConfiguration<R> {
    /// # Errors
    ///
    /// If `trigger` is [`OvertimeTrigger::BySuffix`] without any suffix.
    pub fn new(ranked_rewards: Vec<R>, trigger: OvertimeTrigger) -> Result<Self, ConfigurationError> {
        if let OvertimeTrigger::BySuffix { suffixes } = &trigger
            && suffixes.is_empty()
        {
            return Err(ConfigurationError::NoSuffixes);
        }

        Ok(Self {
            ranked_rewards,
            trigger,
        })
    }

    #[must_use]
    pub fn trigger(&self) -> &OvertimeTrigger {
        &self.trigger
    }

    #[must_use]
    pub fn ranked_rewards(&self) -> &[R] {
        &self.ranked_rewards
    }
}

impl<R: Reward> OvertimeConfiguration<R> {
    #[must_use]
    pub fn reward_for_rank(&self, rank: usize) -> R {
        reward_at(&self.ranked_rewards, rank)
    }
}

#[derive(Deserialize)]
struct RawOvertimeConfiguration<R> {
    ranked_rewards: Vec<R>,
    trigger: OvertimeTrigger,
}

impl<R> TryFrom<RawOvertimeConfiguration<R>> for OvertimeConfiguration<R> {
    type Error = ConfigurationError;

    fn try_from(raw: RawOvertimeConfiguration<R>) -> Result<Self, Self::Error> {
        Self::new(raw.ranked_rewards, raw.trigger)
    }
}

/// How the scores of a match are judged and what each rank earns.
///
/// `ranked_rewards[0]` is the reward for the best rank. Ranks past the end of
/// the table earn [`Reward::zero`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "RawScoringConfiguration<R>")]
pub struct ScoringConfiguration<R> {
    winning_method: WinningMethod,
    ranked_rewards: Vec<R>,
    overtime: Option<OvertimeConfiguration<R>>,
}

impl<R> ScoringConfiguration<R> {
    /// # Errors
    ///
    /// If a [`WinningMethod::FlexibleScoreWithDifference`] asks for a
    /// difference below 2.
    pub fn new(
        winning_method: WinningMethod,
        ranked_rewards: Vec<R>,
        overtime: Option<OvertimeConfiguration<R>>,
    ) -> Result<Self, ConfigurationError> {
        if let WinningMethod::FlexibleScoreWithDifference { difference, .. } = winning_method
            && difference < 2
        {
            return Err(ConfigurationError::DifferenceTooSmall(difference));
        }

        Ok(Self {
            winning_method,
            ranked_rewards,
            overtime,
        })
    }

    #[must_use]
    pub fn winning_method(&self) -> WinningMethod {
        self.winning_method
    }

    #[must_use]
    pub fn ranked_rewards(&self) -> &[R] {
        &self.ranked_rewards
    }

    #[must_use]
    pub fn overtime(&self) -> Option<&OvertimeConfiguration<R>> {
        self.overtime.as_ref()
    }
}

impl<R: Reward> ScoringConfiguration<R> {
    #[must_use]
    pub fn reward_for_rank(&self, rank: usize) -> R {
        reward_at(&self.ranked_rewards, rank)
    }

    /// Judges the scores of one match.
    ///
    /// The keys are handed back in the [`Evaluation`] so the caller can match
    /// rewards to whoever scored them.
    ///
    /// # Errors
    ///
    /// If the scores break a rule of this configuration. See [`Rejection`].
    pub fn evaluate<K>(
        &self,
        mut scores: Vec<(K, Score)>,
        overtime_suffix: Option<&str>,
    ) -> Result<Evaluation<K, R>, Rejection> {
        if scores.is_empty() {
            return Err(Rejection::Empty);
        }

        scores.sort_by(|a, b| b.1.cmp(&a.1));
        if !self.winning_method.sorts_descending() {
            scores.reverse();
        }

        let sorted: Vec<Score> = scores.iter().map(|(_, score)| *score).collect();
        let overtime = self
            .overtime
            .as_ref()
            .filter(|overtime| overtime.trigger.is_triggered(&sorted, overtime_suffix));
        let ranked_rewards = overtime.map_or(&self.ranked_rewards, |overtime| &overtime.ranked_rewards);

        validate_distinct(&sorted, ranked_rewards)?;
        self.winning_method.validate(&sorted)?;

        match (overtime, overtime_suffix) {
            (Some(overtime), suffix) => overtime.trigger.accepts(suffix)?,
            (None, Some(suffix)) => return Err(Rejection::UnexpectedSuffix(suffix.to_string())),
            (None, None) => {}
        }

        trace!("scores {sorted:?} accepted, overtime: {}", overtime.is_some());

        let placements = scores
            .into_iter()
            .enumerate()
            .map(|(position, (key, score))| Placement {
                key,
                score,
                reward: reward_at(ranked_rewards, position),
            })
            .collect();

        Ok(Evaluation {
            placements,
            is_overtime: overtime.is_some(),
        })
    }
}

#[derive(Deserialize)]
struct RawScoringConfiguration<R> {
    winning_method: WinningMethod,
    ranked_rewards: Vec<R>,
    overtime: Option<OvertimeConfiguration<R>>,
}

impl<R> TryFrom<RawScoringConfiguration<R>> for ScoringConfiguration<R> {
    type Error = ConfigurationError;

    fn try_from(raw: RawScoringConfiguration<R>) -> Result<Self, Self::Error> {
        Self::new(raw.winning_method, raw.ranked_rewards, raw.overtime)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement<K, R> {
    pub key: K,
    pub score: Score,
    pub reward: R,
}

/// Accepted scores, best first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Evaluation<K, R> {
    pub placements: Vec<Placement<K, R>>,
    pub is_overtime: bool,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("scoring: the minimal allowed difference is 2, got {0}")]
    DifferenceTooSmall(u64),
    #[error("scoring: an overtime trigger needs at least one suffix")]
    NoSuffixes,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Rejection {
    #[error("scores: nothing was submitted")]
    Empty,
    #[error("scores: a tie at position {position} is rewarded unequally")]
    Tie { position: usize },
    #[error("scores: the scores break the rule '{0}'")]
    WinningMethod(WinningMethod),
    #[error("scores: overtime has to be marked with a suffix")]
    MissingSuffix,
    #[error("scores: '{0}' is not a known overtime suffix")]
    UnknownSuffix(String),
    #[error("scores: '{0}' was given but the match did not go to overtime")]
    UnexpectedSuffix(String),
}

#[must_use]
fn reward_at<R: Reward>(ranked_rewards: &[R], position: usize) -> R {
    ranked_rewards.get(position).cloned().unwrap_or_else(R::zero)
}

/// Equal neighbours are fine only where they earn the same reward, and the
/// winner has to stand alone.
fn validate_distinct<R: Reward>(sorted: &[Score], ranked_rewards: &[R]) -> Result<(), Rejection> {
    for (index, pair) in sorted.windows(2).enumerate() {
        let position = index + 1;

        if pair[0] == pair[1]
            && (position == 1
                || reward_at(ranked_rewards, position - 1) != reward_at(ranked_rewards, position))
        {
            return Err(Rejection::Tie { position });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(winning_method: WinningMethod) -> anyhow::Result<ScoringConfiguration<u32>> {
        Ok(ScoringConfiguration::new(winning_method, vec![3], None)?)
    }

    fn scores(scores: &[Score]) -> Vec<(usize, Score)> {
        scores.iter().copied().enumerate().collect()
    }

    #[test]
    fn overtime_is_optional_in_ron() -> anyhow::Result<()> {
        let scoring: ScoringConfiguration<i64> =
            ron::from_str("(winning_method: LowestScore, ranked_rewards: [2, 1])")?;

        assert_eq!(scoring.winning_method(), WinningMethod::LowestScore);
        assert_eq!(scoring.ranked_rewards(), &[2, 1]);
        assert!(scoring.overtime().is_none());

        let scoring: ScoringConfiguration<u32> = ron::from_str(
            "(winning_method: HighestScore, ranked_rewards: [3], \
             overtime: Some((ranked_rewards: [2, 1], trigger: ByAllReachingScore(score: 1))))",
        )?;
        assert_eq!(
            scoring.overtime().map(OvertimeConfiguration::trigger),
            Some(&OvertimeTrigger::ByAllReachingScore { score: 1 })
        );

        Ok(())
    }

    #[test]
    fn reward_past_the_table_is_zero() -> anyhow::Result<()> {
        let scoring = ScoringConfiguration::new(WinningMethod::HighestScore, vec![3, 1], None)?;

        assert_eq!(scoring.reward_for_rank(0), 3);
        assert_eq!(scoring.reward_for_rank(1), 1);
        assert_eq!(scoring.reward_for_rank(2), 0);
        assert_eq!(scoring.reward_for_rank(100), 0);

        Ok(())
    }

    #[test]
    fn highest_score() -> anyhow::Result<()> {
        let scoring = configuration(WinningMethod::HighestScore)?;

        let evaluation = scoring.evaluate(scores(&[0, 1]), None)?;
        assert!(!evaluation.is_overtime);
        assert_eq!(
            evaluation.placements,
            vec![
                Placement { key: 1, score: 1, reward: 3 },
                Placement { key: 0, score: 0, reward: 0 },
            ]
        );

        assert!(matches!(
            scoring.evaluate(scores(&[3, 3]), None),
            Err(Rejection::Tie { position: 1 })
        ));
        assert_eq!(
            scoring.evaluate(scores(&[3, 0]), Some("A")),
            Err(Rejection::UnexpectedSuffix("A".to_string()))
        );

        Ok(())
    }

    #[test]
    fn lowest_score() -> anyhow::Result<()> {
        let scoring = configuration(WinningMethod::LowestScore)?;

        let evaluation = scoring.evaluate(scores(&[4, 2, 9]), None)?;
        let keys: Vec<_> = evaluation.placements.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![1, 0, 2]);
        assert_eq!(evaluation.placements[0].reward, 3);

        assert!(scoring.evaluate(scores(&[3, 3]), None).is_err());
        assert!(scoring.evaluate(scores(&[3, 0]), Some("A")).is_err());

        Ok(())
    }

    #[test]
    fn fixed_score() -> anyhow::Result<()> {
        let scoring = configuration(WinningMethod::FixedScore { score: 5 })?;

        assert_eq!(
            scoring.evaluate(scores(&[4, 0]), None),
            Err(Rejection::WinningMethod(WinningMethod::FixedScore { score: 5 }))
        );
        assert!(scoring.evaluate(scores(&[5, 3]), None).is_ok());
        assert!(scoring.evaluate(scores(&[3, 5]), None).is_ok());
        assert!(scoring.evaluate(scores(&[5, 5]), Some("A")).is_err());
        assert!(scoring.evaluate(scores(&[7, 5]), Some("A")).is_err());
        assert!(scoring.evaluate(scores(&[7, 5]), None).is_err());

        Ok(())
    }

    #[test]
    fn flexible_score_with_difference() -> anyhow::Result<()> {
        let scoring = configuration(WinningMethod::FlexibleScoreWithDifference {
            minimal_score: 5,
            difference: 2,
        })?;

        assert!(scoring.evaluate(scores(&[5, 4]), None).is_err());
        assert!(scoring.evaluate(scores(&[7, 6]), None).is_err());
        assert!(scoring.evaluate(scores(&[7, 4]), None).is_err());
        assert!(scoring.evaluate(scores(&[5, 5]), Some("A")).is_err());
        assert!(scoring.evaluate(scores(&[5, 3]), None).is_ok());
        assert!(scoring.evaluate(scores(&[8, 6]), None).is_ok());
        assert!(scoring.evaluate(scores(&[6, 8]), None).is_ok());

        Ok(())
    }

    #[test]
    fn flexible_score_needs_a_difference_of_two() {
        let method = WinningMethod::FlexibleScoreWithDifference {
            minimal_score: 11,
            difference: 1,
        };

        assert_eq!(
            ScoringConfiguration::<u32>::new(method, vec![1], None),
            Err(ConfigurationError::DifferenceTooSmall(1))
        );
    }

    #[test]
    fn suffix_trigger_needs_suffixes() {
        assert_eq!(
            OvertimeConfiguration::<u32>::new(
                vec![2, 1],
                OvertimeTrigger::BySuffix { suffixes: Vec::new() }
            ),
            Err(ConfigurationError::NoSuffixes)
        );
    }

    #[test]
    fn overtime_by_suffix() -> anyhow::Result<()> {
        let overtime = OvertimeConfiguration::new(
            vec![2, 1],
            OvertimeTrigger::BySuffix {
                suffixes: vec!["OT".to_string(), "SO".to_string()],
            },
        )?;
        let scoring = ScoringConfiguration::new(WinningMethod::HighestScore, vec![3], Some(overtime))?;

        let regular = scoring.evaluate(scores(&[2, 1]), None)?;
        assert!(!regular.is_overtime);
        assert_eq!(regular.placements[1].reward, 0);

        let overtime = scoring.evaluate(scores(&[0, 1]), Some("OT"))?;
        assert!(overtime.is_overtime);
        assert_eq!(overtime.placements[0].reward, 2);
        assert_eq!(overtime.placements[1].reward, 1);

        assert_eq!(
            scoring.evaluate(scores(&[0, 1]), Some("2OT")),
            Err(Rejection::UnknownSuffix("2OT".to_string()))
        );

        Ok(())
    }

    #[test]
    fn overtime_by_all_reaching_score() -> anyhow::Result<()> {
        let overtime = OvertimeConfiguration::new(
            vec![2, 1],
            OvertimeTrigger::ByAllReachingScore { score: 1 },
        )?;
        let scoring = ScoringConfiguration::new(
            WinningMethod::FixedScore { score: 2 },
            vec![3],
            Some(overtime),
        )?;

        let evaluation = scoring.evaluate(scores(&[1, 2]), None)?;
        assert!(evaluation.is_overtime);
        assert_eq!(evaluation.placements[0].reward, 2);

        let evaluation = scoring.evaluate(scores(&[1, 2]), Some("anything"))?;
        assert!(evaluation.is_overtime);

        let evaluation = scoring.evaluate(scores(&[0, 2]), None)?;
        assert!(!evaluation.is_overtime);
        assert_eq!(evaluation.placements[0].reward, 3);

        assert!(scoring.evaluate(scores(&[0, 2]), Some("OT")).is_err());

        Ok(())
    }

    #[test]
    fn ties_only_where_rewarded_equally() -> anyhow::Result<()> {
        let scoring = ScoringConfiguration::new(WinningMethod::HighestScore, vec![5u32, 3, 1], None)?;

        assert!(scoring.evaluate(scores(&[9, 4]), None).is_ok());
        assert_eq!(
            scoring.evaluate(scores(&[9, 4, 4]), None),
            Err(Rejection::Tie { position: 2 })
        );
        assert!(scoring.evaluate(scores(&[9, 4, 2, 1, 1]), None).is_ok());
        assert_eq!(
            scoring.evaluate(scores(&[9, 4, 2, 2, 1]), None),
            Err(Rejection::Tie { position: 3 })
        );

        let flat = ScoringConfiguration::new(WinningMethod::HighestScore, vec![1u32, 1, 1], None)?;
        assert!(flat.evaluate(scores(&[9, 4, 4]), None).is_ok());
        assert!(flat.evaluate(scores(&[4, 4, 1]), None).is_err());

        Ok(())
    }

    #[test]
    fn empty_scores() -> anyhow::Result<()> {
        let scoring = configuration(WinningMethod::HighestScore)?;

        assert_eq!(
            scoring.evaluate(Vec::<(usize, Score)>::new(), None),
            Err(Rejection::Empty)
        );

        Ok(())
    }

    #[test]
    fn display() {
        assert_eq!(
            WinningMethod::FixedScore { score: 5 }.to_string(),
            "the first to reach 5 wins"
        );
        assert_eq!(
            OvertimeTrigger::BySuffix {
                suffixes: vec!["OT".to_string(), "SO".to_string()]
            }
            .to_string(),
            "overtime when marked as OT or SO"
        );
    }
}
