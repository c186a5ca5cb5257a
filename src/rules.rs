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

//! Match types read from a RON file.
//!
//! ```ron
//! (
//!     match_types: {
//!         "regular": (
//!             scoring: (
//!                 winning_method: HighestScore,
//!                 ranked_rewards: [3],
//!                 overtime: Some((
//!                     ranked_rewards: [2, 1],
//!                     trigger: BySuffix(suffixes: ["OT", "SO"]),
//!                 )),
//!             ),
//!         ),
//!         "shootout": (
//!             scoring: (winning_method: HighestScore, ranked_rewards: [1]),
//!             decider: true,
//!         ),
//!     },
//! )
//! ```

use std::{collections::BTreeMap, fs, path::Path, sync::Arc};

use serde::Deserialize;
use thiserror::Error;

use crate::{match_type::NamedMatchType, scoring::ScoringConfiguration};

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("rules: {0}")]
    Io(#[from] std::io::Error),
    #[error("rules: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("rules: there is no match type named {0}")]
    UnknownMatchType(String),
    #[error("rules: there is no decider match type")]
    NoDecider,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
struct Entry<R> {
    scoring: ScoringConfiguration<R>,
    #[serde(default)]
    decider: bool,
}

/// Named match types and how each is scored.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct RuleSet<R> {
    match_types: BTreeMap<String, Entry<R>>,
}

impl<R: for<'de> Deserialize<'de>> RuleSet<R> {
    /// # Errors
    ///
    /// If `string` is not valid RON or a scoring configuration is invalid.
    pub fn from_ron_str(string: &str) -> Result<Self, RuleSetError> {
        Ok(ron::from_str(string)?)
    }

    /// # Errors
    ///
    /// If the file can't be read, see also [`Self::from_ron_str`].
    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        let string = fs::read_to_string(path)?;
        Self::from_ron_str(&string)
    }
}

impl<R: Clone> RuleSet<R> {
    /// # Errors
    ///
    /// If no match type is called `name`.
    pub fn match_type(&self, name: &str) -> Result<NamedMatchType<R>, RuleSetError> {
        let entry = self
            .match_types
            .get(name)
            .ok_or_else(|| RuleSetError::UnknownMatchType(name.to_string()))?;

        Ok(NamedMatchType {
            name: name.to_string(),
            scoring: Arc::new(entry.scoring.clone()),
            decider: entry.decider,
        })
    }

    /// The first decider match type by name.
    ///
    /// # Errors
    ///
    /// If no match type is a decider.
    pub fn decider(&self) -> Result<NamedMatchType<R>, RuleSetError> {
        let name = self
            .match_types
            .iter()
            .find(|(_, entry)| entry.decider)
            .map(|(name, _)| name.as_str())
            .ok_or(RuleSetError::NoDecider)?;

        self.match_type(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.match_types.keys().map(String::as_str)
    }
}
