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

use std::{fmt, ops::Add};

/// The value a participation earns for its rank in a match.
///
/// Rewards are compared to rank participations and summed up over a
/// tournament, `zero` being the value for ranks without a configured reward.
pub trait Reward: Add<Output = Self> + Clone + fmt::Debug + Ord {
    #[must_use]
    fn zero() -> Self;
}

macro_rules! impl_reward {
    ($($t:ty),*) => {
        $(
            impl Reward for $t {
                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

impl_reward!(u8, u16, u32, u64, usize, i8, i16, i32, i64);
