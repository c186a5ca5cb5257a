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

/// Where a round robin tournament stands regarding its decider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeciderStatus {
    /// Regular matches are still being played.
    NotReady,
    /// There is a sole leader.
    NotRequired,
    /// The leaders are tied and a decider was just added.
    Created,
    /// The leaders are tied and their decider already exists.
    Kept,
}
