/*
  GHQ, a rules engine for the GHQ strategy game.
  Copyright (C) 2022 Clayton Ramsey.

  GHQ is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  GHQ is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! GHQ is a rules engine for a two-player, turn-based strategy game played on
//! an 8x8 grid. Two sides, red and blue, alternate turns of up to three
//! actions plus any mandatory automatic captures.
//!
//! This crate owns the authoritative game state ([`core::board::Board`]),
//! enumerates legal actions ([`core::movegen`]), applies them
//! ([`core::apply`]), and reports terminal outcomes ([`core::outcome`]).
//! Text notation, binary snapshots, rendering, and sample agents are thin
//! collaborators built on top of the core and live in their own modules.

pub mod core;

pub mod agents;
pub mod notation;
pub mod render;
pub mod snapshot;

mod error;

pub use error::GhqError;
