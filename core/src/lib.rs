//! Engine for a minesweeper duel: the human plays a round until they hit a
//! mine, then a scripted AI plays a freshly mined grid of the same size and
//! the two scores are compared.
//!
//! [`MatchDirector`] is the entry point for front ends. The lower layers
//! ([`Grid`], [`reveal`], [`RoundController`], [`AiPlayer`]) can be used on
//! their own, every random choice takes an explicit generator.
#![no_std]

extern crate alloc;

pub use ai::*;
pub use config::*;
pub use director::*;
pub use error::*;
pub use grid::*;
pub use reveal::*;
pub use round::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod ai;
mod config;
mod director;
mod error;
mod grid;
mod reveal;
mod round;
mod snapshot;
mod tile;
mod types;
