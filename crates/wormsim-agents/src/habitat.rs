//! The capability interface through which a worm reaches shared state.
//!
//! A worm mutates its own fields directly but never touches the board or
//! another worm. During [`Worm::live`] it is handed a `&mut dyn Habitat`
//! and every cross-worm effect (eating a carrot, slicing or devouring a
//! neighbour, updating the live counters) happens through these methods.
//!
//! [`Worm::live`]: crate::Worm::live

use wormsim_types::{BoardSize, Position};

use crate::kind::KindRegistry;
use crate::worm::Worm;

/// Shared state a living worm interacts with during one step.
pub trait Habitat {
    /// Dimensions of the board, used for wraparound.
    fn size(&self) -> BoardSize;

    /// A pseudo-random integer in `0..bound`. `bound` must be non-zero.
    fn random_below(&mut self, bound: usize) -> usize;

    /// The live counters of every worm kind.
    fn kinds_mut(&mut self) -> &mut KindRegistry;

    /// Remove the carrot at `at`, if any.
    ///
    /// Returns `true` only when a carrot was actually removed.
    fn try_to_eat_carrot_at(&mut self, at: Position) -> bool;

    /// Slice whichever other worm lies under `worm`'s head.
    ///
    /// Declines silently when no victim is found or the slice would be
    /// invalid.
    fn slice_victim_for(&mut self, worm: &Worm);

    /// Devour whichever other living worm lies under `worm`'s head.
    ///
    /// Returns the food value gained, or 0 when nothing was eaten.
    fn eat_victim_for(&mut self, worm: &Worm) -> i32;
}
