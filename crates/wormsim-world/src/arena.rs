//! The arena: the board grids, worm slots, and worm-to-worm interaction.
//!
//! Two grids describe the board. The passive grid holds carrots and the
//! remains of dead or eaten worms, and never records a living worm. The
//! screen grid is rebuilt after every step by copying the passive grid and
//! painting the living worms on top, so it is always derivable from the
//! passive grid plus the worm bodies.
//!
//! Worm slots are recycled: a new worm takes the first slot whose worm is
//! no longer alive, and only appends when none is free.
//!
//! During a step each living worm is handed a [`Neighborhood`], a
//! [`Habitat`] built from disjoint borrows of the arena: the passive grid,
//! the slots before and after the acting worm, the live counters, and the
//! random number generator. That lets a worm slice or devour its neighbours
//! in place without the arena handing out aliased references.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};
use wormsim_agents::{Habitat, KindRegistry, Worm, WormKind};
use wormsim_types::{Attr, BoardSize, Cell, Position, SENTINEL_GLYPH};

use crate::grid::Grid;
use crate::population::{Population, PopulationStats};
use crate::sayings::SAYINGS;

/// Owner of all shared simulation state.
#[derive(Debug, Clone)]
pub struct Arena {
    size: BoardSize,
    passive: Grid,
    screen: Grid,
    worms: Vec<Worm>,
    high_water_mark: usize,
    kinds: KindRegistry,
    rng: SmallRng,
    highlighted: Option<usize>,
}

impl Arena {
    /// Create an empty arena covered in carrots.
    ///
    /// `size` is clamped to the supported board dimensions. With a `seed`
    /// every run is reproducible; without one the generator is seeded from
    /// the operating system.
    pub fn new(size: BoardSize, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
        Self::with_rng(size, rng)
    }

    /// Create an empty arena driven by an existing generator.
    pub fn with_rng(size: BoardSize, rng: SmallRng) -> Self {
        let size = BoardSize::clamped(size.width, size.height);
        Self {
            size,
            passive: Grid::filled(size, Cell::CARROT),
            screen: Grid::filled(size, Cell::CARROT),
            worms: Vec::new(),
            high_water_mark: 0,
            kinds: KindRegistry::new(),
            rng,
            highlighted: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Board dimensions.
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Carrots and remains.
    pub const fn passive(&self) -> &Grid {
        &self.passive
    }

    /// What a display should draw.
    pub const fn screen(&self) -> &Grid {
        &self.screen
    }

    /// Every worm slot, alive or not, in storage order.
    pub fn worms(&self) -> &[Worm] {
        &self.worms
    }

    /// The worm in `slot`, if the slot exists.
    pub fn worm(&self, slot: usize) -> Option<&Worm> {
        self.worms.get(slot)
    }

    /// Live counters per kind.
    pub const fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    /// Most worm slots in use at once since the last restart.
    ///
    /// The mark is kept per run: [`Arena::restart`] sets it back to zero
    /// rather than carrying it across the whole session.
    pub const fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// Slot of the worm picked out by the operator, if any.
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Snapshot of the live counts and high-water mark.
    pub fn stats(&self) -> PopulationStats {
        PopulationStats::capture(&self.kinds, self.high_water_mark)
    }

    /// A pseudo-random integer in `0..bound`, or 0 when `bound` is 0.
    pub fn random_below(&mut self, bound: usize) -> usize {
        random_below(&mut self.rng, bound)
    }

    // -----------------------------------------------------------------------
    // Population
    // -----------------------------------------------------------------------

    /// Start a fresh run: carrots everywhere, no worms, counters and
    /// high-water mark cleared, then a random initial population.
    ///
    /// Returns the number of worms created.
    pub fn restart(&mut self, population: Population) -> usize {
        self.passive.fill(Cell::CARROT);
        self.worms.clear();
        self.kinds.reset();
        self.high_water_mark = 0;
        self.highlighted = None;

        let extra = self.random_below(population.worm_variation);
        let count = population.min_worms.saturating_add(extra);
        for _ in 0..count {
            self.create_worm();
        }
        self.refresh_screen();

        info!(
            worms = count,
            width = self.size.width,
            height = self.size.height,
            "arena restarted"
        );
        count
    }

    /// Add a worm of random kind carrying a random saying at a random
    /// position. Returns its slot.
    pub fn create_worm(&mut self) -> usize {
        let kind = WormKind::random(&mut self.rng);
        let pick = self.random_below(SAYINGS.len());
        let saying = SAYINGS.get(pick).copied().unwrap_or("<>");
        let at = Position::new(
            self.rng.random_range(0..self.size.width),
            self.rng.random_range(0..self.size.height),
        );

        // The last character becomes the tail sentinel; pad so the whole
        // saying stays visible.
        let mut text = String::with_capacity(saying.len().saturating_add(1));
        text.push_str(saying);
        text.push(SENTINEL_GLYPH);
        self.spawn_worm(kind, &text, at)
    }

    /// Add a worm of `kind` carrying `saying`, stacked on `at`. Returns its
    /// slot.
    ///
    /// # Panics
    ///
    /// Panics if `saying` has fewer than two characters or `at` is off the
    /// board.
    pub fn spawn_worm(&mut self, kind: WormKind, saying: &str, at: Position) -> usize {
        let worm = Worm::new(kind, saying, at, self.size, &mut self.kinds);
        let slot = self.store(worm);
        debug!(%kind, %at, slot, "worm created");
        slot
    }

    /// Add a worm produced by `build`, which receives the board size and
    /// the live counters so the worm is counted by this arena. Returns its
    /// slot.
    pub fn insert_worm<F>(&mut self, build: F) -> usize
    where
        F: FnOnce(BoardSize, &mut KindRegistry) -> Worm,
    {
        let worm = build(self.size, &mut self.kinds);
        let kind = worm.kind();
        let slot = self.store(worm);
        debug!(%kind, slot, "worm inserted");
        slot
    }

    fn store(&mut self, worm: Worm) -> usize {
        let free = self.worms.iter().position(|w| !w.is_alive());
        let slot = match free.and_then(|slot| self.worms.get_mut(slot).map(|w| (slot, w))) {
            Some((slot, existing)) => {
                *existing = worm;
                if self.highlighted == Some(slot) {
                    self.highlighted = None;
                }
                slot
            }
            None => {
                self.worms.push(worm);
                self.worms.len().saturating_sub(1)
            }
        };
        self.high_water_mark = self.high_water_mark.max(self.worms.len());
        slot
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    /// The first other living worm, in storage order, with a non-sentinel
    /// segment under `actor`'s head.
    ///
    /// Returns the victim's slot and the index of the matching segment.
    pub fn victim_of(&self, actor: usize) -> Option<(usize, usize)> {
        let head = self.worms.get(actor)?.head().position;
        self.worms
            .iter()
            .enumerate()
            .filter(|(slot, worm)| *slot != actor && worm.is_alive())
            .find_map(|(slot, worm)| worm.segment_index_at(head).map(|index| (slot, index)))
    }

    /// Let the worm in `actor` slice its victim, if the slice is allowed.
    pub fn slice_victim_for(&mut self, actor: usize) {
        self.with_neighborhood(actor, |worm, hood| hood.slice_victim_for(worm));
        self.drop_stale_highlight();
    }

    /// Let the worm in `actor` devour its victim.
    ///
    /// Returns the food the victim was worth, or 0 when nothing was eaten.
    /// The actor's stomach is left for the caller to update.
    pub fn eat_victim_for(&mut self, actor: usize) -> i32 {
        let gained = self
            .with_neighborhood(actor, |worm, hood| hood.eat_victim_for(worm))
            .unwrap_or(0);
        self.drop_stale_highlight();
        gained
    }

    /// Remove the carrot at `at`. Returns `false`, leaving the grid
    /// untouched, when there is no carrot there.
    pub fn try_to_eat_carrot_at(&mut self, at: Position) -> bool {
        take_carrot(&mut self.passive, at)
    }

    // -----------------------------------------------------------------------
    // Stepping and drawing
    // -----------------------------------------------------------------------

    /// Advance every living worm once, in storage order, then rebuild the
    /// screen.
    ///
    /// Later worms see the moves earlier worms already made this step.
    pub fn step(&mut self) {
        for slot in 0..self.worms.len() {
            self.with_neighborhood(slot, |worm, hood| worm.live(hood));
            self.drop_stale_highlight();
        }
        self.refresh_screen();
        trace!(
            alive = self.kinds.total(),
            slots = self.worms.len(),
            "arena stepped"
        );
    }

    /// Bake non-living bodies into the passive grid as remains, then
    /// rebuild the screen from the passive grid and the living worms.
    pub fn refresh_screen(&mut self) {
        for worm in self.worms.iter().filter(|w| !w.is_alive()) {
            paint(&mut self.passive, worm, Attr::Remains);
        }
        self.screen.copy_from(&self.passive);
        for (slot, worm) in self.worms.iter().enumerate() {
            if !worm.is_alive() {
                continue;
            }
            let attr = if self.highlighted == Some(slot) {
                Attr::Highlight
            } else {
                worm.kind().attr()
            };
            paint(&mut self.screen, worm, attr);
        }
    }

    // -----------------------------------------------------------------------
    // Operator actions
    // -----------------------------------------------------------------------

    /// Move the highlight to the next living worm after the current one,
    /// wrapping around. Returns the new slot, or `None` if nothing is
    /// alive.
    pub fn highlight_next(&mut self) -> Option<usize> {
        let start = self.highlighted.map_or(0, |slot| slot.saturating_add(1));
        let next = self
            .worms
            .iter()
            .enumerate()
            .skip(start)
            .chain(self.worms.iter().enumerate().take(start))
            .find(|(_, worm)| worm.is_alive())
            .map(|(slot, _)| slot);
        self.highlighted = next;
        self.refresh_screen();
        next
    }

    /// Kill the worm in `slot`. Returns `false` if it was not alive.
    pub fn kill(&mut self, slot: usize) -> bool {
        let killed = self
            .worms
            .get_mut(slot)
            .is_some_and(|worm| worm.kill(&mut self.kinds));
        if killed {
            debug!(slot, "worm killed by operator");
        }
        self.drop_stale_highlight();
        killed
    }

    /// Kill the highlighted worm and clear the highlight.
    pub fn kill_highlighted(&mut self) -> bool {
        let killed = self.highlighted.take().is_some_and(|slot| self.kill(slot));
        self.refresh_screen();
        killed
    }

    /// Forget the highlight once its worm is no longer alive, so a worm
    /// later placed in that slot is never picked out by accident.
    fn drop_stale_highlight(&mut self) {
        let stale = self
            .highlighted
            .is_some_and(|slot| !self.worms.get(slot).is_some_and(Worm::is_alive));
        if stale {
            self.highlighted = None;
        }
    }

    fn with_neighborhood<T>(
        &mut self,
        actor: usize,
        act: impl FnOnce(&mut Worm, &mut Neighborhood<'_>) -> T,
    ) -> Option<T> {
        let (before, rest) = self.worms.split_at_mut_checked(actor)?;
        let (worm, after) = rest.split_first_mut()?;
        let mut hood = Neighborhood {
            size: self.size,
            passive: &mut self.passive,
            before,
            after,
            kinds: &mut self.kinds,
            rng: &mut self.rng,
        };
        Some(act(worm, &mut hood))
    }
}

// ---------------------------------------------------------------------------
// Neighborhood
// ---------------------------------------------------------------------------

/// The arena as seen by one acting worm.
///
/// "Others" are the slots before the actor followed by the slots after it,
/// which keeps storage order while leaving the actor itself out.
struct Neighborhood<'a> {
    size: BoardSize,
    passive: &'a mut Grid,
    before: &'a mut [Worm],
    after: &'a mut [Worm],
    kinds: &'a mut KindRegistry,
    rng: &'a mut SmallRng,
}

impl Neighborhood<'_> {
    fn others(&self) -> impl Iterator<Item = &Worm> {
        self.before.iter().chain(self.after.iter())
    }

    fn victim_at(&self, at: Position) -> Option<(usize, usize)> {
        self.others()
            .enumerate()
            .filter(|(_, worm)| worm.is_alive())
            .find_map(|(i, worm)| worm.segment_index_at(at).map(|index| (i, index)))
    }
}

impl Habitat for Neighborhood<'_> {
    fn size(&self) -> BoardSize {
        self.size
    }

    fn random_below(&mut self, bound: usize) -> usize {
        random_below(self.rng, bound)
    }

    fn kinds_mut(&mut self) -> &mut KindRegistry {
        &mut *self.kinds
    }

    fn try_to_eat_carrot_at(&mut self, at: Position) -> bool {
        take_carrot(self.passive, at)
    }

    fn slice_victim_for(&mut self, worm: &Worm) {
        let Some((victim, index)) = self.victim_at(worm.head().position) else {
            return;
        };
        let Some(free) = self.others().position(|w| !w.is_alive()) else {
            trace!("slice declined, no free slot");
            return;
        };
        let Some(target) = nth_other(self.before, self.after, victim) else {
            return;
        };
        if index <= 1 || index.saturating_add(2) > target.len() {
            trace!(index, length = target.len(), "slice declined, halves too short");
            return;
        }

        let child = Worm::from_tail(target, index, self.kinds);
        target.on_sliced_at(index, self.kinds);
        debug!(
            attacker = %worm.kind(),
            victim = %target.kind(),
            kept = target.len(),
            split_off = child.len(),
            "worm sliced"
        );
        if let Some(slot) = nth_other(self.before, self.after, free) {
            *slot = child;
        }
    }

    fn eat_victim_for(&mut self, worm: &Worm) -> i32 {
        let Some((victim, _)) = self.victim_at(worm.head().position) else {
            return 0;
        };
        let Some(target) = nth_other(self.before, self.after, victim) else {
            return 0;
        };
        if !target.is_alive() {
            return 0;
        }
        let gained = target.food_value();
        target.on_eaten(self.kinds);
        debug!(
            eater = %worm.kind(),
            victim = %target.kind(),
            gained,
            "worm devoured"
        );
        gained
    }
}

fn nth_other<'w>(
    before: &'w mut [Worm],
    after: &'w mut [Worm],
    index: usize,
) -> Option<&'w mut Worm> {
    match index.checked_sub(before.len()) {
        None => before.get_mut(index),
        Some(rest) => after.get_mut(rest),
    }
}

fn random_below(rng: &mut SmallRng, bound: usize) -> usize {
    if bound == 0 {
        0
    } else {
        rng.random_range(0..bound)
    }
}

fn take_carrot(passive: &mut Grid, at: Position) -> bool {
    if passive.get(at).is_some_and(Cell::is_carrot) {
        passive.set(at, Cell::EMPTY);
        true
    } else {
        false
    }
}

fn paint(grid: &mut Grid, worm: &Worm, attr: Attr) {
    for segment in worm.body() {
        grid.set(segment.position, Cell::new(segment.glyph, attr));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use wormsim_agents::Segment;
    use wormsim_types::{Direction, WormStatus};

    fn arena(width: u16, height: u16) -> Arena {
        Arena::new(BoardSize::clamped(width, height), Some(42))
    }

    /// Lay a worm along `cells`, tail first.
    fn lay(arena: &mut Arena, kind: WormKind, cells: &[(u16, u16)]) -> usize {
        let segments = cells
            .iter()
            .map(|&(x, y)| Segment::new(Position::new(x, y), 'o'))
            .collect();
        arena.insert_worm(|size, kinds| {
            Worm::from_segments(kind, Direction::North, segments, size, kinds)
        })
    }

    fn row(y: u16, xs: std::ops::RangeInclusive<u16>) -> Vec<(u16, u16)> {
        xs.map(|x| (x, y)).collect()
    }

    /// A dead two-segment worm in a far corner, leaving a free slot.
    fn free_slot(arena: &mut Arena) -> usize {
        let slot = lay(arena, WormKind::Vegetarian, &[(11, 11), (10, 11)]);
        assert!(arena.kill(slot));
        slot
    }

    fn assert_counters_match(arena: &Arena) {
        for kind in WormKind::ALL {
            let alive = arena
                .worms()
                .iter()
                .filter(|w| w.is_alive() && w.kind() == kind)
                .count();
            assert_eq!(
                arena.kinds().count(kind),
                u32::try_from(alive).unwrap(),
                "{kind} counter"
            );
        }
    }

    #[test]
    fn new_arena_is_all_carrots() {
        let arena = arena(8, 5);
        assert_eq!(arena.passive().carrot_count(), 40);
        assert_eq!(arena.screen(), arena.passive());
        assert!(arena.worms().is_empty());
    }

    #[test]
    fn board_is_clamped() {
        let arena = Arena::new(BoardSize { width: 500, height: 0 }, Some(1));
        assert_eq!(arena.size(), BoardSize::clamped(100, 1));
    }

    #[test]
    fn carrot_is_eaten_once() {
        let mut arena = arena(10, 10);
        let at = Position::new(3, 4);

        assert!(arena.try_to_eat_carrot_at(at));
        assert_eq!(arena.passive().get(at), Some(Cell::EMPTY));

        let before = arena.passive().clone();
        assert!(!arena.try_to_eat_carrot_at(at));
        assert_eq!(arena.passive(), &before);
    }

    #[test]
    fn spawned_worm_stacks_on_its_cell() {
        let mut arena = arena(10, 10);
        let at = Position::new(2, 2);
        let slot = arena.spawn_worm(WormKind::Cannibal, "worms", at);

        let worm = arena.worm(slot).unwrap();
        assert_eq!(worm.len(), 5);
        assert!(worm.body().iter().all(|s| s.position == at));
        assert_eq!(arena.kinds().count(WormKind::Cannibal), 1);

        arena.refresh_screen();
        assert_eq!(arena.screen().get(at), Some(Cell::new('w', Attr::Cannibal)));
        assert!(arena.passive().get(at).unwrap().is_carrot());
    }

    #[test]
    fn created_worm_keeps_whole_saying_visible() {
        let mut arena = arena(10, 10);
        let slot = arena.create_worm();
        let worm = arena.worm(slot).unwrap();
        let visible: String = worm.body().iter().skip(1).rev().map(|s| s.glyph).collect();
        assert!(SAYINGS.contains(&visible.as_str()));
    }

    #[test]
    fn dead_slots_are_recycled_first() {
        let mut arena = arena(12, 12);
        let first = arena.spawn_worm(WormKind::Vegetarian, "ab", Position::new(0, 0));
        let second = arena.spawn_worm(WormKind::Scissorhead, "cd", Position::new(5, 5));
        assert_eq!((first, second), (0, 1));

        assert!(arena.kill(first));
        assert!(!arena.kill(first));
        let third = arena.spawn_worm(WormKind::Cannibal, "ef", Position::new(9, 9));

        assert_eq!(third, 0);
        assert_eq!(arena.worms().len(), 2);
        assert_eq!(arena.high_water_mark(), 2);
        assert_counters_match(&arena);
    }

    #[test]
    fn restart_seeds_a_counted_population() {
        let mut arena = arena(30, 20);
        for _ in 0..5 {
            let created = arena.restart(Population::default());
            assert!((3..9).contains(&created));
            assert_eq!(arena.worms().len(), created);
            assert_eq!(arena.kinds().total() as usize, created);
            assert_eq!(arena.high_water_mark(), created);
            assert_counters_match(&arena);
        }
    }

    #[test]
    fn restart_clears_previous_run() {
        let mut arena = arena(10, 10);
        arena.try_to_eat_carrot_at(Position::new(1, 1));
        for _ in 0..20 {
            arena.create_worm();
        }
        arena.highlight_next();

        let created = arena.restart(Population {
            min_worms: 2,
            worm_variation: 0,
        });

        assert_eq!(created, 2);
        assert_eq!(arena.high_water_mark(), 2);
        assert_eq!(arena.highlighted(), None);
        assert_eq!(arena.passive().carrot_count(), 100);
    }

    #[test]
    fn victim_lookup_skips_self_and_sentinels() {
        let mut arena = arena(10, 10);
        let a = arena.spawn_worm(WormKind::Cannibal, "aaa", Position::new(2, 2));
        assert_eq!(arena.victim_of(a), None);

        let b = arena.spawn_worm(WormKind::Vegetarian, "bbb", Position::new(2, 2));
        assert_eq!(arena.victim_of(a), Some((b, 1)));
        assert_eq!(arena.victim_of(b), Some((a, 1)));

        // Only the sentinel of `c` lies under the head of `d`.
        let c = lay(&mut arena, WormKind::Vegetarian, &[(6, 6), (6, 5), (6, 4)]);
        let d = lay(&mut arena, WormKind::Cannibal, &[(7, 7), (6, 6)]);
        assert_eq!(arena.victim_of(d), None);
        assert_eq!(arena.victim_of(c), None);
    }

    #[test]
    fn victim_lookup_prefers_storage_order_and_ignores_the_dead() {
        let mut arena = arena(10, 10);
        let actor = lay(&mut arena, WormKind::Cannibal, &[(0, 5), (1, 5)]);
        let first = lay(&mut arena, WormKind::Vegetarian, &[(1, 3), (1, 4), (1, 5)]);
        let second = lay(&mut arena, WormKind::Vegetarian, &[(1, 7), (1, 6), (1, 5)]);

        assert_eq!(arena.victim_of(actor), Some((first, 2)));
        arena.kill(first);
        assert_eq!(arena.victim_of(actor), Some((second, 2)));
    }

    #[test]
    fn slicing_splits_victim_into_free_slot() {
        let mut arena = arena(12, 12);
        let victim = lay(&mut arena, WormKind::Vegetarian, &row(5, 0..=9));
        let actor = lay(&mut arena, WormKind::Scissorhead, &[(4, 2), (4, 3), (4, 4), (4, 5)]);
        let spare = free_slot(&mut arena);
        let original = arena.worm(victim).unwrap().body().to_vec();
        assert_eq!(arena.worm(victim).unwrap().stomach(), 30);

        arena.slice_victim_for(actor);

        let kept = arena.worm(victim).unwrap();
        assert_eq!(kept.len(), 4);
        assert_eq!(kept.body(), &original[..4]);
        assert_eq!(kept.stomach(), 12);

        let child = arena.worm(spare).unwrap();
        assert!(child.is_alive());
        assert_eq!(child.len(), 6);
        assert_eq!(child.stomach(), 18);
        assert_eq!(child.kind(), WormKind::Vegetarian);
        assert_eq!(child.body()[0].glyph, SENTINEL_GLYPH);
        assert_eq!(child.body()[1..], original[5..]);

        assert_eq!(arena.worms().len(), 3);
        assert_eq!(arena.kinds().count(WormKind::Vegetarian), 2);
        assert_counters_match(&arena);
    }

    #[test]
    fn slicing_without_free_slot_does_nothing() {
        let mut arena = arena(12, 12);
        let victim = lay(&mut arena, WormKind::Vegetarian, &row(5, 0..=9));
        let actor = lay(&mut arena, WormKind::Scissorhead, &[(4, 3), (4, 4), (4, 5)]);
        let before = arena.worms().to_vec();

        arena.slice_victim_for(actor);

        assert_eq!(arena.worms(), before.as_slice());
        assert_eq!(arena.worm(victim).unwrap().len(), 10);
    }

    #[test]
    fn slicing_near_either_end_does_nothing() {
        let mut arena = arena(12, 12);
        let victim = lay(&mut arena, WormKind::Cannibal, &row(5, 0..=9));
        let near_tail = lay(&mut arena, WormKind::Scissorhead, &[(1, 3), (1, 4), (1, 5)]);
        let near_head = lay(&mut arena, WormKind::Scissorhead, &[(9, 3), (9, 4), (9, 5)]);
        free_slot(&mut arena);

        arena.slice_victim_for(near_tail);
        arena.slice_victim_for(near_head);

        assert_eq!(arena.worm(victim).unwrap().len(), 10);
        assert_eq!(arena.kinds().count(WormKind::Cannibal), 1);
    }

    #[test]
    fn eating_pays_length_times_food_value() {
        let mut arena = arena(12, 12);
        let victim = lay(&mut arena, WormKind::Scissorhead, &row(5, 0..=6));
        let actor = lay(&mut arena, WormKind::Cannibal, &[(3, 3), (3, 4), (3, 5)]);
        let body = arena.worm(victim).unwrap().body().to_vec();
        let actor_stomach = arena.worm(actor).unwrap().stomach();

        assert_eq!(arena.eat_victim_for(actor), 7 * 5);

        let eaten = arena.worm(victim).unwrap();
        assert_eq!(eaten.status(), WormStatus::Eaten);
        assert_eq!(eaten.body(), body.as_slice());
        assert_eq!(arena.worm(actor).unwrap().stomach(), actor_stomach);
        assert_eq!(arena.kinds().count(WormKind::Scissorhead), 0);

        assert_eq!(arena.eat_victim_for(actor), 0);
        assert_counters_match(&arena);
    }

    #[test]
    fn remains_are_baked_into_passive_grid() {
        let mut arena = arena(10, 10);
        let slot = lay(&mut arena, WormKind::Vegetarian, &[(2, 2), (3, 2), (4, 2)]);
        arena.kill(slot);
        arena.refresh_screen();

        assert_eq!(
            arena.passive().get(Position::new(4, 2)),
            Some(Cell::new('o', Attr::Remains))
        );
        assert_eq!(
            arena.passive().get(Position::new(2, 2)),
            Some(Cell::new(SENTINEL_GLYPH, Attr::Remains))
        );
        assert!(!arena.try_to_eat_carrot_at(Position::new(3, 2)));
        assert_eq!(arena.screen(), arena.passive());
    }

    #[test]
    fn highlight_cycles_through_living_worms() {
        let mut arena = arena(10, 10);
        let a = arena.spawn_worm(WormKind::Vegetarian, "aa", Position::new(1, 1));
        let b = arena.spawn_worm(WormKind::Vegetarian, "bb", Position::new(5, 5));

        assert_eq!(arena.highlight_next(), Some(a));
        assert_eq!(arena.highlight_next(), Some(b));
        assert_eq!(
            arena.screen().get(Position::new(5, 5)),
            Some(Cell::new('b', Attr::Highlight))
        );
        assert_eq!(arena.highlight_next(), Some(a));

        assert!(arena.kill_highlighted());
        assert_eq!(arena.highlighted(), None);
        assert!(!arena.kill_highlighted());
        assert_eq!(arena.highlight_next(), Some(b));
        assert_counters_match(&arena);
    }

    #[test]
    fn slice_child_in_highlighted_slot_is_not_highlighted() {
        let mut arena = arena(12, 12);
        let victim = lay(&mut arena, WormKind::Vegetarian, &row(5, 0..=9));
        let actor = lay(&mut arena, WormKind::Scissorhead, &[(4, 2), (4, 3), (4, 4), (4, 5)]);
        let spare = lay(&mut arena, WormKind::Cannibal, &[(11, 11), (10, 11)]);
        assert_eq!(arena.highlight_next(), Some(victim));
        assert_eq!(arena.highlight_next(), Some(actor));
        assert_eq!(arena.highlight_next(), Some(spare));

        assert!(arena.kill(spare));
        assert_eq!(arena.highlighted(), None);

        arena.slice_victim_for(actor);
        arena.refresh_screen();

        let child = arena.worm(spare).unwrap();
        assert!(child.is_alive());
        assert_eq!(arena.highlighted(), None);
        assert_eq!(
            arena.screen().get(child.head().position),
            Some(Cell::new(child.head().glyph, Attr::Vegetarian))
        );
        assert!(!arena.kill_highlighted());
        assert!(arena.worm(spare).unwrap().is_alive());
    }

    #[test]
    fn hungry_cannibal_devours_through_step() {
        // On a single-cell board every move lands back on the same cell,
        // so the cannibal's head always sits on the victim's body.
        let mut arena = arena(1, 1);
        let at = Position::new(0, 0);
        assert!(arena.try_to_eat_carrot_at(at));
        let victim = arena.spawn_worm(WormKind::Vegetarian, "vegetables", at);
        let eater = arena.spawn_worm(WormKind::Cannibal, "cc", at);
        assert_eq!(arena.highlight_next(), Some(victim));

        // Full at 10, the eater only turns hungry once it is down to 7.
        arena.step();
        arena.step();
        assert_eq!(arena.worm(eater).unwrap().stomach(), 8);
        assert!(arena.worm(victim).unwrap().is_alive());
        assert_eq!(arena.highlighted(), Some(victim));

        arena.step();
        let food = 10 * WormKind::Vegetarian.food_value();
        assert_eq!(arena.worm(eater).unwrap().stomach(), 7 + food);
        assert_eq!(arena.worm(victim).unwrap().status(), WormStatus::Eaten);
        assert_eq!(arena.highlighted(), None);
        assert_eq!(arena.kinds().count(WormKind::Vegetarian), 0);
        assert_eq!(arena.passive().get(at), Some(Cell::new('v', Attr::Remains)));

        // The overfull stomach is brought back to capacity on the next step.
        arena.step();
        assert_eq!(arena.worm(eater).unwrap().stomach(), 10 - 1);
        assert_counters_match(&arena);
    }

    #[test]
    fn long_run_keeps_every_invariant() {
        let mut arena = arena(24, 12);
        arena.restart(Population {
            min_worms: 8,
            worm_variation: 1,
        });

        for _ in 0..300 {
            arena.step();

            assert_counters_match(&arena);
            assert!(arena.high_water_mark() >= arena.worms().len());
            for worm in arena.worms() {
                assert!(worm.has_sentinel_tail());
                assert!(worm.is_contiguous(arena.size()));
                if worm.is_alive() {
                    assert!(worm.len() >= 2);
                    // Cannibals may overfill from a meal until their next step.
                    if worm.kind() != WormKind::Cannibal {
                        assert!(worm.stomach() <= worm.storage_capacity());
                    }
                }
            }

            let mut expected = arena.passive().clone();
            for worm in arena.worms().iter().filter(|w| w.is_alive()) {
                for segment in worm.body() {
                    expected.set(
                        segment.position,
                        Cell::new(segment.glyph, worm.kind().attr()),
                    );
                }
            }
            assert_eq!(arena.screen(), &expected);
        }
    }

    #[test]
    fn same_seed_same_run() {
        let mut left = arena(20, 10);
        let mut right = arena(20, 10);
        left.restart(Population::default());
        right.restart(Population::default());
        for _ in 0..50 {
            left.step();
            right.step();
        }
        assert_eq!(left.worms(), right.worms());
        assert_eq!(left.screen(), right.screen());
    }
}
