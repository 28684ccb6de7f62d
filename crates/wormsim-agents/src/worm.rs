//! A single worm: its body, stomach, and lifecycle.
//!
//! The body is stored tail first. Index 0 is always the invisible tail
//! sentinel and the last element is the head. Consecutive segments are
//! always adjacent, allowing for wraparound at the board edges.
//!
//! Each step a living worm shifts its body toward the head, turns by a
//! weighted random offset, advances its head one cell, pays one unit of
//! food, and, if hungry, runs its kind's eating behavior. A worm that runs
//! out of food or is cut down to a single segment dies.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wormsim_types::{BoardSize, Direction, Position, SENTINEL_GLYPH, TURN_TABLE, WormStatus};

use crate::habitat::Habitat;
use crate::kind::{KindRegistry, WormKind};

/// One body cell: where it is and which character it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Board position of the segment.
    pub position: Position,
    /// Character drawn for the segment.
    pub glyph: char,
}

impl Segment {
    /// Create a segment.
    pub const fn new(position: Position, glyph: char) -> Self {
        Self { position, glyph }
    }
}

/// A worm on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worm {
    kind: WormKind,
    direction: Direction,
    stomach: i32,
    status: WormStatus,
    body: Vec<Segment>,
}

impl Worm {
    /// Create a worm with every segment stacked on `at`, facing north.
    ///
    /// The body has one segment per character of `saying`. The first
    /// character ends up at the head and the last is overwritten by the
    /// tail sentinel. The stomach starts full and `kind`'s live counter is
    /// incremented.
    ///
    /// # Panics
    ///
    /// Panics if `saying` has fewer than two characters or `at` lies
    /// outside `size`.
    pub fn new(
        kind: WormKind,
        saying: &str,
        at: Position,
        size: BoardSize,
        kinds: &mut KindRegistry,
    ) -> Self {
        assert!(
            size.contains(at),
            "worm position {at} lies outside a {}x{} board",
            size.width,
            size.height
        );
        let body: Vec<Segment> = saying
            .chars()
            .rev()
            .map(|glyph| Segment::new(at, glyph))
            .collect();
        assert!(body.len() >= 2, "a worm saying needs at least two characters");
        Self::assemble(kind, Direction::North, body, kinds)
    }

    /// Create a worm from an explicit tail-first body.
    ///
    /// Useful for placing an already stretched-out worm. The first segment
    /// is re-tagged as the sentinel.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two segments are given, any segment lies
    /// outside `size`, or the segments are not contiguous.
    pub fn from_segments(
        kind: WormKind,
        direction: Direction,
        segments: Vec<Segment>,
        size: BoardSize,
        kinds: &mut KindRegistry,
    ) -> Self {
        assert!(segments.len() >= 2, "a worm needs at least two segments");
        assert!(
            segments.iter().all(|s| size.contains(s.position)),
            "every segment must lie on the board"
        );
        assert!(
            is_path(&segments, size),
            "worm segments must form a contiguous path"
        );
        Self::assemble(kind, direction, segments, kinds)
    }

    /// Create the worm formed by the tail end of a slice.
    ///
    /// The new worm takes `original`'s segments from `index` to the head,
    /// with the segment at `index` becoming its sentinel. It keeps the
    /// original's kind and direction, and its stomach is the original's
    /// scaled by the share of body it received. A child left with nothing
    /// to eat dies straight away.
    ///
    /// # Panics
    ///
    /// Panics unless `1 < index` and `index + 2 <= original.len()`.
    pub fn from_tail(original: &Self, index: usize, kinds: &mut KindRegistry) -> Self {
        let old_len = original.len();
        assert!(
            1 < index && index.saturating_add(2) <= old_len,
            "cannot split a {old_len}-segment worm at {index}"
        );
        let mut body = original
            .body
            .get(index..)
            .map(<[Segment]>::to_vec)
            .unwrap_or_default();
        if let Some(tail) = body.first_mut() {
            tail.glyph = SENTINEL_GLYPH;
        }
        kinds.record_birth(original.kind);
        let mut child = Self {
            kind: original.kind,
            direction: original.direction,
            stomach: scale_stomach(original.stomach, body.len(), old_len),
            status: WormStatus::Alive,
            body,
        };
        child.settle(kinds);
        child
    }

    fn assemble(
        kind: WormKind,
        direction: Direction,
        mut body: Vec<Segment>,
        kinds: &mut KindRegistry,
    ) -> Self {
        if let Some(tail) = body.first_mut() {
            tail.glyph = SENTINEL_GLYPH;
        }
        kinds.record_birth(kind);
        let mut worm = Self {
            kind,
            direction,
            stomach: 0,
            status: WormStatus::Alive,
            body,
        };
        worm.stomach = worm.storage_capacity();
        worm
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The worm's kind.
    pub const fn kind(&self) -> WormKind {
        self.kind
    }

    /// Direction the head will travel in before the next turn.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Current stored food.
    pub const fn stomach(&self) -> i32 {
        self.stomach
    }

    /// Lifecycle state.
    pub const fn status(&self) -> WormStatus {
        self.status
    }

    /// Whether the worm is still alive.
    pub const fn is_alive(&self) -> bool {
        matches!(self.status, WormStatus::Alive)
    }

    /// The body, tail sentinel first and head last.
    pub fn body(&self) -> &[Segment] {
        &self.body
    }

    /// Number of segments, sentinel included.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always `false`; a worm keeps at least one segment.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The head segment.
    pub fn head(&self) -> &Segment {
        match self.body.last() {
            Some(head) => head,
            None => unreachable!("worm bodies are never empty"),
        }
    }

    /// Maximum food the worm can hold: length times kind capacity.
    pub fn storage_capacity(&self) -> i32 {
        len_as_i32(self.body.len()).saturating_mul(self.kind.capacity())
    }

    /// Food gained by devouring this worm: length times kind food value.
    pub fn food_value(&self) -> i32 {
        len_as_i32(self.body.len()).saturating_mul(self.kind.food_value())
    }

    /// Alive with less than three quarters of a full stomach.
    pub fn is_hungry(&self) -> bool {
        self.is_alive()
            && i64::from(self.stomach).saturating_mul(4)
                < i64::from(self.storage_capacity()).saturating_mul(3)
    }

    /// Index of a non-sentinel segment at `at`, if any.
    ///
    /// The tail sentinel is never reported, since it is not drawn.
    pub fn segment_index_at(&self, at: Position) -> Option<usize> {
        self.body
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, segment)| segment.position == at)
            .map(|(index, _)| index)
    }

    /// Whether every pair of consecutive segments is adjacent.
    pub fn is_contiguous(&self, size: BoardSize) -> bool {
        is_path(&self.body, size)
    }

    /// Whether segment 0 carries the sentinel glyph.
    pub fn has_sentinel_tail(&self) -> bool {
        self.body.first().is_some_and(|s| s.glyph == SENTINEL_GLYPH)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Advance one step. Does nothing unless the worm is alive.
    pub fn live(&mut self, habitat: &mut dyn Habitat) {
        if !self.is_alive() {
            return;
        }
        let size = habitat.size();
        debug_assert!(self.is_contiguous(size));

        self.follow_head();

        let roll = habitat.random_below(TURN_TABLE.len());
        let offset = TURN_TABLE.get(roll).copied().unwrap_or(0);
        self.direction = self.direction.turned(offset);
        let direction = self.direction;
        if let Some(head) = self.body.last_mut() {
            head.position = head.position.stepped(direction, size);
        }

        self.stomach = self
            .stomach
            .min(self.storage_capacity())
            .saturating_sub(1);

        if self.is_hungry() {
            (self.kind.behavior())(self, habitat);
        }
        self.settle(habitat.kinds_mut());

        debug_assert!(self.has_sentinel_tail());
        debug_assert!(self.is_contiguous(size));
    }

    /// Keep segments `0..index` after the rest was cut off as a new worm.
    ///
    /// The stomach is scaled by the share of body kept. If only the
    /// sentinel remains, or nothing is left to eat, the worm dies.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < index < len`.
    pub fn on_sliced_at(&mut self, index: usize, kinds: &mut KindRegistry) {
        let old_len = self.len();
        assert!(
            0 < index && index < old_len,
            "cannot cut a {old_len}-segment worm at {index}"
        );
        self.body.truncate(index);
        self.stomach = scale_stomach(self.stomach, index, old_len);
        self.settle(kinds);
    }

    /// Mark the worm as devoured. The body stays in place as remains.
    ///
    /// # Panics
    ///
    /// Panics if the worm is not alive.
    pub fn on_eaten(&mut self, kinds: &mut KindRegistry) {
        assert!(self.is_alive(), "only a living worm can be eaten");
        self.status = WormStatus::Eaten;
        kinds.record_loss(self.kind);
        debug!(kind = %self.kind, length = self.len(), "worm eaten");
    }

    /// Kill the worm on the spot. Returns `false` if it was already gone.
    pub fn kill(&mut self, kinds: &mut KindRegistry) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.status = WormStatus::Dead;
        kinds.record_loss(self.kind);
        debug!(kind = %self.kind, length = self.len(), "worm killed");
        true
    }

    pub(crate) const fn feed(&mut self, amount: i32) {
        self.stomach = self.stomach.saturating_add(amount);
    }

    /// Move every non-head segment onto its successor's old position.
    fn follow_head(&mut self) {
        let Some(mut carried) = self.body.last().map(|head| head.position) else {
            return;
        };
        for segment in self.body.iter_mut().rev().skip(1) {
            let previous = segment.position;
            segment.position = carried;
            carried = previous;
        }
    }

    fn settle(&mut self, kinds: &mut KindRegistry) {
        if self.is_alive() && (self.stomach <= 0 || self.body.len() == 1) {
            self.status = WormStatus::Dead;
            kinds.record_loss(self.kind);
            debug!(
                kind = %self.kind,
                length = self.len(),
                stomach = self.stomach,
                "worm died"
            );
        }
    }
}

fn is_path(segments: &[Segment], size: BoardSize) -> bool {
    segments
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if a.position.touches(b.position, size)))
}

fn len_as_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// `stomach * new_len / old_len`, truncated toward zero.
fn scale_stomach(stomach: i32, new_len: usize, old_len: usize) -> i32 {
    let (Ok(new_len), Ok(old_len)) = (i64::try_from(new_len), i64::try_from(old_len)) else {
        return 0;
    };
    let scaled = i64::from(stomach)
        .saturating_mul(new_len)
        .checked_div(old_len)
        .unwrap_or(0);
    i32::try_from(scaled).unwrap_or(0)
}
