//! Piece randomizer: a seedable LCG feeding a 7-bag
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L) in shuffled order.
//! Pieces are drawn until the bag is empty, then a freshly shuffled bag
//! replaces it, so every kind appears exactly once per 7 draws counted from a
//! bag boundary.
//!
//! A small LCG keeps sequences deterministic per seed, which replays and tests
//! rely on.

use std::collections::VecDeque;

use crate::types::PieceKind;

const BAG_SIZE: usize = 7;

/// Linear congruential generator (Numerical Recipes multiplier and increment).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 is remapped so every seed yields a usable stream.
        Self { state: seed.max(1) }
    }

    /// Advance the generator one step.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform-ish value in `0..max`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// In-place Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of spawn kinds: one shuffled bag of all seven at a time.
///
/// Optionally starts with a scripted prefix of kinds (for replays and
/// scenario setups) before falling back to shuffled bags.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    scripted: VecDeque<PieceKind>,
    bag: [PieceKind; BAG_SIZE],
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Fresh queue with the first bag already shuffled.
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            scripted: VecDeque::new(),
            bag: PieceKind::ALL,
            bag_index: BAG_SIZE,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    /// Queue that yields `kinds` first, then shuffled bags from `seed`.
    pub fn scripted(kinds: &[PieceKind], seed: u32) -> Self {
        let mut queue = Self::new(seed);
        queue.scripted.extend(kinds.iter().copied());
        queue
    }

    fn refill_bag(&mut self) {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        self.bag = bag;
        self.bag_index = 0;
    }

    /// Drop any scripted prefix and start a new bag from the running RNG.
    pub fn new_bag(&mut self) {
        self.scripted.clear();
        self.refill_bag();
    }

    /// Kind the next `draw` will return, without consuming it.
    pub fn peek(&self) -> PieceKind {
        if let Some(&kind) = self.scripted.front() {
            return kind;
        }
        if self.bag_index < BAG_SIZE {
            return self.bag[self.bag_index];
        }

        // Preview the next bag on a copy of the RNG so the upcoming `draw()`
        // refills to exactly this order.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    pub fn draw(&mut self) -> PieceKind {
        if let Some(kind) = self.scripted.pop_front() {
            return kind;
        }
        if self.bag_index == BAG_SIZE {
            self.refill_bag();
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// Pieces left in the current bag (scripted pieces excluded).
    pub fn remaining_in_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index.min(BAG_SIZE)..]
    }

    /// Current RNG state (restarting from it continues the sequence).
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
