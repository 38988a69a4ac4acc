//! Bag module - 7-bag piece generation
//!
//! Each bag holds one of every piece kind in shuffled order. Pieces are drawn
//! front to back; an empty bag is replaced by a freshly shuffled one. This caps
//! streaks at two (tail of one bag, head of the next) and droughts at twelve.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::{PieceKind, NEXT_PREVIEW};

const BAG_SIZE: usize = PieceKind::ALL.len();

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagQueue {
    /// Current bag of pieces
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next piece to hand out; `BAG_SIZE` means empty
    bag_index: usize,
    /// RNG for shuffling
    rng: StdRng,
    /// Number of bags generated so far
    bags_filled: u64,
}

impl BagQueue {
    /// Create an empty queue. The first draw fills it.
    pub fn new(seed: u64) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: BAG_SIZE,
            rng: StdRng::seed_from_u64(seed),
            bags_filled: 0,
        }
    }

    fn shuffled_bag(rng: &mut StdRng) -> [PieceKind; BAG_SIZE] {
        let mut bag = PieceKind::ALL;
        bag.shuffle(rng);
        bag
    }

    pub fn is_empty(&self) -> bool {
        self.bag_index >= BAG_SIZE
    }

    /// Pieces left before the next refill
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index.min(BAG_SIZE)..]
    }

    /// Replace the queue with a shuffled full set when it is empty.
    pub fn refill_if_empty(&mut self) {
        if !self.is_empty() {
            return;
        }
        self.bag = Self::shuffled_bag(&mut self.rng);
        self.bag_index = 0;
        self.bags_filled += 1;
    }

    /// Draw the next piece from the queue
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PieceKind {
        self.refill_if_empty();
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> PieceKind {
        self.preview()[0]
    }

    /// The next [`NEXT_PREVIEW`] pieces, in draw order.
    ///
    /// When the current bag runs short the following bag is generated from a
    /// clone of the RNG, so the preview matches what `next()` will return and
    /// the queue itself is not touched.
    pub fn preview(&self) -> [PieceKind; NEXT_PREVIEW] {
        let mut out = [PieceKind::O; NEXT_PREVIEW];
        let current = self.remaining();
        let from_current = current.len().min(NEXT_PREVIEW);
        out[..from_current].copy_from_slice(&current[..from_current]);

        if from_current < NEXT_PREVIEW {
            let mut preview_rng = self.rng.clone();
            let next_bag = Self::shuffled_bag(&mut preview_rng);
            out[from_current..].copy_from_slice(&next_bag[..NEXT_PREVIEW - from_current]);
        }

        out
    }

    /// Number of bags generated so far
    pub fn bags_filled(&self) -> u64 {
        self.bags_filled
    }
}

impl Default for BagQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let queue = BagQueue::new(7);
        assert!(queue.is_empty());
        assert!(queue.remaining().is_empty());
        assert_eq!(queue.bags_filled(), 0);
    }

    #[test]
    fn refill_only_when_empty() {
        let mut queue = BagQueue::new(7);
        queue.refill_if_empty();
        assert_eq!(queue.remaining().len(), 7);
        assert_eq!(queue.bags_filled(), 1);

        let _ = queue.next();
        queue.refill_if_empty();
        assert_eq!(queue.remaining().len(), 6);
        assert_eq!(queue.bags_filled(), 1);
    }

    #[test]
    fn draws_all_seven_per_bag() {
        let mut queue = BagQueue::new(1);
        let mut drawn: Vec<PieceKind> = (0..7).map(|_| queue.next()).collect();
        drawn.sort_by_key(|k| k.index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BagQueue::new(12345);
        let mut b = BagQueue::new(12345);
        for _ in 0..70 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn peek_matches_next_across_bag_boundary() {
        let mut queue = BagQueue::new(99);
        for _ in 0..20 {
            let peeked = queue.peek();
            assert_eq!(peeked, queue.next());
        }
    }

    #[test]
    fn preview_matches_upcoming_draws() {
        let mut queue = BagQueue::new(4242);
        for _ in 0..3 {
            let _ = queue.next();
        }
        for _ in 0..10 {
            let preview = queue.preview();
            let mut clone = queue.clone();
            let upcoming: Vec<PieceKind> = (0..NEXT_PREVIEW).map(|_| clone.next()).collect();
            assert_eq!(preview.to_vec(), upcoming);
            let _ = queue.next();
        }
    }
}
