// ============================================================
// Layer 4 — Shuffle Buffer
// ============================================================
// Decides the order one training epoch visits the reviews in:
//
//   dataset.iter()
//       │
//       ▼
//   shuffle(.., buf_size)  → fills a buffer, shuffles it, drains it
//       │
//       ▼
//   ReviewDataset          → batched in that order by a DataLoader
//
// Shuffle buffer:
//   Items are read into a buffer of `buf_size`. When it is full it
//   is shuffled and emitted in full, then refilled. Whatever is left
//   at the end is shuffled and emitted too. With buf_size >= dataset
//   size this is a full shuffle; smaller buffers only mix locally.
//
// Reference: rand crate documentation (SliceRandom)
//            Rust Book §13 (Iterators)

use rand::{seq::SliceRandom, Rng};

// ─── Shuffle Buffer ───────────────────────────────────────────────────────────
pub struct ShuffleBuffer<I: Iterator, R> {
    inner:    I,
    rng:      R,
    buf_size: usize,
    // Drained from the back; holds the current shuffled window
    pending:  Vec<I::Item>,
}

impl<I: Iterator, R: Rng> Iterator for ShuffleBuffer<I, R> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() {
            self.pending.extend(self.inner.by_ref().take(self.buf_size));
            self.pending.shuffle(&mut self.rng);
        }
        self.pending.pop()
    }
}

/// Shuffle `items` through a buffer of `buf_size` elements.
///
/// # Panics
/// Panics if `buf_size` is 0.
pub fn shuffle<I, R>(items: I, buf_size: usize, rng: R) -> ShuffleBuffer<I::IntoIter, R>
where
    I: IntoIterator,
    R: Rng,
{
    assert!(buf_size > 0, "shuffle buffer size must be positive");
    ShuffleBuffer {
        inner: items.into_iter(),
        rng,
        buf_size,
        pending: Vec::with_capacity(buf_size.min(4096)),
    }
}
