//! No-immediate-repeat random selection
//!
//! `TimedSelector` draws uniformly from a candidate list while excluding the
//! single most recently returned item (when more than one candidate exists).
//! Used for hiding-spot rotation at spawn and for drawing camper subsets.

use rand::Rng;

use crate::error::SelectError;

#[derive(Debug, Clone)]
pub struct TimedSelector<T> {
    items: Vec<T>,
    last: Option<usize>,
}

impl<T> TimedSelector<T> {
    /// A fresh candidate list resets the last-returned marker.
    pub fn new(items: Vec<T>) -> Self {
        Self { items, last: None }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pick one candidate uniformly from all candidates except the most
    /// recently returned one. A single-item pool always returns that item.
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> Result<&T, SelectError> {
        let n = self.items.len();
        let idx = match n {
            0 => return Err(SelectError::EmptyCandidates),
            1 => 0,
            _ => match self.last {
                // Draw from n-1 slots and shift past the excluded index.
                Some(last) => {
                    let r = rng.gen_range(0..n - 1);
                    if r >= last {
                        r + 1
                    } else {
                        r
                    }
                }
                None => rng.gen_range(0..n),
            },
        };
        self.last = Some(idx);
        Ok(&self.items[idx])
    }
}

impl<T: Clone + PartialEq> TimedSelector<T> {
    /// Draw up to `k` distinct candidates by repeated picks de-duplicated
    /// into the result, with a bounded retry budget. Returns fewer than `k`
    /// when the pool is smaller or the retries are exhausted.
    pub fn pick_distinct<R: Rng>(&mut self, rng: &mut R, k: usize) -> Vec<T> {
        let mut picked = Vec::new();
        if self.items.is_empty() || k == 0 {
            return picked;
        }

        let target = k.min(self.items.len());
        let max_attempts = 4 * k;
        let mut attempts = 0;
        while picked.len() < target && attempts < max_attempts {
            attempts += 1;
            if let Ok(item) = self.pick(rng) {
                if !picked.contains(item) {
                    picked.push(item.clone());
                }
            }
        }
        picked
    }
}
