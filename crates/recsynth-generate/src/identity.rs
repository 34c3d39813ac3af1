use std::collections::HashSet;
use std::ops::Range;

use rand::RngCore;
use rand::Rng;
use rand::seq::index;

use recsynth_core::{Error, MAX_STUDY_ID, MIN_STUDY_ID, Result};

/// Hands out study ids from a bounded pool, never repeating one.
///
/// Ids stay retired once handed out, even when the row holding them is later
/// given a different id.
#[derive(Debug, Clone)]
pub struct IdentityAllocator {
    pool: Range<u32>,
    assigned: HashSet<u32>,
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new(MIN_STUDY_ID..MAX_STUDY_ID)
    }
}

impl IdentityAllocator {
    pub fn new(pool: Range<u32>) -> Self {
        Self {
            pool,
            assigned: HashSet::new(),
        }
    }

    pub fn pool(&self) -> Range<u32> {
        self.pool.clone()
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }

    pub fn available(&self) -> usize {
        self.pool_size() - self.assigned.len()
    }

    pub fn is_assigned(&self, id: u32) -> bool {
        self.assigned.contains(&id)
    }

    /// Draw one unassigned id, each eligible id equally likely.
    pub fn allocate_unique(&mut self, rng: &mut dyn RngCore) -> Result<u32> {
        let available = self.available();
        if available == 0 {
            return Err(Error::Exhaustion {
                requested: 1,
                available,
            });
        }

        let id = if self.assigned.len() * 2 < self.pool_size() {
            // Rejection sampling while the pool is mostly free.
            loop {
                let candidate = rng.random_range(self.pool.clone());
                if !self.assigned.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            let nth = rng.random_range(0..available);
            self.pool
                .clone()
                .filter(|candidate| !self.assigned.contains(candidate))
                .nth(nth)
                .ok_or(Error::Exhaustion {
                    requested: 1,
                    available: 0,
                })?
        };

        self.assigned.insert(id);
        Ok(id)
    }

    /// Draw `count` distinct unassigned ids without replacement.
    ///
    /// Nothing is assigned when the pool cannot cover the whole request.
    pub fn allocate_batch(&mut self, count: usize, rng: &mut dyn RngCore) -> Result<Vec<u32>> {
        let available = self.available();
        if count > available {
            return Err(Error::Exhaustion {
                requested: count,
                available,
            });
        }

        let eligible: Vec<u32> = self
            .pool
            .clone()
            .filter(|candidate| !self.assigned.contains(candidate))
            .collect();
        let ids: Vec<u32> = index::sample(rng, eligible.len(), count)
            .into_iter()
            .map(|position| eligible[position])
            .collect();

        self.assigned.extend(ids.iter().copied());
        Ok(ids)
    }
}
