//! Todo id allocation.
//!
//! # Invariants
//! - Issued ids are strictly increasing within one allocator.
//! - Ids stay close to epoch milliseconds, so ids written by older
//!   timestamp-based clients keep sorting sensibly next to new ones.

use crate::model::todo::TodoId;

/// Hands out strictly increasing todo ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last_issued: Option<i64>,
}

impl IdAllocator {
    /// Creates an allocator that will never reissue any id in `existing`.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a TodoId>) -> Self {
        Self {
            last_issued: existing.into_iter().map(|id| id.get()).max(),
        }
    }

    /// Returns the next id: `now_ms`, or one past the last issued id when
    /// the clock has not moved forward.
    ///
    /// Returns `None` once the last issued id is `i64::MAX`.
    pub fn next(&mut self, now_ms: i64) -> Option<TodoId> {
        let next = match self.last_issued {
            Some(last) if last >= now_ms => last.checked_add(1)?,
            _ => now_ms,
        };
        self.last_issued = Some(next);
        Some(TodoId::new(next))
    }

    /// Reserves every id up to and including `id`.
    pub fn observe(&mut self, id: TodoId) {
        if self.last_issued.map_or(true, |last| id.get() > last) {
            self.last_issued = Some(id.get());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IdAllocator;
    use crate::model::todo::TodoId;

    #[test]
    fn next_is_strictly_monotonic_within_same_millisecond() {
        let mut ids = IdAllocator::default();
        let first = ids.next(1_000);
        let second = ids.next(1_000);
        let third = ids.next(999);
        assert_eq!(first, Some(TodoId::new(1_000)));
        assert_eq!(second, Some(TodoId::new(1_001)));
        assert_eq!(third, Some(TodoId::new(1_002)));
    }

    #[test]
    fn next_follows_clock_once_it_passes_last_issued() {
        let mut ids = IdAllocator::default();
        ids.next(1_000);
        assert_eq!(ids.next(5_000), Some(TodoId::new(5_000)));
    }

    #[test]
    fn seeded_allocator_skips_existing_ids() {
        let existing = [TodoId::new(3), TodoId::new(9_000), TodoId::new(7)];
        let mut ids = IdAllocator::seeded(existing.iter());
        assert_eq!(ids.next(100), Some(TodoId::new(9_001)));
    }

    #[test]
    fn observe_only_moves_forward() {
        let mut ids = IdAllocator::default();
        ids.observe(TodoId::new(50));
        ids.observe(TodoId::new(10));
        assert_eq!(ids.next(0), Some(TodoId::new(51)));
    }

    #[test]
    fn next_reports_exhaustion_instead_of_repeating_max() {
        let existing = [TodoId::new(i64::MAX)];
        let mut ids = IdAllocator::seeded(existing.iter());
        assert_eq!(ids.next(1_000), None);
        assert_eq!(ids.next(1_000), None);
    }
}
