//! Book identifier generation.
//!
//! Identifiers are wall-clock milliseconds, which keeps them compatible with
//! data written by earlier timestamp-only versions. Two calls inside the same
//! millisecond would collide on time alone, so the generator remembers the
//! last value it handed out (or observed while loading) and never goes back.

use super::book::BookId;
use std::collections::BTreeSet;

/// Monotonic, time-seeded identifier source.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
    taken: BTreeSet<i64>,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: None,
            taken: BTreeSet::new(),
        }
    }

    /// Returns an id never issued or observed before.
    ///
    /// Ids are strictly increasing until the last one reaches `i64::MAX`;
    /// after that the smallest unused positive id is handed out instead.
    pub fn next_id(&mut self) -> BookId {
        let now = chrono::Utc::now().timestamp_millis();
        let next = match self.last {
            Some(last) if now <= last => last.checked_add(1),
            _ => Some(now),
        };

        let id = match next {
            Some(id) if !self.taken.contains(&id) => {
                self.last = Some(id);
                id
            }
            _ => {
                let id = self.lowest_free();
                tracing::warn!(book_id = id, "id space exhausted above last id, reusing a gap");
                id
            }
        };

        self.taken.insert(id);
        BookId(id)
    }

    /// Records an id that came from storage so later ids stay above it.
    pub fn observe(&mut self, id: BookId) {
        self.last = Some(self.last.map_or(id.0, |last| last.max(id.0)));
        self.taken.insert(id.0);
    }

    fn lowest_free(&self) -> i64 {
        let mut candidate = 1;
        for &id in self.taken.range(1..) {
            if id != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_calls_never_repeat() {
        let mut ids = IdGenerator::new();
        let issued: Vec<BookId> = (0..1000).map(|_| ids.next_id()).collect();

        for pair in issued.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn observed_ids_in_the_future_push_generator_forward() {
        let mut ids = IdGenerator::new();
        let future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        ids.observe(BookId(future));

        assert_eq!(ids.next_id(), BookId(future + 1));
    }

    #[test]
    fn ids_track_wall_clock() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = IdGenerator::new().next_id();
        assert!(id.0 >= before);
    }

    #[test]
    fn exhausted_id_space_falls_back_to_free_ids() {
        let mut ids = IdGenerator::new();
        ids.observe(BookId(1));
        ids.observe(BookId(i64::MAX));

        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, BookId(2));
        assert_eq!(second, BookId(3));
    }
}
