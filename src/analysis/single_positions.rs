//! Event log of single-position recoveries.

/// Kind of the last recorded event
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    /// A position was added
    Added,
    /// A pattern character could not be matched
    Missed,
}

/// Marker stored in the log in place of a position on a miss
pub const MISSED_MARKER: Option<usize> = None;

/// Append-only log of added positions and misses.
///
/// The first run of at least two consecutive additions is captured as the
/// "uninterrupted row". Once a miss ends that run, the row is frozen until
/// the next [`SinglePositions::clear`].
#[derive(Debug, Default, Clone)]
pub struct SinglePositions {
    log: Vec<Option<usize>>,
    added: usize,
    missed: usize,
    last: Option<Event>,
    row: Vec<usize>,
    row_closed: bool,
}

impl SinglePositions {
    /// Record an added position
    pub fn add(&mut self, position: usize) {
        if self.last == Some(Event::Added) && !self.row_closed {
            if self.row.is_empty() {
                if let Some(Some(previous)) = self.log.last() {
                    self.row.push(*previous);
                }
            }
            self.row.push(position);
        }
        self.log.push(Some(position));
        self.added += 1;
        self.last = Some(Event::Added);
    }

    /// Record a miss
    pub fn miss(&mut self) {
        self.log.push(MISSED_MARKER);
        self.missed += 1;
        self.last = Some(Event::Missed);
        if !self.row.is_empty() {
            self.row_closed = true;
        }
    }

    /// Whether a run of consecutive additions has been captured
    pub fn do_have_uninterrupted_row(&self) -> bool {
        !self.row.is_empty()
    }

    /// The captured run; empty when there is none
    pub fn uninterrupted_row(&self) -> &[usize] {
        &self.row
    }

    /// Number of added positions
    pub fn quantity(&self) -> usize {
        self.added
    }

    /// Number of misses
    pub fn missed(&self) -> usize {
        self.missed
    }

    /// Kind of the last event, if any
    pub fn last_event(&self) -> Option<Event> {
        self.last
    }

    /// Every event in order, `None` standing for a miss
    pub fn events(&self) -> &[Option<usize>] {
        &self.log
    }

    /// Forget every event
    pub fn clear(&mut self) {
        self.log.clear();
        self.added = 0;
        self.missed = 0;
        self.last = None;
        self.row.clear();
        self.row_closed = false;
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn captures_first_row() {
        let mut single = SinglePositions::default();
        single.add(1);
        single.add(2);
        single.miss();
        single.add(5);
        assert_eq!(single.uninterrupted_row(), &[1, 2]);
        assert_eq!(single.quantity(), 3);
        assert_eq!(single.missed(), 1);
        assert!(single.do_have_uninterrupted_row());
        assert_eq!(single.events(), &[Some(1), Some(2), None, Some(5)]);
    }

    #[test]
    fn row_extends_while_additions_continue() {
        let mut single = SinglePositions::default();
        single.miss();
        single.add(3);
        single.add(4);
        single.add(6);
        assert_eq!(single.uninterrupted_row(), &[3, 4, 6]);
    }

    #[test]
    fn later_rows_are_ignored() {
        let mut single = SinglePositions::default();
        single.add(1);
        single.add(2);
        single.miss();
        single.add(7);
        single.add(8);
        single.add(9);
        assert_eq!(single.uninterrupted_row(), &[1, 2]);
        assert_eq!(single.last_event(), Some(Event::Added));
    }

    #[test]
    fn no_row_without_two_consecutive_additions() {
        let mut single = SinglePositions::default();
        single.add(1);
        single.miss();
        single.add(3);
        assert!(!single.do_have_uninterrupted_row());
        assert!(single.uninterrupted_row().is_empty());
    }

    #[test]
    fn clear_starts_a_new_cycle() {
        let mut single = SinglePositions::default();
        single.add(1);
        single.add(2);
        single.miss();
        single.clear();
        assert_eq!(single.quantity(), 0);
        assert_eq!(single.last_event(), None);
        single.add(4);
        single.add(5);
        assert_eq!(single.uninterrupted_row(), &[4, 5]);
    }
}
