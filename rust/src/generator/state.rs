//! Running state of one generation pass.

use std::collections::HashMap;

use crate::shift::ShiftWindow;

use super::bookings::BookedShifts;
use super::index::{StaffIdx, StaffIndex};

/// Hours and bookings accumulated so far in a pass, indexed by `StaffIdx`.
///
/// Seeded from the caller's staff snapshot; the snapshot itself is never
/// written to.
#[derive(Clone, Debug)]
pub struct PassState {
    hours: Vec<f64>,
    bookings: Vec<BookedShifts>,
    next_assignment_id: u64,
}

impl PassState {
    pub fn new(initial_hours: Vec<f64>, first_assignment_id: u64) -> Self {
        let bookings = vec![BookedShifts::new(); initial_hours.len()];
        Self {
            hours: initial_hours,
            bookings,
            next_assignment_id: first_assignment_id,
        }
    }

    #[inline]
    pub fn hours(&self, idx: StaffIdx) -> f64 {
        self.hours[idx as usize]
    }

    #[inline]
    pub fn bookings(&self, idx: StaffIdx) -> &BookedShifts {
        &self.bookings[idx as usize]
    }

    /// Commit a shift to a staff member and hand out the next assignment id.
    pub fn book(&mut self, idx: StaffIdx, window: ShiftWindow, hours: u32) -> u64 {
        self.hours[idx as usize] += hours as f64;
        self.bookings[idx as usize].add(window);
        let id = self.next_assignment_id;
        self.next_assignment_id += 1;
        id
    }

    /// Block out a shift held from an earlier pass. Its hours are already
    /// part of the staff member's starting total.
    pub fn hold(&mut self, idx: StaffIdx, window: ShiftWindow) {
        self.bookings[idx as usize].add(window);
    }

    /// Final hour totals keyed by staff id.
    pub fn hours_by_staff_id(&self, index: &StaffIndex) -> HashMap<String, f64> {
        (0..self.hours.len() as StaffIdx)
            .filter_map(|idx| index.resolve(idx).map(|id| (id.to_string(), self.hours(idx))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::{parse_time, ShiftWindow};
    use chrono::NaiveDate;

    #[test]
    fn test_book_updates_hours_and_ids() {
        let mut index = StaffIndex::with_capacity(2);
        let alice = index.insert("alice").unwrap();
        let bob = index.insert("bob").unwrap();
        let mut state = PassState::new(vec![0.0, 4.0], 10);

        let window = ShiftWindow::on(
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            parse_time("10:00").unwrap(),
            parse_time("18:00").unwrap(),
        );
        assert_eq!(state.book(alice, window, 8), 10);
        assert_eq!(state.book(bob, window, 8), 11);

        assert_eq!(state.hours(alice), 8.0);
        assert_eq!(state.hours(bob), 12.0);
        assert_eq!(state.bookings(alice).conflict_with(&window), Some(&window));

        let totals = state.hours_by_staff_id(&index);
        assert_eq!(totals.get("bob"), Some(&12.0));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_hold_blocks_without_adding_hours() {
        let mut state = PassState::new(vec![8.0], 1);
        let window = ShiftWindow::on(
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            parse_time("10:00").unwrap(),
            parse_time("18:00").unwrap(),
        );

        state.hold(0, window);

        assert_eq!(state.hours(0), 8.0);
        assert!(state.bookings(0).conflict_with(&window).is_some());
        assert_eq!(state.book(0, window, 8), 1);
    }
}
