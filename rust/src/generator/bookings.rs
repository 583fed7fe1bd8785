//! Shifts already booked for one staff member during a pass.

use crate::shift::ShiftWindow;

/// Booked shift windows for a single staff member, kept sorted by start.
///
/// Windows may overlap each other when the pass allows double booking, so
/// a conflict check scans every window that starts before the candidate ends.
#[derive(Clone, Debug, Default)]
pub struct BookedShifts {
    windows: Vec<ShiftWindow>,
}

impl BookedShifts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a window, keeping the list sorted by start time.
    pub fn add(&mut self, window: ShiftWindow) {
        let idx = self.windows.partition_point(|w| *w <= window);
        self.windows.insert(idx, window);
    }

    /// First booked window that overlaps `window`, if any.
    pub fn conflict_with(&self, window: &ShiftWindow) -> Option<&ShiftWindow> {
        let upper = self.windows.partition_point(|w| w.start < window.end);
        self.windows[..upper].iter().find(|w| w.overlaps(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::{parse_time, ShiftWindow};
    use chrono::NaiveDate;

    fn w(day: u32, start: &str, end: &str) -> ShiftWindow {
        ShiftWindow::on(
            NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
            parse_time(start).unwrap(),
            parse_time(end).unwrap(),
        )
    }

    #[test]
    fn test_windows_stay_sorted() {
        let mut booked = BookedShifts::new();
        booked.add(w(21, "08:00", "12:00"));
        booked.add(w(20, "18:00", "22:00"));
        booked.add(w(20, "08:00", "12:00"));

        assert_eq!(
            booked.windows,
            vec![
                w(20, "08:00", "12:00"),
                w(20, "18:00", "22:00"),
                w(21, "08:00", "12:00"),
            ]
        );
    }

    #[test]
    fn test_conflict_detection() {
        let mut booked = BookedShifts::new();
        assert!(booked.conflict_with(&w(20, "10:00", "18:00")).is_none());

        booked.add(w(20, "10:00", "18:00"));
        assert_eq!(
            booked.conflict_with(&w(20, "15:00", "23:00")),
            Some(&w(20, "10:00", "18:00"))
        );
        // Back-to-back is fine
        assert!(booked.conflict_with(&w(20, "18:00", "22:00")).is_none());
        // Different day
        assert!(booked.conflict_with(&w(21, "10:00", "18:00")).is_none());
    }

    #[test]
    fn test_long_earlier_window_still_conflicts() {
        let mut booked = BookedShifts::new();
        booked.add(w(20, "06:00", "23:00"));
        booked.add(w(20, "07:00", "08:00"));
        assert!(booked.conflict_with(&w(20, "20:00", "21:00")).is_some());
    }
}
