//! Shift assignment generator.
//!
//! Walks vendors and their staffing requirements in order and greedily books
//! eligible staff onto each one, tracking running hours per staff member.

mod bookings;
mod core;
mod index;
mod outcome;
mod state;

pub use bookings::BookedShifts;
pub use core::{generate_assignments, generate_with_existing, GeneratorError, ShiftGenerator};
pub use index::{StaffIdx, StaffIndex};
pub use outcome::{CandidateExclusion, ExclusionReason};
pub use state::PassState;
