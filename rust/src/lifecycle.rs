//! Check-in / check-out transitions on assignments.
//!
//! An assignment moves scheduled -> checked-in -> checked-out. Check-out
//! stamps the hours actually worked, independent of the scheduled window.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{Assignment, AssignmentStatus};

/// Errors for illegal lifecycle transitions. The assignment is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Assignment {id} cannot be checked in from status {status}")]
    CannotCheckIn { id: u64, status: AssignmentStatus },
    #[error("Assignment {id} cannot be checked out from status {status}")]
    CannotCheckOut { id: u64, status: AssignmentStatus },
    #[error("Assignment {id} check-out at {check_out} precedes check-in at {check_in}")]
    CheckOutBeforeCheckIn {
        id: u64,
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    },
}

/// Elapsed hours between two instants, rounded to two decimals.
fn elapsed_hours(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let hours = (to - from).num_seconds() as f64 / 3600.0;
    (hours * 100.0).round() / 100.0
}

impl Assignment {
    pub fn check_in(&mut self, at: NaiveDateTime) -> Result<(), LifecycleError> {
        if self.status != AssignmentStatus::Scheduled {
            return Err(LifecycleError::CannotCheckIn {
                id: self.id,
                status: self.status,
            });
        }
        self.check_in_time = Some(at);
        self.status = AssignmentStatus::CheckedIn;
        Ok(())
    }

    pub fn check_out(&mut self, at: NaiveDateTime) -> Result<(), LifecycleError> {
        let check_in = match (self.status, self.check_in_time) {
            (AssignmentStatus::CheckedIn, Some(check_in)) => check_in,
            _ => {
                return Err(LifecycleError::CannotCheckOut {
                    id: self.id,
                    status: self.status,
                })
            }
        };
        if at < check_in {
            return Err(LifecycleError::CheckOutBeforeCheckIn {
                id: self.id,
                check_in,
                check_out: at,
            });
        }
        self.check_out_time = Some(at);
        self.hours_worked = Some(elapsed_hours(check_in, at));
        self.status = AssignmentStatus::CheckedOut;
        Ok(())
    }
}
