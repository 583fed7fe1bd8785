//! Explainability records: why a staff member was left out of a pool.

use std::fmt;

use crate::models::StaffStatus;

/// The first check a staff member failed for a requirement.
#[derive(Clone, Debug, PartialEq)]
pub enum ExclusionReason {
    NotAvailableOnDate,
    MissingSkill,
    Status(StaffStatus),
    /// Already at or over the weekly cap
    HoursExhausted { current: f64, max: u32 },
    /// Under the cap, but this shift would push them over it
    WouldExceedCap { current: f64, shift: u32, max: u32 },
    /// Already booked on an overlapping shift (reject policy only)
    OverlappingShift,
    /// Already holds this exact shift from an earlier pass
    AlreadyOnShift,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailableOnDate => write!(f, "not available on date"),
            Self::MissingSkill => write!(f, "missing skill"),
            Self::Status(status) => write!(f, "status is {}", status),
            Self::HoursExhausted { current, max } => {
                write!(f, "hours exhausted ({}/{})", current, max)
            }
            Self::WouldExceedCap {
                current,
                shift,
                max,
            } => write!(f, "{}h shift would exceed cap ({}/{})", shift, current, max),
            Self::OverlappingShift => write!(f, "overlaps a shift already booked"),
            Self::AlreadyOnShift => write!(f, "already holds this shift"),
        }
    }
}

/// Record of one staff member excluded from one requirement's pool.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateExclusion {
    pub vendor_id: String,
    /// Position of the requirement in the vendor's list
    pub requirement_index: usize,
    pub staff_id: String,
    pub reason: ExclusionReason,
}

impl CandidateExclusion {
    pub fn new(
        vendor_id: String,
        requirement_index: usize,
        staff_id: String,
        reason: ExclusionReason,
    ) -> Self {
        Self {
            vendor_id,
            requirement_index,
            staff_id,
            reason,
        }
    }
}
