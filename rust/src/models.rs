//! Core data types for staff, vendors and assignments.

use chrono::NaiveDateTime;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::fmt;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Availability flag on a staff record.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaffStatus {
    Available,
    Unavailable,
    OnAssignment,
    OnLeave,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::OnAssignment => "on-assignment",
            Self::OnLeave => "on-leave",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an assignment: scheduled -> checked-in -> checked-out.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssignmentStatus {
    Scheduled,
    CheckedIn,
    CheckedOut,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::CheckedIn => "checked-in",
            Self::CheckedOut => "checked-out",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff member as listed by the staff directory.
#[pyclass]
#[derive(Clone, Debug)]
pub struct StaffMember {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    /// Role names this person can fill
    #[pyo3(get, set)]
    pub skills: Vec<String>,
    /// ISO dates (YYYY-MM-DD) this person can work
    #[pyo3(get, set)]
    pub availability: Vec<String>,
    #[pyo3(get, set)]
    pub max_hours_per_week: u32,
    /// Hours already committed this week
    #[pyo3(get, set)]
    pub current_hours: f64,
    #[pyo3(get, set)]
    pub status: StaffStatus,
}

#[pymethods]
impl StaffMember {
    #[new]
    #[pyo3(signature = (
        id,
        name,
        skills,
        availability,
        max_hours_per_week,
        current_hours=0.0,
        status=StaffStatus::Available
    ))]
    fn new(
        id: String,
        name: String,
        skills: Vec<String>,
        availability: Vec<String>,
        max_hours_per_week: u32,
        current_hours: f64,
        status: StaffStatus,
    ) -> Self {
        Self {
            id,
            name,
            skills,
            availability,
            max_hours_per_week,
            current_hours,
            status,
        }
    }

    /// Hours left before the weekly cap is reached (never negative).
    pub fn remaining_hours(&self) -> f64 {
        (self.max_hours_per_week as f64 - self.current_hours).max(0.0)
    }

    fn __repr__(&self) -> String {
        format!(
            "StaffMember(id={:?}, name={:?}, hours={}/{}, status={})",
            self.id, self.name, self.current_hours, self.max_hours_per_week, self.status
        )
    }
}

/// A vendor's request for `staff_needed` people in `role` during a time window.
#[pyclass]
#[derive(Clone, Debug)]
pub struct StaffingRequirement {
    /// ISO date (YYYY-MM-DD)
    #[pyo3(get, set)]
    pub date: String,
    /// HH:MM
    #[pyo3(get, set)]
    pub start_time: String,
    /// HH:MM
    #[pyo3(get, set)]
    pub end_time: String,
    #[pyo3(get, set)]
    pub staff_needed: i64,
    #[pyo3(get, set)]
    pub role: String,
}

#[pymethods]
impl StaffingRequirement {
    #[new]
    fn new(
        date: String,
        start_time: String,
        end_time: String,
        staff_needed: i64,
        role: String,
    ) -> Self {
        Self {
            date,
            start_time,
            end_time,
            staff_needed,
            role,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "StaffingRequirement(date={}, {}-{}, role={:?}, needed={})",
            self.date, self.start_time, self.end_time, self.role, self.staff_needed
        )
    }
}

/// A vendor (venue) with its ordered staffing requirements.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Vendor {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub requirements: Vec<StaffingRequirement>,
}

#[pymethods]
impl Vendor {
    #[new]
    #[pyo3(signature = (id, name, requirements=Vec::new()))]
    fn new(id: String, name: String, requirements: Vec<StaffingRequirement>) -> Self {
        Self {
            id,
            name,
            requirements,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Vendor(id={:?}, name={:?}, requirements={})",
            self.id,
            self.name,
            self.requirements.len()
        )
    }
}

/// One staff member booked onto one requirement.
///
/// Staff and vendor names are snapshotted when the assignment is created so
/// later renames in the directories do not rewrite history.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    #[pyo3(get)]
    pub id: u64,
    #[pyo3(get)]
    pub staff_id: String,
    #[pyo3(get)]
    pub staff_name: String,
    #[pyo3(get)]
    pub vendor_id: String,
    #[pyo3(get)]
    pub vendor_name: String,
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub start_time: String,
    #[pyo3(get)]
    pub end_time: String,
    #[pyo3(get)]
    pub role: String,
    #[pyo3(get)]
    pub status: AssignmentStatus,
    #[pyo3(get)]
    pub check_in_time: Option<NaiveDateTime>,
    #[pyo3(get)]
    pub check_out_time: Option<NaiveDateTime>,
    #[pyo3(get)]
    pub hours_worked: Option<f64>,
}

impl Assignment {
    /// Create a freshly scheduled assignment, copying display fields from
    /// the staff member and vendor and the window from the requirement.
    pub fn scheduled(
        id: u64,
        staff: &StaffMember,
        vendor: &Vendor,
        requirement: &StaffingRequirement,
    ) -> Self {
        Self {
            id,
            staff_id: staff.id.clone(),
            staff_name: staff.name.clone(),
            vendor_id: vendor.id.clone(),
            vendor_name: vendor.name.clone(),
            date: requirement.date.clone(),
            start_time: requirement.start_time.clone(),
            end_time: requirement.end_time.clone(),
            role: requirement.role.clone(),
            status: AssignmentStatus::Scheduled,
            check_in_time: None,
            check_out_time: None,
            hours_worked: None,
        }
    }
}

#[pymethods]
impl Assignment {
    #[pyo3(name = "check_in")]
    fn py_check_in(&mut self, at: NaiveDateTime) -> PyResult<()> {
        self.check_in(at)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    #[pyo3(name = "check_out")]
    fn py_check_out(&mut self, at: NaiveDateTime) -> PyResult<()> {
        self.check_out(at)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Assignment(id={}, staff={:?}, vendor={:?}, {} {}-{}, status={})",
            self.id,
            self.staff_name,
            self.vendor_name,
            self.date,
            self.start_time,
            self.end_time,
            self.status
        )
    }
}

/// How far a single requirement was filled by a generation pass.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct RequirementFulfillment {
    #[pyo3(get)]
    pub vendor_id: String,
    #[pyo3(get)]
    pub vendor_name: String,
    /// Position of the requirement in the vendor's list
    #[pyo3(get)]
    pub requirement_index: usize,
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub start_time: String,
    #[pyo3(get)]
    pub end_time: String,
    #[pyo3(get)]
    pub role: String,
    #[pyo3(get)]
    pub staff_needed: i64,
    /// Staff already holding this shift before the pass started
    #[pyo3(get)]
    pub previously_assigned: usize,
    /// Staff booked by this pass
    #[pyo3(get)]
    pub staff_assigned: usize,
}

#[pymethods]
impl RequirementFulfillment {
    /// Headcount requested but not assigned.
    pub fn shortfall(&self) -> u64 {
        let held = (self.previously_assigned + self.staff_assigned) as u64;
        (self.staff_needed.max(0) as u64).saturating_sub(held)
    }

    pub fn is_filled(&self) -> bool {
        self.shortfall() == 0
    }

    fn __repr__(&self) -> String {
        format!(
            "RequirementFulfillment(vendor={:?}, #{}, role={:?}, filled {} of {})",
            self.vendor_id,
            self.requirement_index,
            self.role,
            self.previously_assigned + self.staff_assigned,
            self.staff_needed
        )
    }
}

/// Output of one generation pass.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct GenerationResult {
    /// Assignments in creation order
    #[pyo3(get)]
    pub assignments: Vec<Assignment>,
    /// Final running hours per staff id (every staff member, assigned or not)
    #[pyo3(get)]
    pub staff_hours: HashMap<String, f64>,
    /// One entry per requirement, in processing order
    #[pyo3(get)]
    pub fulfillment: Vec<RequirementFulfillment>,
}

#[pymethods]
impl GenerationResult {
    pub fn total_assigned(&self) -> usize {
        self.assignments.len()
    }

    /// Requirements that ended the pass with a shortfall.
    pub fn unfulfilled(&self) -> Vec<RequirementFulfillment> {
        self.fulfillment
            .iter()
            .filter(|f| !f.is_filled())
            .cloned()
            .collect()
    }

    /// Copies of `staff` carrying the hour totals produced by this pass.
    ///
    /// Staff ids the pass did not see keep their existing totals.
    pub fn updated_staff(&self, staff: Vec<StaffMember>) -> Vec<StaffMember> {
        staff
            .into_iter()
            .map(|mut member| {
                if let Some(&hours) = self.staff_hours.get(&member.id) {
                    member.current_hours = hours;
                }
                member
            })
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "GenerationResult(assignments={}, requirements={}, unfulfilled={})",
            self.assignments.len(),
            self.fulfillment.len(),
            self.fulfillment.iter().filter(|f| !f.is_filled()).count()
        )
    }
}
