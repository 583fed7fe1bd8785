//! Directory collaborators and atomic persistence of a generation pass.
//!
//! The generator works on a snapshot; `run_generation` reads that snapshot
//! from a `ScheduleStore` and writes the new assignments together with the
//! updated staff hours in a single `commit`.

use chrono::NaiveDateTime;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::generator::{generate_with_existing, GeneratorError};
use crate::lifecycle::LifecycleError;
use crate::models::{Assignment, AssignmentStatus, GenerationResult, StaffMember, Vendor};
use crate::log_changes;

/// Errors raised by a schedule store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Unknown staff id: {0}")]
    UnknownStaff(String),
    #[error("Unknown assignment id: {0}")]
    UnknownAssignment(u64),
    #[error("Assignment id {0} already exists")]
    DuplicateAssignment(u64),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Filter for assignment lookups. `None` fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignmentQuery {
    pub staff_id: Option<String>,
    pub vendor_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<AssignmentStatus>,
}

impl AssignmentQuery {
    pub fn for_staff(staff_id: &str) -> Self {
        Self {
            staff_id: Some(staff_id.to_string()),
            ..Self::default()
        }
    }

    pub fn for_vendor(vendor_id: &str) -> Self {
        Self {
            vendor_id: Some(vendor_id.to_string()),
            ..Self::default()
        }
    }

    pub fn on_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn with_status(mut self, status: AssignmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, a: &Assignment) -> bool {
        self.staff_id.as_ref().map_or(true, |id| *id == a.staff_id)
            && self.vendor_id.as_ref().map_or(true, |id| *id == a.vendor_id)
            && self.date.as_ref().map_or(true, |d| *d == a.date)
            && self.status.map_or(true, |s| s == a.status)
    }
}

/// Source of staff records.
pub trait StaffDirectory {
    fn list_staff(&self) -> Vec<StaffMember>;
}

/// Source of vendors and their open requirements.
pub trait VendorDirectory {
    fn list_vendors(&self) -> Vec<Vendor>;
}

/// Read side of assignment persistence.
pub trait AssignmentStore {
    fn query_assignments(&self, query: &AssignmentQuery) -> Vec<Assignment>;
    fn get_assignment(&self, id: u64) -> Option<Assignment>;
    /// Highest assignment id stored so far, if any.
    fn max_assignment_id(&self) -> Option<u64>;
}

/// Everything a generation pass writes back, applied as one unit.
#[derive(Clone, Debug, Default)]
pub struct CommitBatch {
    pub assignments: Vec<Assignment>,
    /// New running hours per staff id
    pub staff_hours: Vec<(String, f64)>,
}

impl From<&GenerationResult> for CommitBatch {
    fn from(result: &GenerationResult) -> Self {
        let mut staff_hours: Vec<(String, f64)> = result
            .staff_hours
            .iter()
            .map(|(id, hours)| (id.clone(), *hours))
            .collect();
        staff_hours.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            assignments: result.assignments.clone(),
            staff_hours,
        }
    }
}

/// A store that can persist a generation pass atomically.
pub trait ScheduleStore: StaffDirectory + VendorDirectory + AssignmentStore {
    /// Apply every assignment and hour update in `batch`, or none of them.
    fn commit(&mut self, batch: CommitBatch) -> Result<(), StoreError>;
}

/// Snapshot the store, run one pass and commit its output in one step.
///
/// Stored assignments count toward the requirements they were made for, so
/// running again only fills what is still open. When
/// `config.first_assignment_id` is unset the new ids continue after the
/// highest id already in the store.
pub fn run_generation<S: ScheduleStore>(
    store: &mut S,
    config: &GeneratorConfig,
) -> Result<GenerationResult, StoreError> {
    let vendors = store.list_vendors();
    let staff = store.list_staff();
    let existing = store.query_assignments(&AssignmentQuery::default());

    let mut config = config.clone();
    if config.first_assignment_id.is_none() {
        config.first_assignment_id = store.max_assignment_id().map(|max_id| max_id + 1);
    }

    let result = generate_with_existing(vendors, staff, &existing, &config)?;
    store.commit(CommitBatch::from(&result))?;

    log_changes!(
        config.verbosity,
        "Committed {} assignments ({} requirements short)",
        result.total_assigned(),
        result.unfulfilled().len()
    );
    Ok(result)
}

/// In-memory implementation of all directory and store traits.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    staff: Vec<StaffMember>,
    vendors: Vec<Vendor>,
    assignments: Vec<Assignment>,
    by_id: FxHashMap<u64, usize>,
}

impl InMemoryStore {
    pub fn new(staff: Vec<StaffMember>, vendors: Vec<Vendor>) -> Self {
        Self {
            staff,
            vendors,
            assignments: Vec::new(),
            by_id: FxHashMap::default(),
        }
    }

    pub fn staff_member(&self, staff_id: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == staff_id)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn check_in(&mut self, id: u64, at: NaiveDateTime) -> Result<(), StoreError> {
        let assignment = self.assignment_mut(id)?;
        assignment.check_in(at)?;
        Ok(())
    }

    pub fn check_out(&mut self, id: u64, at: NaiveDateTime) -> Result<(), StoreError> {
        let assignment = self.assignment_mut(id)?;
        assignment.check_out(at)?;
        Ok(())
    }

    fn assignment_mut(&mut self, id: u64) -> Result<&mut Assignment, StoreError> {
        let pos = *self
            .by_id
            .get(&id)
            .ok_or(StoreError::UnknownAssignment(id))?;
        Ok(&mut self.assignments[pos])
    }

    /// Check the whole batch before anything is written.
    fn validate(&self, batch: &CommitBatch) -> Result<(), StoreError> {
        let known_staff: FxHashSet<&str> = self.staff.iter().map(|s| s.id.as_str()).collect();
        for (staff_id, _) in &batch.staff_hours {
            if !known_staff.contains(staff_id.as_str()) {
                return Err(StoreError::UnknownStaff(staff_id.clone()));
            }
        }

        let mut batch_ids: FxHashSet<u64> = FxHashSet::default();
        for a in &batch.assignments {
            if !known_staff.contains(a.staff_id.as_str()) {
                return Err(StoreError::UnknownStaff(a.staff_id.clone()));
            }
            if self.by_id.contains_key(&a.id) || !batch_ids.insert(a.id) {
                return Err(StoreError::DuplicateAssignment(a.id));
            }
        }
        Ok(())
    }
}

impl StaffDirectory for InMemoryStore {
    fn list_staff(&self) -> Vec<StaffMember> {
        self.staff.clone()
    }
}

impl VendorDirectory for InMemoryStore {
    fn list_vendors(&self) -> Vec<Vendor> {
        self.vendors.clone()
    }
}

impl AssignmentStore for InMemoryStore {
    fn query_assignments(&self, query: &AssignmentQuery) -> Vec<Assignment> {
        self.assignments
            .iter()
            .filter(|a| query.matches(a))
            .cloned()
            .collect()
    }

    fn get_assignment(&self, id: u64) -> Option<Assignment> {
        self.by_id.get(&id).map(|&pos| self.assignments[pos].clone())
    }

    fn max_assignment_id(&self) -> Option<u64> {
        self.by_id.keys().copied().max()
    }
}

impl ScheduleStore for InMemoryStore {
    fn commit(&mut self, batch: CommitBatch) -> Result<(), StoreError> {
        self.validate(&batch)?;

        let hours: FxHashMap<String, f64> = batch.staff_hours.into_iter().collect();
        for member in &mut self.staff {
            if let Some(&h) = hours.get(&member.id) {
                member.current_hours = h;
            }
        }
        for a in batch.assignments {
            self.by_id.insert(a.id, self.assignments.len());
            self.assignments.push(a);
        }
        Ok(())
    }
}
