//! Rust implementation of the staffing shift-assignment generator.
//!
//! Provides the greedy assignment pass over vendor requirements and staff,
//! assignment check-in/check-out, and an atomic commit path for callers that
//! persist the result.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod generator;
pub mod lifecycle;
pub mod logging;
mod models;
pub mod ordering;
pub mod shift;
pub mod store;

pub use config::{GeneratorConfig, OverlapPolicy, OvernightPolicy};
pub use generator::{CandidateExclusion, ExclusionReason, GeneratorError, ShiftGenerator};
pub use lifecycle::LifecycleError;
pub use models::{
    Assignment, AssignmentStatus, GenerationResult, RequirementFulfillment, StaffMember,
    StaffStatus, StaffingRequirement, Vendor,
};
pub use ordering::{order_staff, OrderingError, StaffOrdering, StaffSortKey};
pub use shift::{ShiftError, ShiftWindow};
pub use store::{
    run_generation, AssignmentQuery, AssignmentStore, CommitBatch, InMemoryStore, ScheduleStore,
    StaffDirectory, StoreError, VendorDirectory,
};

/// Run one generation pass over a snapshot of vendors and staff.
///
/// # Arguments
/// * `vendors` - Vendors in processing order, each with ordered requirements
/// * `staff` - Staff in priority order (list position breaks ties)
/// * `config` - Generator configuration (defaults if omitted)
/// * `existing` - Assignments from earlier passes; their requirements are
///   only topped up to the remaining headcount
///
/// # Returns
/// * GenerationResult with assignments, final staff hours and per-requirement fill counts
///
/// # Raises
/// * ValueError on invalid configuration or malformed input
#[pyfunction]
#[pyo3(name = "generate_assignments", signature = (vendors, staff, config=None, existing=None))]
fn py_generate_assignments(
    vendors: Vec<Vendor>,
    staff: Vec<StaffMember>,
    config: Option<GeneratorConfig>,
    existing: Option<Vec<Assignment>>,
) -> PyResult<GenerationResult> {
    let config = config.unwrap_or_default();
    let existing = existing.unwrap_or_default();
    generator::generate_with_existing(vendors, staff, &existing, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Reorder staff before a pass.
///
/// # Arguments
/// * `staff` - Staff list
/// * `strategy` - "list_order", "least_loaded" or "most_headroom"
///
/// # Raises
/// * ValueError if the strategy is unknown
#[pyfunction]
#[pyo3(name = "order_staff", signature = (staff, strategy="list_order".to_string()))]
fn py_order_staff(staff: Vec<StaffMember>, strategy: String) -> PyResult<Vec<StaffMember>> {
    order_staff(staff, &strategy)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The staffing.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<StaffStatus>()?;
    m.add_class::<AssignmentStatus>()?;
    m.add_class::<StaffMember>()?;
    m.add_class::<StaffingRequirement>()?;
    m.add_class::<Vendor>()?;
    m.add_class::<Assignment>()?;
    m.add_class::<RequirementFulfillment>()?;
    m.add_class::<GenerationResult>()?;

    // Config types
    m.add_class::<GeneratorConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_generate_assignments, m)?)?;
    m.add_function(wrap_pyfunction!(py_order_staff, m)?)?;

    Ok(())
}
