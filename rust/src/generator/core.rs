//! Greedy single-pass shift assignment.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::{GeneratorConfig, OverlapPolicy, OvernightPolicy};
use crate::models::{
    Assignment, GenerationResult, RequirementFulfillment, StaffMember, StaffStatus, Vendor,
};
use crate::shift::{parse_date, ParsedShift, ShiftError, ShiftWindow};
use crate::{log_changes, log_checks, log_debug};

use super::index::{StaffIdx, StaffIndex};
use super::outcome::{CandidateExclusion, ExclusionReason};
use super::state::PassState;

/// Errors that can occur while setting up a generation pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Duplicate staff id: {0}")]
    DuplicateStaffId(String),
    #[error("Staff {staff_id} has invalid current hours {hours}")]
    InvalidHours { staff_id: String, hours: f64 },
    #[error("Staff {staff_id} has invalid availability: {source}")]
    InvalidAvailability {
        staff_id: String,
        #[source]
        source: ShiftError,
    },
    #[error("Vendor {vendor_id} requirement #{requirement_index}: {source}")]
    InvalidRequirement {
        vendor_id: String,
        requirement_index: usize,
        #[source]
        source: ShiftError,
    },
    #[error("Existing assignment {assignment_id}: {source}")]
    InvalidExisting {
        assignment_id: u64,
        #[source]
        source: ShiftError,
    },
}

/// Skill and date lookups for one staff member, built once per generator.
#[derive(Clone, Debug)]
struct StaffProfile {
    skills: FxHashSet<String>,
    availability: FxHashSet<NaiveDate>,
}

/// Headcount a requirement already had before this pass.
#[derive(Clone, Debug, Default)]
struct PriorFill {
    count: usize,
    holders: FxHashSet<StaffIdx>,
}

/// Assigns staff to vendor requirements in one deterministic greedy pass.
///
/// Vendors, their requirements and the staff list are all walked in the
/// order given. That order is the only tie-break: callers that want a
/// different priority must sort staff first (see `ordering::order_staff`).
pub struct ShiftGenerator {
    // Input snapshot
    vendors: Vec<Vendor>,
    staff: Vec<StaffMember>,

    // Pre-computed from the snapshot
    index: StaffIndex,
    profiles: Vec<StaffProfile>,
    shifts: Vec<Vec<ParsedShift>>,

    // From assignments made by earlier passes
    prior: Vec<Vec<PriorFill>>,
    held: Vec<(StaffIdx, ShiftWindow)>,

    overlap: OverlapPolicy,
    first_assignment_id: u64,
    verbosity: u8,

    exclusions: Vec<CandidateExclusion>,
}

impl ShiftGenerator {
    /// Validate the configuration and input snapshot.
    pub fn new(
        vendors: Vec<Vendor>,
        staff: Vec<StaffMember>,
        config: &GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        let overlap = config.overlap().map_err(GeneratorError::InvalidConfig)?;
        let overnight: OvernightPolicy =
            config.overnight().map_err(GeneratorError::InvalidConfig)?;

        let mut index = StaffIndex::with_capacity(staff.len());
        let mut profiles = Vec::with_capacity(staff.len());
        for member in &staff {
            if index.insert(&member.id).is_none() {
                return Err(GeneratorError::DuplicateStaffId(member.id.clone()));
            }
            if !member.current_hours.is_finite() || member.current_hours < 0.0 {
                return Err(GeneratorError::InvalidHours {
                    staff_id: member.id.clone(),
                    hours: member.current_hours,
                });
            }
            let availability = member
                .availability
                .iter()
                .map(|d| parse_date(d))
                .collect::<Result<FxHashSet<_>, _>>()
                .map_err(|source| GeneratorError::InvalidAvailability {
                    staff_id: member.id.clone(),
                    source,
                })?;
            profiles.push(StaffProfile {
                skills: member.skills.iter().cloned().collect(),
                availability,
            });
        }

        let mut shifts = Vec::with_capacity(vendors.len());
        for vendor in &vendors {
            let mut parsed = Vec::with_capacity(vendor.requirements.len());
            for (requirement_index, req) in vendor.requirements.iter().enumerate() {
                let shift = ParsedShift::parse(&req.date, &req.start_time, &req.end_time, overnight)
                    .map_err(|source| GeneratorError::InvalidRequirement {
                        vendor_id: vendor.id.clone(),
                        requirement_index,
                        source,
                    })?;
                parsed.push(shift);
            }
            shifts.push(parsed);
        }

        let prior = vendors
            .iter()
            .map(|v| vec![PriorFill::default(); v.requirements.len()])
            .collect();

        Ok(Self {
            vendors,
            staff,
            index,
            profiles,
            shifts,
            prior,
            held: Vec::new(),
            overlap,
            first_assignment_id: config.first_assignment_id.unwrap_or(1),
            verbosity: config.verbosity,
            exclusions: Vec::new(),
        })
    }

    /// Take account of assignments made by earlier passes.
    ///
    /// Each one counts toward the first requirement with the same vendor,
    /// date, times and role that still has headcount left. Its holder is not
    /// offered that requirement again, and under the reject overlap policy
    /// the shift blocks overlapping ones. Hours are not added: they are
    /// expected to be in the staff snapshot already.
    pub fn with_existing(mut self, existing: &[Assignment]) -> Result<Self, GeneratorError> {
        for a in existing {
            let shift =
                ParsedShift::parse(&a.date, &a.start_time, &a.end_time, OvernightPolicy::Wrap)
                    .map_err(|source| GeneratorError::InvalidExisting {
                        assignment_id: a.id,
                        source,
                    })?;
            let holder = self.index.get(&a.staff_id);
            if let Some(idx) = holder {
                self.held.push((idx, shift.window));
            }
            if let Some((vendor_pos, requirement_index)) = self.open_requirement_for(a) {
                let prior = &mut self.prior[vendor_pos][requirement_index];
                prior.count += 1;
                prior.holders.extend(holder);
            }
        }
        Ok(self)
    }

    /// First requirement `a` was made for that is not yet fully held.
    fn open_requirement_for(&self, a: &Assignment) -> Option<(usize, usize)> {
        self.vendors
            .iter()
            .enumerate()
            .filter(|(_, vendor)| vendor.id == a.vendor_id)
            .flat_map(|(vendor_pos, vendor)| {
                vendor
                    .requirements
                    .iter()
                    .enumerate()
                    .map(move |(requirement_index, req)| (vendor_pos, requirement_index, req))
            })
            .find(|&(vendor_pos, requirement_index, req)| {
                req.date == a.date
                    && req.start_time == a.start_time
                    && req.end_time == a.end_time
                    && req.role == a.role
                    && self.prior[vendor_pos][requirement_index].count
                        < req.staff_needed.max(0) as usize
            })
            .map(|(vendor_pos, requirement_index, _)| (vendor_pos, requirement_index))
    }

    /// Run the pass. Calling it again on the same generator yields the same
    /// result, since every run starts from the input snapshot.
    pub fn generate(&mut self) -> GenerationResult {
        let verbosity = self.verbosity;
        self.exclusions.clear();

        let initial_hours = self.staff.iter().map(|s| s.current_hours).collect();
        let mut state = PassState::new(initial_hours, self.first_assignment_id);
        for &(idx, window) in &self.held {
            state.hold(idx, window);
        }
        let mut assignments: Vec<Assignment> = Vec::new();
        let mut fulfillment: Vec<RequirementFulfillment> = Vec::new();

        for (vendor_pos, vendor) in self.vendors.iter().enumerate() {
            log_changes!(verbosity, "Vendor {} ({})", vendor.name, vendor.id);

            for (requirement_index, req) in vendor.requirements.iter().enumerate() {
                let shift = self.shifts[vendor_pos][requirement_index];
                let prior = &self.prior[vendor_pos][requirement_index];
                let (pool, excluded) =
                    self.candidate_pool(vendor, requirement_index, &shift, prior, &state);
                self.exclusions.extend(excluded);

                let headcount = req.staff_needed.max(0) as usize;
                let needed = headcount.saturating_sub(prior.count);
                let take = needed.min(pool.len());

                if prior.count > 0 {
                    log_checks!(
                        verbosity,
                        "  Requirement #{} ({}) already holds {} of {}",
                        requirement_index,
                        req.role,
                        prior.count,
                        headcount
                    );
                }

                log_debug!(
                    verbosity,
                    "  Requirement #{} {} {}-{} {}: pool {:?}",
                    requirement_index,
                    req.date,
                    req.start_time,
                    req.end_time,
                    req.role,
                    pool.iter()
                        .filter_map(|&idx| self.index.resolve(idx))
                        .collect::<Vec<_>>()
                );

                for &idx in &pool[..take] {
                    let member = &self.staff[idx as usize];
                    let id = state.book(idx, shift.window, shift.hours);
                    log_changes!(
                        verbosity,
                        "  Assigned {} to {} on {} {}-{} as {} ({}h, now {}/{})",
                        member.name,
                        vendor.name,
                        req.date,
                        req.start_time,
                        req.end_time,
                        req.role,
                        shift.hours,
                        state.hours(idx),
                        member.max_hours_per_week
                    );
                    assignments.push(Assignment::scheduled(id, member, vendor, req));
                }

                if take < needed {
                    log_checks!(
                        verbosity,
                        "  Shortfall on requirement #{} ({}): filled {} of {}",
                        requirement_index,
                        req.role,
                        prior.count + take,
                        headcount
                    );
                }

                fulfillment.push(RequirementFulfillment {
                    vendor_id: vendor.id.clone(),
                    vendor_name: vendor.name.clone(),
                    requirement_index,
                    date: req.date.clone(),
                    start_time: req.start_time.clone(),
                    end_time: req.end_time.clone(),
                    role: req.role.clone(),
                    staff_needed: req.staff_needed,
                    previously_assigned: prior.count,
                    staff_assigned: take,
                });
            }
        }

        GenerationResult {
            assignments,
            staff_hours: state.hours_by_staff_id(&self.index),
            fulfillment,
        }
    }

    /// Staff members excluded from candidate pools during the last pass.
    pub fn exclusions(&self) -> &[CandidateExclusion] {
        &self.exclusions
    }

    /// Eligible staff for a requirement, in list order, plus the reason each
    /// other staff member was left out.
    fn candidate_pool(
        &self,
        vendor: &Vendor,
        requirement_index: usize,
        shift: &ParsedShift,
        prior: &PriorFill,
        state: &PassState,
    ) -> (Vec<StaffIdx>, Vec<CandidateExclusion>) {
        let req = &vendor.requirements[requirement_index];
        let mut pool = Vec::new();
        let mut excluded = Vec::new();

        for (pos, member) in self.staff.iter().enumerate() {
            let idx = pos as StaffIdx;
            let reason = if prior.holders.contains(&idx) {
                Some(ExclusionReason::AlreadyOnShift)
            } else {
                self.check_candidate(idx, member, &req.role, shift, state)
            };
            match reason {
                None => pool.push(idx),
                Some(reason) => {
                    log_checks!(
                        self.verbosity,
                        "    Skipping {} for {} #{}: {}",
                        member.name,
                        vendor.id,
                        requirement_index,
                        reason
                    );
                    excluded.push(CandidateExclusion::new(
                        vendor.id.clone(),
                        requirement_index,
                        member.id.clone(),
                        reason,
                    ));
                }
            }
        }

        (pool, excluded)
    }

    /// Returns the first failed eligibility check, or `None` if eligible.
    fn check_candidate(
        &self,
        idx: StaffIdx,
        member: &StaffMember,
        role: &str,
        shift: &ParsedShift,
        state: &PassState,
    ) -> Option<ExclusionReason> {
        let profile = &self.profiles[idx as usize];
        if !profile.availability.contains(&shift.date) {
            return Some(ExclusionReason::NotAvailableOnDate);
        }
        if !profile.skills.contains(role) {
            return Some(ExclusionReason::MissingSkill);
        }
        if member.status != StaffStatus::Available {
            return Some(ExclusionReason::Status(member.status));
        }

        let current = state.hours(idx);
        let max = member.max_hours_per_week;
        if current >= max as f64 {
            return Some(ExclusionReason::HoursExhausted { current, max });
        }
        if current + shift.hours as f64 > max as f64 {
            return Some(ExclusionReason::WouldExceedCap {
                current,
                shift: shift.hours,
                max,
            });
        }

        if self.overlap == OverlapPolicy::Reject
            && state.bookings(idx).conflict_with(&shift.window).is_some()
        {
            return Some(ExclusionReason::OverlappingShift);
        }

        None
    }
}

/// Validate the snapshot and run one generation pass.
pub fn generate_assignments(
    vendors: Vec<Vendor>,
    staff: Vec<StaffMember>,
    config: &GeneratorConfig,
) -> Result<GenerationResult, GeneratorError> {
    let mut generator = ShiftGenerator::new(vendors, staff, config)?;
    Ok(generator.generate())
}

/// Like `generate_assignments`, topping up requirements that `existing`
/// assignments already partly hold.
pub fn generate_with_existing(
    vendors: Vec<Vendor>,
    staff: Vec<StaffMember>,
    existing: &[Assignment],
    config: &GeneratorConfig,
) -> Result<GenerationResult, GeneratorError> {
    let mut generator = ShiftGenerator::new(vendors, staff, config)?.with_existing(existing)?;
    Ok(generator.generate())
}
