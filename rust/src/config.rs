//! Configuration types for the assignment generator.

use pyo3::prelude::*;
use std::fmt;
use std::str::FromStr;

/// How the generator treats a staff member whose already-booked shift in the
/// current pass overlaps the requirement being filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Book overlapping shifts (no double-booking check).
    #[default]
    Allow,
    /// Drop the staff member from the candidate pool.
    Reject,
}

impl OverlapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown overlap policy: {}", other)),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a shift that ends before it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OvernightPolicy {
    /// Fail the pass with an input error.
    Reject,
    /// Treat the shift as ending on the following day.
    #[default]
    Wrap,
}

impl OvernightPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Wrap => "wrap",
        }
    }
}

impl FromStr for OvernightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "wrap" => Ok(Self::Wrap),
            other => Err(format!("unknown overnight shift policy: {}", other)),
        }
    }
}

impl fmt::Display for OvernightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one generation pass.
#[pyclass]
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Double-booking policy: "allow" or "reject"
    #[pyo3(get, set)]
    pub overlap_policy: String,
    /// Overnight shift handling: "wrap" or "reject"
    #[pyo3(get, set)]
    pub overnight_shifts: String,
    /// Id given to the first assignment created by the pass. Unset means 1,
    /// or the next free id when run against a store.
    #[pyo3(get, set)]
    pub first_assignment_id: Option<u64>,
    /// Logging verbosity (0-3), see `logging`
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::default().as_str().to_string(),
            overnight_shifts: OvernightPolicy::default().as_str().to_string(),
            first_assignment_id: None,
            verbosity: 0,
        }
    }
}

impl GeneratorConfig {
    /// Parse the overlap policy string.
    pub fn overlap(&self) -> Result<OverlapPolicy, String> {
        self.overlap_policy.parse()
    }

    /// Parse the overnight shift policy string.
    pub fn overnight(&self) -> Result<OvernightPolicy, String> {
        self.overnight_shifts.parse()
    }

    pub fn with_overlap(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy.as_str().to_string();
        self
    }

    pub fn with_overnight(mut self, policy: OvernightPolicy) -> Self {
        self.overnight_shifts = policy.as_str().to_string();
        self
    }
}

#[pymethods]
impl GeneratorConfig {
    #[new]
    #[pyo3(signature = (
        overlap_policy=None,
        overnight_shifts=None,
        first_assignment_id=None,
        verbosity=None
    ))]
    fn new(
        overlap_policy: Option<String>,
        overnight_shifts: Option<String>,
        first_assignment_id: Option<u64>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            overlap_policy: overlap_policy.unwrap_or(defaults.overlap_policy),
            overnight_shifts: overnight_shifts.unwrap_or(defaults.overnight_shifts),
            first_assignment_id: first_assignment_id.or(defaults.first_assignment_id),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "GeneratorConfig(overlap_policy={:?}, overnight_shifts={:?}, first_assignment_id={:?}, verbosity={})",
            self.overlap_policy,
            self.overnight_shifts,
            self.first_assignment_id,
            crate::logging::level_name(self.verbosity)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = GeneratorConfig::default();
        assert_eq!(config.overlap(), Ok(OverlapPolicy::Allow));
        assert_eq!(config.overnight(), Ok(OvernightPolicy::Wrap));
        assert_eq!(config.first_assignment_id, None);
    }

    #[test]
    fn test_repr_names_verbosity() {
        let config = GeneratorConfig {
            verbosity: 2,
            ..GeneratorConfig::default()
        };
        assert!(config.__repr__().ends_with("first_assignment_id=None, verbosity=checks)"));
    }

    #[test]
    fn test_policy_strings_round_trip() {
        for policy in [OverlapPolicy::Allow, OverlapPolicy::Reject] {
            assert_eq!(policy.as_str().parse::<OverlapPolicy>(), Ok(policy));
        }
        for policy in [OvernightPolicy::Reject, OvernightPolicy::Wrap] {
            assert_eq!(policy.as_str().parse::<OvernightPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let config = GeneratorConfig {
            overlap_policy: "sometimes".to_string(),
            ..GeneratorConfig::default()
        };
        assert!(config.overlap().is_err());
    }

    #[test]
    fn test_builder_helpers() {
        let config = GeneratorConfig::default()
            .with_overlap(OverlapPolicy::Reject)
            .with_overnight(OvernightPolicy::Wrap);
        assert_eq!(config.overlap_policy, "reject");
        assert_eq!(config.overnight_shifts, "wrap");
    }
}
