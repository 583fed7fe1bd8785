//! Staff ordering strategies.
//!
//! The generator treats staff list order as the priority order. These helpers
//! let a caller pick that order explicitly before a pass:
//! - `list_order`: keep the directory order
//! - `least_loaded`: fewest hours already committed first
//! - `most_headroom`: most hours left under the weekly cap first
//!
//! Every strategy breaks ties by original list position, so the result is
//! deterministic.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::StaffMember;

/// Errors that can occur during ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    UnknownStrategy(String),
}

impl std::fmt::Display for OrderingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStrategy(s) => write!(f, "Unknown staff ordering strategy: {}", s),
        }
    }
}

impl std::error::Error for OrderingError {}

/// A named ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffOrdering {
    ListOrder,
    LeastLoaded,
    MostHeadroom,
}

impl FromStr for StaffOrdering {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list_order" => Ok(Self::ListOrder),
            "least_loaded" => Ok(Self::LeastLoaded),
            "most_headroom" => Ok(Self::MostHeadroom),
            other => Err(OrderingError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Sort key for staff ordering (lower = offered shifts first).
#[derive(Debug, Clone, PartialEq)]
pub enum StaffSortKey {
    ListOrder { position: usize },
    LeastLoaded { hours: f64, position: usize },
    MostHeadroom { neg_headroom: f64, position: usize },
}

impl StaffSortKey {
    pub fn position(&self) -> usize {
        match self {
            Self::ListOrder { position }
            | Self::LeastLoaded { position, .. }
            | Self::MostHeadroom { position, .. } => *position,
        }
    }
}

/// Compare f64 values for sorting, treating NaN as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl Eq for StaffSortKey {}

impl Ord for StaffSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::ListOrder { position: p1 }, Self::ListOrder { position: p2 }) => p1.cmp(p2),
            (
                Self::LeastLoaded {
                    hours: h1,
                    position: p1,
                },
                Self::LeastLoaded {
                    hours: h2,
                    position: p2,
                },
            ) => cmp_f64(*h1, *h2).then(p1.cmp(p2)),
            (
                Self::MostHeadroom {
                    neg_headroom: h1,
                    position: p1,
                },
                Self::MostHeadroom {
                    neg_headroom: h2,
                    position: p2,
                },
            ) => cmp_f64(*h1, *h2).then(p1.cmp(p2)),

            // Keys from different strategies are never mixed
            _ => self.position().cmp(&other.position()),
        }
    }
}

impl PartialOrd for StaffSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn compute_sort_key(
    position: usize,
    member: &StaffMember,
    strategy: StaffOrdering,
) -> StaffSortKey {
    match strategy {
        StaffOrdering::ListOrder => StaffSortKey::ListOrder { position },
        StaffOrdering::LeastLoaded => StaffSortKey::LeastLoaded {
            hours: member.current_hours,
            position,
        },
        StaffOrdering::MostHeadroom => StaffSortKey::MostHeadroom {
            neg_headroom: -(member.max_hours_per_week as f64 - member.current_hours),
            position,
        },
    }
}

/// Return `staff` reordered by the strategy named `strategy`.
pub fn order_staff(
    staff: Vec<StaffMember>,
    strategy: &str,
) -> Result<Vec<StaffMember>, OrderingError> {
    let strategy: StaffOrdering = strategy.parse()?;

    let mut keys: Vec<StaffSortKey> = staff
        .iter()
        .enumerate()
        .map(|(position, member)| compute_sort_key(position, member, strategy))
        .collect();

    keys.sort();

    let mut slots: Vec<Option<StaffMember>> = staff.into_iter().map(Some).collect();
    Ok(keys
        .iter()
        .filter_map(|key| slots[key.position()].take())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StaffStatus;

    fn make_staff(id: &str, max: u32, current: f64) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            name: id.to_string(),
            skills: vec!["Server".to_string()],
            availability: vec!["2025-11-20".to_string()],
            max_hours_per_week: max,
            current_hours: current,
            status: StaffStatus::Available,
        }
    }

    fn ids(staff: &[StaffMember]) -> Vec<&str> {
        staff.iter().map(|s| s.id.as_str()).collect()
    }

    fn roster() -> Vec<StaffMember> {
        vec![
            make_staff("a", 40, 16.0),
            make_staff("b", 20, 4.0),
            make_staff("c", 45, 0.0),
            make_staff("d", 40, 16.0),
        ]
    }

    #[test]
    fn test_list_order_is_identity() {
        let ordered = order_staff(roster(), "list_order").unwrap();
        assert_eq!(ids(&ordered), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_least_loaded() {
        let ordered = order_staff(roster(), "least_loaded").unwrap();
        // a and d tie on hours and keep their list order
        assert_eq!(ids(&ordered), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_most_headroom() {
        let ordered = order_staff(roster(), "most_headroom").unwrap();
        // headroom: a=24, b=16, c=45, d=24
        assert_eq!(ids(&ordered), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_unknown_strategy_error() {
        let err = order_staff(roster(), "by_rating").unwrap_err();
        assert_eq!(err, OrderingError::UnknownStrategy("by_rating".to_string()));
        assert_eq!(err.to_string(), "Unknown staff ordering strategy: by_rating");
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("least_loaded".parse::<StaffOrdering>(), Ok(StaffOrdering::LeastLoaded));
        assert_eq!(
            "LIST_ORDER".parse::<StaffOrdering>(),
            Err(OrderingError::UnknownStrategy("LIST_ORDER".to_string()))
        );
    }

    #[test]
    fn test_empty_roster() {
        assert!(order_staff(vec![], "least_loaded").unwrap().is_empty());
        assert!(order_staff(vec![], "by_rating").is_err());
    }
}
