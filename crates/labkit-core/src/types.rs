//! Course numbering types.
//!
//! The course is split into three days: labs 1-5, 6-11 and 12-17.
//! `LabMapping` describes a renumbering of lab files after labs are
//! removed from the course.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LabkitError, Result};

// ── Lab Number ────────────────────────────────────────────────────

/// A lab in the verification catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabNumber(pub u32);

impl LabNumber {
    pub const FIRST: u32 = 1;
    pub const LAST: u32 = 17;

    pub fn new(n: u32) -> Result<Self> {
        if (Self::FIRST..=Self::LAST).contains(&n) {
            Ok(Self(n))
        } else {
            Err(LabkitError::InvalidLab(n.to_string()))
        }
    }

    /// Every lab in course order.
    pub fn all() -> impl Iterator<Item = LabNumber> {
        (Self::FIRST..=Self::LAST).map(LabNumber)
    }

    /// The course day this lab is taught on.
    pub fn day(self) -> Day {
        Day::ALL
            .into_iter()
            .find(|d| d.labs().contains(&self.0))
            .unwrap_or(Day::Three)
    }
}

impl fmt::Display for LabNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lab {:02}", self.0)
    }
}

impl FromStr for LabNumber {
    type Err = LabkitError;

    fn from_str(s: &str) -> Result<Self> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| LabkitError::InvalidLab(s.to_string()))?;
        Self::new(n)
    }
}

// ── Day ───────────────────────────────────────────────────────────

/// One of the three course days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    One,
    Two,
    Three,
}

impl Day {
    pub const ALL: [Day; 3] = [Day::One, Day::Two, Day::Three];

    pub fn from_number(n: u32) -> Result<Self> {
        match n {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(LabkitError::InvalidDay(n.to_string())),
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Lab numbers taught on this day.
    pub fn labs(self) -> RangeInclusive<u32> {
        match self {
            Self::One => 1..=5,
            Self::Two => 6..=11,
            Self::Three => 12..=17,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}", self.number())
    }
}

// ── Lab Mapping ───────────────────────────────────────────────────

/// Old-to-new lab numbers plus the labs retired from the course.
///
/// Targets are unique, so the mapping can drive file renames as well as
/// text rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabMapping {
    pairs: BTreeMap<u32, u32>,
    retired: Vec<u32>,
}

impl LabMapping {
    pub fn new(pairs: impl IntoIterator<Item = (u32, u32)>, retired: Vec<u32>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (old, new) in pairs {
            if map.insert(old, new).is_some() {
                return Err(LabkitError::InvalidMapping(format!(
                    "lab {old} is mapped more than once"
                )));
            }
        }

        let mut targets: Vec<u32> = map.values().copied().collect();
        targets.sort_unstable();
        if let Some(w) = targets.windows(2).find(|w| w[0] == w[1]) {
            return Err(LabkitError::InvalidMapping(format!(
                "several labs map to lab {}",
                w[0]
            )));
        }

        Ok(Self {
            pairs: map,
            retired,
        })
    }

    /// The mapping applied when Lab 7 (graph algorithms) and Lab 17
    /// (innovation showcase) were dropped: labs 8-16 each move down one.
    pub fn course_default() -> Self {
        Self {
            pairs: (8..=16).map(|old| (old, old - 1)).collect(),
            retired: vec![16, 17],
        }
    }

    /// Parse `OLD=NEW` entries such as `"8=7"`.
    pub fn from_entries<S: AsRef<str>>(entries: &[S], retired: Vec<u32>) -> Result<Self> {
        let pairs = entries
            .iter()
            .map(|e| parse_entry(e.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(pairs, retired)
    }

    pub fn get(&self, old: u32) -> Option<u32> {
        self.pairs.get(&old).copied()
    }

    /// New number for `n`, or `n` itself when it is not remapped.
    pub fn remap(&self, n: u32) -> u32 {
        self.get(n).unwrap_or(n)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pairs.iter().map(|(o, n)| (*o, *n))
    }

    pub fn retired(&self) -> &[u32] {
        &self.retired
    }

    /// Pairs ordered so that a rename never lands on a file that is still
    /// waiting to be moved. Each round emits the pairs whose target is no
    /// longer a pending source. Pairs caught in a cycle (`3=4`, `4=3`) have
    /// no safe order and are appended as-is for the caller to reject.
    pub fn rename_order(&self) -> Vec<(u32, u32)> {
        let mut pending: Vec<(u32, u32)> = self.pairs().collect();
        let mut order = Vec::with_capacity(pending.len());

        while !pending.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = pending
                .iter()
                .copied()
                .partition(|(_, new)| !pending.iter().any(|(old, _)| old == new));
            if ready.is_empty() {
                order.extend(blocked);
                break;
            }
            order.extend(ready);
            pending = blocked;
        }
        order
    }
}

impl Default for LabMapping {
    fn default() -> Self {
        Self::course_default()
    }
}

impl fmt::Display for LabMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (old, new) in self.pairs() {
            writeln!(f, "  Lab {old} → Lab {new}")?;
        }
        Ok(())
    }
}

fn parse_entry(entry: &str) -> Result<(u32, u32)> {
    let (old, new) = entry
        .split_once('=')
        .ok_or_else(|| LabkitError::InvalidMapping(format!("expected OLD=NEW, got {entry:?}")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| LabkitError::InvalidMapping(format!("not a lab number: {s:?}")))
    };
    Ok((parse(old)?, parse(new)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_number_bounds() {
        assert!(LabNumber::new(0).is_err());
        assert!(LabNumber::new(18).is_err());
        assert_eq!(LabNumber::new(17).unwrap(), LabNumber(17));
        assert_eq!(LabNumber::all().count(), 17);
    }

    #[test]
    fn test_lab_number_display_and_parse() {
        assert_eq!(LabNumber(3).to_string(), "Lab 03");
        assert_eq!(" 12 ".parse::<LabNumber>().unwrap(), LabNumber(12));
        assert!("twelve".parse::<LabNumber>().is_err());
    }

    #[test]
    fn test_day_ranges() {
        assert_eq!(LabNumber(1).day(), Day::One);
        assert_eq!(LabNumber(5).day(), Day::One);
        assert_eq!(LabNumber(6).day(), Day::Two);
        assert_eq!(LabNumber(11).day(), Day::Two);
        assert_eq!(LabNumber(12).day(), Day::Three);
        assert_eq!(LabNumber(17).day(), Day::Three);
        assert!(Day::from_number(4).is_err());
    }

    #[test]
    fn test_course_default_mapping() {
        let m = LabMapping::course_default();
        assert_eq!(m.get(8), Some(7));
        assert_eq!(m.get(16), Some(15));
        assert_eq!(m.get(7), None);
        assert_eq!(m.remap(3), 3);
        assert_eq!(m.retired(), &[16, 17]);
    }

    #[test]
    fn test_rename_order_shifting_down_is_ascending() {
        let order = LabMapping::course_default().rename_order();
        assert_eq!(order.first(), Some(&(8, 7)));
        assert_eq!(order.last(), Some(&(16, 15)));
    }

    #[test]
    fn test_rename_order_shifting_up_is_descending() {
        let m = LabMapping::new([(3, 4), (4, 5)], vec![]).unwrap();
        assert_eq!(m.rename_order(), vec![(4, 5), (3, 4)]);
    }

    #[test]
    fn test_rename_order_mixed_directions() {
        let m = LabMapping::new([(3, 2), (4, 3), (7, 8), (8, 9)], vec![]).unwrap();
        let order = m.rename_order();
        let position = |pair| order.iter().position(|p| *p == pair).unwrap();
        assert_eq!(order.len(), 4);
        assert!(position((3, 2)) < position((4, 3)));
        assert!(position((8, 9)) < position((7, 8)));
    }

    #[test]
    fn test_rename_order_cycle_is_kept() {
        let m = LabMapping::new([(3, 4), (4, 3), (9, 10)], vec![]).unwrap();
        assert_eq!(m.rename_order(), vec![(9, 10), (3, 4), (4, 3)]);
    }

    #[test]
    fn test_from_entries() {
        let m = LabMapping::from_entries(&["8=7", " 9 = 8 "], vec![17]).unwrap();
        assert_eq!(m.get(9), Some(8));
        assert_eq!(m.retired(), &[17]);

        assert!(LabMapping::from_entries(&["8-7"], vec![]).is_err());
        assert!(LabMapping::from_entries(&["x=7"], vec![]).is_err());
    }

    #[test]
    fn test_duplicate_targets_rejected() {
        let err = LabMapping::new([(8, 7), (9, 7)], vec![]).unwrap_err();
        assert!(err.to_string().contains("lab 7"));
    }
}
