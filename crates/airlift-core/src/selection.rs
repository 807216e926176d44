//! User filter selections.
//!
//! A selection has one [`Constraint`] per filter dimension. Controls that
//! offer an explicit "All" entry and multi-selects left empty both mean
//! "no constraint"; [`Constraint::from_values`] folds those cases into
//! [`Constraint::Any`] so the operators only ever see two shapes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sentinel offered as the first entry of single-choice selectors.
pub const ALL_SENTINEL: &str = "All";

/// Filter dimensions, in the order the sidebar narrows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Country,
    Airport,
    OperationType,
}

impl Dimension {
    pub const ORDER: [Dimension; 3] = [
        Dimension::Country,
        Dimension::Airport,
        Dimension::OperationType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Country => "country",
            Dimension::Airport => "airport",
            Dimension::OperationType => "operation type",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Every row passes.
    #[default]
    Any,
    /// Only rows whose field is one of these values pass.
    OneOf(BTreeSet<String>),
}

impl Constraint {
    /// Build from raw control values. Empty input, or any value equal to the
    /// "All" sentinel, yields [`Constraint::Any`]. Values are trimmed and
    /// blank entries dropped.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for v in values {
            let v = v.as_ref().trim();
            if v.is_empty() {
                continue;
            }
            if v == ALL_SENTINEL {
                return Constraint::Any;
            }
            set.insert(v.to_string());
        }
        if set.is_empty() {
            Constraint::Any
        } else {
            Constraint::OneOf(set)
        }
    }

    /// Single-choice control: `"All"` means unconstrained.
    pub fn single(value: impl AsRef<str>) -> Self {
        Self::from_values([value])
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Constraint::OneOf(_))
    }

    /// Membership test. A null field never satisfies an active constraint.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::OneOf(set) => value.map(|v| set.contains(v)).unwrap_or(false),
        }
    }

    /// True when every row admitted by `self` is also admitted by `other`.
    pub fn is_within(&self, other: &Constraint) -> bool {
        match (self, other) {
            (_, Constraint::Any) => true,
            (Constraint::Any, Constraint::OneOf(_)) => false,
            (Constraint::OneOf(a), Constraint::OneOf(b)) => a.is_subset(b),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            Constraint::Any => Vec::new(),
            Constraint::OneOf(set) => set.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub country: Constraint,
    pub airport: Constraint,
    pub operation_type: Constraint,
}

impl FilterSelection {
    /// Select-all on every dimension.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_country<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.country = Constraint::from_values(values);
        self
    }

    pub fn with_airports<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.airport = Constraint::from_values(values);
        self
    }

    pub fn with_operation_types<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.operation_type = Constraint::from_values(values);
        self
    }

    pub fn constraint(&self, dim: Dimension) -> &Constraint {
        match dim {
            Dimension::Country => &self.country,
            Dimension::Airport => &self.airport,
            Dimension::OperationType => &self.operation_type,
        }
    }

    /// Whether a specific country is chosen; drives the map zoom.
    pub fn has_country(&self) -> bool {
        self.country.is_active()
    }

    pub fn active_dimensions(&self) -> Vec<Dimension> {
        Dimension::ORDER
            .iter()
            .copied()
            .filter(|d| self.constraint(*d).is_active())
            .collect()
    }

    /// True when `self` is at least as strict as `other` on every dimension.
    pub fn is_stricter_than(&self, other: &FilterSelection) -> bool {
        Dimension::ORDER
            .iter()
            .all(|d| self.constraint(*d).is_within(other.constraint(*d)))
    }
}
