//! Thematic filter entries and the per-session filter set.

use std::fmt;
use std::slice;

/// Comparison operator for numeric filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Exact equality.
    Equals,
    /// Strictly less than.
    LessThan,
    /// Less than or equal.
    LessOrEqual,
    /// Strictly greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterOrEqual,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Equals => "=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// The value side of a filter entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Numeric comparison against a single number.
    Comparison {
        /// Comparison operator.
        comparator: Comparator,
        /// Right-hand side value.
        value: f64,
    },
    /// Membership in a set of values (keyword multi-select or text equality).
    Membership {
        /// Selected values; never empty inside a [`FilterSet`].
        values: Vec<String>,
    },
}

/// A single field's active thematic filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    /// Field the filter applies to.
    pub field: String,
    /// Filter value.
    pub value: FilterValue,
}

impl FilterEntry {
    /// Creates a numeric comparison entry.
    pub fn comparison(field: impl Into<String>, comparator: Comparator, value: f64) -> Self {
        Self {
            field: field.into(),
            value: FilterValue::Comparison { comparator, value },
        }
    }

    /// Creates a membership entry over the given values.
    pub fn membership(field: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            value: FilterValue::Membership { values },
        }
    }

    /// Returns true if the entry carries no values and should be dropped.
    fn is_empty(&self) -> bool {
        match &self.value {
            FilterValue::Comparison { .. } => false,
            FilterValue::Membership { values } => values.is_empty(),
        }
    }
}

/// The set of active thematic filters, at most one entry per field.
///
/// Setting a filter for a field that already has one replaces it; setting a
/// membership filter with no values clears the field's entry. Entries keep
/// their insertion order so rebuilt requests are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Active entries in insertion order.
    entries: Vec<FilterEntry>,
}

impl FilterSet {
    /// Sets (or replaces) the filter entry for the entry's field.
    ///
    /// An entry with no values removes the field's filter instead.
    pub fn set(&mut self, entry: FilterEntry) {
        if entry.is_empty() {
            self.clear_field(&entry.field);
            return;
        }
        match self.entries.iter_mut().find(|e| e.field == entry.field) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Removes the filter entry for `field`, if any.
    pub fn clear_field(&mut self, field: &str) {
        self.entries.retain(|e| e.field != field);
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry for `field`, if set.
    pub fn get(&self, field: &str) -> Option<&FilterEntry> {
        self.entries.iter().find(|e| e.field == field)
    }

    /// Returns true if no filters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over active entries in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, FilterEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterEntry;
    type IntoIter = slice::Iter<'a, FilterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_same_field() {
        let mut set = FilterSet::default();
        set.set(FilterEntry::comparison("area", Comparator::LessThan, 10.0));
        set.set(FilterEntry::comparison(
            "area",
            Comparator::GreaterThan,
            20.0,
        ));

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("area").unwrap().value,
            FilterValue::Comparison {
                comparator: Comparator::GreaterThan,
                value: 20.0
            }
        );
    }

    #[test]
    fn set_does_not_touch_other_fields() {
        let mut set = FilterSet::default();
        set.set(FilterEntry::membership("type", vec!["a".into()]));
        set.set(FilterEntry::comparison("area", Comparator::Equals, 1.0));
        set.set(FilterEntry::membership("type", vec!["b".into()]));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get("area").unwrap().value,
            FilterValue::Comparison {
                comparator: Comparator::Equals,
                value: 1.0
            }
        );
    }

    #[test]
    fn empty_membership_clears_entry() {
        let mut set = FilterSet::default();
        set.set(FilterEntry::membership("type", vec!["a".into()]));
        set.set(FilterEntry::membership("type", vec![]));

        assert!(set.is_empty());
        assert!(set.get("type").is_none());
    }

    #[test]
    fn clear_field_only_removes_named_field() {
        let mut set = FilterSet::default();
        set.set(FilterEntry::membership("type", vec!["a".into()]));
        set.set(FilterEntry::comparison("area", Comparator::Equals, 1.0));

        set.clear_field("type");

        assert_eq!(set.len(), 1);
        assert!(set.get("area").is_some());
    }

    #[test]
    fn clear_removes_everything() {
        let mut set = FilterSet::default();
        set.set(FilterEntry::membership("type", vec!["a".into()]));
        set.set(FilterEntry::comparison("area", Comparator::Equals, 1.0));

        set.clear();

        assert!(set.is_empty());
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut set = FilterSet::default();
        set.set(FilterEntry::membership("b", vec!["1".into()]));
        set.set(FilterEntry::membership("a", vec!["2".into()]));

        let fields: Vec<&str> = set.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["b", "a"]);
    }

    #[test]
    fn comparators_display_as_symbols() {
        assert_eq!(Comparator::Equals.to_string(), "=");
        assert_eq!(Comparator::GreaterOrEqual.to_string(), ">=");
        assert_eq!(Comparator::LessThan.to_string(), "<");
    }
}
