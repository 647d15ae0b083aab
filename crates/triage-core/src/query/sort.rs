//! Tri-state column sorting.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::TriageError;
use crate::order::Order;

/// Sortable column of the order view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    /// `orderNumber`, locale-aware string order.
    OrderNumber,
    /// `customer`, locale-aware string order.
    Customer,
    /// `destination`, locale-aware string order.
    Destination,
    /// `status`, by display rank.
    Status,
    /// `totalValue`, numeric.
    Value,
}

impl SortColumn {
    /// All columns in table order.
    pub const ALL: [Self; 5] =
        [Self::OrderNumber, Self::Customer, Self::Destination, Self::Status, Self::Value];

    /// Name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderNumber => "orderNumber",
            Self::Customer => "customer",
            Self::Destination => "destination",
            Self::Status => "status",
            Self::Value => "value",
        }
    }

    /// Ascending comparison of two orders on this column.
    #[must_use]
    pub fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            Self::OrderNumber => locale_compare(&a.order_number, &b.order_number),
            Self::Customer => locale_compare(&a.customer, &b.customer),
            Self::Destination => locale_compare(&a.destination, &b.destination),
            Self::Status => a.status.rank().cmp(&b.status.rank()),
            Self::Value => a.total_value.total_cmp(&b.total_value),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                TriageError::InvalidSort(format!(
                    "unknown column '{s}', expected one of orderNumber, customer, destination, status, value"
                ))
            })
    }
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Exact inverse of ascending.
    Desc,
    /// Unsorted: filter output order.
    None,
}

impl SortDirection {
    /// Next direction when the same column is clicked again.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
            Self::None => Self::Asc,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            "none" => Ok(Self::None),
            _ => Err(TriageError::InvalidSort(format!(
                "unknown direction '{s}', expected asc, desc or none"
            ))),
        }
    }
}

/// Sort control state: at most one active column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Active column, if any.
    pub column: Option<SortColumn>,
    /// Direction on that column.
    pub direction: SortDirection,
}

impl SortState {
    /// Sorted by `column` in `direction`.
    #[must_use]
    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column: Some(column), direction }
    }

    /// No sort applied.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { column: None, direction: SortDirection::None }
    }

    /// Applies a header click.
    ///
    /// The same column cycles `asc → desc → none → asc`; a different column
    /// starts at `asc`.
    pub fn click(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.cycle();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Asc;
        }
    }

    /// Whether this state reorders anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }

    /// Comparator for this state, or `None` when unsorted.
    #[must_use]
    pub fn comparator(&self) -> Option<impl Fn(&Order, &Order) -> Ordering + use<>> {
        let column = self.column?;
        let descending = match self.direction {
            SortDirection::Asc => false,
            SortDirection::Desc => true,
            SortDirection::None => return None,
        };
        Some(move |a: &Order, b: &Order| {
            let ordering = column.compare(a, b);
            if descending { ordering.reverse() } else { ordering }
        })
    }
}

impl Default for SortState {
    /// Initial console view: status ascending.
    fn default() -> Self {
        Self::new(SortColumn::Status, SortDirection::Asc)
    }
}

impl FromStr for SortState {
    type Err = TriageError;

    /// Parses `COLUMN[:DIRECTION]`; direction defaults to `asc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((column, direction)) => Ok(Self::new(column.parse()?, direction.parse()?)),
            None => Ok(Self::new(s.parse()?, SortDirection::Asc)),
        }
    }
}

/// Root-locale style collation for Latin names.
///
/// Letters compare on their base form first, so `Å` and `Ä` sit with `A`.
/// Ties fall back to accents (unaccented first) and then case (lowercase
/// first).
fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| b.cmp(a))
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
fn primary_key(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

/// Decomposed and lowercased, marks kept.
fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::OrderStatus;
    use crate::order::test_support::sample_order;

    #[test]
    fn test_click_cycles_same_column() {
        let mut state = SortState::unsorted();
        state.click(SortColumn::Customer);
        assert_eq!(state, SortState::new(SortColumn::Customer, SortDirection::Asc));
        state.click(SortColumn::Customer);
        assert_eq!(state.direction, SortDirection::Desc);
        state.click(SortColumn::Customer);
        assert_eq!(state.direction, SortDirection::None);
        assert!(!state.is_active());
        state.click(SortColumn::Customer);
        assert_eq!(state.direction, SortDirection::Asc);
    }

    #[test]
    fn test_click_other_column_resets_to_asc() {
        let mut state = SortState::new(SortColumn::Value, SortDirection::Desc);
        state.click(SortColumn::Destination);
        assert_eq!(state, SortState::new(SortColumn::Destination, SortDirection::Asc));
    }

    #[test]
    fn test_default_is_status_ascending() {
        let state = SortState::default();
        assert_eq!(state.column, Some(SortColumn::Status));
        assert_eq!(state.direction, SortDirection::Asc);
    }

    #[test]
    fn test_locale_compare_ignores_case() {
        assert_eq!(locale_compare("alpha", "Beta"), Ordering::Less);
        assert_eq!(locale_compare("Zeta", "beta"), Ordering::Greater);
        assert_eq!(locale_compare("oulu", "Oulu"), Ordering::Less);
        assert_eq!(locale_compare("Oulu", "Oulu"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_folds_accents() {
        assert_eq!(locale_compare("Äänekoski", "Borgå"), Ordering::Less);
        assert_eq!(locale_compare("Åbo", "Zeta"), Ordering::Less);
        assert_eq!(locale_compare("Abo", "Åbo"), Ordering::Less);
        assert_eq!(locale_compare("åbo", "Åbo"), Ordering::Less);
        assert_eq!(locale_compare("Åbo", "Åbo"), Ordering::Equal);
        // Precomposed and decomposed forms collate together.
        assert_eq!(primary_key("\u{c5}bo"), primary_key("A\u{30a}bo"));
        assert_eq!(secondary_key("\u{c5}bo"), secondary_key("A\u{30a}bo"));
    }

    #[test]
    fn test_customer_sort_places_accented_names_with_base_letter() {
        let names = ["Zeta Oy", "Åbo Market", "Borgå Deli", "Äänekoski Foods", "Espoo Bakery"];
        let orders: Vec<Order> = names
            .iter()
            .enumerate()
            .map(|(n, name)| {
                let mut order = sample_order(&n.to_string(), OrderStatus::Completed);
                order.customer = (*name).to_string();
                order
            })
            .collect();

        let sorted = crate::query::view(
            &orders,
            crate::query::StatusFilter::All,
            &SortState::new(SortColumn::Customer, SortDirection::Asc),
        );
        let customers: Vec<&str> = sorted.iter().map(|o| o.customer.as_str()).collect();
        assert_eq!(customers, vec!["Äänekoski Foods", "Åbo Market", "Borgå Deli", "Espoo Bakery", "Zeta Oy"]);
    }

    #[test]
    fn test_status_compares_by_rank() {
        let completed = sample_order("1", OrderStatus::Completed);
        let support = sample_order("2", OrderStatus::SupportRequired);
        assert_eq!(SortColumn::Status.compare(&support, &completed), Ordering::Less);
    }

    #[test]
    fn test_value_compares_numerically() {
        let mut small = sample_order("1", OrderStatus::Completed);
        small.total_value = 900.0;
        let mut large = sample_order("2", OrderStatus::Completed);
        large.total_value = 10_000.0;
        assert_eq!(SortColumn::Value.compare(&small, &large), Ordering::Less);
    }

    #[test]
    fn test_parse_sort_spec() {
        let state: SortState = "value:desc".parse().unwrap();
        assert_eq!(state, SortState::new(SortColumn::Value, SortDirection::Desc));

        let state: SortState = "orderNumber".parse().unwrap();
        assert_eq!(state, SortState::new(SortColumn::OrderNumber, SortDirection::Asc));

        assert!(matches!("price".parse::<SortState>(), Err(TriageError::InvalidSort(_))));
        assert!(matches!("value:up".parse::<SortState>(), Err(TriageError::InvalidSort(_))));
    }

    #[test]
    fn test_unsorted_has_no_comparator() {
        assert!(SortState::unsorted().comparator().is_none());
        assert!(SortState::new(SortColumn::Value, SortDirection::None).comparator().is_none());
    }
}
