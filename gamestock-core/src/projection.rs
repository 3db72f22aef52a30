//! Read-only sorted/filtered views over an entity collection.
//!
//! Projections are recomputed on every call and never touch the source
//! slice. Filtering happens before sorting; sorting is stable.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A value an entity exposes for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// Compared case-insensitively.
    Text(&'a str),
    Number(f64),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Implemented by entities that can be projected.
pub trait Projectable {
    /// Keys `sort_value` understands. Any other key passes through unsorted.
    const SORT_KEYS: &'static [&'static str];

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>>;

    /// Numeric scalar field used by threshold filters.
    fn scalar(&self, field: &str) -> Option<f64>;
}

/// Scalar predicate applied before sorting.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    #[default]
    All,
    /// `field < threshold`
    Below { field: String, threshold: f64 },
    /// `field >= threshold`
    AtLeast { field: String, threshold: f64 },
}

impl Filter {
    /// Listings priced under $30.
    pub fn under30() -> Self {
        Filter::Below {
            field: "price".to_string(),
            threshold: 30.0,
        }
    }

    /// Listings priced at $30 or more; the complement of `under30`.
    pub fn over30() -> Self {
        Filter::AtLeast {
            field: "price".to_string(),
            threshold: 30.0,
        }
    }

    /// Entities without the filtered scalar never match a threshold filter.
    pub fn matches<T: Projectable>(&self, item: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Below { field, threshold } => {
                item.scalar(field).is_some_and(|value| value < *threshold)
            }
            Filter::AtLeast { field, threshold } => {
                item.scalar(field).is_some_and(|value| value >= *threshold)
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Below { field, threshold } => write!(f, "{}<{}", field, threshold),
            Filter::AtLeast { field, threshold } => write!(f, "{}>={}", field, threshold),
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    /// Accepts `all`, `under30`, `over30`, `FIELD<N` and `FIELD>=N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "" | "all" => return Ok(Filter::All),
            "under30" => return Ok(Filter::under30()),
            "over30" => return Ok(Filter::over30()),
            _ => {}
        }

        let invalid = || {
            format!(
                "Invalid filter '{}'. Use all, under30, over30, FIELD<N or FIELD>=N",
                s
            )
        };

        let (field, threshold, below) = if let Some((field, n)) = s.split_once(">=") {
            (field, n, false)
        } else if let Some((field, n)) = s.split_once('<') {
            (field, n, true)
        } else {
            return Err(invalid());
        };

        let field = field.trim().to_lowercase();
        let threshold: f64 = threshold.trim().parse().map_err(|_| invalid())?;
        if field.is_empty() {
            return Err(invalid());
        }

        Ok(if below {
            Filter::Below { field, threshold }
        } else {
            Filter::AtLeast { field, threshold }
        })
    }
}

/// Filters then stably sorts `entities` by `sort_key`.
///
/// An empty or unrecognized key keeps the (filtered) input order.
pub fn project<'a, T: Projectable>(entities: &'a [T], sort_key: &str, filter: &Filter) -> Vec<&'a T> {
    let mut view: Vec<&T> = entities.iter().filter(|e| filter.matches(*e)).collect();

    let key = sort_key.trim().to_lowercase();
    if !T::SORT_KEYS.contains(&key.as_str()) {
        return view;
    }

    view.sort_by(|a, b| match (a.sort_value(&key), b.sort_value(&key)) {
        (Some(x), Some(y)) => x.compare(&y),
        _ => Ordering::Equal,
    });
    view
}
