//! Per-kind rule tables.
//!
//! Each field carries an ordered list of checks; evaluation stops at the
//! first failure for that field.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::entity_store::Catalog;
use crate::models::{Condition, Console, EntityKind, Rating};

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]?[0-9]|2[0-3]):00 - ([01]?[0-9]|2[0-3]):00$").expect("Invalid regex")
});
static HAS_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}").expect("Invalid regex"));
static HAS_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("Invalid regex"));

/// Named patterns, so rule tables can stay `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `H:00 - H:00`, hours 0-23.
    Hours,
    /// At least one letter and at least one digit anywhere.
    LetterAndDigit,
}

impl Pattern {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Pattern::Hours => HOURS_RE.is_match(value),
            Pattern::LetterAndDigit => HAS_LETTER_RE.is_match(value) && HAS_DIGIT_RE.is_match(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Matches(Pattern),
    /// Case-insensitive membership; candidates are lowercased before comparison.
    OneOf(&'static [&'static str]),
    /// Absolute http, https or ftp URL with a host.
    Url,
    Integer,
    Number,
    Positive,
    Range { min: f64, max: f64 },
    /// Identity must be present in the given collection.
    References(EntityKind),
}

impl Check {
    /// Whether `value` (already trimmed) passes. Numeric checks treat an
    /// unparsable value as failing; `Required` is expected to run first.
    pub fn passes(&self, value: &str, catalog: &Catalog) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::MinLen(min) => value.chars().count() >= *min,
            Check::MaxLen(max) => value.chars().count() <= *max,
            Check::Matches(pattern) => pattern.is_match(value),
            Check::OneOf(allowed) => {
                let candidate = value.to_lowercase();
                allowed.contains(&candidate.as_str())
            }
            Check::Url => is_web_url(value),
            Check::Integer => value.parse::<i64>().is_ok(),
            Check::Number => value.parse::<f64>().is_ok_and(f64::is_finite),
            Check::Positive => value.parse::<f64>().is_ok_and(|n| n > 0.0),
            Check::Range { min, max } => value
                .parse::<f64>()
                .is_ok_and(|n| n >= *min && n <= *max),
            Check::References(kind) => value
                .parse::<i64>()
                .is_ok_and(|id| catalog.contains(*kind, id)),
        }
    }
}

fn is_web_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "ftp") && url.host().is_some(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

const fn rule(check: Check, message: &'static str) -> Rule {
    Rule { check, message }
}

pub type FieldRules = (&'static str, &'static [Rule]);

static GAME_RULES: &[FieldRules] = &[
    (
        "title",
        &[
            rule(Check::Required, "Title is required"),
            rule(Check::MinLen(2), "Title must be at least 2 characters"),
            rule(Check::MaxLen(60), "Title must be less than 60 characters"),
        ],
    ),
    (
        "rating",
        &[
            rule(Check::Required, "Rating is required"),
            rule(Check::OneOf(Rating::VALUES), "Rating must be either E, T, or M"),
        ],
    ),
    (
        "console",
        &[
            rule(Check::Required, "Console is required"),
            rule(
                Check::OneOf(Console::VALUES),
                "Console must be either PlayStation, Xbox, PC, or Nintendo Switch",
            ),
        ],
    ),
    (
        "genre",
        &[
            rule(Check::Required, "Genre is required"),
            rule(Check::MinLen(2), "Genre must be more than 2 characters"),
        ],
    ),
    (
        "image",
        &[
            rule(Check::Required, "Image URL is required"),
            rule(Check::Url, "Invalid URL"),
        ],
    ),
];

static STORE_RULES: &[FieldRules] = &[
    (
        "name",
        &[
            rule(Check::Required, "Name is required"),
            rule(Check::MinLen(2), "Name must be at least 2 characters"),
        ],
    ),
    (
        "location",
        &[
            rule(Check::Required, "Location is required"),
            rule(
                Check::Matches(Pattern::LetterAndDigit),
                "Location must include a street number and name",
            ),
        ],
    ),
    (
        "hours",
        &[
            rule(Check::Required, "Hours are required"),
            rule(
                Check::Matches(Pattern::Hours),
                "Hours must look like 9:00 - 21:00",
            ),
        ],
    ),
];

static LISTING_RULES: &[FieldRules] = &[
    (
        "condition",
        &[
            rule(Check::Required, "Condition is required"),
            rule(
                Check::OneOf(Condition::VALUES),
                "Condition must be either New or Used",
            ),
        ],
    ),
    (
        "stock",
        &[
            rule(Check::Required, "Stock is required"),
            rule(Check::Integer, "Stock must be a whole number"),
            rule(
                Check::Range {
                    min: 0.0,
                    max: 100.0,
                },
                "Stock must be between 0 and 100",
            ),
        ],
    ),
    (
        "price",
        &[
            rule(Check::Required, "Price is required"),
            rule(Check::Number, "Price must be a number"),
            rule(Check::Positive, "Price must be greater than 0"),
        ],
    ),
    (
        "game_id",
        &[
            rule(Check::Required, "Game is required"),
            rule(Check::Integer, "Game ID must be a whole number"),
            rule(Check::Positive, "Game ID must be positive"),
            rule(
                Check::References(EntityKind::Games),
                "Selected game does not exist",
            ),
        ],
    ),
    (
        "store_id",
        &[
            rule(Check::Required, "Store is required"),
            rule(Check::Integer, "Store ID must be a whole number"),
            rule(Check::Positive, "Store ID must be positive"),
            rule(
                Check::References(EntityKind::Stores),
                "Selected store does not exist",
            ),
        ],
    ),
];

/// Rule table for a kind, in field order.
pub fn rules_for(kind: EntityKind) -> &'static [FieldRules] {
    match kind {
        EntityKind::Games => GAME_RULES,
        EntityKind::Stores => STORE_RULES,
        EntityKind::Listings => LISTING_RULES,
    }
}
