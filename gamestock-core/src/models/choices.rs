//! Enumerated field values. Parsing is case-insensitive; `Display` gives the
//! canonical spelling sent to the server.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    PlayStation,
    Xbox,
    Pc,
    NintendoSwitch,
}

impl Console {
    /// Canonical (lowercase) names.
    pub const VALUES: &'static [&'static str] = &["playstation", "xbox", "pc", "nintendo switch"];
}

impl fmt::Display for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Console::PlayStation => write!(f, "playstation"),
            Console::Xbox => write!(f, "xbox"),
            Console::Pc => write!(f, "pc"),
            Console::NintendoSwitch => write!(f, "nintendo switch"),
        }
    }
}

impl FromStr for Console {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "playstation" => Ok(Console::PlayStation),
            "xbox" => Ok(Console::Xbox),
            "pc" => Ok(Console::Pc),
            "nintendo switch" => Ok(Console::NintendoSwitch),
            _ => Err(format!(
                "Invalid console '{}'. Valid options: PlayStation, Xbox, PC, Nintendo Switch",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Everyone,
    Teen,
    Mature,
}

impl Rating {
    pub const VALUES: &'static [&'static str] = &["e", "t", "m"];
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Everyone => write!(f, "E"),
            Rating::Teen => write!(f, "T"),
            Rating::Mature => write!(f, "M"),
        }
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" => Ok(Rating::Everyone),
            "t" => Ok(Rating::Teen),
            "m" => Ok(Rating::Mature),
            _ => Err(format!("Invalid rating '{}'. Valid options: E, T, M", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub const VALUES: &'static [&'static str] = &["new", "used"];
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::New => write!(f, "New"),
            Condition::Used => write!(f, "Used"),
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            _ => Err(format!("Invalid condition '{}'. Valid options: New, Used", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_canonicalizes_to_lowercase() {
        assert_eq!(Console::from_str("XBOX").unwrap(), Console::Xbox);
        assert_eq!(Console::from_str("xbox").unwrap(), Console::Xbox);
        assert_eq!(
            Console::from_str("Nintendo Switch").unwrap().to_string(),
            "nintendo switch"
        );
        assert!(Console::from_str("dreamcast").is_err());
    }

    #[test]
    fn test_values_match_display() {
        for value in Console::VALUES {
            assert_eq!(Console::from_str(value).unwrap().to_string(), *value);
        }
        for value in Rating::VALUES {
            let rating = Rating::from_str(value).unwrap();
            assert_eq!(rating.to_string().to_lowercase(), *value);
        }
    }

    #[test]
    fn test_rating_and_condition() {
        assert_eq!(Rating::from_str("m").unwrap().to_string(), "M");
        assert_eq!(Condition::from_str("USED").unwrap(), Condition::Used);
        assert_eq!(Condition::New.to_string(), "New");
        assert!(Rating::from_str("AO").is_err());
        assert!(Condition::from_str("").is_err());
    }
}
