use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Tender lifecycle bucket used to partition ingestion runs.
///
/// Serialized with the catalog's own wire values (`activas`, `publicada`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "activas")]
    Active,
    #[serde(rename = "publicada")]
    Published,
    #[serde(rename = "cerrada")]
    Closed,
    #[serde(rename = "desierta")]
    Unawarded,
    #[serde(rename = "adjudicada")]
    Awarded,
    #[serde(rename = "revocada")]
    Revoked,
    #[serde(rename = "suspendida")]
    Suspended,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown tender category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Fixed order of a full ingestion sequence.
    pub const SEQUENCE: [Category; 7] = [
        Category::Active,
        Category::Published,
        Category::Closed,
        Category::Unawarded,
        Category::Awarded,
        Category::Revoked,
        Category::Suspended,
    ];

    /// Value expected by the catalog's `estado` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Active => "activas",
            Category::Published => "publicada",
            Category::Closed => "cerrada",
            Category::Unawarded => "desierta",
            Category::Awarded => "adjudicada",
            Category::Revoked => "revocada",
            Category::Suspended => "suspendida",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "activas" | "active" => Ok(Category::Active),
            "publicada" | "published" => Ok(Category::Published),
            "cerrada" | "closed" => Ok(Category::Closed),
            "desierta" | "unawarded" => Ok(Category::Unawarded),
            "adjudicada" | "awarded" => Ok(Category::Awarded),
            "revocada" | "revoked" => Ok(Category::Revoked),
            "suspendida" | "suspended" => Ok(Category::Suspended),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let wire: Vec<&str> = Category::SEQUENCE.iter().map(Category::as_str).collect();
        assert_eq!(
            wire,
            vec![
                "activas",
                "publicada",
                "cerrada",
                "desierta",
                "adjudicada",
                "revocada",
                "suspendida"
            ]
        );
    }

    #[test]
    fn test_parse_wire_and_english_names() {
        assert_eq!("desierta".parse::<Category>(), Ok(Category::Unawarded));
        assert_eq!("Awarded".parse::<Category>(), Ok(Category::Awarded));
        assert!("todos".parse::<Category>().is_err());
    }

    #[test]
    fn test_serializes_as_wire_value() {
        let json = serde_json::to_string(&Category::Revoked).unwrap();
        assert_eq!(json, "\"revocada\"");
    }
}
