//! Classification enums for clients and users.

use serde::{Deserialize, Serialize};

/// Client segment used for grouping and counting clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientSegment {
    /// Individual or small-volume buyers.
    #[default]
    Retail,
    /// Resellers buying in bulk.
    Wholesale,
    /// Companies with contracted accounts.
    Corporate,
}

impl ClientSegment {
    /// All segments in display order.
    pub const ALL: [Self; 3] = [Self::Retail, Self::Wholesale, Self::Corporate];

    /// Stable identifier used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Wholesale => "wholesale",
            Self::Corporate => "corporate",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Retail => "Varejo",
            Self::Wholesale => "Atacado",
            Self::Corporate => "Corporativo",
        }
    }
}

impl std::fmt::Display for ClientSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClientSegment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retail" => Ok(Self::Retail),
            "wholesale" => Ok(Self::Wholesale),
            "corporate" => Ok(Self::Corporate),
            _ => Err(format!("invalid client segment: {s}")),
        }
    }
}

/// User role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access including user management.
    Admin,
    /// Manages clients, products and sales.
    Manager,
    /// Regular operator.
    #[default]
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_roundtrip_str() {
        for segment in ClientSegment::ALL {
            assert_eq!(segment.as_str().parse::<ClientSegment>().unwrap(), segment);
        }
        assert!("vip".parse::<ClientSegment>().is_err());
    }

    #[test]
    fn test_segment_serde() {
        let json = serde_json::to_string(&ClientSegment::Wholesale).unwrap();
        assert_eq!(json, "\"wholesale\"");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("manager".parse::<UserRole>().unwrap(), UserRole::Manager);
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert!("root".parse::<UserRole>().is_err());
    }
}
