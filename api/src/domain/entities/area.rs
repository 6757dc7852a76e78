//! Area domain entities
//!
//! Territories, domains and projects share one descriptor shape and differ
//! only by their kind tag. Territories sit at the root; domains and projects
//! belong to exactly one territory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of an area
///
/// Kept as text because clients pass IDs and names through the same
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub String);

impl AreaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AreaId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for AreaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which level of the hierarchy an area lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    Territory,
    Domain,
    Project,
}

impl AreaKind {
    /// Subtype tags registered for this kind
    pub fn supported_types(&self) -> &'static [&'static str] {
        match self {
            AreaKind::Territory => &[SIMPLE_TERRITORY],
            AreaKind::Domain => &["Geology", "Monitoring", "UserAuthority"],
            AreaKind::Project => &[],
        }
    }

    /// Label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            AreaKind::Territory => "Territory",
            AreaKind::Domain => "Domain",
            AreaKind::Project => "Project",
        }
    }
}

impl std::fmt::Display for AreaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaKind::Territory => write!(f, "territory"),
            AreaKind::Domain => write!(f, "domain"),
            AreaKind::Project => write!(f, "project"),
        }
    }
}

impl std::str::FromStr for AreaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "territory" => Ok(AreaKind::Territory),
            "domain" => Ok(AreaKind::Domain),
            "project" => Ok(AreaKind::Project),
            _ => Err(format!("Unknown area kind: {}", s)),
        }
    }
}

/// Type assigned to territories created without one
pub const SIMPLE_TERRITORY: &str = "SimpleTerritory";

/// A stored territory, domain or project descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaDesc {
    #[serde(rename = "ID")]
    pub id: AreaId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(skip)]
    pub kind: AreaKind,
    #[serde(rename = "Type")]
    pub area_type: Option<String>,
    #[serde(rename = "Default")]
    pub is_default: bool,
    #[serde(rename = "ParentID")]
    pub parent_id: Option<AreaId>,
    #[serde(rename = "DbName")]
    pub db_name: String,
}

/// Data needed to store a new area; the ID is generated by the registry
#[derive(Debug, Clone)]
pub struct NewArea {
    pub id: AreaId,
    pub name: String,
    pub kind: AreaKind,
    pub area_type: Option<String>,
    pub is_default: bool,
    pub parent_id: Option<AreaId>,
    pub db_name: String,
}

/// Client-supplied descriptor for `AddTerritory`, `AddDomain` and `AddProject`
///
/// `ParentID` may hold either the ID or the name of the owning territory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaRequest {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Type", default)]
    pub area_type: Option<String>,
    #[serde(rename = "Default", default)]
    pub is_default: bool,
    #[serde(rename = "ParentID", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "DbName", default)]
    pub db_name: Option<String>,
}

/// A territory together with its domains and projects
#[derive(Debug, Clone, Serialize)]
pub struct TerritoryDesc {
    #[serde(flatten)]
    pub area: AreaDesc,
    #[serde(rename = "DomainDescs")]
    pub domains: Vec<AreaDesc>,
    #[serde(rename = "ProjectDescs")]
    pub projects: Vec<AreaDesc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_ids_are_unique() {
        let a = AreaId::new();
        let b = AreaId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn area_kind_display_round_trips() {
        for kind in [AreaKind::Territory, AreaKind::Domain, AreaKind::Project] {
            assert_eq!(kind.to_string().parse::<AreaKind>().unwrap(), kind);
        }
        assert_eq!("DOMAIN".parse::<AreaKind>().unwrap(), AreaKind::Domain);
        assert!("region".parse::<AreaKind>().is_err());
    }

    #[test]
    fn supported_types_per_kind() {
        assert_eq!(AreaKind::Territory.supported_types(), &[SIMPLE_TERRITORY]);
        assert!(AreaKind::Domain.supported_types().contains(&"Monitoring"));
        assert!(AreaKind::Project.supported_types().is_empty());
    }

    #[test]
    fn area_desc_serializes_with_wire_names() {
        let desc = AreaDesc {
            id: AreaId("t-1".to_string()),
            name: "Shanghai".to_string(),
            kind: AreaKind::Territory,
            area_type: Some(SIMPLE_TERRITORY.to_string()),
            is_default: true,
            parent_id: None,
            db_name: "iS3Db".to_string(),
        };

        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["ID"], "t-1");
        assert_eq!(json["Name"], "Shanghai");
        assert_eq!(json["Type"], "SimpleTerritory");
        assert_eq!(json["Default"], true);
        assert!(json["ParentID"].is_null());
        assert_eq!(json["DbName"], "iS3Db");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn area_request_tolerates_missing_fields() {
        let req: AreaRequest = serde_json::from_str(r#"{"Name":"Geo","ParentID":"Shanghai"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Geo"));
        assert_eq!(req.parent_id.as_deref(), Some("Shanghai"));
        assert!(!req.is_default);
        assert!(req.db_name.is_none());
    }
}
