//! Individuals, organizations and countries.

use serde::{Deserialize, Serialize};

/// A unique individual: one profile plus every identity merged into it.
///
/// # Examples
///
/// ```
/// use sortinghat_api_rs::models::Individual;
///
/// let json = r#"{
///     "mk": "172188fd88c1df2dd6d187b6f32cb6aced544aee",
///     "isLocked": false,
///     "profile": {"id": "7", "name": "test name"},
///     "identities": [{"uuid": "03b3428e", "name": "test name", "source": "git"}]
/// }"#;
///
/// let individual: Individual = serde_json::from_str(json).unwrap();
/// assert_eq!(individual.display_name(), Some("test name"));
/// assert_eq!(individual.identities.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    /// Main key of the individual.
    pub mk: String,

    /// Locked individuals cannot be edited or merged.
    #[serde(default)]
    pub is_locked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    #[serde(default)]
    pub identities: Vec<Identity>,

    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

impl Individual {
    /// Returns the profile name, falling back to the first named identity.
    pub fn display_name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .or_else(|| self.identities.iter().find_map(|i| i.name.as_deref()))
    }

    /// Returns the distinct sources the individual's identities come from.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = self.identities.iter().map(|i| i.source.as_str()).collect();
        sources.sort_unstable();
        sources.dedup();
        sources
    }
}

/// Profile data of an individual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

/// One identity (account on a data source) of an individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub source: String,
}

/// Affiliation of an individual to an organization over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<OrganizationRef>,
}

/// Organization as referenced from an enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub name: String,
}

/// An organization and its internet domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,

    #[serde(default)]
    pub domains: Vec<Domain>,

    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

impl Organization {
    /// Number of enrollments pointing at this organization.
    pub fn enrollment_count(&self) -> usize {
        self.enrollments.len()
    }

    /// Returns the top domain, if one is flagged.
    pub fn top_domain(&self) -> Option<&Domain> {
        self.domains.iter().find(|d| d.is_top_domain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub domain: String,
    #[serde(default)]
    pub is_top_domain: bool,
}

/// ISO 3166 country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

/// Any record a paginated collection can return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Individual(Individual),
    Organization(Organization),
    Country(Country),
}

impl Entity {
    /// Short human-readable label for listings.
    pub fn label(&self) -> &str {
        match self {
            Entity::Individual(i) => i.display_name().unwrap_or(i.mk.as_str()),
            Entity::Organization(o) => o.name.as_str(),
            Entity::Country(c) => c.name.as_str(),
        }
    }
}

impl From<Individual> for Entity {
    fn from(value: Individual) -> Self {
        Entity::Individual(value)
    }
}

impl From<Organization> for Entity {
    fn from(value: Organization) -> Self {
        Entity::Organization(value)
    }
}

impl From<Country> for Entity {
    fn from(value: Country) -> Self {
        Entity::Country(value)
    }
}
