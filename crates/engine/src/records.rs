//! Typed records and their mapping onto documents
//!
//! A [`Record`] is the typed form of one collection's documents. Records and
//! patches cross into the schemaless store through the serde data model:
//! typed value → `serde_json` object → [`Fields`], and back.

use qatrack_core::{to_fields, Document, Error, Fields, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collection holding projects
pub const PROJECT_COLLECTION: &str = "project";

/// Collection holding testcases
pub const TESTCASE_COLLECTION: &str = "testcase";

/// A typed record stored in one collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name
    const COLLECTION: &'static str;
    /// Display name used in messages ("Project")
    const ENTITY: &'static str;

    /// Business rules checked before insert
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Field map for insertion
    fn to_fields(&self) -> Result<Fields> {
        to_fields(self)
    }
}

/// A partial update of a [`Record`]
///
/// Serializes to exactly the supplied keys.
pub trait RecordPatch: Serialize + Sized {
    /// Record this patch applies to
    type Target: Record;

    /// Rules for the supplied fields
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Field map containing only supplied keys
    fn to_fields(&self) -> Result<Fields> {
        to_fields(self)
    }
}

/// A record as persisted: identifier and timestamps around the record fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<R> {
    /// External identifier
    pub id: String,
    /// Record fields
    #[serde(flatten)]
    pub record: R,
    /// Insert time (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last write time (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl<R: Record> Stored<R> {
    /// Map a normalized document onto the typed form
    pub fn from_document(doc: Document) -> Result<Self> {
        let id = doc.id.clone();
        doc.into_record().map_err(|e| {
            Error::internal(format!(
                "{} {} does not match the record shape: {}",
                R::ENTITY,
                id,
                e
            ))
        })
    }
}

impl<R> std::ops::Deref for Stored<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

/// Distinguish an absent key from an explicit `null`
///
/// Used with `#[serde(default)]`: absent → `None`, `null` → `Some(None)`.
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn require_name(entity: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input(format!("{} name must not be empty", entity)));
    }
    Ok(())
}

// =============================================================================
// Project
// =============================================================================

/// Top-level entity, gated by the plan quota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Display name
    pub name: String,
    /// Free text
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    /// Project with a name and no description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Record for Project {
    const COLLECTION: &'static str = PROJECT_COLLECTION;
    const ENTITY: &'static str = "Project";

    fn validate(&self) -> Result<()> {
        require_name(Self::ENTITY, &self.name)
    }
}

/// Partial update of a [`Project`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description; `Some(None)` clears it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub description: Option<Option<String>>,
}

impl RecordPatch for ProjectUpdate {
    type Target = Project;

    fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_name(Project::ENTITY, name),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Testcase
// =============================================================================

/// Outcome of a testcase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestStatus {
    /// Passed
    Pass,
    /// Failed
    Fail,
    /// Not run yet
    #[default]
    Pending,
}

impl TestStatus {
    /// Every status, in display order
    pub const ALL: [TestStatus; 3] = [TestStatus::Pass, TestStatus::Fail, TestStatus::Pending];

    /// Stored form
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "Pass",
            TestStatus::Fail => "Fail",
            TestStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pass" => Ok(TestStatus::Pass),
            "Fail" => Ok(TestStatus::Fail),
            "Pending" => Ok(TestStatus::Pending),
            other => Err(Error::invalid_input(format!(
                "Invalid status '{}'. Expected Pass, Fail or Pending.",
                other
            ))),
        }
    }
}

/// Child of a project, referenced by the project's external identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testcase {
    /// External identifier of the owning project
    pub project_id: String,
    /// Display name
    pub name: String,
    /// Free text
    #[serde(default)]
    pub description: Option<String>,
    /// Outcome
    #[serde(default)]
    pub status: TestStatus,
}

impl Testcase {
    /// Pending testcase with no description
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            description: None,
            status: TestStatus::Pending,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TestStatus) -> Self {
        self.status = status;
        self
    }
}

impl Record for Testcase {
    const COLLECTION: &'static str = TESTCASE_COLLECTION;
    const ENTITY: &'static str = "Testcase";

    fn validate(&self) -> Result<()> {
        require_name(Self::ENTITY, &self.name)
    }
}

/// Partial update of a [`Testcase`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestcaseUpdate {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description; `Some(None)` clears it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub description: Option<Option<String>>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TestStatus>,
}

impl TestcaseUpdate {
    /// Patch setting only the status
    pub fn status(status: TestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl RecordPatch for TestcaseUpdate {
    type Target = Testcase;

    fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_name(Testcase::ENTITY, name),
            None => Ok(()),
        }
    }
}
