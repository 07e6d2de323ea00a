//! Mapping of the add/edit instance form onto the registry API payload.
//!
//! The form posts flat string fields (`newName`, `newOrganisms`, ...). The
//! registry API expects an [`InstanceDraft`]: nested location, list-valued
//! organisms and neighbours, and a boolean production flag.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::notice::HomeNotice;

/// Base path of the instance collection on the registry API.
pub const INSTANCES_PATH: &str = "/service/instances";

/// Value of the `_method` override field that turns a submission into an update.
pub const METHOD_OVERRIDE_PUT: &str = "put";

/// `newIsDev` values that mark an instance as a development installation.
pub const DEV_FLAG_VALUES: &[&str] = &["1", "on", "true", "development"];

/// Message shown when an update is submitted without a target identifier.
pub const MISSING_UPDATE_ID: &str = "Missing instance identifier";

/// Raw fields of the add/edit instance form.
///
/// Missing fields deserialize to empty strings so a partially filled form
/// can always be echoed back to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstanceForm {
    #[serde(rename = "newName")]
    pub name: String,
    #[serde(rename = "newUrl")]
    pub url: String,
    #[serde(rename = "newDesc")]
    pub description: String,
    #[serde(rename = "newTwitter")]
    pub twitter: String,
    #[serde(rename = "newLatitude")]
    pub latitude: String,
    #[serde(rename = "newLongitude")]
    pub longitude: String,
    /// Comma-separated organism names, exactly as typed.
    #[serde(rename = "newOrganisms")]
    pub organisms: String,
    /// Comma-separated neighbour names, exactly as typed.
    #[serde(rename = "newNeighbours")]
    pub neighbours: String,
    #[serde(rename = "newIsDev")]
    pub is_dev: Option<String>,
    #[serde(rename = "updateId")]
    pub update_id: Option<String>,
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

/// Geographic location of an instance, forwarded as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

/// Instance representation sent to the registry API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDraft {
    pub name: String,
    pub url: String,
    pub description: String,
    pub twitter: String,
    pub location: Location,
    pub organisms: Vec<String>,
    pub neighbours: Vec<String>,
    pub is_production: bool,
}

/// Which registry API call a submission maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceTarget {
    /// `POST /service/instances`
    Create,
    /// `PUT /service/instances/{id}`
    Update { id: String },
}

impl InstanceForm {
    /// Build the API payload from the submitted fields.
    pub fn to_draft(&self) -> InstanceDraft {
        InstanceDraft {
            name: self.name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            twitter: self.twitter.clone(),
            location: Location {
                latitude: self.latitude.clone(),
                longitude: self.longitude.clone(),
            },
            organisms: split_list(&self.organisms),
            neighbours: split_list(&self.neighbours),
            is_production: !is_development_flag(self.is_dev.as_deref()),
        }
    }

    /// Whether the form carries the `_method=put` override.
    pub fn is_update(&self) -> bool {
        self.method.as_deref() == Some(METHOD_OVERRIDE_PUT)
    }

    /// Whether the development checkbox was ticked.
    pub fn is_development(&self) -> bool {
        is_development_flag(self.is_dev.as_deref())
    }

    /// Resolve the API call this submission targets.
    ///
    /// An update without a non-empty `updateId` is rejected before any call
    /// is made.
    pub fn target(&self) -> Result<InstanceTarget, CoreError> {
        if !self.is_update() {
            return Ok(InstanceTarget::Create);
        }
        match self.update_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(InstanceTarget::Update { id: id.to_string() }),
            _ => Err(CoreError::Validation(MISSING_UPDATE_ID.to_string())),
        }
    }
}

impl InstanceTarget {
    /// Path on the registry API, with the update id encoded as one segment.
    pub fn path(&self) -> String {
        match self {
            Self::Create => INSTANCES_PATH.to_string(),
            Self::Update { id } => format!("{INSTANCES_PATH}/{}", urlencoding::encode(id)),
        }
    }

    /// Notice shown on the home page once the call succeeds.
    pub fn success_notice(&self) -> HomeNotice {
        match self {
            Self::Create => HomeNotice::InstanceAdded,
            Self::Update { .. } => HomeNotice::InstanceUpdated,
        }
    }
}

/// Split a comma-separated form value into its parts, in order.
///
/// An empty input yields an empty list. Parts are not trimmed.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Whether a `newIsDev` value marks a development installation.
pub fn is_development_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| DEV_FLAG_VALUES.contains(&v))
}
