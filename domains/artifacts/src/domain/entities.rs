//! Domain entities for the Artifacts domain
//!
//! Artifact and like records are schemaless documents: whatever the client
//! sends is stored verbatim. This module names the fields the service reads
//! or writes and defines the fixed field set applied by owner updates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record. The store identifier is exposed under [`ID_FIELD`].
pub type Document = Map<String, Value>;

/// Key under which the store identifier is returned
pub const ID_FIELD: &str = "_id";

/// Artifact document field names, as sent by the catalog front-end
pub mod fields {
    pub const OWNER_EMAIL: &str = "myEmail";
    pub const NAME: &str = "artifactName";
    pub const IMAGE: &str = "artifactImage";
    pub const TYPE: &str = "artifactType";
    pub const HISTORICAL_CONTEXT: &str = "historicalContext";
    pub const CREATED_AT: &str = "createdAt";
    pub const DISCOVERED_AT: &str = "discoverdAt";
    pub const DISCOVERED_BY: &str = "discoverdBy";
    pub const PRESENT_LOCATION: &str = "presentLocation";
    pub const LIKES: &str = "likes";
}

/// Like document field names
pub mod like_fields {
    /// Identifier of the liked artifact
    pub const ARTIFACT_ID: &str = "id";
    pub const USER_EMAIL: &str = "userEmail";
}

/// The fields an owner update overwrites.
///
/// Every field is always written; a field missing from the request body is
/// stored as `null`. Fields outside this set are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFields {
    #[serde(rename = "artifactName", default)]
    pub name: Value,
    #[serde(rename = "artifactImage", default)]
    pub image: Value,
    #[serde(rename = "artifactType", default)]
    pub kind: Value,
    #[serde(rename = "historicalContext", default)]
    pub historical_context: Value,
    #[serde(rename = "createdAt", default)]
    pub created_at: Value,
    #[serde(rename = "discoverdAt", default)]
    pub discovered_at: Value,
    #[serde(rename = "discoverdBy", default)]
    pub discovered_by: Value,
    #[serde(rename = "presentLocation", default)]
    pub present_location: Value,
}

impl ArtifactFields {
    /// Names of the fixed field set, in write order
    pub const NAMES: [&'static str; 8] = [
        fields::NAME,
        fields::IMAGE,
        fields::TYPE,
        fields::HISTORICAL_CONTEXT,
        fields::CREATED_AT,
        fields::DISCOVERED_AT,
        fields::DISCOVERED_BY,
        fields::PRESENT_LOCATION,
    ];

    /// Patch document containing exactly the fixed field set
    pub fn into_patch(self) -> Document {
        let values = [
            self.name,
            self.image,
            self.kind,
            self.historical_context,
            self.created_at,
            self.discovered_at,
            self.discovered_by,
            self.present_location,
        ];

        Self::NAMES
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// Like count of an artifact.
///
/// Numbers are used as-is and numeric strings are parsed; anything else
/// (missing, null, text) has no count.
pub fn like_count(doc: &Document) -> Option<f64> {
    match doc.get(fields::LIKES)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Display name of an artifact, if it is a string
pub fn artifact_name(doc: &Document) -> Option<&str> {
    doc.get(fields::NAME).and_then(Value::as_str)
}
