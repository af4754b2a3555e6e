use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{NO_DESCRIPTION, NO_INSTRUCTIONS, UNKNOWN};
use crate::error::PayloadError;

// ============================================================================
// National Weather Service API Models
// ============================================================================

/// Top-level body of `/alerts/active/area/{area}`.
///
/// `features` is optional so that a body without it can be told apart from
/// one carrying an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Option<Vec<AlertFeature>>,
}

impl AlertsResponse {
    /// Decodes an upstream body.
    ///
    /// The body, each feature and each `properties` value must be JSON
    /// objects (or null where optional). Serde would otherwise read arrays
    /// positionally into these structs.
    pub fn from_json(body: Value) -> Result<Self, PayloadError> {
        expect_object(&body, "$")?;

        if let Some(Value::Array(features)) = body.get("features") {
            for (i, feature) in features.iter().enumerate() {
                let path = format!("$.features[{}]", i);
                expect_object(feature, &path)?;
                match feature.get("properties") {
                    None | Some(Value::Null) => {}
                    Some(props) => expect_object(props, &format!("{}.properties", path))?,
                }
            }
        }

        Ok(serde_json::from_value(body)?)
    }
}

fn expect_object(value: &Value, path: &str) -> Result<(), PayloadError> {
    let found = match value {
        Value::Object(_) => return Ok(()),
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
    };
    Err(PayloadError::NotAnObject {
        path: path.to_string(),
        found,
    })
}

/// Reads any JSON value as text; null becomes `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: Option<AlertProperties>,
}

/// Alert fields as sent upstream; any of them may be absent or null.
/// Non-string values are kept in their JSON text form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertProperties {
    #[serde(default, deserialize_with = "lenient_string")]
    pub event: Option<String>,
    #[serde(default, rename = "areaDesc", deserialize_with = "lenient_string")]
    pub area_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instruction: Option<String>,
}

/// An alert with every fallback already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub event: String,
    pub area: String,
    pub severity: String,
    pub description: String,
    pub instruction: String,
}

impl AlertProperties {
    /// Substitutes the named default for each missing field
    pub fn resolve(self) -> Alert {
        Alert {
            event: self.event.unwrap_or_else(|| UNKNOWN.to_string()),
            area: self.area_desc.unwrap_or_else(|| UNKNOWN.to_string()),
            severity: self.severity.unwrap_or_else(|| UNKNOWN.to_string()),
            description: self
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            instruction: self
                .instruction
                .unwrap_or_else(|| NO_INSTRUCTIONS.to_string()),
        }
    }
}

impl AlertFeature {
    /// Resolves the feature's properties, treating a missing object as empty
    pub fn alert(&self) -> Alert {
        self.properties.clone().unwrap_or_default().resolve()
    }
}

/// Two-letter state or territory code, uppercased on construction.
///
/// Not checked against a known list; the API reports unknown areas itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// The two-letter state code (e.g. "CA", "NY")
    pub state: String,
}
