use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::AppError;

/// Catalog UI context a custom action was triggered from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionContext {
    Asset,
    Collection,
    Bulk,
}

impl ActionContext {
    pub const ALL: [ActionContext; 3] = [
        ActionContext::Asset,
        ActionContext::Collection,
        ActionContext::Bulk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionContext::Asset => "ASSET",
            ActionContext::Collection => "COLLECTION",
            ActionContext::Bulk => "BULK",
        }
    }
}

impl Display for ActionContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionContext {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASSET" => Ok(ActionContext::Asset),
            "COLLECTION" => Ok(ActionContext::Collection),
            "BULK" => Ok(ActionContext::Bulk),
            other => Err(AppError::BadRequest(format!("Invalid context: {}", other))),
        }
    }
}

/// Operation selected by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
}

impl Action {
    /// Map a request path to an action; only the exact paths are recognized.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/add" => Some(Action::Add),
            "/remove" => Some(Action::Remove),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Action::Add => "/add",
            Action::Remove => "/remove",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Action::Add => write!(f, "add"),
            Action::Remove => write!(f, "remove"),
        }
    }
}

/// Inbound JSON body as sent by the catalog, before validation.
///
/// Every field is optional here so that each validation step can report its own
/// failure in order; wrong field types still fail deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionPayload {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub asset_ids: Option<Vec<String>>,
    #[serde(default)]
    pub collection_ids: Option<Vec<String>>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl ActionPayload {
    /// Parse a raw request body. Empty bodies, non-objects and `{}` are rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest("Missing request body".to_string()));
        }

        let value: serde_json::Value = serde_json::from_slice(body)?;
        match value.as_object() {
            Some(map) if map.is_empty() => {
                return Err(AppError::BadRequest("Empty request body".to_string()))
            }
            Some(_) => {}
            None => {
                return Err(AppError::BadRequest(
                    "Request body must be a JSON object".to_string(),
                ))
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// The catalog auth token, if present and non-empty.
    pub fn auth_token(&self) -> Result<&str, AppError> {
        match self.auth_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::BadRequest("Missing auth_token".to_string())),
        }
    }

    pub fn context(&self) -> Result<ActionContext, AppError> {
        self.context
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Missing context".to_string()))?
            .parse()
    }

    /// Finish validation and produce the immutable request.
    pub fn into_request(self) -> Result<ActionRequest, AppError> {
        let context = self.context()?;
        let auth_token = self.auth_token()?.to_string();
        Ok(ActionRequest {
            context,
            asset_ids: self.asset_ids.unwrap_or_default(),
            collection_ids: self.collection_ids.unwrap_or_default(),
            auth_token,
        })
    }
}

/// A validated custom-action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub context: ActionContext,
    pub asset_ids: Vec<String>,
    pub collection_ids: Vec<String>,
    pub auth_token: String,
}

impl ActionRequest {
    pub fn is_empty(&self) -> bool {
        self.asset_ids.is_empty() && self.collection_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_parses_known_values() {
        assert_eq!("ASSET".parse::<ActionContext>().unwrap(), ActionContext::Asset);
        assert_eq!(
            "COLLECTION".parse::<ActionContext>().unwrap(),
            ActionContext::Collection
        );
        assert_eq!("BULK".parse::<ActionContext>().unwrap(), ActionContext::Bulk);
        assert!("asset".parse::<ActionContext>().is_err());
        assert!("".parse::<ActionContext>().is_err());
    }

    #[test]
    fn action_from_path_is_exact() {
        assert_eq!(Action::from_path("/add"), Some(Action::Add));
        assert_eq!(Action::from_path("/remove"), Some(Action::Remove));
        assert_eq!(Action::from_path("/add/"), None);
        assert_eq!(Action::from_path("/"), None);
        assert_eq!(Action::from_path("/delete"), None);
    }

    #[test]
    fn payload_rejects_empty_and_non_object_bodies() {
        assert!(ActionPayload::from_body(b"").is_err());
        assert!(ActionPayload::from_body(b"  ").is_err());
        assert!(ActionPayload::from_body(b"{}").is_err());
        assert!(ActionPayload::from_body(b"[1,2]").is_err());
        assert!(ActionPayload::from_body(b"not json").is_err());
    }

    #[test]
    fn payload_rejects_wrong_field_types() {
        let err = ActionPayload::from_body(br#"{"asset_ids": "abc"}"#).unwrap_err();
        assert_eq!(err.error_type(), "InvalidInput");
    }

    #[test]
    fn payload_into_request_defaults_missing_lists() {
        let payload =
            ActionPayload::from_body(br#"{"context": "ASSET", "auth_token": "tok"}"#).unwrap();
        let request = payload.into_request().unwrap();

        assert_eq!(request.context, ActionContext::Asset);
        assert!(request.asset_ids.is_empty());
        assert!(request.collection_ids.is_empty());
        assert!(request.is_empty());
        assert_eq!(request.auth_token, "tok");
    }

    #[test]
    fn payload_requires_auth_token() {
        let payload = ActionPayload::from_body(br#"{"context": "BULK", "auth_token": ""}"#).unwrap();
        assert!(payload.auth_token().is_err());
    }

    #[test]
    fn payload_with_unknown_context_is_rejected_late() {
        let payload = ActionPayload::from_body(
            br#"{"context": "FOLDER", "auth_token": "tok", "asset_ids": ["a"]}"#,
        )
        .unwrap();
        assert!(payload.auth_token().is_ok());
        assert!(payload.into_request().is_err());
    }
}
