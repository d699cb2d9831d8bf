use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header the catalog echoes back on every custom-action call.
pub const SHARED_SECRET_HEADER: &str = "x-bz-secret";

/// A registered catalog custom action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomAction {
    pub id: String,
    pub context: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
}

/// Body of `POST assets/custom_actions/{context}/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomAction {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    pub context: String,
    pub title: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub app_id: String,
}

impl NewCustomAction {
    /// A POST action that carries the shared secret header back to the receiver.
    pub fn post(context: &str, app_id: &str, url: &str, title: &str, shared_secret: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert(SHARED_SECRET_HEADER.to_string(), shared_secret.to_string());
        Self {
            action_type: "POST",
            context: context.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            headers,
            app_id: app_id.to_string(),
        }
    }
}
