//! Helpers shared by the `create_custom_actions` and `delete_custom_actions` binaries.
//!
//! Both talk to the catalog with CATALOG_APP_ID / CATALOG_TOKEN (legacy ICONIK_ID /
//! ICONIK_TOKEN) and register actions carrying SHARED_SECRET (legacy BZ_SHARED_SECRET).

use anyhow::Context;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use tierlink_catalog::{build_http_client, CatalogClient};
use tierlink_core::models::{Action, ActionContext, CustomAction};
use tierlink_core::normalize_formats;

const DEFAULT_CATALOG_API_URL: &str = "https://app.iconik.io";
const CLIENT_TIMEOUT_SECS: u64 = 60;

/// Required variables as (primary, legacy fallback).
pub const REQUIRED_VARS: [(&str, &str); 3] = [
    ("CATALOG_APP_ID", "ICONIK_ID"),
    ("CATALOG_TOKEN", "ICONIK_TOKEN"),
    ("SHARED_SECRET", "BZ_SHARED_SECRET"),
];

/// Primary names of every required variable set under neither name.
pub fn missing_vars<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARS
        .iter()
        .filter(|(primary, fallback)| {
            lookup(primary)
                .or_else(|| lookup(fallback))
                .filter(|v| !v.is_empty())
                .is_none()
        })
        .map(|(primary, _)| *primary)
        .collect()
}

/// Credentials and endpoint for CLI catalog access.
#[derive(Debug, Clone)]
pub struct CliEnv {
    pub app_id: String,
    pub auth_token: String,
    pub shared_secret: String,
    pub api_url: String,
}

impl CliEnv {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = missing_vars(&lookup);
        if !missing.is_empty() {
            anyhow::bail!("Missing environment variables: {}", missing.join(", "));
        }

        let var = |primary: &str, fallback: &str| {
            lookup(primary)
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(fallback))
                .unwrap_or_default()
        };

        Ok(Self {
            app_id: var("CATALOG_APP_ID", "ICONIK_ID"),
            auth_token: var("CATALOG_TOKEN", "ICONIK_TOKEN"),
            shared_secret: var("SHARED_SECRET", "BZ_SHARED_SECRET"),
            api_url: lookup("CATALOG_API_URL")
                .or_else(|| lookup("ICONIK_API_URL"))
                .unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string()),
        })
    }

    pub fn catalog_client(&self) -> anyhow::Result<CatalogClient> {
        let http = build_http_client(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .context("Failed to create HTTP client")?;
        Ok(CatalogClient::new(
            http,
            &self.api_url,
            &self.app_id,
            &self.auth_token,
        )?)
    }
}

/// The two actions offered in the catalog UI, titled for the edge storage label.
pub fn operations(storage_label: &str) -> [(String, Action); 2] {
    [
        (format!("Add to {}", storage_label), Action::Add),
        (format!("Remove from {}", storage_label), Action::Remove),
    ]
}

fn friendly_format_name(name: &str) -> &str {
    match name {
        "ORIGINAL" => "original",
        "PPRO_PROXY" => "Premiere Pro proxy",
        "EDIT_PROXY" => "edit proxy",
        other => other,
    }
}

/// Insert the format list after the title's verb:
/// `("Add to LucidLink", "ORIGINAL")` becomes `"Add original file(s) to LucidLink"`.
pub fn make_title(title: &str, formats: Option<&str>) -> String {
    let names: Vec<&str> = formats
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(friendly_format_name)
        .collect();

    if names.is_empty() {
        return title.to_string();
    }

    match title.split_once(' ') {
        Some((verb, rest)) => format!("{} {} file(s) {}", verb, names.join(", "), rest),
        None => format!("{} {} file(s)", title, names.join(", ")),
    }
}

/// Resolve `path` against `endpoint` the way a browser resolves a link.
pub fn urljoin(endpoint: &str, path: &str) -> anyhow::Result<Url> {
    let base = Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
    base.join(path)
        .with_context(|| format!("Cannot join {} onto {}", path, endpoint))
}

/// URL registered for one action, carrying the storage ids and optional formats.
pub fn action_url(
    endpoint: &str,
    action: Action,
    b2_storage_id: &str,
    ll_storage_id: &str,
    formats: Option<&str>,
) -> anyhow::Result<Url> {
    let mut url = urljoin(endpoint, action.path())?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("b2_storage_id", b2_storage_id)
            .append_pair("ll_storage_id", ll_storage_id);
        if let Some(formats) = formats.map(normalize_formats).filter(|f| !f.is_empty()) {
            query.append_pair("formats", &formats);
        }
    }
    Ok(url)
}

/// Whether a registered URL's `formats` parameter matches the requested list.
/// With no requested formats, only URLs without the parameter match.
pub fn formats_match(url: &str, formats: Option<&str>) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let registered = parsed
        .query_pairs()
        .find(|(key, _)| key == "formats")
        .map(|(_, value)| normalize_formats(&value));
    let requested = formats.map(normalize_formats).filter(|f| !f.is_empty());

    registered == requested
}

/// Options for [`create_custom_actions`].
#[derive(Debug, Clone)]
pub struct Registration<'a> {
    pub endpoint: &'a str,
    pub b2_storage_id: &'a str,
    pub ll_storage_id: &'a str,
    pub formats: Option<&'a str>,
    pub storage_label: &'a str,
}

/// Register both operations in every context.
pub async fn create_custom_actions(
    client: &CatalogClient,
    env: &CliEnv,
    registration: &Registration<'_>,
) -> anyhow::Result<Vec<CustomAction>> {
    let mut created = Vec::new();

    for (title, action) in operations(registration.storage_label) {
        let url = action_url(
            registration.endpoint,
            action,
            registration.b2_storage_id,
            registration.ll_storage_id,
            registration.formats,
        )?;
        let title = make_title(&title, registration.formats);

        for context in ActionContext::ALL {
            let custom_action = client
                .add_action(
                    context.as_str(),
                    &env.app_id,
                    url.as_str(),
                    &title,
                    &env.shared_secret,
                )
                .await
                .with_context(|| format!("Failed to create {} action '{}'", context, title))?;
            tracing::info!(
                id = %custom_action.id,
                context = %context,
                title = %title,
                url = %url,
                "Created custom action"
            );
            created.push(custom_action);
        }
    }

    Ok(created)
}

/// Delete every registered action pointing at `endpoint` with matching formats.
pub async fn delete_custom_actions(
    client: &CatalogClient,
    endpoint: &str,
    formats: Option<&str>,
) -> anyhow::Result<Vec<CustomAction>> {
    let mut deleted = Vec::new();

    for custom_action in client.get_custom_actions().await? {
        let Some(url) = custom_action.url.as_deref() else {
            continue;
        };
        if !url.starts_with(endpoint) || !formats_match(url, formats) {
            continue;
        }

        client
            .delete_action(&custom_action)
            .await
            .with_context(|| format!("Failed to delete action {}", custom_action.id))?;
        tracing::info!(
            id = %custom_action.id,
            context = %custom_action.context,
            url = %url,
            "Deleted custom action"
        );
        deleted.push(custom_action);
    }

    Ok(deleted)
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
