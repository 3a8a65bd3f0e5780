//! Assets of an environment
//!
//! Besides update/delete, assets move through a publishing lifecycle
//! (draft → published → updated → archived) and their uploaded files must be
//! processed per locale before they get a CDN url.

use crate::api::client::{VERSION_HEADER, encode_segment};
use crate::api::entity::{Entity, Link};
use crate::api::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Asset data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetProps {
    pub fields: AssetFields,
    /// Tags and concepts attached to the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Localized asset fields, keyed by locale code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub description: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub file: BTreeMap<String, AssetFile>,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// File attached to an asset for one locale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub file_name: String,
    pub content_type: String,
    /// Public URL the server fetches the file from during processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    /// Link to a previously created upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_from: Option<Link>,
    /// CDN url, present once processing finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Size and image dimensions, set by processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AssetFile {
    /// File the server will fetch from `upload_url` when processed
    pub fn from_url(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        upload_url: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            upload: Some(upload_url.into()),
            ..Default::default()
        }
    }

    pub fn is_processed(&self) -> bool {
        self.url.is_some()
    }
}

impl AssetProps {
    /// Sets the title for `locale`
    pub fn with_title(mut self, locale: impl Into<String>, title: impl Into<String>) -> Self {
        self.fields.title.insert(locale.into(), title.into());
        self
    }

    /// Sets the description for `locale`
    pub fn with_description(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.description.insert(locale.into(), text.into());
        self
    }

    /// Attaches `file` for `locale`
    pub fn with_file(mut self, locale: impl Into<String>, file: AssetFile) -> Self {
        self.fields.file.insert(locale.into(), file);
        self
    }
}

/// Polling settings for file processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Wait before each status check
    pub processing_check_wait: Duration,
    /// Number of status checks before giving up
    pub processing_check_retries: u32,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            processing_check_wait: Duration::from_millis(500),
            processing_check_retries: 5,
        }
    }
}

/// Wrapped asset
pub type Asset = Entity<AssetProps>;

impl Entity<AssetProps> {
    fn path(&self) -> Result<String> {
        let sys = self.sys();
        Ok(format!(
            "spaces/{}/environments/{}/assets/{}",
            encode_segment(sys.space_id()?),
            encode_segment(sys.environment_id()),
            encode_segment(self.id())
        ))
    }

    // =========================================================================
    // Lifecycle state
    // =========================================================================

    /// Has a published version
    pub fn is_published(&self) -> bool {
        self.sys().published_version.is_some()
    }

    /// Published, with changes made since
    pub fn is_updated(&self) -> bool {
        match (self.sys().version, self.sys().published_version) {
            (Some(version), Some(published)) => version > published.saturating_add(1),
            _ => false,
        }
    }

    /// Never published
    pub fn is_draft(&self) -> bool {
        self.sys().published_version.is_none()
    }

    pub fn is_archived(&self) -> bool {
        self.sys().archived_version.is_some()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Endpoint: PUT /spaces/:spaceId/environments/:envId/assets/:id
    pub async fn update(&self) -> Result<Asset> {
        self.put_versioned(&self.path()?, &[]).await
    }

    /// Endpoint: DELETE /spaces/:spaceId/environments/:envId/assets/:id
    pub async fn delete(&self) -> Result<()> {
        self.http().delete(&self.path()?, &[]).await
    }

    /// Endpoint: PUT .../assets/:id/published
    pub async fn publish(&self) -> Result<Asset> {
        self.put_state(&format!("{}/published", self.path()?)).await
    }

    /// Endpoint: DELETE .../assets/:id/published
    pub async fn unpublish(&self) -> Result<Asset> {
        self.delete_state(&format!("{}/published", self.path()?)).await
    }

    /// Endpoint: PUT .../assets/:id/archived
    pub async fn archive(&self) -> Result<Asset> {
        self.put_state(&format!("{}/archived", self.path()?)).await
    }

    /// Endpoint: DELETE .../assets/:id/archived
    pub async fn unarchive(&self) -> Result<Asset> {
        self.delete_state(&format!("{}/archived", self.path()?)).await
    }

    // =========================================================================
    // File processing
    // =========================================================================

    /// Triggers processing of the file for `locale` and waits until it has a url
    ///
    /// Endpoint: PUT .../assets/:id/files/:locale/process
    pub async fn process_for_locale(&self, locale: &str, options: ProcessOptions) -> Result<Asset> {
        self.start_processing(locale).await?;
        self.wait_for_processing(&[locale.to_string()], options).await
    }

    /// Triggers processing of every locale that has a file and waits for all of them
    pub async fn process_for_all_locales(&self, options: ProcessOptions) -> Result<Asset> {
        let locales: Vec<String> = self.fields.file.keys().cloned().collect();
        if locales.is_empty() {
            return self.fetch_at(&self.path()?).await;
        }
        for locale in &locales {
            self.start_processing(locale).await?;
        }
        self.wait_for_processing(&locales, options).await
    }

    async fn start_processing(&self, locale: &str) -> Result<()> {
        let version = self.sys().require_version()?;
        let path = format!("{}/files/{}/process", self.path()?, encode_segment(locale));
        log::debug!("processing asset {} for locale {}", self.id(), locale);
        self.http()
            .put_no_content(&path, &[(VERSION_HEADER, version.to_string())])
            .await
    }

    async fn wait_for_processing(&self, locales: &[String], options: ProcessOptions) -> Result<Asset> {
        let path = self.path()?;
        let mut pending = locales.first().cloned().unwrap_or_default();

        for check in 0..options.processing_check_retries {
            tokio::time::sleep(options.processing_check_wait).await;
            let asset = self.fetch_at(&path).await?;
            match first_unprocessed(&asset, locales) {
                None => return Ok(asset),
                Some(locale) => {
                    log::debug!(
                        "asset {} locale {} not processed yet (check {}/{})",
                        self.id(),
                        locale,
                        check + 1,
                        options.processing_check_retries
                    );
                    pending = locale.to_string();
                }
            }
        }

        Err(ApiError::ProcessingTimeout {
            asset_id: self.id().to_string(),
            locale: pending,
        })
    }
}

fn first_unprocessed<'a>(asset: &Asset, locales: &'a [String]) -> Option<&'a str> {
    locales
        .iter()
        .find(|locale| {
            !asset
                .fields
                .file
                .get(locale.as_str())
                .is_some_and(AssetFile::is_processed)
        })
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{ClientParams, HttpClient};
    use crate::api::entity::{RawEntity, wrap};
    use serde_json::json;

    fn asset(sys: serde_json::Value) -> Asset {
        let http = HttpClient::new(&ClientParams::new("token")).unwrap();
        let raw: RawEntity<AssetProps> = serde_json::from_value(json!({
            "sys": sys,
            "fields": {
                "title": { "en-US": "Cat" },
                "file": {
                    "en-US": { "fileName": "cat.jpg", "contentType": "image/jpeg", "url": "//images/cat.jpg" },
                    "de-DE": { "fileName": "katze.jpg", "contentType": "image/jpeg", "upload": "https://example.com/katze.jpg" }
                }
            }
        }))
        .unwrap();
        wrap(&http, raw)
    }

    #[test]
    fn test_draft_state() {
        let draft = asset(json!({ "id": "a1", "type": "Asset", "version": 1 }));
        assert!(draft.is_draft());
        assert!(!draft.is_published());
        assert!(!draft.is_updated());
        assert!(!draft.is_archived());
    }

    #[test]
    fn test_updated_state_at_max_published_version() {
        let asset = asset(json!({ "id": "a1", "version": u64::MAX, "publishedVersion": u64::MAX }));
        assert!(asset.is_published());
        assert!(!asset.is_updated());
    }

    #[test]
    fn test_published_and_updated_state() {
        let published = asset(json!({ "id": "a1", "version": 2, "publishedVersion": 1 }));
        assert!(published.is_published());
        assert!(!published.is_updated());
        assert!(!published.is_draft());

        let updated = asset(json!({ "id": "a1", "version": 5, "publishedVersion": 1 }));
        assert!(updated.is_published());
        assert!(updated.is_updated());
    }

    #[test]
    fn test_archived_state() {
        let archived = asset(json!({ "id": "a1", "version": 3, "archivedVersion": 2 }));
        assert!(archived.is_archived());
    }

    #[test]
    fn test_first_unprocessed() {
        let a = asset(json!({ "id": "a1" }));
        let locales = vec!["en-US".to_string(), "de-DE".to_string()];
        assert_eq!(first_unprocessed(&a, &locales), Some("de-DE"));
        assert_eq!(first_unprocessed(&a, &locales[..1]), None);
        assert_eq!(first_unprocessed(&a, &["fr-FR".to_string()]), Some("fr-FR"));
    }

    #[test]
    fn test_path_requires_space() {
        let a = asset(json!({ "id": "a1" }));
        assert!(matches!(a.path(), Err(ApiError::MissingLink("space"))));

        let a = asset(json!({
            "id": "a1",
            "space": { "sys": { "type": "Link", "linkType": "Space", "id": "s1" } },
            "environment": { "sys": { "type": "Link", "linkType": "Environment", "id": "staging" } }
        }));
        assert_eq!(a.path().unwrap(), "spaces/s1/environments/staging/assets/a1");
    }

    #[test]
    fn test_builders() {
        let props = AssetProps::default()
            .with_title("en-US", "Logo")
            .with_description("en-US", "Company logo")
            .with_file("en-US", AssetFile::from_url("logo.png", "image/png", "https://example.com/logo.png"));
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value["fields"]["title"]["en-US"], "Logo");
        assert_eq!(value["fields"]["file"]["en-US"]["upload"], "https://example.com/logo.png");
        assert!(value["fields"]["file"]["en-US"].get("url").is_none());
        assert!(value.get("metadata").is_none());
    }
}
