//! Entity wrapping
//!
//! Every API response is turned into an [`Entity`]: the server-assigned
//! [`Sys`] metadata, the resource data `T`, and the [`HttpClient`] the
//! entity was fetched with. `sys` is only reachable through a shared
//! reference, so it stays exactly as the server sent it until the next
//! fetch or update returns a fresh entity. The data is an owned copy the
//! caller may edit through `DerefMut` before calling `update()`.
//!
//! Resource modules add their mutators as inherent impls on the concrete
//! instantiation, e.g. `impl Entity<TeamProps> { pub async fn update(..) }`.

use super::client::HttpClient;
use super::error::{ApiError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Reference to another resource
///
/// ```json
/// { "sys": { "type": "Link", "linkType": "Space", "id": "yadj1kx9rmg0" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    /// Always `"Link"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind of the linked resource (`Space`, `Team`, `User`, ...)
    pub link_type: String,
    pub id: String,
}

impl Link {
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: link_type.into(),
                id: id.into(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn link_type(&self) -> &str {
        &self.sys.link_type
    }
}

/// Server-assigned metadata shared by all resources
///
/// Only the fields this client reads are typed; anything else the server
/// sends (invitation status, member counts, ...) is kept in `extra` so the
/// plain-object snapshot round-trips it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_counter: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Sys {
    /// Id of `sys.space`
    pub fn space_id(&self) -> Result<&str> {
        link_id(&self.space, "space")
    }

    /// Id of `sys.environment`, defaulting to `master` like the API does
    pub fn environment_id(&self) -> &str {
        self.environment.as_ref().map(Link::id).unwrap_or("master")
    }

    /// Id of `sys.organization`
    pub fn organization_id(&self) -> Result<&str> {
        link_id(&self.organization, "organization")
    }

    /// Id of `sys.team`
    pub fn team_id(&self) -> Result<&str> {
        link_id(&self.team, "team")
    }

    /// Current version, required for optimistic-locking headers
    pub fn require_version(&self) -> Result<u64> {
        self.version.ok_or(ApiError::MissingLink("version"))
    }
}

fn link_id<'a>(link: &'a Option<Link>, name: &'static str) -> Result<&'a str> {
    link.as_ref().map(Link::id).ok_or(ApiError::MissingLink(name))
}

/// Wire shape of a single resource: `sys` next to the resource fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntity<T> {
    pub sys: Sys,
    #[serde(flatten)]
    pub data: T,
}

/// A wrapped API resource
#[derive(Clone)]
pub struct Entity<T> {
    sys: Sys,
    data: T,
    http: HttpClient,
}

/// Wraps a raw response object into an [`Entity`]
pub fn wrap<T>(http: &HttpClient, raw: RawEntity<T>) -> Entity<T> {
    Entity {
        sys: raw.sys,
        data: raw.data,
        http: http.clone(),
    }
}

/// Wraps a raw collection, wrapping every item with the same client
pub fn wrap_collection<T>(http: &HttpClient, raw: RawCollection<T>) -> Collection<T> {
    Collection {
        total: raw.total,
        skip: raw.skip,
        limit: raw.limit,
        items: raw.items.into_iter().map(|item| wrap(http, item)).collect(),
        includes: raw.includes,
    }
}

impl<T> Entity<T> {
    /// Frozen server metadata
    pub fn sys(&self) -> &Sys {
        &self.sys
    }

    /// Shortcut for `sys().id`
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// Resource data
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable resource data, re-sent by a later `update()`
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Client this entity issues its requests through
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Splits the entity back into its wire shape, dropping the client
    pub fn into_raw(self) -> RawEntity<T> {
        RawEntity {
            sys: self.sys,
            data: self.data,
        }
    }

    /// Wraps a response that came back from a request this entity issued
    pub(crate) fn rewrap<U>(&self, raw: RawEntity<U>) -> Entity<U> {
        wrap(&self.http, raw)
    }
}

impl<T: Serialize> Entity<T> {
    /// Snapshot of `{sys, ...data}` with no client attached
    pub fn to_plain_object(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<T: DeserializeOwned> Entity<T> {
    /// Refetches the resource at `path`, returning a fresh entity
    pub(crate) async fn fetch_at(&self, path: &str) -> Result<Entity<T>> {
        let raw: RawEntity<T> = self.http.get(path, None, &[]).await?;
        Ok(self.rewrap(raw))
    }
}

impl<T: Serialize + DeserializeOwned> Entity<T> {
    /// PUTs the data (without `sys`) to `path` with the version header
    pub(crate) async fn put_versioned(
        &self,
        path: &str,
        extra_headers: &[(&'static str, String)],
    ) -> Result<Entity<T>> {
        let version = self.sys.require_version()?;
        let mut headers = vec![(super::client::VERSION_HEADER, version.to_string())];
        headers.extend(extra_headers.iter().cloned());
        let raw: RawEntity<T> = self.http.put(path, Some(&self.data), &headers).await?;
        Ok(self.rewrap(raw))
    }

    /// PUTs to a state endpoint (`/published`, `/archived`) with no body
    pub(crate) async fn put_state(&self, path: &str) -> Result<Entity<T>> {
        let version = self.sys.require_version()?;
        let headers = [(super::client::VERSION_HEADER, version.to_string())];
        let raw: RawEntity<T> = self.http.put::<_, ()>(path, None, &headers).await?;
        Ok(self.rewrap(raw))
    }

    /// DELETEs a state endpoint, returning the entity the API echoes back
    pub(crate) async fn delete_state(&self, path: &str) -> Result<Entity<T>> {
        let raw: RawEntity<T> = self.http.delete_returning(path, &[]).await?;
        Ok(self.rewrap(raw))
    }
}

impl<T> Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Entity<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: Serialize> Serialize for Entity<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Plain<'a, T> {
            sys: &'a Sys,
            #[serde(flatten)]
            data: &'a T,
        }
        Plain {
            sys: &self.sys,
            data: &self.data,
        }
        .serialize(serializer)
    }
}

impl<T: fmt::Debug> fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("sys", &self.sys)
            .field("data", &self.data)
            .finish()
    }
}

// =============================================================================
// Collections
// =============================================================================

/// Wire shape of a paginated collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCollection<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    pub items: Vec<RawEntity<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<serde_json::Value>,
}

/// A page of wrapped entities
#[derive(Debug, Clone)]
pub struct Collection<T> {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub items: Vec<Entity<T>>,
    pub includes: Option<serde_json::Value>,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether items exist beyond this page
    pub fn has_more(&self) -> bool {
        self.skip + (self.items.len() as u64) < self.total
    }

    /// `skip` value of the following page, if there is one
    pub fn next_skip(&self) -> Option<u64> {
        self.has_more().then(|| self.skip + self.items.len() as u64)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity<T>> {
        self.items.iter()
    }
}

impl<T: Serialize> Collection<T> {
    /// Snapshot of the whole page as the API returned it
    pub fn to_plain_object(&self) -> serde_json::Value {
        let mut plain = serde_json::json!({
            "sys": { "type": "Array" },
            "total": self.total,
            "skip": self.skip,
            "limit": self.limit,
            "items": self.items.iter().map(Entity::to_plain_object).collect::<Vec<_>>(),
        });
        if let Some(includes) = &self.includes {
            plain["includes"] = includes.clone();
        }
        plain
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = Entity<T>;
    type IntoIter = std::vec::IntoIter<Entity<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Entity<T>;
    type IntoIter = std::slice::Iter<'a, Entity<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
