//! Resource shapes and the methods bound to them
//!
//! Each module declares the `*Props` data of one REST resource, a type alias
//! for its wrapped [`Entity`](super::entity::Entity), and the mutators the
//! resource supports. Organization, Space and Environment additionally carry
//! the accessor methods for everything nested under them.

pub mod app_definition;
pub mod asset;
pub mod environment;
pub mod organization;
pub mod organization_invitation;
pub mod organization_membership;
pub mod preview_api_key;
pub mod space;
pub mod space_membership;
pub mod team;
pub mod team_membership;
pub mod team_space_membership;
pub mod user;

use super::client::{Headers, HttpClient};
use super::entity::{Collection, Entity, RawCollection, RawEntity, wrap, wrap_collection};
use super::error::Result;
use super::query::Query;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// GET a single resource and wrap it
pub(crate) async fn get_entity<T: DeserializeOwned>(
    http: &HttpClient,
    path: &str,
    headers: Headers<'_>,
) -> Result<Entity<T>> {
    let raw: RawEntity<T> = http.get(path, None, headers).await?;
    Ok(wrap(http, raw))
}

/// GET a collection and wrap every item
pub(crate) async fn get_collection<T: DeserializeOwned>(
    http: &HttpClient,
    path: &str,
    query: Option<&Query>,
    headers: Headers<'_>,
) -> Result<Collection<T>> {
    let raw: RawCollection<T> = http.get(path, query, headers).await?;
    Ok(wrap_collection(http, raw))
}

/// POST a new resource and wrap the created entity
pub(crate) async fn create_entity<T: DeserializeOwned, B: Serialize + ?Sized>(
    http: &HttpClient,
    path: &str,
    data: &B,
    headers: Headers<'_>,
) -> Result<Entity<T>> {
    let raw: RawEntity<T> = http.post(path, data, headers).await?;
    Ok(wrap(http, raw))
}

/// PUT a new resource under a caller-chosen id and wrap it
pub(crate) async fn create_entity_with_id<T: DeserializeOwned, B: Serialize + ?Sized>(
    http: &HttpClient,
    path: &str,
    data: &B,
    headers: Headers<'_>,
) -> Result<Entity<T>> {
    let raw: RawEntity<T> = http.put(path, Some(data), headers).await?;
    Ok(wrap(http, raw))
}
