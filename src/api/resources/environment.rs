//! Environments of a space and their asset accessors

use super::asset::{Asset, AssetProps};
use super::{create_entity, create_entity_with_id, get_collection, get_entity};
use crate::api::client::encode_segment;
use crate::api::entity::{Collection, Entity};
use crate::api::error::Result;
use crate::api::query::Query;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProps {
    pub name: String,
    /// Fields the server sends that are not modelled above, sent back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wrapped environment
pub type Environment = Entity<EnvironmentProps>;

impl Entity<EnvironmentProps> {
    fn path(&self, rest: &str) -> Result<String> {
        Ok(format!(
            "spaces/{}/environments/{}/{}",
            encode_segment(self.sys().space_id()?),
            encode_segment(self.id()),
            rest
        ))
    }

    /// Endpoint: GET /spaces/:spaceId/environments/:envId/assets/:id
    pub async fn get_asset(&self, id: &str) -> Result<Asset> {
        get_entity(self.http(), &self.path(&format!("assets/{}", encode_segment(id)))?, &[]).await
    }

    /// Endpoint: GET /spaces/:spaceId/environments/:envId/assets
    pub async fn get_assets(&self, query: &Query) -> Result<Collection<AssetProps>> {
        get_collection(self.http(), &self.path("assets")?, Some(query), &[]).await
    }

    /// Creates an asset with a server-generated id
    ///
    /// Endpoint: POST /spaces/:spaceId/environments/:envId/assets
    pub async fn create_asset(&self, data: &AssetProps) -> Result<Asset> {
        create_entity(self.http(), &self.path("assets")?, data, &[]).await
    }

    /// Endpoint: PUT /spaces/:spaceId/environments/:envId/assets/:id
    pub async fn create_asset_with_id(&self, id: &str, data: &AssetProps) -> Result<Asset> {
        let path = self.path(&format!("assets/{}", encode_segment(id)))?;
        create_entity_with_id(self.http(), &path, data, &[]).await
    }
}
