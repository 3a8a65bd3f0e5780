//! Entry point bound to the access token: organizations, spaces, current user

use super::client::{ClientParams, HttpClient, encode_segment};
use super::entity::Collection;
use super::error::{ApiError, Result};
use super::query::Query;
use super::resources::organization::{Organization, OrganizationProps};
use super::resources::space::{Space, SpaceProps};
use super::resources::user::User;
use super::resources::{get_collection, get_entity};

/// Page size used when searching the organization list
const ORGANIZATION_PAGE_SIZE: u32 = 100;

/// Builds the HTTP client from `params` and returns the top-level API
pub fn create_client(params: ClientParams) -> Result<ClientApi> {
    let http = HttpClient::new(&params)?;
    log::debug!("created CMA client for {}", http.base_url());
    Ok(ClientApi { http })
}

/// Top-level accessors
#[derive(Debug, Clone)]
pub struct ClientApi {
    http: HttpClient,
}

impl ClientApi {
    /// Wraps an existing HTTP client
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Organizations the token's user belongs to
    ///
    /// Endpoint: GET /organizations
    pub async fn get_organizations(&self) -> Result<Collection<OrganizationProps>> {
        get_collection(&self.http, "organizations", None, &[]).await
    }

    /// There is no single-organization endpoint; the list is searched page
    /// by page instead.
    pub async fn get_organization(&self, id: &str) -> Result<Organization> {
        let mut skip = 0u64;
        loop {
            let query = Query::new()
                .limit(ORGANIZATION_PAGE_SIZE)
                .param("skip", skip.to_string());
            let page: Collection<OrganizationProps> =
                get_collection(&self.http, "organizations", Some(&query), &[]).await?;
            let next = page.next_skip().filter(|_| !page.is_empty());
            if let Some(org) = page.into_iter().find(|org| org.id() == id) {
                return Ok(org);
            }
            match next {
                Some(next) => skip = next,
                None => {
                    return Err(ApiError::NotFound(format!(
                        "No organization was found with the ID {}",
                        id
                    )));
                }
            }
        }
    }

    /// Endpoint: GET /users/me
    pub async fn get_current_user(&self) -> Result<User> {
        get_entity(&self.http, "users/me", &[]).await
    }

    /// Endpoint: GET /spaces
    pub async fn get_spaces(&self, query: &Query) -> Result<Collection<SpaceProps>> {
        get_collection(&self.http, "spaces", Some(query), &[]).await
    }

    /// Endpoint: GET /spaces/:id
    pub async fn get_space(&self, id: &str) -> Result<Space> {
        get_entity(&self.http, &format!("spaces/{}", encode_segment(id)), &[]).await
    }
}
