#![allow(dead_code)]

use cma_client::{ClientApi, ClientParams, create_client};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

pub const ORG_ID: &str = "org-1";
pub const SPACE_ID: &str = "space-1";

/// Client pointed at the mock server, with retries off
pub fn client(server: &MockServer) -> ClientApi {
    create_client(ClientParams::new("CFPAT-test").with_host(server.uri()).with_retry(false, 0)).unwrap()
}

/// Client pointed at the mock server that retries without waiting
pub fn retrying_client(server: &MockServer, limit: u32) -> ClientApi {
    let mut params = ClientParams::new("CFPAT-test").with_host(server.uri()).with_retry(true, limit);
    params.retry_delay = Duration::from_millis(1);
    create_client(params).unwrap()
}

pub fn link(link_type: &str, id: &str) -> Value {
    json!({ "sys": { "type": "Link", "linkType": link_type, "id": id } })
}

pub fn collection(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "sys": { "type": "Array" },
        "total": total,
        "skip": 0,
        "limit": 100,
        "items": items,
    })
}

pub fn organization(id: &str, name: &str) -> Value {
    json!({
        "sys": { "type": "Organization", "id": id, "version": 1 },
        "name": name,
    })
}

pub fn team(id: &str, name: &str, version: u64) -> Value {
    json!({
        "sys": {
            "type": "Team",
            "id": id,
            "version": version,
            "memberCount": 2,
            "organization": link("Organization", ORG_ID),
        },
        "name": name,
        "description": "Editors of the main site",
    })
}

pub fn space(id: &str) -> Value {
    json!({
        "sys": { "type": "Space", "id": id, "version": 4 },
        "name": "Main site",
    })
}

pub fn environment(space_id: &str, id: &str) -> Value {
    json!({
        "sys": { "type": "Environment", "id": id, "space": link("Space", space_id) },
        "name": id,
    })
}

pub fn asset(id: &str, sys_extra: Value, file_url: Option<&str>) -> Value {
    let mut sys = json!({
        "type": "Asset",
        "id": id,
        "version": 3,
        "space": link("Space", SPACE_ID),
        "environment": link("Environment", "master"),
    });
    if let (Some(target), Some(extra)) = (sys.as_object_mut(), sys_extra.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    let mut file = json!({
        "fileName": "cat.jpg",
        "contentType": "image/jpeg",
        "upload": "https://example.com/cat.jpg",
    });
    if let Some(url) = file_url {
        file["url"] = json!(url);
    }
    json!({
        "sys": sys,
        "fields": {
            "title": { "en-US": "Cat" },
            "file": { "en-US": file },
        },
    })
}
