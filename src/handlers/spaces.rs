use super::Context;
use super::output::{or_dash, print_json, print_table};
use crate::api::Query;
use anyhow::Result;

pub async fn handle_space_members(space: Option<String>, ctx: &Context) -> Result<()> {
    let space = ctx.client.get_space(&ctx.space_id(space)?).await?;
    let memberships = space.get_space_memberships(&Query::new().limit(100)).await?;
    if ctx.json {
        return print_json(&memberships.to_plain_object());
    }
    let rows: Vec<Vec<String>> = memberships
        .iter()
        .map(|m| {
            let roles = if m.admin {
                "admin".to_string()
            } else {
                m.roles.iter().map(|r| r.id()).collect::<Vec<_>>().join(",")
            };
            vec![m.id().to_string(), or_dash(m.user_id()), roles]
        })
        .collect();
    print_table(&["ID", "USER", "ROLES"], &rows);
    Ok(())
}

pub async fn handle_preview_keys(space: Option<String>, ctx: &Context) -> Result<()> {
    let space = ctx.client.get_space(&ctx.space_id(space)?).await?;
    let keys = space.get_preview_api_keys().await?;
    if ctx.json {
        return print_json(&keys.to_plain_object());
    }
    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|key| {
            vec![
                key.id().to_string(),
                key.name.clone(),
                or_dash(key.description.as_deref()),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "DESCRIPTION"], &rows);
    Ok(())
}
