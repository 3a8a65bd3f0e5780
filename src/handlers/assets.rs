use super::Context;
use super::output::{or_dash, print_json, print_page_footer, print_success, print_table};
use crate::api::{Asset, Environment, ProcessOptions, Query};
use crate::cli::{AssetLocation, AssetsCommand};
use anyhow::Result;

pub async fn handle_assets(command: AssetsCommand, ctx: &Context) -> Result<()> {
    match command {
        AssetsCommand::List {
            location,
            limit,
            skip,
        } => {
            let env = environment(&location, ctx).await?;
            let assets = env.get_assets(&Query::new().limit(limit).skip(skip)).await?;
            if ctx.json {
                return print_json(&assets.to_plain_object());
            }
            let rows: Vec<Vec<String>> = assets.iter().map(asset_row).collect();
            print_table(&["ID", "TITLE", "STATE", "FILES"], &rows);
            print_page_footer(assets.len(), assets.skip, assets.total);
            Ok(())
        }
        AssetsCommand::Get { location, id } => {
            let asset = environment(&location, ctx).await?.get_asset(&id).await?;
            print_json(&asset)
        }
        AssetsCommand::Publish { location, id } => {
            let asset = environment(&location, ctx).await?.get_asset(&id).await?;
            report(ctx, "Published", &asset.publish().await?)
        }
        AssetsCommand::Unpublish { location, id } => {
            let asset = environment(&location, ctx).await?.get_asset(&id).await?;
            report(ctx, "Unpublished", &asset.unpublish().await?)
        }
        AssetsCommand::Archive { location, id } => {
            let asset = environment(&location, ctx).await?.get_asset(&id).await?;
            report(ctx, "Archived", &asset.archive().await?)
        }
        AssetsCommand::Unarchive { location, id } => {
            let asset = environment(&location, ctx).await?.get_asset(&id).await?;
            report(ctx, "Unarchived", &asset.unarchive().await?)
        }
        AssetsCommand::Process {
            location,
            id,
            locale,
        } => {
            let asset = environment(&location, ctx).await?.get_asset(&id).await?;
            let processed = match locale {
                Some(locale) => asset.process_for_locale(&locale, ProcessOptions::default()).await?,
                None => asset.process_for_all_locales(ProcessOptions::default()).await?,
            };
            report(ctx, "Processed", &processed)
        }
    }
}

async fn environment(location: &AssetLocation, ctx: &Context) -> Result<Environment> {
    let space = ctx.client.get_space(&ctx.space_id(location.space.clone())?).await?;
    let env = space
        .get_environment(&ctx.environment_id(location.env.clone()))
        .await?;
    Ok(env)
}

fn report(ctx: &Context, verb: &str, asset: &Asset) -> Result<()> {
    if ctx.json {
        return print_json(asset);
    }
    print_success(&format!(
        "{} asset {} (version {})",
        verb,
        asset.id(),
        asset.sys().version.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
    ));
    Ok(())
}

/// Human readable lifecycle state
pub fn asset_state(asset: &Asset) -> &'static str {
    if asset.is_archived() {
        "archived"
    } else if asset.is_updated() {
        "changed"
    } else if asset.is_published() {
        "published"
    } else {
        "draft"
    }
}

fn asset_row(asset: &Asset) -> Vec<String> {
    let title = asset.fields.title.values().next().map(String::as_str);
    let files = asset
        .fields
        .file
        .iter()
        .map(|(locale, file)| format!("{}:{}", locale, file.file_name))
        .collect::<Vec<_>>()
        .join(" ");
    vec![
        asset.id().to_string(),
        or_dash(title),
        asset_state(asset).to_string(),
        files,
    ]
}
