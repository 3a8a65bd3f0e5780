use super::Context;
use super::output::{or_dash, print_json, print_page_footer, print_success, print_table};
use crate::api::{OrganizationInvitation, OrganizationInvitationProps, Query, TeamProps};
use crate::cli::{InvitationsCommand, OrgsCommand, TeamsCommand};
use anyhow::Result;

pub async fn handle_orgs(command: OrgsCommand, ctx: &Context) -> Result<()> {
    match command {
        OrgsCommand::List => {
            let orgs = ctx.client.get_organizations().await?;
            if ctx.json {
                return print_json(&orgs.to_plain_object());
            }
            let rows: Vec<Vec<String>> = orgs
                .iter()
                .map(|org| vec![org.id().to_string(), org.name.clone()])
                .collect();
            print_table(&["ID", "NAME"], &rows);
            Ok(())
        }
        OrgsCommand::Get { id } => {
            let org = ctx.client.get_organization(&id).await?;
            print_json(&org)
        }
    }
}

pub async fn handle_teams(command: TeamsCommand, ctx: &Context) -> Result<()> {
    match command {
        TeamsCommand::List { org } => {
            let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
            let teams = org.get_teams(&Query::new().limit(100)).await?;
            if ctx.json {
                return print_json(&teams.to_plain_object());
            }
            let rows: Vec<Vec<String>> = teams
                .iter()
                .map(|team| {
                    vec![
                        team.id().to_string(),
                        team.name.clone(),
                        team.member_count().map(|c| c.to_string()).unwrap_or_default(),
                        or_dash(team.description.as_deref()),
                    ]
                })
                .collect();
            print_table(&["ID", "NAME", "MEMBERS", "DESCRIPTION"], &rows);
            print_page_footer(teams.len(), teams.skip, teams.total);
            Ok(())
        }
        TeamsCommand::Create {
            org,
            name,
            description,
        } => {
            let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
            let mut data = TeamProps::new(name);
            data.description = description;
            let team = org.create_team(&data).await?;
            if ctx.json {
                return print_json(&team);
            }
            print_success(&format!("Created team {} ({})", team.name, team.id()));
            Ok(())
        }
        TeamsCommand::Delete { org, id } => {
            let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
            let team = org.get_team(&id).await?;
            team.delete().await?;
            print_success(&format!("Deleted team {}", id));
            Ok(())
        }
    }
}

pub async fn handle_members(org: Option<String>, limit: u32, ctx: &Context) -> Result<()> {
    let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
    let memberships = org
        .get_organization_memberships(&Query::new().limit(limit))
        .await?;
    if ctx.json {
        return print_json(&memberships.to_plain_object());
    }
    let rows: Vec<Vec<String>> = memberships
        .iter()
        .map(|m| {
            vec![
                m.id().to_string(),
                or_dash(m.sys().user.as_ref().map(|u| u.id())),
                m.role.clone(),
                if m.status { "active" } else { "inactive" }.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "USER", "ROLE", "STATUS"], &rows);
    print_page_footer(memberships.len(), memberships.skip, memberships.total);
    Ok(())
}

pub async fn handle_invitations(command: InvitationsCommand, ctx: &Context) -> Result<()> {
    match command {
        InvitationsCommand::Create {
            org,
            email,
            first_name,
            last_name,
            role,
        } => {
            let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
            let invitation = org
                .create_organization_invitation(&OrganizationInvitationProps {
                    first_name,
                    last_name,
                    email,
                    role,
                    ..Default::default()
                })
                .await?;
            if ctx.json {
                return print_json(&invitation);
            }
            print_success(&format!("Invited {} as {}", invitation.email, invitation.role));
            print_invitation(&invitation);
            Ok(())
        }
        InvitationsCommand::Get { org, id } => {
            let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
            let invitation = org.get_organization_invitation(&id).await?;
            if ctx.json {
                return print_json(&invitation);
            }
            print_invitation(&invitation);
            Ok(())
        }
    }
}

fn print_invitation(invitation: &OrganizationInvitation) {
    let rows = vec![vec![
        invitation.id().to_string(),
        invitation.email.clone(),
        invitation.role.clone(),
        or_dash(invitation.status()),
        or_dash(invitation.invitation_url()),
    ]];
    print_table(&["ID", "EMAIL", "ROLE", "STATUS", "URL"], &rows);
}

pub async fn handle_app_definitions(org: Option<String>, ctx: &Context) -> Result<()> {
    let org = ctx.client.get_organization(&ctx.organization_id(org)?).await?;
    let definitions = org.get_app_definitions(&Query::new()).await?;
    if ctx.json {
        return print_json(&definitions.to_plain_object());
    }
    let rows: Vec<Vec<String>> = definitions
        .iter()
        .map(|def| {
            vec![
                def.id().to_string(),
                def.name.clone(),
                or_dash(def.src.as_deref()),
                def.locations
                    .iter()
                    .map(|l| l.location.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "SRC", "LOCATIONS"], &rows);
    Ok(())
}
