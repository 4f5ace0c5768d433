//! User and group creation

use serde_json::json;

use crate::api::MolgenisClient;
use crate::cli::{AddAction, AddCommand};
use crate::errors::Error;
use crate::output::Output;

pub fn run(cmd: AddCommand, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    match cmd.action {
        AddAction::User { username } => add_user(&username, client, out),
        AddAction::Group { name } => add_group(&name, client, out),
    }
}

fn add_user(username: &str, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    out.info(&format!("Adding user {}", username));

    let url = format!("{}sys_sec_User", client.config().rest1());
    client.post_json(
        &url,
        &json!({
            "username": username,
            "password_": username,
            "Email": format!("{}@molgenis.org", username),
            "active": true
        }),
    )?;

    out.result(json!({"success": true, "username": username}));
    Ok(())
}

fn add_group(name: &str, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    out.info(&format!("Adding group {}", name));

    client.post_json(
        &client.config().group(),
        &json!({"name": name, "label": name}),
    )?;

    out.result(json!({"success": true, "group": name}));
    Ok(())
}
