//! Role membership

use serde_json::json;

use crate::api::MolgenisClient;
use crate::cli::MakeCommand;
use crate::errors::Error;
use crate::output::Output;

pub fn run(cmd: MakeCommand, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    out.debug(&format!("Resolving group for role {}", cmd.role));
    let group = client.find_group_for_role(&cmd.role)?;

    let role = cmd.role.to_uppercase();
    out.info(&format!("Making user {} a member of role {}", cmd.user, role));

    let url = client.config().member(&group);
    client.post_json(&url, &json!({"username": cmd.user, "roleName": role}))?;

    out.result(json!({
        "success": true,
        "user": cmd.user,
        "role": role,
        "group": group
    }));
    Ok(())
}
