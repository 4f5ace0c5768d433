//! Permission grants

use serde_json::json;

use crate::api::{MolgenisClient, PrincipalType, ResourceType};
use crate::cli::GiveCommand;
use crate::errors::Error;
use crate::output::Output;

pub fn run(cmd: GiveCommand, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    let principal_type = match cmd.principal_type {
        Some(principal_type) => {
            client.ensure_principal_exists(&cmd.principal, principal_type)?;
            principal_type
        }
        None => detect_principal_type(&cmd.principal, client, out)?,
    };

    let resource_type = match cmd.resource_type {
        Some(resource_type) => {
            client.ensure_resource_exists(&cmd.resource, resource_type)?;
            resource_type
        }
        None => detect_resource_type(&cmd.resource, client, out)?,
    };

    out.info(&format!(
        "Granting {} on {} {} to {} {}",
        cmd.permission,
        resource_type.label(),
        cmd.resource,
        principal_type.as_str(),
        cmd.principal
    ));

    client.grant(
        principal_type,
        &cmd.principal,
        resource_type,
        &cmd.resource,
        &cmd.permission,
    )?;

    out.result(json!({
        "success": true,
        "principal": cmd.principal,
        "principal_type": principal_type.as_str(),
        "resource": cmd.resource,
        "resource_type": resource_type.resource_name(),
        "permission": cmd.permission,
    }));
    Ok(())
}

/// A bare principal name: try users first, then roles.
fn detect_principal_type(
    name: &str,
    client: &MolgenisClient,
    out: &Output,
) -> Result<PrincipalType, Error> {
    out.debug(&format!("Detecting principal type of {}", name));
    if client.user_exists(name)? {
        return Ok(PrincipalType::User);
    }
    if client.role_exists(name)? {
        return Ok(PrincipalType::Role);
    }
    Err(Error::NotFound {
        label: "user or role".to_string(),
        id: name.to_string(),
    })
}

/// Probe every resource type for the identifier; exactly one must match.
fn detect_resource_type(
    resource_id: &str,
    client: &MolgenisClient,
    out: &Output,
) -> Result<ResourceType, Error> {
    out.debug(&format!("Detecting resource type of {}", resource_id));
    let mut found = Vec::new();
    for resource_type in ResourceType::ALL {
        if client.resource_exists(resource_id, resource_type)? {
            found.push(resource_type);
        }
    }
    match found.as_slice() {
        [] => Err(Error::NotFound {
            label: "resource".to_string(),
            id: resource_id.to_string(),
        }),
        [resource_type] => Ok(*resource_type),
        types => Err(Error::Input(format!(
            "{} exists as more than one type ({}); pass --type to disambiguate",
            resource_id,
            types
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}
