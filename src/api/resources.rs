//! Typed resource and principal operations

use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use super::MolgenisClient;
use crate::errors::Error;

/// Category of manageable platform object. Each type carries a fixed
/// backend entity id, URL path segment and human label; the three are
/// never overridden independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceType {
    EntityType,
    Theme,
    Package,
    Plugin,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::EntityType,
        ResourceType::Theme,
        ResourceType::Package,
        ResourceType::Plugin,
    ];

    /// Backend entity holding this kind of resource.
    pub fn entity_id(self) -> &'static str {
        match self {
            ResourceType::EntityType => "sys_md_EntityType",
            ResourceType::Theme => "sys_set_StyleSheet",
            ResourceType::Package => "sys_md_Package",
            ResourceType::Plugin => "sys_Plugin",
        }
    }

    /// Path segment used by the permission manager.
    pub fn resource_name(self) -> &'static str {
        match self {
            ResourceType::EntityType => "entityclass",
            ResourceType::Theme => "stylesheet",
            ResourceType::Package => "package",
            ResourceType::Plugin => "plugin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceType::EntityType => "Entity Type",
            ResourceType::Theme => "Stylesheet",
            ResourceType::Package => "Package",
            ResourceType::Plugin => "Plugin",
        }
    }
}

/// A user account or role that can be granted permissions. Selects the
/// grant form field and the casing convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrincipalType {
    User,
    Role,
}

impl PrincipalType {
    pub fn as_str(self) -> &'static str {
        match self {
            PrincipalType::User => "user",
            PrincipalType::Role => "role",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TotalResponse {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    #[serde(rename = "molgenisVersion")]
    molgenis_version: String,
}

#[derive(Debug, Deserialize)]
struct GroupsResponse {
    items: Vec<GroupItem>,
}

#[derive(Debug, Deserialize)]
struct GroupItem {
    name: String,
}

impl MolgenisClient {
    fn total(&self, url: &str) -> Result<u64, Error> {
        let body: TotalResponse = self.get(url)?.json()?;
        Ok(body.total)
    }

    /// True iff a resource with this id exists under the given type.
    pub fn resource_exists(
        &self,
        resource_id: &str,
        resource_type: ResourceType,
    ) -> Result<bool, Error> {
        let url = format!(
            "{}{}?q=id=={}",
            self.config().rest2(),
            resource_type.entity_id(),
            resource_id
        );
        Ok(self.total(&url)? > 0)
    }

    /// True iff at least one of the ids exists under the given type.
    pub fn one_resource_exists(
        &self,
        resource_ids: &[&str],
        resource_type: ResourceType,
    ) -> Result<bool, Error> {
        let url = format!(
            "{}{}?q=id=in=({})",
            self.config().rest2(),
            resource_type.entity_id(),
            resource_ids.join(",")
        );
        Ok(self.total(&url)? > 0)
    }

    pub fn ensure_resource_exists(
        &self,
        resource_id: &str,
        resource_type: ResourceType,
    ) -> Result<(), Error> {
        if self.resource_exists(resource_id, resource_type)? {
            Ok(())
        } else {
            Err(Error::NotFound {
                label: resource_type.label().to_string(),
                id: resource_id.to_string(),
            })
        }
    }

    pub fn user_exists(&self, username: &str) -> Result<bool, Error> {
        let url = format!("{}sys_sec_User?q=username=={}", self.config().rest2(), username);
        Ok(self.total(&url)? > 0)
    }

    /// Role names are case-insensitive by convention; the lookup always
    /// upper-cases.
    pub fn role_exists(&self, rolename: &str) -> Result<bool, Error> {
        let url = format!(
            "{}sys_sec_Role?q=name=={}",
            self.config().rest2(),
            rolename.to_uppercase()
        );
        Ok(self.total(&url)? > 0)
    }

    pub fn principal_exists(
        &self,
        name: &str,
        principal_type: PrincipalType,
    ) -> Result<bool, Error> {
        match principal_type {
            PrincipalType::User => self.user_exists(name),
            PrincipalType::Role => self.role_exists(name),
        }
    }

    pub fn ensure_principal_exists(
        &self,
        name: &str,
        principal_type: PrincipalType,
    ) -> Result<(), Error> {
        if self.principal_exists(name, principal_type)? {
            Ok(())
        } else {
            Err(Error::NotFound {
                label: principal_type.as_str().to_string(),
                id: name.to_string(),
            })
        }
    }

    /// Grant a permission on a resource to a user or role. Role names are
    /// upper-cased in the payload; usernames keep their case.
    pub fn grant(
        &self,
        principal_type: PrincipalType,
        principal_name: &str,
        resource_type: ResourceType,
        identifier: &str,
        permission: &str,
    ) -> Result<(), Error> {
        let mut fields = vec![(format!("radio-{}", identifier), permission.to_string())];
        match principal_type {
            PrincipalType::User => {
                fields.push(("username".to_string(), principal_name.to_string()));
            }
            PrincipalType::Role => {
                fields.push(("rolename".to_string(), principal_name.to_uppercase()));
            }
        }

        let url = format!(
            "{}{}/{}",
            self.config().perm(),
            resource_type.resource_name(),
            principal_type.as_str()
        );
        self.post_form(&url, &fields)?;
        Ok(())
    }

    /// Server version string.
    pub fn version(&self) -> Result<String, Error> {
        let url = format!("{}version", self.config().rest2());
        let body: VersionResponse = self.get(&url)?.json()?;
        Ok(body.molgenis_version)
    }

    /// Trigger a server-side import of a remote file. Returns the
    /// response body (the import job reference).
    pub fn import_by_url(&self, params: &[(String, String)]) -> Result<String, Error> {
        let response = self.post_query(&self.config().import_url(), params)?;
        Ok(response.text()?)
    }

    /// Upload and import a local file.
    pub fn import_file(&self, file: &Path, params: &[(String, String)]) -> Result<String, Error> {
        let response = self.post_multipart(&self.config().import_file(), file, params)?;
        Ok(response.text()?)
    }

    /// Find the security group backing a role: the group with the longest
    /// name that prefixes the kebab-cased role name.
    pub fn find_group_for_role(&self, role: &str) -> Result<String, Error> {
        let url = format!("{}sys_sec_Group?attrs=name", self.config().rest2());
        let body: GroupsResponse = self.get(&url)?.json()?;

        let role = lower_kebab(role);
        body.items
            .into_iter()
            .map(|g| g.name)
            .filter(|name| role.starts_with(name.as_str()))
            .max_by_key(|name| name.len())
            .ok_or_else(|| Error::NotFound {
                label: "group".to_string(),
                id: role.clone(),
            })
    }
}

/// "MY_ROLE Name" -> "my-role-name"
pub fn lower_kebab(value: &str) -> String {
    value.to_lowercase().replace([' ', '_'], "-")
}
