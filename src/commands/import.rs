//! Data imports

use std::path::Path;

use serde_json::json;

use crate::api::{MolgenisClient, ResourceType};
use crate::cli::ImportCommand;
use crate::errors::Error;
use crate::output::Output;

pub fn run(cmd: ImportCommand, client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    let mut params = vec![("action".to_string(), "ADD_UPDATE_EXISTING".to_string())];
    if let Some(package) = &cmd.package {
        client.ensure_resource_exists(package, ResourceType::Package)?;
        params.push(("packageId".to_string(), package.clone()));
    }

    let job = if let Some(url) = &cmd.url {
        out.info(&format!("Importing from {}", url));
        params.push(("url".to_string(), url.clone()));
        client.import_by_url(&params)?
    } else {
        // clap guarantees a file when --url is absent
        let file = cmd.file.as_deref().unwrap_or_default();
        out.info(&format!("Importing {}", file));
        client.import_file(Path::new(file), &params)?
    };

    out.result(json!({"success": true, "job": job.trim()}));
    Ok(())
}
