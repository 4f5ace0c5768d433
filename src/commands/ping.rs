//! Server reachability check

use serde_json::json;

use crate::api::MolgenisClient;
use crate::errors::Error;
use crate::output::Output;

pub fn run(client: &MolgenisClient, out: &Output) -> Result<(), Error> {
    out.debug("Fetching server version");
    let version = client.version()?;

    out.result(json!({
        "success": true,
        "host": client.config().host(),
        "version": version
    }));
    Ok(())
}
