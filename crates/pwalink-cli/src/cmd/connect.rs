use anyhow::{bail, Result};
use uuid::Uuid;

use pwalink_client::ProjectSiteConnector;

use crate::output;

pub fn run(mut connector: ProjectSiteConnector, project_id: Uuid, site_url: &str) -> Result<()> {
    let result = connector.connect_project(project_id, site_url)?;
    output::print_result(&result)?;

    if !result.is_success() {
        bail!("connect failed: {}", result.message());
    }
    Ok(())
}
