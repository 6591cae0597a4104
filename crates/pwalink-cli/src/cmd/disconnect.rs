use anyhow::{bail, Result};
use uuid::Uuid;

use pwalink_client::ProjectSiteConnector;

use crate::output;

pub fn run(mut connector: ProjectSiteConnector, project_id: Uuid) -> Result<()> {
    let result = connector.disconnect_project(project_id)?;
    output::print_result(&result)?;

    if !result.is_success() {
        bail!("disconnect failed: {}", result.message());
    }
    Ok(())
}
