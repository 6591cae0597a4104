use anyhow::{bail, Context, Result};

use pwalink_client::{Credentials, NetworkCredentials, ProjectSiteConnector};

use crate::args::{Cli, Command};

mod connect;
mod disconnect;

pub fn dispatch(cli: Cli) -> Result<()> {
    let connector = build_connector(&cli)?;
    match cli.command {
        Command::Connect {
            project_id,
            site_url,
        } => connect::run(connector, project_id, &site_url),
        Command::Disconnect { project_id } => disconnect::run(connector, project_id),
    }
}

fn build_connector(cli: &Cli) -> Result<ProjectSiteConnector> {
    let Some(pwa_url) = cli.pwa_url.as_deref() else {
        bail!("--pwa-url is required");
    };

    let credentials = match (&cli.username, &cli.password) {
        (Some(username), Some(password)) => {
            let mut cred = NetworkCredentials::new(username, password);
            if let Some(domain) = &cli.domain {
                cred = cred.with_domain(domain);
            }
            Credentials::Explicit(cred)
        }
        (None, None) => Credentials::Ambient,
        _ => bail!("--username and --password must be provided together"),
    };

    ProjectSiteConnector::with_credentials(pwa_url, credentials)
        .context("failed to initialize the connector")
}
