use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pwalink",
    version,
    about = "Connect projects to site collections through Project Web App"
)]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the Project Web App (e.g. https://server/pwa).
    #[arg(long, global = true)]
    pub pwa_url: Option<String>,

    /// Account name for explicit credentials (requires --password).
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Password for explicit credentials (requires --username).
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Optional account domain, sent as DOMAIN\user.
    #[arg(long, global = true)]
    pub domain: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Connect a project to a site collection.
    Connect {
        /// Project id (UUID).
        project_id: Uuid,

        /// Site collection URL relative to the host (e.g. sites/Team).
        site_url: String,
    },

    /// Disconnect a project from its connected site collection.
    Disconnect {
        /// Project id (UUID).
        project_id: Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_connect() {
        let cli = Cli::try_parse_from([
            "pwalink",
            "--pwa-url",
            "https://server/pwa",
            "connect",
            "12345678-abcd-1234-abcd-12345678abcd",
            "sites/Team",
        ])
        .unwrap();

        assert_eq!(cli.pwa_url.as_deref(), Some("https://server/pwa"));
        match cli.command {
            Command::Connect {
                project_id,
                site_url,
            } => {
                assert_eq!(project_id.to_string(), "12345678-abcd-1234-abcd-12345678abcd");
                assert_eq!(site_url, "sites/Team");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_a_non_uuid_project_id() {
        let result = Cli::try_parse_from(["pwalink", "disconnect", "not-a-uuid"]);
        assert!(result.is_err());
    }
}
