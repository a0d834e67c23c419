use crate::config::{AuthFlow, Secret, Settings, SettingsOverrides, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "graph-inbox")]
#[command(about = "List the most recent messages of a mailbox through Microsoft Graph")]
pub struct CliConfig {
    #[arg(long, env = "GRAPH_TENANT_ID")]
    pub tenant_id: Option<String>,

    #[arg(long, env = "GRAPH_CLIENT_ID")]
    pub client_id: Option<String>,

    #[arg(long, env = "GRAPH_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<Secret>,

    #[arg(long, env = "GRAPH_MAILBOX", help = "User principal name or ID of the mailbox")]
    pub mailbox: Option<String>,

    #[arg(long, help = "Number of messages to fetch (default 5)")]
    pub top: Option<u32>,

    #[arg(long, help = "Mail folder to read, e.g. inbox")]
    pub folder: Option<String>,

    #[arg(long, env = "GRAPH_AUTHORITY")]
    pub authority: Option<String>,

    #[arg(long, env = "GRAPH_BASE_URL")]
    pub graph_url: Option<String>,

    #[arg(long)]
    pub scope: Option<String>,

    #[arg(long, value_enum)]
    pub auth_flow: Option<AuthFlow>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, short = 'c', help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            tenant_id: self.tenant_id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            mailbox: self.mailbox.clone(),
            top: self.top,
            folder: self.folder.clone(),
            authority: self.authority.clone(),
            graph_url: self.graph_url.clone(),
            scope: self.scope.clone(),
            auth_flow: self.auth_flow,
            timeout_seconds: self.timeout_seconds,
        }
    }

    /// 讀取設定檔 (若有) 並與命令列參數合併
    pub fn load_settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration file: {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        Settings::resolve(self.overrides(), file.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::try_parse_from([
            "graph-inbox",
            "--tenant-id",
            "t",
            "--client-id",
            "c",
            "--client-secret",
            "s",
            "--mailbox",
            "user@example.com",
            "--top",
            "3",
            "--auth-flow",
            "confidential",
        ])
        .unwrap();

        let settings = config.load_settings().unwrap();
        assert_eq!(settings.top, 3);
        assert_eq!(settings.auth_flow, AuthFlow::Confidential);
        assert_eq!(settings.client_secret.expose(), "s");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[identity]
tenant_id = "file-tenant"
client_id = "file-client"
client_secret = "file-secret"

[mailbox]
address = "file@example.com"
folder = "inbox"
"#,
            )
            .unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let config = CliConfig::try_parse_from([
            "graph-inbox",
            "--config",
            path.as_str(),
            "--tenant-id",
            "cli-tenant",
        ])
        .unwrap();

        let settings = config.load_settings().unwrap();
        assert_eq!(settings.tenant_id, "cli-tenant");
        assert_eq!(settings.client_id, "file-client");
        assert_eq!(settings.folder.as_deref(), Some("inbox"));
    }
}
