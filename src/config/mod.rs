#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use toml_config::TomlConfig;

pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";
pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_TOP: u32 = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Graph 單次 $top 的上限
pub const MAX_TOP: u32 = 1000;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Token 取得方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AuthFlow {
    /// Acquire on demand and cache until expiry
    #[default]
    Credential,
    /// Acquire once up front and reuse it
    Confidential,
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFlow::Credential => write!(f, "credential"),
            AuthFlow::Confidential => write!(f, "confidential"),
        }
    }
}

/// Client secret，Debug 輸出時遮蔽
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

impl FromStr for Secret {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// 命令列或環境變數提供的值，優先於設定檔
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<Secret>,
    pub mailbox: Option<String>,
    pub top: Option<u32>,
    pub folder: Option<String>,
    pub authority: Option<String>,
    pub graph_url: Option<String>,
    pub scope: Option<String>,
    pub auth_flow: Option<AuthFlow>,
    pub timeout_seconds: Option<u64>,
}

/// 解析完成的執行設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: Secret,
    pub mailbox: String,
    pub top: u32,
    pub folder: Option<String>,
    pub authority: String,
    pub graph_url: String,
    pub scope: String,
    pub auth_flow: AuthFlow,
    pub timeout_seconds: u64,
}

impl Settings {
    /// 合併順序: 命令列/環境變數 > 設定檔 > 預設值
    pub fn resolve(overrides: SettingsOverrides, file: Option<&TomlConfig>) -> Result<Self> {
        let identity = file.and_then(|f| f.identity.as_ref());
        let mailbox = file.and_then(|f| f.mailbox.as_ref());
        let graph = file.and_then(|f| f.graph.as_ref());

        let tenant_id = overrides
            .tenant_id
            .or_else(|| identity.and_then(|i| i.tenant_id.clone()));
        let client_id = overrides
            .client_id
            .or_else(|| identity.and_then(|i| i.client_id.clone()));
        let client_secret = overrides
            .client_secret
            .or_else(|| identity.and_then(|i| i.client_secret.clone()));
        let address = overrides
            .mailbox
            .or_else(|| mailbox.and_then(|m| m.address.clone()));

        let settings = Self {
            tenant_id: validation::validate_required_field("identity.tenant_id", &tenant_id)?
                .clone(),
            client_id: validation::validate_required_field("identity.client_id", &client_id)?
                .clone(),
            client_secret: validation::validate_required_field(
                "identity.client_secret",
                &client_secret,
            )?
            .clone(),
            mailbox: validation::validate_required_field("mailbox.address", &address)?.clone(),
            top: overrides
                .top
                .or_else(|| mailbox.and_then(|m| m.top))
                .unwrap_or(DEFAULT_TOP),
            folder: overrides
                .folder
                .or_else(|| mailbox.and_then(|m| m.folder.clone())),
            authority: overrides
                .authority
                .or_else(|| identity.and_then(|i| i.authority.clone()))
                .unwrap_or_else(|| DEFAULT_AUTHORITY.to_string()),
            graph_url: overrides
                .graph_url
                .or_else(|| graph.and_then(|g| g.base_url.clone()))
                .unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
            scope: overrides
                .scope
                .or_else(|| identity.and_then(|i| i.scope.clone()))
                .unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_flow: overrides
                .auth_flow
                .or_else(|| identity.and_then(|i| i.auth_flow))
                .unwrap_or_default(),
            timeout_seconds: overrides
                .timeout_seconds
                .or_else(|| graph.and_then(|g| g.timeout_seconds))
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        };

        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("identity.tenant_id", &self.tenant_id)?;
        validation::validate_non_empty_string("identity.client_id", &self.client_id)?;
        validation::validate_non_empty_string("identity.scope", &self.scope)?;
        validation::validate_non_empty_string("mailbox.address", &self.mailbox)?;

        if self.client_secret.expose().trim().is_empty() {
            // 不把 secret 放進錯誤訊息
            return Err(GraphError::ConfigValidationError {
                field: "identity.client_secret".to_string(),
                message: "Value cannot be empty".to_string(),
            });
        }

        if let Some(folder) = &self.folder {
            validation::validate_non_empty_string("mailbox.folder", folder)?;
        }

        validation::validate_url("identity.authority", &self.authority)?;
        validation::validate_url("graph.base_url", &self.graph_url)?;
        validation::validate_range("mailbox.top", self.top, 1, MAX_TOP)?;
        validation::validate_range(
            "graph.timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;

        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn client_secret(&self) -> &str {
        self.client_secret.expose()
    }

    fn authority(&self) -> &str {
        &self.authority
    }

    fn scope(&self) -> &str {
        &self.scope
    }

    fn graph_base_url(&self) -> &str {
        &self.graph_url
    }

    fn mailbox(&self) -> &str {
        &self.mailbox
    }

    fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    fn top(&self) -> u32 {
        self.top
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn auth_flow(&self) -> AuthFlow {
        self.auth_flow
    }
}
