use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Token request rejected ({status}): {code}: {description}")]
    AuthenticationError {
        status: u16,
        code: String,
        description: String,
    },

    #[error("Microsoft Graph returned status {status}: {message}")]
    ServiceError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// 失敗的分類，決定輸出哪一種訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401: 憑證失效或過期
    Unauthorized,
    /// 403: 應用程式權限不足
    Forbidden,
    /// 其他 HTTP 狀態碼
    Status(u16),
    /// 沒有狀態碼 (連線、解碼等)
    Transport,
}

impl GraphError {
    /// 取得伺服器回應的 HTTP 狀態碼 (如果有)
    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::ServiceError { status, .. } => Some(*status),
            GraphError::AuthenticationError { status, .. } => Some(*status),
            GraphError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> FailureKind {
        match self.status() {
            Some(401) => FailureKind::Unauthorized,
            Some(403) => FailureKind::Forbidden,
            Some(code) => FailureKind::Status(code),
            None => FailureKind::Transport,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GraphError::ConfigError { .. }
                | GraphError::MissingConfigError { .. }
                | GraphError::InvalidConfigValueError { .. }
                | GraphError::ConfigValidationError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GraphError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            GraphError::InvalidConfigValueError { field, value, reason } => {
                format!("Setting '{}' has an invalid value '{}': {}", field, value, reason)
            }
            GraphError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            GraphError::ConfigError { message } => format!("Configuration problem: {}", message),
            GraphError::AuthenticationError { code, description, .. } => {
                format!("Could not obtain an access token: {} ({})", code, description)
            }
            other => format!("Error accessing Microsoft Graph: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if self.is_config_error() {
            return "Check the command-line flags, GRAPH_* environment variables, or the TOML config file";
        }

        match self.failure_kind() {
            FailureKind::Unauthorized => {
                "Verify the tenant ID, client ID and client secret; the secret may have expired"
            }
            FailureKind::Forbidden => {
                "Grant the Mail.Read application permission to the app registration and give admin consent"
            }
            FailureKind::Status(404) => "Check that the mailbox address exists in the tenant",
            FailureKind::Status(_) => "Retry later; the service reported a failure",
            FailureKind::Transport => "Check network connectivity and the authority/Graph URLs",
        }
    }
}
