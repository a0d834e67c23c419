use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 快取的 token 在到期前多少秒就視為過期
const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub secret: String,
    pub token_type: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_type: token_type.into(),
            expires_at: None,
        }
    }

    pub fn from_response(response: TokenResponse) -> Self {
        let expires_at = response
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));

        Self {
            secret: response.access_token,
            token_type: response.token_type,
            expires_at,
        }
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + Duration::seconds(EXPIRY_SKEW_SECONDS) >= exp)
    }

    /// 只顯示前幾個字元，供日誌與 acquire-token 使用
    pub fn preview(&self, len: usize) -> String {
        let prefix: String = self.secret.chars().take(len).collect();
        format!("{}...", prefix)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token endpoint 成功時的回應
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Token endpoint 失敗時的回應
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailAddress {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: Option<EmailAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub from: Option<Recipient>,
    /// 原樣保留，不解析也不輸出
    pub received_date_time: Option<String>,
}

impl Message {
    pub fn sender_address(&self) -> Option<&str> {
        self.from
            .as_ref()
            .and_then(|r| r.email_address.as_ref())
            .and_then(|e| e.address.as_deref())
            .filter(|a| !a.is_empty())
    }
}

/// "list messages" 回傳的單一頁面；nextLink 只記錄不追蹤
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub value: Vec<Message>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Graph 錯誤回應: {"error": {"code": "...", "message": "..."}}
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: ServiceErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorDetail {
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}
