use crate::domain::model::{MessagePage, ServiceErrorBody};
use crate::domain::ports::{CredentialProvider, MailClient};
use crate::utils::error::{GraphError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

const SELECT_FIELDS: &str = "subject,from,receivedDateTime";

pub struct GraphClient<P: CredentialProvider> {
    client: Client,
    base_url: String,
    folder: Option<String>,
    credential: P,
}

impl<P: CredentialProvider> GraphClient<P> {
    pub fn new(client: Client, base_url: impl Into<String>, credential: P) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            folder: None,
            credential,
        }
    }

    /// 指定郵件資料夾 (例如 inbox)；未指定時查詢整個信箱
    pub fn with_folder(mut self, folder: Option<String>) -> Self {
        self.folder = folder;
        self
    }

    fn messages_url(&self, mailbox: &str) -> Result<Url> {
        let invalid = |reason: String| GraphError::InvalidConfigValueError {
            field: "graph.base_url".to_string(),
            value: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("URL cannot be a base".to_string()))?;
            segments.pop_if_empty().push("users").push(mailbox);
            if let Some(folder) = &self.folder {
                segments.push("mailFolders").push(folder);
            }
            segments.push("messages");
        }
        Ok(url)
    }
}

#[async_trait]
impl<P: CredentialProvider> MailClient for GraphClient<P> {
    async fn list_messages(&self, mailbox: &str, top: u32) -> Result<MessagePage> {
        let token = self.credential.access_token().await?;
        let url = self.messages_url(mailbox)?;

        tracing::debug!("Making Graph request to: {}", url);
        let response = self
            .client
            .get(url)
            .query(&[("$top", top.to_string()), ("$select", SELECT_FIELDS.to_string())])
            .bearer_auth(&token.secret)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Graph response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ServiceErrorBody>(&body) {
                Ok(parsed) => (parsed.error.code, parsed.error.message),
                Err(_) => (
                    None,
                    status.canonical_reason().unwrap_or("Unknown status").to_string(),
                ),
            };
            return Err(GraphError::ServiceError {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let page: MessagePage = response.json().await?;
        if let Some(next) = &page.next_link {
            tracing::debug!("More messages available at {}, not following", next);
        }
        Ok(page)
    }
}
