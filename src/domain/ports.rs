use crate::config::AuthFlow;
use crate::domain::model::{AccessToken, MessagePage};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn tenant_id(&self) -> &str;
    fn client_id(&self) -> &str;
    fn client_secret(&self) -> &str;
    fn authority(&self) -> &str;
    fn scope(&self) -> &str;
    fn graph_base_url(&self) -> &str;
    fn mailbox(&self) -> &str;
    fn folder(&self) -> Option<&str>;
    fn top(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
    fn auth_flow(&self) -> AuthFlow;
}

/// 取得 bearer token 的來源
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken>;
}

#[async_trait]
pub trait MailClient: Send + Sync {
    async fn list_messages(&self, mailbox: &str, top: u32) -> Result<MessagePage>;
}

#[async_trait]
impl<T: CredentialProvider + ?Sized> CredentialProvider for Box<T> {
    async fn access_token(&self) -> Result<AccessToken> {
        (**self).access_token().await
    }
}
