// 組裝 credential、Graph client 與 InboxReader

use crate::adapters::identity::{
    ClientSecretCredential, ConfidentialClient, StaticTokenProvider, TokenEndpoint,
};
use crate::adapters::{http, GraphClient};
use crate::config::AuthFlow;
use crate::core::inbox::{InboxReader, Outcome};
use crate::core::report;
use crate::domain::ports::{ConfigProvider, CredentialProvider};
use crate::utils::error::Result;
use std::io::Write;

pub type DynGraphClient = GraphClient<Box<dyn CredentialProvider>>;

/// 依 AuthFlow 建立 Graph client。confidential 模式會在這裡先取得 token
pub async fn build_graph_client<C: ConfigProvider>(config: &C) -> Result<DynGraphClient> {
    let auth_flow = config.auth_flow();
    let client = http::build_client(config.timeout_seconds())?;
    let endpoint = TokenEndpoint::from_config(client.clone(), config);
    tracing::debug!(
        "Using {} auth flow against {}",
        auth_flow,
        endpoint.token_url()
    );

    let credential: Box<dyn CredentialProvider> = match auth_flow {
        AuthFlow::Credential => Box::new(ClientSecretCredential::new(endpoint)),
        AuthFlow::Confidential => {
            let token = ConfidentialClient::new(endpoint)
                .acquire_token_for_client()
                .await?;
            Box::new(StaticTokenProvider::new(token))
        }
    };

    Ok(GraphClient::new(client, config.graph_base_url(), credential)
        .with_folder(config.folder().map(str::to_string)))
}

/// acquire-token → request → iterate → print；失敗一律轉為輸出訊息
pub async fn run<C: ConfigProvider, W: Write>(config: &C, out: &mut W) -> std::io::Result<Outcome> {
    let client = match build_graph_client(config).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Could not set up Graph client: {}", e);
            report::render_failure(&e, out)?;
            return Ok(Outcome::Failed(e.failure_kind()));
        }
    };

    InboxReader::new(client, config.mailbox(), config.top())
        .fetch_and_print(out)
        .await
}
