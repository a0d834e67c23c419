use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("graph-inbox/", env!("CARGO_PKG_VERSION"));

/// 建立 token endpoint 與 Graph 共用的 HTTP client
pub fn build_client(timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
