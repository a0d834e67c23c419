use crate::core::report;
use crate::domain::model::MessagePage;
use crate::domain::ports::MailClient;
use crate::utils::error::{FailureKind, Result};
use std::io::Write;

/// fetch-and-print 的結果，供 main 記錄日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Listed(usize),
    Empty,
    Failed(FailureKind),
}

pub struct InboxReader<M: MailClient> {
    client: M,
    mailbox: String,
    top: u32,
}

impl<M: MailClient> InboxReader<M> {
    pub fn new(client: M, mailbox: impl Into<String>, top: u32) -> Self {
        Self {
            client,
            mailbox: mailbox.into(),
            top,
        }
    }

    pub async fn fetch(&self) -> Result<MessagePage> {
        tracing::info!("Fetching latest {} messages for {}", self.top, self.mailbox);
        let page = self.client.list_messages(&self.mailbox, self.top).await?;
        tracing::info!("Received {} messages", page.value.len());
        Ok(page)
    }

    /// 所有請求錯誤都在這裡轉為輸出訊息；只有寫出失敗才回傳錯誤
    pub async fn fetch_and_print<W: Write>(&self, out: &mut W) -> std::io::Result<Outcome> {
        match self.fetch().await {
            Ok(page) => {
                let count = report::render_page(&page, out)?;
                Ok(if count == 0 {
                    Outcome::Empty
                } else {
                    Outcome::Listed(count)
                })
            }
            Err(e) => {
                tracing::error!("❌ Graph request failed: {}", e);
                tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
                report::render_failure(&e, out)?;
                Ok(Outcome::Failed(e.failure_kind()))
            }
        }
    }
}
