use crate::domain::model::{Message, MessagePage};
use crate::utils::error::{FailureKind, GraphError};
use std::io::Write;

pub const NO_MESSAGES: &str = "No messages found in the mailbox.";
pub const TOKEN_EXPIRED: &str =
    "Access denied (401 Unauthorized): the access token is invalid or has expired.";
pub const INSUFFICIENT_PERMISSIONS: &str =
    "Access denied (403 Forbidden): the application lacks permission to read this mailbox.";

const NO_SUBJECT: &str = "(no subject)";

/// 單一郵件的輸出行
pub fn format_message(message: &Message) -> String {
    let subject = message
        .subject
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_SUBJECT);

    match message.sender_address() {
        Some(address) => format!("Subject: {} - From: {}", subject, address),
        None => format!("Subject: {}", subject),
    }
}

/// 依伺服器回傳順序輸出，每封一行；回傳輸出的郵件數
pub fn render_page<W: Write>(page: &MessagePage, out: &mut W) -> std::io::Result<usize> {
    if page.value.is_empty() {
        writeln!(out, "{}", NO_MESSAGES)?;
        return Ok(0);
    }

    for message in &page.value {
        writeln!(out, "{}", format_message(message))?;
    }
    Ok(page.value.len())
}

pub fn failure_message(err: &GraphError) -> String {
    match err.failure_kind() {
        FailureKind::Unauthorized => TOKEN_EXPIRED.to_string(),
        FailureKind::Forbidden => INSUFFICIENT_PERMISSIONS.to_string(),
        FailureKind::Status(code) => {
            format!("Error accessing Microsoft Graph: status code {} ({})", code, err)
        }
        FailureKind::Transport => err.user_friendly_message(),
    }
}

pub fn render_failure<W: Write>(err: &GraphError, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", failure_message(err))
}
