pub mod inbox;
pub mod report;

pub use crate::domain::model::{Message, MessagePage};
pub use crate::domain::ports::{ConfigProvider, CredentialProvider, MailClient};
pub use crate::utils::error::Result;
