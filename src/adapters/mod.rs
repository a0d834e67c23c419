// Adapters layer: 對外部系統的實作 (identity platform, Microsoft Graph, HTTP)

pub mod graph;
pub mod http;
pub mod identity;

pub use graph::GraphClient;
pub use identity::{ClientSecretCredential, ConfidentialClient, StaticTokenProvider, TokenEndpoint};
