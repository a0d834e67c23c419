use graph_inbox::app;
use graph_inbox::config::{Secret, SettingsOverrides};
use graph_inbox::core::report::{INSUFFICIENT_PERMISSIONS, NO_MESSAGES, TOKEN_EXPIRED};
use graph_inbox::utils::error::FailureKind;
use graph_inbox::utils::validation::Validate;
use graph_inbox::{AuthFlow, Outcome, Settings};
use httpmock::prelude::*;

const TENANT: &str = "11111111-2222-3333-4444-555555555555";
const TOKEN_PATH: &str = "/11111111-2222-3333-4444-555555555555/oauth2/v2.0/token";
const MESSAGES_PATH: &str = "/v1.0/users/user@example.com/messages";

fn settings_for(server: &MockServer, auth_flow: AuthFlow) -> Settings {
    let overrides = SettingsOverrides {
        tenant_id: Some(TENANT.to_string()),
        client_id: Some("app-client-id".to_string()),
        client_secret: Some(Secret::new("app-client-secret")),
        mailbox: Some("user@example.com".to_string()),
        authority: Some(server.base_url()),
        graph_url: Some(server.url("/v1.0")),
        auth_flow: Some(auth_flow),
        ..Default::default()
    };

    let settings = Settings::resolve(overrides, None).unwrap();
    settings.validate().unwrap();
    settings
}

fn mock_token<'a>(server: &'a MockServer) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(POST)
            .path(TOKEN_PATH)
            .x_www_form_urlencoded_tuple("grant_type", "client_credentials")
            .x_www_form_urlencoded_tuple("scope", "https://graph.microsoft.com/.default");
        then.status(200).json_body(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "integration-token"
        }));
    })
}

async fn run(settings: &Settings) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = app::run(settings, &mut out).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_end_to_end_lists_messages_in_server_order() {
    let server = MockServer::start();
    let token_mock = mock_token(&server);

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(MESSAGES_PATH)
            .query_param("$top", "5")
            .header("authorization", "Bearer integration-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users('user%40example.com')/messages",
                "value": [
                    {"subject": "Invoice #42", "from": {"emailAddress": {"name": "Billing", "address": "billing@contoso.com"}}},
                    {"subject": "Team lunch", "from": {"emailAddress": {"address": "ana@contoso.com"}}},
                    {"subject": "Draft without sender"},
                    {"subject": "Re: roadmap", "from": {"emailAddress": {"address": "lee@fabrikam.com"}}},
                    {"subject": "", "from": {"emailAddress": {"address": "noreply@contoso.com"}}}
                ],
                "@odata.nextLink": "https://graph.microsoft.com/v1.0/users/user@example.com/messages?$top=5&$skip=5"
            }));
    });

    let settings = settings_for(&server, AuthFlow::Credential);
    let (outcome, output) = run(&settings).await;

    token_mock.assert();
    api_mock.assert();
    assert_eq!(outcome, Outcome::Listed(5));

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Subject: Invoice #42 - From: billing@contoso.com",
            "Subject: Team lunch - From: ana@contoso.com",
            "Subject: Draft without sender",
            "Subject: Re: roadmap - From: lee@fabrikam.com",
            "Subject: (no subject) - From: noreply@contoso.com",
        ]
    );
}

#[tokio::test]
async fn test_confidential_flow_acquires_token_up_front() {
    let server = MockServer::start();
    let token_mock = mock_token(&server);

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1.0/users/user@example.com/mailFolders/inbox/messages")
            .header("authorization", "Bearer integration-token");
        then.status(200).json_body(serde_json::json!({
            "value": [{"subject": "Welcome"}]
        }));
    });

    let mut settings = settings_for(&server, AuthFlow::Confidential);
    settings.folder = Some("inbox".to_string());
    let (outcome, output) = run(&settings).await;

    token_mock.assert_hits(1);
    api_mock.assert();
    assert_eq!(outcome, Outcome::Listed(1));
    assert_eq!(output, "Subject: Welcome\n");
}

#[tokio::test]
async fn test_empty_mailbox_prints_notice() {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path(MESSAGES_PATH);
        then.status(200).json_body(serde_json::json!({ "value": [] }));
    });

    let settings = settings_for(&server, AuthFlow::Credential);
    let (outcome, output) = run(&settings).await;

    assert_eq!(outcome, Outcome::Empty);
    assert_eq!(output.trim_end(), NO_MESSAGES);
}

#[tokio::test]
async fn test_unauthorized_graph_response() {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path(MESSAGES_PATH);
        then.status(401).json_body(serde_json::json!({
            "error": {"code": "InvalidAuthenticationToken", "message": "Access token has expired or is not yet valid."}
        }));
    });

    let settings = settings_for(&server, AuthFlow::Credential);
    let (outcome, output) = run(&settings).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Unauthorized));
    assert_eq!(output.trim_end(), TOKEN_EXPIRED);
}

#[tokio::test]
async fn test_forbidden_graph_response() {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path(MESSAGES_PATH);
        then.status(403).json_body(serde_json::json!({
            "error": {"code": "ErrorAccessDenied", "message": "Access is denied. Check credentials and try again."}
        }));
    });

    let settings = settings_for(&server, AuthFlow::Credential);
    let (outcome, output) = run(&settings).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Forbidden));
    assert_eq!(output.trim_end(), INSUFFICIENT_PERMISSIONS);
}

#[tokio::test]
async fn test_other_status_reports_code() {
    let server = MockServer::start();
    mock_token(&server);
    server.mock(|when, then| {
        when.method(GET).path(MESSAGES_PATH);
        then.status(404).json_body(serde_json::json!({
            "error": {"code": "ErrorInvalidUser", "message": "The requested user 'user@example.com' is invalid."}
        }));
    });

    let settings = settings_for(&server, AuthFlow::Credential);
    let (outcome, output) = run(&settings).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Status(404)));
    assert!(output.contains("404"));
    assert!(output.contains("is invalid"));
}

#[tokio::test]
async fn test_token_rejection_is_printed_without_calling_graph() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(TOKEN_PATH);
        then.status(400).json_body(serde_json::json!({
            "error": "invalid_scope",
            "error_description": "AADSTS1002012: The provided value for scope is not valid."
        }));
    });
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(MESSAGES_PATH);
        then.status(200).json_body(serde_json::json!({ "value": [] }));
    });

    let settings = settings_for(&server, AuthFlow::Confidential);
    let (outcome, output) = run(&settings).await;

    api_mock.assert_hits(0);
    assert_eq!(outcome, Outcome::Failed(FailureKind::Status(400)));
    assert!(output.contains("400"));
    assert!(output.contains("invalid_scope"));
}

#[tokio::test]
async fn test_unreachable_service_prints_generic_error() {
    let server = MockServer::start();
    let mut settings = settings_for(&server, AuthFlow::Credential);
    // port 9 上沒有服務監聽
    settings.authority = "http://127.0.0.1:9".to_string();

    let (outcome, output) = run(&settings).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Transport));
    assert!(output.starts_with("Error accessing Microsoft Graph"));
}
