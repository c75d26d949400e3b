mod company;

use payloads::ClientError;
use test_helpers::spawn_app;

#[tokio::test]
async fn list_companies() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();

    let companies = app.client.list_companies().await?;
    assert_eq!(companies, vec![acme]);

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = payloads::APIClient {
        // Nothing listens on the discard port.
        address: "http://127.0.0.1:9".to_string(),
        inner_client: reqwest::Client::new(),
    };
    let result = client.get_company(&"missing".into()).await;
    assert!(matches!(result, Err(ClientError::Network(_))));
}
