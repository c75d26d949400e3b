use payloads::{ClientError, LogoFile};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, mock, routes, spawn_app};

#[tokio::test]
async fn get_company_by_id() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();

    let fetched = app.client.get_company(&acme.id).await?;
    assert_eq!(fetched, acme);
    assert_eq!(fetched.name, "Acme");
    assert_eq!(fetched.location, "NYC");

    Ok(())
}

#[tokio::test]
async fn get_unknown_company() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get_company(&"does-not-exist".into()).await;
    let err = result.as_ref().unwrap_err();
    assert_eq!(err.server_message(), Some(routes::NOT_FOUND_MESSAGE));
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn update_without_logo_sends_only_text_parts() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();

    let details =
        mock::company_details("Acme Corp", "Better widgets", "acme.com", "LA");
    let envelope = app.client.update_company(&acme.id, details).await?;
    assert!(envelope.success);
    assert_eq!(envelope.message, routes::UPDATED_MESSAGE);

    let updates = app.recorded_updates();
    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_eq!(update.company_id, acme.id);
    assert!(
        update
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("multipart/form-data")
    );
    assert_eq!(update.name.as_deref(), Some("Acme Corp"));
    assert_eq!(update.description.as_deref(), Some("Better widgets"));
    assert_eq!(update.website.as_deref(), Some("acme.com"));
    assert_eq!(update.location.as_deref(), Some("LA"));
    assert_eq!(update.file, None);

    let stored = app.company(&acme.id).unwrap();
    assert_eq!(stored.name, "Acme Corp");
    assert_eq!(stored.logo, None);

    Ok(())
}

#[tokio::test]
async fn update_with_logo_sends_file_part() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();

    let mut details = mock::acme();
    details.file = Some(LogoFile {
        file_name: "acme.png".to_string(),
        mime_type: "image/png".to_string(),
        data: vec![7; 2048],
    });
    app.client.update_company(&acme.id, details).await?;

    let updates = app.recorded_updates();
    assert_eq!(updates.len(), 1);
    let file = updates[0].file.clone().unwrap();
    assert_eq!(file.file_name.as_deref(), Some("acme.png"));
    assert_eq!(file.content_type.as_deref(), Some("image/png"));
    assert_eq!(file.len, 2048);

    let stored = app.company(&acme.id).unwrap();
    assert_eq!(
        stored.logo,
        Some(format!("/logos/{}/acme.png", acme.id))
    );

    Ok(())
}

#[tokio::test]
async fn update_refused_by_envelope() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();
    app.stub
        .force_next_update(200, r#"{"success":false,"message":"Name taken"}"#);

    let result = app.client.update_company(&acme.id, mock::acme()).await;
    match result {
        Err(ClientError::Rejected(message)) => assert_eq!(message, "Name taken"),
        other => panic!("expected a rejection, got {other:?}"),
    }

    // The stored record is untouched.
    assert_eq!(app.company(&acme.id), Some(acme));

    Ok(())
}

#[tokio::test]
async fn update_error_carries_server_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();
    let globex = mock::globex();
    let _ = app.stub.insert_company(
        &globex.name,
        &globex.description,
        &globex.website,
        &globex.location,
    );

    let result = app.client.update_company(&acme.id, mock::globex()).await;
    let err = result.as_ref().unwrap_err();
    assert_eq!(err.server_message(), Some(routes::NAME_TAKEN_MESSAGE));
    assert_eq!(err.to_string(), routes::NAME_TAKEN_MESSAGE);
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn update_error_without_envelope() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let acme = app.create_acme();
    app.stub.force_next_update(502, "");

    let result = app.client.update_company(&acme.id, mock::acme()).await;
    assert_eq!(result.as_ref().unwrap_err().server_message(), None);
    assert_status_code(result, StatusCode::BAD_GATEWAY);

    Ok(())
}

#[tokio::test]
async fn update_unknown_company() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .update_company(&"does-not-exist".into(), mock::acme())
        .await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}
