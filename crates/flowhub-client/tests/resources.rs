//! Resource services route to the right paths and pass errors through.

use flowhub_client::{
    CreateApiKeyRequest, CreateCredentialRequest, CreateInvitationRequest, CreateWebhookRequest,
    CreateWorkflowRequest, ErrorKind, ExecuteWorkflowRequest, FlowhubClient, ListChannelsQuery,
    ListExecutionsQuery, ListInvitationsQuery, ListToolsQuery, ListWorkflowsQuery, PageQuery,
    UpdateChannelRequest, UpdateWorkflowRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FlowhubClient {
    FlowhubClient::builder()
        .api_key("fh_test")
        .tenant_id("acme")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn workflow(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Nightly sync",
        "definition": {"nodes": []},
        "is_active": false,
        "tags": ["ops"]
    })
}

#[tokio::test]
async fn test_workflows_list_uses_tenant_path_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tenant/acme/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [workflow("wf_1")],
            "total": 1,
            "page": 2,
            "limit": 10
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let query = ListWorkflowsQuery {
        page: PageQuery {
            page: Some(2),
            limit: Some(10),
            search: None,
        },
        is_active: Some(true),
        tags: vec!["ops".into(), "billing".into()],
    };
    let page = client.workflows().list(&query).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, "wf_1");
    assert_eq!(page.data[0].tags, vec!["ops"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("page=2&limit=10&is_active=true&tags=ops&tags=billing")
    );
}

#[tokio::test]
async fn test_workflow_crud_and_actions() {
    let server = MockServer::start().await;
    let base = "/api/tenant/acme/workflows";

    Mock::given(method("POST"))
        .and(path(base))
        .and(body_json(json!({"name": "Nightly sync", "definition": {"nodes": []}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(workflow("wf_1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{}/wf_1", base)))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(workflow("wf_1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/wf_1/activate", base)))
        .respond_with(ResponseTemplate::new(200).set_body_json(workflow("wf_1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/wf_1/execute", base)))
        .and(body_json(json!({"input": {"order_id": 42}})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "ex_1",
            "workflow_id": "wf_1",
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/wf_1/executions/ex_1", base)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ex_1",
            "workflow_id": "wf_1",
            "status": "succeeded",
            "output": {"rows": 12}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/wf_1", base)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let workflows = client.workflows();

    let created = workflows
        .create(&CreateWorkflowRequest {
            name: "Nightly sync".into(),
            definition: json!({"nodes": []}),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, "wf_1");

    workflows
        .update(
            "wf_1",
            &UpdateWorkflowRequest {
                name: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    workflows.activate("wf_1").await.unwrap();

    let execution = workflows
        .execute(
            "wf_1",
            &ExecuteWorkflowRequest {
                input: json!({"order_id": 42}),
                r#async: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(execution.status, "pending");

    let finished = workflows.execution("wf_1", "ex_1").await.unwrap();
    assert_eq!(finished.output, Some(json!({"rows": 12})));

    let ack = workflows.delete("wf_1").await.unwrap();
    assert_eq!(ack.success, None);
}

#[tokio::test]
async fn test_workflow_executions_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tenant/acme/workflows/wf_1/executions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "total": 0})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let page = client
        .workflows()
        .executions(
            "wf_1",
            &ListExecutionsQuery {
                status: Some("failed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(page.data.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=failed"));
}

#[tokio::test]
async fn test_tools_test_invocation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tenant/acme/tools/tool_1/test"))
        .and(body_json(json!({"input": {"city": "Oslo"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "output": {"temp": 4},
            "duration_ms": 120
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tenant/acme/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let result = client
        .tools()
        .test("tool_1", &json!({"city": "Oslo"}))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.duration_ms, Some(120));

    let page = client
        .tools()
        .list(&ListToolsQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[1].url.query(), None);
}

#[tokio::test]
async fn test_credentials_and_channels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tenant/acme/credentials"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "cred_1",
            "name": "Stripe",
            "type": "api_key"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/tenant/acme/channels/ch_1"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ch_1",
            "name": "Alerts",
            "type": "slack",
            "is_active": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tenant/acme/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let credential = client
        .credentials()
        .create(&CreateCredentialRequest {
            name: "Stripe".into(),
            r#type: "api_key".into(),
            data: [("key".to_string(), json!("sk_test"))].into_iter().collect(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(credential.r#type, "api_key");

    let channel = client
        .channels()
        .update(
            "ch_1",
            &UpdateChannelRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!channel.is_active);

    client
        .channels()
        .list(&ListChannelsQuery {
            r#type: Some("slack".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[2].url.query(), Some("type=slack"));
}

#[tokio::test]
async fn test_webhook_create_returns_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tenant/acme/webhooks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "wh_1",
            "url": "https://example.com/hook",
            "events": ["execution.failed"],
            "is_active": true,
            "secret": "whsec_abc"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let created = client
        .webhooks()
        .create(&CreateWebhookRequest {
            url: "https://example.com/hook".into(),
            events: vec!["execution.failed".into()],
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(created.webhook.id, "wh_1");
    assert_eq!(created.secret.as_deref(), Some("whsec_abc"));
}

#[tokio::test]
async fn test_api_keys_are_not_tenant_scoped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api-keys"))
        .and(body_json(json!({"name": "ci", "scopes": ["workflows:execute"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "key_1",
            "name": "ci",
            "prefix": "fh_live_ab",
            "key": "fh_live_abcdef"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api-keys/key_1/rotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "key_1",
            "name": "ci",
            "key": "fh_live_ghijkl"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api-keys/key_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let created = client
        .api_keys()
        .create(&CreateApiKeyRequest {
            name: "ci".into(),
            scopes: vec!["workflows:execute".into()],
            expires_at: None,
        })
        .await
        .unwrap();
    assert_eq!(created.key, "fh_live_abcdef");
    assert_eq!(created.api_key.prefix, "fh_live_ab");

    let rotated = client.api_keys().rotate("key_1").await.unwrap();
    assert_eq!(rotated.key, "fh_live_ghijkl");

    let ack = client.api_keys().revoke("key_1").await.unwrap();
    assert_eq!(ack.success, Some(true));
}

#[tokio::test]
async fn test_invitations_flow() {
    let server = MockServer::start().await;
    let invitation = json!({
        "id": "inv_1",
        "email": "dev@example.com",
        "role": "editor",
        "status": "pending"
    });
    Mock::given(method("POST"))
        .and(path("/invitations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(invitation.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/invitations/tok_9/accept"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "inv_1",
            "email": "dev@example.com",
            "role": "editor",
            "status": "accepted"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invitations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [invitation]})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let created = client
        .invitations()
        .create(&CreateInvitationRequest {
            email: "dev@example.com".into(),
            role: "editor".into(),
            tenant_id: Some("acme".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.status, "pending");

    let accepted = client.invitations().accept("tok_9").await.unwrap();
    assert_eq!(accepted.status, "accepted");

    let page = client
        .invitations()
        .list(&ListInvitationsQuery {
            status: Some("pending".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn test_service_errors_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tenant/acme/workflows/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Workflow missing not found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tenant/acme/credentials/cred_1/test"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Credential rejected by provider",
            "details": {"provider_status": 401}
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.workflows().get("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "Workflow missing not found");

    let err = client.credentials().test("cred_1").await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Validation);
    assert_eq!(err.details(), Some(&json!({"provider_status": 401})));
}

#[tokio::test]
async fn test_invalid_construction_never_touches_network() {
    let server = MockServer::start().await;
    let called = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = called.clone();

    let result = FlowhubClient::builder()
        .api_key("")
        .tenant_id("acme")
        .base_url(server.uri())
        .on_request(move |_| {
            let flag = flag.clone();
            async move {
                flag.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        })
        .build();

    assert_eq!(result.unwrap_err().kind(), &ErrorKind::Configuration);
    assert!(!called.load(std::sync::atomic::Ordering::SeqCst));
    assert!(server.received_requests().await.unwrap().is_empty());
}
