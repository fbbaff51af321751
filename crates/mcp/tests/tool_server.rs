//! Integration tests for the tool server.
//!
//! ViaCEP is replaced by a local axum app, and the LLM by `StaticClient`.

use std::sync::Arc;

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use cepnet_llm::{LlmClient, StaticClient};
use cepnet_mcp::{McpServerConfig, ToolServer, create_router};
use serde_json::{Value, json};

async fn fake_viacep_lookup(Path(cep): Path<String>) -> (StatusCode, Json<Value>) {
    match cep.as_str() {
        "01310100" => (
            StatusCode::OK,
            Json(json!({
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP",
                "ddd": "11"
            })),
        ),
        "99999999" => (StatusCode::OK, Json(json!({"erro": true}))),
        "50000000" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        _ => (StatusCode::OK, Json(json!({"erro": "true"}))),
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start_tool_server(llm: Arc<dyn LlmClient>) -> String {
    let viacep = spawn(Router::new().route("/ws/{cep}/json/", get(fake_viacep_lookup))).await;
    let config = McpServerConfig {
        viacep_url: viacep,
        lookup_timeout_ms: 2_000,
        ..Default::default()
    };
    let server = Arc::new(ToolServer::new(&config, llm));
    spawn(create_router(server)).await
}

async fn call(base: &str, tool: &str, cep: &str) -> Value {
    let resp = reqwest::Client::new()
        .post(format!("{}/mcp/{}", base, tool))
        .json(&json!({ "cep": cep }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    resp.json().await.unwrap()
}

// ============================================================================
// consultar_cep
// ============================================================================

#[tokio::test]
async fn test_consult_valid_code() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;
    let body = call(&base, "consultar_cep", "01310-100").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["tool"], "mcp:consultar_cep");
    assert_eq!(body["input"], "01310-100");
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("Postal code found: 01310-100"));
    assert!(output.contains("Avenida Paulista"));
    assert!(output.contains("São Paulo"));
}

#[tokio::test]
async fn test_consult_malformed_code() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;
    let body = call(&base, "consultar_cep", "0131-01").await;

    assert_eq!(body["success"], false);
    assert_eq!(
        body["output"],
        "❌ Invalid postal code: '0131-01'. Use format: 01310-100"
    );
}

#[tokio::test]
async fn test_consult_unknown_code() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;

    let body = call(&base, "consultar_cep", "99999-999").await;
    assert_eq!(body["success"], false);
    assert_eq!(body["output"], "❌ Postal code 99999999 not found");

    let body = call(&base, "consultar_cep", "12345678").await;
    assert_eq!(body["output"], "❌ Postal code 12345678 not found");
}

#[tokio::test]
async fn test_consult_upstream_failure_collapses_to_marked_text() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;
    let body = call(&base, "consultar_cep", "50000-000").await;

    assert_eq!(body["success"], false);
    assert!(body["output"].as_str().unwrap().starts_with("❌ Lookup failed:"));
}

#[tokio::test]
async fn test_missing_cep_field_is_invalid() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/mcp/consultar_cep", base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["input"], "");
}

#[tokio::test]
async fn test_bad_payloads_get_marked_tool_reply() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;
    let client = reqwest::Client::new();

    for (content_type, body) in [
        (None, r#"{"cep": "01310-100"}"#),
        (Some("application/json"), "not json"),
        (Some("application/json"), r#"{"cep": 13571385}"#),
    ] {
        let mut request = client
            .post(format!("{}/mcp/analisar_endereco", base))
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200, "body: {body}");

        let reply: Value = resp.json().await.unwrap();
        if content_type.is_none() {
            assert_eq!(reply["success"], true);
            assert_eq!(reply["input"], "01310-100");
        } else {
            assert_eq!(reply["success"], false);
            assert_eq!(reply["tool"], "mcp:analisar_endereco");
            assert!(reply["output"].as_str().unwrap().starts_with("❌ Invalid payload:"));
        }
    }
}

// ============================================================================
// analisar_endereco
// ============================================================================

#[tokio::test]
async fn test_analyze_enriches_lookup() {
    let llm = Arc::new(StaticClient::replying("🏢 Busy commercial hub."));
    let base = start_tool_server(llm.clone()).await;
    let body = call(&base, "analisar_endereco", "01310100").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["tool"], "mcp:analisar_endereco");
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("BASIC DATA"));
    assert!(output.contains("Avenida Paulista"));
    assert!(output.contains("🏢 Busy commercial hub."));

    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("Avenida Paulista"));
    assert!(llm.requests()[0].system_prompt.is_some());
}

#[tokio::test]
async fn test_analyze_keeps_basic_data_when_llm_fails() {
    let base = start_tool_server(Arc::new(StaticClient::failing("model overloaded"))).await;
    let body = call(&base, "analisar_endereco", "01310-100").await;

    assert_eq!(body["success"], false);
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("Avenida Paulista"));
    assert!(output.contains("❌ **AI analysis error:**"));
    assert!(output.contains("model overloaded"));
}

#[tokio::test]
async fn test_analyze_skips_llm_when_lookup_fails() {
    let llm = Arc::new(StaticClient::replying("unused"));
    let base = start_tool_server(llm.clone()).await;
    let body = call(&base, "analisar_endereco", "abc").await;

    assert_eq!(body["success"], false);
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("Could not analyze"));
    assert!(output.contains("❌ Invalid postal code: 'abc'"));
    assert!(llm.requests().is_empty());
}

// ============================================================================
// Health and tool listing
// ============================================================================

#[tokio::test]
async fn test_health_and_tool_listing() {
    let base = start_tool_server(Arc::new(StaticClient::replying("unused"))).await;
    let client = reqwest::Client::new();

    let health: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["status"], "online");
    assert_eq!(health["tools"], json!(["consultar_cep", "analisar_endereco"]));

    let tools: Value = client
        .get(format!("{}/mcp/tools", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[1]["path"], "/mcp/analisar_endereco");
}
