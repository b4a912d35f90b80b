use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn models_json_keeps_logs_off_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/openai/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": "meta-llama/llama-3-8b-instruct", "context_size": 8192 }]
        })))
        .mount(&server)
        .await;

    let workdir = tempfile::tempdir().unwrap();
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_novita-provider"))
        .args(["models", "--json"])
        .current_dir(workdir.path())
        .env_remove("NOVITA_API_KEY")
        .env_remove("RUST_LOG")
        .env("NOVITA_BASE_URL", format!("{}/v3/openai", server.uri()))
        .env("APP__LOGGING__FORMAT", "json")
        .output()
        .await
        .unwrap();

    assert!(output.status.success());

    let stdout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stdout[0]["id"], "meta-llama/llama-3-8b-instruct");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("listing models anonymously"));
}
