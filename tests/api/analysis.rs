use serde_json::json;

use crate::helpers::{page, spawn_app, QueuedGenerator, StaticFetcher};

const ACME_PAGE: &str = r#"<html><head><title>Acme Co</title>
<meta name="description" content="Software de gestão para o varejo"></head>
<body>
<nav>Início Sobre Contato</nav>
<p>A Acme é uma empresa de software de gestão para o varejo brasileiro.</p>
<p>O plano completo custa $199.99 por mês para cada loja cadastrada.</p>
<p>Nossa equipe comercial atende pelo telefone (11) 91234-5678 em dias úteis.</p>
</body></html>"#;

#[tokio::test]
async fn empty_page_returns_failure_record_without_generation() {
    let app = spawn_app(page(""), QueuedGenerator::default()).await;

    let response = app
        .post_analysis(json!({"url": "https://acme.example"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["url"], "https://acme.example");
    assert!(body["error"].as_str().unwrap().contains("no content"));
    assert!(body["timestamp"].is_string());
    assert!(body.get("analysis").is_none());
    assert_eq!(app.generation_calls(), 0);
}

#[tokio::test]
async fn failing_backend_yields_success_with_defaults() {
    let app = spawn_app(
        StaticFetcher {
            body: ACME_PAGE.to_string(),
            title: Some("Acme Co".to_string()),
        },
        QueuedGenerator::default(),
    )
    .await;

    let body: serde_json::Value = app
        .post_analysis(json!({"url": "https://acme.example"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["scrape"]["title"], "Acme Co");
    assert!(body["scrape"]["char_count"].as_u64().unwrap() > 0);
    assert_eq!(
        body["data"],
        json!({
            "name": "",
            "offerings": [],
            "pricing": null,
            "segments": [],
            "differentiators": [],
            "contact": null,
            "links": []
        })
    );
    assert_eq!(
        body["analysis"],
        json!({
            "empresa": "",
            "proposta_valor": "",
            "fortalezas": [],
            "ameacas": [],
            "oportunidades": [],
            "taticas": {"precos": null, "contatos": null},
            "recomendacoes": []
        })
    );
    assert_eq!(
        body["validation"],
        json!({
            "completo": false,
            "relevante": false,
            "acionavel": false,
            "pontos_fortes": [],
            "melhorias": []
        })
    );
    assert_eq!(app.generation_calls(), 3);
}

#[tokio::test]
async fn company_hint_fills_blank_model_answer() {
    let app = spawn_app(
        page(ACME_PAGE),
        QueuedGenerator::replying(&[
            r#"{"name": "Acme", "offerings": ["ERP"]}"#,
            "```json\n{\"empresa\": \"\", \"proposta_valor\": \"Gestão simples\", \"fortalezas\": [\"preço\", \"suporte\"]}\n```",
            r#"{"completo": true, "relevante": true, "acionavel": false, "melhorias": ["mais dados"]}"#,
        ]),
    )
    .await;

    let body: serde_json::Value = app
        .post_analysis(json!({"url": "https://acme.example", "company_name": "Acme"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["analysis"]["empresa"], "Acme");
    assert_eq!(
        body["summary"],
        "Empresa: Acme\nProposta de valor: Gestão simples\nPontos fortes:\n- preço\n- suporte"
    );
    assert_eq!(body["validation"]["completo"], true);
    assert_eq!(body["validation"]["melhorias"], json!(["mais dados"]));
}

#[tokio::test]
async fn unsupported_scheme_is_reported() {
    let app = spawn_app(page(ACME_PAGE), QueuedGenerator::default()).await;

    let body: serde_json::Value = app
        .post_analysis(json!({"url": "ftp://acme.example"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("ftp"));
}

#[tokio::test]
async fn malformed_body_is_a_json_400() {
    let app = spawn_app(page(ACME_PAGE), QueuedGenerator::default()).await;

    let response = app.post_analysis(json!({"company_name": "Acme"})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["type"], "JsonPayloadError");
}
