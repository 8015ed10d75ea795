use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use recipe_lens::gateway::GatewayError;
use recipe_lens::{analyze_image, AnalyzeError, OpenRouterGateway};

fn gateway_for(server: &ServerGuard) -> OpenRouterGateway {
    OpenRouterGateway::with_base_url(
        "fake_api_key".to_string(),
        server.url(),
        "test/vision-model".to_string(),
    )
}

fn completion_body(content: &str) -> String {
    json!({"choices": [{"message": {"content": content}}]}).to_string()
}

/// A fenced JSON reply comes back as the parsed recipe, fields intact.
#[tokio::test]
async fn test_analyze_image_with_json_reply() {
    let _ = env_logger::try_init();

    let mut server = Server::new_async().await;
    let completion = "```json\n{\"title\": \"Shakshuka\", \"description\": \"Eggs poached in tomato sauce\", \"ingredients\": [\"4 eggs\", \"400g canned tomatoes\"], \"instructions\": [\"Simmer the sauce.\", \"Crack in the eggs.\"], \"prepTime\": \"10 minutes\", \"cookTime\": \"20 minutes\", \"servings\": \"2 servings\", \"difficulty\": \"Easy\"}\n```";
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(completion))
        .create();

    let gateway = gateway_for(&server);
    let recipe = analyze_image(&gateway, "aGVsbG8=").await.unwrap();

    assert_eq!(recipe.title, "Shakshuka");
    assert_eq!(
        recipe.description.as_deref(),
        Some("Eggs poached in tomato sauce")
    );
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.instructions[1], "Crack in the eggs.");
    assert_eq!(recipe.prep_time.as_deref(), Some("10 minutes"));
    assert_eq!(recipe.difficulty.as_deref(), Some("Easy"));
    mock.assert();
}

/// A single-string ingredients field is coerced into a one-element list.
#[tokio::test]
async fn test_analyze_image_coerces_scalar_fields() {
    let mut server = Server::new_async().await;
    let completion =
        "```json\n{\"title\": \"Toast\", \"ingredients\": \"one slice of bread\", \"instructions\": [\"Toast it.\"]}\n```";
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(completion))
        .create();

    let gateway = gateway_for(&server);
    let recipe = analyze_image(&gateway, "aGVsbG8=").await.unwrap();

    assert_eq!(recipe.title, "Toast");
    assert_eq!(recipe.ingredients, vec!["one slice of bread"]);
    mock.assert();
}

/// A prose reply with no usable JSON still produces a recipe.
#[tokio::test]
async fn test_analyze_image_with_prose_reply() {
    let mut server = Server::new_async().await;
    let completion = "Title: Pasta\nIngredients\n1. Pasta\n2. Cheese\nInstructions\nStep 1: Boil water\nStep 2: Add pasta";
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(completion))
        .create();

    let gateway = gateway_for(&server);
    let recipe = analyze_image(&gateway, "aGVsbG8=").await.unwrap();

    assert_eq!(recipe.title, "Pasta");
    assert_eq!(recipe.ingredients, vec!["Pasta", "Cheese"]);
    assert_eq!(recipe.instructions, vec!["Boil water", "Add pasta"]);
    mock.assert();
}

/// The image travels upstream as a jpeg data URL.
#[tokio::test]
async fn test_analyze_image_sends_data_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .match_body(Matcher::Regex(
            "data:image/jpeg;base64,aGVsbG8=".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Title: Snack"))
        .create();

    let gateway = gateway_for(&server);
    let recipe = analyze_image(&gateway, "data:image/png;base64,aGVsbG8=")
        .await
        .unwrap();

    assert_eq!(recipe.title, "Snack");
    mock.assert();
}

/// An upstream error status surfaces as a gateway failure, not a recipe.
#[tokio::test]
async fn test_analyze_image_provider_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(500)
        .with_body("internal error")
        .create();

    let gateway = gateway_for(&server);
    let err = analyze_image(&gateway, "aGVsbG8=").await.unwrap_err();

    match err {
        AnalyzeError::Gateway(GatewayError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("internal error"));
        }
        other => panic!("expected gateway error, got {other:?}"),
    }
    mock.assert();
}

/// An empty payload is rejected before any request leaves the process.
#[tokio::test]
async fn test_analyze_image_rejects_empty_payload_without_calling_out() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .expect(0)
        .create();

    let gateway = gateway_for(&server);
    let err = analyze_image(&gateway, "   \n ").await.unwrap_err();

    assert!(matches!(err, AnalyzeError::EmptyImage));
    mock.assert();
}
