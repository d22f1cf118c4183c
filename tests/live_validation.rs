use std::env;

use ecss_navigator::{
    morphik::{MorphikClient, QueryRequest, RetrievalBackend},
    service::search_backend,
    search::SearchFilters,
};

fn live_client() -> MorphikClient {
    dotenvy::dotenv().ok();
    let uri = env::var("MORPHIK_URI").expect("MORPHIK_URI must be set for live tests");
    MorphikClient::from_uri(&uri).expect("valid MORPHIK_URI")
}

#[tokio::test]
#[ignore = "Requires live Morphik"]
async fn live_documents_are_listed() {
    let documents = live_client()
        .list_documents()
        .await
        .expect("failed to list documents");
    assert!(!documents.is_empty(), "run ecss-ingest before live tests");
}

#[tokio::test]
#[ignore = "Requires live Morphik"]
async fn live_query_returns_a_completion() {
    let client = live_client();
    let response = client
        .query(&QueryRequest::new("project planning"))
        .await
        .expect("query failed");
    assert!(response.completion.is_some(), "expected a completion");

    let results = search_backend(&client, "project planning", &SearchFilters::default())
        .await
        .expect("search failed");
    assert_eq!(results.len(), 1);
}
