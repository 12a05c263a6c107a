use std::sync::Arc;

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newsdesk::api::{self, AppState};
use newsdesk::news::{NewsClient, RefreshCoordinator, CATEGORIES};
use newsdesk::storage::{ArticleStore, MemoryStore, NewArticle};

fn test_server(store: Arc<MemoryStore>, client: Option<NewsClient>) -> TestServer {
    let store: Arc<dyn ArticleStore> = store;
    let coordinator = Arc::new(RefreshCoordinator::new(
        Arc::clone(&store),
        client,
        "us".to_string(),
    ));
    TestServer::new(api::router(AppState { store, coordinator })).unwrap()
}

fn seed_article(title: &str, category: &str, day: u32) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        description: None,
        content: None,
        url: format!("https://example.com/{}", title),
        url_to_image: None,
        published_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        source: "Example Wire".to_string(),
        category: category.to_string(),
        author: None,
    }
}

fn headlines_body(category: &str, titles: &[&str]) -> String {
    let articles: Vec<String> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"{{
                    "source": {{"id": null, "name": "Mock Wire"}},
                    "title": "{}",
                    "url": "https://example.com/{}/{}",
                    "publishedAt": "2024-03-15T1{}:00:00Z"
                }}"#,
                title, category, i, i
            )
        })
        .collect();
    format!(
        r#"{{"status": "ok", "totalResults": {}, "articles": [{}]}}"#,
        titles.len(),
        articles.join(",")
    )
}

#[tokio::test]
async fn health_reports_ok() {
    let server = test_server(Arc::new(MemoryStore::new()), None);

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn list_articles_filters_by_category_and_sorts() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_articles(vec![
            seed_article("tech-old", "technology", 10),
            seed_article("biz", "business", 11),
            seed_article("tech-new", "technology", 12),
        ])
        .await
        .unwrap();
    let server = test_server(store, None);

    let response = server
        .get("/api/articles")
        .add_query_param("category", "Technology")
        .add_query_param("sortBy", "oldest")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    let titles: Vec<&str> = body["articles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["tech-old", "tech-new"]);
}

#[tokio::test]
async fn list_articles_serializes_camel_case() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_articles(vec![seed_article("tech", "technology", 10)])
        .await
        .unwrap();
    let server = test_server(store, None);

    let body: Value = server.get("/api/articles").await.json();
    let article = &body["articles"][0];
    assert_eq!(article["id"], 1);
    assert!(article.get("publishedAt").is_some());
    assert!(article.get("urlToImage").is_some());
}

#[tokio::test]
async fn list_articles_custom_date_range() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_articles(vec![
            seed_article("before", "technology", 14),
            seed_article("on-day", "technology", 15),
            seed_article("after", "technology", 16),
        ])
        .await
        .unwrap();
    let server = test_server(store, None);

    let response = server
        .get("/api/articles")
        .add_query_param("dateRange", "custom")
        .add_query_param("customDate", "2024-03-15")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["articles"][0]["title"], "on-day");
}

#[tokio::test]
async fn list_articles_unrecognized_range_returns_everything() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_articles(vec![
            seed_article("a", "technology", 10),
            seed_article("b", "business", 20),
        ])
        .await
        .unwrap();
    let server = test_server(store, None);

    let body: Value = server
        .get("/api/articles")
        .add_query_param("dateRange", "fortnight")
        .await
        .json();
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn fetch_without_key_returns_400_and_preserves_store() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_articles(vec![seed_article("existing", "technology", 10)])
        .await
        .unwrap();
    let server = test_server(Arc::clone(&store), None);

    let response = server
        .post("/api/articles/fetch")
        .json(&json!({ "category": "technology" }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["message"], "News API key not configured");

    let listing: Value = server.get("/api/articles").await.json();
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["articles"][0]["title"], "existing");
}

#[tokio::test]
async fn fetch_refreshes_store_from_provider() {
    let mock_server = MockServer::start().await;
    for category in CATEGORIES {
        let titles: &[&str] = match category {
            "technology" => &["t1", "t2"],
            "business" => &["b1"],
            _ => &[],
        };
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("category", category))
            .respond_with(ResponseTemplate::new(200).set_body_string(headlines_body(category, titles)))
            .mount(&mock_server)
            .await;
    }

    let store = Arc::new(MemoryStore::new());
    let client = NewsClient::new("test-key").with_base_url(mock_server.uri());
    let server = test_server(Arc::clone(&store), Some(client));

    let response = server.post("/api/articles/fetch").json(&json!({})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Articles fetched successfully");
    assert_eq!(body["count"], 3);

    let listing: Value = server
        .get("/api/articles")
        .add_query_param("category", "technology")
        .add_query_param("sortBy", "oldest")
        .await
        .json();
    assert_eq!(listing["total"], 2);
    // Technology precedes business in the stored batch, so its ids come first.
    assert_eq!(listing["articles"][0]["id"], 1);
    assert_eq!(listing["articles"][0]["title"], "t1");
    assert_eq!(listing["articles"][1]["id"], 2);
    assert_eq!(listing["articles"][1]["title"], "t2");
}

#[tokio::test]
async fn fetch_tolerates_failing_categories() {
    let mock_server = MockServer::start().await;
    for category in CATEGORIES {
        let response = if category == "health" {
            ResponseTemplate::new(200).set_body_string(headlines_body(category, &["h1"]))
        } else {
            ResponseTemplate::new(503)
        };
        Mock::given(method("GET"))
            .and(path("/top-headlines"))
            .and(query_param("category", category))
            .respond_with(response)
            .mount(&mock_server)
            .await;
    }

    let store = Arc::new(MemoryStore::new());
    let client = NewsClient::new("test-key").with_base_url(mock_server.uri());
    let server = test_server(store, Some(client));

    let response = server.post("/api/articles/fetch").json(&json!({})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 1);

    let listing: Value = server.get("/api/articles").await.json();
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["articles"][0]["id"], 1);
    assert_eq!(listing["articles"][0]["title"], "h1");
    assert_eq!(listing["articles"][0]["category"], "health");
}
