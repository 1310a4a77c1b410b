//! HTTP contract of the `/posts` resource, exercised over the in-memory store.

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use api_server::AppState;
use api_server::handlers::configure_routes;
use blogpost_core::ports::{BaseRepository, BlogPostRepository};

use common::{SEED_COUNT, generate_blog_data, seed_blog_data, tear_down_db};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Fresh state seeded with generated posts.
async fn seeded_state() -> AppState {
    let state = AppState::in_memory();
    seed_blog_data(state.posts.as_ref()).await;
    state
}

mod get_endpoint {
    use super::*;

    #[actix_web::test]
    async fn returns_all_existing_posts() {
        let state = seeded_state().await;
        let app = init_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<Value> = test::read_body_json(resp).await;
        assert!(!body.is_empty());
        let count = state.posts.count().await.unwrap();
        assert_eq!(body.len() as u64, count);
        assert_eq!(body.len(), SEED_COUNT);

        tear_down_db(state.posts.as_ref()).await;
    }

    #[actix_web::test]
    async fn returns_posts_with_right_fields() {
        let state = seeded_state().await;
        let app = init_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body: Vec<Value> = test::read_body_json(resp).await;
        assert!(!body.is_empty());
        for post in &body {
            let mut keys: Vec<&str> = post.as_object().unwrap().keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["author", "content", "created", "id", "title"]);
            assert!(post["author"].is_string());
        }

        let first = &body[0];
        let id: Uuid = first["id"].as_str().unwrap().parse().unwrap();
        let stored = state.posts.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(first["id"], stored.id.to_string());
        assert_eq!(first["author"], stored.author_name());
        assert_eq!(
            first["author"],
            format!("{} {}", stored.author.first_name, stored.author.last_name)
        );
        assert_eq!(first["title"], stored.title);
        assert_eq!(first["content"], stored.content);
        assert_eq!(
            first["created"].as_str().unwrap().parse::<chrono::DateTime<chrono::Utc>>().unwrap(),
            stored.created
        );
    }

    #[actix_web::test]
    async fn returns_empty_array_for_empty_store() {
        let state = AppState::in_memory();
        let app = init_app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/posts").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<Value> = test::read_body_json(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn fetches_single_post_by_id() {
        let state = AppState::in_memory();
        let seeded = seed_blog_data(state.posts.as_ref()).await;
        let app = init_app!(state);
        let target = &seeded[3];

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/posts/{}", target.id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], target.id.to_string());
        assert_eq!(body["author"], target.author_name());
    }

    #[actix_web::test]
    async fn malformed_id_problem_names_the_path() {
        let state = seeded_state().await;
        let app = init_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/posts/not-a-uuid").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["instance"], "/posts/not-a-uuid");
    }

    #[actix_web::test]
    async fn missing_or_malformed_id_is_not_found() {
        let state = seeded_state().await;
        let app = init_app!(state);

        for uri in [format!("/posts/{}", Uuid::new_v4()), "/posts/not-a-uuid".to_string()] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["status"], 404);
        }
    }
}

mod post_endpoint {
    use super::*;

    #[actix_web::test]
    async fn adds_a_new_post() {
        let state = seeded_state().await;
        let app = init_app!(state);
        let new_post = generate_blog_data();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(&new_post)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["author", "content", "created", "id", "title"]);
        assert!(!body["id"].is_null());
        assert_eq!(body["title"], new_post.title);
        assert_eq!(body["content"], new_post.content);
        assert_eq!(
            body["author"],
            format!(
                "{} {}",
                new_post.author.first_name, new_post.author.last_name
            )
        );

        let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
        let stored = state.posts.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.title, new_post.title);
        assert_eq!(stored.author.first_name, new_post.author.first_name);
        assert_eq!(stored.author.last_name, new_post.author.last_name);
        assert_eq!(stored.content, new_post.content);

        let sent_created = blogpost_core::domain::truncate_to_millis(new_post.created.unwrap());
        assert_eq!(stored.created, sent_created);
        assert_eq!(
            body["created"].as_str().unwrap().parse::<chrono::DateTime<chrono::Utc>>().unwrap(),
            sent_created
        );
        assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64 + 1);
    }

    #[actix_web::test]
    async fn round_trips_literal_post_and_defaults_created() {
        let state = AppState::in_memory();
        let app = init_app!(state);
        let before = blogpost_core::domain::truncate_to_millis(chrono::Utc::now());

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({
                    "author": {"firstName": "A", "lastName": "B"},
                    "title": "T",
                    "content": "C"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["author"], "A B");
        assert_eq!(body["title"], "T");
        assert_eq!(body["content"], "C");

        let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
        let stored = state.posts.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.author.first_name, "A");
        assert_eq!(stored.author.last_name, "B");
        assert!(stored.created >= before);
    }

    #[actix_web::test]
    async fn rejects_missing_required_field() {
        let state = seeded_state().await;
        let app = init_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({
                    "author": {"firstName": "A", "lastName": "B"},
                    "content": "C"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().contains("title"));
        assert_eq!(body["instance"], "/posts");
        assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64);
    }

    #[actix_web::test]
    async fn rejects_blank_author_name() {
        let state = AppState::in_memory();
        let app = init_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({
                    "author": {"firstName": "", "lastName": "B"},
                    "title": "T",
                    "content": "C"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.posts.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn rejects_values_the_store_cannot_hold() {
        let state = AppState::in_memory();
        let app = init_app!(state);

        let bodies = [
            json!({
                "author": {"firstName": "A", "lastName": "B"},
                "title": "T\u{0}",
                "content": "C"
            }),
            json!({
                "author": {"firstName": "A\u{0}", "lastName": "B"},
                "title": "T",
                "content": "C"
            }),
            json!({
                "author": {"firstName": "A", "lastName": "B"},
                "title": "T",
                "content": "C",
                "created": "-005000-01-01T00:00:00Z"
            }),
        ];

        for body in bodies {
            let resp = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/posts")
                    .set_json(&body)
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
            let problem: Value = test::read_body_json(resp).await;
            assert_eq!(problem["status"], 400);
        }
        assert_eq!(state.posts.count().await.unwrap(), 0);
    }
}

mod put_endpoint {
    use super::*;

    #[actix_web::test]
    async fn updates_fields_you_send_over() {
        let state = seeded_state().await;
        let app = init_app!(state);
        let post = state.posts.find_one().await.unwrap().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/posts/{}", post.id))
                .set_json(json!({
                    "id": post.id.to_string(),
                    "title": "fofofofofofofof",
                    "content": "futuristic fusion"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "fofofofofofofof");
        assert_eq!(stored.content, "futuristic fusion");
        assert_eq!(stored.author, post.author);
        assert_eq!(stored.created, post.created);
    }

    #[actix_web::test]
    async fn leaves_absent_fields_untouched() {
        let state = seeded_state().await;
        let app = init_app!(state);
        let post = state.posts.find_one().await.unwrap().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/posts/{}", post.id))
                .set_json(json!({"title": "Only the title"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Only the title");
        assert_eq!(stored.content, post.content);
    }

    #[actix_web::test]
    async fn missing_post_is_not_found() {
        let state = seeded_state().await;
        let app = init_app!(state);

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/posts/{}", Uuid::new_v4()))
                .set_json(json!({"title": "X"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn mismatched_body_id_is_rejected() {
        let state = seeded_state().await;
        let app = init_app!(state);
        let post = state.posts.find_one().await.unwrap().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/posts/{}", post.id))
                .set_json(json!({"id": Uuid::new_v4().to_string(), "title": "X"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, post.title);
    }
}

mod delete_endpoint {
    use super::*;

    #[actix_web::test]
    async fn deletes_a_post_by_id() {
        let state = seeded_state().await;
        let app = init_app!(state);
        let post = state.posts.find_one().await.unwrap().unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/posts/{}", post.id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        assert!(state.posts.find_by_id(post.id).await.unwrap().is_none());
        assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64 - 1);
    }

    #[actix_web::test]
    async fn deleting_twice_is_still_no_content() {
        let state = seeded_state().await;
        let app = init_app!(state);
        let post = state.posts.find_one().await.unwrap().unwrap();
        let uri = format!("/posts/{}", post.id);

        for _ in 0..2 {
            let resp =
                test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        }
        assert!(state.posts.find_by_id(post.id).await.unwrap().is_none());
    }
}

#[actix_web::test]
async fn unknown_route_is_a_json_not_found() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["instance"], "/nope");
}

#[actix_web::test]
async fn health_reports_store_kind() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn teardown_empties_the_store() {
    let state = seeded_state().await;
    assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64);

    tear_down_db(state.posts.as_ref()).await;
    assert_eq!(state.posts.count().await.unwrap(), 0);
}
