use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use showrunner::api::AppState;
use showrunner::config::Config;
use tower::ServiceExt;

async fn spawn_app_with_state() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    // One pooled connection, so every query sees the same in-memory database.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = showrunner::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = showrunner::api::router(state.clone()).await;
    (app, state)
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response carries no session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn read_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: &Value,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn login_admin(app: &Router) -> String {
    let response = send_json(
        app,
        "POST",
        "/api/login",
        None,
        &json!({ "username": "admin", "password": "password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

async fn register_viewer(app: &Router, username: &str) -> (String, i32) {
    let response = send_json(
        app,
        "POST",
        "/api/register",
        None,
        &json!({
            "username": username,
            "password": "correct-horse-battery",
            "fname": "Pat",
            "lname": "Doe",
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zipcode": "62704",
            "cid": 1
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let body = read_json(response).await;
    let account = i32::try_from(body["user"]["user_id"].as_i64().unwrap()).unwrap();
    (cookie, account)
}

async fn create_series(app: &Router, admin: &str, sname: &str) -> i32 {
    let response = send_json(
        app,
        "POST",
        "/api/admin/series",
        Some(admin),
        &json!({ "sname": sname, "nepisodes": 8, "ori_lang": "English" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    i32::try_from(read_json(response).await["sid"].as_i64().unwrap()).unwrap()
}

async fn submit_feedback(app: &Router, cookie: &str, sid: i32, rate: i32, ftext: &str) {
    let response = send_json(
        app,
        "POST",
        &format!("/api/viewer/series/{sid}/feedback"),
        Some(cookie),
        &json!({ "rate": rate, "ftext": ftext }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn run_report(app: &Router, admin: &str, key: &str) -> Value {
    let response = send(app, "GET", &format!("/api/admin/reports/{key}"), Some(admin)).await;
    assert_eq!(response.status(), StatusCode::OK, "report {key} failed");
    read_json(response).await
}

#[tokio::test]
async fn every_report_runs_and_unknown_keys_are_rejected() {
    let (app, _state) = spawn_app_with_state().await;

    let response = send(&app, "GET", "/api/admin/reports/q1", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = login_admin(&app).await;

    for key in ["q1", "q2", "q3", "q4", "q5", "q6"] {
        let body = run_report(&app, &admin, key).await;
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("SELECT"), "{key} query text missing");
        assert!(body["result"].is_array(), "{key} result is not an array");
        // Nothing beyond the reference data is seeded, so every report is empty.
        assert_eq!(body["result"].as_array().unwrap().len(), 0);
    }

    let response = send(&app, "GET", "/api/admin/reports/q7", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Unknown report: q7"));
}

#[tokio::test]
async fn reports_reflect_catalog_state() {
    let (app, _state) = spawn_app_with_state().await;
    let admin = login_admin(&app).await;

    let harbor = create_series(&app, &admin, "Deep Harbor").await;
    let letters = create_series(&app, &admin, "Autumn Letters").await;

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/admin/series/{harbor}"),
        Some(&admin),
        &json!({
            "sname": "Deep Harbor",
            "nepisodes": 8,
            "ori_lang": "English",
            "genres": ["Drama"],
            "subtitles": ["English"],
            "dubbings": [],
            "release_countries": [{ "cid": 1, "release_date": "2024-03-01" }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/admin/series/{letters}"),
        Some(&admin),
        &json!({
            "sname": "Autumn Letters",
            "nepisodes": 8,
            "ori_lang": "Korean",
            "genres": ["Romance"],
            "subtitles": [],
            "dubbings": ["English"],
            "release_countries": []
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (pat, _) = register_viewer(&app, "pat").await;
    let (quinn, _) = register_viewer(&app, "quinn").await;

    // Deep Harbor averages exactly 4.0; Autumn Letters averages 4.5.
    submit_feedback(&app, &pat, harbor, 5, "Loved every minute").await;
    submit_feedback(&app, &quinn, harbor, 3, "Lost me midway").await;
    submit_feedback(&app, &pat, letters, 5, "Beautifully shot").await;
    submit_feedback(&app, &quinn, letters, 4, "Solid second half").await;

    // q1: one row per series x genre x release country. Only Deep Harbor
    // carries both a genre and a release country.
    let body = run_report(&app, &admin, "q1").await;
    let rows = body["result"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["SNAME"], json!("Deep Harbor"));
    assert_eq!(rows[0]["Genre"], json!("Drama"));
    assert_eq!(rows[0]["ReleaseCountry"], json!("United States"));
    assert_eq!(rows[0]["RELEASE_DATE"], json!("2024-03-01"));

    // q2: both viewers reviewed the Drama-tagged series.
    let body = run_report(&app, &admin, "q2").await;
    let rows = body["result"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let mut usernames: Vec<&str> = rows
        .iter()
        .map(|r| r["USERNAME"].as_str().unwrap())
        .collect();
    usernames.sort_unstable();
    assert_eq!(usernames, ["pat", "quinn"]);

    // q3: only ratings strictly above their own series' average survive.
    let body = run_report(&app, &admin, "q3").await;
    let rows = body["result"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["SNAME"], json!("Autumn Letters"));
    assert_eq!(rows[0]["USERNAME"], json!("pat"));
    assert_eq!(rows[0]["RATE"], json!(5));
    assert_eq!(rows[1]["SNAME"], json!("Deep Harbor"));
    assert_eq!(rows[1]["RATE"], json!(5));

    // q4: English subtitles or English dubbing, deduplicated.
    let body = run_report(&app, &admin, "q4").await;
    let rows = body["result"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let mut names: Vec<&str> = rows.iter().map(|r| r["SNAME"].as_str().unwrap()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Autumn Letters", "Deep Harbor"]);

    // q5: an average of exactly 4.0 does not qualify.
    let body = run_report(&app, &admin, "q5").await;
    let rows = body["result"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["SNAME"], json!("Autumn Letters"));
    assert_eq!(rows[0]["avg_rating"], json!(4.5));
    assert_eq!(rows[0]["feedback_count"], json!(2));

    // q6: equal feedback counts fall back to account order.
    let body = run_report(&app, &admin, "q6").await;
    let rows = body["result"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["USERNAME"], json!("pat"));
    assert_eq!(rows[0]["total_feedback"], json!(2));
    assert_eq!(rows[1]["USERNAME"], json!("quinn"));
}

#[tokio::test]
async fn stats_and_growth_track_the_catalog() {
    let (app, state) = spawn_app_with_state().await;
    let admin = login_admin(&app).await;

    let harbor = create_series(&app, &admin, "Deep Harbor").await;
    let letters = create_series(&app, &admin, "Autumn Letters").await;

    let (pat, _) = register_viewer(&app, "pat").await;
    let (quinn, quinn_account) = register_viewer(&app, "quinn").await;
    let (_rory, rory_account) = register_viewer(&app, "rory").await;

    submit_feedback(&app, &pat, harbor, 5, "Loved every minute").await;
    submit_feedback(&app, &quinn, harbor, 4, "Solid season").await;

    // Backdated rows pin the recency window: seven days ago is still
    // recent, eight days ago is not.
    let today = chrono::Local::now().date_naive();
    state
        .store()
        .upsert_feedback(
            rory_account,
            letters,
            3,
            "Seven days out".to_string(),
            today - chrono::Duration::days(7),
        )
        .await
        .unwrap();
    state
        .store()
        .upsert_feedback(
            quinn_account,
            letters,
            2,
            "Eight days out".to_string(),
            today - chrono::Duration::days(8),
        )
        .await
        .unwrap();

    let response = send(&app, "GET", "/api/admin/stats", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total_series"], json!(2));
    assert_eq!(body["total_viewers"], json!(3));
    assert_eq!(body["total_feedback"], json!(4));
    assert_eq!(body["recent_feedback"], json!(3));

    let top = body["top_series"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["SNAME"], json!("Deep Harbor"));
    assert_eq!(top[0]["avg_rating"], json!(4.5));
    assert_eq!(top[1]["SNAME"], json!("Autumn Letters"));

    let month = today.format("%Y-%m").to_string();

    let response = send(&app, "GET", "/api/admin/viewer-growth", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["month"], json!(month));
    assert_eq!(points[0]["new_viewers"], json!(3));

    let response = send(&app, "GET", "/api/admin/revenue-growth", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["month"], json!(month));
    let revenue_new = points[0]["revenue_new"].as_f64().unwrap();
    let revenue_total = points[0]["revenue_total"].as_f64().unwrap();
    assert!((revenue_new - 29.97).abs() < 1e-9);
    assert!((revenue_total - 29.97).abs() < 1e-9);
}
