use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use showrunner::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    // One pooled connection, so every query sees the same in-memory database.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = showrunner::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    showrunner::api::router(state).await
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

async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = send_json(
        app,
        "POST",
        "/api/login",
        None,
        &json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

/// Registers a viewer and returns (session cookie, account id).
async fn register_viewer(app: &Router, username: &str) -> (String, i64) {
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
    let account = body["user"]["user_id"].as_i64().unwrap();
    (cookie, account)
}

async fn create_series(app: &Router, admin: &str, sname: &str) -> i64 {
    let response = send_json(
        app,
        "POST",
        "/api/admin/series",
        Some(admin),
        &json!({ "sname": sname, "nepisodes": 8, "ori_lang": "English" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["sid"].as_i64().unwrap()
}

#[tokio::test]
async fn login_me_logout_flow() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/api/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await["logged_in"], json!(false));

    let response = send_json(
        &app,
        "POST",
        "/api/login",
        None,
        &json!({ "username": "admin", "password": "wrong" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_json(response).await["error"],
        json!("Invalid username or password")
    );

    let cookie = login(&app, "admin", "password").await;

    let response = send(&app, "GET", "/api/me", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["logged_in"], json!(true));
    assert_eq!(body["user"]["username"], json!("admin"));
    assert_eq!(body["user"]["role"], json!("admin"));
    assert_eq!(body["user"]["display_name"], json!("System Administrator"));

    let response = send(&app, "POST", "/api/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/me", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_duplicates_and_missing_fields() {
    let app = spawn_app().await;

    let (_, account) = register_viewer(&app, "pat").await;
    assert!(account >= 1);

    let payload = json!({
        "username": "pat",
        "password": "another-password",
        "fname": "Pat",
        "lname": "Doe",
        "street": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "zipcode": "62704",
        "cid": 1
    });
    let response = send_json(&app, "POST", "/api/register", None, &payload).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json(response).await["error"],
        json!("Username already exists")
    );

    // The admin table occupies the same username space.
    let mut taken = payload.clone();
    taken["username"] = json!("admin");
    let response = send_json(&app, "POST", "/api/register", None, &taken).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mut missing = payload.clone();
    missing["username"] = json!("quinn");
    missing["cid"] = json!(0);
    let response = send_json(&app, "POST", "/api/register", None, &missing).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Missing required fields")
    );
}

#[tokio::test]
async fn role_gates_are_enforced_both_ways() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/api/admin/stats", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        read_json(response).await["error"],
        json!("Access denied. Admin role required.")
    );

    let (viewer, _) = register_viewer(&app, "pat").await;
    let response = send(&app, "GET", "/api/admin/stats", Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = login(&app, "admin", "password").await;
    let response = send(&app, "GET", "/api/viewer/series", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        read_json(response).await["error"],
        json!("Access denied. Viewer role required.")
    );

    let response = send(&app, "GET", "/api/viewer/series", Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn series_crud_with_validation() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;

    let response = send_json(
        &app,
        "POST",
        "/api/admin/series",
        Some(&admin),
        &json!({ "sname": "Deep Harbor", "nepisodes": 0, "ori_lang": "English" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Missing series information")
    );

    let sid = create_series(&app, &admin, "Deep Harbor").await;
    assert_eq!(sid, 1);

    let response = send(&app, "GET", "/api/admin/series", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["SID"], json!(1));
    assert_eq!(body[0]["SNAME"], json!("Deep Harbor"));
    assert_eq!(body[0]["avg_rating"], json!(null));
    assert_eq!(body[0]["genres"], json!([]));

    let response = send_json(
        &app,
        "PUT",
        "/api/admin/series/1",
        Some(&admin),
        &json!({
            "sname": "Deep Harbor",
            "nepisodes": 10,
            "ori_lang": "Korean",
            "genres": ["Drama", "Thriller"],
            "subtitles": ["English"],
            "dubbings": [],
            "release_countries": [{ "cid": 1, "release_date": "2024-03-01" }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Series 1 updated successfully.")
    );

    let response = send(&app, "GET", "/api/admin/series/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["NEPISODES"], json!(10));
    assert_eq!(body["ORI_LANG"], json!("Korean"));
    assert_eq!(body["genres"].as_array().unwrap().len(), 2);
    assert_eq!(body["subtitles"], json!(["English"]));
    assert_eq!(body["release_countries"][0]["CID"], json!(1));
    assert_eq!(body["release_countries"][0]["CNAME"], json!("United States"));

    let response = send_json(
        &app,
        "PUT",
        "/api/admin/series/999",
        Some(&admin),
        &json!({ "sname": "Ghost", "nepisodes": 1, "ori_lang": "English" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Series not found"));

    let response = send(&app, "DELETE", "/api/admin/series/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Series 1 and all related data deleted successfully.")
    );

    let response = send(&app, "GET", "/api/admin/series/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn episode_crud_follows_series() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;
    let sid = create_series(&app, &admin, "Deep Harbor").await;

    let response = send_json(
        &app,
        "POST",
        &format!("/api/admin/series/{sid}/episodes"),
        Some(&admin),
        &json!({ "schedule_sdate": "2024-01-08", "schedule_edate": "2024-01-14" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Missing episode data")
    );

    let response = send_json(
        &app,
        "POST",
        &format!("/api/admin/series/{sid}/episodes"),
        Some(&admin),
        &json!({ "e_num": 2, "schedule_sdate": "2024-01-08", "schedule_edate": "2024-01-14" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        &app,
        "POST",
        &format!("/api/admin/series/{sid}/episodes"),
        Some(&admin),
        &json!({
            "e_num": 1,
            "schedule_sdate": "2024-01-01",
            "schedule_edate": "2024-01-07",
            "nviewers": 120,
            "interruption": "Y"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        "GET",
        &format!("/api/admin/series/{sid}/episodes"),
        Some(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let episodes = body.as_array().unwrap();
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0]["E_NUM"], json!(1));
    assert_eq!(episodes[0]["NVIEWERS"], json!(120));
    assert_eq!(episodes[1]["E_NUM"], json!(2));
    assert_eq!(episodes[1]["NVIEWERS"], json!(0));
    assert_eq!(episodes[1]["INTERRUPTION"], json!("N"));
    let eid = episodes[1]["EID"].as_i64().unwrap();

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/admin/episodes/{eid}"),
        Some(&admin),
        &json!({
            "e_num": 3,
            "schedule_sdate": "2024-01-15",
            "schedule_edate": "2024-01-21",
            "nviewers": 95,
            "interruption": "N"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["message"], json!("Episode updated"));

    let response = send(&app, "DELETE", "/api/admin/episodes/999", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Episode not found"));

    let response = send(&app, "DELETE", &format!("/api/admin/episodes/{eid}"), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        &app,
        "POST",
        "/api/admin/series/999/episodes",
        Some(&admin),
        &json!({ "e_num": 1, "schedule_sdate": "2024-01-01", "schedule_edate": "2024-01-07" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Series not found"));
}

#[tokio::test]
async fn phouse_delete_blocked_by_live_contract() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;
    let sid = create_series(&app, &admin, "Deep Harbor").await;

    let response = send_json(
        &app,
        "POST",
        "/api/admin/phouses",
        Some(&admin),
        &json!({
            "name": "Northlight Studios",
            "street": "77 Pier Rd",
            "city": "Busan",
            "state": "KR",
            "zipcode": "48058",
            "est_year": 1998,
            "cid": 4
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        &app,
        "POST",
        "/api/admin/contracts",
        Some(&admin),
        &json!({
            "issued_date": "2024-05-01",
            "episode_price": 1500.5,
            "is_renew": "Y",
            "phouse_id": 1,
            "sid": sid
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "GET", "/api/admin/contracts", Some(&admin)).await;
    let body = read_json(response).await;
    assert_eq!(body[0]["CONTRACT_ID"], json!(1));
    assert_eq!(body[0]["phouse_name"], json!("Northlight Studios"));
    assert_eq!(body[0]["SNAME"], json!("Deep Harbor"));
    assert_eq!(body[0]["EPISODE_PRICE"], json!(1500.5));

    let response = send_json(
        &app,
        "PUT",
        "/api/admin/contracts/1",
        Some(&admin),
        &json!({
            "issued_date": "2024-06-01",
            "episode_price": 1750.0,
            "is_renew": null,
            "phouse_id": 1,
            "sid": sid
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["message"], json!("Contract updated"));

    let response = send(&app, "GET", "/api/admin/contracts", Some(&admin)).await;
    let body = read_json(response).await;
    assert_eq!(body[0]["EPISODE_PRICE"], json!(1750.0));
    assert_eq!(body[0]["IS_RENEW"], json!(null));

    let response = send_json(
        &app,
        "PUT",
        "/api/admin/phouses/1",
        Some(&admin),
        &json!({
            "name": "Northlight Pictures",
            "street": "77 Pier Rd",
            "city": "Busan",
            "state": "KR",
            "zipcode": "48058",
            "est_year": 1998,
            "cid": 4
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Production house updated")
    );

    let response = send(&app, "GET", "/api/admin/phouses", Some(&admin)).await;
    let body = read_json(response).await;
    assert_eq!(body[0]["NAME"], json!("Northlight Pictures"));

    let response = send(&app, "DELETE", "/api/admin/phouses/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Cannot delete production house with active contracts")
    );

    let response = send(&app, "DELETE", "/api/admin/contracts/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "DELETE", "/api/admin/phouses/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Production house deleted")
    );

    let response = send(&app, "DELETE", "/api/admin/phouses/1", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collaboration_duplicates_conflict() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;

    let response = send_json(
        &app,
        "POST",
        "/api/admin/producers",
        Some(&admin),
        &json!({
            "fname": "Jordan",
            "lname": "Avery",
            "street": "5 Oak Ln",
            "city": "Leeds",
            "state": "WY",
            "zipcode": "LS1",
            "phone": "555-0101",
            "email": "jordan@example.com",
            "cid": 2
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        &app,
        "POST",
        "/api/admin/phouses",
        Some(&admin),
        &json!({
            "name": "Northlight Studios",
            "street": "77 Pier Rd",
            "city": "Busan",
            "state": "KR",
            "zipcode": "48058",
            "est_year": 1998,
            "cid": 4
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        &app,
        "PUT",
        "/api/admin/producers/1",
        Some(&admin),
        &json!({
            "fname": "Jordan",
            "lname": "Avery",
            "street": "5 Oak Ln",
            "city": "Leeds",
            "state": "WY",
            "zipcode": "LS1",
            "phone": "555-0199",
            "email": "jordan@example.com",
            "cid": 2
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["message"], json!("Producer updated"));

    let response = send(&app, "GET", "/api/admin/producers", Some(&admin)).await;
    let body = read_json(response).await;
    assert_eq!(body[0]["PHONE"], json!("555-0199"));
    assert_eq!(body[0]["CNAME"], json!("United Kingdom"));

    let pair = json!({ "pid": 1, "phouse_id": 1 });
    let response = send_json(&app, "POST", "/api/admin/collaborations", Some(&admin), &pair).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Collaboration added")
    );

    let response = send_json(&app, "POST", "/api/admin/collaborations", Some(&admin), &pair).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json(response).await["error"],
        json!("Collaboration already exists")
    );

    let response = send(&app, "GET", "/api/admin/collaborations", Some(&admin)).await;
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["producer_name"], json!("Jordan Avery"));
    assert_eq!(body[0]["phouse_name"], json!("Northlight Studios"));

    let response =
        send_json(&app, "DELETE", "/api/admin/collaborations", Some(&admin), &pair).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response =
        send_json(&app, "DELETE", "/api/admin/collaborations", Some(&admin), &pair).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn feedback_upsert_keeps_one_row_per_viewer() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;
    let sid = create_series(&app, &admin, "Deep Harbor").await;
    let (viewer, _) = register_viewer(&app, "pat").await;

    let uri = format!("/api/viewer/series/{sid}/feedback");

    for bad in [
        json!({ "rate": 6, "ftext": "Out of range rating" }),
        json!({ "rate": 0, "ftext": "Out of range rating" }),
        json!({ "rate": 4.5, "ftext": "Fractional rating" }),
        json!({ "rate": "4", "ftext": "Stringly typed rating" }),
        json!({ "rate": 4, "ftext": "abc" }),
        json!({ "ftext": "No rating at all" }),
    ] {
        let response = send_json(&app, "POST", &uri, Some(&viewer), &bad).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await["error"],
            json!("Invalid input. Rate must be 1-5 and text must be at least 5 characters.")
        );
    }

    let response = send_json(
        &app,
        "POST",
        &uri,
        Some(&viewer),
        &json!({ "rate": 5, "ftext": "Great show!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Feedback submitted successfully")
    );

    let response = send(&app, "GET", &uri, Some(&viewer)).await;
    let body = read_json(response).await;
    assert_eq!(body["stats"]["feedback_count"], json!(1));
    assert_eq!(body["stats"]["avg_rating"], json!(5.0));
    assert_eq!(body["user_feedback"]["RATE"], json!(5));
    assert_eq!(body["feedback_list"].as_array().unwrap().len(), 1);
    assert_eq!(body["feedback_list"][0]["USERNAME"], json!("pat"));

    // Re-submitting replaces the row instead of adding a second one.
    let response = send_json(
        &app,
        "POST",
        &uri,
        Some(&viewer),
        &json!({ "rate": 3, "ftext": "Cooled off after the finale" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", &uri, Some(&viewer)).await;
    let body = read_json(response).await;
    assert_eq!(body["stats"]["feedback_count"], json!(1));
    assert_eq!(body["stats"]["avg_rating"], json!(3.0));
    assert_eq!(body["user_feedback"]["RATE"], json!(3));

    let response = send(&app, "GET", "/api/viewer/my-feedback", Some(&viewer)).await;
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["SNAME"], json!("Deep Harbor"));
    assert_eq!(body[0]["RATE"], json!(3));

    let response = send(&app, "DELETE", &uri, Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["message"],
        json!("Feedback deleted successfully")
    );

    let response = send(&app, "DELETE", &uri, Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await["error"],
        json!("No feedback found to delete")
    );
}

#[tokio::test]
async fn admin_feedback_moderation_with_filters() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;
    let sid_a = create_series(&app, &admin, "Deep Harbor").await;
    let sid_b = create_series(&app, &admin, "Midnight Office").await;

    let (pat, pat_account) = register_viewer(&app, "pat").await;
    let (quinn, _) = register_viewer(&app, "quinn").await;

    for (cookie, sid, rate) in [(&pat, sid_a, 5), (&pat, sid_b, 2), (&quinn, sid_a, 4)] {
        let response = send_json(
            &app,
            "POST",
            &format!("/api/viewer/series/{sid}/feedback"),
            Some(cookie),
            &json!({ "rate": rate, "ftext": "Detailed enough review" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, "GET", "/api/admin/feedback", Some(&admin)).await;
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 3);

    let response = send(
        &app,
        "GET",
        &format!("/api/admin/feedback?sid={sid_a}"),
        Some(&admin),
    )
    .await;
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 2);

    let response = send(
        &app,
        "GET",
        &format!("/api/admin/feedback?sid={sid_a}&rating=5"),
        Some(&admin),
    )
    .await;
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["USERNAME"], json!("pat"));
    assert_eq!(body[0]["SNAME"], json!("Deep Harbor"));

    let response = send_json(
        &app,
        "DELETE",
        "/api/admin/feedback",
        Some(&admin),
        &json!({ "account": 0, "sid": sid_a }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("account and sid are required")
    );

    let response = send_json(
        &app,
        "DELETE",
        "/api/admin/feedback",
        Some(&admin),
        &json!({ "account": pat_account, "sid": 999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Feedback not found"));

    let response = send_json(
        &app,
        "DELETE",
        "/api/admin/feedback",
        Some(&admin),
        &json!({ "account": pat_account, "sid": sid_a }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/admin/feedback", Some(&admin)).await;
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn history_records_admin_mutations_newest_first() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;

    let sid = create_series(&app, &admin, "Deep Harbor").await;
    let response = send_json(
        &app,
        "PUT",
        &format!("/api/admin/series/{sid}"),
        Some(&admin),
        &json!({ "sname": "Deep Harbor", "nepisodes": 12, "ori_lang": "English" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "DELETE", &format!("/api/admin/series/{sid}"), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/admin/history", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0]["ACTION_TYPE"], json!("DELETE"));
    assert_eq!(entries[1]["ACTION_TYPE"], json!("UPDATE"));
    assert_eq!(entries[2]["ACTION_TYPE"], json!("INSERT"));
    for entry in entries {
        assert_eq!(entry["TARGET_TABLE"], json!("DRY_SERIES"));
        assert_eq!(entry["admin_name"], json!("System Administrator"));
    }
    assert_eq!(
        entries[2]["SQL_TEXT"],
        json!("INSERT INTO DRY_SERIES (SNAME, NEPISODES, ORI_LANG) VALUES ('Deep Harbor', 8, 'English')")
    );
    assert_eq!(
        entries[0]["SQL_TEXT"],
        json!(format!("DELETE FROM DRY_SERIES WHERE SID = {sid}"))
    );
}

#[tokio::test]
async fn viewer_browse_filters_and_recommendations() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;

    let sid_a = create_series(&app, &admin, "Deep Harbor").await;
    let sid_b = create_series(&app, &admin, "Autumn Letters").await;

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/admin/series/{sid_a}"),
        Some(&admin),
        &json!({
            "sname": "Deep Harbor",
            "nepisodes": 8,
            "ori_lang": "English",
            "genres": ["Drama"],
            "subtitles": ["English"],
            "dubbings": ["Japanese"],
            "release_countries": [{ "cid": 3, "release_date": "2024-03-01" }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let (pat, _) = register_viewer(&app, "pat").await;
    let (quinn, _) = register_viewer(&app, "quinn").await;

    for (cookie, sid, rate) in [(&pat, sid_a, 5), (&quinn, sid_a, 4), (&pat, sid_b, 3)] {
        let response = send_json(
            &app,
            "POST",
            &format!("/api/viewer/series/{sid}/feedback"),
            Some(cookie),
            &json!({ "rate": rate, "ftext": "Detailed enough review" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Whole catalog, ordered by name.
    let response = send(&app, "GET", "/api/viewer/series", Some(&pat)).await;
    let body = read_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["SNAME"], json!("Autumn Letters"));
    assert_eq!(rows[1]["SNAME"], json!("Deep Harbor"));
    assert_eq!(rows[1]["genres"], json!(["Drama"]));
    assert_eq!(rows[1]["countries"][0]["CNAME"], json!("Japan"));
    assert_eq!(rows[1]["avg_rating"], json!(4.5));
    assert_eq!(rows[1]["feedback_count"], json!(2));

    let response = send(&app, "GET", "/api/viewer/series?genre=Drama", Some(&pat)).await;
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["SID"], json!(sid_a));

    let response = send(&app, "GET", "/api/viewer/series?genre=Horror", Some(&pat)).await;
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 0);

    let response = send(&app, "GET", "/api/viewer/series?country=3", Some(&pat)).await;
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["SID"], json!(sid_a));

    let response = send(
        &app,
        "GET",
        &format!("/api/viewer/series/{sid_a}"),
        Some(&pat),
    )
    .await;
    let body = read_json(response).await;
    assert_eq!(body["SNAME"], json!("Deep Harbor"));
    assert_eq!(body["subtitles"], json!(["English"]));
    assert_eq!(body["dubbings"], json!(["Japanese"]));
    assert_eq!(body["release_countries"][0]["CNAME"], json!("Japan"));
    assert!(body["release_countries"][0].get("CID").is_none());
    assert_eq!(body["episodes"], json!([]));

    let response = send(&app, "GET", "/api/viewer/series/999", Some(&pat)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", "/api/viewer/recommendations", Some(&pat)).await;
    let body = read_json(response).await;
    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["SNAME"], json!("Deep Harbor"));
    assert_eq!(ranked[0]["avg_rating"], json!(4.5));
    assert_eq!(ranked[0]["feedback_count"], json!(2));
    assert_eq!(ranked[1]["SNAME"], json!("Autumn Letters"));
}

#[tokio::test]
async fn viewer_profile_and_password_rules() {
    let app = spawn_app().await;
    let (viewer, account) = register_viewer(&app, "pat").await;

    let response = send(&app, "GET", "/api/viewer/profile", Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["ACCOUNT"], json!(account));
    assert_eq!(body["USERNAME"], json!("pat"));
    assert_eq!(body["CNAME"], json!("United States"));

    let response = send_json(
        &app,
        "PUT",
        "/api/viewer/profile",
        Some(&viewer),
        &json!({ "street": "9 Elm St", "city": "Kyoto", "state": "KY", "zipcode": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("All address fields and country are required.")
    );

    let response = send_json(
        &app,
        "PUT",
        "/api/viewer/profile",
        Some(&viewer),
        &json!({ "street": "9 Elm St", "city": "Kyoto", "state": "KY", "zipcode": "600", "cid": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/viewer/profile", Some(&viewer)).await;
    let body = read_json(response).await;
    assert_eq!(body["STREET"], json!("9 Elm St"));
    assert_eq!(body["CNAME"], json!("Japan"));

    let response = send_json(
        &app,
        "POST",
        "/api/viewer/change-password",
        Some(&viewer),
        &json!({ "old_password": "correct-horse-battery" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Old password, security answer and new password are required")
    );

    let response = send_json(
        &app,
        "POST",
        "/api/viewer/change-password",
        Some(&viewer),
        &json!({
            "old_password": "not-my-password",
            "new_password": "next-password-here",
            "security_answer": "blue"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_json(response).await["error"],
        json!("Invalid old password")
    );

    // Registration never sets a security answer, so rotation stays locked.
    let response = send_json(
        &app,
        "POST",
        "/api/viewer/change-password",
        Some(&viewer),
        &json!({
            "old_password": "correct-horse-battery",
            "new_password": "next-password-here",
            "security_answer": "blue"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("Security answer not set for this account")
    );

    let response = send(&app, "GET", "/api/viewer/security-question", Some(&viewer)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await["error"],
        json!("Security question not set")
    );
}

#[tokio::test]
async fn admin_viewer_management() {
    let app = spawn_app().await;
    let admin = login(&app, "admin", "password").await;
    let (viewer, account) = register_viewer(&app, "pat").await;
    let sid = create_series(&app, &admin, "Deep Harbor").await;

    let response = send_json(
        &app,
        "POST",
        &format!("/api/viewer/series/{sid}/feedback"),
        Some(&viewer),
        &json!({ "rate": 5, "ftext": "Detailed enough review" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/api/admin/viewers", Some(&admin)).await;
    let body = read_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["USERNAME"], json!("pat"));
    assert_eq!(rows[0]["CNAME"], json!("United States"));
    assert_eq!(rows[0]["feedback_count"], json!(1));
    assert_eq!(rows[0]["MCHARGE"], json!(9.99));

    let response = send(
        &app,
        "GET",
        &format!("/api/admin/viewers/{account}"),
        Some(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["STREET"], json!("1 Main St"));

    let response = send(&app, "GET", "/api/admin/viewers/999", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Viewer not found"));

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/admin/viewers/{account}"),
        Some(&admin),
        &json!({
            "street": "2 Side St",
            "city": "Springfield",
            "state": "IL",
            "zipcode": "62704",
            "mcharge": 14.5,
            "cid": 2
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["message"], json!("Viewer updated"));

    let response = send(
        &app,
        "GET",
        &format!("/api/admin/viewers/{account}"),
        Some(&admin),
    )
    .await;
    let body = read_json(response).await;
    assert_eq!(body["MCHARGE"], json!(14.5));
    assert_eq!(body["CNAME"], json!("United Kingdom"));
}

#[tokio::test]
async fn metrics_endpoint_reports_disabled_without_recorder() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Metrics not enabled"));
}
