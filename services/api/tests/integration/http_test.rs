use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use uuid::Uuid;

use eloquia_api::router::build_router;
use eloquia_api::state::AppState;
use eloquia_api_schema::{doctor_patient_links, pairing_codes};
use eloquia_api_migration::Migrator;
use eloquia_domain::session::Subject;
use eloquia_testing::auth::TestAuth;
use eloquia_testing::db::memory_database;

const SESSION_COOKIE: &str = "eloquia_session";

async fn server() -> (TestServer, TestAuth) {
    let (server, auth, _) = server_with_db().await;
    (server, auth)
}

/// Like [`server`], also handing back the store so tests can seed rows.
async fn server_with_db() -> (TestServer, TestAuth, DatabaseConnection) {
    let auth = TestAuth::new();
    let db = memory_database::<Migrator>().await;
    let app = build_router(AppState::new(db.clone(), &auth.settings));
    (TestServer::new(app).unwrap(), auth, db)
}

async fn issue_code(server: &TestServer, doctor_cookie: &Cookie<'static>) -> String {
    let response = server
        .post("/links/pairing-code")
        .add_cookie(doctor_cookie.clone())
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["code"].as_str().unwrap().to_owned()
}

async fn register(server: &TestServer, role: &str, email: &str) -> (Value, Cookie<'static>) {
    let response = server
        .post(&format!("/{role}/register"))
        .json(&json!({
            "email": email,
            "displayName": format!("{role} {email}"),
            "password": "password123",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let cookie = response.cookie(SESSION_COOKIE);
    (response.json::<Value>(), cookie)
}

#[tokio::test]
async fn should_serve_health_ready_and_docs() {
    let (server, _) = server().await;

    let health = server.get("/health").await;
    health.assert_status_ok();
    health.assert_json(&json!({"status": "ok"}));
    assert!(!health.header("x-request-id").is_empty());

    let ready = server.get("/ready").await;
    ready.assert_status_ok();
    ready.assert_json(&json!({"status": "ready"}));

    server.get("/healthz").await.assert_status_ok();

    let doc = server.get("/docs/doc.json").await.json::<Value>();
    assert!(doc["paths"]["/patient/entries/sync"].is_object());

    let page = server.get("/docs").await;
    page.assert_status_ok();
    assert!(page.text().contains("/docs/doc.json"));
}

#[tokio::test]
async fn should_make_registering_doctor_practice_owner() {
    let (server, _) = server().await;
    let (body, cookie) = register(&server, "doctor", "owner@clinic.test").await;
    assert_eq!(body["doctor"]["role"], "Owner");

    let response = server
        .post("/practice")
        .add_cookie(cookie.clone())
        .json(&json!({"name": "Speech Clinic", "address": "1 Main St"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["practice"]["name"], "Speech Clinic");
    assert_eq!(body["doctor"]["practiceId"], body["practice"]["id"]);
    assert_eq!(body["doctor"]["role"], "Owner");

    let me = server
        .get("/doctor/me")
        .add_cookie(cookie)
        .await
        .json::<Value>();
    assert_eq!(me["doctor"]["practiceId"], body["practice"]["id"]);
}

#[tokio::test]
async fn should_share_synced_entries_after_pairing() {
    let (server, _) = server().await;
    let (_, doctor_cookie) = register(&server, "doctor", "dr@clinic.test").await;
    let (patient_body, patient_cookie) = register(&server, "patient", "pat@home.test").await;
    let patient_id = patient_body["patient"]["id"].as_str().unwrap().to_owned();
    let entry_id = Uuid::new_v4().to_string();

    let synced = server
        .post("/patient/entries/sync")
        .add_cookie(patient_cookie.clone())
        .json(&json!({
            "entries": [{
                "id": entry_id,
                "happenedAt": "2024-01-02T08:30:00Z",
                "stutterFrequency": 3,
                "notes": "ordered coffee",
            }],
        }))
        .await;
    synced.assert_status_ok();
    assert_eq!(synced.json::<Value>()["entries"][0]["id"], entry_id.as_str());

    let forbidden = server
        .get(&format!("/patients/{patient_id}/entries"))
        .add_cookie(doctor_cookie.clone())
        .await;
    forbidden.assert_status(StatusCode::FORBIDDEN);

    let code = server
        .post("/links/pairing-code")
        .add_cookie(doctor_cookie.clone())
        .await;
    code.assert_status(StatusCode::CREATED);
    let code = code.json::<Value>()["code"].as_str().unwrap().to_owned();
    assert_eq!(code.len(), 6);

    let redeemed = server
        .post("/links/pairing-code/redeem")
        .add_cookie(patient_cookie.clone())
        .json(&json!({"code": code}))
        .await;
    redeemed.assert_status_ok();
    assert_eq!(redeemed.json::<Value>()["link"]["status"], "Approved");

    let again = server
        .post("/links/pairing-code/redeem")
        .add_cookie(patient_cookie.clone())
        .json(&json!({"code": code}))
        .await;
    again.assert_status(StatusCode::NOT_FOUND);

    let entries = server
        .get(&format!("/patients/{patient_id}/entries"))
        .add_cookie(doctor_cookie.clone())
        .await;
    entries.assert_status_ok();
    let entries = entries.json::<Value>();
    assert_eq!(entries["entries"][0]["id"], entry_id.as_str());
    assert_eq!(entries["entries"][0]["notes"], "ordered coffee");

    let patients = server
        .get("/patients")
        .add_cookie(doctor_cookie.clone())
        .await
        .json::<Value>();
    assert_eq!(patients["patients"][0]["id"], patient_id.as_str());

    let mydoctor = server
        .get("/patient/mydoctor")
        .add_cookie(patient_cookie)
        .await;
    mydoctor.assert_status_ok();
    assert_eq!(mydoctor.json::<Value>()["doctor"]["email"], "dr@clinic.test");

    let analytics = server
        .get(&format!("/patients/{patient_id}/analytics?range=30"))
        .add_cookie(doctor_cookie)
        .await;
    analytics.assert_status_ok();
    assert_eq!(analytics.json::<Value>()["rangeDays"], 30);
}

#[tokio::test]
async fn should_reject_requests_without_session() {
    let (server, _) = server().await;
    for path in ["/doctor/me", "/patient/me", "/patients", "/entries/recent"] {
        let response = server.get(path).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn should_clear_cookie_for_expired_or_forged_session() {
    let (server, auth) = server().await;
    let (body, _) = register(&server, "doctor", "dr@clinic.test").await;
    let doctor_id: Uuid = body["doctor"]["id"].as_str().unwrap().parse().unwrap();

    for cookie in [
        auth.expired_cookie(Subject::Doctor(doctor_id)),
        auth.forged_cookie(Subject::Doctor(doctor_id)),
    ] {
        let response = server.get("/doctor/me").add_cookie(cookie).await;
        response.assert_status_unauthorized();
        assert_eq!(response.cookie(SESSION_COOKIE).value(), "");
    }
}

#[tokio::test]
async fn should_reject_session_of_other_role() {
    let (server, _) = server().await;
    let (_, patient_cookie) = register(&server, "patient", "pat@home.test").await;

    server
        .get("/doctor/me")
        .add_cookie(patient_cookie)
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn should_reject_session_of_unknown_account() {
    let (server, auth) = server().await;
    let response = server
        .get("/patient/me")
        .add_cookie(auth.cookie(Subject::Patient(Uuid::now_v7())))
        .await;
    response.assert_status_unauthorized();
    assert_eq!(response.cookie(SESSION_COOKIE).value(), "");
}

#[tokio::test]
async fn should_reject_malformed_json() {
    let (server, _) = server().await;
    let response = server
        .post("/doctor/register")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["message"], "invalid JSON payload");
}

#[tokio::test]
async fn should_log_in_and_out() {
    let (server, _) = server().await;
    register(&server, "patient", "pat@home.test").await;

    let wrong = server
        .post("/patient/login")
        .json(&json!({"email": "pat@home.test", "password": "wrong-password"}))
        .await;
    wrong.assert_status_unauthorized();

    let login = server
        .post("/patient/login")
        .json(&json!({"email": "PAT@home.test", "password": "password123"}))
        .await;
    login.assert_status_ok();
    let cookie = login.cookie(SESSION_COOKIE);

    let logout = server.post("/patient/logout").add_cookie(cookie).await;
    logout.assert_status_ok();
    logout.assert_json(&json!({"status": "logged out"}));
    assert_eq!(logout.cookie(SESSION_COOKIE).value(), "");
}

#[tokio::test]
async fn should_report_missing_doctor_for_unlinked_patient() {
    let (server, _) = server().await;
    let (_, cookie) = register(&server, "patient", "pat@home.test").await;

    let response = server.get("/patient/mydoctor").add_cookie(cookie).await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["kind"], "NO_DOCTOR_ASSIGNED");
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let (server, _) = server().await;
    register(&server, "doctor", "dr@clinic.test").await;

    let response = server
        .post("/doctor/register")
        .json(&json!({
            "email": "Dr@Clinic.test",
            "displayName": "Other",
            "password": "password123",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_invalidate_previous_code_when_issuing_new_one() {
    let (server, _) = server().await;
    let (_, doctor_cookie) = register(&server, "doctor", "dr@clinic.test").await;
    let (_, patient_cookie) = register(&server, "patient", "pat@home.test").await;

    let old = issue_code(&server, &doctor_cookie).await;
    let mut new = issue_code(&server, &doctor_cookie).await;
    while new == old {
        new = issue_code(&server, &doctor_cookie).await;
    }

    let stale = server
        .post("/links/pairing-code/redeem")
        .add_cookie(patient_cookie.clone())
        .json(&json!({"code": old}))
        .await;
    stale.assert_status_not_found();
    assert_eq!(stale.json::<Value>()["kind"], "PAIRING_CODE_NOT_FOUND");

    let hyphenated = format!("{}-{}", &new[..3], &new[3..]);
    server
        .post("/links/pairing-code/redeem")
        .add_cookie(patient_cookie)
        .json(&json!({"code": hyphenated}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_reject_expired_code() {
    let (server, _, db) = server_with_db().await;
    let (doctor, _) = register(&server, "doctor", "dr@clinic.test").await;
    let (_, patient_cookie) = register(&server, "patient", "pat@home.test").await;
    let doctor_id: Uuid = doctor["doctor"]["id"].as_str().unwrap().parse().unwrap();

    let now = Utc::now();
    pairing_codes::ActiveModel {
        id: Set(Uuid::now_v7()),
        code: Set("654321".to_owned()),
        doctor_id: Set(doctor_id),
        expires_at: Set(now - Duration::seconds(1)),
        consumed_at: Set(None),
        consumed_by_patient_id: Set(None),
        created_at: Set(now - Duration::seconds(121)),
    }
    .insert(&db)
    .await
    .unwrap();

    let response = server
        .post("/links/pairing-code/redeem")
        .add_cookie(patient_cookie.clone())
        .json(&json!({"code": "654321"}))
        .await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["message"], "code not found or expired");

    server
        .get("/patient/mydoctor")
        .add_cookie(patient_cookie)
        .await
        .assert_status_not_found();
    assert_eq!(doctor_patient_links::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_upgrade_pending_link_in_place_on_redeem() {
    let (server, _, db) = server_with_db().await;
    let (_, doctor_cookie) = register(&server, "doctor", "dr@clinic.test").await;
    let (_, patient_cookie) = register(&server, "patient", "pat@home.test").await;

    let invite = json!({"patientEmail": "pat@home.test"});
    let invited = server
        .post("/links/invite")
        .add_cookie(doctor_cookie.clone())
        .json(&invite)
        .await;
    invited.assert_status(StatusCode::CREATED);
    let invited = invited.json::<Value>();
    assert_eq!(invited["link"]["status"], "Pending");

    server
        .post("/links/invite")
        .add_cookie(doctor_cookie.clone())
        .json(&invite)
        .await
        .assert_status(StatusCode::CONFLICT);

    let code = issue_code(&server, &doctor_cookie).await;
    let redeemed = server
        .post("/links/pairing-code/redeem")
        .add_cookie(patient_cookie)
        .json(&json!({"code": code}))
        .await;
    redeemed.assert_status_ok();
    let redeemed = redeemed.json::<Value>();
    assert_eq!(redeemed["link"]["id"], invited["link"]["id"]);
    assert_eq!(redeemed["link"]["status"], "Approved");
    assert!(redeemed["link"]["approvedAt"].is_string());

    let links = doctor_patient_links::Entity::find().all(&db).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].status, "Approved");

    let patients = server
        .get("/patients")
        .add_cookie(doctor_cookie.clone())
        .await
        .json::<Value>();
    assert_eq!(patients["patients"].as_array().unwrap().len(), 1);
    assert!(patients["pendingLinks"].as_array().unwrap().is_empty());

    server
        .post(&format!("/links/{}/approve", Uuid::now_v7()))
        .add_cookie(doctor_cookie)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn should_clear_notes_and_keep_tags_on_reupload() {
    let (server, _) = server().await;
    let (_, cookie) = register(&server, "patient", "pat@home.test").await;
    let id = Uuid::new_v4().to_string();

    server
        .post("/patient/entries/sync")
        .add_cookie(cookie.clone())
        .json(&json!({"entries": [{
            "id": id,
            "happenedAt": "2024-01-02T08:30:00Z",
            "notes": "first draft",
            "tags": ["work"],
        }]}))
        .await
        .assert_status_ok();

    let resynced = server
        .post("/patient/entries/sync")
        .add_cookie(cookie)
        .json(&json!({"entries": [{"id": id, "happenedAt": "2024-01-02T09:00:00Z"}]}))
        .await;
    resynced.assert_status_ok();
    let entry = &resynced.json::<Value>()["entries"][0];
    assert_eq!(entry["notes"], "");
    assert_eq!(entry["tags"], json!(["work"]));
    assert_eq!(entry["happenedAt"], "2024-01-02T09:00:00.000Z");
}

#[tokio::test]
async fn should_report_unparsable_query_as_api_error() {
    let (server, _) = server().await;
    let (_, doctor_cookie) = register(&server, "doctor", "dr@clinic.test").await;
    let (_, patient_cookie) = register(&server, "patient", "pat@home.test").await;

    let recent = server
        .get("/entries/recent?limit=1&limit=2")
        .add_cookie(doctor_cookie)
        .await;
    recent.assert_status_bad_request();
    recent.assert_json(&json!({
        "kind": "VALIDATION",
        "message": "invalid query parameters",
    }));

    let sync = server
        .get("/patient/entries/sync?from=a&from=b")
        .add_cookie(patient_cookie)
        .await;
    sync.assert_status_bad_request();
    assert_eq!(sync.json::<Value>()["kind"], "VALIDATION");
}
