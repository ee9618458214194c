#![allow(clippy::unwrap_used)]
// Integration tests for `DirectoryClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use attendly_api::{AttendanceStatus, DirectoryClient, Error, MarkAttendance, NewEmployee};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DirectoryClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DirectoryClient::with_client(reqwest::Client::new(), &base_url);
    (server, client)
}

fn employee_json(employee_id: &str, full_name: &str) -> serde_json::Value {
    json!({
        "id": format!("srv-{employee_id}"),
        "employee_id": employee_id,
        "full_name": full_name,
        "email": format!("{}@example.com", employee_id.to_lowercase()),
        "department": "engineering"
    })
}

// ── Employee tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_employees() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            employee_json("E1", "Ada Lovelace"),
            employee_json("E2", "Alan Turing"),
        ])))
        .mount(&server)
        .await;

    let employees = client.list_employees().await.unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].employee_id, "E1");
    assert_eq!(employees[0].full_name, "Ada Lovelace");
    assert_eq!(employees[1].id, "srv-E2");
}

#[tokio::test]
async fn test_create_employee_reconciles_by_reload() {
    let (server, client) = setup().await;

    let payload = NewEmployee {
        employee_id: "E3".into(),
        full_name: "Grace Hopper".into(),
        email: "grace@example.com".into(),
        department: "engineering".into(),
    };

    Mock::given(method("POST"))
        .and(path("/employees/"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    // The POST response carries no server-assigned fields; the client
    // must re-list and find the record by employee_id.
    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            employee_json("E1", "Ada Lovelace"),
            employee_json("E3", "Grace Hopper"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_employee(&payload).await.unwrap();

    assert_eq!(created.employee_id, "E3");
    assert_eq!(created.id, "srv-E3");
}

#[tokio::test]
async fn test_create_employee_missing_after_reload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let payload = NewEmployee {
        employee_id: "E9".into(),
        full_name: "Ghost".into(),
        email: "ghost@example.com".into(),
        department: "hr".into(),
    };
    let result = client.create_employee(&payload).await;

    match result {
        Err(Error::CreatedButMissing { ref employee_id }) => assert_eq!(employee_id, "E9"),
        other => panic!("expected CreatedButMissing, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_employee_surfaces_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees/"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "employee_id already taken"})),
        )
        .mount(&server)
        .await;

    let payload = NewEmployee {
        employee_id: "E1".into(),
        full_name: "Dup".into(),
        email: "dup@example.com".into(),
        department: "sales".into(),
    };
    let result = client.create_employee(&payload).await;

    match result {
        Err(Error::Api { status, ref detail }) => {
            assert_eq!(status, 409);
            assert_eq!(detail.as_deref(), Some("employee_id already taken"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_employee() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/employees/E1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_employee("E1").await.unwrap();
}

#[tokio::test]
async fn test_delete_employee_error_without_detail() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/employees/E1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.delete_employee("E1").await;

    match result {
        Err(Error::Api { status: 500, detail: None }) => {}
        other => panic!("expected Api error with no detail, got: {other:?}"),
    }
}

// ── Attendance tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_attendance_unfiltered_has_no_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/attendance/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "employee_id": "E1", "date": "2024-01-01", "status": "present"}
        ])))
        .mount(&server)
        .await;

    let records = client.list_attendance(None, None).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Present);

    // The request must not carry filter params when none were given.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_list_attendance_with_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/attendance/"))
        .and(query_param("employee_id", "E2"))
        .and(query_param("date", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client
        .list_attendance(Some("E2"), Some("2024-01-01"))
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_mark_attendance() {
    let (server, client) = setup().await;

    let payload = MarkAttendance {
        employee_id: "E1".into(),
        date: "2024-01-05".into(),
        status: AttendanceStatus::Absent,
    };

    Mock::given(method("POST"))
        .and(path("/attendance/"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client.mark_attendance(&payload).await.unwrap();
}

#[tokio::test]
async fn test_mark_attendance_error_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/attendance/"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "unknown employee_id"})),
        )
        .mount(&server)
        .await;

    let payload = MarkAttendance {
        employee_id: "E404".into(),
        date: "2024-01-05".into(),
        status: AttendanceStatus::Present,
    };
    let result = client.mark_attendance(&payload).await;

    assert!(matches!(
        result,
        Err(Error::Api { status: 422, ref detail }) if detail.as_deref() == Some("unknown employee_id")
    ));
}

#[tokio::test]
async fn test_deserialization_error_keeps_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.list_employees().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert!(body.contains("not json")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
