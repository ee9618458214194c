#![allow(clippy::unwrap_used)]
// End-to-end controller flows against a wiremock directory service.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use attendly_api::DirectoryClient;
use attendly_core::pages::{attendance, employees, fetch_both};
use attendly_core::{AttendancePage, DashboardPage, EmployeeForm, EmployeesPage};

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
        "email": "x@example.com",
        "department": "engineering"
    })
}

// ── Employees page ──────────────────────────────────────────────────

#[tokio::test]
async fn create_flow_leaves_exactly_one_matching_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            employee_json("E1", "Ada Lovelace"),
            employee_json("E2", "Grace Hopper"),
        ])))
        .mount(&server)
        .await;

    let mut page = EmployeesPage::new();
    page.employees = vec![]; // E2 not yet cached — uniqueness passes
    page.form = EmployeeForm {
        employee_id: "  E2  ".into(),
        full_name: "Grace Hopper".into(),
        email: "grace@example.com".into(),
        department: "engineering".into(),
    };

    assert!(page.validate());
    let payload = page.payload();
    assert_eq!(payload.employee_id, "E2");

    let token = page.begin_submit();
    let result = employees::create_and_reload(&client, &payload).await;
    page.finish_submit(token, result);

    let matching: Vec<_> = page
        .employees
        .iter()
        .filter(|e| e.employee_id == "E2")
        .collect();
    assert_eq!(matching.len(), 1);
    assert!(!page.modal_open);
    assert!(page.error.is_none());
}

#[tokio::test]
async fn duplicate_id_blocks_submission_without_network() {
    let (server, client) = setup().await;
    let _ = &client; // validation never touches the client

    let mut page = EmployeesPage::new();
    let load_token = page.begin_load();
    page.finish_load(
        load_token,
        Ok(vec![serde_json::from_value(employee_json("E1", "Ada")).unwrap()]),
    );

    page.form = EmployeeForm {
        employee_id: " E1 ".into(),
        full_name: "Imposter".into(),
        email: "imposter@example.com".into(),
        department: "sales".into(),
    };

    assert!(!page.validate());
    assert_eq!(
        page.field_errors.employee_id,
        Some("Employee ID must be unique")
    );

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no request may be issued: {requests:?}");
}

#[tokio::test]
async fn delete_flow_removes_only_target() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/employees/E1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = EmployeesPage::new();
    let token = page.begin_load();
    page.finish_load(
        token,
        Ok(vec![
            serde_json::from_value(employee_json("E1", "Ada")).unwrap(),
            serde_json::from_value(employee_json("E2", "Grace")).unwrap(),
        ]),
    );

    let token = page.begin_remove();
    let result = employees::delete_employee(&client, "E1").await;
    page.finish_remove(token, "E1", result);

    assert_eq!(page.employees.len(), 1);
    assert_eq!(page.employees[0].employee_id, "E2");
}

// ── Combined load (attendance + dashboard) ──────────────────────────

#[tokio::test]
async fn combined_load_is_all_or_nothing() {
    let (server, client) = setup().await;

    // Employees succeed, attendance fails — the pair must fail.
    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([employee_json("E1", "Ada")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/attendance/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut page = DashboardPage::new();
    let token = page.begin_load();
    page.finish_load(token, fetch_both(&client).await);

    assert!(page.employees.is_empty(), "partial data must not land");
    assert!(page.attendance.is_empty());
    assert_eq!(page.error.as_deref(), Some("Failed to load data"));
}

#[tokio::test]
async fn mark_succeeds_but_reload_fails_keeps_pre_reload_snapshot() {
    let (server, client) = setup().await;

    // Initial combined load succeeds.
    let employees_ok = Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([employee_json("E1", "Ada")])),
        )
        .expect(1)
        .named("initial employees")
        .mount_as_scoped(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/attendance/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "employee_id": "E1", "date": "2024-01-01", "status": "present"}
        ])))
        .mount(&server)
        .await;

    let mut page = AttendancePage::new();
    let token = page.begin_load();
    page.finish_load(token, fetch_both(&client).await);
    assert_eq!(page.attendance.len(), 1);

    // Mark succeeds…
    Mock::given(method("POST"))
        .and(path("/attendance/"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    page.open_mark_dialog(page.employees[0].clone());
    let (token, payload) = page.begin_mark().unwrap();
    let result = attendance::mark(&client, &payload).await;
    page.finish_mark(token, result);
    assert!(!page.dialog_open, "dialog closes on successful mark");

    // …but the follow-up reload's employee fetch fails.
    drop(employees_ok);
    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let token = page.begin_load();
    page.finish_load(token, fetch_both(&client).await);

    assert_eq!(page.error.as_deref(), Some("Failed to load data"));
    assert_eq!(page.attendance.len(), 1, "pre-reload snapshot stays");
    assert!(!page.dialog_open);
}

#[tokio::test]
async fn load_surfaces_server_detail_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees/"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "maintenance window"})),
        )
        .mount(&server)
        .await;

    let mut page = EmployeesPage::new();
    let token = page.begin_load();
    let result = employees::fetch_employees(&client).await;
    page.finish_load(token, result);

    assert_eq!(page.error.as_deref(), Some("maintenance window"));
}
