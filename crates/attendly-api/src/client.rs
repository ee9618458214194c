// Hand-crafted async HTTP client for the HR directory service.
//
// Conventional REST/JSON: employees under /employees/, attendance under
// /attendance/. Non-2xx responses optionally carry {"detail": "..."}.

use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::models::{AttendanceRecord, Employee, MarkAttendance, NewEmployee};
use crate::transport::TransportConfig;

// ── Error response shape from the service ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the HR directory service.
///
/// The base URL is injected at construction time — nothing in here reads
/// the environment. All operations are stateless HTTP round trips; there
/// is no session, auth, or pagination.
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DirectoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url),
        })
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, base_url: &Url) -> Self {
        Self {
            http,
            base_url: Self::normalize_base_url(base_url),
        }
    }

    /// Ensure the base path ends with a slash so `Url::join` keeps it.
    fn normalize_base_url(raw: &Url) -> Url {
        let mut url = raw.clone();
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        url
    }

    /// Join a relative path (e.g. `"employees/"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Employee operations ──────────────────────────────────────────

    /// Fetch the full employee collection.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, Error> {
        self.get("employees/", &[]).await
    }

    /// Create an employee, then reconcile by reload.
    ///
    /// The creation endpoint does not return the server-assigned fields,
    /// so the adapter re-fetches the full list and locates the new record
    /// by exact `employee_id` match. A miss after a successful POST is
    /// [`Error::CreatedButMissing`].
    pub async fn create_employee(&self, payload: &NewEmployee) -> Result<Employee, Error> {
        self.post_no_response("employees/", payload).await?;

        let employees = self.list_employees().await?;
        employees
            .into_iter()
            .find(|e| e.employee_id == payload.employee_id)
            .ok_or_else(|| Error::CreatedButMissing {
                employee_id: payload.employee_id.clone(),
            })
    }

    /// Delete an employee by business key.
    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), Error> {
        self.delete(&format!("employees/{employee_id}")).await
    }

    // ── Attendance operations ────────────────────────────────────────

    /// Fetch attendance records, optionally narrowed server-side by
    /// equality filters. Absent filters request the whole collection.
    pub async fn list_attendance(
        &self,
        employee_id: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>, Error> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(id) = employee_id {
            params.push(("employee_id", id.to_owned()));
        }
        if let Some(d) = date {
            params.push(("date", d.to_owned()));
        }
        self.get("attendance/", &params).await
    }

    /// Submit one attendance record. No response body is consumed.
    pub async fn mark_attendance(&self, payload: &MarkAttendance) -> Result<(), Error> {
        self.post_no_response("attendance/", payload).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let mut req = self.http.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Deserialize a 2xx body, or map a failure status to [`Error::Api`].
    async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Check status only; the body of a success response is discarded.
    async fn handle_empty(resp: Response) -> Result<(), Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), resp).await);
        }
        Ok(())
    }

    /// Extract the optional `{"detail": ...}` message from an error body.
    async fn error_from_body(status: u16, resp: Response) -> Error {
        let detail = match resp.json::<ErrorResponse>().await {
            Ok(err) => err.detail,
            Err(_) => None,
        };
        Error::Api { status, detail }
    }
}
