// ── Create-employee form validation ──
//
// Purely local: a form that fails these checks never reaches the network.
// Field errors are keyed per field so the UI can render them inline.

use attendly_api::{Employee, NewEmployee};

/// Raw form values as entered by the user. Trimming happens at
/// validation/submission time, not on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    /// Wire value of the selected department, empty if none selected.
    pub department: String,
}

impl EmployeeForm {
    /// The payload that would be submitted: string fields trimmed.
    pub fn trimmed_payload(&self) -> NewEmployee {
        NewEmployee {
            employee_id: self.employee_id.trim().to_owned(),
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            department: self.department.clone(),
        }
    }
}

/// Per-field validation errors. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub employee_id: Option<&'static str>,
    pub full_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub department: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.department.is_none()
    }
}

/// Validate a form against the currently cached employee list.
///
/// Uniqueness of `employee_id` is checked against the cache only —
/// best-effort; the service remains the authority.
pub fn validate(form: &EmployeeForm, employees: &[Employee]) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let employee_id = form.employee_id.trim();
    if employee_id.is_empty() {
        errors.employee_id = Some("Employee ID is required");
    } else if employees.iter().any(|e| e.employee_id == employee_id) {
        errors.employee_id = Some("Employee ID must be unique");
    }

    if form.full_name.trim().is_empty() {
        errors.full_name = Some("Full name is required");
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required");
    } else if !email_shape_ok(email) {
        errors.email = Some("Invalid email format");
    }

    if form.department.is_empty() {
        errors.department = Some("Department is required");
    }

    errors
}

/// Basic `local@domain.tld` shape check: exactly one `@`, non-empty local
/// part, a dot in the domain with non-empty sides, no whitespace anywhere.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
