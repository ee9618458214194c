// ── Domain enums ──
//
// The wire structs live in attendly-api; this module adds the fixed
// department set the service recognizes.

use strum::{Display, EnumIter};

/// The fixed set of departments an employee can belong to.
///
/// `value()` is what goes over the wire; `label()` is what the UI shows.
/// Employees fetched from the service carry the raw value string, so
/// [`Department::label_for`] falls back to rendering unknown values as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Department {
    Engineering,
    HumanResources,
    Finance,
    Marketing,
    Sales,
    Operations,
}

impl Department {
    /// All departments, in form/display order.
    pub const ALL: [Department; 6] = [
        Self::Engineering,
        Self::HumanResources,
        Self::Finance,
        Self::Marketing,
        Self::Sales,
        Self::Operations,
    ];

    /// Wire value sent to and received from the service.
    pub fn value(self) -> &'static str {
        match self {
            Self::Engineering => "engineering",
            Self::HumanResources => "hr",
            Self::Finance => "finance",
            Self::Marketing => "marketing",
            Self::Sales => "sales",
            Self::Operations => "operations",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::HumanResources => "Human Resources",
            Self::Finance => "Finance",
            Self::Marketing => "Marketing",
            Self::Sales => "Sales",
            Self::Operations => "Operations",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == value)
    }

    /// Label for a raw wire value; unknown values render verbatim.
    pub fn label_for(value: &str) -> &str {
        Self::from_value(value).map_or(value, |dept| dept.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_label_round_trip() {
        for dept in Department::ALL {
            assert_eq!(Department::from_value(dept.value()), Some(dept));
        }
    }

    #[test]
    fn label_for_unknown_value_is_verbatim() {
        assert_eq!(Department::label_for("hr"), "Human Resources");
        assert_eq!(Department::label_for("warehouse"), "warehouse");
    }
}
