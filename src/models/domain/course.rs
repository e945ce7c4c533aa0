use serde::{Deserialize, Serialize};

/// Course reference data, owned by the external course-management system.
/// Read here only to enrich attempts for the admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub active: bool,
}
