use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee record as the remote directory reports it.
///
/// The directory assigns the `id`; records are immutable from this
/// service's perspective (create and delete only, no updates). The wire
/// field names are the directory's, and the facade exposes the same
/// shape it consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,

    #[serde(rename = "employee_name")]
    pub name: String,

    #[serde(rename = "employee_salary")]
    pub salary: u32,

    #[serde(rename = "employee_age")]
    pub age: u32,

    #[serde(rename = "employee_title")]
    pub title: String,

    #[serde(
        rename = "employee_email",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
}

/// Payload for creating an employee. The directory fills in `id` and
/// `email` on its side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}
