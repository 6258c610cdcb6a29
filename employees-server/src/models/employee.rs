//! Employee record and request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employee record, as stored and as returned over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub city_id: i32,
}

impl Employee {
    /// Build an employee that has not been persisted yet (id = 0).
    pub fn new(name: impl Into<String>, phone: impl Into<String>, city_id: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            phone: phone.into(),
            city_id,
        }
    }
}

/// Body of `POST /employee`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub phone: String,
    pub city_id: i32,
}

impl CreateEmployeeRequest {
    pub fn into_employee(self) -> Employee {
        Employee::new(self.name, self.phone, self.city_id)
    }
}

/// Body of `PUT /employee/{id}`
///
/// Every field is replaced; there is no partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: String,
    pub phone: String,
    pub city_id: i32,
}

impl UpdateEmployeeRequest {
    /// Overwrite the mutable fields of an existing record.
    pub fn apply_to(self, employee: &mut Employee) {
        employee.name = self.name;
        employee.phone = self.phone;
        employee.city_id = self.city_id;
    }
}
