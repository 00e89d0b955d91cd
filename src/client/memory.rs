use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::DirectoryClient;
use crate::core::{CreateEmployeeInput, Employee, Result};

/// HashMap-backed directory.
///
/// Stands in for the remote directory in router tests and when the
/// binary runs with `DIRECTORY_BACKEND=memory`.
pub struct InMemoryDirectoryClient {
    employees: RwLock<HashMap<Uuid, Employee>>,
}

impl InMemoryDirectoryClient {
    pub fn new() -> Self {
        Self {
            employees: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-load records, keeping their ids.
    pub async fn seed(&self, employees: impl IntoIterator<Item = Employee>) {
        let mut store = self.employees.write().await;
        for employee in employees {
            store.insert(employee.id, employee);
        }
    }
}

impl Default for InMemoryDirectoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectoryClient {
    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee> {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            salary: input.salary,
            age: input.age,
            title: input.title.clone(),
            email: None,
        };
        self.employees
            .write()
            .await
            .insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.read().await.values().cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<String> {
        let mut employees = self.employees.write().await;
        let id = employees
            .values()
            .find(|employee| employee.name == name)
            .map(|employee| employee.id);

        match id {
            Some(id) => {
                employees.remove(&id);
                Ok("Successfully processed request.".to_string())
            }
            None => Ok("No employee matched the given name.".to_string()),
        }
    }
}
