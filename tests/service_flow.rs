use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use employee_directory::client::DirectoryClient;
use employee_directory::core::{CreateEmployeeInput, DirectoryError, Employee, Result};
use employee_directory::service::EmployeeService;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Scriptable stand-in for the remote directory that counts the calls
/// the service makes against it.
struct ScriptedDirectory {
    employees: RwLock<Vec<Employee>>,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl ScriptedDirectory {
    fn new(employees: Vec<Employee>) -> Arc<Self> {
        Arc::new(Self {
            employees: RwLock::new(employees),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        })
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    async fn id_of_highest_earner(&self) -> Uuid {
        self.employees
            .read()
            .await
            .iter()
            .max_by_key(|e| e.salary)
            .expect("directory should not be empty")
            .id
    }
}

#[async_trait]
impl DirectoryClient for ScriptedDirectory {
    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee> {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            salary: input.salary,
            age: input.age,
            title: input.title.clone(),
            email: None,
        };
        self.employees.write().await.push(employee.clone());
        Ok(employee)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.employees.read().await.clone())
    }

    async fn delete(&self, name: &str) -> Result<String> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.employees.write().await.retain(|e| e.name != name);
        Ok("Successfully processed request.".to_string())
    }
}

/// Directory that is permanently throttling.
struct ThrottledDirectory;

#[async_trait]
impl DirectoryClient for ThrottledDirectory {
    async fn create(&self, _input: &CreateEmployeeInput) -> Result<Employee> {
        Err(DirectoryError::RateLimited)
    }

    async fn get_by_id(&self, _id: Uuid) -> Result<Option<Employee>> {
        Err(DirectoryError::RateLimited)
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        Err(DirectoryError::RateLimited)
    }

    async fn delete(&self, _name: &str) -> Result<String> {
        Err(DirectoryError::RateLimited)
    }
}

fn named_employee(name: &str, salary: u32) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        name: name.to_string(),
        salary,
        age: 40,
        title: "Analyst".to_string(),
        email: None,
    }
}

fn staff(salaries: &[u32]) -> Vec<Employee> {
    salaries
        .iter()
        .map(|&salary| named_employee(&format!("Employee {salary}"), salary))
        .collect()
}

fn create_input(name: &str, salary: u32) -> CreateEmployeeInput {
    CreateEmployeeInput {
        name: name.to_string(),
        salary,
        age: 19,
        title: "Jedi Master".to_string(),
    }
}

#[tokio::test]
async fn highest_salary_is_served_from_cache_after_create() {
    let directory = ScriptedDirectory::new(vec![]);
    let service = EmployeeService::new(directory.clone());

    service
        .create(create_input("Luke Skywalker", 300_000))
        .await
        .unwrap();

    assert_eq!(service.highest_salary().await.unwrap(), Some(300_000));
    assert_eq!(directory.list_calls(), 0);
}

#[tokio::test]
async fn highest_salary_on_cold_cache_fetches_exactly_once() {
    let directory = ScriptedDirectory::new(staff(&[50_000, 120_000, 90_000]));
    let service = EmployeeService::new(directory.clone());

    assert_eq!(service.highest_salary().await.unwrap(), Some(120_000));
    assert_eq!(directory.list_calls(), 1);

    // The cache is warm now; no further listing is needed.
    assert_eq!(service.highest_salary().await.unwrap(), Some(120_000));
    assert_eq!(directory.list_calls(), 1);
}

#[tokio::test]
async fn highest_salary_of_empty_directory_is_none() {
    let directory = ScriptedDirectory::new(vec![]);
    let service = EmployeeService::new(directory.clone());

    assert_eq!(service.highest_salary().await.unwrap(), None);
    assert_eq!(directory.list_calls(), 1);
}

#[tokio::test]
async fn top_ten_names_are_ordered_by_salary_descending() {
    let directory = ScriptedDirectory::new(staff(&[
        10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120,
    ]));
    let service = EmployeeService::new(directory.clone());

    let names = service.top_ten_names().await.unwrap();

    assert_eq!(directory.list_calls(), 1);
    assert_eq!(names.len(), 10);
    assert_eq!(names.first().map(String::as_str), Some("Employee 120"));
    assert_eq!(names.last().map(String::as_str), Some("Employee 30"));
}

#[tokio::test]
async fn partial_cache_refetches_for_top_ten_but_not_highest_salary() {
    let directory = ScriptedDirectory::new(staff(&[
        10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120,
    ]));
    let service = EmployeeService::new(directory.clone());

    // Warm the cache to exactly ten members.
    service.list_all().await.unwrap();
    let names = service.top_ten_names().await.unwrap();
    assert_eq!(names.len(), 10);
    assert_eq!(directory.list_calls(), 1);

    // Deleting one earner leaves nine cached members.
    let top_id = directory.id_of_highest_earner().await;
    service.delete(top_id).await.unwrap();

    // Nine members are "ready" for highest_salary...
    assert_eq!(service.highest_salary().await.unwrap(), Some(110));
    assert_eq!(directory.list_calls(), 1);

    // ...but not for the top-ten listing, which refetches. The cache is
    // non-empty, so the listing does not repopulate it and the answer
    // stays at nine names.
    let names = service.top_ten_names().await.unwrap();
    assert_eq!(directory.list_calls(), 2);
    assert_eq!(names.len(), 9);
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found_without_remote_delete() {
    let directory = ScriptedDirectory::new(staff(&[50_000]));
    let service = EmployeeService::new(directory.clone());

    let err = service.delete(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, DirectoryError::NotFound(_)));
    assert_eq!(directory.delete_calls(), 0);
}

#[tokio::test]
async fn delete_returns_the_employee_name() {
    let mut employees = staff(&[50_000, 75_000]);
    employees.push(named_employee("Arleen Effertz", 394_222));
    let directory = ScriptedDirectory::new(employees);
    let service = EmployeeService::new(directory.clone());

    let id = directory.id_of_highest_earner().await;
    let name = service.delete(id).await.unwrap();

    assert_eq!(name, "Arleen Effertz");
    assert_eq!(directory.delete_calls(), 1);
    assert!(
        directory
            .list_all()
            .await
            .unwrap()
            .iter()
            .all(|e| e.id != id)
    );
}

#[tokio::test]
async fn get_by_id_bypasses_the_cache() {
    let directory = ScriptedDirectory::new(staff(&[80_000]));
    let service = EmployeeService::new(directory.clone());

    let id = directory.id_of_highest_earner().await;
    let employee = service.get_by_id(id).await.unwrap();

    assert_eq!(employee.salary, 80_000);
    assert_eq!(directory.list_calls(), 0);
}

#[tokio::test]
async fn search_matches_name_fragments_case_insensitively() {
    let mut employees = staff(&(1..=48).map(|i| i * 1000).collect::<Vec<u32>>());
    employees.push(named_employee("Arleen Effertz", 394_222));
    employees.push(named_employee("Ms. Shirleen Howe", 182_908));
    let directory = ScriptedDirectory::new(employees);
    let service = EmployeeService::new(directory);

    for fragment in ["leen", "LEEN"] {
        let matches = service.search_by_name(fragment).await.unwrap();
        let names: Vec<&str> = matches.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(matches.len(), 2, "fragment {fragment:?}");
        assert!(names.contains(&"Arleen Effertz"));
        assert!(names.contains(&"Ms. Shirleen Howe"));
    }
}

#[tokio::test]
async fn list_all_does_not_refresh_a_non_empty_cache() {
    let directory = ScriptedDirectory::new(staff(&[40_000, 20_000]));
    let service = EmployeeService::new(directory.clone());

    service.list_all().await.unwrap();

    // The directory grows behind the facade's back...
    directory
        .employees
        .write()
        .await
        .push(named_employee("Late Joiner", 999_999));

    // ...and a further listing leaves the non-empty cache untouched:
    // the cached maximum stays the stale 40k.
    service.list_all().await.unwrap();
    assert_eq!(service.highest_salary().await.unwrap(), Some(40_000));
}

#[tokio::test]
async fn directory_errors_propagate_unchanged() {
    let service = EmployeeService::new(Arc::new(ThrottledDirectory));

    assert!(matches!(
        service.list_all().await,
        Err(DirectoryError::RateLimited)
    ));
    assert!(matches!(
        service.search_by_name("a").await,
        Err(DirectoryError::RateLimited)
    ));
    assert!(matches!(
        service.highest_salary().await,
        Err(DirectoryError::RateLimited)
    ));
    assert!(matches!(
        service.top_ten_names().await,
        Err(DirectoryError::RateLimited)
    ));
    assert!(matches!(
        service.create(create_input("Luke Skywalker", 300_000)).await,
        Err(DirectoryError::RateLimited)
    ));
}
