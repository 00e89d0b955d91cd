mod memory;

pub use memory::InMemoryDirectoryClient;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::{CreateEmployeeInput, DirectoryError, Employee, Result};

/// Collaborator interface to the external employee directory.
///
/// Implementations perform no retries; every failure surfaces to the
/// caller as one of the [`DirectoryError`] kinds.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee>;

    /// `Ok(None)` when the directory has no record for the id; the
    /// service layer decides whether that is an error.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>>;

    async fn list_all(&self) -> Result<Vec<Employee>>;

    /// The directory deletes by name and answers with an ack string.
    async fn delete(&self, name: &str) -> Result<String>;
}

/// Directory responses wrap their payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct DeleteEnvelope {
    status: String,
}

#[derive(Debug, Serialize)]
struct DeleteEmployeeRequest<'a> {
    name: &'a str,
}

/// reqwest-backed [`DirectoryClient`] with bounded connect and response
/// timeouts taken from [`AppConfig`].
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    employee_url: String,
}

impl HttpDirectoryClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            employee_url: format!(
                "{}/api/v1/employee",
                config.directory_base_url.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee> {
        let response = self.http.post(&self.employee_url).json(input).send().await?;
        check_status(response.status())?;

        let envelope: DataEnvelope<Employee> = response.json().await?;
        Ok(envelope.data)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let response = self
            .http
            .get(format!("{}/{id}", self.employee_url))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        check_status(response.status())?;

        let envelope: DataEnvelope<Employee> = response.json().await?;
        Ok(Some(envelope.data))
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        let response = self.http.get(&self.employee_url).send().await?;
        check_status(response.status())?;

        let envelope: DataEnvelope<Vec<Employee>> = response.json().await?;
        Ok(envelope.data)
    }

    async fn delete(&self, name: &str) -> Result<String> {
        let response = self
            .http
            .delete(&self.employee_url)
            .json(&DeleteEmployeeRequest { name })
            .send()
            .await?;
        check_status(response.status())?;

        let envelope: DeleteEnvelope = response.json().await?;
        Ok(envelope.status)
    }
}

/// One-shot mapping from a directory response status to an error kind.
fn check_status(status: StatusCode) -> Result<()> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(DirectoryError::RateLimited);
    }
    if status.is_server_error() {
        return Err(DirectoryError::ServerError(format!(
            "directory returned status {status}"
        )));
    }
    if status == StatusCode::BAD_REQUEST {
        return Err(DirectoryError::BadRequest(
            "directory rejected the request".to_string(),
        ));
    }
    Ok(())
}
