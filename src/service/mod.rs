use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{TOP_EARNER_CAPACITY, TopEarners};
use crate::client::DirectoryClient;
use crate::core::{CreateEmployeeInput, DirectoryError, Employee, Result};

/// Facade over the remote employee directory.
///
/// Every mutation goes to the directory first and then updates the
/// shared [`TopEarners`] cache; top-earner reads consult the cache and
/// fall back to one full listing when it cannot answer. The cache is a
/// best-effort accelerator, not a consistency-critical index: a full
/// listing bulk-loads it only while it is empty, and members may go
/// stale relative to the directory until it empties out again.
#[derive(Clone)]
pub struct EmployeeService {
    client: Arc<dyn DirectoryClient>,
    top_earners: Arc<TopEarners>,
}

impl EmployeeService {
    pub fn new(client: Arc<dyn DirectoryClient>) -> Self {
        Self {
            client,
            top_earners: Arc::new(TopEarners::new(TOP_EARNER_CAPACITY)),
        }
    }

    /// Full listing from the directory. Bulk-loads the cache as a side
    /// effect when the cache is currently empty.
    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        let employees = self.client.list_all().await?;
        if self.top_earners.is_empty().await {
            self.top_earners.insert_all(employees.clone()).await;
        }
        info!(count = employees.len(), "listed employees");
        Ok(employees)
    }

    /// Case-insensitive substring match on the employee name, in
    /// listing order.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>> {
        let needle = fragment.to_lowercase();
        let matches: Vec<Employee> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|employee| employee.name.to_lowercase().contains(&needle))
            .collect();
        info!(fragment, count = matches.len(), "searched employees by name");
        Ok(matches)
    }

    /// Single record straight from the directory, bypassing the cache.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Employee> {
        match self.client.get_by_id(id).await? {
            Some(employee) => Ok(employee),
            None => {
                debug!(%id, "employee not found in directory");
                Err(DirectoryError::NotFound(id))
            }
        }
    }

    /// Highest salary in the directory, or `None` when it is empty.
    ///
    /// A non-empty cache is trusted as-is; otherwise one full listing
    /// repopulates it before the second look.
    pub async fn highest_salary(&self) -> Result<Option<u32>> {
        if let Some(top) = self.top_earners.max().await {
            return Ok(Some(top.salary));
        }

        info!("top earner cache not ready, fetching full listing");
        self.list_all().await?;
        Ok(self.top_earners.max().await.map(|e| e.salary))
    }

    /// Names of the ten highest earners, highest salary first.
    ///
    /// The cache answers directly only when it is full; a partially
    /// filled cache (for example after deletions) forces a refetch,
    /// after which the result may still hold fewer than ten names if
    /// the directory itself has fewer employees.
    pub async fn top_ten_names(&self) -> Result<Vec<String>> {
        let ranked = self.top_earners.snapshot().await;
        if ranked.len() == self.top_earners.capacity() {
            return Ok(ranked.into_iter().map(|e| e.name).collect());
        }

        info!("top earner cache not ready, fetching full listing");
        self.list_all().await?;
        Ok(self
            .top_earners
            .snapshot()
            .await
            .into_iter()
            .map(|e| e.name)
            .collect())
    }

    /// Create in the directory, then admit the new record to the cache.
    pub async fn create(&self, input: CreateEmployeeInput) -> Result<Employee> {
        let employee = self.client.create(&input).await?;
        info!(%employee.id, name = %employee.name, "created employee");
        self.top_earners.insert(employee.clone()).await;
        Ok(employee)
    }

    /// Delete by id and return the deleted employee's name.
    ///
    /// The id is resolved first so an unknown id fails with `NotFound`
    /// before the directory sees any delete; the directory's delete API
    /// is keyed by name.
    pub async fn delete(&self, id: Uuid) -> Result<String> {
        let employee = self.get_by_id(id).await?;

        let ack = self.client.delete(&employee.name).await?;
        debug!(%id, %ack, "directory acknowledged delete");

        self.top_earners.remove(id).await;
        info!(%id, name = %employee.name, "deleted employee");
        Ok(employee.name)
    }
}
