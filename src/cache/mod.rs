use std::collections::BTreeMap;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::Employee;

/// How many top earners the shared cache retains.
pub const TOP_EARNER_CAPACITY: usize = 10;

/// Ranking key: salary descending, id ascending among equal salaries.
///
/// The secondary id key keeps two employees with the same salary in
/// separate slots instead of collapsing them into one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    salary: u32,
    id: Uuid,
}

impl Rank {
    fn of(employee: &Employee) -> Self {
        Self {
            salary: employee.salary,
            id: employee.id,
        }
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .salary
            .cmp(&self.salary)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded cache of the highest-paid employees seen so far.
///
/// Holds at most `capacity` members, unique by id, iterated in salary
/// order from highest to lowest. Inserting over capacity evicts the
/// lowest earner; removals do not backfill, so the cache may hold fewer
/// members than capacity after deletions.
///
/// One exclusive lock guards every operation. No operation performs
/// I/O, so the lock is never held across a directory call.
pub struct TopEarners {
    capacity: usize,
    ranked: Mutex<BTreeMap<Rank, Employee>>,
}

impl TopEarners {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ranked: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.ranked.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.ranked.lock().await.is_empty()
    }

    /// Add one employee, evicting the lowest earner when over capacity.
    /// An entry with the same id is replaced, never duplicated.
    pub async fn insert(&self, employee: Employee) {
        let mut ranked = self.ranked.lock().await;
        Self::rank(&mut ranked, employee);
        Self::evict_over_capacity(&mut ranked, self.capacity);
    }

    /// Bulk-load under a single lock acquisition, evicting as it goes
    /// so the map never grows past capacity + 1.
    pub async fn insert_all(&self, employees: Vec<Employee>) {
        let mut ranked = self.ranked.lock().await;
        for employee in employees {
            Self::rank(&mut ranked, employee);
            Self::evict_over_capacity(&mut ranked, self.capacity);
        }
    }

    /// Remove the member with this id. A no-op when the id is not
    /// cached; the freed slot is not backfilled.
    pub async fn remove(&self, id: Uuid) {
        let mut ranked = self.ranked.lock().await;
        if let Some(rank) = ranked.keys().find(|rank| rank.id == id).copied() {
            ranked.remove(&rank);
        }
    }

    /// Current members, highest salary first. Non-destructive.
    pub async fn snapshot(&self) -> Vec<Employee> {
        self.ranked.lock().await.values().cloned().collect()
    }

    /// The single highest earner, if any member is cached.
    pub async fn max(&self) -> Option<Employee> {
        self.ranked
            .lock()
            .await
            .first_key_value()
            .map(|(_, employee)| employee.clone())
    }

    fn rank(ranked: &mut BTreeMap<Rank, Employee>, employee: Employee) {
        if let Some(existing) = ranked.keys().find(|rank| rank.id == employee.id).copied() {
            ranked.remove(&existing);
        }
        ranked.insert(Rank::of(&employee), employee);
    }

    fn evict_over_capacity(ranked: &mut BTreeMap<Rank, Employee>, capacity: usize) {
        // Rank orders descending, so the last entry is the lowest earner.
        while ranked.len() > capacity {
            ranked.pop_last();
        }
    }
}
