//! Process-memory `CalculationHistoryRepository`.
//!
//! Used when no database is configured or the database could not be reached
//! at startup. Records are kept newest first and the buffer is capped; an
//! append beyond the cap evicts the oldest record. Nothing survives a restart.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{CalculationHistoryRepository, HistoryRepositoryError};
use crate::domain::{Calculation, CalculationId, HISTORY_LIMIT, NewCalculation};

#[derive(Debug)]
struct VolatileHistory {
    entries: VecDeque<Calculation>,
    next_id: i64,
}

/// Bounded in-memory history store.
///
/// Operations never fail. The lock is only held for synchronous buffer work.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use calculator_backend::domain::NewCalculation;
/// use calculator_backend::domain::ports::CalculationHistoryRepository;
/// use calculator_backend::outbound::memory::InMemoryHistoryRepository;
/// use mockable::DefaultClock;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryHistoryRepository::new(Arc::new(DefaultClock));
/// let stored = repo.append(&NewCalculation::new("2+2", "4")).await.unwrap();
/// assert_eq!(stored.id.get(), 1);
/// # });
/// ```
pub struct InMemoryHistoryRepository {
    state: Mutex<VolatileHistory>,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl InMemoryHistoryRepository {
    /// Create a store holding at most [`HISTORY_LIMIT`] records.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_capacity(HISTORY_LIMIT, clock)
    }

    /// Create a store holding at most `capacity` records.
    pub fn with_capacity(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(VolatileHistory {
                entries: VecDeque::with_capacity(capacity.saturating_add(1)),
                next_id: 1,
            }),
            capacity,
            clock,
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VolatileHistory> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CalculationHistoryRepository for InMemoryHistoryRepository {
    async fn append(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, HistoryRepositoryError> {
        let mut state = self.lock();
        let created_at = self.clock.utc();
        let record = Calculation {
            id: CalculationId::new(state.next_id),
            expression: calculation.expression.clone(),
            result: calculation.result.clone(),
            created_at,
        };
        state.next_id = state.next_id.saturating_add(1);
        state.entries.push_front(record.clone());
        state.entries.truncate(self.capacity);
        Ok(record)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Calculation>, HistoryRepositoryError> {
        Ok(self.lock().entries.iter().take(limit).cloned().collect())
    }

    async fn clear(&self) -> Result<(), HistoryRepositoryError> {
        self.lock().entries.clear();
        Ok(())
    }
}
