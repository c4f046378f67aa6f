//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod calculation_history_repository;
mod calculator_command;
mod history_query;

#[cfg(test)]
pub use calculation_history_repository::MockCalculationHistoryRepository;
pub use calculation_history_repository::{CalculationHistoryRepository, HistoryRepositoryError};
#[cfg(test)]
pub use calculator_command::MockCalculatorCommand;
pub use calculator_command::CalculatorCommand;
#[cfg(test)]
pub use history_query::MockHistoryQuery;
pub use history_query::HistoryQuery;
