//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Calculation, CalculationId};

use super::schema::calculations;

/// Row read from `calculations`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRow {
    pub id: i64,
    pub expression: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl From<CalculationRow> for Calculation {
    fn from(row: CalculationRow) -> Self {
        Self {
            id: CalculationId::new(row.id),
            expression: row.expression,
            result: row.result,
            created_at: row.created_at,
        }
    }
}

/// Insertable row; `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculations)]
pub(crate) struct NewCalculationRow<'a> {
    pub expression: &'a str,
    pub result: &'a str,
}
