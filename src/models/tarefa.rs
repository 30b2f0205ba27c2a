//! # Tarefa Model
//!
//! The single managed entity: a task with a unique name, a cost, a due date,
//! and a unique integer order key (`ordem`) that determines display position.
//!
//! ## Database Schema
//!
//! Maps to the `tarefas` table:
//!
//! ```sql
//! CREATE TABLE tarefas (
//!   id BIGSERIAL PRIMARY KEY,
//!   nome TEXT NOT NULL,
//!   custo DOUBLE PRECISION NOT NULL,
//!   data_limite DATE NOT NULL,
//!   ordem INTEGER NOT NULL,
//!   CONSTRAINT tarefas_nome_key UNIQUE (nome),
//!   CONSTRAINT tarefas_ordem_key UNIQUE (ordem)
//! );
//! ```
//!
//! Both uniqueness constraints are invariants of every committed state. Order
//! keys are assigned `max(ordem) + 1` at creation and are never compacted on
//! delete; only the reorder coordinator rewrites them afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Display rendering for due dates, DD/MM/YYYY.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tarefa {
    pub id: i64,
    pub nome: String,
    pub custo: f64,
    pub data_limite: NaiveDate,
    pub ordem: i32,
}

/// New task for insertion (without the store-assigned id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTarefa {
    pub nome: String,
    pub custo: f64,
    pub data_limite: NaiveDate,
    pub ordem: i32,
}

/// Field-level edit of the three editable columns. The order key is only ever
/// rewritten by the reorder coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct TarefaUpdate {
    pub nome: String,
    pub custo: f64,
    pub data_limite: NaiveDate,
}

/// Parse a due date from the two wire formats clients produce:
/// ISO `YYYY-MM-DD` or display `DD/MM/YYYY`.
pub fn parse_data_limite(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY_DATE_FORMAT))
        .ok()
}

/// Render a due date for display, DD/MM/YYYY.
pub fn format_data_limite(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_data_limite("2024-11-15"),
            NaiveDate::from_ymd_opt(2024, 11, 15)
        );
    }

    #[test]
    fn parses_display_dates() {
        assert_eq!(
            parse_data_limite("15/11/2024"),
            NaiveDate::from_ymd_opt(2024, 11, 15)
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_data_limite("next tuesday"), None);
        assert_eq!(parse_data_limite("2024-13-40"), None);
        assert_eq!(parse_data_limite(""), None);
    }

    #[test]
    fn renders_display_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(format_data_limite(date), "03/01/2025");
    }
}
