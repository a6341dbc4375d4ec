use std::collections::VecDeque;

use super::RowCursor;
use crate::error::CallLogError;

/// A single cell of a materialized result row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Null,
    Integer(i64),
    Text(String),
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::Text).unwrap_or(Cell::Null)
    }
}

/// In-memory cursor over rows that were read out of a store.
#[derive(Clone, Debug, Default)]
pub struct RowSet {
    columns: Vec<String>,
    pending: VecDeque<Vec<Cell>>,
    current: Option<Vec<Cell>>,
}

impl RowSet {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            pending: VecDeque::new(),
            current: None,
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.pending.push_back(row);
    }

    pub fn with_row(mut self, row: Vec<Cell>) -> Self {
        self.push_row(row);
        self
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn cell(&self, index: usize) -> Option<&Cell> {
        self.current.as_ref().and_then(|row| row.get(index))
    }
}

impl RowCursor for RowSet {
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    fn advance(&mut self) -> Result<bool, CallLogError> {
        self.current = self.pending.pop_front();
        Ok(self.current.is_some())
    }

    fn get_string(&self, index: usize) -> Option<String> {
        match self.cell(index)? {
            Cell::Null => None,
            Cell::Integer(value) => Some(value.to_string()),
            Cell::Text(value) => Some(value.clone()),
        }
    }

    fn get_i64(&self, index: usize) -> Option<i64> {
        match self.cell(index)? {
            Cell::Null => None,
            Cell::Integer(value) => Some(*value),
            Cell::Text(value) => value.trim().parse().ok(),
        }
    }
}
