use crate::cell::{Cell, CellStatus, Row};

/// Square matrix of cells, rows and columns in the same city order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelMatrix {
    cities: Vec<String>,
    rows: Vec<Row>,
}

impl TravelMatrix {
    pub fn new(cities: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert_eq!(cities.len(), rows.len());
        debug_assert!(rows.iter().all(|row| row.len() == cities.len()));

        Self { cities, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, from: usize, to: usize) -> &Cell {
        &self.rows[from][to]
    }

    pub fn unavailable_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.status == CellStatus::Unavailable)
            .count()
    }
}
