use crate::error::ScanError;
use crate::mapping::{self, Mapping};
use crate::record::Record;
use crate::row::{Cell, Row};
use crate::scan::{Destination, Scanner};

/// Query failure recorded by the reply decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("graph query: {message}")]
pub struct QueryFault {
    message: String,
}

impl QueryFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of one graph query.
///
/// Built once by the reply decoder and read-only afterwards. When there is a
/// projection, every row has one cell per column; the decoder guarantees this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    has_projection: bool,
    messages: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Row>,
    fault: Option<QueryFault>,
}

impl ResultSet {
    /// Reply of a query with a `RETURN` clause, possibly with zero rows.
    pub fn with_projection(columns: Vec<String>, rows: Vec<Row>, messages: Vec<String>) -> Self {
        Self {
            has_projection: true,
            messages,
            columns,
            rows,
            fault: None,
        }
    }

    /// Reply of a query without projection (e.g. `CREATE`).
    pub fn without_projection(messages: Vec<String>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn failed(fault: QueryFault, messages: Vec<String>) -> Self {
        Self {
            messages,
            fault: Some(fault),
            ..Self::default()
        }
    }

    /// `false` for queries without projection; `true` for projections even
    /// when they returned no rows.
    pub fn is_result(&self) -> bool {
        self.has_projection
    }

    /// Statistics and other descriptive lines from the server.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Nothing to read: no projection, no columns, no rows, or an empty first row.
    pub fn is_empty(&self) -> bool {
        !self.has_projection
            || self.columns.is_empty()
            || self.rows.first().is_none_or(Row::is_empty)
    }

    pub fn fault(&self) -> Option<&QueryFault> {
        self.fault.as_ref()
    }

    /// Cell of `row` under `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    /// First row as a mapping; `None` when there is no data.
    pub fn row(&self) -> Option<Mapping> {
        if self.is_empty() {
            return None;
        }
        self.rows.first().map(|r| mapping::row_mapping(&self.columns, r))
    }

    /// All rows as mappings; `None` when there is no data.
    pub fn rows(&self) -> Option<Vec<Mapping>> {
        if self.is_empty() {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|r| mapping::row_mapping(&self.columns, r))
                .collect(),
        )
    }

    /// Scan the first row into a single-record destination.
    pub fn row_scan<T: Record + 'static>(
        &self,
        scanner: &Scanner,
        dest: Destination<'_, T>,
    ) -> Result<(), ScanError> {
        match self.rows.first() {
            Some(first) if !self.is_empty() => scanner.scan_into(&self.columns, first, dest),
            _ => Err(ScanError::Empty),
        }
    }

    /// Scan all rows into a sequence destination.
    pub fn rows_scan<T: Record + Default + 'static>(
        &self,
        scanner: &Scanner,
        dest: Destination<'_, T>,
    ) -> Result<(), ScanError> {
        if self.is_empty() {
            return Err(ScanError::Empty);
        }
        scanner.scan_many(&self.columns, &self.rows, dest)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entity::{Node, Properties};
    use crate::scalar::Scalar;

    fn pods() -> ResultSet {
        let node = Node {
            id: 1,
            labels: vec!["pod".into()],
            properties: Properties::from([("ts".to_string(), Scalar::Integer(10241))]),
        };
        ResultSet::with_projection(
            vec!["id".into(), "p".into()],
            vec![
                Row::new(vec![Cell::Basic(Scalar::Integer(7)), Cell::Node(node)]),
                Row::new(vec![Cell::Basic(Scalar::Nil), Cell::Node(Node::default())]),
            ],
            vec!["Cached execution: 1".into()],
        )
    }

    #[test]
    fn plain_accessors() {
        let rs = pods();
        assert!(rs.is_result());
        assert!(!rs.is_empty());
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.columns(), ["id", "p"]);
        assert_eq!(rs.messages(), ["Cached execution: 1"]);
        assert!(rs.fault().is_none());
        assert_eq!(rs.cell(0, "id"), Some(&Cell::Basic(Scalar::Integer(7))));
        assert_eq!(rs.cell(0, "nope"), None);
        assert_eq!(rs.cell(5, "id"), None);
    }

    #[test]
    fn row_mapping_stringifies_basic_cells() {
        let row = pods().row().unwrap();
        assert_eq!(row["id"], json!("7"));
        assert_eq!(
            row["p"],
            json!({ "id": 1, "labels": ["pod"], "properties": { "ts": 10241 } })
        );
    }

    #[test]
    fn rows_mapping_covers_all_rows() {
        let rows = pods().rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["id"], json!(""));
    }

    #[test]
    fn no_projection_has_no_data() {
        let rs = ResultSet::without_projection(vec!["Nodes created: 1".into()]);
        assert!(!rs.is_result());
        assert!(rs.row().is_none());
        assert!(rs.rows().is_none());
        assert_eq!(rs.messages().len(), 1);
    }

    #[test]
    fn empty_columns_have_no_data() {
        let rs = ResultSet::with_projection(vec![], vec![Row::new(vec![])], vec![]);
        assert!(rs.is_result());
        assert!(rs.is_empty());
        assert!(rs.row().is_none());
    }

    #[test]
    fn failed_result_exposes_fault() {
        let rs = ResultSet::failed(QueryFault::new("Invalid input"), vec![]);
        assert_eq!(rs.fault().map(QueryFault::message), Some("Invalid input"));
        assert_eq!(rs.fault().unwrap().to_string(), "graph query: Invalid input");
        assert!(rs.row().is_none());
    }
}
