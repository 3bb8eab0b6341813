use std::fmt;

use crate::entity::{Edge, Node};
use crate::scalar::Scalar;

/// Runtime kind of a result cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Basic,
    Node,
    Edge,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Basic => f.write_str("basic"),
            CellKind::Node => f.write_str("node"),
            CellKind::Edge => f.write_str("edge"),
        }
    }
}

/// One value at a column position.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Basic(Scalar),
    Node(Node),
    Edge(Edge),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Basic(_) => CellKind::Basic,
            Cell::Node(_) => CellKind::Node,
            Cell::Edge(_) => CellKind::Edge,
        }
    }
}

impl From<Scalar> for Cell {
    fn from(s: Scalar) -> Self {
        Cell::Basic(s)
    }
}

impl From<Node> for Cell {
    fn from(n: Node) -> Self {
        Cell::Node(n)
    }
}

impl From<Edge> for Cell {
    fn from(e: Edge) -> Self {
        Cell::Edge(e)
    }
}

/// Positional array of cells. Order matches the result set's columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Vec<Cell>);

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
