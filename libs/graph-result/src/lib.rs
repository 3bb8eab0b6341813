//! Typed results for graph query replies.
//!
//! A [`ResultSet`] holds the decoded reply: columns plus rows of basic
//! scalars, nodes and edges. It can be read as dynamic [`Mapping`]s or scanned
//! into `#[derive(Record)]` structs through a [`Scanner`].

// Lets `#[derive(Record)]` expansions resolve `::graph_result` inside this crate.
extern crate self as graph_result;

pub mod config;
pub mod entity;
pub mod error;
pub mod mapping;
pub mod record;
pub mod result;
pub mod row;
pub mod scalar;
pub mod scan;
pub mod spec;

pub use config::{ColumnPolicy, ScannerConfig};
pub use entity::{Edge, Node, Properties};
pub use error::{ConfigError, ScanError};
pub use graph_result_derive::Record;
pub use mapping::Mapping;
pub use record::{Bindable, FieldInfo, FieldKind, FieldSlot, Record};
pub use result::{QueryFault, ResultSet};
pub use row::{Cell, CellKind, Row};
pub use scalar::Scalar;
pub use scan::{Destination, Scanner};
pub use spec::{SpecCache, StructSpec};
