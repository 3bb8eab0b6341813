use serde_json::Value;

use crate::entity::Properties;
use crate::row::{Cell, Row};
use crate::scalar::Scalar;

/// Ordered name → value structure used by the untyped accessors.
pub type Mapping = serde_json::Map<String, Value>;

/// Same shape as the `Serialize` impl: number, null or string.
pub fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Integer(v) => Value::from(*v),
        Scalar::Text(s) => Value::String(s.clone()),
        Scalar::Nil | Scalar::Unset => Value::Null,
    }
}

pub fn properties_value(properties: &Properties) -> Value {
    Value::Object(
        properties
            .iter()
            .map(|(k, v)| (k.clone(), scalar_value(v)))
            .collect(),
    )
}

/// Dynamic view of one cell: basic cells as text, entities as mappings.
pub fn cell_value(cell: &Cell) -> Value {
    match cell {
        Cell::Basic(s) => Value::String(s.to_string()),
        Cell::Node(n) => Value::Object(n.to_mapping()),
        Cell::Edge(e) => Value::Object(e.to_mapping()),
    }
}

/// Zip `columns` with the cells of `row`. Missing cells are skipped.
pub fn row_mapping(columns: &[String], row: &Row) -> Mapping {
    columns
        .iter()
        .zip(row.cells())
        .map(|(name, cell)| (name.clone(), cell_value(cell)))
        .collect()
}
