use crate::config::{ColumnPolicy, ScannerConfig};
use crate::error::ScanError;
use crate::record::{FieldKind, FieldSlot, Record};
use crate::row::{Cell, Row};
use crate::scalar::Scalar;
use crate::spec::{SpecCache, StructSpec};

/// Where scanned rows go.
///
/// `Record` takes exactly one row; `Records` and `Boxed` take all of them,
/// one fresh element per row.
#[derive(Debug)]
pub enum Destination<'a, T> {
    Record(&'a mut T),
    Records(&'a mut Vec<T>),
    Boxed(&'a mut Vec<Box<T>>),
}

impl<T> Destination<'_, T> {
    fn shape(&self) -> &'static str {
        match self {
            Destination::Record(_) => "a single record",
            Destination::Records(_) => "a sequence of records",
            Destination::Boxed(_) => "a sequence of boxed records",
        }
    }
}

/// Binds result rows into [`Record`] types.
///
/// Owns the [`SpecCache`]; share one scanner (e.g. behind an `Arc`) so every
/// record type is introspected once.
#[derive(Debug, Default)]
pub struct Scanner {
    config: ScannerConfig,
    cache: SpecCache,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        let cache = SpecCache::new(config.tag_separator, config.exclude_sentinel.clone());
        Self { config, cache }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn cache(&self) -> &SpecCache {
        &self.cache
    }

    /// Scan one row into a single-record destination.
    pub fn scan_into<T: Record + 'static>(
        &self,
        columns: &[String],
        row: &Row,
        dest: Destination<'_, T>,
    ) -> Result<(), ScanError> {
        match dest {
            Destination::Record(record) => self.scan_one(columns, row, record),
            other => Err(ScanError::BindingShape {
                expected: "a single record",
                found: other.shape(),
            }),
        }
    }

    /// Scan `row` into `record`.
    ///
    /// Columns without a tagged field are skipped (or rejected, per config).
    /// On a fault, fields written for earlier columns keep their new values.
    pub fn scan_one<T: Record + 'static>(
        &self,
        columns: &[String],
        row: &Row,
        record: &mut T,
    ) -> Result<(), ScanError> {
        let spec = self.cache.get_or_create::<T>();
        self.bind_row(&spec, columns, row, record)
    }

    /// Scan every row into a sequence destination.
    ///
    /// All-or-nothing: elements are appended to the destination only after
    /// every row bound successfully. The first fault is returned.
    pub fn scan_many<T: Record + Default + 'static>(
        &self,
        columns: &[String],
        rows: &[Row],
        dest: Destination<'_, T>,
    ) -> Result<(), ScanError> {
        if let Destination::Record(_) = dest {
            return Err(ScanError::BindingShape {
                expected: "a sequence of records",
                found: dest.shape(),
            });
        }

        let spec = self.cache.get_or_create::<T>();
        tracing::trace!(record = T::record_name(), rows = rows.len(), "scanning rows");

        let mut items = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let mut item = T::default();
            self.bind_row(&spec, columns, row, &mut item)
                .map_err(|e| e.with_context(format_args!("row {i}")))?;
            items.push(item);
        }

        match dest {
            Destination::Records(out) => out.extend(items),
            Destination::Boxed(out) => out.extend(items.into_iter().map(Box::new)),
            Destination::Record(_) => {}
        }
        Ok(())
    }

    fn bind_row<T: Record>(
        &self,
        spec: &StructSpec,
        columns: &[String],
        row: &Row,
        record: &mut T,
    ) -> Result<(), ScanError> {
        for (i, column) in columns.iter().enumerate() {
            let Some(position) = spec.position(column) else {
                match self.config.unknown_columns {
                    ColumnPolicy::Ignore => continue,
                    ColumnPolicy::Reject => {
                        return Err(ScanError::UnknownColumn {
                            record: T::record_name().to_string(),
                            column: column.clone(),
                        });
                    }
                }
            };
            // Rows are aligned with columns by the decoder; tolerate short rows.
            let Some(cell) = row.get(i) else {
                continue;
            };
            let field = T::fields().get(position).map_or("?", |f| f.name);

            let slot = record.slot(position);
            let expected = slot.kind();
            match (slot, cell) {
                (FieldSlot::Unsupported(ty), _) => {
                    return Err(ScanError::UnsupportedField {
                        record: T::record_name().to_string(),
                        column: column.clone(),
                        field,
                        ty,
                    });
                }
                (FieldSlot::Node(node), Cell::Node(value)) => node.clone_from(value),
                (FieldSlot::Edge(edge), Cell::Edge(value)) => edge.clone_from(value),
                (slot, Cell::Basic(value)) if expected == FieldKind::Primitive => {
                    write_scalar(slot, value)
                }
                (_, cell) => {
                    return Err(ScanError::TypeMismatch {
                        record: T::record_name().to_string(),
                        column: column.clone(),
                        field,
                        expected,
                        found: cell.kind(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Store a basic value into a primitive slot through the scalar accessors.
/// Narrowing casts truncate like the accessors they build on.
fn write_scalar(slot: FieldSlot<'_>, value: &Scalar) {
    match slot {
        FieldSlot::Bool(v) => *v = value.bool(),
        FieldSlot::I8(v) => *v = value.int() as i8,
        FieldSlot::I16(v) => *v = value.int() as i16,
        FieldSlot::I32(v) => *v = value.int() as i32,
        FieldSlot::I64(v) => *v = value.int() as i64,
        FieldSlot::Isize(v) => *v = value.int(),
        FieldSlot::U8(v) => *v = value.int() as u8,
        FieldSlot::U16(v) => *v = value.int() as u16,
        FieldSlot::U32(v) => *v = value.int() as u32,
        FieldSlot::U64(v) => *v = value.int() as u64,
        FieldSlot::Usize(v) => *v = value.int() as usize,
        FieldSlot::F32(v) => *v = value.float64() as f32,
        FieldSlot::F64(v) => *v = value.float64(),
        FieldSlot::Str(v) => *v = value.to_string(),
        // Filtered out by the caller.
        FieldSlot::Node(_) | FieldSlot::Edge(_) | FieldSlot::Unsupported(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::entity::{Edge, Node};
    use crate::Record;

    #[derive(Debug, Default, Record)]
    pub struct Widths {
        #[graph("n")]
        pub i8v: i8,
        #[graph("n")]
        pub u8v: u8,
        #[graph("f")]
        pub f32v: f32,
        #[graph("b")]
        pub opt: Option<bool>,
        #[graph("s")]
        pub boxed: Box<String>,
    }

    #[derive(Debug, Default, Record)]
    pub struct Mixed {
        #[graph("a")]
        pub a: i64,
        #[graph("node")]
        pub node: Node,
        #[graph("tags")]
        pub tags: Vec<String>,
        #[graph("meta")]
        pub meta: HashMap<String, String>,
        #[graph("edge")]
        pub edge: Option<Edge>,
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn narrowing_and_wrappers() {
        // Duplicate key "n" binds only one of the two fields.
        let scanner = Scanner::new();
        let row = Row::new(vec![
            Cell::Basic(Scalar::Integer(300)),
            Cell::Basic(Scalar::from("2.5")),
            Cell::Basic(Scalar::from("true")),
            Cell::Basic(Scalar::Integer(12)),
        ]);
        let mut w = Widths::default();
        scanner.scan_one(&cols(&["n", "f", "b", "s"]), &row, &mut w).unwrap();
        assert!(w.i8v == 300i64 as i8 || w.u8v == 300i64 as u8);
        assert_eq!(w.f32v, 2.5);
        assert_eq!(w.opt, Some(true));
        assert_eq!(*w.boxed, "12");
    }

    #[test]
    fn unsupported_regardless_of_cell_kind() {
        let scanner = Scanner::new();
        for cell in [Cell::Basic(Scalar::Nil), Cell::Node(Node::default())] {
            let row = Row::new(vec![cell]);
            let mut m = Mixed::default();
            let err = scanner.scan_one(&cols(&["tags"]), &row, &mut m).unwrap_err();
            assert!(
                matches!(err, ScanError::UnsupportedField { field: "tags", ty: "Vec<String>", .. }),
                "{err:?}"
            );
        }
        let row = Row::new(vec![Cell::Basic(Scalar::Nil)]);
        let err = scanner.scan_one(&cols(&["meta"]), &row, &mut Mixed::default()).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedField { field: "meta", .. }));
    }

    #[test]
    fn mismatch_keeps_earlier_fields() {
        let scanner = Scanner::new();
        let row = Row::new(vec![
            Cell::Basic(Scalar::Integer(5)),
            Cell::Basic(Scalar::Integer(6)),
        ]);
        let mut m = Mixed::default();
        let err = scanner.scan_one(&cols(&["a", "node"]), &row, &mut m).unwrap_err();
        assert_eq!(
            err,
            ScanError::TypeMismatch {
                record: "Mixed".into(),
                column: "node".into(),
                field: "node",
                expected: FieldKind::Node,
                found: crate::row::CellKind::Basic,
            }
        );
        assert_eq!(m.a, 5);
    }

    #[test]
    fn entity_into_primitive_is_mismatch() {
        let scanner = Scanner::new();
        let row = Row::new(vec![Cell::Edge(Edge::default())]);
        let err = scanner.scan_one(&cols(&["a"]), &row, &mut Mixed::default()).unwrap_err();
        assert!(matches!(err, ScanError::TypeMismatch { expected: FieldKind::Primitive, .. }));
    }

    #[test]
    fn optional_edge_allocated_on_match() {
        let scanner = Scanner::new();
        let edge = Edge { id: 9, ty: "link".into(), src_node: 1, dst_node: 2, ..Edge::default() };
        let row = Row::new(vec![Cell::Edge(edge.clone())]);
        let mut m = Mixed::default();
        scanner.scan_one(&cols(&["edge"]), &row, &mut m).unwrap();
        assert_eq!(m.edge, Some(edge));
    }

    #[test]
    fn short_row_is_tolerated() {
        let scanner = Scanner::new();
        let row = Row::new(vec![Cell::Basic(Scalar::Integer(1))]);
        let mut m = Mixed::default();
        scanner.scan_one(&cols(&["a", "node"]), &row, &mut m).unwrap();
        assert_eq!(m.a, 1);
    }

    #[test]
    fn reject_policy_flags_unknown_column() {
        let scanner = Scanner::with_config(ScannerConfig {
            unknown_columns: ColumnPolicy::Reject,
            ..ScannerConfig::default()
        });
        let row = Row::new(vec![Cell::Basic(Scalar::Integer(1))]);
        let err = scanner.scan_one(&cols(&["zzz"]), &row, &mut Mixed::default()).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnknownColumn { record: "Mixed".into(), column: "zzz".into() }
        );
    }

    #[test]
    fn scan_into_rejects_sequences() {
        let scanner = Scanner::new();
        let row = Row::new(vec![]);
        let mut out: Vec<Mixed> = Vec::new();
        let err = scanner.scan_into(&[], &row, Destination::Records(&mut out)).unwrap_err();
        assert!(matches!(err, ScanError::BindingShape { expected: "a single record", .. }));
    }

    #[test]
    fn scan_many_rejects_single_record() {
        let scanner = Scanner::new();
        let mut m = Mixed::default();
        let err = scanner.scan_many(&[], &[], Destination::Record(&mut m)).unwrap_err();
        assert!(matches!(err, ScanError::BindingShape { found: "a single record", .. }));
        assert!(scanner.cache().is_empty(), "shape check happens before introspection");
    }

    #[test]
    fn scan_many_is_all_or_nothing() {
        let scanner = Scanner::new();
        let rows = vec![
            Row::new(vec![Cell::Basic(Scalar::Integer(1))]),
            Row::new(vec![Cell::Node(Node::default())]),
        ];
        let mut out: Vec<Mixed> = vec![Mixed::default()];
        let err = scanner.scan_many(&cols(&["a"]), &rows, Destination::Records(&mut out)).unwrap_err();
        assert!(matches!(&err, ScanError::TypeMismatch { record, .. } if record == "row 1: Mixed"));
        assert_eq!(out.len(), 1, "destination untouched on failure");
    }
}
