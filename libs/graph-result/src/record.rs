use std::fmt;

use crate::entity::{Edge, Node};

/// Static description of one named field of a [`Record`].
///
/// Emitted by `#[derive(Record)]` for every field, tagged or not. The spec
/// cache decides which ones participate in binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Rust field name.
    pub name: &'static str,
    /// Raw `#[graph("...")]` tag, empty when absent.
    pub tag: &'static str,
    /// `true` only for plain `pub` fields.
    pub public: bool,
}

/// A caller-defined scan destination.
///
/// Normally derived with `#[derive(Record)]`; a hand-written impl must keep
/// `fields()` and `slot()` in the same positional order.
pub trait Record {
    /// Short type name used in error messages.
    fn record_name() -> &'static str;

    /// All named fields, in declaration order.
    fn fields() -> &'static [FieldInfo];

    /// Mutable access to the field at `position` (index into `fields()`).
    fn slot(&mut self, position: usize) -> FieldSlot<'_>;
}

/// Typed mutable view of a record field, handed to the scanner.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    Node(&'a mut Node),
    Edge(&'a mut Edge),
    /// Field type with no mapping; carries the type as written.
    Unsupported(&'static str),
}

impl FieldSlot<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldSlot::Node(_) => FieldKind::Node,
            FieldSlot::Edge(_) => FieldKind::Edge,
            FieldSlot::Unsupported(_) => FieldKind::Unsupported,
            _ => FieldKind::Primitive,
        }
    }
}

/// Static kind of a bound field, as far as the scanner cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// bool, integers, floats, String.
    Primitive,
    Node,
    Edge,
    Unsupported,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive => f.write_str("primitive"),
            FieldKind::Node => f.write_str("node"),
            FieldKind::Edge => f.write_str("edge"),
            FieldKind::Unsupported => f.write_str("unsupported"),
        }
    }
}

/// Field types the scanner can write into.
///
/// `Option<T>` is filled with `T::default()` on first access, so a matched
/// optional field is never left as `None`. Access happens before the cell
/// kind is checked: a mismatched column still leaves `Some(T::default())`.
pub trait Bindable {
    fn slot(&mut self) -> FieldSlot<'_>;
}

macro_rules! bindable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::$variant(self)
                }
            }
        )*
    };
}

bindable! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
    Node => Node,
    Edge => Edge,
}

impl<T: Bindable + Default> Bindable for Option<T> {
    fn slot(&mut self) -> FieldSlot<'_> {
        self.get_or_insert_with(T::default).slot()
    }
}

impl<T: Bindable + ?Sized> Bindable for Box<T> {
    fn slot(&mut self) -> FieldSlot<'_> {
        (**self).slot()
    }
}

/// Support for `#[derive(Record)]` expansions.
///
/// `FieldRef { .. }.into_field_slot()` resolves to `BindableField` when the
/// field type implements [`Bindable`] (method lookup tries the by-value
/// receiver first) and to `OpaqueField` through auto-ref otherwise.
#[doc(hidden)]
pub mod __private {
    use super::{Bindable, FieldSlot};

    pub struct FieldRef<'a, T: ?Sized> {
        pub field: &'a mut T,
        pub ty: &'static str,
    }

    pub trait BindableField<'a> {
        fn into_field_slot(self) -> FieldSlot<'a>;
    }

    impl<'a, T: Bindable + ?Sized> BindableField<'a> for FieldRef<'a, T> {
        fn into_field_slot(self) -> FieldSlot<'a> {
            self.field.slot()
        }
    }

    pub trait OpaqueField<'a> {
        fn into_field_slot(self) -> FieldSlot<'a>;
    }

    impl<'a, T: ?Sized> OpaqueField<'a> for &mut FieldRef<'a, T> {
        fn into_field_slot(self) -> FieldSlot<'a> {
            FieldSlot::Unsupported(self.ty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_slot_allocates_once() {
        let mut v: Option<i64> = None;
        match v.slot() {
            FieldSlot::I64(x) => *x = 9,
            other => panic!("unexpected slot {other:?}"),
        }
        assert_eq!(v, Some(9));

        // Second access reuses the existing value.
        match v.slot() {
            FieldSlot::I64(x) => assert_eq!(*x, 9),
            other => panic!("unexpected slot {other:?}"),
        }
    }

    #[test]
    fn field_ref_dispatches_on_trait_impl() {
        use __private::{BindableField as _, FieldRef, OpaqueField as _};

        type Ts = i64;
        let mut ts: Ts = 0;
        let slot = FieldRef { field: &mut ts, ty: "Ts" }.into_field_slot();
        assert_eq!(slot.kind(), FieldKind::Primitive);
        assert!(matches!(slot, FieldSlot::I64(_)));

        let mut tags: Vec<String> = Vec::new();
        let slot = FieldRef { field: &mut tags, ty: "Vec<String>" }.into_field_slot();
        assert!(matches!(slot, FieldSlot::Unsupported("Vec<String>")));
    }

    #[test]
    fn nested_wrappers_reach_inner_kind() {
        let mut v: Option<Box<Node>> = None;
        assert_eq!(v.slot().kind(), FieldKind::Node);
        assert!(v.is_some());
    }
}
