use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::record::{FieldInfo, Record};

/// Binding key → field position for one record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructSpec {
    keys: HashMap<String, usize>,
}

impl StructSpec {
    /// Build from field metadata.
    ///
    /// A field binds only if it is `pub` and its tag key (text before the
    /// first `separator`) is neither empty nor `exclude`. On duplicate keys the
    /// later field wins.
    pub fn build(record: &str, fields: &[FieldInfo], separator: char, exclude: &str) -> Self {
        let mut keys = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if !field.public {
                continue;
            }
            let key = field.tag.split(separator).next().unwrap_or_default();
            if key.is_empty() || key == exclude {
                continue;
            }
            if let Some(prev) = keys.insert(key.to_string(), position) {
                tracing::warn!(
                    record,
                    key,
                    first = fields[prev].name,
                    second = field.name,
                    "duplicate binding key"
                );
            }
        }
        tracing::debug!(record, bound = keys.len(), skipped = fields.len() - keys.len(), "struct spec built");
        Self { keys }
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Per-type cache of [`StructSpec`]s.
///
/// Specs are built on first use and kept for the life of the cache. Concurrent
/// first use may build the same spec twice; only the first one published is
/// ever handed out.
#[derive(Debug)]
pub struct SpecCache {
    separator: char,
    exclude: String,
    specs: RwLock<HashMap<TypeId, Arc<StructSpec>>>,
}

impl Default for SpecCache {
    fn default() -> Self {
        Self::new(',', "-")
    }
}

impl SpecCache {
    pub fn new(separator: char, exclude: impl Into<String>) -> Self {
        Self {
            separator,
            exclude: exclude.into(),
            specs: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_or_create<T: Record + 'static>(&self) -> Arc<StructSpec> {
        let id = TypeId::of::<T>();
        if let Some(spec) = self.specs.read().get(&id) {
            return Arc::clone(spec);
        }

        // Built without holding the lock; a racing builder may publish first.
        let built = Arc::new(StructSpec::build(
            T::record_name(),
            T::fields(),
            self.separator,
            &self.exclude,
        ));
        Arc::clone(self.specs.write().entry(id).or_insert(built))
    }

    /// Number of record types with a published spec.
    pub fn len(&self) -> usize {
        self.specs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.read().is_empty()
    }
}
