//! The cached, indexed interface list.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::network::{AdapterGuid, InterfaceRecord};

/// A point-in-time list of interfaces with name and index lookups.
///
/// Cheap to clone; clones share the same records. Iteration order is the
/// order the platform reported interfaces in and never changes.
#[derive(Clone, Default)]
pub struct Snapshot {
    inner: Arc<Indexed>,
}

#[derive(Default)]
struct Indexed {
    records: Vec<Arc<InterfaceRecord>>,
    by_name: HashMap<String, usize>,
    by_index: HashMap<u32, usize>,
    by_guid: HashMap<AdapterGuid, usize>,
}

impl Snapshot {
    /// Builds a snapshot from records in platform order.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = InterfaceRecord>) -> Self {
        let mut builder = SnapshotBuilder::default();
        for record in records {
            builder.push(Arc::new(record));
        }
        builder.build()
    }

    /// Returns the number of interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    /// Returns true if the snapshot holds no interfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// Returns the interface at `position` in platform order.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Arc<InterfaceRecord>> {
        self.inner.records.get(position)
    }

    /// Finds an interface by name.
    ///
    /// A name that parses as an adapter GUID, with or without braces, also
    /// matches the interface carrying that GUID.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<InterfaceRecord>> {
        let position = self.inner.by_name.get(name).copied().or_else(|| {
            name.parse::<AdapterGuid>()
                .ok()
                .and_then(|guid| self.inner.by_guid.get(&guid).copied())
        })?;
        self.inner.records.get(position)
    }

    /// Finds an interface by index.
    #[must_use]
    pub fn get_by_index(&self, index: u32) -> Option<&Arc<InterfaceRecord>> {
        let position = *self.inner.by_index.get(&index)?;
        self.inner.records.get(position)
    }

    /// Returns the records in platform order.
    #[must_use]
    pub fn records(&self) -> &[Arc<InterfaceRecord>] {
        &self.inner.records
    }

    /// Iterates over the records in platform order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &InterfaceRecord> + '_ {
        self.inner.records.iter().map(AsRef::as_ref)
    }

    /// Returns true if both values share the same underlying list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Arc<InterfaceRecord>;
    type IntoIter = std::slice::Iter<'a, Arc<InterfaceRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.records.iter()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(InterfaceRecord::name)).finish()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Accumulates records and their lookup indexes.
#[derive(Default)]
pub(crate) struct SnapshotBuilder {
    inner: Indexed,
}

impl SnapshotBuilder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Indexed {
                records: Vec::with_capacity(capacity),
                by_name: HashMap::with_capacity(capacity),
                by_index: HashMap::with_capacity(capacity),
                by_guid: HashMap::new(),
            },
        }
    }

    /// Appends a record. On duplicate keys the first record keeps the lookup.
    pub(crate) fn push(&mut self, record: Arc<InterfaceRecord>) {
        let position = self.inner.records.len();

        match self.inner.by_name.entry(record.name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
            Entry::Occupied(_) => {
                tracing::debug!(name = record.name(), "Duplicate interface name in snapshot");
            }
        }
        if record.index() != 0 {
            self.inner.by_index.entry(record.index()).or_insert(position);
        }
        if let Some(guid) = record.guid() {
            self.inner.by_guid.entry(guid).or_insert(position);
        }

        self.inner.records.push(record);
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub(crate) fn build(self) -> Snapshot {
        Snapshot {
            inner: Arc::new(self.inner),
        }
    }
}
