use std::sync::Arc;

use std::borrow::Borrow;
use std::collections::BTreeMap;

/// An immutable, cheaply cloneable list of values indexed by key.
///
/// The first value of a duplicated key wins.
#[derive(Debug)]
pub struct Map<K, V>(Arc<Inner<K, V>>);

#[derive(Debug)]
struct Inner<K, V> {
    entries: BTreeMap<K, usize>,
    values: Arc<[V]>,
}

impl<K, V> Map<K, V> {
    pub fn new(values: impl Into<Arc<[V]>>, to_key: impl Fn(&V) -> K) -> Self
    where
        K: Ord,
    {
        let values = values.into();
        let mut entries = BTreeMap::new();

        for (i, value) in values.iter().enumerate() {
            let _ = entries.entry(to_key(value)).or_insert(i);
        }

        Self(Arc::new(Inner { entries, values }))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        Some(&self.0.values[*self.0.entries.get(key)?])
    }

    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> &[V] {
        &self.0.values
    }
}

impl<K, V> Clone for Map<K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
