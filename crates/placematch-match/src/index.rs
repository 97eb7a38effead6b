//! In-memory registry index grouped by normalized name.

use indexmap::IndexMap;
use placematch_model::ReferenceRecord;
use tracing::debug;

use crate::normalize::{NormalizedKey, normalize};

/// Registry records grouped by [`NormalizedKey`].
///
/// Built once and read-only afterwards. Groups preserve registry order, and
/// keys iterate in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    records: Vec<ReferenceRecord>,
    groups: IndexMap<NormalizedKey, Vec<usize>>,
}

/// Records sharing one key, in registry order.
#[derive(Debug, Clone, Copy)]
pub struct KeyGroup<'a> {
    key: &'a NormalizedKey,
    members: &'a [usize],
    records: &'a [ReferenceRecord],
}

impl<'a> KeyGroup<'a> {
    /// Shared normalized key.
    pub fn key(&self) -> &'a NormalizedKey {
        self.key
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The record when the group holds exactly one.
    pub fn single(&self) -> Option<&'a ReferenceRecord> {
        match self.members {
            [only] => self.records.get(*only),
            _ => None,
        }
    }

    /// Member records in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &'a ReferenceRecord> + 'a {
        let (members, records) = (self.members, self.records);
        members.iter().filter_map(move |&idx| records.get(idx))
    }
}

impl RegistryIndex {
    /// Indexes every record under the key of its display name.
    ///
    /// Never fails: records with an empty or unusual name land in the group
    /// of whatever key their name normalizes to.
    pub fn new(records: Vec<ReferenceRecord>) -> Self {
        let mut groups: IndexMap<NormalizedKey, Vec<usize>> = IndexMap::new();
        for (idx, record) in records.iter().enumerate() {
            groups.entry(normalize(&record.name)).or_default().push(idx);
        }
        debug!(
            record_count = records.len(),
            key_count = groups.len(),
            "registry index built"
        );
        Self { records, groups }
    }

    /// All records in registry order.
    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct keys.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group stored under exactly `key`, which must already be normalized.
    pub fn lookup_exact(&self, key: &str) -> Option<KeyGroup<'_>> {
        let (key, members) = self.groups.get_key_value(key)?;
        Some(KeyGroup {
            key,
            members,
            records: &self.records,
        })
    }

    /// Each distinct key once, in first-seen order.
    pub fn candidate_keys(&self) -> impl Iterator<Item = &NormalizedKey> {
        self.groups.keys()
    }

    /// Every group, in first-seen key order.
    pub fn groups(&self) -> impl Iterator<Item = KeyGroup<'_>> {
        self.groups.iter().map(|(key, members)| KeyGroup {
            key,
            members,
            records: &self.records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegistryIndex {
        RegistryIndex::new(vec![
            ReferenceRecord::new(1, "Santo André").with_location("SP", "Sudeste"),
            ReferenceRecord::new(2, "Curitiba").with_location("PR", "Sul"),
            ReferenceRecord::new(3, "Santo Andre").with_location("PB", "Nordeste"),
        ])
    }

    #[test]
    fn groups_share_normalized_key() {
        let index = sample();
        assert_eq!(index.len(), 3);
        assert_eq!(index.group_count(), 2);
        let group = index.lookup_exact("santo andre").unwrap();
        let ids: Vec<String> = group.iter().map(ReferenceRecord::id_string).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(group.single().is_none());
    }

    #[test]
    fn single_member_group() {
        let index = sample();
        let group = index.lookup_exact("curitiba").unwrap();
        assert_eq!(group.single().map(|r| r.name.as_str()), Some("Curitiba"));
    }

    #[test]
    fn unknown_key_misses() {
        assert!(sample().lookup_exact("Curitiba").is_none());
    }

    #[test]
    fn candidate_keys_first_seen_order() {
        let index = sample();
        let keys: Vec<&str> = index.candidate_keys().map(NormalizedKey::as_str).collect();
        assert_eq!(keys, vec!["santo andre", "curitiba"]);
    }

    #[test]
    fn records_keep_registry_order() {
        let index = sample();
        let ids: Vec<String> = index.records().iter().map(ReferenceRecord::id_string).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_registry() {
        let index = RegistryIndex::new(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.candidate_keys().count(), 0);
    }
}
