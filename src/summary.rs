//! Grouped-and-summed result tables.

use serde::Serialize;
use std::collections::BTreeMap;

/// One `(key, summed count)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow<K> {
    pub key: K,
    pub cnt: u64,
}

/// Rows ordered ascending by key, one per key present in the input.
///
/// Keys with no matching records are absent rather than zero-filled, so a
/// table may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryTable<K> {
    rows: Vec<SummaryRow<K>>,
}

impl<K> SummaryTable<K> {
    pub fn rows(&self) -> &[SummaryRow<K>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow<K>> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every row's count.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.cnt).sum()
    }

    /// Position of the row with the largest count.
    ///
    /// Ties go to the earliest row. `None` for an empty table.
    pub fn max_index(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (i, row) in self.rows.iter().enumerate() {
            match best {
                Some((_, cnt)) if row.cnt <= cnt => {}
                _ => best = Some((i, row.cnt)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The row with the largest count, see [`max_index`](Self::max_index).
    pub fn max_row(&self) -> Option<&SummaryRow<K>> {
        self.max_index().map(|i| &self.rows[i])
    }

    pub fn get(&self, key: &K) -> Option<u64>
    where
        K: Ord,
    {
        self.rows
            .binary_search_by(|row| row.key.cmp(key))
            .ok()
            .map(|i| self.rows[i].cnt)
    }
}

impl<K: Ord> From<BTreeMap<K, u64>> for SummaryTable<K> {
    fn from(groups: BTreeMap<K, u64>) -> Self {
        Self {
            rows: groups
                .into_iter()
                .map(|(key, cnt)| SummaryRow { key, cnt })
                .collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a SummaryTable<K> {
    type Item = &'a SummaryRow<K>;
    type IntoIter = std::slice::Iter<'a, SummaryRow<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u8, u64)]) -> SummaryTable<u8> {
        pairs.iter().copied().collect::<BTreeMap<_, _>>().into()
    }

    #[test]
    fn test_rows_sorted_by_key() {
        let t = table(&[(3, 1), (1, 2), (2, 3)]);
        let keys: Vec<u8> = t.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(t.total(), 6);
    }

    #[test]
    fn test_max_prefers_first_on_tie() {
        let t = table(&[(1, 5), (2, 9), (3, 9), (4, 2)]);
        assert_eq!(t.max_index(), Some(1));
        assert_eq!(t.max_row(), Some(&SummaryRow { key: 2, cnt: 9 }));
    }

    #[test]
    fn test_max_of_empty_table() {
        let t = table(&[]);
        assert!(t.is_empty());
        assert_eq!(t.max_index(), None);
        assert_eq!(t.max_row(), None);
        assert_eq!(t.total(), 0);
    }

    #[test]
    fn test_get_by_key() {
        let t = table(&[(1, 5), (7, 2)]);
        assert_eq!(t.get(&7), Some(2));
        assert_eq!(t.get(&3), None);
    }

    #[test]
    fn test_serializes_as_row_list() {
        let t = table(&[(1, 15), (2, 20)]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"key":1,"cnt":15},{"key":2,"cnt":20}]"#);
    }
}
