use crate::models::{ContactPair, SeqDict, sort_pairs};

///
/// PairMap struct, the in-memory representation of a pairs file: a sequence dictionary
/// and the contact pairs that refer to it.
///
#[derive(Debug, Clone, Default)]
pub struct PairMap {
    pub dict: SeqDict,
    pub pairs: Vec<ContactPair>,
}

impl PairMap {
    pub fn new(dict: SeqDict, pairs: Vec<ContactPair>) -> Self {
        PairMap { dict, pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    ///
    /// Sort pairs by chromosome pair and position.
    ///
    pub fn sort(&mut self) {
        sort_pairs(&mut self.pairs);
    }

    /// Whether pairs are already grouped by chromosome pair and sorted by position.
    pub fn is_sorted(&self) -> bool {
        self.pairs.is_sorted_by_key(|p| (p.chr, p.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_sort_and_counts() {
        let dict: SeqDict = vec![("chr1", 1000), ("chr2", 1000)].into_iter().collect();
        let mut map = PairMap::new(
            dict,
            vec![
                ContactPair::new(1, 10, 1, 20),
                ContactPair::new(0, 10, 1, 20),
                ContactPair::new(0, 50, 0, 60),
            ],
        );
        assert_eq!(map.len(), 3);
        assert!(!map.is_sorted());
        map.sort();
        assert!(map.is_sorted());
        assert_eq!(map.pairs[0].pos1(), 50);
    }
}
