use fxhash::FxHashMap as HashMap;

///
/// Sequence dictionary: chromosome names and lengths, addressed by a dense `u32` id.
///
/// Ids are assigned in insertion order, so the order in which chromosomes are added is
/// the order in which packed keys sort.
///
#[derive(Debug, Clone, Default)]
pub struct SeqDict {
    names: Vec<String>,
    lens: Vec<u32>,
    index: HashMap<String, u32>,
}

impl SeqDict {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Add a chromosome, returning its id. Adding an existing name returns the existing id
    /// and keeps the larger of the two lengths.
    ///
    pub fn add(&mut self, name: &str, len: u32) -> u32 {
        if let Some(&id) = self.index.get(name) {
            let slot = &mut self.lens[id as usize];
            *slot = (*slot).max(len);
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.lens.push(len);
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    pub fn chrom_len(&self, id: u32) -> Option<u32> {
        self.lens.get(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.names.iter().map(String::as_str).zip(self.lens.iter().copied())
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for SeqDict {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut d = SeqDict::new();
        for (name, len) in iter {
            d.add(name.as_ref(), len);
        }
        d
    }
}
