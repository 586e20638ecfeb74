/// Maps small-integer keys to runs of values, with all runs stored
/// contiguously in a single table.
#[derive(Clone, Debug)]
pub struct RampTable<T> {
    pub index: Vec<usize>,
    pub table: Vec<T>,
}

impl<T> RampTable<T> {
    pub fn new() -> Self {
        Self {
            index: vec![0],
            table: Vec::new(),
        }
    }

    pub fn num_values(&self) -> usize {
        self.table.len()
    }

    pub fn values<Q: Into<usize>>(&self, key: Q) -> &[T] {
        let key: usize = key.into();
        let start = self.index[key];
        let end = self.index[key + 1];
        &self.table[start..end]
    }

    /// Use like this:
    ///
    ///   rt.push_value(...);
    ///   rt.push_value(...);
    ///   rt.finish_key();
    pub fn push_value(&mut self, value: T) {
        self.table.push(value);
    }

    pub fn finish_key(&mut self) {
        let end = self.table.len();
        self.index.push(end);
    }
}

pub struct RampTableBuilder<T> {
    index: Vec<usize>,
    table: Vec<T>,
}

impl<T> RampTableBuilder<T> {
    pub fn with_capacity(keys: usize, values: usize) -> Self {
        Self {
            index: Vec::with_capacity(keys + 1),
            table: Vec::with_capacity(values),
        }
    }

    pub fn start_key(&mut self) {
        self.index.push(self.table.len());
    }

    pub fn push_value(&mut self, item: T) {
        self.table.push(item);
    }

    pub fn finish(mut self) -> RampTable<T> {
        let end = self.table.len();
        self.index.push(end);
        RampTable {
            index: self.index,
            table: self.table,
        }
    }
}
