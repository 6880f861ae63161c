/// Session storage for a screen's records. Only appends are supported; a
/// durable store can stand in for the in-memory one behind this trait.
pub trait Repository<T> {
    fn list_items(&self) -> &[T];
    fn add_item(&mut self, item: T);
    fn reset(&mut self);

    fn len(&self) -> usize {
        self.list_items().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    rows: Vec<T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository { rows: Vec::new() }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T> {
    fn list_items(&self) -> &[T] {
        &self.rows
    }

    fn add_item(&mut self, item: T) {
        self.rows.push(item);
    }

    fn reset(&mut self) {
        self.rows.clear();
    }
}
