use crate::error::Result;

/// Storage for normalized words.
pub trait Index {
    fn add(&mut self, word: &str) -> Result<()>;
    fn contains(&self, word: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds every word, stopping at the first rejected one.
    fn add_all<'a, I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        items.into_iter().try_for_each(|x| self.add(x))
    }
}
