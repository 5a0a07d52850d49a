//! Named image store: the state of one editing session.

use std::collections::HashMap;

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Map from image name to pixel buffer. Re-adding a name replaces the
/// previous buffer; entries are never removed implicitly.
#[derive(Debug, Default, Clone)]
pub struct ImageStore {
    images: HashMap<String, PixelBuffer>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`.
    pub fn put(&mut self, name: impl Into<String>, buffer: PixelBuffer) {
        self.images.insert(name.into(), buffer);
    }

    pub fn get(&self, name: &str) -> Option<&PixelBuffer> {
        self.images.get(name)
    }

    /// Like [`get`](Self::get), but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<&PixelBuffer, EditError> {
        self.images
            .get(name)
            .ok_or_else(|| EditError::NameNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Compute a new buffer from `source` and publish it as `destination`.
    pub(crate) fn derive(
        &mut self,
        source: &str,
        destination: &str,
        transform: impl FnOnce(&PixelBuffer) -> Result<PixelBuffer, EditError>,
    ) -> Result<(), EditError> {
        let derived = transform(self.require(source)?)?;
        self.put(destination, derived);
        Ok(())
    }
}
