/// Construction options for a collection
///
/// Carried over to every collection derived through `copy`, `filter` or
/// `sort_by`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Name used in log fields and error messages (defaults to the element type name)
    pub label: Option<String>,

    /// Number of items to pre-allocate room for
    pub capacity: usize,
}

impl CollectionConfig {
    /// Create a configuration with no label and no pre-allocation
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the pre-allocation hint
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
