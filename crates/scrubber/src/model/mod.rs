pub mod category;
pub mod record;

pub use category::Category;
pub use record::FileRecord;

/// Two or more records whose content hashes are identical.
///
/// Members borrow from the scan result and keep the order in which the
/// detector encountered them.
#[derive(Debug, Clone)]
pub struct DuplicateGroup<'a> {
    pub hash: String,
    pub files: Vec<&'a FileRecord>,
}

impl<'a> DuplicateGroup<'a> {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Size of a single member. All members share it since their content is identical.
    pub fn file_size(&self) -> u64 {
        self.files.first().map(|f| f.size).unwrap_or(0)
    }

    /// Bytes that would be reclaimed by keeping exactly one copy.
    pub fn wasted_bytes(&self) -> u64 {
        self.file_size() * (self.files.len().saturating_sub(1) as u64)
    }
}
