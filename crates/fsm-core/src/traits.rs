//! Core traits shared by every record type

/// Primary key type
pub type Id = i64;

/// Trait for records that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Base trait for all stored records
pub trait Entity: Identifiable + Clone + Send + Sync {
    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;

    /// Assign the primary key once the store allocates it
    fn set_id(&mut self, id: Id);
}

/// Records that carry a display name
pub trait Named {
    fn display_name(&self) -> &str;
}
