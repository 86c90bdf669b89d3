use crate::{Result, Row};

/// A host type persisted through an [`Accessor`](crate::Accessor).
///
/// Both directions use the declared field order of the entity schema.
pub trait Entity: Sized {
    /// Every field value, primary key included.
    fn row(&self) -> Row;

    /// Build the entity from a decoded row.
    fn from_row(row: Row) -> Result<Self>;
}
