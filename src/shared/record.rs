use crate::shared::audit::Auditable;

/// A persisted, soft-deletable entity addressed by a numeric id.
pub trait Record: Auditable + Clone + Send + Sync + 'static {
    /// Backing table
    const TABLE: &'static str;

    /// Human readable name used in messages
    const LABEL: &'static str;

    /// Foreign keys whose target must be active for this row to be
    /// visible. A null key does not hide the row.
    const REFERENCES: &'static [Reference] = &[];

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Value of a filterable column, for backends that evaluate filters
    /// in process
    fn field(&self, column: &str) -> FieldValue<'_>;
}

/// Borrowed view of a filterable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Id(Option<i64>),
    Unknown,
}

/// Foreign key column and the table it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub column: &'static str,
    pub table: &'static str,
}
