use sqlx::query_builder::Separated;
use sqlx::{FromRow, Postgres};

use crate::core::storage::PgRecord;
use crate::shared::audit::{AuditFields, Auditable};
use crate::shared::record::{FieldValue, Record};

/// Database model for supplier
#[derive(Debug, Clone, Default, FromRow)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Auditable for Supplier {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

impl Record for Supplier {
    const TABLE: &'static str = "suppliers";
    const LABEL: &'static str = "Supplier";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn field(&self, column: &str) -> FieldValue<'_> {
        match column {
            "name" => FieldValue::Text(Some(self.name.as_str())),
            "contact_person" => FieldValue::Text(self.contact_person.as_deref()),
            "email" => FieldValue::Text(self.email.as_deref()),
            "phone" => FieldValue::Text(self.phone.as_deref()),
            "address" => FieldValue::Text(self.address.as_deref()),
            _ => FieldValue::Unknown,
        }
    }
}

impl PgRecord for Supplier {
    const COLUMNS: &'static [&'static str] =
        &["name", "contact_person", "email", "phone", "address"];

    fn push_values<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.name.clone());
        values.push_bind(self.contact_person.clone());
        values.push_bind(self.email.clone());
        values.push_bind(self.phone.clone());
        values.push_bind(self.address.clone());
    }
}
