//! Declarative row filters for list endpoints.
//!
//! A [`QueryFilter`] is built from optional criteria and handed to a storage
//! backend, which either renders it to SQL or evaluates it per record. The
//! soft-delete predicate is part of every filter and cannot be switched off;
//! only lookups by id may see deleted rows.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::shared::record::{FieldValue, Record};

/// How `contains` compares text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMatch {
    #[default]
    Insensitive,
    Sensitive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Substring match on a text column
    Contains { column: &'static str, needle: String },
    /// Equality on an id column
    Equals { column: &'static str, value: i64 },
    /// Equality on a text/enum column
    TextEquals { column: &'static str, value: String },
    /// Id column is one of `values`; an empty list matches nothing
    In { column: &'static str, values: Vec<i64> },
    /// `created_at >= at`
    CreatedFrom(DateTime<Utc>),
    /// `created_at < at`
    CreatedBefore(DateTime<Utc>),
}

#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    text_match: TextMatch,
    conditions: Vec<Condition>,
}

impl QueryFilter {
    pub fn new(text_match: TextMatch) -> Self {
        Self {
            text_match,
            conditions: Vec::new(),
        }
    }

    pub fn text_match(&self) -> TextMatch {
        self.text_match
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Keep rows whose `column` contains `value`; no-op when absent or empty
    pub fn contains(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(needle) = value.filter(|v| !v.is_empty()) {
            self.conditions.push(Condition::Contains {
                column,
                needle: needle.to_string(),
            });
        }
        self
    }

    pub fn equals(mut self, column: &'static str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.conditions.push(Condition::Equals { column, value });
        }
        self
    }

    pub fn text_equals(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.conditions.push(Condition::TextEquals {
                column,
                value: value.to_string(),
            });
        }
        self
    }

    pub fn in_ids(mut self, column: &'static str, values: Vec<i64>) -> Self {
        self.conditions.push(Condition::In { column, values });
        self
    }

    /// Restrict `created_at` to a calendar-date range, both ends inclusive.
    ///
    /// `to` is advanced one day and compared with `<`, so the whole last day
    /// is kept.
    pub fn created_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        if let Some(from) = from {
            self.conditions.push(Condition::CreatedFrom(start_of_day(from)));
        }
        if let Some(next_day) = to.and_then(|d| d.checked_add_days(Days::new(1))) {
            self.conditions
                .push(Condition::CreatedBefore(start_of_day(next_day)));
        }
        self
    }

    /// Evaluate the filter against one record, soft-delete predicate first
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        if record.audit().is_deleted() {
            return false;
        }

        self.conditions.iter().all(|condition| match condition {
            Condition::Contains { column, needle } => match record.field(column) {
                FieldValue::Text(Some(haystack)) => self.text_contains(haystack, needle),
                _ => false,
            },
            Condition::Equals { column, value } => {
                matches!(record.field(column), FieldValue::Id(Some(v)) if v == *value)
            }
            Condition::TextEquals { column, value } => {
                matches!(record.field(column), FieldValue::Text(Some(v)) if v == value.as_str())
            }
            Condition::In { column, values } => {
                matches!(record.field(column), FieldValue::Id(Some(v)) if values.contains(&v))
            }
            Condition::CreatedFrom(at) => record.audit().created_at >= *at,
            Condition::CreatedBefore(at) => record.audit().created_at < *at,
        })
    }

    fn text_contains(&self, haystack: &str, needle: &str) -> bool {
        match self.text_match {
            TextMatch::Sensitive => haystack.contains(needle),
            TextMatch::Insensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Escape LIKE wildcards so user input matches literally
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::audit::{AuditFields, Auditable};
    use chrono::TimeZone;

    #[derive(Clone)]
    struct Row {
        id: i64,
        name: String,
        email: Option<String>,
        parent_id: Option<i64>,
        audit: AuditFields,
    }

    impl Auditable for Row {
        fn audit(&self) -> &AuditFields {
            &self.audit
        }
        fn audit_mut(&mut self) -> &mut AuditFields {
            &mut self.audit
        }
    }

    impl Record for Row {
        const TABLE: &'static str = "rows";
        const LABEL: &'static str = "Row";

        fn id(&self) -> i64 {
            self.id
        }
        fn set_id(&mut self, id: i64) {
            self.id = id;
        }
        fn field(&self, column: &str) -> FieldValue<'_> {
            match column {
                "name" => FieldValue::Text(Some(self.name.as_str())),
                "email" => FieldValue::Text(self.email.as_deref()),
                "parent_id" => FieldValue::Id(self.parent_id),
                _ => FieldValue::Unknown,
            }
        }
    }

    fn row(name: &str, created_at: DateTime<Utc>) -> Row {
        Row {
            id: 1,
            name: name.to_string(),
            email: None,
            parent_id: None,
            audit: AuditFields {
                created_at,
                updated_at: None,
                deleted_at: None,
            },
        }
    }

    fn jan(day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, h, m, s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_absent_criteria_are_noops() {
        let filter = QueryFilter::new(TextMatch::Insensitive)
            .contains("name", None)
            .contains("name", Some(""))
            .equals("parent_id", None)
            .created_between(None, None);

        assert!(filter.conditions().is_empty());
        assert!(filter.matches(&row("anything", jan(1, 0, 0, 0))));
    }

    #[test]
    fn test_deleted_rows_never_match() {
        let mut deleted = row("Acme", jan(1, 0, 0, 0));
        deleted.audit.deleted_at = Some(jan(2, 0, 0, 0));

        assert!(!QueryFilter::default().matches(&deleted));
        assert!(!QueryFilter::default()
            .contains("name", Some("Acme"))
            .matches(&deleted));
    }

    #[test]
    fn test_contains_case_modes() {
        let acme = row("Acme Supplies", jan(1, 0, 0, 0));

        let insensitive = QueryFilter::new(TextMatch::Insensitive).contains("name", Some("acme"));
        assert!(insensitive.matches(&acme));

        let sensitive = QueryFilter::new(TextMatch::Sensitive).contains("name", Some("acme"));
        assert!(!sensitive.matches(&acme));

        let exact = QueryFilter::new(TextMatch::Sensitive).contains("name", Some("Supplies"));
        assert!(exact.matches(&acme));
    }

    #[test]
    fn test_in_ids() {
        let mut child = row("Screws", jan(1, 0, 0, 0));
        child.parent_id = Some(7);
        let orphan = row("Nails", jan(1, 0, 0, 0));

        let filter = QueryFilter::default().in_ids("parent_id", vec![3, 7]);
        assert!(filter.matches(&child));
        assert!(!filter.matches(&orphan));

        assert!(!QueryFilter::default()
            .in_ids("parent_id", Vec::new())
            .matches(&child));
    }

    #[test]
    fn test_contains_on_missing_optional_column() {
        let no_email = row("Acme", jan(1, 0, 0, 0));
        let filter = QueryFilter::default().contains("email", Some("@"));
        assert!(!filter.matches(&no_email));
    }

    #[test]
    fn test_conditions_are_anded() {
        let mut child = row("Screws", jan(1, 0, 0, 0));
        child.parent_id = Some(7);

        let both = QueryFilter::default()
            .contains("name", Some("scr"))
            .equals("parent_id", Some(7));
        assert!(both.matches(&child));

        let wrong_parent = QueryFilter::default()
            .contains("name", Some("scr"))
            .equals("parent_id", Some(8));
        assert!(!wrong_parent.matches(&child));
    }

    #[test]
    fn test_date_to_covers_whole_day() {
        let filter = QueryFilter::default().created_between(None, Some(date(5)));

        assert!(filter.matches(&row("late", jan(5, 23, 59, 59))));
        assert!(!filter.matches(&row("next", jan(6, 0, 0, 1))));
    }

    #[test]
    fn test_date_from_is_inclusive() {
        let filter = QueryFilter::default().created_between(Some(date(5)), None);

        assert!(filter.matches(&row("midnight", jan(5, 0, 0, 0))));
        assert!(!filter.matches(&row("before", jan(4, 23, 59, 59))));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
