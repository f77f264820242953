//! Active-record scoping for soft-deletable tables
//!
//! Every default read of `users`, `properties` and `property_requests`
//! starts from one of these builders, so the `is_deleted = FALSE`
//! predicate is always present. Callers append further conditions with
//! ` AND ...`.

use sqlx::{MySql, QueryBuilder};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ActiveScope {
    table: &'static str,
    alias: &'static str,
}

pub(crate) const USERS: ActiveScope = ActiveScope::new("users", "u");
pub(crate) const PROPERTIES: ActiveScope = ActiveScope::new("properties", "p");
pub(crate) const REQUESTS: ActiveScope = ActiveScope::new("property_requests", "r");

impl ActiveScope {
    const fn new(table: &'static str, alias: &'static str) -> Self {
        Self { table, alias }
    }

    /// `SELECT <columns> FROM <table> <alias> WHERE <alias>.is_deleted = FALSE`
    pub(crate) fn select<'args>(&self, columns: &str) -> QueryBuilder<'args, MySql> {
        self.select_joined(columns, "")
    }

    /// Same as [`ActiveScope::select`] with join clauses before the filter
    pub(crate) fn select_joined<'args>(
        &self,
        columns: &str,
        joins: &str,
    ) -> QueryBuilder<'args, MySql> {
        let mut sql = format!("SELECT {} FROM {} {}", columns, self.table, self.alias);
        if !joins.is_empty() {
            sql.push(' ');
            sql.push_str(joins);
        }
        sql.push_str(&format!(" WHERE {}.is_deleted = FALSE", self.alias));
        QueryBuilder::new(sql)
    }

    /// `SELECT COUNT(*)` over the active rows
    pub(crate) fn count<'args>(&self) -> QueryBuilder<'args, MySql> {
        self.select("COUNT(*)")
    }

    /// `UPDATE <table> SET ` ready for a separated column list
    ///
    /// Finish with [`ActiveScope::push_active_id`].
    pub(crate) fn update<'args>(&self) -> QueryBuilder<'args, MySql> {
        QueryBuilder::new(format!("UPDATE {} SET ", self.table))
    }

    /// Flag one active row as deleted
    pub(crate) fn soft_delete<'args>(&self, id: i64) -> QueryBuilder<'args, MySql> {
        let mut builder =
            QueryBuilder::new(format!("UPDATE {} SET is_deleted = TRUE", self.table));
        Self::push_active_id(&mut builder, id);
        builder
    }

    /// ` WHERE id = ? AND is_deleted = FALSE` for single-table statements
    pub(crate) fn push_active_id(builder: &mut QueryBuilder<'_, MySql>, id: i64) {
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND is_deleted = FALSE");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_always_filters_deleted_rows() {
        let builder = PROPERTIES.select("p.id, p.title");
        assert_eq!(
            builder.sql(),
            "SELECT p.id, p.title FROM properties p WHERE p.is_deleted = FALSE"
        );
    }

    #[test]
    fn test_joins_come_before_the_filter() {
        let builder =
            PROPERTIES.select_joined("p.id", "JOIN favorites f ON f.property_id = p.id");
        assert_eq!(
            builder.sql(),
            "SELECT p.id FROM properties p JOIN favorites f ON f.property_id = p.id \
             WHERE p.is_deleted = FALSE"
        );
    }

    #[test]
    fn test_count_and_soft_delete() {
        assert_eq!(
            USERS.count().sql(),
            "SELECT COUNT(*) FROM users u WHERE u.is_deleted = FALSE"
        );
        assert_eq!(
            REQUESTS.soft_delete(7).sql(),
            "UPDATE property_requests SET is_deleted = TRUE WHERE id = ? AND is_deleted = FALSE"
        );
    }
}
