//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Search uses `ILIKE` over name, phone number, and email with LIKE
//! metacharacters escaped. Names and emails sort on `lower(..)` and every
//! ordering ends with `id ASC` so pages are stable. Unique indexes on
//! `phone_number` and `lower(email)` back up the service's pre-write
//! duplicate check.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Nullable, Text};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ContactRepository, ContactRepositoryError, DuplicateField};
use crate::domain::{
    Contact, ContactDraft, ContactId, ContactListQuery, ContactSort, DuplicateProbe, SearchTerm,
    SortDirection, SortField,
};

use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Unique index on `contacts.phone_number`.
const PHONE_NUMBER_INDEX: &str = "contacts_phone_number_unique";
/// Unique index on `lower(contacts.email)`.
const EMAIL_INDEX: &str = "contacts_email_unique";

diesel::define_sql_function! {
    #[sql_name = "lower"]
    fn lower_text(value: Text) -> Text;
}

diesel::define_sql_function! {
    #[sql_name = "lower"]
    fn lower_nullable_text(value: Nullable<Text>) -> Nullable<Text>;
}

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    ContactRepositoryError::connection(error.to_string())
}

/// Attribute a unique violation to a column, preferring the constraint name.
fn duplicate_field(info: &dyn diesel::result::DatabaseErrorInformation) -> DuplicateField {
    match info.constraint_name() {
        Some(PHONE_NUMBER_INDEX) => DuplicateField::PhoneNumber,
        Some(EMAIL_INDEX) => DuplicateField::Email,
        _ if info.message().contains("email") => DuplicateField::Email,
        _ => DuplicateField::PhoneNumber,
    }
}

fn map_diesel_error(error: DieselError) -> ContactRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            ContactRepositoryError::duplicate(duplicate_field(&*info))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => ContactRepositoryError::query("database query error"),
        _ => ContactRepositoryError::query("database error"),
    }
}

/// Escape `\`, `%`, and `_` so the term matches literally inside `ILIKE`.
fn like_pattern(term: &SearchTerm) -> String {
    let mut pattern = String::with_capacity(term.as_str().len() + 2);
    pattern.push('%');
    for ch in term.as_str().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn filtered(search: Option<&SearchTerm>) -> contacts::BoxedQuery<'static, Pg> {
    let query = contacts::table.into_boxed();
    match search {
        Some(term) => {
            let pattern = like_pattern(term);
            query.filter(
                contacts::name
                    .ilike(pattern.clone())
                    .or(contacts::phone_number.ilike(pattern.clone()))
                    .or(contacts::email.ilike(pattern)),
            )
        }
        None => query,
    }
}

fn ordered(
    query: contacts::BoxedQuery<'static, Pg>,
    sort: ContactSort,
) -> contacts::BoxedQuery<'static, Pg> {
    use SortDirection::{Ascending, Descending};

    let query = match (sort.field, sort.direction) {
        (SortField::Name, Ascending) => query.order_by(lower_text(contacts::name).asc()),
        (SortField::Name, Descending) => query.order_by(lower_text(contacts::name).desc()),
        (SortField::PhoneNumber, Ascending) => query.order_by(contacts::phone_number.asc()),
        (SortField::PhoneNumber, Descending) => query.order_by(contacts::phone_number.desc()),
        (SortField::Email, Ascending) => {
            query.order_by(lower_nullable_text(contacts::email).asc())
        }
        (SortField::Email, Descending) => {
            query.order_by(lower_nullable_text(contacts::email).desc())
        }
    };
    query.then_order_by(contacts::id.asc())
}

fn to_i64(value: u64, what: &str) -> Result<i64, ContactRepositoryError> {
    i64::try_from(value).map_err(|_| ContactRepositoryError::query(format!("{what} out of range")))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = contacts::table
            .find(id.get())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Contact::from))
    }

    async fn find_duplicates(
        &self,
        probe: &DuplicateProbe,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = contacts::table.into_boxed();
        query = match probe.email.as_deref() {
            Some(email) => query.filter(
                contacts::phone_number
                    .eq(probe.phone_number.as_str())
                    .or(lower_nullable_text(contacts::email).eq(email.to_lowercase())),
            ),
            None => query.filter(contacts::phone_number.eq(probe.phone_number.as_str())),
        };
        if let Some(excluded) = probe.excluding {
            query = query.filter(contacts::id.ne(excluded.get()));
        }

        let rows = query
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn count_matching(&self, query: &ContactListQuery) -> Result<u64, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(query.search.as_ref())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| ContactRepositoryError::query("negative row count"))
    }

    async fn list(&self, query: &ContactListQuery) -> Result<Vec<Contact>, ContactRepositoryError> {
        let offset = to_i64(query.page.offset(), "page offset")?;
        let limit = to_i64(query.page.limit(), "page size")?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = ordered(filtered(query.search.as_ref()), query.sort)
            .select(ContactRow::as_select())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(contacts::table)
            .values(NewContactRow::from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(contacts::table.find(id.get()))
            .set(ContactChangeset::from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Contact::from))
    }

    async fn delete(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::delete(contacts::table.find(id.get()))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Contact::from))
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and query-building coverage that needs no database.
    use super::*;
    use diesel::debug_query;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct ViolatedIndex(&'static str);

    impl DatabaseErrorInformation for ViolatedIndex {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("contacts")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    #[case(PHONE_NUMBER_INDEX, DuplicateField::PhoneNumber)]
    #[case(EMAIL_INDEX, DuplicateField::Email)]
    fn unique_violation_names_the_column(#[case] index: &'static str, #[case] field: DuplicateField) {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ViolatedIndex(index)),
        );
        assert_eq!(map_diesel_error(err), ContactRepositoryError::duplicate(field));
    }

    #[rstest]
    fn unnamed_violation_falls_back_to_the_message() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint on email".to_owned()),
        );
        assert_eq!(
            map_diesel_error(err),
            ContactRepositoryError::duplicate(DuplicateField::Email)
        );
    }

    #[rstest]
    fn name_sort_ignores_case() {
        let query = ordered(filtered(None), ContactSort::default()).select(ContactRow::as_select());
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(
            sql.contains(r#"ORDER BY lower("contacts"."name") ASC, "contacts"."id" ASC"#),
            "unexpected SQL: {sql}"
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(err),
            ContactRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_failures_map_to_query_error() {
        assert!(matches!(
            map_diesel_error(DieselError::NotFound),
            ContactRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_errors_map_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(
            err,
            ContactRepositoryError::connection("failed to get connection from pool: timed out")
        );
    }

    #[rstest]
    #[case("ada", "%ada%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\", "%c:\\\\%")]
    fn like_pattern_escapes_metacharacters(#[case] raw: &str, #[case] expected: &str) {
        let term = SearchTerm::parse(raw).expect("non-blank");
        assert_eq!(like_pattern(&term), expected);
    }

    #[rstest]
    fn listing_orders_by_field_then_id() {
        let sort = ContactSort {
            field: SortField::Email,
            direction: SortDirection::Descending,
        };
        let query = ordered(filtered(None), sort).select(ContactRow::as_select());
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert!(
            sql.contains(r#"ORDER BY lower("contacts"."email") DESC, "contacts"."id" ASC"#),
            "unexpected SQL: {sql}"
        );
    }

    #[rstest]
    fn search_filters_three_columns() {
        let term = SearchTerm::parse("ada").expect("non-blank");
        let query = filtered(Some(&term)).select(ContactRow::as_select());
        let sql = debug_query::<Pg, _>(&query).to_string();
        assert_eq!(sql.matches("ILIKE").count(), 3, "unexpected SQL: {sql}");
    }
}
