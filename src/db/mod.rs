pub mod agreement_types;
pub mod businesses;
pub mod contacts;
pub mod leads;
pub mod notifications;
pub mod offers;
pub mod permissions;
pub mod projects;
pub mod roles;
pub mod service_agreements;
pub mod settings;
pub mod users;

use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::*;
use uuid::Uuid;

use crate::models::Page;

/// Create a SeaORM database connection pool for `database_url`.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Case-insensitive substring match of `term` against any of `columns`.
/// `%` and `_` in the term match literally.
pub fn search_condition<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.trim().to_lowercase()));
    columns.iter().fold(Condition::any(), |cond, column| {
        cond.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive equality, used by uniqueness checks.
pub fn equals_ignore_case<C: ColumnTrait>(column: C, value: &str) -> Condition {
    Condition::all().add(Expr::expr(Func::lower(Expr::col(column))).eq(value.trim().to_lowercase()))
}

/// Whether another row of `E` already holds `value` in `column` (ignoring case),
/// optionally excluding the row being edited.
pub async fn value_taken<E>(
    db: &DatabaseConnection,
    column: E::Column,
    value: &str,
    id_column: E::Column,
    exclude_id: Option<Uuid>,
) -> Result<bool, DbErr>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    let mut query = E::find().filter(equals_ignore_case(column, value));
    if let Some(id) = exclude_id {
        query = query.filter(id_column.ne(id));
    }

    Ok(query.count(db).await? > 0)
}

/// Run an ordered query one page at a time. `page` is 1-based.
pub async fn fetch_page<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    page: u64,
    page_size: u64,
) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    let paginator = query.paginate(db, page_size);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(Page {
        items,
        page,
        page_size,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"c:\temp"), r"c:\\temp");
        assert_eq!(escape_like("acme"), "acme");
    }
}
