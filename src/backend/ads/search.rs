//! Listing Search
//!
//! Builds the browse/search query from [`SearchParams`]. All provided
//! filters apply conjunctively; the sort key goes through the [`AdSort`]
//! whitelist, so no user input ever reaches the ORDER BY clause directly.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::shared::listings::{Ad, SearchParams};

/// Escape LIKE wildcard characters in user-supplied search text
///
/// `%`, `_`, and the escape character itself must be neutralized so a query
/// of "50%" matches the literal text instead of everything.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build the search query for the given filters
///
/// Filters that are `None` are skipped entirely; with no filters this is a
/// plain browse of every ad in the requested order. Each provided filter
/// appends its own AND clause with bound parameters.
fn build_search_query(params: &SearchParams) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, user_id, category_id, title, description, price, location, created_at \
         FROM ads WHERE 1=1",
    );

    if let Some(query) = params.query.as_deref().filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", escape_like(query));
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some(category) = params.category {
        builder.push(" AND category_id = ");
        builder.push_bind(category);
    }

    if let Some(min_price) = params.min_price {
        builder.push(" AND price >= ");
        builder.push_bind(min_price);
    }

    if let Some(max_price) = params.max_price {
        builder.push(" AND price <= ");
        builder.push_bind(max_price);
    }

    if let Some(location) = params.location.as_deref().filter(|l| !l.is_empty()) {
        let pattern = format!("%{}%", escape_like(location));
        builder.push(" AND location ILIKE ");
        builder.push_bind(pattern);
    }

    // Whitelisted fragment, never raw user input.
    builder.push(" ORDER BY ");
    builder.push(params.sort_order().order_by_sql());

    builder
}

/// Search ads with the given filters
///
/// An empty result set is an empty vec, never an error.
pub async fn search_ads(pool: &PgPool, params: &SearchParams) -> Result<Vec<Ad>, sqlx::Error> {
    build_search_query(params)
        .build_query_as::<Ad>()
        .fetch_all(pool)
        .await
}
