//! Dynamic search over the order collection.
//!
//! Turns a loosely-typed request payload of filter groups and keyword groups
//! into a parameterized `SeaORM` predicate. Conditions inside one group
//! combine with OR, groups combine with AND, and keyword matching is a
//! case-insensitive trimmed substring search. Column names coming from the
//! request never reach the SQL text: they map through a fixed allow-list of
//! searchable columns, and values travel as bind parameters only.

use crate::{
    entities::{Order, order},
    errors::Result,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
    sea_query::{Expr, Func},
};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// One named condition inside a filter or keyword group.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCondition {
    /// Searchable column name, checked against the allow-list
    pub name: String,
    /// Literal to compare against (equality for filters, substring for keywords)
    pub value: String,
}

/// The untyped nested search payload of a list request.
///
/// Both mappings are group-name -> condition-name -> condition. Absent or
/// empty mappings contribute no constraint, so a default payload lists
/// everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Exact-equality filter groups
    #[serde(default)]
    pub filters: HashMap<String, HashMap<String, SearchCondition>>,
    /// Case-insensitive substring keyword groups
    #[serde(default)]
    pub keywords: HashMap<String, HashMap<String, SearchCondition>>,
}

/// One page of search results.
#[derive(Debug, Clone)]
pub struct OrderPage {
    /// The orders on this page, newest first
    pub orders: Vec<order::Model>,
    /// 1-based page number
    pub page: u64,
    /// Requested page size
    pub page_size: u64,
    /// Total matching orders across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u64,
}

/// Maps a request-supplied column name onto a searchable order column.
///
/// This allow-list is the injection boundary: anything not listed here is
/// dropped before query assembly.
fn searchable_column(name: &str) -> Option<order::Column> {
    match name {
        "code" => Some(order::Column::Code),
        "status" => Some(order::Column::Status),
        "customer_name" => Some(order::Column::CustomerName),
        "phone" => Some(order::Column::Phone),
        "email" => Some(order::Column::Email),
        _ => None,
    }
}

/// Builds the composed predicate for a search payload: AND across groups, OR
/// within a group. Unknown column names are skipped with a warning; a group
/// whose conditions were all skipped contributes nothing.
pub fn build_condition(params: &SearchParams) -> Condition {
    let mut combined = Condition::all();

    for (group_name, group) in &params.filters {
        let mut group_cond = Condition::any();
        let mut populated = false;

        for cond in group.values() {
            let Some(column) = searchable_column(&cond.name) else {
                warn!(group = %group_name, column = %cond.name, "ignoring unknown filter column");
                continue;
            };
            group_cond = group_cond.add(column.eq(cond.value.as_str()));
            populated = true;
        }

        if populated {
            combined = combined.add(group_cond);
        }
    }

    for (group_name, group) in &params.keywords {
        let mut group_cond = Condition::any();
        let mut populated = false;

        for cond in group.values() {
            let Some(column) = searchable_column(&cond.name) else {
                warn!(group = %group_name, column = %cond.name, "ignoring unknown keyword column");
                continue;
            };
            let needle = cond.value.trim().to_lowercase();
            let pattern = format!("%{needle}%");
            group_cond = group_cond.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern));
            populated = true;
        }

        if populated {
            combined = combined.add(group_cond);
        }
    }

    combined
}

/// Runs a search over the order collection.
///
/// The base query is ordered by creation time descending (most recent first);
/// the composed predicate narrows it, and results are paged. `page` is
/// 1-based the way list requests send it.
pub async fn search(
    db: &DatabaseConnection,
    params: &SearchParams,
    page: u64,
    page_size: u64,
) -> Result<OrderPage> {
    let page_size = page_size.max(1);
    let paginator = Order::find()
        .filter(build_condition(params))
        .order_by_desc(order::Column::CreatedAt)
        .paginate(db, page_size);

    let totals = paginator.num_items_and_pages().await?;
    let orders = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(OrderPage {
        orders,
        page: page.max(1),
        page_size,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}
