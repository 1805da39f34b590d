//! Order business logic - CRUD, nested line-item edits, and cache-total
//! maintenance.
//!
//! Every mutation path runs inside a single database transaction and finishes
//! by rewriting `cache_total` from the current line items, so the denormalized
//! total can never be observed out of sync with the details. The cache write
//! is a column-only update; it does not re-run validation or touch any other
//! column.

use crate::{
    core::{code, search},
    entities::{Order, OrderDetail, Product, Status, order, order_detail},
    errors::{Error, Result},
};
use sea_orm::{QuerySelect, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::debug;

/// Fields required to create an order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    /// Customer's full name
    pub customer_name: String,
    /// Customer's phone number
    pub phone: String,
    /// Customer's email address
    pub email: String,
}

/// One nested line-item edit inside an [`OrderUpdate`].
///
/// A populated `id` targets an existing line (update, or removal when
/// `destroy` is set). Without an `id` the edit creates a new line; a blank
/// product reference on a new line is ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemEdit {
    /// Existing line-item id, None for a new line
    pub id: Option<i64>,
    /// Product reference for a new line
    pub product_id: Option<i64>,
    /// Unit price for the line
    pub price: f64,
    /// Number of units
    pub quantity: i32,
    /// Optional free-text tag
    pub description: Option<String>,
    /// When true, remove the line identified by `id`
    #[serde(default)]
    pub destroy: bool,
}

/// Header-field changes plus nested line-item edits for an existing order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    /// New customer name, None keeps the current value
    pub customer_name: Option<String>,
    /// New phone number, None keeps the current value
    pub phone: Option<String>,
    /// New email address, None keeps the current value
    pub email: Option<String>,
    /// Nested line-item edits, applied in order
    #[serde(default)]
    pub order_details: Vec<LineItemEdit>,
}

/// Validates the always-required contact fields of an order.
///
/// `customer_name`, `phone`, and `email` must all be present; a non-blank
/// email must additionally look like `user@domain.tld`.
pub(crate) fn validate_contact_fields(customer_name: &str, phone: &str, email: &str) -> Result<()> {
    if customer_name.trim().is_empty() {
        return Err(Error::Validation {
            field: "customer_name",
            message: "cannot be blank".to_string(),
        });
    }
    if phone.trim().is_empty() {
        return Err(Error::Validation {
            field: "phone",
            message: "cannot be blank".to_string(),
        });
    }
    if email.trim().is_empty() {
        return Err(Error::Validation {
            field: "email",
            message: "cannot be blank".to_string(),
        });
    }
    if !is_valid_email(email) {
        return Err(Error::Validation {
            field: "email",
            message: "is invalid (e.g. 'user@domain.com')".to_string(),
        });
    }
    Ok(())
}

/// Checks an email address against the same loose shape the original module
/// enforced: a local part without whitespace or a second `@`, then a dotted
/// domain of alphanumeric/hyphen labels ending in an alphabetic TLD of at
/// least two characters.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let valid_labels = labels
        .iter()
        .all(|label| !label.is_empty() && label.chars().all(|c| c == '-' || c.is_ascii_alphanumeric()));
    if !valid_labels {
        return false;
    }

    // The final label is the TLD: alphabetic, two characters minimum.
    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Creates a new order with status [`Status::New`] and an empty line-item set.
///
/// The order code is generated here, exactly once; nothing regenerates it
/// later. `cache_total` starts at zero since there are no line items yet.
pub async fn create_order(db: &DatabaseConnection, new_order: NewOrder) -> Result<order::Model> {
    validate_contact_fields(&new_order.customer_name, &new_order.phone, &new_order.email)?;

    let now = chrono::Utc::now();
    let order = order::ActiveModel {
        code: Set(code::generate_order_code()),
        customer_name: Set(new_order.customer_name.trim().to_string()),
        phone: Set(new_order.phone.trim().to_string()),
        email: Set(new_order.email.trim().to_string()),
        status: Set(Status::New),
        cache_total: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = order.insert(db).await?;
    debug!(order_id = created.id, code = %created.code, "created order");
    Ok(created)
}

/// Retrieves an order by its unique ID.
pub async fn get_order_by_id(db: &DatabaseConnection, order_id: i64) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Retrieves an order together with all of its line items.
///
/// This is the `order_details` endpoint contract; a missing order is an
/// error here, not a `None`.
pub async fn get_order_with_details(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<(order::Model, Vec<order_detail::Model>)> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let details = OrderDetail::find()
        .filter(order_detail::Column::OrderId.eq(order_id))
        .all(db)
        .await?;

    Ok((order, details))
}

/// Updates an order's header fields and applies nested line-item edits.
///
/// Runs in one transaction: header validation, line edits, the header write,
/// and the cache-total recompute either all land or none do. Line edits with
/// `destroy` remove the referenced line; edits with an `id` update price,
/// quantity, and description; edits without an `id` create a new line unless
/// the product reference is blank, in which case they are skipped.
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i64,
    update: OrderUpdate,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let current = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let customer_name = update.customer_name.unwrap_or_else(|| current.customer_name.clone());
    let phone = update.phone.unwrap_or_else(|| current.phone.clone());
    let email = update.email.unwrap_or_else(|| current.email.clone());
    validate_contact_fields(&customer_name, &phone, &email)?;

    for edit in update.order_details {
        apply_line_item_edit(&txn, order_id, edit).await?;
    }

    let mut order: order::ActiveModel = current.into();
    order.customer_name = Set(customer_name.trim().to_string());
    order.phone = Set(phone.trim().to_string());
    order.email = Set(email.trim().to_string());
    order.updated_at = Set(chrono::Utc::now());
    order.update(&txn).await?;

    refresh_cache_total(&txn, order_id).await?;
    txn.commit().await?;

    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })
}

/// Applies a single nested line-item edit within an open transaction.
async fn apply_line_item_edit<C>(txn: &C, order_id: i64, edit: LineItemEdit) -> Result<()>
where
    C: ConnectionTrait,
{
    if edit.destroy {
        if let Some(detail_id) = edit.id {
            OrderDetail::delete_many()
                .filter(order_detail::Column::Id.eq(detail_id))
                .filter(order_detail::Column::OrderId.eq(order_id))
                .exec(txn)
                .await?;
        }
        return Ok(());
    }

    if let Some(detail_id) = edit.id {
        let Some(existing) = OrderDetail::find_by_id(detail_id).one(txn).await? else {
            debug!(detail_id, "skipping edit for unknown line item");
            return Ok(());
        };
        if existing.order_id != order_id {
            debug!(detail_id, "skipping edit for line item of another order");
            return Ok(());
        }
        if edit.quantity < 1 {
            return Err(Error::InvalidQuantity {
                quantity: edit.quantity,
            });
        }

        let mut detail: order_detail::ActiveModel = existing.into();
        detail.price = Set(edit.price);
        detail.quantity = Set(edit.quantity);
        detail.description = Set(edit.description);
        detail.update(txn).await?;
        return Ok(());
    }

    // New line: a blank product reference is ignored, not rejected.
    let Some(product_id) = edit.product_id.filter(|id| *id > 0) else {
        debug!("ignoring new line item without a product reference");
        return Ok(());
    };
    if edit.quantity < 1 {
        return Err(Error::InvalidQuantity {
            quantity: edit.quantity,
        });
    }

    let product = Product::find_by_id(product_id)
        .one(txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    order_detail::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(product_id),
        product_name: Set(product.name),
        price: Set(edit.price),
        quantity: Set(edit.quantity),
        description: Set(edit.description),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(())
}

/// Live total of an order: `sum(price * quantity)` over its current line
/// items.
pub async fn order_total<C>(conn: &C, order_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    let details = OrderDetail::find()
        .filter(order_detail::Column::OrderId.eq(order_id))
        .all(conn)
        .await?;

    Ok(details
        .iter()
        .map(|d| d.price * f64::from(d.quantity))
        .sum())
}

/// Recomputes `cache_total` from the current line items and writes it with a
/// column-only update.
///
/// Intended to run inside the same transaction as the save that changed the
/// line items, keeping the cache invariant atomic with the save itself.
/// Returns the freshly computed total.
pub async fn refresh_cache_total<C>(conn: &C, order_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let total = order_total(conn, order_id).await?;

    Order::update_many()
        .col_expr(order::Column::CacheTotal, Expr::value(total))
        .filter(order::Column::Id.eq(order_id))
        .exec(conn)
        .await?;

    Ok(total)
}

/// Sums `cache_total` across the orders matching the given search parameters.
///
/// The reporting aggregate: pass default parameters to sum over every order.
pub async fn cache_total_sum(
    db: &DatabaseConnection,
    params: &search::SearchParams,
) -> Result<f64> {
    let total: Option<Option<f64>> = Order::find()
        .filter(search::build_condition(params))
        .select_only()
        .column_as(order::Column::CacheTotal.sum(), "total")
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(0.0))
}

/// Deletes an order and all of its line items in one transaction.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    OrderDetail::delete_many()
        .filter(order_detail::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    order.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Deletes a batch of orders and their line items; returns how many orders
/// were removed.
pub async fn delete_orders(db: &DatabaseConnection, order_ids: &[i64]) -> Result<u64> {
    if order_ids.is_empty() {
        return Ok(0);
    }

    let txn = db.begin().await?;

    OrderDetail::delete_many()
        .filter(order_detail::Column::OrderId.is_in(order_ids.iter().copied()))
        .exec(&txn)
        .await?;
    let deleted = Order::delete_many()
        .filter(order::Column::Id.is_in(order_ids.iter().copied()))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(deleted.rows_affected)
}
