//! Order status lifecycle.
//!
//! Four explicit transition operations, each overwriting the status
//! unconditionally: no transition graph is enforced, so `done` back to
//! `pending` succeeds. A transition only fails when the order cannot be found
//! or its required fields no longer validate; in that case the status is left
//! untouched.

use crate::{
    core::order as order_ops,
    entities::{Order, Status, order},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// Sets an order's status to the given target, any-to-any.
///
/// The order's required fields are re-validated first; a record that would no
/// longer pass validation (for example a cleared email) rejects the
/// transition and keeps the current status. The write and the cache-total
/// refresh share one transaction.
pub async fn set_status(
    db: &DatabaseConnection,
    order_id: i64,
    status: Status,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let current = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    order_ops::validate_contact_fields(&current.customer_name, &current.phone, &current.email)?;

    let previous = current.status;
    let mut order: order::ActiveModel = current.into();
    order.status = Set(status);
    order.updated_at = Set(chrono::Utc::now());
    let updated = order.update(&txn).await?;

    order_ops::refresh_cache_total(&txn, order_id).await?;
    txn.commit().await?;

    info!(order_id, ?previous, current = ?status, "order status changed");
    Ok(updated)
}

/// Marks the order as awaiting confirmation.
pub async fn set_status_pending(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    set_status(db, order_id, Status::Pending).await
}

/// Marks the order as confirmed.
pub async fn set_status_confirmed(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    set_status(db, order_id, Status::Confirmed).await
}

/// Marks the order as fulfilled.
pub async fn set_status_done(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    set_status(db, order_id, Status::Done).await
}

/// Marks the order as canceled.
pub async fn set_status_canceled(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    set_status(db, order_id, Status::Canceled).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{clear_order_email, setup_with_order};

    #[tokio::test]
    async fn test_transitions_flip_predicates() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        assert_eq!(order.status, Status::New);

        let order = set_status_pending(&db, order.id).await?;
        assert!(order.is_pending());
        assert!(!order.is_done());

        let order = set_status_confirmed(&db, order.id).await?;
        assert!(order.is_confirmed());

        let order = set_status_done(&db, order.id).await?;
        assert!(order.is_done());

        let order = set_status_canceled(&db, order.id).await?;
        assert!(order.is_canceled());

        Ok(())
    }

    #[tokio::test]
    async fn test_any_to_any_transition_is_allowed() -> Result<()> {
        let (db, order) = setup_with_order().await?;

        // done -> pending succeeds: no transition graph is enforced.
        set_status_done(&db, order.id).await?;
        let order = set_status_pending(&db, order.id).await?;
        assert!(order.is_pending());

        // canceled -> done succeeds too.
        set_status_canceled(&db, order.id).await?;
        let order = set_status_done(&db, order.id).await?;
        assert!(order.is_done());

        Ok(())
    }

    #[tokio::test]
    async fn test_transition_on_invalid_order_fails_and_keeps_status() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        set_status_pending(&db, order.id).await?;

        // Clear the email behind the aggregate's back; the next transition
        // must fail validation and leave the status alone.
        clear_order_email(&db, order.id).await?;

        let result = set_status_done(&db, order.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { field: "email", .. }
        ));

        let current = crate::core::order::get_order_by_id(&db, order.id)
            .await?
            .unwrap();
        assert!(current.is_pending());

        Ok(())
    }

    #[tokio::test]
    async fn test_transition_on_missing_order() -> Result<()> {
        let (db, _order) = setup_with_order().await?;
        let result = set_status_done(&db, 9999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::OrderNotFound { id: 9999 }
        ));
        Ok(())
    }
}
