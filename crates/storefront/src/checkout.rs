//! Order submission.
//!
//! `Checkout` runs the place-order flow: validate, submit once, then either
//! clear the cart and move to the bill page or report a failure and leave the
//! cart alone.
//!
//! Only one submission can be in flight. The `submitting` flag is claimed
//! before the request is built and released on every exit path, so a second
//! click while the first request is pending never sends a duplicate order.

use std::sync::atomic::{AtomicBool, Ordering};

use canteen_core::{OrderId, SubmissionState};
use tracing::{error, info, instrument, warn};

use crate::error::add_breadcrumb;
use crate::page::CartPage;
use crate::services::orders::{OrderError, OrderGateway, OrderPayload, bill_path};
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Why a submission was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyCart,
    /// The page has a name field and it is blank.
    MissingCustomerName,
}

impl Rejection {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyCart => "Your cart is empty!",
            Self::MissingCustomerName => "Please enter your name!",
        }
    }
}

/// Result of one place-order attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Order accepted; the cart was cleared.
    Placed(OrderId),
    /// Preconditions failed; nothing was sent.
    Rejected(Rejection),
    /// The request failed or was declined; the cart is unchanged.
    Failed,
    /// Another submission is still in flight; nothing was sent.
    AlreadySubmitting,
}

/// Place-order state machine.
#[derive(Debug)]
pub struct Checkout<G> {
    gateway: G,
    submitting: AtomicBool,
}

impl<G: OrderGateway> Checkout<G> {
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            submitting: AtomicBool::new(false),
        }
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> SubmissionState {
        if self.submitting.load(Ordering::Acquire) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// Run the place-order flow against `store`.
    #[instrument(skip_all)]
    pub async fn place_order<S, P>(&self, store: &CartStore<S, P>) -> OrderOutcome
    where
        S: CartStorage,
        P: CartPage,
    {
        let page = store.page();

        let Some(_guard) = SubmitGuard::acquire(&self.submitting, page) else {
            warn!("Ignoring place-order while a submission is in flight");
            return OrderOutcome::AlreadySubmitting;
        };

        let cart = store.load();
        if cart.is_empty() {
            return reject(page, Rejection::EmptyCart);
        }

        let customer_name = match page.customer_name() {
            Some(raw) => {
                let name = raw.trim();
                if name.is_empty() {
                    page.focus_customer_name();
                    return reject(page, Rejection::MissingCustomerName);
                }
                Some(name.to_owned())
            }
            None => None,
        };

        add_breadcrumb("checkout", "Placing order", None);
        let payload = OrderPayload::from_cart(&cart, customer_name);

        match self.gateway.place_order(&payload).await {
            Ok(order_id) => {
                info!(%order_id, items = payload.items.len(), "Order placed");
                if let Err(e) = store.clear() {
                    error!(error = %e, %order_id, "Failed to clear cart after order");
                }
                page.navigate(&bill_path(&order_id));
                OrderOutcome::Placed(order_id)
            }
            Err(e) => {
                report_failure(&e);
                page.alert(e.user_message());
                OrderOutcome::Failed
            }
        }
    }
}

fn reject<P: CartPage>(page: &P, rejection: Rejection) -> OrderOutcome {
    page.alert(rejection.message());
    OrderOutcome::Rejected(rejection)
}

fn report_failure(err: &OrderError) {
    if matches!(err, OrderError::Declined) {
        warn!(error = %err, "Order declined");
    } else {
        let event_id = sentry::capture_error(err);
        error!(error = %err, sentry_event_id = %event_id, "Order submission failed");
    }
}

/// Holds the `submitting` flag and keeps the place-order button disabled.
struct SubmitGuard<'a, P: CartPage> {
    flag: &'a AtomicBool,
    page: &'a P,
}

impl<'a, P: CartPage> SubmitGuard<'a, P> {
    fn acquire(flag: &'a AtomicBool, page: &'a P) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        page.set_place_order_enabled(false);
        Some(Self { flag, page })
    }
}

impl<P: CartPage> Drop for SubmitGuard<'_, P> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.page.set_place_order_enabled(true);
    }
}
