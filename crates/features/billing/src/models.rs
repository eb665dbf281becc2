use ihub_derive::api_model;

/// The Stripe customer bound to the caller's principal.
#[api_model]
pub struct BillingCustomer {
    /// Stripe customer ID
    pub id: String,
    /// Principal the customer is bound to
    pub email: String,
}

/// A hosted checkout session ready to redirect the caller to.
#[api_model]
pub struct Checkout {
    /// Stripe session ID
    pub id: String,
    /// Hosted checkout URL
    pub url: Option<String>,
}
