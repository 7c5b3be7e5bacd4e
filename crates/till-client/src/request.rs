//! Request payload construction for the payment API.
//!
//! A [`CreatePaymentRequest`] starts from the standard one-stage defaults
//! (redirect confirmation, `capture: true`) and lets the caller overlay
//! arbitrary top-level fields. The overlay is a shallow merge where caller
//! options always win, which is how two-stage flows are requested
//! (`capture: false`) and how defaults like the description or the amount
//! itself can be replaced.

use serde_json::{Map, Value, json};
use url::Url;

use till_types::MonetaryAmount;

/// Confirmation type requested for newly created payments.
pub const REDIRECT_CONFIRMATION: &str = "redirect";

/// Builder for the `POST /payments` body.
#[derive(Debug, Clone)]
pub struct CreatePaymentRequest {
    amount: MonetaryAmount,
    return_url: Url,
    description: Option<String>,
    options: Map<String, Value>,
}

impl CreatePaymentRequest {
    /// Starts a request for the given amount, confirming via redirect to
    /// `return_url`, capturing in one stage.
    pub fn new(amount: MonetaryAmount, return_url: Url) -> Self {
        Self {
            amount,
            return_url,
            description: None,
            options: Map::new(),
        }
    }

    /// Sets the human-readable payment description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overlays a single top-level field onto the request body. Caller
    /// options win over defaults when keys collide, so
    /// `option("capture", json!(false))` turns this into a two-stage payment.
    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Overlays a whole map of top-level fields. Shallow merge, caller wins.
    pub fn options(mut self, options: Map<String, Value>) -> Self {
        self.options.extend(options);
        self
    }

    /// Assembles the request body: defaults first, then the caller overlay.
    pub fn body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("amount".to_owned(), json!(self.amount));
        body.insert(
            "confirmation".to_owned(),
            json!({
                "type": REDIRECT_CONFIRMATION,
                "return_url": self.return_url,
            }),
        );
        if let Some(description) = &self.description {
            body.insert("description".to_owned(), json!(description));
        }
        body.insert("capture".to_owned(), Value::Bool(true));
        for (key, value) in &self.options {
            body.insert(key.clone(), value.clone());
        }
        body
    }
}
