use std::fmt;

use async_trait::async_trait;
use common::error::{AppError, Res};
use serde::Serialize;
use serde_json::json;
use stripe::TokenId;

use crate::{
    controller::PlanPricingController,
    ui::{Element, PlanForm},
};

/// Style of the card entry widget.
pub fn card_style() -> serde_json::Value {
    json!({
        "base": {
            "color": "#3F3F3F",
            "fontSize": "18px",
            "fontFamily": "system-ui, sans-serif",
            "fontSmoothing": "antialiased",
            "::placeholder": {
                "color": "#899194",
            },
        },
        "invalid": {
            "color": "#e5424d",
            ":focus": {
                "color": "#303238",
            },
        },
    })
}

/// Card details as entered in the widget.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub cvc: String,
}

impl CardDetails {
    pub fn last4(&self) -> &str {
        let start = self.number.len().saturating_sub(4);
        self.number.get(start..).unwrap_or_default()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("last4", &self.last4())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .finish_non_exhaustive()
    }
}

/// Card entry widget hosted by the page.
pub trait CardWidget {
    fn mount(&mut self, selector: &str, style: &serde_json::Value);

    fn card_details(&self) -> CardDetails;
}

/// Issues single-use tokens for card details.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Returns the token id, or `AppError::Payment` with a message fit for the user.
    async fn create_token(&self, card: &CardDetails) -> Res<TokenId>;
}

/// What happened to a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No token needed; the browser submits the form as usual.
    Native,
    /// Token written to the hidden field and the form submitted programmatically.
    Tokenized(TokenId),
    /// Tokenization failed; the message is shown and the form stays unsubmitted.
    Rejected(String),
}

/// Payment side of the plan form: the card widget and token creation on submit.
pub struct Checkout<P, W> {
    provider: P,
    widget: W,
}

impl<P: PaymentProvider, W: CardWidget> Checkout<P, W> {
    /// Mounts the card widget and prepares the hidden token field.
    ///
    /// Returns `None` when the page has no card element; submissions then always
    /// go through unmodified. `connect` builds the provider from the publishable
    /// key found in the page.
    pub fn mount<F: PlanForm>(
        controller: &mut PlanPricingController<F>,
        mut widget: W,
        connect: impl FnOnce(&str) -> P,
    ) -> Option<Self> {
        if !controller.features().card_element {
            return None;
        }
        let form = controller.form_mut();
        let publishable_key = form.value(Element::StripePk).unwrap_or_default();
        if publishable_key.is_empty() {
            log::warn!("No publishable key on the page; card tokenization will fail");
        }

        widget.mount(&Element::CardElement.selector(), &card_style());
        // Browsers may restore a stale token into the hidden field.
        form.set_value(Element::StripeToken, "");

        Some(Checkout {
            provider: connect(&publishable_key),
            widget,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Shows the widget's validation message, or clears it when the input became valid.
    pub fn on_card_change<F: PlanForm>(
        &self,
        controller: &mut PlanPricingController<F>,
        error: Option<&str>,
    ) {
        controller
            .form_mut()
            .set_text(Element::CardErrors, error.unwrap_or_default());
    }

    /// Handles a submit of the plan form.
    ///
    /// Paid plans without a saved card are held back until exactly one token
    /// request completes. There is no retry; the user resubmits after an error.
    pub async fn submit<F: PlanForm>(
        &self,
        controller: &mut PlanPricingController<F>,
    ) -> Res<SubmitOutcome> {
        if !controller.needs_token()? {
            return Ok(SubmitOutcome::Native);
        }

        let card = self.widget.card_details();
        log::debug!("Requesting card token for {:?}", card);

        match self.provider.create_token(&card).await {
            Ok(token) => {
                let form = controller.form_mut();
                form.set_value(Element::StripeToken, token.as_str());
                form.submit(Element::StripeForm);
                log::info!("Card tokenized, submitting plan form");
                Ok(SubmitOutcome::Tokenized(token))
            }
            Err(error) => {
                let message = match error {
                    AppError::Payment(message) => message,
                    other => other.to_string(),
                };
                log::warn!("Card tokenization failed: {}", message);
                controller.form_mut().set_text(Element::CardErrors, &message);
                Ok(SubmitOutcome::Rejected(message))
            }
        }
    }
}
