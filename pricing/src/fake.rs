//! In-memory page and payment doubles shared by the unit tests.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use common::error::{AppError, Res};
use stripe::TokenId;

use crate::{
    catalog::{Dollars, PlanCatalog, PlanId, PlanTerms},
    checkout::{CardDetails, CardWidget, PaymentProvider},
    ui::{Element, PlanForm},
};

/// Free (1), flat professional (2) and per-seat organization (3) plans.
pub fn catalog() -> PlanCatalog {
    [(1, 0, 0, 1), (2, 40, 0, 1), (3, 100, 10, 5)]
        .into_iter()
        .map(|(id, base_price, price_per_user, minimum_users)| PlanTerms {
            id: PlanId(id),
            slug: None,
            base_price: Dollars(base_price),
            price_per_user: Dollars(price_per_user),
            minimum_users,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct FakeElement {
    pub value: String,
    pub checked: Option<String>,
    pub text: String,
    pub text_writes: usize,
    pub min: Option<u32>,
    pub visible: Option<bool>,
    pub rows: Option<u32>,
    pub fits: usize,
}

#[derive(Debug, Default)]
pub struct FakeForm {
    elements: HashMap<Element, FakeElement>,
    pub submissions: usize,
}

impl FakeForm {
    /// Page with every element present.
    pub fn full(plan: &str, max_users: &str) -> Self {
        let mut form = FakeForm::default();
        for element in [
            Element::PlanSelect,
            Element::MaxUsers,
            Element::CardOnFile,
            Element::CardFieldset,
            Element::PlanInfo,
            Element::PlanProjection,
            Element::CardContainer,
            Element::ReceiptEmails,
            Element::TotalCost,
            Element::CostBreakdown,
            Element::CardElement,
            Element::CardErrors,
            Element::StripeToken,
            Element::StripePk,
            Element::StripeForm,
        ] {
            form.elements.insert(element, FakeElement::default());
        }
        form.set_value(Element::PlanSelect, plan);
        form.set_value(Element::MaxUsers, max_users);
        form.set_value(Element::StripePk, "pk_test_123");
        form
    }

    pub fn remove(&mut self, element: Element) {
        self.elements.remove(&element);
    }

    pub fn check(&mut self, element: Element, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.checked = Some(value.to_string());
        }
    }

    fn get(&self, element: Element) -> &FakeElement {
        self.elements
            .get(&element)
            .unwrap_or_else(|| panic!("{} is not on the page", element.id()))
    }

    pub fn value_of(&self, element: Element) -> &str {
        &self.get(element).value
    }

    pub fn text_of(&self, element: Element) -> &str {
        &self.get(element).text
    }

    pub fn text_writes(&self, element: Element) -> usize {
        self.get(element).text_writes
    }

    pub fn min_of(&self, element: Element) -> Option<u32> {
        self.get(element).min
    }

    pub fn visible_of(&self, element: Element) -> Option<bool> {
        self.get(element).visible
    }

    pub fn rows_of(&self, element: Element) -> Option<u32> {
        self.get(element).rows
    }

    pub fn fits_of(&self, element: Element) -> usize {
        self.get(element).fits
    }
}

impl PlanForm for FakeForm {
    fn exists(&self, element: Element) -> bool {
        self.elements.contains_key(&element)
    }

    fn value(&self, element: Element) -> Option<String> {
        self.elements.get(&element).map(|el| el.value.clone())
    }

    fn checked_value(&self, element: Element) -> Option<String> {
        self.elements.get(&element).and_then(|el| el.checked.clone())
    }

    fn text(&self, element: Element) -> Option<String> {
        self.elements.get(&element).map(|el| el.text.clone())
    }

    fn set_value(&mut self, element: Element, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.value = value.to_string();
        }
    }

    fn set_min(&mut self, element: Element, min: u32) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.min = Some(min);
        }
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.text = text.to_string();
            el.text_writes += 1;
        }
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.visible = Some(visible);
        }
    }

    fn set_rows(&mut self, element: Element, rows: u32) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.rows = Some(rows);
        }
    }

    fn fit_height(&mut self, element: Element) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.fits += 1;
        }
    }

    fn submit(&mut self, element: Element) {
        if self.exists(element) {
            self.submissions += 1;
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeWidget {
    pub mounted: Option<(String, serde_json::Value)>,
}

impl CardWidget for FakeWidget {
    fn mount(&mut self, selector: &str, style: &serde_json::Value) {
        self.mounted = Some((selector.to_string(), style.clone()));
    }

    fn card_details(&self) -> CardDetails {
        CardDetails {
            number: "4242424242424242".to_string(),
            exp_month: 12,
            exp_year: 2030,
            cvc: "123".to_string(),
        }
    }
}

/// Provider answering every request with the same token or decline message.
#[derive(Debug)]
pub struct FakeProvider {
    pub publishable_key: String,
    pub response: Result<String, String>,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn issuing(publishable_key: &str, token: &str) -> Self {
        FakeProvider {
            publishable_key: publishable_key.to_string(),
            response: Ok(token.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn declining(publishable_key: &str, message: &str) -> Self {
        FakeProvider {
            publishable_key: publishable_key.to_string(),
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentProvider for FakeProvider {
    async fn create_token(&self, _card: &CardDetails) -> Res<TokenId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(token) => common::stripe::parse_token_id(token),
            Err(message) => Err(AppError::Payment(message.clone())),
        }
    }
}
