/// Named elements of the plan-selection page, identified by their DOM ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    PlanSelect,
    MaxUsers,
    /// Radio group; see [`PlanForm::checked_value`].
    CardOnFile,
    CardFieldset,
    PlanInfo,
    PlanProjection,
    CardContainer,
    ReceiptEmails,
    TotalCost,
    CostBreakdown,
    CardElement,
    CardErrors,
    StripeToken,
    StripePk,
    StripeForm,
}

impl Element {
    pub fn id(self) -> &'static str {
        match self {
            Element::PlanSelect => "id_plan",
            Element::MaxUsers => "id_max_users",
            Element::CardOnFile => "id_use_card_on_file",
            Element::CardFieldset => "_id-cardFieldset",
            Element::PlanInfo => "_id-planInfo",
            Element::PlanProjection => "_id-planProjection",
            Element::CardContainer => "card-container",
            Element::ReceiptEmails => "_id-receiptEmails",
            Element::TotalCost => "_id-totalCost",
            Element::CostBreakdown => "_id-costBreakdown",
            Element::CardElement => "card-element",
            Element::CardErrors => "card-errors",
            Element::StripeToken => "id_stripe_token",
            Element::StripePk => "id_stripe_pk",
            Element::StripeForm => "stripe-form",
        }
    }

    /// CSS selector used when mounting into the element.
    pub fn selector(self) -> String {
        format!("#{}", self.id())
    }
}

/// The document as seen by the pricing controller.
///
/// Implementations are plain sinks: reads return what the page holds, writes
/// mutate a single attribute or text node. Writes to an element that is not on
/// the page are ignored.
pub trait PlanForm {
    fn exists(&self, element: Element) -> bool;

    /// Current value of an input element.
    fn value(&self, element: Element) -> Option<String>;

    /// Value of the checked option of a radio group, if any is checked.
    fn checked_value(&self, element: Element) -> Option<String>;

    fn text(&self, element: Element) -> Option<String>;

    fn set_value(&mut self, element: Element, value: &str);

    fn set_min(&mut self, element: Element, min: u32);

    fn set_text(&mut self, element: Element, text: &str);

    fn set_visible(&mut self, element: Element, visible: bool);

    fn set_rows(&mut self, element: Element, rows: u32);

    /// Resizes a textarea to the height of its content.
    fn fit_height(&mut self, element: Element);

    /// Submits the form programmatically, bypassing submit listeners.
    fn submit(&mut self, element: Element);
}

/// Optional parts of the page, detected once when the controller starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// Adjustable plan size. Without it the plan size is fixed at one user.
    pub max_users: bool,
    /// Saved card choice.
    pub card_on_file: bool,
    pub card_fieldset: bool,
    pub plan_projection: bool,
    pub card_container: bool,
    pub receipt_emails: bool,
    /// Card entry widget; without it submissions are never intercepted.
    pub card_element: bool,
}

impl Features {
    pub fn detect<F: PlanForm + ?Sized>(form: &F) -> Self {
        Features {
            max_users: form.exists(Element::MaxUsers),
            card_on_file: form.exists(Element::CardOnFile),
            card_fieldset: form.exists(Element::CardFieldset),
            plan_projection: form.exists(Element::PlanProjection),
            card_container: form.exists(Element::CardContainer),
            receipt_emails: form.exists(Element::ReceiptEmails),
            card_element: form.exists(Element::CardElement),
        }
    }
}

/// Input events the page forwards to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    PlanChanged,
    MaxUsersInput,
    CardOnFileInput,
    ReceiptEmailsInput,
}
