use std::sync::Arc;

use common::error::{AppError, Res};

use crate::{
    catalog::{PlanCatalog, PlanId, PlanTerms},
    pricing::{Cost, compute_cost, is_free_plan},
    state::{PricingState, clamp_max_users, parse_card_on_file, parse_max_users},
    ui::{Element, Features, FormEvent, PlanForm},
};

const RECEIPT_EMAIL_ROWS: u32 = 2;

/// Keeps the price breakdown and field visibility of the plan form in sync with
/// the selected plan, the plan size and the saved-card choice.
pub struct PlanPricingController<F: PlanForm> {
    form: F,
    catalog: Arc<PlanCatalog>,
    features: Features,
    state: PricingState,
}

impl<F: PlanForm> PlanPricingController<F> {
    /// Reads the initial selection from `form` and renders it once.
    pub fn new(form: F, catalog: Arc<PlanCatalog>) -> Res<Self> {
        let features = Features::detect(&form);
        let plan_id = read_plan_id(&form)?;
        let max_users = if features.max_users {
            form.value(Element::MaxUsers)
                .and_then(|raw| parse_max_users(&raw))
                .map_or(0, |value| u32::try_from(value).unwrap_or(0))
        } else {
            1
        };

        log::debug!("Starting plan form with features {:?}", features);

        let mut controller = PlanPricingController {
            form,
            catalog,
            features,
            state: PricingState {
                plan_id,
                max_users,
                use_card_on_file: None,
            },
        };
        controller.setup_receipt_emails();
        controller.reconcile()?;
        Ok(controller)
    }

    /// Starts the controller on a page that embeds its plan catalog as JSON
    /// in the plan info element. A missing or malformed catalog is an error.
    pub fn from_page(form: F) -> Res<Self> {
        let text = form.text(Element::PlanInfo).ok_or_else(|| {
            AppError::Internal("Plan info is missing from the page".to_string())
        })?;
        let catalog = PlanCatalog::from_json(&text)?;
        Self::new(form, Arc::new(catalog))
    }

    pub fn state(&self) -> &PricingState {
        &self.state
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Terms of the plan currently in state.
    pub fn plan(&self) -> Res<&PlanTerms> {
        self.catalog.require(self.state.plan_id)
    }

    pub fn cost(&self) -> Res<Cost> {
        Ok(compute_cost(self.state.max_users, self.plan()?))
    }

    /// Dispatches a page event to its handler.
    pub fn handle(&mut self, event: FormEvent) -> Res<()> {
        match event {
            FormEvent::PlanChanged => self.on_plan_changed(),
            FormEvent::MaxUsersInput => self.on_max_users_changed(),
            FormEvent::CardOnFileInput => self.on_card_on_file_changed(),
            FormEvent::ReceiptEmailsInput => {
                self.on_receipt_emails_input();
                Ok(())
            }
        }
    }

    pub fn on_plan_changed(&mut self) -> Res<()> {
        self.reconcile()
    }

    pub fn on_max_users_changed(&mut self) -> Res<()> {
        self.reconcile()
    }

    pub fn on_card_on_file_changed(&mut self) -> Res<()> {
        self.reconcile()
    }

    pub fn on_receipt_emails_input(&mut self) {
        if self.features.receipt_emails {
            self.form.fit_height(Element::ReceiptEmails);
        }
    }

    /// Brings every derived field up to date: first the field phase (plan size,
    /// saved card), then the plan phase (cost, payment sections). Each phase
    /// runs exactly once.
    pub fn reconcile(&mut self) -> Res<()> {
        let catalog = Arc::clone(&self.catalog);
        let plan = catalog.require(read_plan_id(&self.form)?)?;
        self.state.plan_id = plan.id;

        self.sync_fields(plan);
        self.render_plan(plan);
        Ok(())
    }

    /// Field phase: clamps the plan size and shows the card section unless a
    /// saved card covers the payment.
    fn sync_fields(&mut self, plan: &PlanTerms) {
        self.sync_max_users(plan);
        self.sync_card_container(plan);
    }

    fn sync_max_users(&mut self, plan: &PlanTerms) {
        if !self.features.max_users {
            return;
        }
        let raw = self
            .form
            .value(Element::MaxUsers)
            .and_then(|value| parse_max_users(&value));
        let max_users = clamp_max_users(raw, plan);

        self.form.set_min(Element::MaxUsers, plan.minimum_users);
        if raw != Some(i64::from(max_users)) {
            self.form
                .set_value(Element::MaxUsers, &max_users.to_string());
        }
        self.state.max_users = max_users;
    }

    fn sync_card_container(&mut self, plan: &PlanTerms) {
        let show_card = if self.features.card_on_file {
            let use_card_on_file = self.checked_card_on_file();
            self.state.use_card_on_file = Some(use_card_on_file);
            !use_card_on_file
        } else {
            !is_free_plan(plan)
        };

        if self.features.card_container {
            self.form.set_visible(Element::CardContainer, show_card);
        }
    }

    /// Plan phase: cost text plus the payment fieldset and projection, hidden for free plans.
    fn render_plan(&mut self, plan: &PlanTerms) {
        let cost = compute_cost(self.state.max_users, plan);
        self.form.set_text(Element::TotalCost, &cost.total.to_string());
        self.form.set_text(Element::CostBreakdown, &cost.breakdown);

        let paid = !is_free_plan(plan);
        if self.features.card_fieldset {
            self.form.set_visible(Element::CardFieldset, paid);
        }
        if self.features.plan_projection {
            self.form.set_visible(Element::PlanProjection, paid);
        }
    }

    fn setup_receipt_emails(&mut self) {
        if !self.features.receipt_emails {
            return;
        }
        self.form.set_rows(Element::ReceiptEmails, RECEIPT_EMAIL_ROWS);
        self.form.fit_height(Element::ReceiptEmails);
    }

    fn checked_card_on_file(&self) -> bool {
        self.features.card_on_file
            && self
                .form
                .checked_value(Element::CardOnFile)
                .is_some_and(|value| parse_card_on_file(&value))
    }

    /// Whether submitting now has to tokenize the entered card first:
    /// the selected plan costs money and no saved card was chosen.
    pub fn needs_token(&self) -> Res<bool> {
        let plan = self.catalog.require(read_plan_id(&self.form)?)?;
        Ok(!self.checked_card_on_file() && !is_free_plan(plan))
    }
}

fn read_plan_id<F: PlanForm + ?Sized>(form: &F) -> Res<PlanId> {
    form.value(Element::PlanSelect)
        .ok_or_else(|| AppError::Internal("Plan select is missing from the page".to_string()))?
        .parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeForm, catalog};

    fn controller(form: FakeForm) -> PlanPricingController<FakeForm> {
        PlanPricingController::new(form, Arc::new(catalog())).unwrap()
    }

    #[test]
    fn reads_catalog_embedded_in_page() {
        let mut form = FakeForm::full("7", "2");
        form.set_text(
            Element::PlanInfo,
            r#"{"7": {"base_price": 10, "price_per_user": 2, "minimum_users": 3}}"#,
        );
        let c = PlanPricingController::from_page(form).unwrap();
        assert_eq!(c.state().max_users, 3);
        assert_eq!(
            c.form().text_of(Element::CostBreakdown),
            "$10 (base price) with 3 users included ($2 per additional user)"
        );
    }

    #[test]
    fn malformed_embedded_catalog_fails_startup() {
        let mut form = FakeForm::full("7", "2");
        form.set_text(Element::PlanInfo, "{");
        assert!(matches!(
            PlanPricingController::from_page(form),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn renders_initial_cost() {
        let c = controller(FakeForm::full("3", "7"));
        assert_eq!(c.form().text_of(Element::TotalCost), "$120");
        assert_eq!(
            c.form().text_of(Element::CostBreakdown),
            "$100 (base price) with 5 users included and 2 extra users at $10 each"
        );
        assert_eq!(c.state().max_users, 7);
    }

    #[test]
    fn raises_plan_size_to_new_plan_minimum() {
        let mut c = controller(FakeForm::full("2", "1"));
        assert_eq!(c.state().max_users, 1);

        c.form_mut().set_value(Element::PlanSelect, "3");
        c.on_plan_changed().unwrap();

        assert_eq!(c.state().max_users, 5);
        assert_eq!(c.form().value_of(Element::MaxUsers), "5");
        assert_eq!(c.form().min_of(Element::MaxUsers), Some(5));
        assert_eq!(c.form().text_of(Element::TotalCost), "$100");
    }

    #[test]
    fn keeps_larger_plan_size() {
        let mut c = controller(FakeForm::full("3", "5"));
        c.form_mut().set_value(Element::MaxUsers, "9");
        c.on_max_users_changed().unwrap();

        assert_eq!(c.state().max_users, 9);
        assert_eq!(c.form().value_of(Element::MaxUsers), "9");
        assert_eq!(c.form().text_of(Element::TotalCost), "$140");
    }

    #[test]
    fn unreadable_plan_size_snaps_to_minimum() {
        let mut c = controller(FakeForm::full("3", "5"));
        c.form_mut().set_value(Element::MaxUsers, "");
        c.on_max_users_changed().unwrap();
        assert_eq!(c.form().value_of(Element::MaxUsers), "5");
    }

    #[test]
    fn missing_max_users_fixes_size_at_one() {
        let mut form = FakeForm::full("2", "4");
        form.remove(Element::MaxUsers);
        let c = controller(form);
        assert!(!c.features().max_users);
        assert_eq!(c.state().max_users, 1);
        assert_eq!(
            c.form().text_of(Element::CostBreakdown),
            "$40 (base price) with 1 user included"
        );
    }

    #[test]
    fn free_plan_hides_payment_sections() {
        let mut form = FakeForm::full("1", "1");
        form.remove(Element::CardOnFile);
        let mut c = controller(form);
        assert_eq!(c.form().visible_of(Element::CardFieldset), Some(false));
        assert_eq!(c.form().visible_of(Element::PlanProjection), Some(false));
        assert_eq!(c.form().visible_of(Element::CardContainer), Some(false));

        c.form_mut().set_value(Element::PlanSelect, "2");
        c.on_plan_changed().unwrap();
        assert_eq!(c.form().visible_of(Element::CardFieldset), Some(true));
        assert_eq!(c.form().visible_of(Element::PlanProjection), Some(true));
        assert_eq!(c.form().visible_of(Element::CardContainer), Some(true));
    }

    #[test]
    fn saved_card_hides_card_container() {
        let mut form = FakeForm::full("2", "1");
        form.check(Element::CardOnFile, "True");
        let mut c = controller(form);
        assert_eq!(c.state().use_card_on_file, Some(true));
        assert_eq!(c.form().visible_of(Element::CardContainer), Some(false));

        c.form_mut().check(Element::CardOnFile, "False");
        c.on_card_on_file_changed().unwrap();
        assert_eq!(c.state().use_card_on_file, Some(false));
        assert_eq!(c.form().visible_of(Element::CardContainer), Some(true));
    }

    #[test]
    fn each_event_renders_once_without_optional_elements() {
        let mut form = FakeForm::full("3", "5");
        form.remove(Element::MaxUsers);
        form.remove(Element::CardOnFile);
        form.remove(Element::PlanProjection);
        let mut c = controller(form);
        let writes = c.form().text_writes(Element::TotalCost);

        c.handle(FormEvent::PlanChanged).unwrap();
        assert_eq!(c.form().text_writes(Element::TotalCost), writes + 1);
        c.handle(FormEvent::CardOnFileInput).unwrap();
        assert_eq!(c.form().text_writes(Element::TotalCost), writes + 2);
    }

    #[test]
    fn unknown_plan_is_reported_without_writes() {
        let mut c = controller(FakeForm::full("2", "1"));
        let writes = c.form().text_writes(Element::TotalCost);
        c.form_mut().set_value(Element::PlanSelect, "99");
        assert!(matches!(c.on_plan_changed(), Err(AppError::NotFound(_))));
        assert_eq!(c.form().text_writes(Element::TotalCost), writes);
    }

    #[test]
    fn receipt_emails_start_at_two_rows_and_follow_content() {
        let mut c = controller(FakeForm::full("2", "1"));
        assert_eq!(c.form().rows_of(Element::ReceiptEmails), Some(2));
        let fits = c.form().fits_of(Element::ReceiptEmails);
        c.handle(FormEvent::ReceiptEmailsInput).unwrap();
        assert_eq!(c.form().fits_of(Element::ReceiptEmails), fits + 1);
    }

    #[test]
    fn token_needed_only_for_paid_plans_without_saved_card() {
        let mut c = controller(FakeForm::full("1", "1"));
        assert!(!c.needs_token().unwrap());

        c.form_mut().set_value(Element::PlanSelect, "2");
        assert!(c.needs_token().unwrap());

        c.form_mut().check(Element::CardOnFile, "True");
        assert!(!c.needs_token().unwrap());
    }
}
