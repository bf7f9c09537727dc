//! Page-load scenario: default form → one session request → one mount.

use std::cell::Cell;

use shop_core::{
    CheckoutError, CheckoutFlow, CheckoutState, CheckoutWidget, ClientToken, MountOptions,
    OrderForm,
};
use shop_payments::{ClientSessionRequest, MockSessionProvider, SessionProvider};

#[derive(Default)]
struct CountingWidget {
    mounts: Cell<usize>,
}

impl CheckoutWidget for CountingWidget {
    fn mount(&self, _token: &ClientToken, _options: &MountOptions) -> shop_core::Result<()> {
        self.mounts.set(self.mounts.get() + 1);
        Ok(())
    }
}

async fn generate_session<P: SessionProvider>(
    provider: &P,
    form: &OrderForm,
    flow: &mut CheckoutFlow,
    widget: &CountingWidget,
) {
    let ticket = flow.begin();
    let outcome = provider
        .create_client_session(&form.details())
        .await
        .map_err(|e| CheckoutError::Session(e.to_string()));

    flow.session_resolved(ticket, outcome, widget);
}

#[tokio::test]
async fn test_initial_load_with_defaults() {
    let provider = MockSessionProvider::new("abc");
    let widget = CountingWidget::default();
    let mut flow = CheckoutFlow::new();

    generate_session(&provider, &OrderForm::new(), &mut flow, &widget).await;

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 1);

    let body = serde_json::to_value(ClientSessionRequest::for_order(&requests[0])).unwrap();
    assert_eq!(body["metadata"], serde_json::json!({}));
    assert_eq!(body["currencyCode"], "EUR");
    assert_eq!(body["customer"]["firstName"], "John");
    assert_eq!(body["customer"]["lastName"], "Smith");

    assert_eq!(widget.mounts.get(), 1);
    assert_eq!(flow.state(), CheckoutState::Mounted);
}

#[tokio::test]
async fn test_save_uses_live_values() {
    let provider = MockSessionProvider::new("abc");
    let widget = CountingWidget::default();
    let mut flow = CheckoutFlow::new();
    let mut form = OrderForm::new();

    generate_session(&provider, &form, &mut flow, &widget).await;

    form.set_amount_input("25");
    form.set_metadata_text("scenario=PAYPAL");
    generate_session(&provider, &form, &mut flow, &widget).await;

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].amount.to_string(), "1000.00");
    assert_eq!(requests[1].amount.to_string(), "25.00");
    assert_eq!(requests[1].metadata.len(), 1);
    assert_eq!(widget.mounts.get(), 2);
}

#[tokio::test]
async fn test_failures_never_mount() {
    let widget = CountingWidget::default();

    for provider in [MockSessionProvider::without_token(), MockSessionProvider::failing(502)] {
        let mut flow = CheckoutFlow::new();
        generate_session(&provider, &OrderForm::new(), &mut flow, &widget).await;
        assert_eq!(flow.state(), CheckoutState::Failed);
    }

    assert_eq!(widget.mounts.get(), 0);
}
