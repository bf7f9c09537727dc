//! Shop Page
//!
//! The one page of the shop: buyer details on the left, Primer's checkout on
//! the right. A client session is generated once after mount and again on
//! every "Save details" click, always from the live form values.

use leptos::prelude::*;
use shop_core::{
    CheckoutError, CheckoutFlow, CheckoutResult, CheckoutState, OrderForm, Product,
    RequestTicket,
};

use crate::api;
use crate::components::{ProductCard, Toast, Toasts, push_toast};
use crate::primer::PrimerWidget;

const fn status_label(state: CheckoutState) -> &'static str {
    match state {
        CheckoutState::Uninitialized | CheckoutState::Mounted => "",
        CheckoutState::SessionRequested | CheckoutState::TokenReceived => "Loading checkout…",
        CheckoutState::Failed | CheckoutState::NotMounted => "Checkout unavailable. Save to retry.",
        CheckoutState::Completed => "Thank you for your order!",
    }
}

#[component]
pub fn ShopPage() -> impl IntoView {
    let form = RwSignal::new(OrderForm::new());
    let flow = RwSignal::new(CheckoutFlow::new());
    let toasts = RwSignal::new(Vec::<Toast>::new());

    let on_complete = Callback::new(move |result: CheckoutResult| {
        if let Some(notice) = flow.try_update(|f| f.complete(&result)) {
            push_toast(toasts, notice);
        }
    });

    let on_mount_error = Callback::new(move |(ticket, error): (RequestTicket, CheckoutError)| {
        if let Some(notice) = flow.try_update(|f| f.mount_failed(ticket, &error)).flatten() {
            push_toast(toasts, notice);
        }
    });

    // Generate a session for whatever the form holds right now
    let generate_session = move || {
        let details = form.with_untracked(OrderForm::details);
        let Some(ticket) = flow.try_update(CheckoutFlow::begin) else {
            return;
        };

        leptos::logging::log!(
            "Requesting client session: {} {}",
            details.amount,
            details.currency_code
        );

        leptos::task::spawn_local(async move {
            let outcome = api::create_client_session(&details).await;
            let widget = PrimerWidget::new(ticket, on_complete, on_mount_error);

            if let Some(notice) = flow
                .try_update(|f| f.session_resolved(ticket, outcome, &widget))
                .flatten()
            {
                push_toast(toasts, notice);
            }
        });
    };

    // Once after mount; reads nothing reactively so it never re-runs
    Effect::new(move |_| generate_session());

    let on_amount_change = move |ev: leptos::ev::Event| {
        let input = event_target_value(&ev);
        if !form.try_update(|f| f.set_amount_input(&input)).unwrap_or(false) {
            leptos::logging::warn!("Ignoring invalid amount: {input}");
        }
    };

    view! {
        <div class="shop">
            <h1 class="title">"Tudor's very limited shop!"</h1>

            <div class="checkout-layout" id="checkout-container">
                <section class="details">
                    <ProductCard product=Product::T_SHIRT>
                        <div class="price">
                            <h2>"Amount: "</h2>
                            <input
                                type="number"
                                min="0"
                                step="0.01"
                                placeholder="Amount"
                                class="short"
                                prop:value=move || form.with(|f| f.amount().to_string())
                                on:change=on_amount_change
                            />
                            <input
                                type="text"
                                placeholder="Currency"
                                class="short"
                                prop:value=move || form.with(|f| f.currency().to_string())
                                on:input=move |ev| form.update(|f| f.set_currency(&event_target_value(&ev)))
                            />
                        </div>
                    </ProductCard>

                    <div class="fields">
                        <div class="row">
                            <div class="field">
                                <label for="first-name">"First Name"</label>
                                <input
                                    type="text"
                                    id="first-name"
                                    prop:value=move || form.with(|f| f.customer().first_name.clone())
                                    on:input=move |ev| form.update(|f| f.set_first_name(event_target_value(&ev)))
                                />
                            </div>
                            <div class="field">
                                <label for="last-name">"Last Name"</label>
                                <input
                                    type="text"
                                    id="last-name"
                                    prop:value=move || form.with(|f| f.customer().last_name.clone())
                                    on:input=move |ev| form.update(|f| f.set_last_name(event_target_value(&ev)))
                                />
                            </div>
                        </div>

                        <div class="field">
                            <label for="address">"Address"</label>
                            <input
                                type="text"
                                id="address"
                                prop:value=move || form.with(|f| f.customer().address.clone())
                                on:input=move |ev| form.update(|f| f.set_address(event_target_value(&ev)))
                            />
                        </div>

                        <div class="field">
                            <label for="custom-metadata">"Custom Metadata"</label>
                            <textarea
                                id="custom-metadata"
                                placeholder="scenario=PAYPAL"
                                prop:value=move || form.with(|f| f.metadata_text().to_string())
                                on:input=move |ev| form.update(|f| f.set_metadata_text(event_target_value(&ev)))
                            />
                        </div>
                    </div>

                    <p class="status">{move || status_label(flow.with(CheckoutFlow::state))}</p>

                    <button class="btn save" on:click=move |_| generate_session()>
                        "Save details"
                    </button>
                </section>

                <div id="checkout" class="checkout"></div>
            </div>

            <Toasts toasts=toasts />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(CheckoutState::Uninitialized), "");
        assert_eq!(status_label(CheckoutState::Mounted), "");
        assert_eq!(status_label(CheckoutState::SessionRequested), "Loading checkout…");
        assert_eq!(status_label(CheckoutState::TokenReceived), "Loading checkout…");
        assert_eq!(
            status_label(CheckoutState::Failed),
            "Checkout unavailable. Save to retry."
        );
        assert_eq!(status_label(CheckoutState::NotMounted), status_label(CheckoutState::Failed));
        assert_eq!(status_label(CheckoutState::Completed), "Thank you for your order!");
    }
}
