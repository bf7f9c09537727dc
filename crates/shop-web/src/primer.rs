//! Primer Universal Checkout
//!
//! Bindings to the Primer web SDK (loaded by a `<script>` tag in
//! `index.html`) and the [`CheckoutWidget`] that drives them.

use leptos::callback::{Callable, Callback};
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use wasm_bindgen_futures::JsFuture;

use shop_core::{
    CheckoutError, CheckoutResult, CheckoutWidget, ClientToken, MountOptions, RequestTicket,
};

#[wasm_bindgen]
extern "C" {
    /// `Primer.showUniversalCheckout(clientToken, options)` → `Promise`
    #[wasm_bindgen(catch, js_namespace = Primer, js_name = showUniversalCheckout)]
    fn show_universal_checkout(
        client_token: &str,
        options: &JsValue,
    ) -> Result<js_sys::Promise, JsValue>;
}

/// Best-effort message from a thrown JS value
fn js_error(value: &JsValue) -> CheckoutError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));

    CheckoutError::Mount(message)
}

/// Decode the `onCheckoutComplete` payload; unknown shapes become the default
fn decode_result(data: &JsValue) -> CheckoutResult {
    js_sys::JSON::stringify(data)
        .ok()
        .and_then(|s| s.as_string())
        .map(|json| parse_result(&json))
        .unwrap_or_default()
}

fn parse_result(json: &str) -> CheckoutResult {
    serde_json::from_str(json).unwrap_or_default()
}

/// Primer-backed checkout widget for one session request
#[derive(Clone, Copy)]
pub struct PrimerWidget {
    ticket: RequestTicket,
    on_complete: Callback<CheckoutResult>,
    on_error: Callback<(RequestTicket, CheckoutError)>,
}

impl PrimerWidget {
    pub const fn new(
        ticket: RequestTicket,
        on_complete: Callback<CheckoutResult>,
        on_error: Callback<(RequestTicket, CheckoutError)>,
    ) -> Self {
        Self {
            ticket,
            on_complete,
            on_error,
        }
    }

    fn options(&self, mount: &MountOptions) -> Result<js_sys::Object, CheckoutError> {
        let options = js_sys::Object::new();
        let on_complete = self.on_complete;

        let complete = Closure::<dyn FnMut(JsValue)>::new(move |data: JsValue| {
            leptos::logging::log!("Checkout completed");
            on_complete.run(decode_result(&data));
        });

        js_sys::Reflect::set(&options, &"container".into(), &mount.container.as_str().into())
            .map_err(|e| js_error(&e))?;
        js_sys::Reflect::set(&options, &"onCheckoutComplete".into(), &complete.into_js_value())
            .map_err(|e| js_error(&e))?;

        Ok(options)
    }
}

impl CheckoutWidget for PrimerWidget {
    fn mount(&self, token: &ClientToken, options: &MountOptions) -> shop_core::Result<()> {
        let js_options = self.options(options)?;
        let promise = show_universal_checkout(token.as_str(), &js_options).map_err(|e| js_error(&e))?;

        // The SDK can still reject after the call returns
        let (ticket, on_error) = (self.ticket, self.on_error);
        leptos::task::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let error = js_error(&e);
                leptos::logging::error!("Error initializing Primer checkout: {error}");
                on_error.run((ticket, error));
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use shop_core::PaymentSummary;

    use super::*;

    #[test]
    fn test_parse_result_reads_payment() {
        let result = parse_result(r#"{"payment":{"id":"pay_1","orderId":"order-123"}}"#);

        assert_eq!(
            result.payment,
            Some(PaymentSummary {
                id: Some("pay_1".into()),
                order_id: Some("order-123".into()),
            })
        );
    }

    #[test]
    fn test_parse_result_tolerates_other_shapes() {
        assert_eq!(parse_result("{}"), CheckoutResult::default());
        assert_eq!(parse_result("null"), CheckoutResult::default());
        assert_eq!(parse_result("not json"), CheckoutResult::default());
        assert_eq!(parse_result(r#"{"payment":{}}"#).payment, Some(PaymentSummary::default()));
    }
}
