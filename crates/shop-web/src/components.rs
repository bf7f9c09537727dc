//! UI Components

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leptos::prelude::*;
use shop_core::{Notice, NoticeLevel, Product};

/// How long a toast stays on screen
const TOAST_TTL: Duration = Duration::from_secs(4);

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(0);

/// A notice on screen
#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Show a notice and schedule its removal
pub fn push_toast(toasts: RwSignal<Vec<Toast>>, notice: Notice) {
    let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
    toasts.update(|list| list.push(Toast { id, notice }));

    set_timeout(
        move || toasts.update(|list| list.retain(|t| t.id != id)),
        TOAST_TTL,
    );
}

/// Transient notifications, newest last
#[component]
pub fn Toasts(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toasts" aria-live="polite">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.notice.level {
                        NoticeLevel::Success => "toast toast-success",
                        NoticeLevel::Error => "toast toast-error",
                    };
                    view! { <div class=class>{toast.notice.message}</div> }
                }
            />
        </div>
    }
}

/// Product picture and name, with the price controls as children
#[component]
pub fn ProductCard(product: Product, children: Children) -> impl IntoView {
    view! {
        <div class="product">
            <img src=product.image width="250" height="200" alt=product.name />
            <div class="product-info">
                <h2>"Name: " {product.name}</h2>
                {children()}
            </div>
        </div>
    }
}
