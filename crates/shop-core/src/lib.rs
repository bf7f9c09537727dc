//! # shop-core
//!
//! Order model, metadata parsing and the checkout flow for the limited shop.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Storefront                           │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │  OrderForm  │──│   Metadata   │──│    CheckoutFlow     │  │
//! │  │  (setters)  │  │   (parser)   │  │  (CheckoutWidget)   │  │
//! │  └─────────────┘  └──────────────┘  └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here talks to the network. The session request lives in
//! `shop-payments` (server side) and the widget binding lives in `shop-web`,
//! both plugging in through the types below.

pub mod checkout;
pub mod error;
pub mod metadata;
pub mod order;

pub use checkout::{
    CHECKOUT_CONTAINER, CheckoutFlow, CheckoutResult, CheckoutState, CheckoutWidget, ClientToken,
    MountOptions, Notice, NoticeLevel, PaymentSummary, RequestTicket, SessionTokenResponse,
};
pub use error::{CheckoutError, Result};
pub use metadata::{Metadata, MetadataValue, parse_metadata};
pub use order::{CurrencyCode, CustomerInfo, OrderAmount, OrderDetails, OrderForm, Product};
