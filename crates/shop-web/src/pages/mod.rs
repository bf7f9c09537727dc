//! Page Components

mod shop;

pub use shop::ShopPage;
