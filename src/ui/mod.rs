//! Desktop toast display layer.

pub mod components;
pub mod demo_app;
pub mod toast_overlay;

pub use demo_app::ToastDemoApp;
