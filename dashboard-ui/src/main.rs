//! Sales Dashboard UI
//!
//! Client-side rendered Leptos application compiled to WebAssembly. It fetches
//! pre-built page views from the sales dashboard API and draws them.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
