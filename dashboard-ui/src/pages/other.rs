//! Placeholder page

use leptos::*;

use crate::api;
use crate::api::types::PlaceholderView;
use crate::components::{ErrorBanner, Loading};

#[component]
pub fn Other() -> impl IntoView {
    let placeholder = create_rw_signal::<Option<Result<PlaceholderView, String>>>(None);

    create_effect(move |_| {
        spawn_local(async move {
            placeholder.set(Some(api::fetch_placeholder().await));
        });
    });

    view! {
        <div>
            {move || match placeholder.get() {
                None => view! { <Loading /> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message /> }.into_view(),
                Some(Ok(PlaceholderView { title, body })) => view! {
                    <h2 class="text-2xl font-semibold mb-4">{title}</h2>
                    <p class="text-gray-700">{body}</p>
                }.into_view(),
            }}
        </div>
    }
}
