//! Sales by Location Page

use leptos::*;

use crate::api;
use crate::api::types::LocationMapView;
use crate::components::{ErrorBanner, GeoMap, Loading};

/// Location map page component
#[component]
pub fn SalesByLocation() -> impl IntoView {
    let map = create_rw_signal::<Option<Result<LocationMapView, String>>>(None);

    create_effect(move |_| {
        spawn_local(async move {
            let result = api::fetch_location_map().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch location map: {}", e).into());
            }
            map.set(Some(result));
        });
    });

    view! {
        <div>
            {move || match map.get() {
                None => view! { <Loading /> }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message /> }.into_view(),
                Some(Ok(map)) => view! { <GeoMap map=map /> }.into_view(),
            }}
        </div>
    }
}
