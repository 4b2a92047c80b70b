//! Geographic Map Component
//!
//! Web Mercator viewport centered on the mean location, with a graticule
//! basemap. Bubble size follows revenue and hovering a bubble shows location,
//! revenue and units sold.

use leptos::*;

use crate::api::types::{GridAxis, GridLine, LocationMapView, MapPoint};

/// Bubble fill, RGBA [200, 30, 0, 160]
const BUBBLE_FILL: &str = "rgba(200, 30, 0, 0.63)";

/// Location bubble map
#[component]
pub fn GeoMap(map: LocationMapView) -> impl IntoView {
    let LocationMapView {
        title,
        center,
        zoom,
        viewport_width,
        viewport_height,
        graticule,
        points,
        caption,
        ..
    } = map;

    let center_label = center
        .map(|c| format!("Center {:.4}, {:.4} · zoom {}", c.latitude, c.longitude, zoom))
        .unwrap_or_else(|| "No locations".to_string());
    let frame_style = format!(
        "max-width: {}px; aspect-ratio: {} / {}",
        viewport_width, viewport_width, viewport_height
    );

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-semibold">{title}</h2>
            <div
                class="relative w-full rounded-xl bg-sky-950 overflow-hidden"
                style=frame_style
            >
                {graticule.into_iter().map(|line| view! { <Graticule line=line /> }).collect_view()}
                {points
                    .into_iter()
                    .filter(|p| p.visible)
                    .map(|point| view! { <Bubble point=point /> })
                    .collect_view()}
                <div class="absolute left-2 bottom-2 text-[10px] text-sky-200/80">{center_label}</div>
            </div>
            <p class="text-sm text-gray-600">{caption}</p>
        </div>
    }
}

/// One parallel or meridian with its label
#[component]
fn Graticule(line: GridLine) -> impl IntoView {
    let (line_style, label_style) = match line.axis {
        GridAxis::Latitude => (
            format!("top: {:.3}%; left: 0; right: 0; height: 1px", line.pct),
            format!("top: {:.3}%; left: 4px", line.pct),
        ),
        GridAxis::Longitude => (
            format!("left: {:.3}%; top: 0; bottom: 0; width: 1px", line.pct),
            format!("left: {:.3}%; top: 4px", line.pct),
        ),
    };

    view! {
        <div class="absolute bg-sky-300/20" style=line_style />
        <span class="absolute text-[10px] text-sky-200/70 pl-1" style=label_style>
            {line.label}
        </span>
    }
}

/// One location bubble
#[component]
fn Bubble(point: MapPoint) -> impl IntoView {
    let diameter = point.pixel_radius * 2.0;
    let style = format!(
        "left: {:.3}%; top: {:.3}%; width: {:.1}px; height: {:.1}px; background-color: {}; transform: translate(-50%, -50%)",
        point.x_pct, point.y_pct, diameter, diameter, BUBBLE_FILL
    );

    view! {
        <div
            class="absolute rounded-full border border-orange-200/60 hover:ring-2 hover:ring-white cursor-pointer"
            style=style
            title=point.tooltip.text
        />
    }
}
