//! Chart Components
//!
//! Revenue line chart on an HTML5 canvas, product ranking bars and the
//! payment method share pie.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::types::{BarChart as BarChartModel, LineChart as LineChartModel, LinePoint};
use crate::api::types::PieChart as PieChartModel;

/// Series colors, cycled for pie slices
const SERIES_COLORS: [&str; 6] = [
    "#636EFA", // Blue
    "#EF553B", // Red
    "#00CC96", // Green
    "#AB63FA", // Purple
    "#FFA15A", // Orange
    "#19D3F3", // Cyan
];

/// Revenue over time line chart
#[component]
pub fn LineChart(chart: LineChartModel) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let points = chart.points.clone();

    // Draw once the canvas is mounted
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_line_chart(&canvas, &points);
        }
    });

    view! {
        <div>
            <h3 class="text-lg font-semibold mb-2">{chart.title}</h3>
            <div class="text-xs text-gray-500 mb-1">{chart.y_label}</div>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="360"
                class="w-full h-64 md:h-96 rounded-lg"
            />
        </div>
    }
}

/// Product ranking bar chart; hovering a bar shows its revenue
#[component]
pub fn BarChart(chart: BarChartModel) -> impl IntoView {
    let empty = chart.bars.is_empty();
    let labels = chart_labels(&chart.bars);

    view! {
        <div>
            <h2 class="text-xl font-semibold mb-2">{chart.heading}</h2>
            <h3 class="text-lg font-semibold mb-4">{chart.title}</h3>
            {if empty {
                view! { <p class="text-gray-500">"No products sold"</p> }.into_view()
            } else {
                view! {
                    <div class="flex">
                        <div class="text-xs text-gray-500 [writing-mode:vertical-rl] rotate-180 mr-2">
                            {chart.y_label}
                        </div>
                        <div class="flex-1 flex items-end gap-3 h-64 border-b border-l border-gray-300 px-2">
                            {chart.bars.into_iter().map(|bar| view! {
                                <div class="flex-1 flex flex-col items-center justify-end h-full">
                                    <span class="text-xs text-gray-600 mb-1">{bar.display}</span>
                                    <div
                                        class="w-full rounded-t bg-[#636EFA] hover:opacity-80 cursor-pointer"
                                        style=format!("height: {:.2}%", bar.height_pct)
                                        title=format!("{}\n{}", bar.label, bar.tooltip)
                                    />
                                </div>
                            }).collect_view()}
                        </div>
                    </div>
                }.into_view()
            }}
            <BarLabels labels=labels />
        </div>
    }
}

/// Product names under the bars
#[component]
fn BarLabels(labels: Vec<String>) -> impl IntoView {
    view! {
        <div class="flex gap-3 px-2 ml-6">
            {labels.into_iter().map(|label| view! {
                <div class="flex-1 text-center text-xs text-gray-700 truncate" title=label.clone()>
                    {label}
                </div>
            }).collect_view()}
        </div>
    }
}

fn chart_labels(bars: &[crate::api::types::Bar]) -> Vec<String> {
    bars.iter().map(|b| b.label.clone()).collect()
}

/// Share-of-revenue pie chart with legend
#[component]
pub fn PieChart(chart: PieChartModel) -> impl IntoView {
    let gradient = conic_gradient(&chart);
    let empty = chart.slices.is_empty();

    view! {
        <div>
            <h2 class="text-xl font-semibold mb-2">{chart.heading}</h2>
            <h3 class="text-lg font-semibold mb-4">{chart.title}</h3>
            {if empty {
                view! { <p class="text-gray-500">"No payments recorded"</p> }.into_view()
            } else {
                view! {
                    <div class="flex flex-col md:flex-row items-center gap-8">
                        <div
                            class="w-64 h-64 rounded-full shadow-inner"
                            style=format!("background: {}", gradient)
                        />
                        <ul class="space-y-2">
                            {chart.slices.into_iter().enumerate().map(|(idx, slice)| {
                                let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
                                view! {
                                    <li class="flex items-center space-x-2" title=slice.display.clone()>
                                        <span
                                            class="w-3 h-3 rounded-full inline-block"
                                            style=format!("background-color: {}", color)
                                        />
                                        <span class="text-sm text-gray-800">{slice.label}</span>
                                        <span class="text-sm text-gray-500">
                                            {format!("{:.1}%", slice.share_pct)}
                                        </span>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                }.into_view()
            }}
        </div>
    }
}

/// CSS conic gradient with one band per slice
fn conic_gradient(chart: &PieChartModel) -> String {
    let bands: Vec<String> = chart
        .slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
            format!(
                "{} {:.3}% {:.3}%",
                color,
                slice.start_pct,
                slice.start_pct + slice.share_pct
            )
        })
        .collect();

    if bands.is_empty() {
        "#e5e7eb".to_string()
    } else {
        format!("conic-gradient({})", bands.join(", "))
    }
}

/// Draw the revenue series on canvas
fn draw_line_chart(canvas: &HtmlCanvasElement, points: &[LinePoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 90.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No dated sales", width / 2.0 - 50.0, height / 2.0);
        return;
    }

    let y_min = points.iter().map(|p| p.value).fold(0.0_f64, f64::min);
    let mut y_max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max) * 1.1;
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }

    let t_min = points.first().map(|p| p.timestamp).unwrap_or(0);
    let t_max = points.last().map(|p| p.timestamp).unwrap_or(0);
    let t_span = (t_max - t_min) as f64;

    let x_of = |p: &LinePoint| {
        if t_span > 0.0 {
            margin_left + ((p.timestamp - t_min) as f64 / t_span) * chart_width
        } else {
            margin_left + chart_width / 2.0
        }
    };
    let y_of = |v: f64| margin_top + ((y_max - v) / (y_max - y_min)) * chart_height;

    // Horizontal grid lines with value labels
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
        ctx.set_fill_style(&"#6b7280".into());
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // Series
    ctx.set_stroke_style(&SERIES_COLORS[0].into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let (x, y) = (x_of(point), y_of(point.value));
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&SERIES_COLORS[0].into());
    for point in points {
        ctx.begin_path();
        let _ = ctx.arc(x_of(point), y_of(point.value), 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // Date labels, at most six spread over the series
    ctx.set_fill_style(&"#6b7280".into());
    let step = (points.len() / 6).max(1);
    for point in points.iter().step_by(step) {
        let _ = ctx.fill_text(&point.label, x_of(point) - 30.0, height - 10.0);
    }
}
