use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Title},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, LineStyle, LineStyleType,
        SplitLine, TextStyle, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::Line,
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::forecast::DemandForecast;

const CHART_ID: &str = "demand-chart";

#[derive(Properties, PartialEq)]
pub struct ForecastChartProps {
    pub forecast: Rc<DemandForecast>,
}

#[function_component(ForecastChart)]
pub fn forecast_chart(props: &ForecastChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo(props.forecast.clone(), |forecast| forecast.series_data());

    {
        let container_ref = container_ref.clone();

        use_effect_with(
            (series_data, container_ref),
            |(series_data, container_ref)| {
                let listener = container_ref
                    .cast::<HtmlElement>()
                    .zip(web_sys::window())
                    .map(|(container, window)| {
                        render_chart(&container, series_data);

                        let series_data = series_data.clone();
                        EventListener::new(&window, "resize", move |_| {
                            render_chart(&container, &series_data);
                        })
                    });

                move || drop(listener)
            },
        );
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={CHART_ID} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, series_data: &(Vec<String>, Vec<f64>)) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 || series_data.0.is_empty() {
        return;
    }

    let chart = build_chart(series_data);
    if let Err(e) = WasmRenderer::new(width, height).render(CHART_ID, &chart) {
        gloo::console::error!(&format!("Render error: {e:?}"));
    }
}

fn build_chart(series_data: &(Vec<String>, Vec<f64>)) -> CharmingChart {
    let (x_data, y_data) = series_data;
    let (title_color, axis_color, grid_color) = ("#1f2937", "#6b7280", "#e5e7eb");

    CharmingChart::new()
        .title(
            Title::new()
                .text("Predicted Charging Demand")
                .left("center")
                .text_style(TextStyle::new().font_size(16).color(title_color)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line)),
        )
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("18%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(x_data.clone())
                // One label per day for hourly points
                .axis_label(AxisLabel::new().rotate(45).color(axis_color).interval(23)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("kWh")
                .axis_label(AxisLabel::new().color(axis_color))
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color(grid_color)
                            .type_(LineStyleType::Dashed),
                    ),
                ),
        )
        .series(
            Line::new()
                .name("Predicted demand")
                .data(y_data.clone())
                .area_style(AreaStyle::new()),
        )
}
