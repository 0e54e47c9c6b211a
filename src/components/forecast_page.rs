use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::components::forecast_chart::ForecastChart;
use crate::components::forecast_summary::ForecastSummary;
use crate::components::status::Status;
use crate::config::Config;
use crate::hooks::use_forecast::use_forecast;
use crate::models::forecast::clamp_horizon;

const HORIZON_CHOICES: [u32; 3] = [3, 7, 14];

#[derive(Properties, PartialEq)]
pub struct ForecastPageProps {
    pub context: AppContext,
}

#[function_component(ForecastPage)]
pub fn forecast_page(props: &ForecastPageProps) -> Html {
    let days = use_state(|| Config::DEFAULT_FORECAST_DAYS);
    let state = use_forecast(props.context.clone(), *days);

    let on_horizon = {
        let days = days.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = target.value().parse::<u32>() {
                days.set(clamp_horizon(value));
            }
        })
    };

    html! {
        <div class="forecast">
            <div class="page-toolbar">
                <label class="field inline">
                    <span>{"Horizon"}</span>
                    <select onchange={on_horizon}>
                        { for HORIZON_CHOICES.iter().map(|choice| html! {
                            <option value={choice.to_string()} selected={*choice == *days}>
                                {format!("{choice} days")}
                            </option>
                        }) }
                    </select>
                </label>
            </div>

            <Status status={state.status()} subject="demand forecast" />

            if let Some(forecast) = state.data() {
                if forecast.is_empty() {
                    <p class="empty">{"No forecast available for this horizon"}</p>
                } else {
                    <section class="data-section">
                        <h2>{"Summary"}</h2>
                        <ForecastSummary forecast={forecast.clone()} />
                    </section>
                    <section class="chart-section">
                        <h2>{"Hourly Demand"}</h2>
                        <ForecastChart forecast={forecast.clone()} />
                    </section>
                }
            }
        </div>
    }
}
