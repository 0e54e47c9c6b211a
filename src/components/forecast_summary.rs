use std::rc::Rc;
use yew::prelude::*;

use crate::models::forecast::DemandForecast;

#[derive(Properties, PartialEq)]
pub struct ForecastSummaryProps {
    pub forecast: Rc<DemandForecast>,
}

#[function_component(ForecastSummary)]
pub fn forecast_summary(props: &ForecastSummaryProps) -> Html {
    match props.forecast.stats() {
        Ok(summary) => html! {
            <div class="data-summary">
                <div class="summary-grid">
                    <div class="summary-item">
                        <h3>{"Demand Range"}</h3>
                        <p class="summary-value">{&summary.demand_range}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Average"}</h3>
                        <p class="summary-value">{format!("{:.1} kWh", summary.avg)}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Total"}</h3>
                        <p class="summary-value">{format!("{:.0} kWh", summary.total)}</p>
                    </div>
                    <div class="summary-item">
                        <h3>{"Peak"}</h3>
                        <p class="summary-value">
                            {summary.peak_at.format("%a %H:%M").to_string()}
                        </p>
                    </div>
                </div>
                <table class="data-table daily-totals">
                    <thead>
                        <tr><th>{"Day"}</th><th>{"Predicted demand"}</th></tr>
                    </thead>
                    <tbody>
                        { for props.forecast.daily_totals().into_iter().map(|(day, total)| html! {
                            <tr key={day.to_string()}>
                                <td>{day.format("%a %d %b").to_string()}</td>
                                <td>{format!("{total:.1} kWh")}</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        },
        Err(e) => html! {
            <div class="data-summary error">
                <p>{"Error calculating summary: "}{e.to_string()}</p>
            </div>
        },
    }
}
