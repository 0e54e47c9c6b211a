use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::config::Config;
use crate::hooks::data_state::DataState;
use crate::models::forecast::DemandForecast;

/// Demand forecast for the next `days` days, refetched when `days` changes.
#[hook]
pub fn use_forecast(context: AppContext, days: u32) -> UseStateHandle<DataState<DemandForecast>> {
    let state = use_state(|| DataState::Loading);
    let trigger = use_state(|| 0u32); // Polling trigger

    {
        let state = state.clone();
        let trigger_value = *trigger;

        use_effect_with((trigger_value, days, context), move |(_, days, context)| {
            let client = context.client.clone();
            let days = *days;
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            // Reset to loading when the horizon changes
            state.set(DataState::Loading);

            spawn_local(async move {
                match client.fetch_demand_forecast(days).await {
                    Ok(forecast) if !aborted_check.get() => {
                        state.set(DataState::Loaded(Rc::new(forecast)));
                    }
                    Err(e) if !aborted_check.get() => state.set(DataState::Error(e.to_string())),
                    _ => {}
                }

                if Config::ENABLE_AUTO_REFRESH && !aborted_check.get() {
                    TimeoutFuture::new(Config::POLLING_INTERVAL_MS).await;
                    if !aborted_check.get() {
                        trigger.set(*trigger + 1);
                    }
                }
            });

            move || aborted.set(true)
        });
    }

    state
}
