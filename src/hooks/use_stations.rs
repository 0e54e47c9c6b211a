use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::config::Config;
use crate::hooks::data_state::DataState;
use crate::models::station::StationSummary;

/// Station listing, refreshed on an interval while mounted.
#[hook]
pub fn use_stations(context: AppContext) -> UseStateHandle<DataState<Vec<StationSummary>>> {
    let state = use_state(|| DataState::Loading);
    let trigger = use_state(|| 0u32); // Polling trigger

    {
        let state = state.clone();
        let trigger_value = *trigger;

        use_effect_with((trigger_value, context), move |(_, context)| {
            let client = context.client.clone();
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            spawn_local(async move {
                match client.fetch_stations().await {
                    Ok(stations) if !aborted_check.get() => {
                        state.set(DataState::Loaded(Rc::new(stations)));
                    }
                    Err(e) if !aborted_check.get() => state.set(DataState::Error(e.to_string())),
                    _ => {} // Request was aborted, ignore result
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
