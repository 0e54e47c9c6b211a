use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::hooks::data_state::DataState;
use crate::models::service_plan::{PlanPayload, ServicePlan, upsert_plan};

#[derive(Clone, PartialEq, Debug)]
pub struct PlansState {
    pub list: DataState<Vec<ServicePlan>>,
    /// A create/update/delete call is in flight
    pub saving: bool,
    pub action_error: Option<String>,
}

impl Default for PlansState {
    fn default() -> Self {
        Self {
            list: DataState::Loading,
            saving: false,
            action_error: None,
        }
    }
}

pub enum PlansAction {
    Loaded(Vec<ServicePlan>),
    LoadFailed(String),
    SaveStarted,
    Saved(ServicePlan),
    Removed(String),
    ActionFailed(String),
}

impl Reducible for PlansState {
    type Action = PlansAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let settled = |list: DataState<Vec<ServicePlan>>| {
            Rc::new(Self {
                list,
                saving: false,
                action_error: None,
            })
        };

        match action {
            PlansAction::Loaded(plans) => settled(DataState::Loaded(Rc::new(plans))),
            PlansAction::LoadFailed(msg) => settled(DataState::Error(msg)),
            PlansAction::SaveStarted => Rc::new(Self {
                list: self.list.clone(),
                saving: true,
                action_error: None,
            }),
            PlansAction::Saved(plan) => {
                let mut plans = self
                    .list
                    .data()
                    .map(|plans| plans.as_ref().clone())
                    .unwrap_or_default();
                upsert_plan(&mut plans, plan);
                settled(DataState::Loaded(Rc::new(plans)))
            }
            PlansAction::Removed(id) => {
                let mut plans = self
                    .list
                    .data()
                    .map(|plans| plans.as_ref().clone())
                    .unwrap_or_default();
                plans.retain(|p| p.id != id);
                settled(DataState::Loaded(Rc::new(plans)))
            }
            PlansAction::ActionFailed(msg) => Rc::new(Self {
                list: self.list.clone(),
                saving: false,
                action_error: Some(msg),
            }),
        }
    }
}

/// Handle returned by `use_service_plans`
#[derive(Clone, PartialEq)]
pub struct PlansHandle {
    pub state: Rc<PlansState>,
    /// Creates the plan when the id is `None`, updates it otherwise
    pub save: Callback<(Option<String>, PlanPayload)>,
    pub remove: Callback<String>,
}

/// Service plan list with create, update and delete.
#[hook]
pub fn use_service_plans(context: AppContext) -> PlansHandle {
    let state = use_reducer(PlansState::default);

    {
        let dispatcher = state.dispatcher();
        use_effect_with(context.clone(), move |context| {
            let client = context.client.clone();
            spawn_local(async move {
                match client.fetch_service_plans().await {
                    Ok(plans) => dispatcher.dispatch(PlansAction::Loaded(plans)),
                    Err(e) => dispatcher.dispatch(PlansAction::LoadFailed(e.to_string())),
                }
            });
            || ()
        });
    }

    let save = {
        let dispatcher = state.dispatcher();
        let client = context.client.clone();
        Callback::from(move |(id, payload): (Option<String>, PlanPayload)| {
            let dispatcher = dispatcher.clone();
            let client = client.clone();
            dispatcher.dispatch(PlansAction::SaveStarted);
            spawn_local(async move {
                let result = match id.as_deref() {
                    Some(id) => client.update_service_plan(id, &payload).await,
                    None => client.create_service_plan(&payload).await,
                };
                match result {
                    Ok(plan) => dispatcher.dispatch(PlansAction::Saved(plan)),
                    Err(e) => {
                        gloo::console::error!(&format!("Failed to save service plan: {e}"));
                        dispatcher.dispatch(PlansAction::ActionFailed(format!(
                            "Could not save \"{}\": {e}",
                            payload.name
                        )));
                    }
                }
            });
        })
    };

    let remove = {
        let dispatcher = state.dispatcher();
        let client = context.client;
        Callback::from(move |id: String| {
            let dispatcher = dispatcher.clone();
            let client = client.clone();
            dispatcher.dispatch(PlansAction::SaveStarted);
            spawn_local(async move {
                match client.delete_service_plan(&id).await {
                    Ok(()) => dispatcher.dispatch(PlansAction::Removed(id)),
                    Err(e) => {
                        gloo::console::error!(&format!("Failed to delete service plan {id}: {e}"));
                        dispatcher.dispatch(PlansAction::ActionFailed(
                            "Could not delete the plan. Please try again.".to_string(),
                        ));
                    }
                }
            });
        })
    };

    PlansHandle {
        state: Rc::new((*state).clone()),
        save,
        remove,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service_plan::BillingUnit;

    fn plan(id: &str, price: f64) -> ServicePlan {
        ServicePlan {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price_per_unit: price,
            billing_unit: BillingUnit::PerKwh,
            active: true,
        }
    }

    fn loaded() -> Rc<PlansState> {
        Rc::new(PlansState::default())
            .reduce(PlansAction::Loaded(vec![plan("p-1", 3000.0), plan("p-2", 3500.0)]))
    }

    #[test]
    fn save_cycle_updates_in_place() {
        let state = loaded().reduce(PlansAction::SaveStarted);
        assert!(state.saving);

        let state = state.reduce(PlansAction::Saved(plan("p-1", 3100.0)));
        let plans = state.list.data().unwrap();

        assert!(!state.saving);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].price_per_unit, 3100.0);
    }

    #[test]
    fn removed_plan_disappears() {
        let state = loaded().reduce(PlansAction::Removed("p-2".to_string()));
        assert_eq!(state.list.data().unwrap().len(), 1);
    }

    #[test]
    fn failure_keeps_plans_and_reports() {
        let state = loaded()
            .reduce(PlansAction::SaveStarted)
            .reduce(PlansAction::ActionFailed("boom".to_string()));

        assert!(!state.saving);
        assert_eq!(state.action_error.as_deref(), Some("boom"));
        assert_eq!(state.list.data().unwrap().len(), 2);
    }
}
