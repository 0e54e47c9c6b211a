use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::components::status::Status;
use crate::hooks::use_service_plans::use_service_plans;
use crate::models::form::FieldErrors;
use crate::models::service_plan::{BillingUnit, PlanDraft, PlanField, ServicePlan};

#[derive(Properties, PartialEq)]
pub struct ServicePlansPanelProps {
    pub context: AppContext,
}

#[function_component(ServicePlansPanel)]
pub fn service_plans_panel(props: &ServicePlansPanelProps) -> Html {
    let handle = use_service_plans(props.context.clone());
    let draft = use_state(|| None::<PlanDraft>);
    let errors = use_state(FieldErrors::<PlanField>::new);

    // Close the editor once a save settles without error
    {
        let draft = draft.clone();
        let saving = handle.state.saving;
        let failed = handle.state.action_error.is_some();
        use_effect_with(saving, move |saving| {
            if !*saving && !failed {
                draft.set(None);
            }
            || ()
        });
    }

    let on_new = {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            errors.set(FieldErrors::new());
            draft.set(Some(PlanDraft::default()));
        })
    };

    let on_save = {
        let draft = draft.clone();
        let errors = errors.clone();
        let save = handle.save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(current) = (*draft).clone() else {
                return;
            };
            match current.to_payload() {
                Ok(payload) => {
                    errors.set(FieldErrors::new());
                    save.emit((current.id.clone(), payload));
                }
                Err(invalid) => errors.set(invalid),
            }
        })
    };

    let on_close = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| draft.set(None))
    };

    html! {
        <div class="service-plans">
            <div class="page-toolbar">
                <button class="primary" onclick={on_new} disabled={handle.state.saving}>
                    {"New plan"}
                </button>
            </div>

            if let Some(error) = &handle.state.action_error {
                <div class="status error" role="alert"><p>{error}</p></div>
            }

            <Status status={handle.state.list.status()} subject="service plans" />

            if let Some(current) = (*draft).clone() {
                <form class="plan-editor" onsubmit={on_save}>
                    <h3>{ if current.is_new() { "New plan" } else { "Edit plan" } }</h3>
                    { plan_text_input(&draft, &errors, PlanField::Name, "Name", &current.name) }
                    { plan_text_input(&draft, &errors, PlanField::Description, "Description", &current.description) }
                    { plan_text_input(&draft, &errors, PlanField::PricePerUnit, "Price", &current.price_per_unit) }
                    { billing_select(&draft, current.billing_unit) }
                    { active_toggle(&draft, current.active) }
                    <div class="wizard-actions">
                        <button type="button" class="secondary" onclick={on_close}>{"Close"}</button>
                        <button type="submit" class="primary" disabled={handle.state.saving}>
                            { if handle.state.saving { "Saving..." } else { "Save" } }
                        </button>
                    </div>
                </form>
            }

            if let Some(plans) = handle.state.list.data() {
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Plan"}</th>
                            <th>{"Price"}</th>
                            <th>{"Status"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for plans.iter().map(|plan| plan_row(plan, &draft, &errors, &handle.remove)) }
                    </tbody>
                </table>
            }
        </div>
    }
}

fn plan_row(
    plan: &ServicePlan,
    draft: &UseStateHandle<Option<PlanDraft>>,
    errors: &UseStateHandle<FieldErrors<PlanField>>,
    remove: &Callback<String>,
) -> Html {
    let on_edit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let editable = PlanDraft::from(plan);
        Callback::from(move |_: MouseEvent| {
            errors.set(FieldErrors::new());
            draft.set(Some(editable.clone()));
        })
    };
    let on_delete = {
        let remove = remove.clone();
        let id = plan.id.clone();
        Callback::from(move |_: MouseEvent| remove.emit(id.clone()))
    };

    html! {
        <tr key={plan.id.clone()}>
            <td>
                <strong>{&plan.name}</strong>
                <p class="muted">{&plan.description}</p>
            </td>
            <td>{format!("{} {}", plan.price_per_unit, plan.billing_unit.suffix())}</td>
            <td>{ if plan.active { "Active" } else { "Inactive" } }</td>
            <td class="row-actions">
                <button class="link" onclick={on_edit}>{"Edit"}</button>
                <button class="link danger" onclick={on_delete}>{"Delete"}</button>
            </td>
        </tr>
    }
}

fn plan_text_input(
    draft: &UseStateHandle<Option<PlanDraft>>,
    errors: &UseStateHandle<FieldErrors<PlanField>>,
    field: PlanField,
    label: &'static str,
    value: &str,
) -> Html {
    let error = errors.get(field).map(str::to_string);
    let oninput = {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(mut next) = (*draft).clone() else {
                return;
            };
            match field {
                PlanField::Name => next.name = input.value(),
                PlanField::Description => next.description = input.value(),
                PlanField::PricePerUnit => next.price_per_unit = input.value(),
                PlanField::BillingUnit => return,
            }
            if errors.contains(field) {
                let mut remaining = (*errors).clone();
                remaining.clear(field);
                errors.set(remaining);
            }
            draft.set(Some(next));
        })
    };

    html! {
        <label class={classes!("field", error.is_some().then_some("invalid"))}>
            <span>{label}</span>
            <input type="text" value={value.to_string()} {oninput} />
            if let Some(message) = error {
                <p class="field-error">{message}</p>
            }
        </label>
    }
}

fn billing_select(draft: &UseStateHandle<Option<PlanDraft>>, current: BillingUnit) -> Html {
    let onchange = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            let (Some(mut next), Ok(unit)) = ((*draft).clone(), target.value().parse()) else {
                return;
            };
            next.billing_unit = unit;
            draft.set(Some(next));
        })
    };

    html! {
        <label class="field">
            <span>{"Billing"}</span>
            <select {onchange}>
                { for BillingUnit::all().iter().map(|unit| html! {
                    <option value={unit.code()} selected={*unit == current}>{unit.suffix()}</option>
                }) }
            </select>
        </label>
    }
}

fn active_toggle(draft: &UseStateHandle<Option<PlanDraft>>, active: bool) -> Html {
    let onchange = {
        let draft = draft.clone();
        Callback::from(move |_: Event| {
            if let Some(mut next) = (*draft).clone() {
                next.active = !next.active;
                draft.set(Some(next));
            }
        })
    };

    html! {
        <label class="checkbox">
            <input type="checkbox" checked={active} {onchange} />
            {"Available to drivers"}
        </label>
    }
}
