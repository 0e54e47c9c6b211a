use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::hooks::use_station_wizard::{WizardHandle, use_station_wizard};
use crate::models::station::{Amenity, CUSTOM_HOURS, OPERATING_HOUR_PRESETS, StationStatus};
use crate::models::wizard::{FieldValue, StationField, StationWizard, WizardStep, build_request};

#[derive(Properties, PartialEq)]
pub struct StationWizardProps {
    pub context: AppContext,
    /// Receives the id of the created station
    pub on_created: Callback<String>,
    pub on_cancel: Callback<()>,
}

#[function_component(StationWizardView)]
pub fn station_wizard_view(props: &StationWizardProps) -> Html {
    let handle = use_station_wizard(
        props.context.clone(),
        props.on_created.clone(),
        props.on_cancel.clone(),
    );
    let wizard = handle.wizard.clone();
    let step = wizard.step();
    let submitting = wizard.is_submitting();

    let on_back = {
        let retreat = handle.retreat.clone();
        Callback::from(move |_: MouseEvent| retreat.emit(()))
    };
    let on_next = {
        let advance = handle.advance.clone();
        Callback::from(move |_: MouseEvent| advance.emit(()))
    };
    let on_submit = {
        let submit = handle.submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(()))
    };
    let on_cancel = {
        let cancel = handle.cancel.clone();
        Callback::from(move |_: MouseEvent| cancel.emit(()))
    };

    html! {
        <div class="wizard">
            <ol class="wizard-steps">
                { for WizardStep::all().iter().map(|s| {
                    let class = classes!(
                        "wizard-step",
                        (*s == step).then_some("current"),
                        (*s < step).then_some("done"),
                    );
                    html! { <li {class}>{format!("{}. {}", s.index() + 1, s.label())}</li> }
                }) }
            </ol>

            <section class="wizard-body">
                <h2>{step.label()}</h2>
                {
                    match step {
                        WizardStep::BasicInfo => basic_info_step(&handle),
                        WizardStep::ChargingConfig => charging_step(&handle),
                        WizardStep::AmenitiesContact => amenities_step(&handle),
                        WizardStep::Confirmation => confirmation_step(&wizard, &props.context),
                    }
                }
            </section>

            if let Some(failure) = wizard.failure() {
                <div class="status error" role="alert">
                    <p>{&failure.notice}</p>
                </div>
            }

            <div class="wizard-actions">
                <button class="secondary" onclick={on_cancel} disabled={submitting}>
                    {"Cancel"}
                </button>
                <button
                    class="secondary"
                    onclick={on_back}
                    disabled={submitting || step == WizardStep::first()}
                >
                    {"Back"}
                </button>
                if step == WizardStep::last() {
                    <button class="primary" onclick={on_submit} disabled={submitting}>
                        { if submitting { "Creating..." } else { "Create station" } }
                    </button>
                } else {
                    <button class="primary" onclick={on_next}>{"Next"}</button>
                }
            </div>
        </div>
    }
}

fn basic_info_step(handle: &WizardHandle) -> Html {
    html! {
        <>
            { text_input(handle, StationField::Name, "text", "e.g. Green Mall Hub") }
            { text_area(handle, StationField::Description) }
            { text_input(handle, StationField::Address, "text", "Street and number") }
        </>
    }
}

fn charging_step(handle: &WizardHandle) -> Html {
    let form = handle.wizard.form();
    let locked = !handle.wizard.is_editable();
    let hours_preset = OPERATING_HOUR_PRESETS
        .iter()
        .copied()
        .find(|preset| *preset != CUSTOM_HOURS && *preset == form.operating_hours)
        .unwrap_or(CUSTOM_HOURS);

    let on_hours = select_callback(handle, StationField::OperatingHours);
    let on_status = select_callback(handle, StationField::Status);

    html! {
        <>
            { text_input(handle, StationField::TotalPorts, "number", "0") }
            { text_input(handle, StationField::FastChargePorts, "number", "0") }
            { text_input(handle, StationField::StandardPorts, "number", "0") }
            { text_input(handle, StationField::PricePerUnit, "number", "e.g. 3500") }

            <label class="field">
                <span>{StationField::OperatingHours.label()}</span>
                <select onchange={on_hours} disabled={locked}>
                    { for OPERATING_HOUR_PRESETS.iter().map(|preset| html! {
                        <option value={*preset} selected={hours_preset == *preset}>{*preset}</option>
                    }) }
                </select>
            </label>
            if hours_preset == CUSTOM_HOURS {
                { text_input(handle, StationField::OperatingHours, "text", "e.g. 7:00-23:00") }
            }

            <label class="field">
                <span>{StationField::Status.label()}</span>
                <select onchange={on_status} disabled={locked}>
                    { for StationStatus::all().iter().map(|status| html! {
                        <option value={status.code()} selected={form.status == *status}>
                            {status.label()}
                        </option>
                    }) }
                </select>
            </label>
        </>
    }
}

fn amenities_step(handle: &WizardHandle) -> Html {
    let selected = &handle.wizard.form().amenities;
    let locked = !handle.wizard.is_editable();

    html! {
        <>
            <fieldset class="amenities">
                <legend>{StationField::Amenities.label()}</legend>
                { for Amenity::all().iter().map(|amenity| {
                    let amenity = *amenity;
                    let toggle = handle.toggle_amenity.clone();
                    let onchange = Callback::from(move |_: Event| toggle.emit(amenity));
                    html! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                checked={selected.contains(&amenity)}
                                disabled={locked}
                                {onchange}
                            />
                            {amenity.label()}
                        </label>
                    }
                }) }
            </fieldset>
            { text_input(handle, StationField::ContactPhone, "tel", "") }
            { text_input(handle, StationField::ContactEmail, "email", "") }
            { text_input(handle, StationField::ManagerName, "text", "") }
        </>
    }
}

fn confirmation_step(wizard: &StationWizard, context: &AppContext) -> Html {
    let request = build_request(wizard.form(), &context.defaults);
    let rating =
        |rating: Option<f64>| rating.map_or_else(|| "-".to_string(), |kw| format!("{kw} kW"));
    let amenities = if request.amenities.is_empty() {
        "None".to_string()
    } else {
        wizard
            .form()
            .amenities
            .iter()
            .map(Amenity::label)
            .collect::<Vec<_>>()
            .join(", ")
    };

    html! {
        <>
            <dl class="confirmation">
                <dt>{"Name"}</dt><dd>{&request.station_name}</dd>
                <dt>{"Address"}</dt><dd>{format!("{}, {}", request.address, request.city)}</dd>
                <dt>{"Ports"}</dt>
                <dd>{format!(
                    "{} total ({} fast, {} standard)",
                    request.total_ports, request.fast_charge_ports, request.standard_ports
                )}</dd>
                <dt>{"Fast charger rating"}</dt><dd>{rating(request.fast_charge_power_rating)}</dd>
                <dt>{"Standard charger rating"}</dt>
                <dd>{rating(request.standard_charge_power_rating)}</dd>
                <dt>{"Price"}</dt><dd>{format!("{} / kWh", request.price_per_unit)}</dd>
                <dt>{"Operating hours"}</dt><dd>{&request.operating_hours}</dd>
                <dt>{"Status"}</dt><dd>{request.status.label()}</dd>
                <dt>{"Amenities"}</dt><dd>{amenities}</dd>
            </dl>
            { field_errors(wizard) }
        </>
    }
}

/// Errors for fields not rendered on the current step, e.g. from the final gate
fn field_errors(wizard: &StationWizard) -> Html {
    if wizard.errors().is_empty() {
        return html! {};
    }

    html! {
        <ul class="field-errors">
            { for wizard.errors().iter().map(|(field, message)| html! {
                <li>{format!("{}: {message}", field.label())}</li>
            }) }
        </ul>
    }
}

fn text_input(
    handle: &WizardHandle,
    field: StationField,
    kind: &'static str,
    placeholder: &'static str,
) -> Html {
    let value = handle.wizard.form().text(field).unwrap_or_default().to_string();
    let error = handle.wizard.errors().get(field).map(str::to_string);
    let disabled = !handle.wizard.is_editable();
    let oninput = {
        let set_field = handle.set_field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_field.emit((field, FieldValue::Text(input.value())));
        })
    };

    html! {
        <label class={classes!("field", error.is_some().then_some("invalid"))}>
            <span>{field.label()}</span>
            <input
                id={field.key()}
                type={kind}
                {value}
                {placeholder}
                {disabled}
                {oninput}
                aria-invalid={error.is_some().to_string()}
            />
            if let Some(message) = error {
                <p class="field-error">{message}</p>
            }
        </label>
    }
}

fn text_area(handle: &WizardHandle, field: StationField) -> Html {
    let value = handle.wizard.form().text(field).unwrap_or_default().to_string();
    let disabled = !handle.wizard.is_editable();
    let oninput = {
        let set_field = handle.set_field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            set_field.emit((field, FieldValue::Text(input.value())));
        })
    };

    html! {
        <label class="field">
            <span>{field.label()}</span>
            <textarea id={field.key()} {value} {disabled} {oninput} rows="3" />
        </label>
    }
}

fn select_callback(handle: &WizardHandle, field: StationField) -> Callback<Event> {
    let set_field = handle.set_field.clone();
    Callback::from(move |e: Event| {
        let target: HtmlSelectElement = e.target_unchecked_into();
        set_field.emit((field, FieldValue::Text(target.value())));
    })
}
