use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::models::station::Amenity;
use crate::models::wizard::{
    FieldValue, StationField, StationWizard, SubmitOutcome, deliver_submission,
};

/// Handle returned by `use_station_wizard`
#[derive(Clone, PartialEq)]
pub struct WizardHandle {
    /// Snapshot of the wizard for this render
    pub wizard: Rc<StationWizard>,
    pub set_field: Callback<(StationField, FieldValue)>,
    pub toggle_amenity: Callback<Amenity>,
    pub advance: Callback<()>,
    pub retreat: Callback<()>,
    pub submit: Callback<()>,
    pub cancel: Callback<()>,
}

/// Owns one station wizard for the lifetime of the mounting component.
///
/// `on_created` receives the new station id, `on_cancel` fires after the
/// form has been discarded. A creation that settles after the host has
/// unmounted is logged but not reported.
#[hook]
pub fn use_station_wizard(
    context: AppContext,
    on_created: Callback<String>,
    on_cancel: Callback<()>,
) -> WizardHandle {
    let wizard = use_mut_ref(StationWizard::new);
    let update = use_force_update();
    let mounted = use_memo((), |_| Rc::new(Cell::new(true)));

    // Effect: Flag the host as gone on unmount
    {
        let mounted = (*mounted).clone();
        use_effect_with((), move |_| move || mounted.set(false));
    }

    let set_field = {
        let wizard = wizard.clone();
        let update = update.clone();
        Callback::from(move |(field, value): (StationField, FieldValue)| {
            wizard.borrow_mut().set_field(field, value);
            update.force_update();
        })
    };

    let toggle_amenity = {
        let wizard = wizard.clone();
        let update = update.clone();
        Callback::from(move |amenity| {
            wizard.borrow_mut().toggle_amenity(amenity);
            update.force_update();
        })
    };

    let advance = {
        let wizard = wizard.clone();
        let update = update.clone();
        Callback::from(move |()| {
            wizard.borrow_mut().advance();
            update.force_update();
        })
    };

    let retreat = {
        let wizard = wizard.clone();
        let update = update.clone();
        Callback::from(move |()| {
            wizard.borrow_mut().retreat();
            update.force_update();
        })
    };

    let submit = {
        let wizard = wizard.clone();
        let update = update.clone();
        Callback::from(move |()| {
            // Locks the wizard before the request is spawned so the
            // re-render below already shows the submit control disabled.
            let begun = wizard.borrow_mut().begin_submission(&context.defaults);
            update.force_update();

            let Ok(request) = begun else {
                return;
            };

            let wizard = wizard.clone();
            let update = update.clone();
            let client = context.client.clone();
            let on_created = on_created.clone();
            let mounted = (*mounted).clone();
            spawn_local(async move {
                let outcome = deliver_submission(&wizard, client.as_ref(), request).await;
                update.force_update();

                match &outcome {
                    SubmitOutcome::Created(id) => {
                        gloo::console::log!(&format!("Created station {id}"));
                    }
                    SubmitOutcome::Failed(failure) => {
                        gloo::console::error!(&format!(
                            "Station creation failed: {}",
                            failure.detail
                        ));
                    }
                    SubmitOutcome::Blocked(_) => {}
                }
                if let Some(id) = created_for_host(outcome, mounted.get()) {
                    on_created.emit(id);
                }
            });
        })
    };

    let cancel = {
        let wizard = wizard.clone();
        let update = update.clone();
        Callback::from(move |()| {
            if wizard.borrow().is_submitting() {
                return;
            }
            wizard.borrow_mut().cancel();
            update.force_update();
            on_cancel.emit(());
        })
    };

    let snapshot = Rc::new(wizard.borrow().clone());

    WizardHandle {
        wizard: snapshot,
        set_field,
        toggle_amenity,
        advance,
        retreat,
        submit,
        cancel,
    }
}

/// Station id to hand back to the host, if it is still there to receive it
fn created_for_host(outcome: SubmitOutcome, host_mounted: bool) -> Option<String> {
    match outcome {
        SubmitOutcome::Created(id) if host_mounted => Some(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::AppError;
    use crate::models::wizard::{SubmissionFailure, SubmitBlocked};

    #[test]
    fn created_station_reaches_mounted_host() {
        let outcome = SubmitOutcome::Created("st-1".to_string());
        assert_eq!(created_for_host(outcome, true), Some("st-1".to_string()));
    }

    #[test]
    fn created_station_after_leaving_page_is_not_reported() {
        let outcome = SubmitOutcome::Created("st-1".to_string());
        assert_eq!(created_for_host(outcome, false), None);
    }

    #[test]
    fn failures_and_blocks_are_never_reported() {
        let failed = SubmitOutcome::Failed(SubmissionFailure::from_error(&AppError::Timeout(10)));
        let blocked = SubmitOutcome::Blocked(SubmitBlocked::AlreadySubmitting);

        assert_eq!(created_for_host(failed, true), None);
        assert_eq!(created_for_host(blocked, true), None);
    }
}
