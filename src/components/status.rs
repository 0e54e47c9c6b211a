use crate::hooks::data_state::LoadStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub status: LoadStatus,
    /// What is being loaded, e.g. "stations"
    pub subject: AttrValue,
}

#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    match &props.status {
        LoadStatus::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{format!("Loading {}...", props.subject)}</p>
            </div>
        },
        LoadStatus::Loaded => html! {},
        LoadStatus::Error(msg) => html! {
            <div class="status error" role="alert">
                <p>{format!("Could not load {}: ", props.subject)}{msg}</p>
            </div>
        },
    }
}
