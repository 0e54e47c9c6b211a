use yew::prelude::*;

use crate::app_context::AppContext;
use crate::components::status::Status;
use crate::hooks::use_stations::use_stations;
use crate::models::station::StationCounts;

#[derive(Properties, PartialEq)]
pub struct StationListProps {
    pub context: AppContext,
    pub on_create: Callback<()>,
    /// Id of a station created during this visit, highlighted in the table
    #[prop_or_default]
    pub created_id: Option<String>,
}

#[function_component(StationList)]
pub fn station_list(props: &StationListProps) -> Html {
    let state = use_stations(props.context.clone());

    let on_create = {
        let on_create = props.on_create.clone();
        Callback::from(move |_: MouseEvent| on_create.emit(()))
    };

    html! {
        <div class="station-list">
            <div class="page-toolbar">
                <button class="primary" onclick={on_create}>{"Add station"}</button>
            </div>

            if props.created_id.is_some() {
                <div class="status success">
                    <p>{"Station created successfully"}</p>
                </div>
            }

            <Status status={state.status()} subject="stations" />

            if let Some(stations) = state.data() {
                { counts_grid(StationCounts::from_stations(stations)) }
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Address"}</th>
                            <th>{"Status"}</th>
                            <th>{"Ports"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for stations.iter().map(|station| {
                            let highlighted = props.created_id.as_deref() == Some(station.id.as_str());
                            let ports = match station.available_ports {
                                Some(available) => format!("{available} / {}", station.total_ports),
                                None => station.total_ports.to_string(),
                            };
                            html! {
                                <tr key={station.id.clone()} class={classes!(highlighted.then_some("highlight"))}>
                                    <td>{&station.station_name}</td>
                                    <td>{format!("{}, {}", station.address, station.city)}</td>
                                    <td>
                                        <span class={classes!("badge", station.status.css_class())}>
                                            {station.status.label()}
                                        </span>
                                    </td>
                                    <td>{ports}</td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            }
        </div>
    }
}

fn counts_grid(counts: StationCounts) -> Html {
    html! {
        <div class="summary-grid">
            <div class="summary-item">
                <h3>{"Stations"}</h3>
                <p class="summary-value">{counts.total}</p>
            </div>
            <div class="summary-item">
                <h3>{"Active"}</h3>
                <p class="summary-value">{counts.active}</p>
            </div>
            <div class="summary-item">
                <h3>{"Maintenance"}</h3>
                <p class="summary-value">{counts.maintenance}</p>
            </div>
            <div class="summary-item">
                <h3>{"Offline"}</h3>
                <p class="summary-value">{counts.offline}</p>
            </div>
            <div class="summary-item">
                <h3>{"Charging ports"}</h3>
                <p class="summary-value">{counts.ports}</p>
            </div>
        </div>
    }
}
