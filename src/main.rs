use yew::prelude::*;

use station_dashboard::app_context::AppContext;
use station_dashboard::components::{
    ForecastPage, NotificationsPanel, ServicePlansPanel, StationList, StationWizardView,
};
use station_dashboard::config::StationDefaults;
use station_dashboard::services::api::DashboardClient;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Page {
    Stations,
    NewStation,
    Notifications,
    ServicePlans,
    Forecast,
}

impl Page {
    const NAV: [Page; 4] = [
        Page::Stations,
        Page::Notifications,
        Page::ServicePlans,
        Page::Forecast,
    ];

    fn title(self) -> &'static str {
        match self {
            Page::Stations => "Stations",
            Page::NewStation => "New Station",
            Page::Notifications => "Notifications",
            Page::ServicePlans => "Service Plans",
            Page::Forecast => "Demand Forecast",
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let context = use_memo((), |_| {
        DashboardClient::new().map(|client| AppContext::new(client, StationDefaults::default()))
    });
    let page = use_state(|| Page::Stations);
    let created_id = use_state(|| None::<String>);

    let navigate = {
        let page = page.clone();
        let created_id = created_id.clone();
        Callback::from(move |target: Page| {
            created_id.set(None);
            page.set(target);
        })
    };

    let body = match context.as_ref() {
        Err(e) => html! {
            <div class="status error" role="alert">
                <p>{"Dashboard unavailable: "}{e.to_string()}</p>
            </div>
        },
        Ok(context) => {
            let context = context.clone();
            match *page {
                Page::Stations => {
                    let navigate = navigate.clone();
                    html! {
                        <StationList
                            {context}
                            on_create={Callback::from(move |()| navigate.emit(Page::NewStation))}
                            created_id={(*created_id).clone()}
                        />
                    }
                }
                Page::NewStation => {
                    let on_created = {
                        let page = page.clone();
                        let created_id = created_id.clone();
                        Callback::from(move |id: String| {
                            created_id.set(Some(id));
                            page.set(Page::Stations);
                        })
                    };
                    let navigate = navigate.clone();
                    html! {
                        <StationWizardView
                            {context}
                            {on_created}
                            on_cancel={Callback::from(move |()| navigate.emit(Page::Stations))}
                        />
                    }
                }
                Page::Notifications => html! { <NotificationsPanel {context} /> },
                Page::ServicePlans => html! { <ServicePlansPanel {context} /> },
                Page::Forecast => html! { <ForecastPage {context} /> },
            }
        }
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Charging Station Dashboard"}</h1>
                <nav class="app-nav">
                    { for Page::NAV.iter().map(|target| {
                        let target = *target;
                        let navigate = navigate.clone();
                        let current = *page == target
                            || (target == Page::Stations && *page == Page::NewStation);
                        html! {
                            <button
                                class={classes!("nav-link", current.then_some("active"))}
                                onclick={Callback::from(move |_: MouseEvent| navigate.emit(target))}
                            >
                                {target.title()}
                            </button>
                        }
                    }) }
                </nav>
            </header>

            <main class="app-main">
                <h2>{page.title()}</h2>
                {body}
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
