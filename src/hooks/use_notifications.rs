use std::cell::Cell;
use std::rc::Rc;

use gloo_storage::Storage;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::config::Config;
use crate::hooks::data_state::DataState;
use crate::models::notification::{Notification, NotificationFilter};

/// Notification list plus the outcome of the last mutation
#[derive(Clone, PartialEq, Debug)]
pub struct NotificationsState {
    pub list: DataState<Vec<Notification>>,
    pub action_error: Option<String>,
}

impl Default for NotificationsState {
    fn default() -> Self {
        Self {
            list: DataState::Loading,
            action_error: None,
        }
    }
}

pub enum NotificationsAction {
    Loaded(Vec<Notification>),
    LoadFailed(String),
    MarkedRead(String),
    MarkedAllRead,
    Removed(String),
    ActionFailed(String),
}

impl Reducible for NotificationsState {
    type Action = NotificationsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let current = self.list.data().map(|list| list.as_ref().clone());
        let with_list = |list: Vec<Notification>| {
            Rc::new(Self {
                list: DataState::Loaded(Rc::new(list)),
                action_error: None,
            })
        };

        match action {
            NotificationsAction::Loaded(list) => with_list(list),
            NotificationsAction::LoadFailed(msg) => Rc::new(Self {
                list: DataState::Error(msg),
                action_error: None,
            }),
            NotificationsAction::MarkedRead(id) => match current {
                Some(mut list) => {
                    if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                        n.read = true;
                    }
                    with_list(list)
                }
                None => self,
            },
            NotificationsAction::MarkedAllRead => match current {
                Some(mut list) => {
                    list.iter_mut().for_each(|n| n.read = true);
                    with_list(list)
                }
                None => self,
            },
            NotificationsAction::Removed(id) => match current {
                Some(mut list) => {
                    list.retain(|n| n.id != id);
                    with_list(list)
                }
                None => self,
            },
            NotificationsAction::ActionFailed(msg) => Rc::new(Self {
                list: self.list.clone(),
                action_error: Some(msg),
            }),
        }
    }
}

/// Handle returned by `use_notifications`
#[derive(Clone, PartialEq)]
pub struct NotificationsHandle {
    pub state: Rc<NotificationsState>,
    pub mark_read: Callback<String>,
    pub mark_all_read: Callback<()>,
    pub remove: Callback<String>,
}

/// Notification list with read/delete operations, polled while mounted.
#[hook]
pub fn use_notifications(context: AppContext) -> NotificationsHandle {
    let state = use_reducer(NotificationsState::default);
    let trigger = use_state(|| 0u32); // Polling trigger

    {
        let dispatcher = state.dispatcher();
        let trigger_value = *trigger;

        use_effect_with((trigger_value, context.clone()), move |(_, context)| {
            let client = context.client.clone();
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            spawn_local(async move {
                match client.fetch_notifications().await {
                    Ok(list) if !aborted_check.get() => {
                        dispatcher.dispatch(NotificationsAction::Loaded(list));
                    }
                    Err(e) if !aborted_check.get() => {
                        dispatcher.dispatch(NotificationsAction::LoadFailed(e.to_string()));
                    }
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

    let mark_read = {
        let dispatcher = state.dispatcher();
        let client = context.client.clone();
        Callback::from(move |id: String| {
            let dispatcher = dispatcher.clone();
            let client = client.clone();
            spawn_local(async move {
                match client.mark_notification_read(&id).await {
                    Ok(()) => dispatcher.dispatch(NotificationsAction::MarkedRead(id)),
                    Err(e) => report_failure(&dispatcher, "mark notification as read", &e),
                }
            });
        })
    };

    let mark_all_read = {
        let dispatcher = state.dispatcher();
        let client = context.client.clone();
        Callback::from(move |()| {
            let dispatcher = dispatcher.clone();
            let client = client.clone();
            spawn_local(async move {
                match client.mark_all_notifications_read().await {
                    Ok(()) => dispatcher.dispatch(NotificationsAction::MarkedAllRead),
                    Err(e) => report_failure(&dispatcher, "mark all notifications as read", &e),
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
            spawn_local(async move {
                match client.delete_notification(&id).await {
                    Ok(()) => dispatcher.dispatch(NotificationsAction::Removed(id)),
                    Err(e) => report_failure(&dispatcher, "delete notification", &e),
                }
            });
        })
    };

    NotificationsHandle {
        state: Rc::new((*state).clone()),
        mark_read,
        mark_all_read,
        remove,
    }
}

fn report_failure(
    dispatcher: &UseReducerDispatcher<NotificationsState>,
    what: &str,
    error: &crate::models::error::AppError,
) {
    gloo::console::error!(&format!("Failed to {what}: {error}"));
    dispatcher.dispatch(NotificationsAction::ActionFailed(format!(
        "Could not {what}. Please try again."
    )));
}

/// Handle returned by `use_notification_filter`
#[derive(Clone, PartialEq)]
pub struct FilterHandle {
    pub filter: NotificationFilter,
    pub set_filter: Callback<NotificationFilter>,
}

/// Notification view filter with localStorage persistence
#[hook]
pub fn use_notification_filter() -> FilterHandle {
    let filter = use_state(|| load_filter_preference().unwrap_or_default());

    // Effect: Persist filter to localStorage on change
    {
        let filter_value = *filter;
        use_effect_with(filter_value, move |filter| {
            save_filter_preference(*filter);
            || ()
        });
    }

    let set_filter = {
        let filter = filter.clone();
        Callback::from(move |new_filter| filter.set(new_filter))
    };

    FilterHandle {
        filter: *filter,
        set_filter,
    }
}

fn load_filter_preference() -> Option<NotificationFilter> {
    gloo_storage::LocalStorage::get(Config::NOTIFICATION_FILTER_KEY).ok()
}

fn save_filter_preference(filter: NotificationFilter) {
    if let Err(e) = gloo_storage::LocalStorage::set(Config::NOTIFICATION_FILTER_KEY, filter) {
        gloo::console::warn!(&format!("Failed to save notification filter: {e:?}"));
    }
}
