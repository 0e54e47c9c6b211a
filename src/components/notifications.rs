use chrono::Utc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::app_context::AppContext;
use crate::components::status::Status;
use crate::hooks::use_notifications::{use_notification_filter, use_notifications};
use crate::models::notification::{
    Notification, NotificationFilter, NotificationKind, NotificationSummary, group_by_day,
};

#[derive(Properties, PartialEq)]
pub struct NotificationsPanelProps {
    pub context: AppContext,
}

#[function_component(NotificationsPanel)]
pub fn notifications_panel(props: &NotificationsPanelProps) -> Html {
    let handle = use_notifications(props.context.clone());
    let filter = use_notification_filter();
    let today = Utc::now().date_naive();

    let on_kind = {
        let set_filter = filter.set_filter.clone();
        let current = filter.filter;
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            let kind = NotificationKind::all()
                .iter()
                .find(|k| k.label() == target.value())
                .copied();
            set_filter.emit(NotificationFilter { kind, ..current });
        })
    };

    let on_unread_only = {
        let set_filter = filter.set_filter.clone();
        let current = filter.filter;
        Callback::from(move |_: Event| {
            set_filter.emit(NotificationFilter {
                unread_only: !current.unread_only,
                ..current
            });
        })
    };

    let on_mark_all = {
        let mark_all_read = handle.mark_all_read.clone();
        Callback::from(move |_: MouseEvent| mark_all_read.emit(()))
    };

    html! {
        <div class="notifications">
            <Status status={handle.state.list.status()} subject="notifications" />

            if let Some(error) = &handle.state.action_error {
                <div class="status error" role="alert"><p>{error}</p></div>
            }

            if let Some(list) = handle.state.list.data() {
                { summary_grid(&NotificationSummary::from_notifications(list)) }

                <div class="page-toolbar">
                    <select onchange={on_kind} aria-label="Filter by type">
                        <option value="" selected={filter.filter.kind.is_none()}>{"All types"}</option>
                        { for NotificationKind::all().iter().map(|kind| html! {
                            <option value={kind.label()} selected={filter.filter.kind == Some(*kind)}>
                                {kind.label()}
                            </option>
                        }) }
                    </select>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            checked={filter.filter.unread_only}
                            onchange={on_unread_only}
                        />
                        {"Unread only"}
                    </label>
                    <button class="secondary" onclick={on_mark_all}>{"Mark all as read"}</button>
                </div>

                {
                    day_groups(
                        &filter.filter.apply(list),
                        today,
                        &handle.mark_read,
                        &handle.remove,
                    )
                }
            }
        </div>
    }
}

fn summary_grid(summary: &NotificationSummary) -> Html {
    html! {
        <div class="summary-grid">
            <div class="summary-item">
                <h3>{"Total"}</h3>
                <p class="summary-value">{summary.total}</p>
            </div>
            <div class="summary-item">
                <h3>{"Unread"}</h3>
                <p class="summary-value">{summary.unread}</p>
            </div>
            { for NotificationKind::all().iter().map(|kind| html! {
                <div class={classes!("summary-item", kind.css_class())}>
                    <h3>{kind.label()}</h3>
                    <p class="summary-value">{summary.count(*kind)}</p>
                </div>
            }) }
        </div>
    }
}

fn day_groups(
    notifications: &[Notification],
    today: chrono::NaiveDate,
    mark_read: &Callback<String>,
    remove: &Callback<String>,
) -> Html {
    if notifications.is_empty() {
        return html! { <p class="empty">{"No notifications"}</p> };
    }

    html! {
        <div class="day-groups">
            { for group_by_day(notifications).into_iter().map(|group| html! {
                <section class="day-group" key={group.day.to_string()}>
                    <h3>{group.heading(today)}</h3>
                    <ul>
                        { for group.notifications.iter().map(|n| notification_row(n, mark_read, remove)) }
                    </ul>
                </section>
            }) }
        </div>
    }
}

fn notification_row(
    notification: &Notification,
    mark_read: &Callback<String>,
    remove: &Callback<String>,
) -> Html {
    let on_read = {
        let mark_read = mark_read.clone();
        let id = notification.id.clone();
        Callback::from(move |_: MouseEvent| mark_read.emit(id.clone()))
    };
    let on_remove = {
        let remove = remove.clone();
        let id = notification.id.clone();
        Callback::from(move |_: MouseEvent| remove.emit(id.clone()))
    };

    html! {
        <li
            key={notification.id.clone()}
            class={classes!(
                "notification",
                notification.kind.css_class(),
                (!notification.read).then_some("unread"),
            )}
        >
            <div class="notification-header">
                <span class="badge">{notification.kind.label()}</span>
                <strong>{&notification.title}</strong>
                <time>{notification.created_at.format("%H:%M").to_string()}</time>
            </div>
            <p>{&notification.message}</p>
            <div class="notification-actions">
                if !notification.read {
                    <button class="link" onclick={on_read}>{"Mark as read"}</button>
                }
                <button class="link danger" onclick={on_remove}>{"Delete"}</button>
            </div>
        </li>
    }
}
