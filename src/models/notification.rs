use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Category of an operator notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Alert,
    Maintenance,
}

impl NotificationKind {
    /// Returns human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Info => "Info",
            NotificationKind::Warning => "Warning",
            NotificationKind::Alert => "Alert",
            NotificationKind::Maintenance => "Maintenance",
        }
    }

    /// Returns CSS class name for color coding
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "notification-info",
            NotificationKind::Warning => "notification-warning",
            NotificationKind::Alert => "notification-alert",
            NotificationKind::Maintenance => "notification-maintenance",
        }
    }

    pub fn all() -> &'static [NotificationKind] {
        &[
            NotificationKind::Info,
            NotificationKind::Warning,
            NotificationKind::Alert,
            NotificationKind::Maintenance,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Counts shown in the header of the notifications page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationSummary {
    pub total: usize,
    pub unread: usize,
    pub info: usize,
    pub warning: usize,
    pub alert: usize,
    pub maintenance: usize,
}

impl NotificationSummary {
    pub fn from_notifications(notifications: &[Notification]) -> Self {
        notifications
            .iter()
            .fold(Self::default(), |mut summary, notification| {
                summary.total += 1;
                if !notification.read {
                    summary.unread += 1;
                }
                *summary.count_mut(notification.kind) += 1;
                summary
            })
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        match kind {
            NotificationKind::Info => self.info,
            NotificationKind::Warning => self.warning,
            NotificationKind::Alert => self.alert,
            NotificationKind::Maintenance => self.maintenance,
        }
    }

    fn count_mut(&mut self, kind: NotificationKind) -> &mut usize {
        match kind {
            NotificationKind::Info => &mut self.info,
            NotificationKind::Warning => &mut self.warning,
            NotificationKind::Alert => &mut self.alert,
            NotificationKind::Maintenance => &mut self.maintenance,
        }
    }
}

/// Client-side view filter, persisted between visits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    pub kind: Option<NotificationKind>,
    pub unread_only: bool,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        self.kind.is_none_or(|kind| kind == notification.kind)
            && (!self.unread_only || !notification.read)
    }

    pub fn apply(&self, notifications: &[Notification]) -> Vec<Notification> {
        notifications
            .iter()
            .filter(|n| self.matches(n))
            .cloned()
            .collect()
    }
}

/// Notifications created on one calendar day (UTC)
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub notifications: Vec<Notification>,
}

impl DayGroup {
    /// Heading such as "Today", "Yesterday" or "Mon 06 Oct 2025"
    pub fn heading(&self, today: NaiveDate) -> String {
        match (today - self.day).num_days() {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            _ => self.day.format("%a %d %b %Y").to_string(),
        }
    }
}

/// Groups notifications by UTC day, newest day first and newest first within a day.
pub fn group_by_day(notifications: &[Notification]) -> Vec<DayGroup> {
    let mut sorted = notifications.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut groups: Vec<DayGroup> = Vec::new();
    for notification in sorted {
        let day = notification.created_at.date_naive();
        match groups.last_mut() {
            Some(group) if group.day == day => group.notifications.push(notification),
            _ => groups.push(DayGroup {
                day,
                notifications: vec![notification],
            }),
        }
    }
    groups
}
