use std::rc::Rc;

use crate::config::StationDefaults;
use crate::services::api::DashboardClient;

/// Shared collaborators built once by the app root and passed to every page
/// as a prop.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub client: Rc<DashboardClient>,
    pub defaults: Rc<StationDefaults>,
}

impl AppContext {
    pub fn new(client: DashboardClient, defaults: StationDefaults) -> Self {
        Self {
            client: Rc::new(client),
            defaults: Rc::new(defaults),
        }
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && Rc::ptr_eq(&self.defaults, &other.defaults)
    }
}
