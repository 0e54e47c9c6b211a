use std::rc::Rc;

/// Lifecycle of data fetched from the backend
#[derive(Clone, PartialEq, Debug)]
pub enum DataState<T> {
    Loading,
    Loaded(Rc<T>),
    Error(String),
}

impl<T> DataState<T> {
    /// Returns true if the state is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<T>> {
        match self {
            DataState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DataState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Drops the payload, keeping only what the status banner needs
    pub fn status(&self) -> LoadStatus {
        match self {
            DataState::Loading => LoadStatus::Loading,
            DataState::Loaded(_) => LoadStatus::Loaded,
            DataState::Error(msg) => LoadStatus::Error(msg.clone()),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Error(String),
}
