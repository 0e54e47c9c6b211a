pub mod api;
pub mod retry;
