pub mod app;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod fragment;
pub mod models;
pub mod page;
pub mod refresh;
pub mod state;

pub use app::{Bindings, Cascade};
pub use config::{load_snapshot, resolve_config};
pub use fetch::{FragmentSource, HttpFragmentSource};
pub use refresh::{Refresh, Refreshers};
pub use state::PageState;
