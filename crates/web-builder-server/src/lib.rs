//! HTTP server for Visual Web Builder.
//!
//! Serves the builder UI, persists projects through a [`ProjectStore`], and
//! hosts one [`Builder`] per browser session so canvas actions are applied
//! server-side.
//!
//! [`ProjectStore`]: web_builder_core::project::ProjectStore
//! [`Builder`]: web_builder_canvas::Builder

pub mod canvas;
pub mod projects;
pub mod server;
pub mod state;
pub mod static_site;

pub use server::{build_router, start_server};
pub use state::ServerState;
pub use static_site::serve_static;
