// Adapters layer: concrete implementations for the external collaborators
// (remote order API over HTTP, in-process ready-notification feed).

pub mod http;
pub mod ready_feed;

pub use http::ApiClient;
pub use ready_feed::SharedReadyFeed;
