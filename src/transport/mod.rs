mod http_transport;
mod native;
mod transport_failure;
mod transport_outcome;
mod transport_outcome_listener;
mod transport_response;

pub use http_transport::*;
pub use native::*;
pub use transport_failure::*;
pub use transport_outcome::*;
pub use transport_outcome_listener::*;
pub use transport_response::*;
