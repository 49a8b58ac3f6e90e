mod reqwest_transport;
mod transport_config;

pub use reqwest_transport::*;
pub use transport_config::*;
