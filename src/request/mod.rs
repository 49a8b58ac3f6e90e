mod configuration_error;
mod http_method;
mod network_request;
mod parameter_encoding;
mod percent_encoding;
mod request_descriptor;

pub use configuration_error::*;
pub use http_method::*;
pub use network_request::*;
pub use parameter_encoding::*;
pub(crate) use percent_encoding::*;
pub use request_descriptor::*;
