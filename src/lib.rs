mod publisher;
mod request;
mod request_error;
mod transport;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::publisher::*;
    pub use crate::request::*;
    pub use crate::request_error::*;
    pub use crate::transport::*;

    pub(crate) use log::{debug, info, warn};
    pub(crate) use serde::{Deserialize, Serialize};
    pub(crate) use serde_json::{Map, Value};
    pub(crate) use std::collections::HashMap;
    pub(crate) use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
    pub(crate) use tokio::sync::oneshot::{channel, Sender};
    pub(crate) use uniffi::{export, Enum, Error, Object, Record};
}

pub use prelude::*;

uniffi::setup_scaffolding!();
