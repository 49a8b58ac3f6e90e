mod completion;
mod demand;
mod oneshot_subscriber;
mod request_publisher;
mod subscriber;
mod subscription;

pub use completion::*;
pub use demand::*;
pub(crate) use oneshot_subscriber::*;
pub use request_publisher::*;
pub use subscriber::*;
pub use subscription::*;
