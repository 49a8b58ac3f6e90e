use crate::prelude::*;

/// The terminal signal of a subscription.
#[derive(Enum, Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Finished,
    Failure { error: RequestError },
}

impl From<Completion> for Result<(), RequestError> {
    fn from(value: Completion) -> Self {
        match value {
            Completion::Finished => Ok(()),
            Completion::Failure { error } => Err(error),
        }
    }
}
