//! Errors returned by the driver
use display_interface::DisplayError;
use thiserror::Error;

/// Anything that can abort an update or clean cycle.
///
/// The controller state is undefined after an error. The next cycle starts
/// with a hardware reset, so retrying the call is enough to recover.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// A bus or pin write failed while talking to the controller
    #[error("display interface error: {0:?}")]
    Interface(DisplayError),

    /// The BUSY pin could not be read
    #[error("failed to read the BUSY pin")]
    BusyPin,

    /// The controller kept BUSY asserted for the whole configured timeout
    #[error("panel still busy after {polls} status polls")]
    BusyTimeout { polls: u32 },
}

// `DisplayError` has no `PartialEq`; its variants carry no data, so the
// discriminant is the whole value.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Interface(a), Error::Interface(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            (Error::BusyPin, Error::BusyPin) => true,
            (Error::BusyTimeout { polls: a }, Error::BusyTimeout { polls: b }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Error {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Interface(e)
    }
}
