//! Types exchanged with the call provider.

mod call;
mod status;

pub use call::{CallAttempt, CallRequest, PlacedCall};
pub use status::{AnsweredBy, CallResource, CallStatus, CallStatusSnapshot};
