//! OAuth device authorization grant: request a code, let the user approve it in
//! a browser, and poll for the token until approval, refusal or expiry.

pub mod device_flow;
pub mod poller;

pub use device_flow::DeviceFlow;
pub use poller::{AuthorizationOutcome, wait_for_authorization};
