pub mod registry;
pub mod router;
pub mod signaling;

pub use registry::{Registry, RegistryError};
pub use router::{RouterCommand, SignalingRouter};
pub use signaling::{SignalingOutput, SignalingService, ws_handler};
