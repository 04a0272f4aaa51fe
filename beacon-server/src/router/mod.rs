mod router_command;
mod signaling_router;

pub use router_command::*;
pub use signaling_router::*;
