//! Interaction between the overlay pane and the list pane.

mod pairing;
mod registry;
mod selection;
mod session;

pub use pairing::PairingMap;
pub use registry::{ElementKey, ElementRegistry, Pane};
pub use selection::{ScrollBehavior, ScrollBlock, ScrollRequest, SelectionCoordinator};
pub use session::{LoadState, Session};
