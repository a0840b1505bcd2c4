//! Outbound ports - Interfaces that the application requires from external systems

mod dispatch_port;
mod identity_port;
mod localisation_port;
mod project_source_port;

pub use dispatch_port::{ClockPort, DispatchObserver, ItemOperation};
pub use identity_port::{IdentityError, IdentityPort};
pub use localisation_port::{
    LocalisationError, LocalisationPayload, LocalisationPort, LocaliseItem,
};
pub use project_source_port::{ProjectRecord, ProjectSourceError, ProjectSourcePort};
