//! Starledger backend library.
//!
//! Issues stable 8-digit exchange handles for external account ids and keeps
//! a star balance per handle. The crate follows a hexagonal layout:
//! [`domain`] holds types, services and ports, [`inbound`] adapts HTTP
//! requests onto the driving ports and [`outbound`] implements the driven
//! ports against PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;
