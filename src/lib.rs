//! # mpit-service
//!
//! A profiling-host service that exposes MPI implementation-level
//! performance variables (MPI_T PVARs).
//!
//! On activation the service initializes the MPI tool information
//! interface, opens one performance variable session, enumerates the
//! exported variables and allocates a handle for each, keeping them in a
//! [`HandleTable`] for later readout by the host.
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # {
//! use mpit_service::{MpitService, NativeTool, ServiceRegistry};
//!
//! let mut registry = ServiceRegistry::new();
//! registry.add(Box::new(MpitService::new(NativeTool::new())));
//! registry.activate(&["mpit"]);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Description |
//! |----------|-------------|
//! | `native` | Compile the C shim and link the system MPI library ([`NativeTool`]) |
//!
//! Without `native` the crate is pure Rust; any [`ToolInterface`]
//! implementation can drive the registrar.
//!
//! ## Failure model
//!
//! Nothing here aborts the host. Each failure is logged once under the
//! `mpit` log target and reported through [`Registration`] or
//! [`Allocation`]:
//!
//! - tool interface or session failure: the service stays disabled
//! - variable count failure: enabled, table unchanged
//! - handle allocation failure at index `k`: handles before `k` are kept,
//!   the round is not committed

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod config;
mod error;
#[cfg(feature = "native")]
mod ffi;
mod handle_table;
#[cfg(feature = "native")]
mod native;
mod pvar;
mod registrar;
mod service;
#[cfg(test)]
mod testing;
mod tool;

pub use config::{ConfigEntry, ConfigSet, MPIT_CONFIG};
pub use error::{Error, StatusCode, MPI_SUCCESS};
pub use handle_table::{HandleEntry, HandleTable};
#[cfg(feature = "native")]
pub use native::NativeTool;
pub use pvar::{Binding, PvarClass, PvarDatatype, PvarInfo, Verbosity};
pub use registrar::{Allocation, PvarRegistrar, Registration};
pub use service::{MpitService, Service, ServiceRegistry};
pub use tool::{PvarHandle, SessionId, ToolInterface};

/// Name the host enables this service by; also its configuration namespace.
pub const SERVICE_NAME: &str = "mpit";

/// MPI thread support levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum ThreadLevel {
    /// Only single-threaded execution
    Single = 0,
    /// Multi-threaded, but MPI calls only from main thread
    Funneled = 1,
    /// Multi-threaded, but MPI calls serialized by user
    Serialized = 2,
    /// Full multi-threaded support
    Multiple = 3,
}
