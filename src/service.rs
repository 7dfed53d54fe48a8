//! Host service contract.
//!
//! A profiling host knows its plugins as named [`Service`]s and activates the
//! ones enabled for a run by calling their registration callback once.

use crate::registrar::{PvarRegistrar, Registration};
use crate::tool::ToolInterface;
use crate::SERVICE_NAME;
use log::{debug, warn};

/// A plugin the host can activate.
pub trait Service {
    /// Identifier the host enables the service by.
    fn name(&self) -> &'static str;

    /// Registration callback, invoked once at activation.
    fn register(&mut self);
}

/// The MPIT service: owns the registrar state for the host.
pub struct MpitService<T: ToolInterface> {
    registrar: PvarRegistrar<T>,
    registration: Option<Registration>,
}

impl<T: ToolInterface> MpitService<T> {
    /// Create the service over `tool`.
    pub fn new(tool: T) -> Self {
        MpitService {
            registrar: PvarRegistrar::new(tool),
            registration: None,
        }
    }

    /// Registrar state, for readout by other parts of the host.
    pub fn registrar(&self) -> &PvarRegistrar<T> {
        &self.registrar
    }

    /// Mutable registrar state, e.g. to re-run handle allocation.
    pub fn registrar_mut(&mut self) -> &mut PvarRegistrar<T> {
        &mut self.registrar
    }

    /// Outcome of registration, `None` until the service was activated.
    pub fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }
}

impl<T: ToolInterface> Service for MpitService<T> {
    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    fn register(&mut self) {
        self.registration = Some(self.registrar.register());
    }
}

/// Plugin loader: the set of services available to the host.
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<Box<dyn Service>>,
    activated: Vec<&'static str>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `service` available for activation.
    pub fn add(&mut self, service: Box<dyn Service>) {
        self.services.push(service);
    }

    /// Activate the named services in order.
    ///
    /// Unknown names are logged and skipped. Each service is registered at
    /// most once over the registry's lifetime.
    pub fn activate(&mut self, names: &[&str]) {
        for &name in names {
            if self.activated.iter().any(|&n| n == name) {
                debug!(target: "mpit", "Service {name} already active");
                continue;
            }
            match self.services.iter_mut().find(|s| s.name() == name) {
                Some(service) => {
                    service.register();
                    self.activated.push(service.name());
                }
                None => warn!(target: "mpit", "Service {name} not found"),
            }
        }
    }

    /// Names of the services activated so far, in activation order.
    pub fn activated(&self) -> &[&'static str] {
        &self.activated
    }

    /// Look up a service by name.
    pub fn get(&self, name: &str) -> Option<&dyn Service> {
        self.services
            .iter()
            .find(|s| s.name() == name)
            .map(|s| &**s)
    }
}
