//! Performance variable registration and handle allocation.
//!
//! [`PvarRegistrar`] brings up the tool interface once, opens a single
//! session, and allocates one handle per exported variable. No failure
//! escapes as an error: each is logged once at error level and folded into
//! the returned [`Registration`] or [`Allocation`] so the host keeps running
//! with the feature disabled or partially populated.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # {
//! use mpit_service::{NativeTool, PvarRegistrar, Registration};
//!
//! let mut registrar = PvarRegistrar::new(NativeTool::new());
//! match registrar.register() {
//!     Registration::Enabled(allocation) => println!("{allocation:?}"),
//!     Registration::Disabled(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

use crate::config::{ConfigSet, MPIT_CONFIG};
use crate::error::Error;
use crate::handle_table::{HandleEntry, HandleTable};
use crate::tool::{SessionId, ToolInterface};
use crate::{ThreadLevel, SERVICE_NAME};
use log::{debug, error, info, warn};

/// Outcome of [`PvarRegistrar::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Tool interface and session are up; carries the first allocation round
    Enabled(Allocation),
    /// Initialization or session creation failed; nothing was enumerated
    Disabled(Error),
}

impl Registration {
    /// Whether the service came up.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Registration::Enabled(_))
    }
}

/// Outcome of one [`PvarRegistrar::allocate_handles`] round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// Every pending variable got a handle and the round was committed
    Complete {
        /// Variable count now covered by the table
        num_pvars: usize,
        /// Handles allocated in this round
        allocated: usize,
    },
    /// Allocation stopped at a failing index; the round was not committed
    Partial {
        /// Handles allocated in this round before the failure
        completed: usize,
        /// The allocation failure
        error: Error,
    },
    /// The variable count could not be queried; nothing changed
    CountUnavailable(Error),
    /// The reported count fell below the allocated entries of an
    /// uncommitted round; nothing changed and the round stays uncommitted
    CountDropped {
        /// Variable count covered by the last complete round
        num_pvars: usize,
        /// Entries allocated so far, committed or not
        allocated_entries: usize,
    },
    /// The service is not enabled; nothing was attempted
    Disabled,
}

/// Registration state of the MPIT service.
///
/// Owned by the host's service instance. All state is created by
/// [`register`](Self::register) and lives as long as the registrar; the
/// session is never closed and the tool interface never finalized.
pub struct PvarRegistrar<T: ToolInterface> {
    tool: T,
    config: ConfigSet,
    thread_level: Option<ThreadLevel>,
    session: Option<SessionId>,
    table: HandleTable,
}

impl<T: ToolInterface> PvarRegistrar<T> {
    /// Create an unregistered registrar over `tool`.
    pub fn new(tool: T) -> Self {
        PvarRegistrar {
            tool,
            config: ConfigSet::default(),
            thread_level: None,
            session: None,
            table: HandleTable::new(),
        }
    }

    /// Whether both tool interface initialization and session creation succeeded.
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Thread level provided by the tool interface, once initialized.
    pub fn thread_level(&self) -> Option<ThreadLevel> {
        self.thread_level
    }

    /// The open session, once enabled.
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    /// Allocated handles.
    pub fn handles(&self) -> &HandleTable {
        &self.table
    }

    /// Variable count covered by the last complete round.
    pub fn num_pvars(&self) -> usize {
        self.table.num_pvars()
    }

    /// Resolved `mpit` configuration.
    pub fn config(&self) -> &ConfigSet {
        &self.config
    }

    /// The underlying tool interface.
    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Mutable access to the tool interface, e.g. to query descriptors.
    pub fn tool_mut(&mut self) -> &mut T {
        &mut self.tool
    }

    /// Register the service, reading configuration from the environment.
    pub fn register(&mut self) -> Registration {
        let config = ConfigSet::init(SERVICE_NAME, MPIT_CONFIG);
        self.register_with(config)
    }

    /// Register the service with an already resolved configuration.
    ///
    /// Initializes the tool interface requesting single-threaded support,
    /// opens one session, then runs the first allocation round. On an
    /// already enabled registrar the session is kept and only another
    /// allocation round runs.
    pub fn register_with(&mut self, config: ConfigSet) -> Registration {
        if self.session.is_some() {
            warn!(target: "mpit", "MPIT service already registered; reusing its session");
            return Registration::Enabled(self.allocate_handles());
        }
        self.config = config;

        let provided = match self.tool.init_thread(ThreadLevel::Single) {
            Ok(level) => level,
            Err(code) => return Self::disable(Error::InitThread(code)),
        };
        self.thread_level = Some(provided);

        let session = match self.tool.pvar_session_create() {
            Ok(session) => session,
            Err(code) => return Self::disable(Error::SessionCreate(code)),
        };
        self.session = Some(session);

        info!(target: "mpit", "Registered MPIT service");

        Registration::Enabled(self.allocate_handles())
    }

    fn disable(err: Error) -> Registration {
        error!(target: "mpit", "{err}");
        Registration::Disabled(err)
    }

    /// Allocate handles for variables exported since the last complete round.
    ///
    /// Walks the pending index range in order. On the first allocation
    /// failure the round stops: earlier handles of the round stay in the
    /// table but `num_pvars` is not advanced. Calling again with an
    /// unchanged variable count allocates nothing.
    pub fn allocate_handles(&mut self) -> Allocation {
        let Some(session) = self.session else {
            return Allocation::Disabled;
        };

        let current = match self.tool.pvar_get_num() {
            Ok(n) => n,
            Err(code) => {
                let err = Error::PvarGetNum(code);
                let os_err = std::io::Error::last_os_error();
                error!(target: "mpit", "{err} ({os_err})");
                return Allocation::CountUnavailable(err);
            }
        };

        info!(target: "mpit", "Num PVARs exported: {current}");

        if current < self.table.len() {
            warn!(
                target: "mpit",
                "PVAR count dropped below {} allocated handles to {current}; keeping existing handles",
                self.table.len()
            );
            if !self.table.is_complete() {
                return Allocation::CountDropped {
                    num_pvars: self.table.num_pvars(),
                    allocated_entries: self.table.len(),
                };
            }
            return Allocation::Complete {
                num_pvars: self.table.num_pvars(),
                allocated: 0,
            };
        }

        self.table.reserve_for(current);

        let pending = self.table.pending(current);
        let mut allocated = 0;
        for index in pending {
            let name = match self.tool.pvar_get_info(index) {
                Ok(info) => info.name,
                Err(code) => {
                    warn!(target: "mpit", "{}", Error::PvarGetInfo { code, index });
                    String::new()
                }
            };

            match self.tool.pvar_handle_alloc(session, index) {
                Ok((handle, count)) => {
                    self.table.push(HandleEntry { handle, count });
                    allocated += 1;
                    debug!(target: "mpit", "PVAR at index {index} has name: {name}");
                }
                Err(code) => {
                    let err = Error::HandleAlloc { code, index, name };
                    error!(target: "mpit", "{err}");
                    return Allocation::Partial {
                        completed: allocated,
                        error: err,
                    };
                }
            }
        }

        self.table.commit(current);
        Allocation::Complete {
            num_pvars: current,
            allocated,
        }
    }
}
