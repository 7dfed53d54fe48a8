//! The MPI tool information interface boundary.
//!
//! [`ToolInterface`] is the set of MPI_T calls the registrar depends on.
//! [`NativeTool`](crate::NativeTool) implements it over the C shim when the
//! `native` feature is enabled; tests substitute a scripted implementation.

use crate::error::StatusCode;
use crate::pvar::PvarInfo;
use crate::ThreadLevel;

/// Opaque id of an open performance variable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub i32);

/// Opaque handle to one allocated performance variable.
///
/// Must be held to read the variable's value later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PvarHandle(pub i64);

/// Calls into the MPI tool information interface.
///
/// Every method reports failure as the raw non-success [`StatusCode`];
/// attaching context is the caller's job.
pub trait ToolInterface {
    /// Initialize the tool interface, returning the thread level provided.
    fn init_thread(&mut self, required: ThreadLevel) -> Result<ThreadLevel, StatusCode>;

    /// Open a performance variable session.
    fn pvar_session_create(&mut self) -> Result<SessionId, StatusCode>;

    /// Number of performance variables currently exported.
    fn pvar_get_num(&mut self) -> Result<usize, StatusCode>;

    /// Descriptor of the variable at `index`.
    fn pvar_get_info(&mut self, index: usize) -> Result<PvarInfo, StatusCode>;

    /// Allocate a handle for the variable at `index` within `session`.
    ///
    /// Returns the handle and the number of counter elements it reads.
    fn pvar_handle_alloc(
        &mut self,
        session: SessionId,
        index: usize,
    ) -> Result<(PvarHandle, usize), StatusCode>;
}
