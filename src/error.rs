//! Error types for mpit-service

use thiserror::Error;

/// Status value the tool interface returns on success (`MPI_SUCCESS`).
pub const MPI_SUCCESS: i32 = 0;

/// A non-success status code returned by the MPI tool interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    /// Check a native return code, returning Ok(()) for `MPI_SUCCESS`.
    pub fn check(code: i32) -> Result<(), StatusCode> {
        if code == MPI_SUCCESS {
            Ok(())
        } else {
            Err(StatusCode(code))
        }
    }

    /// The raw numeric status.
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failures while bringing up the MPIT service.
///
/// The display strings are the diagnostic lines written to the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Tool interface initialization failed
    #[error("MPI_T_init_thread ERROR: {0}. MPIT service disabled.")]
    InitThread(StatusCode),

    /// Performance variable session could not be created
    #[error("MPI_T_pvar_session_create ERROR: {0}. MPIT service disabled.")]
    SessionCreate(StatusCode),

    /// Querying the number of performance variables failed
    #[error("MPI_T_pvar_get_num ERROR: {0}")]
    PvarGetNum(StatusCode),

    /// Fetching the descriptor of one variable failed
    #[error("MPI_T_pvar_get_info ERROR: {code} for PVAR at index {index}")]
    PvarGetInfo {
        /// Native status
        code: StatusCode,
        /// Enumeration index of the variable
        index: usize,
    },

    /// Allocating the handle of one variable failed
    #[error("MPI_T_pvar_handle_alloc ERROR: {code} for PVAR at index {index} with name {name}")]
    HandleAlloc {
        /// Native status
        code: StatusCode,
        /// Enumeration index of the variable
        index: usize,
        /// Variable name, empty if the descriptor was unavailable
        name: String,
    },
}

impl Error {
    /// The native status code behind this error.
    pub fn code(&self) -> i32 {
        match self {
            Error::InitThread(code)
            | Error::SessionCreate(code)
            | Error::PvarGetNum(code)
            | Error::PvarGetInfo { code, .. }
            | Error::HandleAlloc { code, .. } => code.raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_success_and_failure() {
        assert_eq!(StatusCode::check(MPI_SUCCESS), Ok(()));
        assert_eq!(StatusCode::check(14), Err(StatusCode(14)));
        assert_eq!(StatusCode::check(-2), Err(StatusCode(-2)));
    }

    #[test]
    fn messages_carry_code_and_context() {
        let err = Error::InitThread(StatusCode(57));
        assert_eq!(
            err.to_string(),
            "MPI_T_init_thread ERROR: 57. MPIT service disabled."
        );

        let err = Error::HandleAlloc {
            code: StatusCode(15),
            index: 7,
            name: "posted_recvq_length".into(),
        };
        assert_eq!(
            err.to_string(),
            "MPI_T_pvar_handle_alloc ERROR: 15 for PVAR at index 7 with name posted_recvq_length"
        );
    }

    #[test]
    fn code_is_exposed() {
        assert_eq!(Error::PvarGetNum(StatusCode(3)).code(), 3);
        assert_eq!(
            Error::PvarGetInfo {
                code: StatusCode(9),
                index: 1
            }
            .code(),
            9
        );
    }
}
