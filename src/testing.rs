//! Test doubles: a scripted tool interface and per-thread log capture.

use crate::error::StatusCode;
use crate::pvar::{PvarClass, PvarDatatype, PvarInfo, Verbosity};
use crate::tool::{PvarHandle, SessionId, ToolInterface};
use crate::ThreadLevel;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

/// Tool interface whose answers are set up front.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTool {
    pub init_status: Option<i32>,
    pub session_status: Option<i32>,
    pub num_status: Option<i32>,
    pub num_pvars: usize,
    /// Indices whose descriptor query fails with the given status
    pub info_failures: Vec<(usize, i32)>,
    /// Indices whose handle allocation fails with the given status
    pub alloc_failures: Vec<(usize, i32)>,
    pub init_calls: usize,
    pub session_calls: usize,
    pub allocated: Vec<usize>,
    next_handle: i64,
}

impl ScriptedTool {
    pub fn with_pvars(num_pvars: usize) -> Self {
        ScriptedTool {
            num_pvars,
            ..Default::default()
        }
    }

    pub fn pvar_name(index: usize) -> String {
        format!("pvar_{index}")
    }
}

fn scripted(status: Option<i32>) -> Result<(), StatusCode> {
    StatusCode::check(status.unwrap_or(0))
}

impl ToolInterface for ScriptedTool {
    fn init_thread(&mut self, required: ThreadLevel) -> Result<ThreadLevel, StatusCode> {
        self.init_calls += 1;
        scripted(self.init_status)?;
        Ok(required)
    }

    fn pvar_session_create(&mut self) -> Result<SessionId, StatusCode> {
        self.session_calls += 1;
        scripted(self.session_status)?;
        Ok(SessionId(0))
    }

    fn pvar_get_num(&mut self) -> Result<usize, StatusCode> {
        scripted(self.num_status)?;
        Ok(self.num_pvars)
    }

    fn pvar_get_info(&mut self, index: usize) -> Result<PvarInfo, StatusCode> {
        if let Some(&(_, code)) = self.info_failures.iter().find(|(i, _)| *i == index) {
            return Err(StatusCode(code));
        }
        Ok(PvarInfo {
            name: Self::pvar_name(index),
            description: format!("scripted variable {index}"),
            verbosity: Some(Verbosity::UserBasic),
            class: Some(PvarClass::Counter),
            datatype: Some(PvarDatatype::UnsignedLongLong),
            readonly: true,
            continuous: true,
            ..Default::default()
        })
    }

    fn pvar_handle_alloc(
        &mut self,
        session: SessionId,
        index: usize,
    ) -> Result<(PvarHandle, usize), StatusCode> {
        assert_eq!(session, SessionId(0), "handle allocated outside the session");
        if let Some(&(_, code)) = self.alloc_failures.iter().find(|(i, _)| *i == index) {
            return Err(StatusCode(code));
        }
        self.allocated.push(index);
        let handle = PvarHandle(self.next_handle);
        self.next_handle += 1;
        Ok((handle, 1))
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Start capturing log records emitted on the current thread.
pub(crate) fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in unit tests");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

/// Records captured on the current thread at exactly `level`.
pub(crate) fn captured(level: Level) -> Vec<String> {
    CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    })
}
