//! [`ToolInterface`] over the system MPI library.
//!
//! Only available with the `native` feature, which compiles the C shim and
//! links MPI.

use crate::error::StatusCode;
use crate::ffi;
use crate::pvar::{Binding, PvarClass, PvarDatatype, PvarInfo, Verbosity};
use crate::tool::{PvarHandle, SessionId, ToolInterface};
use crate::ThreadLevel;
use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int};

/// The MPI tool information interface of the linked MPI library.
///
/// # Example
///
/// ```no_run
/// use mpit_service::{NativeTool, ThreadLevel, ToolInterface};
///
/// let mut tool = NativeTool::new();
/// tool.init_thread(ThreadLevel::Single).unwrap();
/// println!("{} PVARs", tool.pvar_get_num().unwrap());
/// ```
pub struct NativeTool {
    /// Marker to make NativeTool !Send and !Sync
    _marker: PhantomData<*const ()>,
}

impl NativeTool {
    /// Create a handle to the tool interface. Nothing is called until used.
    pub fn new() -> Self {
        NativeTool {
            _marker: PhantomData,
        }
    }
}

impl Default for NativeTool {
    fn default() -> Self {
        Self::new()
    }
}

fn c_index(index: usize) -> Result<c_int, StatusCode> {
    c_int::try_from(index).map_err(|_| StatusCode(ffi::MPIT_SHIM_ERR_INDEX_RANGE))
}

/// Decode a NUL-terminated buffer written by MPI.
fn decode(buf: &[u8]) -> String {
    match CStr::from_bytes_until_nul(buf) {
        Ok(s) => s.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(buf).into_owned(),
    }
}

impl ToolInterface for NativeTool {
    fn init_thread(&mut self, required: ThreadLevel) -> Result<ThreadLevel, StatusCode> {
        let mut provided: c_int = 0;
        let ret = unsafe { ffi::mpit_shim_init_thread(required as c_int, &mut provided) };
        StatusCode::check(ret)?;
        Ok(match provided {
            0 => ThreadLevel::Single,
            1 => ThreadLevel::Funneled,
            2 => ThreadLevel::Serialized,
            _ => ThreadLevel::Multiple,
        })
    }

    fn pvar_session_create(&mut self) -> Result<SessionId, StatusCode> {
        let mut session: i32 = -1;
        let ret = unsafe { ffi::mpit_shim_pvar_session_create(&mut session) };
        StatusCode::check(ret)?;
        Ok(SessionId(session))
    }

    fn pvar_get_num(&mut self) -> Result<usize, StatusCode> {
        let mut num: c_int = 0;
        let ret = unsafe { ffi::mpit_shim_pvar_get_num(&mut num) };
        StatusCode::check(ret)?;
        Ok(num.max(0) as usize)
    }

    fn pvar_get_info(&mut self, index: usize) -> Result<PvarInfo, StatusCode> {
        let index = c_index(index)?;

        // First pass only reports the buffer sizes, terminator included.
        let mut name_len: c_int = 0;
        let mut desc_len: c_int = 0;
        let ret =
            unsafe { ffi::mpit_shim_pvar_get_info_lengths(index, &mut name_len, &mut desc_len) };
        StatusCode::check(ret)?;

        let mut name = vec![0u8; name_len.max(1) as usize];
        let mut desc = vec![0u8; desc_len.max(1) as usize];
        name_len = name.len() as c_int;
        desc_len = desc.len() as c_int;

        let (mut verbosity, mut class, mut datatype, mut has_enumtype) = (0, 0, 0, 0);
        let (mut bind, mut readonly, mut continuous, mut atomic) = (0, 0, 0, 0);
        // SAFETY: name and desc are writable for name_len/desc_len bytes and
        // every scalar out-pointer refers to a live local.
        let ret = unsafe {
            ffi::mpit_shim_pvar_get_info(
                index,
                name.as_mut_ptr().cast::<c_char>(),
                &mut name_len,
                &mut verbosity,
                &mut class,
                &mut datatype,
                &mut has_enumtype,
                desc.as_mut_ptr().cast::<c_char>(),
                &mut desc_len,
                &mut bind,
                &mut readonly,
                &mut continuous,
                &mut atomic,
            )
        };
        StatusCode::check(ret)?;

        Ok(PvarInfo {
            name: decode(&name),
            description: decode(&desc),
            verbosity: Verbosity::from_tag(verbosity),
            class: PvarClass::from_tag(class),
            datatype: PvarDatatype::from_tag(datatype),
            has_enumtype: has_enumtype != 0,
            binding: Binding::from_tag(bind),
            readonly: readonly != 0,
            continuous: continuous != 0,
            atomic: atomic != 0,
        })
    }

    fn pvar_handle_alloc(
        &mut self,
        session: SessionId,
        index: usize,
    ) -> Result<(PvarHandle, usize), StatusCode> {
        let index = c_index(index)?;
        let mut handle: i64 = -1;
        let mut count: c_int = 0;
        let ret =
            unsafe { ffi::mpit_shim_pvar_handle_alloc(session.0, index, &mut handle, &mut count) };
        StatusCode::check(ret)?;
        Ok((PvarHandle(handle), count.max(0) as usize))
    }
}
