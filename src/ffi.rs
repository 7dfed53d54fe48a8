//! Raw FFI bindings to the MPI_T shim.
//!
//! These are low-level unsafe functions. Use [`NativeTool`](crate::NativeTool).

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int};

// Type aliases matching the C header
pub type int32_t = i32;
pub type int64_t = i64;

/// Status the Rust side reports for an index that does not fit a C int.
pub const MPIT_SHIM_ERR_INDEX_RANGE: c_int = -3;

extern "C" {
    pub fn mpit_shim_init_thread(required: c_int, provided: *mut c_int) -> c_int;

    pub fn mpit_shim_pvar_get_num(num: *mut c_int) -> c_int;

    pub fn mpit_shim_pvar_get_info_lengths(
        index: c_int,
        name_len: *mut c_int,
        desc_len: *mut c_int,
    ) -> c_int;

    pub fn mpit_shim_pvar_get_info(
        index: c_int,
        name: *mut c_char,
        name_len: *mut c_int,
        verbosity: *mut c_int,
        var_class: *mut c_int,
        datatype: *mut c_int,
        has_enumtype: *mut c_int,
        desc: *mut c_char,
        desc_len: *mut c_int,
        bind: *mut c_int,
        readonly: *mut c_int,
        continuous: *mut c_int,
        atomic: *mut c_int,
    ) -> c_int;

    pub fn mpit_shim_pvar_session_create(session: *mut int32_t) -> c_int;

    pub fn mpit_shim_pvar_handle_alloc(
        session: int32_t,
        index: c_int,
        handle: *mut int64_t,
        count: *mut c_int,
    ) -> c_int;
}
