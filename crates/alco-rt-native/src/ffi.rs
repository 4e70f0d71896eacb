//! Symbols the alco compiler emits calls to. Keep in sync with
//! `include/alco_rt.h`.

use std::ffi::{c_int, c_void};

use crate::checked::{checked_alloc, report_bounds_failure};
use crate::policy::{BoundsPolicy, CBoundsFn, CBoundsHook, COomFn, COomHook, OomPolicy, SourcePos};
use crate::print::{put_dbl, put_int, put_ptr, put_ssize};
use crate::strategy::{CAlloc, CAllocFn, SystemAlloc};

/// `void *$$new(size_t n, unsigned line, unsigned col, bool (*oom)(...), void *(*alloc)(size_t))`
///
/// A null `alloc` falls back to the C library `malloc`.
#[export_name = "$$new"]
pub unsafe extern "C" fn alco_new(
    n: usize,
    line: u32,
    col: u32,
    oom: Option<COomFn>,
    alloc: Option<CAllocFn>,
) -> *mut c_void {
    let pos = SourcePos::new(line, col);
    let mut hook = oom.map(COomHook);
    let mut policy = match hook.as_mut() {
        Some(h) => OomPolicy::Custom(h),
        None => OomPolicy::Default,
    };
    let block = match alloc {
        Some(f) => checked_alloc(n, pos, &mut policy, &mut CAlloc(f)),
        None => checked_alloc(n, pos, &mut policy, &mut SystemAlloc),
    };
    block.map_or(std::ptr::null_mut(), |p| p.as_ptr().cast())
}

/// `void $$oobmsg(unsigned line, unsigned col, void (*bounds)(unsigned, unsigned))`
#[export_name = "$$oobmsg"]
pub unsafe extern "C" fn alco_oobmsg(line: u32, col: u32, bounds: Option<CBoundsFn>) -> ! {
    let mut hook = bounds.map(CBoundsHook);
    let mut policy = match hook.as_mut() {
        Some(h) => BoundsPolicy::Custom(h),
        None => BoundsPolicy::Default,
    };
    report_bounds_failure(SourcePos::new(line, col), &mut policy)
}

#[no_mangle]
pub extern "C" fn putint(i: c_int) {
    put_int(i)
}

#[no_mangle]
pub extern "C" fn putssize(i: isize) {
    put_ssize(i)
}

#[no_mangle]
pub extern "C" fn putdbl(d: f64) {
    put_dbl(d)
}

#[no_mangle]
pub extern "C" fn putptr(p: *const c_void) {
    put_ptr(p)
}
