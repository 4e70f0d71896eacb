//! Runtime support for code emitted by the alco compiler.
//!
//! Generated call sites link against this library for checked allocation
//! (`$$new`), array-bounds failure reporting (`$$oobmsg`) and the primitive
//! printers (`putint`, `putssize`, `putdbl`, `putptr`). The same behavior is
//! available to Rust callers through the typed API re-exported here.

#![allow(clippy::missing_safety_doc)]

mod checked;
mod config;
mod fatal;
pub mod ffi;
mod policy;
mod print;
mod strategy;

pub use checked::{checked_alloc, report_bounds_failure, resolve_alloc_failure};
pub use config::{config, RtConfig};
pub use fatal::{fatal, Fatal};
pub use policy::{
    BoundsHook, BoundsPolicy, CBoundsFn, CBoundsHook, COomFn, COomHook, OomHook, OomPolicy,
    OomVerdict, SourcePos,
};
pub use print::{put_dbl, put_int, put_ptr, put_ssize, write_dbl, write_int, write_ptr, write_ssize};
pub use strategy::{AllocStrategy, CAlloc, CAllocFn, SystemAlloc};
