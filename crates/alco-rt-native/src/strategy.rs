use std::ffi::c_void;
use std::ptr::NonNull;

/// The underlying primitive that reserves memory for a checked allocation.
///
/// Returning `None` is the only failure signal; strategies must not abort on
/// their own.
pub trait AllocStrategy {
    fn allocate(&mut self, n: usize) -> Option<NonNull<u8>>;
}

impl<F> AllocStrategy for F
where
    F: FnMut(usize) -> Option<NonNull<u8>>,
{
    fn allocate(&mut self, n: usize) -> Option<NonNull<u8>> {
        self(n)
    }
}

/// The C library heap. Generated code releases these blocks with `free`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAlloc;

impl AllocStrategy for SystemAlloc {
    fn allocate(&mut self, n: usize) -> Option<NonNull<u8>> {
        // SAFETY: malloc has no preconditions; a zero-size request may yield
        // NULL or a unique pointer, both handled by the caller.
        NonNull::new(unsafe { libc::malloc(n) }.cast::<u8>())
    }
}

pub type CAllocFn = unsafe extern "C" fn(usize) -> *mut c_void;

/// A `void *(*)(size_t)` supplied by generated code (`GC_malloc`, `malloc`, ...).
#[derive(Clone, Copy)]
pub struct CAlloc(pub CAllocFn);

impl AllocStrategy for CAlloc {
    fn allocate(&mut self, n: usize) -> Option<NonNull<u8>> {
        NonNull::new(unsafe { (self.0)(n) }.cast::<u8>())
    }
}
