//! Failure policies for allocation and bounds checks.
//!
//! Generated code passes either a hook or nothing. Both arrive here as a
//! policy value: `Default` when the call site has no hook, `Custom` otherwise.

use std::fmt;

/// 1-based source position embedded by the compiler at the call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourcePos {
    pub line: u32,
    pub col: u32,
}

impl SourcePos {
    pub const fn new(line: u32, col: u32) -> Self {
        SourcePos { line, col }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// What an out-of-memory hook decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OomVerdict {
    Fatal,
    Recover,
}

impl OomVerdict {
    /// C convention: nonzero means fatal.
    pub const fn from_c(flag: u8) -> Self {
        if flag != 0 {
            OomVerdict::Fatal
        } else {
            OomVerdict::Recover
        }
    }
}

impl From<bool> for OomVerdict {
    fn from(fatal: bool) -> Self {
        if fatal {
            OomVerdict::Fatal
        } else {
            OomVerdict::Recover
        }
    }
}

pub trait OomHook {
    fn on_oom(&mut self, n: usize, pos: SourcePos) -> OomVerdict;
}

impl<F> OomHook for F
where
    F: FnMut(usize, SourcePos) -> OomVerdict,
{
    fn on_oom(&mut self, n: usize, pos: SourcePos) -> OomVerdict {
        self(n, pos)
    }
}

/// Bounds hooks observe the failure; they cannot stop termination.
pub trait BoundsHook {
    fn on_bounds(&mut self, pos: SourcePos);
}

impl<F> BoundsHook for F
where
    F: FnMut(SourcePos),
{
    fn on_bounds(&mut self, pos: SourcePos) {
        self(pos)
    }
}

pub enum OomPolicy<'a> {
    /// Every allocation failure is fatal.
    Default,
    Custom(&'a mut dyn OomHook),
}

impl OomPolicy<'_> {
    pub fn decide(&mut self, n: usize, pos: SourcePos) -> OomVerdict {
        match self {
            OomPolicy::Default => OomVerdict::Fatal,
            OomPolicy::Custom(hook) => hook.on_oom(n, pos),
        }
    }
}

pub enum BoundsPolicy<'a> {
    Default,
    Custom(&'a mut dyn BoundsHook),
}

impl BoundsPolicy<'_> {
    pub fn notify(&mut self, pos: SourcePos) {
        if let BoundsPolicy::Custom(hook) = self {
            hook.on_bounds(pos);
        }
    }
}

// C hook shapes emitted by the compiler (`$$oom`, `$$bounds`).
pub type COomFn = unsafe extern "C" fn(usize, u32, u32) -> u8;
pub type CBoundsFn = unsafe extern "C" fn(u32, u32);

/// Adapter for a non-null C out-of-memory hook.
#[derive(Clone, Copy)]
pub struct COomHook(pub COomFn);

impl OomHook for COomHook {
    fn on_oom(&mut self, n: usize, pos: SourcePos) -> OomVerdict {
        // SAFETY: the pointer came from generated code declaring this signature.
        OomVerdict::from_c(unsafe { (self.0)(n, pos.line, pos.col) })
    }
}

#[derive(Clone, Copy)]
pub struct CBoundsHook(pub CBoundsFn);

impl BoundsHook for CBoundsHook {
    fn on_bounds(&mut self, pos: SourcePos) {
        unsafe { (self.0)(pos.line, pos.col) }
    }
}
