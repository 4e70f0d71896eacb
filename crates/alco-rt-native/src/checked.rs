use std::ptr::NonNull;

use crate::config::trace;
use crate::fatal::{fatal, Fatal};
use crate::policy::{BoundsPolicy, OomPolicy, OomVerdict, SourcePos};
use crate::strategy::AllocStrategy;

/// Allocates `n` bytes through `strategy`.
///
/// On success the block is returned untouched and `policy` is never
/// consulted. On failure `policy` decides: fatal aborts the process with
/// "Error: Out of memory.", recoverable returns `None`.
pub fn checked_alloc<S>(
    n: usize,
    pos: SourcePos,
    policy: &mut OomPolicy<'_>,
    strategy: &mut S,
) -> Option<NonNull<u8>>
where
    S: AllocStrategy + ?Sized,
{
    if let Some(p) = strategy.allocate(n) {
        return Some(p);
    }
    match resolve_alloc_failure(n, pos, policy) {
        Ok(()) => None,
        Err(err) => fatal(err),
    }
}

/// Runs the failure policy for an allocation that already came back null.
///
/// `Err` means the caller must terminate; [`checked_alloc`] does so through
/// [`fatal`].
pub fn resolve_alloc_failure(
    n: usize,
    pos: SourcePos,
    policy: &mut OomPolicy<'_>,
) -> Result<(), Fatal> {
    let hooked = matches!(policy, OomPolicy::Custom(_));
    let verdict = policy.decide(n, pos);
    trace(|| {
        let source = if hooked { "hook" } else { "default" };
        format!("out of memory n={n} at {pos}: {source} verdict {verdict:?}")
    });
    match verdict {
        OomVerdict::Fatal => Err(Fatal::OutOfMemory),
        OomVerdict::Recover => Ok(()),
    }
}

/// Reports an out-of-range array access and terminates.
///
/// A custom hook runs first, exactly once; nothing it does can prevent the
/// abort.
pub fn report_bounds_failure(pos: SourcePos, policy: &mut BoundsPolicy<'_>) -> ! {
    policy.notify(pos);
    trace(|| format!("invalid array access at {pos}"));
    fatal(Fatal::InvalidArrayAccess)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_n: usize) -> Option<NonNull<u8>> {
        None
    }

    #[test]
    fn success_skips_hook_and_returns_block() {
        let mut backing = [0u8; 16];
        let expected = NonNull::new(backing.as_mut_ptr()).unwrap();
        let mut requested = Vec::new();
        let mut strategy = |n: usize| {
            requested.push(n);
            Some(expected)
        };
        let mut hook_calls = 0;
        let mut hook = |_n: usize, _pos: SourcePos| {
            hook_calls += 1;
            OomVerdict::Fatal
        };
        let mut policy = OomPolicy::Custom(&mut hook);

        let got = checked_alloc(16, SourcePos::new(2, 5), &mut policy, &mut strategy);
        drop(policy);
        assert_eq!(got, Some(expected));
        assert_eq!(requested, vec![16]);
        assert_eq!(hook_calls, 0);
    }

    #[test]
    fn recovering_hook_yields_none() {
        let mut calls = Vec::new();
        let mut hook = |n: usize, pos: SourcePos| {
            calls.push((n, pos));
            OomVerdict::Recover
        };
        let mut policy = OomPolicy::Custom(&mut hook);

        let got = checked_alloc(64, SourcePos::new(9, 1), &mut policy, &mut never);
        drop(policy);
        assert!(got.is_none());
        assert_eq!(calls, vec![(64, SourcePos::new(9, 1))]);
    }

    #[test]
    fn missing_hook_is_fatal() {
        let mut policy = OomPolicy::Default;
        assert_eq!(
            resolve_alloc_failure(8, SourcePos::new(1, 1), &mut policy),
            Err(Fatal::OutOfMemory)
        );
    }

    #[test]
    fn fatal_hook_is_consulted_once() {
        let mut calls = 0;
        let mut hook = |n: usize, pos: SourcePos| {
            calls += 1;
            assert_eq!((n, pos), (24, SourcePos::new(3, 14)));
            OomVerdict::Fatal
        };
        let mut policy = OomPolicy::Custom(&mut hook);
        let res = resolve_alloc_failure(24, SourcePos::new(3, 14), &mut policy);
        drop(policy);
        assert_eq!(res, Err(Fatal::OutOfMemory));
        assert_eq!(calls, 1);
    }

    #[test]
    fn repeated_allocations_do_not_alias() {
        let mut strategy = crate::strategy::SystemAlloc;
        let mut policy = OomPolicy::Default;
        let pos = SourcePos::new(1, 1);
        let a = checked_alloc(24, pos, &mut policy, &mut strategy).expect("first");
        let b = checked_alloc(24, pos, &mut policy, &mut strategy).expect("second");
        assert_ne!(a, b);
        unsafe {
            libc::free(a.as_ptr().cast());
            libc::free(b.as_ptr().cast());
        }
    }
}
