use std::fmt;
use std::io::Write as _;

/// Unrecoverable runtime failures. Never returned across the C ABI; the only
/// way out is [`fatal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fatal {
    OutOfMemory,
    InvalidArrayAccess,
}

impl Fatal {
    pub const fn message(self) -> &'static str {
        match self {
            Fatal::OutOfMemory => "Error: Out of memory.",
            Fatal::InvalidArrayAccess => "Error: Invalid array access.",
        }
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for Fatal {}

/// Writes the fixed diagnostic line to stderr and aborts. No unwinding.
pub fn fatal(err: Fatal) -> ! {
    let msg = err.message();
    let mut line = [0u8; 64];
    let len = msg.len() + 1;
    line[..msg.len()].copy_from_slice(msg.as_bytes());
    line[msg.len()] = b'\n';
    // Single write: the diagnostic must not interleave with other stderr output.
    let _ = std::io::stderr().lock().write_all(&line[..len]);
    std::process::abort()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_fixed() {
        assert_eq!(Fatal::OutOfMemory.to_string(), "Error: Out of memory.");
        assert_eq!(
            Fatal::InvalidArrayAccess.to_string(),
            "Error: Invalid array access."
        );
    }

    #[test]
    fn messages_fit_line_buffer() {
        for f in [Fatal::OutOfMemory, Fatal::InvalidArrayAccess] {
            assert!(f.message().len() < 64);
        }
    }
}
