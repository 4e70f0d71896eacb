use std::io::Write as _;

use once_cell::sync::OnceCell;

static CONFIG: OnceCell<RtConfig> = OnceCell::new();

const ENV_TRACE: &str = "ALCO_RT_TRACE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RtConfig {
    /// Emit an `alco-rt:` context line on stderr before each fatal diagnostic
    /// and on every recovered allocation failure.
    pub trace: bool,
}

impl RtConfig {
    pub fn from_env() -> Self {
        RtConfig {
            trace: env_bool(ENV_TRACE, false),
        }
    }
}

pub fn config() -> &'static RtConfig {
    CONFIG.get_or_init(RtConfig::from_env)
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(v: &str) -> Option<bool> {
    match v {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

/// Writes one `alco-rt: <msg>` line to stderr when tracing is on.
///
/// The message is built lazily so the disabled path costs a single load.
pub(crate) fn trace(msg: impl FnOnce() -> String) {
    if !config().trace {
        return;
    }
    let mut line = String::from("alco-rt: ");
    line.push_str(&msg());
    line.push('\n');
    let _ = std::io::stderr().lock().write_all(line.as_bytes());
}
