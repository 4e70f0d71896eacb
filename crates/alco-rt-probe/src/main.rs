use std::ffi::c_void;
use std::io::Write as _;

use alco_rt::ffi::{alco_new, alco_oobmsg, putdbl, putint, putptr, putssize};
use alco_rt::{CAllocFn, CBoundsFn, COomFn};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

/// Drives the alco runtime ABI from the command line, the way generated code
/// would call it.
#[derive(Debug, Parser)]
#[command(name = "alco-rt-probe")]
#[command(about = "Exercise the alco runtime support ABI.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Call `$$new` and print each returned block with `putptr`.
    New {
        #[arg(long)]
        size: usize,
        #[arg(long, default_value_t = 1)]
        line: u32,
        #[arg(long, default_value_t = 1)]
        col: u32,
        #[arg(long, value_enum, default_value_t = OomHookArg::None)]
        hook: OomHookArg,
        #[arg(long, value_enum, default_value_t = AllocArg::Default)]
        alloc: AllocArg,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Call `$$oobmsg`. Never returns.
    Oob {
        #[arg(long, default_value_t = 1)]
        line: u32,
        #[arg(long, default_value_t = 1)]
        col: u32,
        #[arg(long, value_enum, default_value_t = BoundsHookArg::None)]
        hook: BoundsHookArg,
    },
    /// Call one of the primitive printers.
    Print {
        #[arg(value_enum)]
        kind: PrintKind,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OomHookArg {
    None,
    Recover,
    Fatal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BoundsHookArg {
    None,
    Log,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AllocArg {
    /// Null strategy pointer: the runtime falls back to malloc.
    Default,
    /// A strategy that always returns NULL.
    Fail,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PrintKind {
    Int,
    Ssize,
    Dbl,
    Ptr,
}

unsafe extern "C" fn alloc_fail(_n: usize) -> *mut c_void {
    std::ptr::null_mut()
}

unsafe extern "C" fn oom_recover(n: usize, line: u32, col: u32) -> u8 {
    log_hook(format!("hook oom n={n} line={line} col={col}"));
    0
}

unsafe extern "C" fn oom_fatal(n: usize, line: u32, col: u32) -> u8 {
    log_hook(format!("hook oom n={n} line={line} col={col}"));
    1
}

unsafe extern "C" fn bounds_log(line: u32, col: u32) {
    log_hook(format!("hook bounds line={line} col={col}"));
}

fn log_hook(mut msg: String) {
    msg.push('\n');
    let _ = std::io::stderr().lock().write_all(msg.as_bytes());
}

fn main() -> std::process::ExitCode {
    match try_main() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "alco-rt-probe: {err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::New {
            size,
            line,
            col,
            hook,
            alloc,
            count,
        } => {
            let oom: Option<COomFn> = match hook {
                OomHookArg::None => None,
                OomHookArg::Recover => Some(oom_recover),
                OomHookArg::Fatal => Some(oom_fatal),
            };
            let strategy: Option<CAllocFn> = match alloc {
                AllocArg::Default => None,
                AllocArg::Fail => Some(alloc_fail),
            };
            // Blocks are deliberately leaked: distinct live blocks are what the
            // caller inspects.
            for _ in 0..count {
                let p = unsafe { alco_new(size, line, col, oom, strategy) };
                putptr(p);
            }
            Ok(())
        }
        Command::Oob { line, col, hook } => {
            let bounds: Option<CBoundsFn> = match hook {
                BoundsHookArg::None => None,
                BoundsHookArg::Log => Some(bounds_log),
            };
            unsafe { alco_oobmsg(line, col, bounds) }
        }
        Command::Print { kind, value } => print_value(kind, &value),
    }
}

fn print_value(kind: PrintKind, value: &str) -> Result<()> {
    match kind {
        PrintKind::Int => putint(value.parse().with_context(|| format!("parse int: {value:?}"))?),
        PrintKind::Ssize => {
            putssize(value.parse().with_context(|| format!("parse ssize: {value:?}"))?)
        }
        PrintKind::Dbl => putdbl(value.parse().with_context(|| format!("parse double: {value:?}"))?),
        PrintKind::Ptr => putptr(parse_addr(value)? as *const c_void),
    }
    Ok(())
}

fn parse_addr(value: &str) -> Result<usize> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.with_context(|| format!("parse pointer address: {value:?}"))
}
