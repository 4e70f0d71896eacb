//! Primitive output shims. One line per call, errors swallowed.

use std::ffi::c_void;
use std::io::{self, Write};

pub fn write_int<W: Write + ?Sized>(w: &mut W, i: i32) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    write_line(w, buf.format(i).as_bytes())
}

pub fn write_ssize<W: Write + ?Sized>(w: &mut W, i: isize) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    write_line(w, buf.format(i).as_bytes())
}

/// `%f`: fixed notation, six fractional digits. Non-finite values use the C
/// library spellings rather than Rust's `NaN`.
pub fn write_dbl<W: Write + ?Sized>(w: &mut W, d: f64) -> io::Result<()> {
    if d.is_nan() {
        let s: &[u8] = if d.is_sign_negative() { b"-nan" } else { b"nan" };
        return write_line(w, s);
    }
    if d.is_infinite() {
        let s: &[u8] = if d < 0.0 { b"-inf" } else { b"inf" };
        return write_line(w, s);
    }
    writeln!(w, "{d:.6}")
}

/// `%p` as glibc prints it: `(nil)` for null, otherwise unpadded lowercase hex.
pub fn write_ptr<W: Write + ?Sized>(w: &mut W, p: *const c_void) -> io::Result<()> {
    if p.is_null() {
        return write_line(w, b"(nil)");
    }
    writeln!(w, "{:#x}", p as usize)
}

fn write_line<W: Write + ?Sized>(w: &mut W, text: &[u8]) -> io::Result<()> {
    let mut line = Vec::with_capacity(text.len() + 1);
    line.extend_from_slice(text);
    line.push(b'\n');
    w.write_all(&line)
}

pub fn put_int(i: i32) {
    let _ = write_int(&mut io::stdout().lock(), i);
}

pub fn put_ssize(i: isize) {
    let _ = write_ssize(&mut io::stdout().lock(), i);
}

pub fn put_dbl(d: f64) {
    let _ = write_dbl(&mut io::stdout().lock(), d);
}

pub fn put_ptr(p: *const c_void) {
    let _ = write_ptr(&mut io::stdout().lock(), p);
}
