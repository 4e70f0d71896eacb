#![no_main]

use std::ffi::{c_char, c_void};

use libfuzzer_sys::fuzz_target;

fn libc_line(fmt: &[u8], f: impl FnOnce(*mut c_char, usize, *const c_char) -> i32) -> Vec<u8> {
    let mut buf = vec![0u8; 512];
    let n = f(buf.as_mut_ptr().cast(), buf.len(), fmt.as_ptr().cast());
    assert!(n >= 0 && (n as usize) < buf.len(), "snprintf returned {n}");
    buf.truncate(n as usize);
    buf
}

fuzz_target!(|data: &[u8]| {
    let Some(head) = data.get(..8) else {
        return;
    };
    let bits = u64::from_le_bytes(head.try_into().unwrap());

    let d = f64::from_bits(bits);
    let mut ours = Vec::new();
    alco_rt::write_dbl(&mut ours, d).unwrap();
    let theirs = libc_line(b"%f\n\0", |b, n, fmt| unsafe { libc::snprintf(b, n, fmt, d) });
    assert_eq!(ours, theirs, "bits={bits:#018x}");

    let i = bits as i32;
    let mut ours = Vec::new();
    alco_rt::write_int(&mut ours, i).unwrap();
    let theirs = libc_line(b"%d\n\0", |b, n, fmt| unsafe { libc::snprintf(b, n, fmt, i) });
    assert_eq!(ours, theirs);

    let s = bits as isize;
    let mut ours = Vec::new();
    alco_rt::write_ssize(&mut ours, s).unwrap();
    let theirs = libc_line(b"%zd\n\0", |b, n, fmt| unsafe { libc::snprintf(b, n, fmt, s) });
    assert_eq!(ours, theirs);

    let p = bits as usize as *const c_void;
    let mut ours = Vec::new();
    alco_rt::write_ptr(&mut ours, p).unwrap();
    let theirs = libc_line(b"%p\n\0", |b, n, fmt| unsafe { libc::snprintf(b, n, fmt, p) });
    assert_eq!(ours, theirs);
});
