use std::process::Command;

fn print(kind: &str, value: &str) -> String {
    let exe = env!("CARGO_BIN_EXE_alco-rt-probe");
    let out = Command::new(exe)
        .args(["print", kind, value])
        .output()
        .expect("run alco-rt-probe");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).expect("utf8 stdout")
}

#[test]
fn putint_decimal() {
    assert_eq!(print("int", "-5"), "-5\n");
    assert_eq!(print("int", "2147483647"), "2147483647\n");
}

#[test]
fn putssize_decimal() {
    assert_eq!(print("ssize", "-42"), "-42\n");
    assert_eq!(print("ssize", "0"), "0\n");
}

#[test]
fn putdbl_fixed_six() {
    assert_eq!(print("dbl", "3.5"), "3.500000\n");
    assert_eq!(print("dbl", "-1.25"), "-1.250000\n");
    assert_eq!(print("dbl", "inf"), "inf\n");
}

#[test]
fn putptr_native_text() {
    assert_eq!(print("ptr", "0"), "(nil)\n");
    assert_eq!(print("ptr", "0x1000"), "0x1000\n");
    assert_eq!(print("ptr", "4096"), "0x1000\n");
}

#[test]
fn bad_value_is_usage_error() {
    let exe = env!("CARGO_BIN_EXE_alco-rt-probe");
    let out = Command::new(exe)
        .args(["print", "int", "five"])
        .output()
        .expect("run alco-rt-probe");
    assert_eq!(out.status.code(), Some(2));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("parse int"), "stderr:\n{err}");
    assert!(out.stdout.is_empty());
}
