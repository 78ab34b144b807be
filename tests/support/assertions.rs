//! Assertions over a finished command's output.

use std::process::Output;

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Exit status 0; otherwise panic with both streams.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "ghsync exited with {}\nstdout:\n{}\nstderr:\n{}",
        output.status,
        stdout(output),
        stderr(output)
    );
}

/// Non-zero exit status.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "ghsync unexpectedly succeeded\nstdout:\n{}",
        stdout(output)
    );
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let out = stdout(output);
    assert!(out.contains(needle), "{:?} not in stdout:\n{}", needle, out);
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    let err = stderr(output);
    assert!(err.contains(needle), "{:?} not in stderr:\n{}", needle, err);
}
