use std::error::Error;
use std::fs;

use runlet::exec::{ArgVector, RedirectingExecutor};
use runlet_test_utils::{RecordingSink, init_tracing};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

fn sh_argv(script: &str) -> ArgVector {
    ArgVector::new(["/bin/sh", "-c", script]).expect("valid argv")
}

#[test]
fn captures_stdout_exactly() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");

    // printf, not echo: the file must hold exactly "hello", no newline.
    assert!(RedirectingExecutor::new().run(&out, &sh_argv("printf hello")));
    assert_eq!(fs::read_to_string(&out)?, "hello");
    Ok(())
}

#[test]
fn second_run_truncates_previous_output() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");
    let executor = RedirectingExecutor::new();

    assert!(executor.run(&out, &sh_argv("printf 'a much longer first line'")));
    assert!(executor.run(&out, &sh_argv("printf short")));

    // Only the second run's bytes, not a concatenation.
    assert_eq!(fs::read_to_string(&out)?, "short");
    Ok(())
}

#[test]
fn stderr_is_not_captured() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");

    assert!(RedirectingExecutor::new().run(&out, &sh_argv("printf out; printf err 1>&2")));
    assert_eq!(fs::read_to_string(&out)?, "out");
    Ok(())
}

#[test]
fn open_failure_is_reported_before_any_spawn() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("missing-subdir").join("out.txt");

    let sink = RecordingSink::new();
    let executor = RedirectingExecutor::with_sink(sink.clone());

    assert!(!executor.run(&out, &sh_argv("printf hello")));
    assert!(!out.exists());

    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].contains("failed to open output file"),
        "got: {}",
        errors[0]
    );
    Ok(())
}

#[test]
fn relative_program_creates_no_output_file() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");

    let argv = ArgVector::new(["sh", "-c", "printf hello"])?;
    assert!(!RedirectingExecutor::new().run(&out, &argv));

    // Precondition check runs before output-file acquisition.
    assert!(!out.exists());
    Ok(())
}

#[test]
fn nonzero_exit_is_failure_but_file_holds_partial_output() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");

    assert!(!RedirectingExecutor::new().run(&out, &sh_argv("printf partial; exit 7")));
    assert_eq!(fs::read_to_string(&out)?, "partial");
    Ok(())
}

#[test]
fn output_file_is_created_with_0644_semantics() -> TestResult {
    use std::os::unix::fs::PermissionsExt;

    init_tracing();

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");

    assert!(RedirectingExecutor::new().run(&out, &sh_argv("printf hello")));

    // The requested mode is 0644; the umask may clear group/other read
    // bits, so only assert the umask-independent parts: owner read/write,
    // nothing executable, nothing group/other writable.
    let mode = fs::metadata(&out)?.permissions().mode() & 0o777;
    assert_eq!(mode & 0o700, 0o600, "owner bits of {mode:o}");
    assert_eq!(mode & 0o133, 0, "exec/group-write bits of {mode:o}");
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn repeated_runs_do_not_leak_descriptors() -> TestResult {
    init_tracing();

    fn open_fd_count() -> usize {
        fs::read_dir("/proc/self/fd")
            .expect("/proc/self/fd readable")
            .count()
    }

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");
    let executor = RedirectingExecutor::new();

    // Warm up once so any lazily created descriptors don't skew the count.
    assert!(executor.run(&out, &sh_argv("printf hello")));
    let before = open_fd_count();

    for _ in 0..64 {
        assert!(executor.run(&out, &sh_argv("printf hello")));
    }

    assert_eq!(open_fd_count(), before);
    Ok(())
}
