use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use filetime::{set_file_times, FileTime};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn datestamp_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_datestamp"))
}

fn run_cli(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(datestamp_bin())
        .args(args)
        .env("RUST_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to execute datestamp CLI");

    {
        let mut stdin = child.stdin.take().expect("stdin piped");
        stdin.write_all(input.as_bytes()).expect("write operator input");
    }
    child.wait_with_output().expect("wait for datestamp CLI")
}

fn assert_cli_success(output: &Output, args: &[&str]) {
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn local_unix(ts: NaiveDateTime) -> i64 {
    Local.from_local_datetime(&ts).earliest().unwrap().timestamp()
}

fn mtime_of(path: &Path) -> i64 {
    FileTime::from_last_modification_time(&fs::metadata(path).unwrap()).unix_seconds()
}

fn atime_of(path: &Path) -> i64 {
    FileTime::from_last_access_time(&fs::metadata(path).unwrap()).unix_seconds()
}

/// Create a file with a known, old timestamp so untouched files are obvious
fn seed(dir: &Path, rel: &str) -> PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "x").unwrap();
    let old = FileTime::from_unix_time(1_000_000, 0);
    set_file_times(&path, old, old).unwrap();
    path
}

#[test]
fn test_help_exits_zero_without_processing() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "20210422_161921.txt");
    let dir = temp.path().to_string_lossy().to_string();

    let output = run_cli(&[&dir, "-h"], "");
    assert_cli_success(&output, &["-h"]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("--no-skip"));
    assert!(!stdout.contains("Processing directory"));
    assert_eq!(mtime_of(&file), 1_000_000);
}

#[test]
fn test_help_wins_over_unknown_flag() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "20210422_161921.txt");
    let dir = temp.path().to_string_lossy().to_string();

    let args = [dir.as_str(), "--bogus", "-h"];
    let output = run_cli(&args, "");
    assert_cli_success(&output, &args);
    assert!(stdout_of(&output).contains("--no-skip"));
    assert_eq!(mtime_of(&file), 1_000_000);
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_stamped_through_link() {
    let temp = TempDir::new().unwrap();
    let target = seed(temp.path(), "store/target.bin");
    let root = temp.path().join("root");
    fs::create_dir_all(&root).unwrap();
    std::os::unix::fs::symlink(&target, root.join("20210422_161921.jpg")).unwrap();
    let dir = root.to_string_lossy().to_string();

    let args = [dir.as_str()];
    let output = run_cli(&args, "");
    assert_cli_success(&output, &args);
    assert_eq!(mtime_of(&target), local_unix(at(2021, 4, 22, 16, 19, 21)));
}

#[test]
fn test_missing_directory_exits_one() {
    let output = run_cli(&[], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("First argument must be a directory!"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn test_invalid_directory_exits_one() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing").to_string_lossy().to_string();
    let output = run_cli(&[&missing], "");
    assert_eq!(output.status.code(), Some(1));

    let file = seed(temp.path(), "20210422_161921.txt");
    let file_arg = file.to_string_lossy().to_string();
    let output = run_cli(&[&file_arg], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout_of(&output).contains("Processing directory"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_string_lossy().to_string();
    let output = run_cli(&[&dir, "--bogus"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_dated_file_is_stamped_and_not_ledgered() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "20210422_161921.txt");
    let dir = temp.path().to_string_lossy().to_string();

    let args = [dir.as_str(), "-v"];
    let output = run_cli(&args, "");
    assert_cli_success(&output, &args);

    let expected = local_unix(at(2021, 4, 22, 16, 19, 21));
    assert_eq!(mtime_of(&file), expected);
    assert_eq!(atime_of(&file), expected);

    let stdout = stdout_of(&output);
    assert!(stdout.contains(&format!("Processing directory: {}", dir)));
    assert!(stdout.contains("\tFile: 20210422_161921.txt, setting date to: 2021-04-22 16:19:21"));
    let report = &stdout[stdout.find("Files that were skipped:").unwrap()..];
    assert!(!report.contains("20210422_161921.txt"));
}

#[test]
fn test_future_dated_file_is_never_written() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "9999-01-01 00-00-00.jpg");
    let dir = temp.path().to_string_lossy().to_string();

    let args = [dir.as_str()];
    let output = run_cli(&args, "");
    assert_cli_success(&output, &args);

    assert_eq!(mtime_of(&file), 1_000_000);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("is in the future (9999-01-01 00:00:00), skipping!"));
    assert!(stdout.contains(&format!("File {} is in the future, skipped!", file.display())));
}

#[test]
fn test_undated_file_skipped_by_default() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "vacation_photo.jpg");
    let dir = temp.path().to_string_lossy().to_string();

    let args = [dir.as_str()];
    let output = run_cli(&args, "");
    assert_cli_success(&output, &args);

    assert_eq!(mtime_of(&file), 1_000_000);
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("To which date"));
    assert!(stdout.contains(&format!(
        "File {} does not contain date, skipped!",
        file.display()
    )));
}

#[test]
fn test_no_skip_with_empty_answer_is_user_skipped() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "vacation_photo.jpg");
    let dir = temp.path().to_string_lossy().to_string();

    let args = [dir.as_str(), "-s"];
    let output = run_cli(&args, "\n");
    assert_cli_success(&output, &args);

    assert_eq!(mtime_of(&file), 1_000_000);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("File vacation_photo.jpg does not contain date."));
    assert!(stdout.contains(&format!(
        "File {} does not contain date, user skipped it!",
        file.display()
    )));
}

#[test]
fn test_no_skip_with_corrective_answer_writes() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), "vacation_photo.jpg");
    let dir = temp.path().to_string_lossy().to_string();

    let args = [dir.as_str(), "-s"];
    let output = run_cli(&args, "no date here\n2020-01-01 00-00-00\n");
    assert_cli_success(&output, &args);

    assert_eq!(mtime_of(&file), local_unix(at(2020, 1, 1, 0, 0, 0)));
    let stdout = stdout_of(&output);
    assert_eq!(stdout.matches("To which date should I set it to?").count(), 2);
    assert!(!stdout.contains(&format!("File {} does not contain date", file.display())));
}

#[test]
fn test_two_runs_leave_same_timestamps() {
    let temp = TempDir::new().unwrap();
    let a = seed(temp.path(), "2018-09-21 20-31-26.jpg");
    let b = seed(temp.path(), "nested/deeper/2017_12_26_18_01_39.png");
    let c = seed(temp.path(), "nested/20210422-161921.mp4");
    let dir = temp.path().to_string_lossy().to_string();
    let args = [dir.as_str()];

    let first = run_cli(&args, "");
    assert_cli_success(&first, &args);
    let after_first = [mtime_of(&a), mtime_of(&b), mtime_of(&c)];

    let second = run_cli(&args, "");
    assert_cli_success(&second, &args);
    let after_second = [mtime_of(&a), mtime_of(&b), mtime_of(&c)];

    assert_eq!(after_first, after_second);
    assert_eq!(
        after_first,
        [
            local_unix(at(2018, 9, 21, 20, 31, 26)),
            local_unix(at(2017, 12, 26, 18, 1, 39)),
            local_unix(at(2021, 4, 22, 16, 19, 21)),
        ]
    );
    assert_eq!(stdout_of(&first), stdout_of(&second));
}
