use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// File name of the API stage report.
pub const API_REPORT_FILE: &str = "api-report.json";
/// File name of the playground stage report.
pub const PLAYGROUND_REPORT_FILE: &str = "playground-report.json";
/// File name of the merged report.
pub const GRADE_REPORT_FILE: &str = "grade-report.json";

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Directory all reports are written to and read from.
///
/// `REPORT_DIR` wins when set. Otherwise reports live next to the running
/// executable, falling back to the current directory.
pub fn report_root() -> PathBuf {
    let configured = config::report_dir();
    if !configured.trim().is_empty() {
        return resolve(PathBuf::from(configured));
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// {REPORT_ROOT}/api-report.json
pub fn api_report_path() -> PathBuf {
    report_root().join(API_REPORT_FILE)
}

/// {REPORT_ROOT}/playground-report.json
pub fn playground_report_path() -> PathBuf {
    report_root().join(PLAYGROUND_REPORT_FILE)
}

/// {REPORT_ROOT}/grade-report.json
pub fn grade_report_path() -> PathBuf {
    report_root().join(GRADE_REPORT_FILE)
}

/// Test runner transcript, from `config::test_output_path()`.
/// If relative, resolve against current_dir().
pub fn test_output_path() -> PathBuf {
    resolve(PathBuf::from(config::test_output_path()))
}

fn resolve(p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}
