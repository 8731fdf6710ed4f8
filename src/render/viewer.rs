//! Opening a saved chart in the platform image viewer.

use crate::Result;

use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const VIEWER: (&str, &[&str]) = ("open", &[]);
#[cfg(target_os = "windows")]
const VIEWER: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const VIEWER: (&str, &[&str]) = ("xdg-open", &[]);

/// Program and leading arguments that open a file with its default viewer.
pub fn viewer_command() -> (&'static str, &'static [&'static str]) {
    VIEWER
}

/// Launch the platform viewer for `path` without waiting for it to exit.
pub fn open_in_viewer(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let (program, args) = viewer_command();

    tracing::debug!(program, path = %path.display(), "Opening chart in viewer");
    Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
