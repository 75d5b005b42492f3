//! Clipboard access
//!
//! The system clipboard is reached through the platform's command-line tools,
//! so no window-system bindings are linked into the binary.

use std::io::Write;
use std::process::{Command, Stdio};

/// Capability to place text on, and read text from, a clipboard
pub trait Clipboard {
    /// Returns `false` if the text could not be placed on the clipboard
    fn copy(&mut self, text: &str) -> bool;
    fn paste(&mut self) -> Option<String>;
}

/// The operating system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

/// Helper program and its arguments
type Helper = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const COPY_HELPERS: &[Helper] = &[("pbcopy", &[])];
#[cfg(target_os = "macos")]
const PASTE_HELPERS: &[Helper] = &[("pbpaste", &[])];

#[cfg(all(unix, not(target_os = "macos")))]
const COPY_HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];
#[cfg(all(unix, not(target_os = "macos")))]
const PASTE_HELPERS: &[Helper] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

#[cfg(windows)]
const COPY_HELPERS: &[Helper] = &[("clip", &[])];
#[cfg(windows)]
const PASTE_HELPERS: &[Helper] = &[("powershell", &["-NoProfile", "-Command", "Get-Clipboard"])];

/// Feed `text` to a program's stdin and report whether it exited cleanly
fn pipe_into(program: &str, args: &[&str], text: &str) -> bool {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let Ok(mut child) = child else {
        return false;
    };

    let written = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(text.as_bytes()).is_ok())
        .unwrap_or(false);

    child.wait().map(|s| s.success()).unwrap_or(false) && written
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> bool {
        COPY_HELPERS.iter().any(|(program, args)| {
            let ok = pipe_into(program, args, text);
            if !ok {
                tracing::debug!(program, "clipboard copy helper unavailable or failed");
            }
            ok
        })
    }

    fn paste(&mut self) -> Option<String> {
        PASTE_HELPERS.iter().find_map(|(program, args)| {
            Command::new(program)
                .args(*args)
                .stderr(Stdio::null())
                .output()
                .ok()
                .filter(|o| o.status.success())
                .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
        })
    }
}

/// In-process clipboard
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    /// Makes every `copy` fail
    pub fail_copies: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
            fail_copies: false,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> bool {
        if self.fail_copies {
            return false;
        }
        self.contents = Some(text.to_string());
        true
    }

    fn paste(&mut self) -> Option<String> {
        self.contents.clone()
    }
}
