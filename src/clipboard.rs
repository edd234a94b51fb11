/*!
 * Clipboard support for codecopy
 *
 * The payload is piped into whichever clipboard command the platform
 * offers. Failures are returned to the caller, which reports them without
 * aborting the run.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Trait for clipboard operations
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Available clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    /// tmux paste buffer, forwarded to the outer terminal with `-w`
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard, natively or from WSL
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        execute_clipboard_command(cmd, args, text)
    }
}

/// The system clipboard, detected on first use
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    /// Try each detected provider in order of preference until one succeeds
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let providers = determine_clipboard_providers();
        let mut last_error = ClipboardError::NoClipboardFound;

        for provider in providers {
            match provider.copy_to_clipboard(text) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = e,
            }
        }

        Err(last_error)
    }
}

/// Check if a command exists on the system
pub fn command_exists(command: &str) -> bool {
    if let Some(paths) = env::var_os("PATH") {
        if env::split_paths(&paths).any(|dir| dir.join(command).is_file()) {
            return true;
        }
    }

    // Fall back to running it, which also resolves PATHEXT on Windows
    Command::new(command)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Spawn a clipboard command, write the text to its stdin and wait for it
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    // Dropping stdin closes the pipe so the command sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()).map_err(ClipboardError::from),
        None => Err(ClipboardError::CommandFailed(format!(
            "Failed to open stdin for {}",
            cmd
        ))),
    };

    if let Err(e) = written {
        // Reap the child so a failed write leaves no zombie behind
        let _ = child.kill();
        let _ = child.wait();
        return Err(e);
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

/// Platform detection cache
static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn get_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "android") {
            "android"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else {
            "unknown"
        }
    })
}

/// Determine which clipboard providers to try based on platform
fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(3);

    // Inside tmux the paste buffer is what the user pastes from
    if env::var("TMUX").is_ok() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }

    match get_platform() {
        "macos" => {
            if command_exists("pbcopy") {
                providers.push(ClipboardProvider::MacOS);
            }
        }
        "windows" | "wsl" => providers.push(ClipboardProvider::Windows),
        "linux" => {
            if env::var("WAYLAND_DISPLAY").is_ok() && command_exists("wl-copy") {
                providers.push(ClipboardProvider::Wayland);
            }
            if command_exists("xsel") {
                providers.push(ClipboardProvider::Xsel);
            }
            if command_exists("xclip") {
                providers.push(ClipboardProvider::Xclip);
            }
        }
        "android" => {
            if command_exists("termux-clipboard-set") {
                providers.push(ClipboardProvider::Termux);
            }
        }
        _ => {}
    }

    providers
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_get_platform_is_cached() {
        let platform = get_platform();
        assert!(["macos", "windows", "wsl", "linux", "android", "unknown"].contains(&platform));
        assert_eq!(platform, get_platform());
    }

    #[test]
    fn test_failing_command_is_reported() {
        let err = execute_clipboard_command("nonexistentcommandxyz", &[], "text").unwrap_err();
        assert!(matches!(err, ClipboardError::CommandFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_that_stops_reading_is_an_error() {
        // `true` exits without draining stdin, so a large write hits a closed pipe
        let text = "x".repeat(4 * 1024 * 1024);
        let err = execute_clipboard_command("true", &[], &text).unwrap_err();
        assert!(matches!(err, ClipboardError::Io(_)));

        assert!(execute_clipboard_command("cat", &[], "small").is_ok());
    }

    #[test]
    fn test_provider_commands() {
        assert_eq!(ClipboardProvider::MacOS.command().0, "pbcopy");
        assert_eq!(
            ClipboardProvider::Xclip.command(),
            ("xclip", &["-selection", "clipboard", "-in"][..])
        );
    }
}
