/*!
 * Clipboard support for copycode
 *
 * Copies the rendered document through whichever external clipboard command
 * the platform offers.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

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
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// External commands able to receive clipboard text on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    /// tmux paste buffer, forwarded to the system clipboard with `-w`
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (native or via WSL)
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardProvider {
    /// Program and arguments that read the text from stdin
    pub fn command(&self) -> (&'static str, &'static [&'static str]) {
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
        pipe_to_command(cmd, args, text)
    }
}

/// Host platform, as far as clipboard selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Wsl,
    Linux,
    Android,
    Unknown,
}

/// Copy text to the system clipboard.
///
/// Providers are tried in order of preference; a provider that fails hands
/// over to the next one.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let providers = available_providers();
    if providers.is_empty() {
        return Err(ClipboardError::NoClipboardFound);
    }

    let mut last_error = ClipboardError::NoClipboardFound;
    for provider in providers {
        match provider.copy_to_clipboard(text) {
            Ok(()) => {
                debug!("Copied {} bytes with {:?}", text.len(), provider);
                return Ok(());
            }
            Err(e) => {
                warn!("Clipboard provider {:?} failed: {}", provider, e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Check if a command exists on the system
pub fn command_exists(command: &str) -> bool {
    if let Some(paths) = env::var_os("PATH") {
        if env::split_paths(&paths).any(|dir| dir.join(command).is_file()) {
            return true;
        }
    }

    Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Detect the platform once per process
pub fn platform() -> Platform {
    *PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "linux") {
            if env::var_os("WSL_DISTRO_NAME").is_some() {
                Platform::Wsl
            } else {
                Platform::Linux
            }
        } else {
            Platform::Unknown
        }
    })
}

/// Clipboard commands a platform may offer, in order of preference
pub fn candidate_providers(platform: Platform) -> &'static [ClipboardProvider] {
    match platform {
        Platform::MacOS => &[ClipboardProvider::MacOS],
        Platform::Windows | Platform::Wsl => &[ClipboardProvider::Windows],
        Platform::Linux => &[
            ClipboardProvider::Wayland,
            ClipboardProvider::Xsel,
            ClipboardProvider::Xclip,
        ],
        Platform::Android => &[ClipboardProvider::Termux],
        Platform::Unknown => &[],
    }
}

fn available_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(4);

    // Inside a tmux session the paste buffer is what the user expects
    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }

    providers.extend(
        candidate_providers(platform())
            .iter()
            .copied()
            .filter(|provider| command_exists(provider.command().0)),
    );

    providers
}

/// Spawn `cmd`, write `text` to its stdin and wait for a successful exit
fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin.write_all(text.as_bytes())?;
    }
    // Close stdin so the command sees EOF
    drop(child.stdin.take());

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

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_platform_is_cached() {
        assert_eq!(platform(), platform());
    }

    #[test]
    fn test_candidate_providers() {
        assert_eq!(
            candidate_providers(Platform::Linux),
            &[
                ClipboardProvider::Wayland,
                ClipboardProvider::Xsel,
                ClipboardProvider::Xclip
            ]
        );
        assert_eq!(
            candidate_providers(Platform::Wsl),
            &[ClipboardProvider::Windows]
        );
        assert!(candidate_providers(Platform::Unknown).is_empty());
    }

    #[test]
    fn test_provider_commands() {
        assert_eq!(
            ClipboardProvider::Xclip.command(),
            ("xclip", &["-selection", "clipboard", "-in"][..])
        );
        assert_eq!(ClipboardProvider::MacOS.command().0, "pbcopy");
        assert_eq!(ClipboardProvider::Tmux.command().1, &["load-buffer", "-w", "-"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_command() {
        assert!(pipe_to_command("cat", &[], "hello").is_ok());
        // `false` may exit before reading, so either a broken pipe or the exit status fails it
        assert!(pipe_to_command("false", &[], "hello").is_err());
        assert!(pipe_to_command("nonexistentcommandxyz", &[], "hello").is_err());
    }
}
