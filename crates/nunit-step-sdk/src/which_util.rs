use std::ffi::OsStr;
use std::path::PathBuf;

/// Locates executables such as the build tool and the NUnit console.
pub struct WhichUtil;

impl WhichUtil {
    /// Locate the first occurrence of `command` on the system PATH.
    ///
    /// - If `require` is true and the command is not found, returns an error.
    /// - If `require` is false and the command is not found, returns `Ok(None)`.
    pub fn which(command: &str, require: bool) -> anyhow::Result<Option<PathBuf>> {
        Self::which_in(command, None, require)
    }

    /// Like [`WhichUtil::which`], but searches `search_path` (a PATH-style
    /// list) instead of the process PATH when one is given.
    pub fn which_in(
        command: &str,
        search_path: Option<&OsStr>,
        require: bool,
    ) -> anyhow::Result<Option<PathBuf>> {
        if command.is_empty() {
            if require {
                anyhow::bail!("command must not be empty");
            }
            return Ok(None);
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let found = match search_path {
            Some(paths) => which::which_in(command, Some(paths), cwd),
            None => which::which(command),
        };

        match found {
            Ok(path) => {
                tracing::debug!("Located '{}' at '{}'", command, path.display());
                Ok(Some(path))
            }
            Err(e) if require => Err(anyhow::anyhow!(
                "{command}: command not found ({e}). Make sure '{command}' is installed and its location included in the 'PATH' environment variable."
            )),
            Err(_) => Ok(None),
        }
    }
}
