pub mod clock;

use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use clock::{Clock, FixedClock, SystemClock};

static INIT_DOTENV: OnceCell<String> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is picked from `DOTENV_OVERRIDE` if set, otherwise from the first
/// command line argument, falling back to `.env`. Loading happens at most once
/// per process; later calls return the path that was used the first time.
/// A missing file is not an error, the process environment is used as is.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE")
        .ok()
        .or_else(|| env::args().nth(1))
        .unwrap_or_else(|| ".env".to_string());
    load_dotenv_once(dotenv_path)
}

/// Loads the given dotenv file unless one was already loaded.
pub fn load_dotenv_once(dotenv_path: String) -> String {
    INIT_DOTENV
        .get_or_init(|| {
            if let Err(e) = dotenv::from_filename(&dotenv_path) {
                debug!(path = %dotenv_path, error = %e, "no env file loaded");
            }
            dotenv_path
        })
        .clone()
}

/// Log filter from `RUST_LOG`, `info` when unset or invalid.
///
/// Read when called, so load the env file first if it may set `RUST_LOG`.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global `tracing` subscriber with [`log_filter`].
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter(log_filter()).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rust_log_from_env_file_reaches_the_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "RUST_LOG=tiny_livekit=trace").unwrap();
        env::remove_var("RUST_LOG");

        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(load_dotenv_once(path.clone()), path);
        assert_eq!(log_filter().to_string(), "tiny_livekit=trace");

        // Later calls keep the first file.
        assert_eq!(load_dotenv_once("other.env".to_string()), path);
    }
}
