//! File-System Host Process
//!
//! This binary runs as the privileged file-system half of the desktop shell.
//! The UI process spawns it and exchanges length-prefixed bincode frames over
//! stdin/stdout: one `HostCommand` in, one `HostResponse` out, strictly
//! sequential.

mod bridge;

use anyhow::Result;

fn main() -> Result<()> {
    app_log::init()?;

    tracing::info!("File-system host starting");

    bridge::run()
}
