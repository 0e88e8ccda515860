//! IPC bridge loop for communication with the UI process
//!
//! Frames are a little-endian u32 length followed by a bincode payload.
//! Commands are served one at a time, to completion; exactly one logical
//! actor performs edits by construction of the host UI.

use anyhow::Result;
use app_core::SeoError;
use ipc_proto::{ErrorCode, HostCommand, HostResponse};
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;

/// Run the host loop until EOF or a Shutdown command.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();

    loop {
        let payload = match read_frame(&mut reader)? {
            Some(payload) => payload,
            None => {
                tracing::info!("UI process closed the pipe; exiting");
                return Ok(());
            }
        };

        let command: HostCommand = match bincode::deserialize(&payload) {
            Ok(command) => command,
            Err(e) => {
                // A malformed frame from the UI side. Report it and keep
                // serving; framing is still intact.
                send_response(&mut writer, &protocol_error(e.to_string()))?;
                continue;
            }
        };

        let shutting_down = matches!(command, HostCommand::Shutdown);
        let response = process_command(command);
        send_response(&mut writer, &response)?;

        if shutting_down {
            tracing::info!("Shutdown requested");
            return Ok(());
        }
    }
}

/// Read one raw frame. `None` on a clean EOF at a frame boundary.
fn read_frame(reader: &mut impl Read) -> Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_le_bytes(len_buf) as usize;
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;

    Ok(Some(payload))
}

fn send_response(writer: &mut impl Write, response: &HostResponse) -> Result<()> {
    let payload = bincode::serialize(response)?;
    writer.write_all(&(payload.len() as u32).to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

fn process_command(command: HostCommand) -> HostResponse {
    match command {
        HostCommand::Ping => {
            tracing::debug!("Received Ping");
            HostResponse::Pong
        }

        HostCommand::Shutdown => HostResponse::ShuttingDown,

        HostCommand::ParseDocument {
            html_path,
            image_folders,
        } => {
            tracing::info!("ParseDocument: {}", html_path);
            let folders = to_paths(&image_folders);

            match app_core::parse_document(&PathBuf::from(html_path), &folders) {
                Ok(outcome) => HostResponse::Parsed {
                    groups: outcome.groups,
                    total_images: outcome.total_images,
                },
                Err(e) => error_response(e),
            }
        }

        HostCommand::ApplyChanges {
            html_path,
            group_name,
            images,
            image_folders,
        } => {
            tracing::info!(
                "ApplyChanges: {} record(s) in group '{}'",
                images.len(),
                group_name
            );
            let folders = to_paths(&image_folders);

            match app_core::apply_changes(&PathBuf::from(html_path), &group_name, &images, &folders)
            {
                Ok(()) => HostResponse::Applied,
                Err(e) => error_response(e),
            }
        }

        HostCommand::RevertChange {
            html_path,
            group_name,
            image,
            image_folders,
        } => {
            tracing::info!(
                "RevertChange: record {} in group '{}'",
                image.index,
                group_name
            );
            let folders = to_paths(&image_folders);

            match app_core::revert_change(&PathBuf::from(html_path), &group_name, &image, &folders)
            {
                Ok(()) => HostResponse::Reverted,
                Err(e) => error_response(e),
            }
        }
    }
}

fn to_paths(folders: &[String]) -> Vec<PathBuf> {
    folders.iter().map(PathBuf::from).collect()
}

fn error_response(e: SeoError) -> HostResponse {
    tracing::error!("Operation failed: {}", e);
    HostResponse::Error {
        code: e.code(),
        message: e.user_message(),
    }
}

fn protocol_error(message: impl Into<String>) -> HostResponse {
    HostResponse::Error {
        code: ErrorCode::Protocol,
        message: message.into(),
    }
}
