use super::{Role, RoleEvent};
use crate::{error::OsOp, key_handler};
use crossbeam_channel::Sender;
use std::{io, thread};

/// Read exactly one key press and report it.
///
/// The reader blocks on the terminal and cannot be woken early; a fresh one
/// must be started after each report or input is lost.
pub(crate) fn spawn(events: Sender<RoleEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name(Role::KeyReader.to_string())
        .spawn(move || {
            let event = match key_handler::next_key() {
                Ok(key) => RoleEvent::KeyRead(key),
                Err(error) => RoleEvent::Fault {
                    role: Role::KeyReader,
                    op: OsOp::Terminal,
                    error,
                },
            };
            let _ = events.send(event);
        })?;

    Ok(())
}
