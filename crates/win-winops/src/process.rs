use std::{mem, process};

use tracing::debug;
use windows::Win32::{
    Foundation::CloseHandle,
    System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    },
};

use crate::error::{Error, Result};

/// Parent of process `pid`, from a ToolHelp process snapshot.
pub fn parent_pid(pid: u32) -> Result<Option<u32>> {
    let snap = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
        .map_err(Error::win32("CreateToolhelp32Snapshot"))?;

    let mut entry = PROCESSENTRY32W {
        dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };
    let mut found = None;
    let mut more = unsafe { Process32FirstW(snap, &mut entry) }.is_ok();
    while more {
        if entry.th32ProcessID == pid {
            found = Some(entry.th32ParentProcessID);
            break;
        }
        more = unsafe { Process32NextW(snap, &mut entry) }.is_ok();
    }
    if let Err(e) = unsafe { CloseHandle(snap) } {
        debug!(error = %e, "close_snapshot_failed");
    }
    Ok(found)
}

/// This process and its parent (usually the launching console).
pub fn excluded_pids() -> Vec<u32> {
    let me = process::id();
    let mut pids = vec![me];
    match parent_pid(me) {
        Ok(Some(parent)) => pids.push(parent),
        Ok(None) => debug!(pid = me, "parent_pid_not_found"),
        Err(e) => debug!(error = %e, "parent_pid_failed"),
    }
    pids
}
