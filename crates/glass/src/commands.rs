//! Subcommand implementations.

use std::{io, sync::Arc};

use glass_engine::{Platform, Session, SessionCfg, recover_all};
use tokio::{runtime::Builder, signal};
use tokio_util::sync::CancellationToken;
use tracing::{Dispatch, debug, info};

use crate::{
    cli::{Commands, ListArgs, TargetArgs, TempArgs, WatchArgs},
    error::{Error, Result},
};

/// Dispatch a parsed command. Runs under the caller's default dispatcher.
pub fn run(command: &Commands, dispatch: &Dispatch) -> Result<()> {
    match command {
        Commands::Watch(args) => watch(args, dispatch),
        Commands::List(args) => list(args, dispatch),
        Commands::Temp(args) => temp(args, dispatch),
        Commands::Recover => recover(),
    }
}

/// The live window system.
#[cfg(windows)]
fn platform() -> Result<Arc<dyn Platform>> {
    Ok(Arc::new(win_winops::WinPlatform::new()))
}

/// The live window system.
#[cfg(not(windows))]
fn platform() -> Result<Arc<dyn Platform>> {
    Err(Error::UnsupportedPlatform)
}

/// Build a session for `target`, failing early when no term was given.
fn session(target: &TargetArgs, cfg: SessionCfg, dispatch: &Dispatch) -> Result<Session> {
    let terms = target.terms();
    if terms.is_empty() {
        return Err(Error::MissingTarget);
    }
    Ok(Session::new(platform()?, cfg, terms, dispatch.clone())?)
}

/// `watch`: poll until interrupted, then restore.
fn watch(args: &WatchArgs, dispatch: &Dispatch) -> Result<()> {
    let session = session(&args.target, args.session_cfg(), dispatch)?;
    println!("Press Ctrl+C to cancel.");

    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            match shutdown_signal().await {
                Ok(()) => debug!("shutdown_signal"),
                Err(e) => debug!(error = %e, "signal_listener_failed"),
            }
            token.cancel();
        });
        session.watch(cancel).await
    })?;
    Ok(())
}

/// Resolves on Ctrl+C or console close.
#[cfg(windows)]
async fn shutdown_signal() -> io::Result<()> {
    let mut close = signal::windows::ctrl_close()?;
    tokio::select! {
        r = signal::ctrl_c() => r,
        _ = close.recv() => Ok(()),
    }
}

/// Resolves on Ctrl+C.
#[cfg(not(windows))]
async fn shutdown_signal() -> io::Result<()> {
    signal::ctrl_c().await
}

/// `list`: print the tiers without changing any window.
fn list(args: &ListArgs, dispatch: &Dispatch) -> Result<()> {
    let listing = session(&args.target, SessionCfg::default(), dispatch)?.list()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{listing}");
    }
    Ok(())
}

/// `temp`: dim once and leave the windows as they are.
fn temp(args: &TempArgs, dispatch: &Dispatch) -> Result<()> {
    let listing = session(&args.target, args.session_cfg(), dispatch)?.apply_once()?;
    let dimmed: usize = listing.tiers.iter().skip(1).map(|t| t.windows.len()).sum();
    info!(dimmed, "temp_applied");
    Ok(())
}

/// `recover`: make every window opaque.
fn recover() -> Result<()> {
    let count = recover_all(platform()?.as_ref())?;
    info!(count, "recovered");
    Ok(())
}
