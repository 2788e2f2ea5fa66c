//! Command-line interface definitions for glass.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use glass_engine::{CURVE_RANGE, Fade, SessionCfg, split_terms};
use logging::LogArgs;

/// Command-line interface for the `glass` binary.
#[derive(Parser, Debug)]
#[command(
    name = "glass",
    about = "Make the windows stacked over a target translucent",
    version
)]
pub struct Cli {
    /// Logging controls shared across glass binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep the windows over the target translucent until Ctrl+C.
    #[command(visible_alias = "w")]
    Watch(WatchArgs),

    /// Print the windows stacked over the target, grouped by depth.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Apply translucency once and exit without restoring.
    Temp(TempArgs),

    /// Make every window fully opaque.
    Recover,
}

/// Target window selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Target title (case-insensitive substring; line breaks separate terms).
    #[arg(short = 't', long, value_name = "TITLE")]
    pub target: Option<String>,

    /// More target titles, each a separate term.
    #[arg(value_name = "TITLE")]
    pub titles: Vec<String>,
}

impl TargetArgs {
    /// `--target` terms followed by the positional titles, empty ones dropped.
    pub fn terms(&self) -> Vec<String> {
        self.target
            .iter()
            .chain(&self.titles)
            .flat_map(|t| split_terms(t))
            .collect()
    }
}

/// Opacity curve parameters.
#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    /// Dimming strength in percent (0 leaves windows opaque).
    #[arg(
        short = 'a',
        long,
        default_value_t = 50,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub alpha: u8,

    /// Exponent applied to depth (1.0 to 3.0).
    #[arg(short = 'c', long, default_value_t = 2.0, value_parser = parse_curve)]
    pub curve: f64,
}

/// Parse and range-check `--curve`.
fn parse_curve(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    let (lo, hi) = CURVE_RANGE;
    if (lo..=hi).contains(&v) {
        Ok(v)
    } else {
        Err(format!("curve should be between {lo:.1} and {hi:.1}"))
    }
}

/// Arguments for `watch`.
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Which windows to keep visible.
    #[command(flatten)]
    pub target: TargetArgs,

    /// Opacity curve.
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Poll interval.
    #[arg(
        short = 'i',
        long,
        value_parser = humantime::parse_duration,
        default_value = "250ms",
        value_name = "DURATION"
    )]
    pub interval: Duration,

    /// Restore every window and exit after this long.
    #[arg(long, value_parser = humantime::parse_duration, value_name = "DURATION")]
    pub timeout: Option<Duration>,

    /// Fade duration for the foreground window (at most 300ms).
    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "200ms",
        value_name = "DURATION"
    )]
    pub fade: Duration,

    /// Pause between fade steps.
    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "50ms",
        value_name = "DURATION"
    )]
    pub fade_step: Duration,
}

impl WatchArgs {
    /// Session configuration for these flags.
    pub fn session_cfg(&self) -> SessionCfg {
        SessionCfg {
            percent: self.curve.alpha,
            curve: self.curve.curve,
            interval: self.interval,
            recover_after: self.timeout,
            fade: Fade {
                timeout: self.fade,
                wait: self.fade_step,
            },
        }
    }
}

/// Arguments for `list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Which windows to list occluders for.
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print JSON instead of the text listing.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `temp`.
#[derive(Args, Debug, Clone)]
pub struct TempArgs {
    /// Which windows to keep visible.
    #[command(flatten)]
    pub target: TargetArgs,

    /// Opacity curve.
    #[command(flatten)]
    pub curve: CurveArgs,
}

impl TempArgs {
    /// Session configuration for these flags.
    pub fn session_cfg(&self) -> SessionCfg {
        SessionCfg {
            percent: self.curve.alpha,
            curve: self.curve.curve,
            ..SessionCfg::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse")
    }

    #[test]
    fn watch_defaults() {
        let cli = parse(&["glass", "watch", "Notepad"]);
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        let cfg = args.session_cfg();
        assert_eq!(cfg, SessionCfg::default());
        assert_eq!(args.target.terms(), vec!["Notepad"]);
    }

    #[test]
    fn watch_flags_map_onto_session() {
        let cli = parse(&[
            "glass", "w", "-t", "Editor", "Term", "-a", "20", "-c", "1.5", "-i", "1s",
            "--timeout", "2m", "--fade", "100ms", "--fade-step", "25ms",
        ]);
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.target.terms(), vec!["Editor", "Term"]);
        let cfg = args.session_cfg();
        assert_eq!(cfg.percent, 20);
        assert_eq!(cfg.curve, 1.5);
        assert_eq!(cfg.interval, Duration::from_secs(1));
        assert_eq!(cfg.recover_after, Some(Duration::from_secs(120)));
        assert_eq!(cfg.fade.timeout, Duration::from_millis(100));
        assert_eq!(cfg.fade.wait, Duration::from_millis(25));
    }

    #[test]
    fn out_of_range_alpha_and_curve_are_rejected() {
        assert!(Cli::try_parse_from(["glass", "watch", "x", "-a", "101"]).is_err());
        assert!(Cli::try_parse_from(["glass", "temp", "x", "-c", "0.5"]).is_err());
        assert!(Cli::try_parse_from(["glass", "temp", "x", "-c", "3.1"]).is_err());
        assert!(Cli::try_parse_from(["glass", "temp", "x", "-c", "abc"]).is_err());
    }

    #[test]
    fn target_with_line_breaks_splits() {
        let t = TargetArgs {
            target: Some("one\ntwo\r\n".into()),
            titles: vec!["three".into(), String::new()],
        };
        assert_eq!(t.terms(), vec!["one", "two", "three"]);
        assert!(TargetArgs::default().terms().is_empty());
    }

    #[test]
    fn list_json_and_verbose() {
        let cli = parse(&["glass", "-v", "ls", "--json", "Calc"]);
        assert!(cli.log.debug);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert!(args.json);
        assert_eq!(args.target.terms(), vec!["Calc"]);
    }

    #[test]
    fn recover_takes_no_target() {
        assert!(matches!(parse(&["glass", "recover"]).command, Commands::Recover));
    }
}
