use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use nudge_utils::config::{parse_duration, OverlapPolicy};
use nudge_utils::motion::MotionKind;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "nudge",
    version,
    about = "Slide and shrink a box in your terminal, one tick at a time"
)]
pub struct CliArgs {
    /// KDL configuration file
    #[clap(long, short, value_parser, env = "NUDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Length of one animation, in seconds (`1.5`) or humantime (`1500ms`)
    #[clap(long, short, value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Milliseconds between two animation steps
    #[clap(long, value_parser)]
    pub tick_ms: Option<u64>,

    /// What to do with a request that arrives mid-animation
    #[clap(long, value_parser = parse_overlap)]
    pub overlap: Option<OverlapPolicy>,

    /// Comma separated motions to play in order, then exit
    /// (up, down, left, right, shrink-v, shrink-h)
    #[clap(long, short, value_delimiter = ',', value_parser = parse_motion)]
    pub press: Vec<MotionKind>,

    /// Print one JSON line per redraw instead of drawing the canvas
    #[clap(long)]
    pub headless: bool,

    #[clap(long, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_overlap(s: &str) -> Result<OverlapPolicy, String> {
    s.parse().map_err(|e: nudge_utils::NudgeError| e.to_string())
}

fn parse_motion(s: &str) -> Result<MotionKind, String> {
    s.parse().map_err(|e: nudge_utils::NudgeError| e.to_string())
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not one of off, error, warn, info, debug, trace", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["nudge"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.press.is_empty());
        assert!(!args.headless);
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_full_command_line() {
        let args = CliArgs::try_parse_from([
            "nudge",
            "--duration",
            "500ms",
            "--tick-ms",
            "10",
            "--overlap",
            "queue",
            "--press",
            "up,left,shrink-h",
            "--headless",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.duration, Some(Duration::from_millis(500)));
        assert_eq!(args.tick_ms, Some(10));
        assert_eq!(args.overlap, Some(OverlapPolicy::Queue));
        assert_eq!(
            args.press,
            vec![
                MotionKind::MoveUp,
                MotionKind::MoveLeft,
                MotionKind::ShrinkHorizontal
            ]
        );
        assert!(args.headless);
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(CliArgs::try_parse_from(["nudge", "--press", "up,spin"]).is_err());
        assert!(CliArgs::try_parse_from(["nudge", "--duration", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["nudge", "--duration", "1e30"]).is_err());
        assert!(CliArgs::try_parse_from(["nudge", "--overlap", "maybe"]).is_err());
    }
}
