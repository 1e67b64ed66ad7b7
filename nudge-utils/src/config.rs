// Nudge Configuration
//
// Optional KDL file, every key optional:
//
// ```kdl
// tick_interval_ms 25
// event_capacity 64
// overlap "reject"
// duration "1500ms"
// canvas cols=48 rows=16 cell=10
// target width=120 height=80 top=60 left=200 bottom=0 right=0
// ```

use kdl::{KdlDocument, KdlNode, KdlValue};
use log::warn;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::consts::{
    DEFAULT_DURATION, DEFAULT_EVENT_CAPACITY, DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL,
    MIN_TICK_INTERVAL,
};
use crate::errors::{NudgeError, NudgeResult};
use crate::geometry::RectState;

/// What the driver does with a request that arrives while another is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Refuse the new request; the running animation is untouched
    #[default]
    Reject,
    /// Stop the running animation where it is and start the new one
    Preempt,
    /// Run the new request after everything already accepted
    Queue,
}

impl FromStr for OverlapPolicy {
    type Err = NudgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(OverlapPolicy::Reject),
            "preempt" => Ok(OverlapPolicy::Preempt),
            "queue" => Ok(OverlapPolicy::Queue),
            _ => Err(NudgeError::UnknownOverlapPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::Reject => write!(f, "reject"),
            OverlapPolicy::Preempt => write!(f, "preempt"),
            OverlapPolicy::Queue => write!(f, "queue"),
        }
    }
}

/// Configuration for the background driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Pause between two animation steps
    pub tick_interval: Duration,

    /// Capacity of the redraw channel (bounded so a slow renderer throttles the driver)
    pub event_capacity: usize,

    pub overlap: OverlapPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            overlap: OverlapPolicy::default(),
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> NudgeResult<()> {
        if !(MIN_TICK_INTERVAL..=MAX_TICK_INTERVAL).contains(&self.tick_interval) {
            return Err(NudgeError::InvalidTickInterval(self.tick_interval));
        }
        if self.event_capacity == 0 {
            return Err(NudgeError::config_value("event_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

/// Character canvas used by the terminal view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    pub cols: u16,
    pub rows: u16,
    /// Pixels covered by one character cell, on both axes
    pub cell: u16,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            cols: 48,
            rows: 16,
            cell: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub driver: DriverConfig,
    /// Duration of one button-triggered animation
    pub duration: Duration,
    pub canvas: CanvasConfig,
    /// Layout of the target element before the first animation
    pub target: RectState,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: DriverConfig::default(),
            duration: DEFAULT_DURATION,
            canvas: CanvasConfig::default(),
            target: RectState::new(120, 80).with_margins(60, 0, 200, 0),
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> NudgeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| NudgeError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_kdl(&text)
    }

    pub fn from_kdl(text: &str) -> NudgeResult<Self> {
        let document: KdlDocument = text
            .parse()
            .map_err(|e: kdl::KdlError| NudgeError::ConfigParse(e.to_string()))?;

        let mut config = Config::default();
        for node in document.nodes() {
            let name = node.name().value();
            match name {
                "tick_interval_ms" => {
                    let ms = positive_int(name, first_arg(node))?;
                    config.driver.tick_interval = Duration::from_millis(ms);
                }
                "event_capacity" => {
                    config.driver.event_capacity = positive_int(name, first_arg(node))? as usize;
                }
                "overlap" => {
                    config.driver.overlap = string_arg(name, first_arg(node))?.parse()?;
                }
                "duration" => {
                    config.duration = match first_arg(node) {
                        Some(value) if value.as_string().is_some() => {
                            parse_duration(string_arg(name, Some(value))?)?
                        }
                        Some(value) => duration_from_number(name, value)?,
                        None => return Err(NudgeError::config_value(name, "missing value")),
                    };
                }
                "canvas" => {
                    let canvas = &mut config.canvas;
                    canvas.cols = property(node, "cols", canvas.cols as i64)? as u16;
                    canvas.rows = property(node, "rows", canvas.rows as i64)? as u16;
                    canvas.cell = property(node, "cell", canvas.cell as i64)? as u16;
                }
                "target" => {
                    let target = &mut config.target;
                    target.width = property(node, "width", target.width as i64)? as i32;
                    target.height = property(node, "height", target.height as i64)? as i32;
                    target.top_margin = property(node, "top", target.top_margin as i64)? as i32;
                    target.bottom_margin =
                        property(node, "bottom", target.bottom_margin as i64)? as i32;
                    target.left_margin = property(node, "left", target.left_margin as i64)? as i32;
                    target.right_margin =
                        property(node, "right", target.right_margin as i64)? as i32;
                }
                other => warn!("Ignoring unknown config node '{}'", other),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> NudgeResult<()> {
        self.driver.validate()?;
        if self.duration.is_zero() {
            return Err(NudgeError::InvalidDuration("duration must be positive".to_string()));
        }
        let canvas = &self.canvas;
        if canvas.cols == 0 || canvas.rows == 0 || canvas.cell == 0 {
            return Err(NudgeError::config_value(
                "canvas",
                "cols, rows and cell must all be at least 1",
            ));
        }
        if self.target.width < 0 || self.target.height < 0 {
            return Err(NudgeError::config_value("target", "size cannot be negative"));
        }
        Ok(())
    }
}

/// Parse a duration given either as plain seconds (`1.5`) or in humantime
/// form (`1500ms`, `2s`)
pub fn parse_duration(text: &str) -> NudgeResult<Duration> {
    let text = text.trim();
    let duration = match text.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Duration::try_from_secs_f64(secs)
            .map_err(|e| NudgeError::InvalidDuration(format!("{} seconds: {}", secs, e)))?,
        Ok(secs) => {
            return Err(NudgeError::InvalidDuration(format!(
                "{} seconds is not a positive, finite duration",
                secs
            )))
        }
        Err(_) => humantime::parse_duration(text)
            .map_err(|e| NudgeError::InvalidDuration(format!("'{}': {}", text, e)))?,
    };
    if duration.is_zero() {
        return Err(NudgeError::InvalidDuration("duration must be positive".to_string()));
    }
    Ok(duration)
}

fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.get(0).map(|entry| entry.value())
}

fn string_arg<'a>(key: &str, value: Option<&'a KdlValue>) -> NudgeResult<&'a str> {
    value
        .and_then(|v| v.as_string())
        .ok_or_else(|| NudgeError::config_value(key, "expected a string"))
}

fn positive_int(key: &str, value: Option<&KdlValue>) -> NudgeResult<u64> {
    match value.and_then(|v| v.as_i64()) {
        Some(n) if n > 0 => Ok(n as u64),
        Some(n) => Err(NudgeError::config_value(key, format!("{} is not positive", n))),
        None => Err(NudgeError::config_value(key, "expected an integer")),
    }
}

fn duration_from_number(key: &str, value: &KdlValue) -> NudgeResult<Duration> {
    let secs = value
        .as_f64()
        .or_else(|| value.as_i64().map(|n| n as f64))
        .ok_or_else(|| NudgeError::config_value(key, "expected seconds or a duration string"))?;
    parse_duration(&secs.to_string())
}

fn property(node: &KdlNode, key: &str, default: i64) -> NudgeResult<i64> {
    let name = node.name().value();
    match node.get(key) {
        Some(entry) => {
            let value = entry.value().as_i64().ok_or_else(|| {
                NudgeError::config_value(&format!("{}.{}", name, key), "expected an integer")
            })?;
            if value < i32::MIN as i64 || value > i32::MAX as i64 {
                return Err(NudgeError::config_value(
                    &format!("{}.{}", name, key),
                    "out of range",
                ));
            }
            if name == "canvas" && !(0..=u16::MAX as i64).contains(&value) {
                return Err(NudgeError::config_value(
                    &format!("{}.{}", name, key),
                    "out of range",
                ));
            }
            Ok(value)
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.driver.tick_interval, Duration::from_millis(25));
        assert_eq!(config.driver.overlap, OverlapPolicy::Reject);
        assert_eq!(config.duration, Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_kdl_full_document() {
        let config = Config::from_kdl(
            r#"
            tick_interval_ms 40
            event_capacity 8
            overlap "preempt"
            duration "2s"
            canvas cols=20 rows=10 cell=5
            target width=30 height=20 top=10 left=15
            "#,
        )
        .unwrap();

        assert_eq!(config.driver.tick_interval, Duration::from_millis(40));
        assert_eq!(config.driver.event_capacity, 8);
        assert_eq!(config.driver.overlap, OverlapPolicy::Preempt);
        assert_eq!(config.duration, Duration::from_secs(2));
        assert_eq!(
            config.canvas,
            CanvasConfig {
                cols: 20,
                rows: 10,
                cell: 5
            }
        );
        assert_eq!(config.target, RectState::new(30, 20).with_margins(10, 0, 15, 0));
    }

    #[test]
    fn test_from_kdl_numeric_duration() {
        let config = Config::from_kdl("duration 0.5").unwrap();
        assert_eq!(config.duration, Duration::from_millis(500));
    }

    #[test]
    fn test_from_kdl_partial_keeps_defaults() {
        let config = Config::from_kdl("canvas cols=80").unwrap();
        assert_eq!(config.canvas.cols, 80);
        assert_eq!(config.canvas.rows, CanvasConfig::default().rows);
        assert_eq!(config.driver, DriverConfig::default());
    }

    #[test]
    fn test_from_kdl_rejects_bad_values() {
        assert!(matches!(
            Config::from_kdl("tick_interval_ms 0"),
            Err(NudgeError::ConfigValue { .. })
        ));
        assert!(matches!(
            Config::from_kdl(r#"overlap "sometimes""#),
            Err(NudgeError::UnknownOverlapPolicy(_))
        ));
        assert!(matches!(
            Config::from_kdl(r#"duration "-1s""#),
            Err(NudgeError::InvalidDuration(_))
        ));
        assert!(matches!(
            Config::from_kdl("canvas cell=0"),
            Err(NudgeError::ConfigValue { .. })
        ));
        assert!(matches!(
            Config::from_kdl("canvas {"),
            Err(NudgeError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_parse_duration_forms() {
        assert_eq!(parse_duration("1.5").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("0ms").is_err());
        assert!(parse_duration("soon").is_err());
        // too large for a Duration
        assert!(matches!(
            parse_duration("1e30"),
            Err(NudgeError::InvalidDuration(_))
        ));
        assert!(matches!(
            Config::from_kdl("duration 1e30"),
            Err(NudgeError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "overlap \"queue\"").unwrap();

        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.driver.overlap, OverlapPolicy::Queue);

        let missing = Config::from_path(Path::new("/definitely/not/here.kdl"));
        assert!(matches!(missing, Err(NudgeError::ConfigRead { .. })));
    }

    #[test]
    fn test_driver_config_validation() {
        let config = DriverConfig {
            tick_interval: Duration::from_micros(10),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NudgeError::InvalidTickInterval(_))
        ));

        let config = DriverConfig {
            tick_interval: Duration::from_millis(i64::MAX as u64),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NudgeError::InvalidTickInterval(_))
        ));
        assert!(matches!(
            Config::from_kdl("tick_interval_ms 9223372036854775807"),
            Err(NudgeError::InvalidTickInterval(_))
        ));

        let config = DriverConfig {
            tick_interval: MAX_TICK_INTERVAL,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
