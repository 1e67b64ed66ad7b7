mod cli;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::Select;
use log::{info, warn};
use serde_json::json;

use nudge_client::{AnimationController, Button, ControllerEvent, TargetView, TerminalView};
use nudge_server::{Completion, Redraw};
use nudge_utils::config::Config;
use nudge_utils::logging::configure_logger;
use nudge_utils::motion::MotionKind;

use crate::cli::CliArgs;

type Controller = AnimationController<TerminalView>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = CliArgs::parse();
    configure_logger(opts.log_level);

    let config = load_config(&opts)?;
    info!(
        "Tick {:?}, duration {:?}, overlap {}",
        config.driver.tick_interval, config.duration, config.driver.overlap
    );

    let view = TerminalView::new(config.canvas, config.target);
    let mut controller = AnimationController::spawn(view, &config.driver, config.duration)
        .context("failed to start the animation driver")?;
    controller.on_layout()?;

    let output = if opts.headless {
        Output::Json
    } else {
        Output::Canvas
    };
    output.initial(controller.view_mut())?;

    if opts.press.is_empty() {
        interactive(&mut controller, output).await?;
    } else {
        for kind in &opts.press {
            play(&mut controller, *kind, output).await?;
        }
    }

    controller.shutdown().await?;
    Ok(())
}

fn load_config(opts: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match &opts.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(duration) = opts.duration {
        config.duration = duration;
    }
    if let Some(ms) = opts.tick_ms {
        config.driver.tick_interval = Duration::from_millis(ms);
    }
    if let Some(overlap) = opts.overlap {
        config.driver.overlap = overlap;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn interactive(controller: &mut Controller, output: Output) -> anyhow::Result<()> {
    let mut choices: Vec<(String, Option<MotionKind>)> = Button::ALL
        .iter()
        .map(|button| (button.to_string(), Some(button.motion_kind())))
        .collect();
    for kind in [MotionKind::ShrinkVertical, MotionKind::ShrinkHorizontal] {
        choices.push((format!("{} {}", kind.glyph(), kind), Some(kind)));
    }
    choices.push(("Quit".to_string(), None));

    let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();
    let mut selected = 0;
    loop {
        let items = labels.clone();
        let pick = tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt("Nudge the box")
                .items(&items)
                .default(selected)
                .interact_opt()
        })
        .await
        .context("prompt task failed")?
        .context("failed to read selection")?;

        let Some(index) = pick else {
            return Ok(());
        };
        let Some(kind) = choices[index].1 else {
            return Ok(());
        };
        selected = index;
        play(controller, kind, output).await?;
    }
}

/// Trigger one motion and pump the controller until it has reset
async fn play(
    controller: &mut Controller,
    kind: MotionKind,
    output: Output,
) -> anyhow::Result<()> {
    let accepted = match Button::for_kind(kind) {
        Some(button) => controller.press(button).await?,
        None => controller.trigger(kind).await?,
    };
    if !accepted {
        warn!("{} ignored, an animation is already running", kind);
        return Ok(());
    }

    loop {
        match controller.next_event().await? {
            ControllerEvent::Redrawn(redraw) => output.redraw(controller.view_mut(), &redraw)?,
            ControllerEvent::Completed(completion) => {
                output.completed(controller.view_mut(), &completion)?;
                return Ok(());
            }
            ControllerEvent::DriverStopped => bail!("animation driver stopped unexpectedly"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Output {
    /// Clear the screen and draw the canvas on every redraw
    Canvas,
    /// One JSON object per line
    Json,
}

impl Output {
    fn initial(&self, view: &mut TerminalView) -> io::Result<()> {
        match self {
            Output::Canvas => draw(view, "ready"),
            Output::Json => Ok(()),
        }
    }

    fn redraw(&self, view: &mut TerminalView, redraw: &Redraw) -> io::Result<()> {
        match self {
            Output::Canvas => draw(view, &format!("tick {}", redraw.tick)),
            Output::Json => emit(json!({
                "event": "redraw",
                "run": redraw.run.map(|run| run.0),
                "tick": redraw.tick,
                "geometry": redraw.geometry,
            })),
        }
    }

    fn completed(&self, view: &mut TerminalView, completion: &Completion) -> io::Result<()> {
        match self {
            Output::Canvas => draw(
                view,
                &format!(
                    "{} {} after {} ticks, reset",
                    completion.kind, completion.outcome, completion.ticks
                ),
            ),
            Output::Json => emit(json!({
                "event": "completed",
                "run": completion.run.0,
                "kind": completion.kind.to_string(),
                "outcome": completion.outcome.to_string(),
                "ticks": completion.ticks,
                "geometry": completion.geometry,
                "reset": view.layout_geometry(),
            })),
        }
    }
}

fn draw(view: &mut TerminalView, status: &str) -> io::Result<()> {
    let Some(frame) = view.take_frame() else {
        return Ok(());
    };
    let mut stdout = io::stdout().lock();
    // clear screen, cursor home
    writeln!(stdout, "\x1b[2J\x1b[H{}\n{}", frame, status)?;
    stdout.flush()
}

fn emit(value: serde_json::Value) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", value)?;
    stdout.flush()
}
