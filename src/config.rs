//! Command-line and environment configuration.

use std::time::Duration;

use canvas::engine::Capability;
use clap::{Args, Parser, Subcommand};

pub const DEFAULT_REST_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/api";
pub const DEFAULT_STEP_MS: f64 = 1000.0 / 60.0;
pub const DEFAULT_REDRAW_HZ: f64 = 60.0;
pub const DEFAULT_VIEWPORT: &str = "1280x720";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid viewport '{0}' (expected WIDTHxHEIGHT)")]
    Viewport(String),
    #[error("step must be a positive number of milliseconds, got {0}")]
    Step(f64),
    #[error("redraw rate must be a positive number of hertz, got {0}")]
    RedrawRate(f64),
    #[error("invalid {name} '{url}'")]
    Url { name: &'static str, url: String },
    #[error("project uid must not be empty")]
    EmptyProject,
}

#[derive(Parser, Debug)]
#[command(name = "kinematic", about = "Kinematic scene editor: project store client and playback session")]
pub struct Cli {
    #[arg(long, env = "KINEMATIC_REST_URL", default_value = DEFAULT_REST_URL, global = true)]
    pub rest_url: String,

    #[arg(long, env = "KINEMATIC_WS_URL", default_value = DEFAULT_WS_URL, global = true)]
    pub ws_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List projects in the store.
    Projects,
    /// Create an empty project and print its uid.
    Create,
    /// Print a project's objects as JSON.
    Objects {
        #[arg(env = "KINEMATIC_PROJECT")]
        project: String,
    },
    /// Load a project and play back its solver stream.
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(env = "KINEMATIC_PROJECT")]
    pub project: String,

    /// Playback step in milliseconds.
    #[arg(long, env = "KINEMATIC_STEP_MS", default_value_t = DEFAULT_STEP_MS)]
    pub step_ms: f64,

    /// Redraw callbacks per second.
    #[arg(long, env = "KINEMATIC_REDRAW_HZ", default_value_t = DEFAULT_REDRAW_HZ)]
    pub redraw_hz: f64,

    #[arg(long, env = "KINEMATIC_VIEWPORT", default_value = DEFAULT_VIEWPORT)]
    pub viewport: String,

    /// Open the scene with edit capability.
    #[arg(long, env = "KINEMATIC_EDIT", default_value_t = false)]
    pub edit: bool,

    /// Write the final poses back to the store when the session ends.
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

/// Validated settings for one playback session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub rest_url: String,
    pub ws_url: String,
    pub project: String,
    pub step: Duration,
    pub redraw_period: Duration,
    pub viewport: (f64, f64),
    pub capability: Capability,
    pub save: bool,
}

impl SessionConfig {
    /// Validate raw arguments into a session config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first invalid setting.
    pub fn from_args(rest_url: &str, ws_url: &str, args: &RunArgs) -> Result<Self, ConfigError> {
        let project = args.project.trim();
        if project.is_empty() {
            return Err(ConfigError::EmptyProject);
        }
        Ok(Self {
            rest_url: parse_base_url("rest url", rest_url, &["http://", "https://"])?,
            ws_url: parse_base_url("websocket url", ws_url, &["ws://", "wss://"])?,
            project: project.to_owned(),
            step: parse_step(args.step_ms)?,
            redraw_period: parse_redraw_rate(args.redraw_hz)?,
            viewport: parse_viewport(&args.viewport)?,
            capability: if args.edit { Capability::Edit } else { Capability::View },
            save: args.save,
        })
    }
}

/// Check the scheme and strip trailing slashes.
///
/// # Errors
///
/// Returns [`ConfigError::Url`] when the url has none of `schemes`.
pub fn parse_base_url(name: &'static str, raw: &str, schemes: &[&str]) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = schemes
        .iter()
        .any(|scheme| trimmed.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
    if !has_host {
        return Err(ConfigError::Url { name, url: raw.to_owned() });
    }
    Ok(trimmed.to_owned())
}

/// Parse `WIDTHxHEIGHT` in CSS pixels.
///
/// # Errors
///
/// Returns [`ConfigError::Viewport`] for anything else, including
/// non-positive sizes.
pub fn parse_viewport(raw: &str) -> Result<(f64, f64), ConfigError> {
    let err = || ConfigError::Viewport(raw.to_owned());
    let (w, h) = raw.trim().split_once(['x', 'X']).ok_or_else(err)?;
    let width: f64 = w.trim().parse().map_err(|_| err())?;
    let height: f64 = h.trim().parse().map_err(|_| err())?;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(err());
    }
    Ok((width, height))
}

/// # Errors
///
/// Returns [`ConfigError::Step`] for a non-positive or non-finite step.
pub fn parse_step(ms: f64) -> Result<Duration, ConfigError> {
    if !ms.is_finite() || ms <= 0.0 {
        return Err(ConfigError::Step(ms));
    }
    Duration::try_from_secs_f64(ms / 1000.0).map_err(|_| ConfigError::Step(ms))
}

/// # Errors
///
/// Returns [`ConfigError::RedrawRate`] for a non-positive or non-finite rate.
pub fn parse_redraw_rate(hz: f64) -> Result<Duration, ConfigError> {
    if !hz.is_finite() || hz <= 0.0 {
        return Err(ConfigError::RedrawRate(hz));
    }
    Duration::try_from_secs_f64(1.0 / hz).map_err(|_| ConfigError::RedrawRate(hz))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
