//! Subscriber setup.
//!
//! All log output goes to stderr: stdout belongs to prompts, tables and the
//! `--json` summary.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// How loud git-cp's own logging is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Level for the `git_cp` target; `RUST_LOG` can still add directives
    pub level: Level,
    /// Source locations, targets and span open/close events
    pub detailed: bool,
    pub ansi_colors: bool,
}

impl Default for TelemetryConfig {
    /// Warnings only, so logs don't interleave with prompts.
    fn default() -> Self {
        Self {
            level: Level::WARN,
            detailed: false,
            ansi_colors: std::io::stderr().is_terminal(),
        }
    }
}

impl TelemetryConfig {
    /// `--verbose`: every git invocation and session transition.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            detailed: true,
            ..Self::default()
        }
    }

    /// `--json`: errors only, never colored.
    pub fn production() -> Self {
        Self {
            level: Level::ERROR,
            detailed: false,
            ansi_colors: false,
        }
    }

    /// Filter directive for this crate's targets (including `git_cp::cmd`).
    pub fn directive(&self) -> String {
        format!("git_cp={}", self.level.to_string().to_lowercase())
    }
}

/// Install the global subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into())
        .add_directive(config.directive().parse()?);

    let span_events = if config.detailed {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.detailed)
        .with_file(config.detailed)
        .with_line_number(config.detailed)
        .with_span_events(span_events);

    let fmt_layer = if config.detailed {
        fmt_layer.boxed()
    } else {
        fmt_layer.compact().boxed()
    };

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(filter).with(fmt_layer),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(TelemetryConfig::default().level, Level::WARN);

        let dev = TelemetryConfig::development();
        assert_eq!(dev.level, Level::DEBUG);
        assert!(dev.detailed);

        let prod = TelemetryConfig::production();
        assert_eq!(prod.level, Level::ERROR);
        assert!(!prod.ansi_colors);
    }

    #[test]
    fn test_directive_parses() {
        let directive = TelemetryConfig::development().directive();
        assert_eq!(directive, "git_cp=debug");
        assert!(directive
            .parse::<tracing_subscriber::filter::Directive>()
            .is_ok());
    }
}
