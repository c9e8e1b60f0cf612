// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.

//! Subcommand implementations.

use crate::cli::args::{Cli, OutputArgs};
use crate::cli::formatters::{TableFormatter, format_outcome};
use anyhow::{Context, Result, bail};
use solarcast_core::{
    ClientConfig, PredictionService, PredictionSession, RequestState, SessionHistory,
    render_history_svg,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;

/// Resolve the client configuration once, from file, environment and flags
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::resolve(cli.config.as_deref(), cli.api_url.clone())?;
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = Some(secs);
        config.validate()?;
    }
    Ok(config)
}

/// Submit every reading in order and print the outcome of each
///
/// Fails once all readings are processed if any prediction failed.
pub async fn run_predict<S, W>(
    session: &mut PredictionSession<S>,
    readings: &[String],
    output: &OutputArgs,
    out: &mut W,
) -> Result<()>
where
    S: PredictionService,
    W: Write,
{
    let mut failures = 0;

    for raw in readings {
        let line = submit_and_describe(session, raw).await?;
        if matches!(session.state(), RequestState::Failed(_)) {
            failures += 1;
        }
        writeln!(out, "{line}")?;
    }

    writeln!(out)?;
    write!(out, "{}", TableFormatter::format_history(session.history()))?;
    write_outputs(session.history(), output)?;

    if failures > 0 {
        bail!("{failures} of {} predictions failed", readings.len());
    }
    Ok(())
}

/// Line-oriented session: every line is a reading until `quit` or EOF
pub async fn run_interactive<S, R, W>(
    session: &mut PredictionSession<S>,
    input: R,
    output: &OutputArgs,
    out: &mut W,
) -> Result<()>
where
    S: PredictionService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(
        out,
        "Enter solar radiation (W/m²), 'history' to list predictions, 'quit' to exit"
    )?;

    let mut lines = input.lines();
    let read_result = loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        };

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break Ok(()),
            "history" => {
                write!(out, "{}", TableFormatter::format_history(session.history()))?;
            }
            raw => {
                let outcome = submit_and_describe(session, raw).await?;
                writeln!(out, "{outcome}")?;
            }
        }
        out.flush()?;
    };

    info!(
        "Session ended with {} prediction(s)",
        session.history().len()
    );
    // Predictions made before a read failure still get their chart and export
    write_outputs(session.history(), output)?;
    read_result.context("Failed to read input")
}

/// Submit one reading and render its outcome line
async fn submit_and_describe<S: PredictionService>(
    session: &mut PredictionSession<S>,
    raw: &str,
) -> Result<String> {
    session.submit(raw).await?;
    let state = session.state();
    let reading = match state {
        RequestState::Succeeded(_) => session.history().latest().map(|entry| entry.radiation),
        _ => None,
    };
    Ok(format_outcome(raw, reading, state))
}

pub fn run_config<W: Write>(config: &ClientConfig, out: &mut W) -> Result<()> {
    write!(out, "{}", config.to_toml()?)?;
    Ok(())
}

/// Write the requested chart and JSON export of the session history
pub fn write_outputs(history: &SessionHistory, output: &OutputArgs) -> Result<()> {
    if let Some(path) = &output.chart {
        let svg = render_history_svg(history, CHART_WIDTH, CHART_HEIGHT)
            .map_err(|e| anyhow::anyhow!("Failed to render chart: {e}"))?;
        std::fs::write(path, svg)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        debug!("Chart written to {}", path.display());
    }

    if let Some(path) = &output.export {
        let json = history.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        debug!("History exported to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use solarcast_core::PredictionClient;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_predict_prints_results_and_writes_outputs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/predict")
            .match_body(Matcher::Json(json!({"radiation": 850.0})))
            .with_status(200)
            .with_body(json!({"powerOutput": 245.5}).to_string())
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let output = OutputArgs {
            chart: Some(dir.path().join("chart.svg")),
            export: Some(dir.path().join("history.json")),
        };
        let mut session =
            PredictionSession::new(PredictionClient::for_base_url(server.url()).unwrap());
        let mut out = Vec::new();

        run_predict(&mut session, &["850".to_string()], &output, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("850 W/m² (moderate) → ⚡ 245.50 kW"));
        assert!(printed.contains("1 prediction(s) this session"));

        let svg = std::fs::read_to_string(dir.path().join("chart.svg")).unwrap();
        assert!(svg.starts_with("<svg"));
        let exported: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("history.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(exported, json!([{"radiation": 850.0, "powerOutput": 245.5}]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_predict_reports_failures() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/predict")
            .with_status(500)
            .create_async()
            .await;

        let mut session =
            PredictionSession::new(PredictionClient::for_base_url(server.url()).unwrap());
        let mut out = Vec::new();

        let result = run_predict(
            &mut session,
            &["850".to_string()],
            &OutputArgs::default(),
            &mut out,
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "1 of 1 predictions failed");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Unable to predict at the moment"));
        assert!(printed.contains("No predictions yet"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_interactive_session() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("POST", "/api/predict")
            .match_body(Matcher::Json(json!({"radiation": 500.0})))
            .with_status(200)
            .with_body(json!({"powerOutput": 120.0}).to_string())
            .create_async()
            .await;
        let second = server
            .mock("POST", "/api/predict")
            .match_body(Matcher::Json(json!({"radiation": 900.0})))
            .with_status(200)
            .with_body(json!({"powerOutput": 300.0}).to_string())
            .create_async()
            .await;

        let mut session =
            PredictionSession::new(PredictionClient::for_base_url(server.url()).unwrap());
        let input: &[u8] = b"500\n\nnot-a-number\n900\nhistory\nquit\n1200\n";
        let mut out = Vec::new();

        run_interactive(&mut session, input, &OutputArgs::default(), &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("500 W/m² (moderate) → ⚡ 120.00 kW"));
        assert!(printed.contains("not-a-number W/m² → ⚠️ Unable to predict at the moment"));
        assert!(printed.contains("900 W/m² (moderate) → ⚡ 300.00 kW"));
        assert!(printed.contains("2 prediction(s) this session"));
        assert!(!printed.contains("1200"));
        assert_eq!(
            session.history().series(),
            vec![(500.0, 120.0), (900.0, 300.0)]
        );
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_interactive_read_failure_still_writes_outputs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/predict")
            .match_body(Matcher::Json(json!({"radiation": 500.0})))
            .with_status(200)
            .with_body(json!({"powerOutput": 120.0}).to_string())
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let output = OutputArgs {
            chart: Some(dir.path().join("chart.svg")),
            export: Some(dir.path().join("history.json")),
        };
        let mut session =
            PredictionSession::new(PredictionClient::for_base_url(server.url()).unwrap());
        let input: &[u8] = b"500\n\xff\xfe\n900\n";
        let mut out = Vec::new();

        let err = run_interactive(&mut session, input, &output, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read input"));
        let exported: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("history.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(exported, json!([{"radiation": 500.0, "powerOutput": 120.0}]));
        let svg = std::fs::read_to_string(dir.path().join("chart.svg")).unwrap();
        assert!(svg.starts_with("<svg"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_predict_echoes_normalised_reading() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/predict")
            .match_body(Matcher::Json(json!({"radiation": 850.0})))
            .with_status(200)
            .with_body(json!({"powerOutput": 245.5}).to_string())
            .create_async()
            .await;

        let mut session =
            PredictionSession::new(PredictionClient::for_base_url(server.url()).unwrap());
        let mut out = Vec::new();

        run_predict(
            &mut session,
            &["8.5e2".to_string()],
            &OutputArgs::default(),
            &mut out,
        )
        .await
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("850 W/m² (moderate) → ⚡ 245.50 kW"));
        assert!(!printed.contains("8.5e2"));
        mock.assert_async().await;
    }

    #[test]
    fn test_resolve_config_applies_flags() {
        let cli = Cli::try_parse_from([
            "solarcast",
            "--api-url",
            "http://predict.local:9000/",
            "--timeout",
            "20",
            "config",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.base_url, "http://predict.local:9000");
        assert_eq!(config.request_timeout_secs, Some(20));

        let mut out = Vec::new();
        run_config(&config, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("base_url = \"http://predict.local:9000\""));
        assert!(printed.contains("request_timeout_secs = 20"));
    }

    #[test]
    fn test_resolve_config_rejects_zero_timeout() {
        let cli = Cli::try_parse_from([
            "solarcast",
            "--api-url",
            "http://predict.local:9000",
            "--timeout",
            "0",
            "config",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());
    }
}
