use fund_chart_rs::api::{ChartOption, DisplayTimezone, IntradayChartBuilder, TrendChartBuilder};
use fund_chart_rs::core::{IntradayPoint, TrendPoint};
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: render_chart_option <intraday|trend> --input <path> [--output <path>] [--utc-offset-minutes <n>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Intraday,
    Trend,
}

#[derive(Debug)]
struct CliArgs {
    kind: ChartKind,
    input: PathBuf,
    output: Option<PathBuf>,
    utc_offset_minutes: i32,
}

fn main() {
    let _ = fund_chart_rs::telemetry::init_tracing_with_fallback("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;

    let option = match args.kind {
        ChartKind::Intraday => {
            let points: Vec<IntradayPoint> =
                serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
            IntradayChartBuilder::new()
                .build(&points)
                .map_err(|err| err.to_string())?
        }
        ChartKind::Trend => {
            let points: Vec<TrendPoint> =
                serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
            let timezone = DisplayTimezone::from_offset_minutes(args.utc_offset_minutes)
                .map_err(|err| err.to_string())?;
            TrendChartBuilder::new()
                .with_timezone(timezone)
                .build(&points)
                .map_err(|err| err.to_string())?
        }
    };

    let Some(option) = option else {
        eprintln!("series below rendering threshold; no chart option written");
        return Ok(());
    };
    write_option(args.output.as_deref(), &option)
}

fn write_option(output: Option<&Path>, option: &ChartOption) -> Result<(), String> {
    let payload = option
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    match output {
        Some(path) => fs::write(path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next().as_deref() {
        Some("intraday") => ChartKind::Intraday,
        Some("trend") => ChartKind::Trend,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut utc_offset_minutes = 0;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--utc-offset-minutes" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --utc-offset-minutes".to_owned())?;
                utc_offset_minutes = value
                    .parse()
                    .map_err(|err| format!("invalid --utc-offset-minutes `{value}`: {err}"))?;
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| "missing --input".to_owned())?;
    Ok(CliArgs {
        kind,
        input,
        output,
        utc_offset_minutes,
    })
}
