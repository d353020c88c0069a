//! `omc`: talk to an OMC receiver through a BLE bridge.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use omc_companion::{
    link, CliError, CliResult, CompanionConfig, Dispatcher, FrameOutcome, LogSink, RecordingSink,
    Session,
};
use omc_protocol::{Command, LedColor, PowerMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "omc", version, about = "OMC pet-tracker companion")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bridge address, overriding the configuration.
    #[arg(long, global = true, value_name = "ADDR")]
    address: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every update from the receiver until the link closes.
    Monitor,
    /// Set the harness LED to a palette colour.
    Led {
        /// Colour name or menu number (1-13).
        color: String,
    },
    /// Turn the buzzer on or off.
    Buzzer { state: Toggle },
    /// Start or stop the LED rainbow cycle.
    Rainbow { state: Toggle },
    /// Switch the harness power mode.
    PowerMode {
        /// live, saving, extreme, none, or a raw mode number.
        mode: String,
    },
    /// Run a frame through the inbound pipeline without connecting.
    Decode {
        /// Frame text, e.g. '{"msgType":0,"lat":40.1}'.
        json: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn is_on(self) -> bool {
        self == Toggle::On
    }
}

fn parse_power_mode(text: &str) -> CliResult<PowerMode> {
    match text.to_ascii_lowercase().as_str() {
        "live" => Ok(PowerMode::LiveTracking),
        "saving" => Ok(PowerMode::PowerSaving),
        "extreme" => Ok(PowerMode::ExtremePowerSaving),
        "none" => Ok(PowerMode::NoTracking),
        other => other
            .parse::<i64>()
            .map(PowerMode::from_raw)
            .map_err(|_| CliError::InvalidArgument(format!("unknown power mode {text:?}"))),
    }
}

fn parse_led(text: &str) -> CliResult<Command> {
    let color = text.parse::<LedColor>().map_err(|e| {
        let names: Vec<_> = LedColor::ALL.iter().map(LedColor::name).collect();
        CliError::InvalidArgument(format!("{e} (choose from: {})", names.join(", ")))
    })?;
    Ok(Command::led(color))
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_metrics(config: &CompanionConfig) -> CliResult<()> {
    let Some(listen) = config.metrics.listen else {
        return Ok(());
    };
    #[cfg(feature = "prometheus")]
    {
        omc_metrics::install_prometheus(listen).map_err(|e| CliError::Metrics(e.to_string()))?;
        info!(%listen, "serving metrics");
    }
    #[cfg(not(feature = "prometheus"))]
    tracing::warn!(%listen, "metrics.listen is set but omc was built without the prometheus feature");
    Ok(())
}

async fn open_session(session: &mut Session, address: &str) -> CliResult<link::Link> {
    let link = link::connect(address).await.map_err(|source| CliError::Connect {
        address: address.to_string(),
        source,
    })?;
    session.attach(Arc::new(link.transport.clone()));
    Ok(link)
}

async fn monitor(mut session: Session, address: &str) -> CliResult<()> {
    let mut link = open_session(&mut session, address).await?;
    let mut sink = LogSink::new(session.device());

    loop {
        tokio::select! {
            frame = link.frames.recv() => {
                let Some(frame) = frame else { break };
                session.handle_frame(&frame, &mut sink);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    session.detach();
    Ok(())
}

async fn send_one(mut session: Session, address: &str, command: Command) -> CliResult<()> {
    let mut link = open_session(&mut session, address).await?;
    let handle = session.send(&command)?;
    link.discard_frames_until(handle).await??;
    println!("sent {command}");
    Ok(())
}

fn decode(session: &Session, json: &str) -> CliResult<()> {
    let mut sink = RecordingSink::new();
    match session.handle_frame(json.as_bytes(), &mut sink) {
        FrameOutcome::Dispatched(kind) => {
            println!("{kind} message, {} sink writes", sink.len());
            for event in sink.events() {
                println!("  {event}");
            }
            Ok(())
        }
        FrameOutcome::Discarded => Err(CliError::InvalidArgument("malformed frame".to_string())),
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => CompanionConfig::load(path)?,
        None => CompanionConfig::default(),
    };
    init_tracing(&config.logging.filter);
    init_metrics(&config)?;

    let address = cli.address.unwrap_or_else(|| config.link.address.clone());
    let session = Session::new(config.device.name.clone(), Dispatcher::new(config.display.zone()));

    match cli.command {
        Commands::Monitor => monitor(session, &address).await,
        Commands::Led { color } => send_one(session, &address, parse_led(&color)?).await,
        Commands::Buzzer { state } => {
            send_one(session, &address, Command::SetBuzzer { on: state.is_on() }).await
        }
        Commands::Rainbow { state } => {
            send_one(session, &address, Command::SetRainbow { enabled: state.is_on() }).await
        }
        Commands::PowerMode { mode } => {
            let mode = parse_power_mode(&mode)?;
            send_one(session, &address, Command::SetPowerMode { mode }).await
        }
        Commands::Decode { json } => decode(&session, &json),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
