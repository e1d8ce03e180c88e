use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use artnet_tools_core::{
    ARTDMX_OPCODE, ARTNET_PORT, ApSettings, ConfigPayload, EffectConfig, EffectMode, Endpoint,
    EndpointError, Frame, FrameHeader, InterfaceSource, RainbowParams, SequenceFilter, StationList, SystemInterfaces,
    UniverseShift, build_payload, color_from_hex, decode_frame_header, encode_dmx_frame,
    resolve_endpoint,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::Rng;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

mod logging;
mod net;

#[derive(Parser, Debug)]
#[command(name = "artnet-tools")]
#[command(version)]
#[command(
    about = "Art-Net relay, monitor and sender, plus remote setup for ESP Art-Net receivers.",
    long_about = None,
    after_help = "Examples:\n  artnet-tools networks\n  artnet-tools print -i '2.*'\n  artnet-tools relay -i '2.*' -o '192.*'\n  artnet-tools send -t rainbow -u 1\n  artnet-tools setup dmx 1 0"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List network interfaces and their IPv4 addresses.
    Networks {
        /// Print the interface list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forward every datagram from one network to the broadcast address of another.
    Relay(RelayArgs),
    /// Print received Art-Net frames.
    Print(PrintArgs),
    /// Send animated ArtDMX frames.
    Send(SendArgs),
    /// Send a configuration command to ESP Art-Net receivers.
    Setup(SetupArgs),
}

#[derive(Args, Debug)]
struct RelayArgs {
    /// Interface or address pattern of the Art-Net network
    #[arg(short, long, default_value = "2.*")]
    input: String,

    /// Interface or address pattern of the destination network
    #[arg(short, long, default_value = "192.*")]
    output: String,

    /// Art-Net port
    #[arg(short = 'P', long, default_value_t = ARTNET_PORT)]
    port: u16,

    /// Destination port (defaults to --port)
    #[arg(long)]
    destination_port: Option<u16>,
}

#[derive(Args, Debug)]
struct PrintArgs {
    /// Interface or address pattern of the Art-Net network
    #[arg(short, long, default_value = "2.*")]
    input: String,

    /// Art-Net port
    #[arg(short = 'P', long, default_value_t = ARTNET_PORT)]
    port: u16,

    /// Print one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Skip ArtDMX frames whose sequence number is stale
    #[arg(long)]
    drop_stale: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum EffectKind {
    Default,
    #[value(alias = "full_range")]
    FullRange,
    Rainbow,
    Chain,
    #[value(alias = "chain_reversed")]
    ChainReversed,
}

impl From<EffectKind> for EffectMode {
    fn from(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Default => EffectMode::Default,
            EffectKind::FullRange => EffectMode::FullRange,
            EffectKind::Rainbow => EffectMode::Rainbow,
            EffectKind::Chain => EffectMode::Chain,
            EffectKind::ChainReversed => EffectMode::ChainReversed,
        }
    }
}

#[derive(Args, Debug)]
struct SendArgs {
    /// DMX address of the receiver (leading zero bytes)
    #[arg(short, long, default_value_t = 0)]
    shift: u16,

    /// Number of LEDs
    #[arg(short, long, default_value_t = 34)]
    number: u16,

    /// Art-Net universe
    #[arg(short, long, default_value_t = 1)]
    universe: u16,

    /// Seconds between frames (defaults depend on --type)
    #[arg(short, long, allow_negative_numbers = true)]
    delay: Option<f64>,

    /// Interface or address pattern of the destination network
    #[arg(short = 'N', long, default_value = "192.*")]
    network: String,

    /// Send to this address instead of a network broadcast
    #[arg(short = 'A', long)]
    address: Option<Ipv4Addr>,

    /// Art-Net port
    #[arg(short = 'P', long, default_value_t = ARTNET_PORT)]
    port: u16,

    /// Effect to send
    #[arg(short = 't', long = "type", value_enum, default_value_t = EffectKind::Default)]
    effect: EffectKind,

    /// Stop after this many frames
    #[arg(short, long)]
    count: Option<u64>,

    /// Rainbow frame delay in ms, rounded to receiver ticks
    #[arg(long, alias = "rainbow_delay", default_value_t = 0x50)]
    rainbow_delay: u16,

    /// Rainbow hue increment per time step
    #[arg(long, alias = "rainbow_time_step", default_value_t = 1)]
    rainbow_time_step: u16,

    /// Rainbow hue increment per pixel
    #[arg(long, alias = "rainbow_length_step", default_value_t = 1)]
    rainbow_length_step: u16,

    /// Colour of the first pixel at T=0
    #[arg(long, alias = "rainbow_start_color", default_value = "#880000")]
    rainbow_start_color: String,

    /// Tint colour
    #[arg(long, alias = "rainbow_tint_color", default_value = "#000000")]
    rainbow_tint_color: String,

    /// Tint weight: col * (255 - weight) + tint * weight
    #[arg(long, alias = "rainbow_tint_value", default_value_t = 0)]
    rainbow_tint_value: u8,
}

#[derive(Args, Debug)]
struct SetupArgs {
    /// Repeat the command with this delay in seconds; send once if absent
    #[arg(short, long, allow_negative_numbers = true)]
    delay: Option<f64>,

    /// Interface or address pattern of the destination network
    #[arg(short = 'N', long, default_value = "192.*")]
    network: String,

    /// Send to this address instead of a network broadcast
    #[arg(short = 'A', long)]
    address: Option<Ipv4Addr>,

    /// Art-Net port
    #[arg(short = 'P', long, default_value_t = ARTNET_PORT)]
    port: u16,

    #[command(subcommand)]
    setting: Setting,
}

#[derive(Subcommand, Debug)]
enum Setting {
    /// Onboard access point settings.
    #[command(visible_alias = "access-point")]
    Ap {
        /// Keep the access point enabled while connected to a station
        #[arg(short = 'a', long, alias = "ap_always")]
        ap_always: bool,

        /// SSID template; every '#' is replaced by a hex digit of the device id,
        /// filled right to left
        ssid: String,

        /// Password (empty for an open access point, otherwise 8+ characters)
        #[arg(default_value = "")]
        password: String,
    },
    /// Replace the list of stations the receiver connects to.
    #[command(visible_alias = "stations")]
    Sta {
        /// ssid1 password1 [ssid2 password2 ...]; use "" for an open station
        #[arg(required = true, num_args = 1..)]
        stations: Vec<String>,
    },
    /// Set the universe and DMX start address.
    Dmx {
        /// Art-Net universe number
        universe: u16,
        /// DMX address where this device's data starts
        shift: u16,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Networks { json } => cmd_networks(&SystemInterfaces, json),
        Commands::Relay(args) => cmd_relay(&SystemInterfaces, args),
        Commands::Print(args) => cmd_print(&SystemInterfaces, args),
        Commands::Send(args) => cmd_send(&SystemInterfaces, args),
        Commands::Setup(args) => cmd_setup(&SystemInterfaces, args, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<EndpointError> for CliError {
    fn from(err: EndpointError) -> Self {
        let hint = match err {
            EndpointError::NotFound { .. } | EndpointError::InvalidPattern { .. } => {
                Some("run `artnet-tools networks` to list interfaces and addresses".to_string())
            }
            EndpointError::Unsupported => Some("pass an explicit address with -A".to_string()),
            EndpointError::Enumeration(_) => None,
        };
        CliError::new(err.to_string(), hint)
    }
}

fn cmd_networks(source: &dyn InterfaceSource, json: bool) -> Result<(), CliError> {
    let interfaces: Vec<_> = source
        .interfaces()?
        .into_iter()
        .filter(|info| !info.addresses.is_empty())
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&interfaces).context("JSON serialization failed")?;
        println!("{}", out);
        return Ok(());
    }
    for info in &interfaces {
        println!("{}\n", info);
    }
    Ok(())
}

fn cmd_relay(source: &dyn InterfaceSource, args: RelayArgs) -> Result<(), CliError> {
    let input = resolve_endpoint(source, &args.input)?;
    let output = resolve_endpoint(source, &args.output)?;
    let target = SocketAddrV4::new(output.broadcast, args.destination_port.unwrap_or(args.port));

    let receiver = net::bind_receiver(input.address, args.port)
        .with_context(|| format!("Failed to bind {}:{}", input.address, args.port))?;
    let sender = net::broadcast_sender().context("Failed to create sending socket")?;
    info!(from = %input, to = %target, "relaying");

    let mut buf = [0u8; net::RECV_BUFFER_LEN];
    loop {
        let (len, from) = match receiver.recv_from(&mut buf) {
            Ok(received) => received,
            Err(err) => {
                warn!(error = %err, "receive failed");
                continue;
            }
        };
        sender
            .send_to(&buf[..len], target)
            .with_context(|| format!("Failed to send to {}", target))?;
        debug!(%from, len, "relayed datagram");
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    received_at: String,
    source: String,
    #[serde(flatten)]
    header: &'a FrameHeader,
    payload: String,
}

fn cmd_print(source: &dyn InterfaceSource, args: PrintArgs) -> Result<(), CliError> {
    let input = resolve_endpoint(source, &args.input)?;
    let receiver = net::bind_receiver(input.address, args.port)
        .with_context(|| format!("Failed to bind {}:{}", input.address, args.port))?;
    info!(on = %input, port = args.port, "listening");

    let mut filter = SequenceFilter::new();
    let mut buf = [0u8; net::RECV_BUFFER_LEN];
    let stdout = std::io::stdout();
    loop {
        let (len, from) = match receiver.recv_from(&mut buf) {
            Ok(received) => received,
            Err(err) => {
                warn!(error = %err, "receive failed");
                continue;
            }
        };
        let frame = match decode_frame_header(&buf[..len]) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%from, len, error = %err, "ignoring datagram");
                continue;
            }
        };
        if args.drop_stale
            && frame.header.opcode == ARTDMX_OPCODE
            && !filter.accept(frame.header.sequence)
        {
            debug!(%from, sequence = frame.header.sequence, "dropped stale frame");
            continue;
        }

        let line = frame_line(&frame, from, OffsetDateTime::now_utc(), args.json)?;
        let mut out = stdout.lock();
        writeln!(out, "{}", line).context("Failed to write to stdout")?;
        out.flush().context("Failed to write to stdout")?;
    }
}

/// One output line for `print`: the header summary, or a JSON record.
fn frame_line(
    frame: &Frame<'_>,
    from: SocketAddr,
    received_at: OffsetDateTime,
    json: bool,
) -> Result<String, CliError> {
    if !json {
        return Ok(frame.to_string());
    }
    let record = FrameRecord {
        received_at: received_at
            .format(&Rfc3339)
            .context("Timestamp formatting failed")?,
        source: from.to_string(),
        header: &frame.header,
        payload: frame.payload_hex(),
    };
    Ok(serde_json::to_string(&record).context("JSON serialization failed")?)
}

impl SendArgs {
    fn effect_config(&self, rainbow_id: u8) -> Result<EffectConfig, CliError> {
        let mut config = EffectConfig::new(
            self.effect.into(),
            usize::from(self.shift),
            usize::from(self.number),
        );
        config.rainbow = RainbowParams {
            id: rainbow_id,
            delay_ms: self.rainbow_delay,
            time_step: self.rainbow_time_step,
            length_step: self.rainbow_length_step,
            start_color: parse_color(&self.rainbow_start_color, "--rainbow-start-color")?,
            tint_color: parse_color(&self.rainbow_tint_color, "--rainbow-tint-color")?,
            tint_weight: self.rainbow_tint_value,
        };
        config.validate().map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("reduce --number or --shift".to_string()),
            )
        })?;
        Ok(config)
    }
}

fn parse_color(value: &str, flag: &str) -> Result<[u8; 3], CliError> {
    color_from_hex(value).map_err(|err| {
        CliError::new(
            format!("{}: {}", flag, err),
            Some("use #RRGGBB, e.g. #880000".to_string()),
        )
    })
}

fn cmd_send(source: &dyn InterfaceSource, args: SendArgs) -> Result<(), CliError> {
    let mut rng = rand::rng();
    let config = args.effect_config(rng.random_range(1..=255))?;
    let delay = positive_delay(args.delay)?.unwrap_or_else(|| config.mode.default_delay());

    let target = destination(source, args.address, &args.network, args.port)?;
    let socket = net::broadcast_sender().context("Failed to create sending socket")?;
    info!(to = %target, mode = ?config.mode, universe = args.universe, "sending effect");

    let mut tick: u64 = 0;
    loop {
        tick += 1;
        let hue = f64::from(rng.random_range(0..360u16));
        let payload = build_payload(&config, tick, hue).context("Effect payload failed")?;
        let frame = encode_dmx_frame(args.universe, &payload).context("Frame encoding failed")?;
        send_frame(&socket, &frame, target)?;
        debug!(tick, "sent frame");

        if args.count.is_some_and(|count| tick >= count) {
            return Ok(());
        }
        thread::sleep(delay);
    }
}

impl Setting {
    fn payload(&self) -> Result<ConfigPayload, CliError> {
        let hint = |text: &str| Some(text.to_string());
        let payload = match self {
            Setting::Ap {
                ap_always,
                ssid,
                password,
            } => ApSettings::new(ssid.as_str(), password.as_str(), *ap_always)
                .map(ConfigPayload::AccessPoint)
                .map_err(|err| {
                    CliError::new(
                        err.to_string(),
                        hint("use an empty password for an open access point"),
                    )
                })?,
            Setting::Sta { stations } => StationList::from_flat_args(stations)
                .map(ConfigPayload::StationList)
                .map_err(|err| {
                    CliError::new(
                        err.to_string(),
                        hint("sta \"ssid1\" \"password1\" \"ssid2\" \"\" ... (empty password for open stations)"),
                    )
                })?,
            Setting::Dmx { universe, shift } => ConfigPayload::UniverseShift(UniverseShift {
                universe: *universe,
                shift: *shift,
            }),
        };
        Ok(payload)
    }
}

fn cmd_setup(source: &dyn InterfaceSource, args: SetupArgs, quiet: bool) -> Result<(), CliError> {
    let payload = args.setting.payload()?;
    let frame = payload.to_frame();
    let delay = positive_delay(args.delay)?;

    let target = destination(source, args.address, &args.network, args.port)?;
    let socket = net::broadcast_sender().context("Failed to create sending socket")?;

    loop {
        send_frame(&socket, &frame, target)?;
        info!(to = %target, opcode = payload.opcode(), len = frame.len(), "sent configuration");
        if !quiet {
            eprintln!("OK: configuration sent -> {}", target);
        }
        match delay {
            Some(delay) => thread::sleep(delay),
            None => return Ok(()),
        }
    }
}

/// Explicit address wins; otherwise the broadcast address of the network
/// matching `pattern`.
fn destination(
    source: &dyn InterfaceSource,
    address: Option<Ipv4Addr>,
    pattern: &str,
    port: u16,
) -> Result<SocketAddrV4, CliError> {
    let endpoint = match address {
        Some(address) => Endpoint {
            address,
            broadcast: address,
        },
        None => resolve_endpoint(source, pattern)?,
    };
    Ok(SocketAddrV4::new(endpoint.broadcast, port))
}

fn send_frame(socket: &UdpSocket, frame: &[u8], target: SocketAddrV4) -> Result<(), CliError> {
    socket
        .send_to(frame, target)
        .with_context(|| format!("Failed to send to {}", target))?;
    Ok(())
}

/// Non-positive delays count as "not given".
fn positive_delay(seconds: Option<f64>) -> Result<Option<Duration>, CliError> {
    match seconds {
        Some(s) if s > 0.0 => Duration::try_from_secs_f64(s).map(Some).map_err(|_| {
            CliError::new(
                format!("invalid delay: {}", s),
                Some("use a number of seconds, e.g. 0.5".to_string()),
            )
        }),
        _ => Ok(None),
    }
}
