mod config;
mod logging;
mod ui;

use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;

use config::AppConfig;
use sketchboard_adapters::{
    present_status, ChatCompletionsClient, ImageFileCanvas, LogStatusListener, PngBase64Encoder,
};
use sketchboard_application::{AnalysisSession, AnalyzeCanvasCommand, SetCredentialCommand};
use sketchboard_domain::{AnalysisStatus, Color};

fn main() -> ExitCode {
    logging::init_logging();
    let args: Vec<String> = std::env::args().collect();

    match parse_command(&args).and_then(run_command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            print_usage();
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_analysis_session(config: &AppConfig) -> Result<AnalysisSession, CommandError> {
    let client = ChatCompletionsClient::with_model(
        config.endpoint.clone(),
        config.model.clone(),
        config.max_tokens,
    )
    .map_err(|error| CommandError::Runtime(format!("failed to create client: {error}")))?;
    log::info!("using inference endpoint {}", client.endpoint());

    let mut session = AnalysisSession::new(Box::new(PngBase64Encoder), Box::new(client));
    session.subscribe(Box::new(LogStatusListener));
    Ok(session)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui,
    Describe { image_path: String },
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Overrides {
    endpoint: Option<String>,
    stroke_width: Option<u32>,
    stroke_color: Option<Color>,
    background_color: Option<Color>,
}

impl Overrides {
    fn apply(self, config: &mut AppConfig) -> Result<(), CommandError> {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(stroke_width) = self.stroke_width {
            config.brush.stroke_width = stroke_width;
        }
        if let Some(color) = self.stroke_color {
            config.brush.stroke_color = color;
        }
        if let Some(color) = self.background_color {
            config.brush.background_color = color;
        }
        config
            .brush
            .validate()
            .map_err(|error| CommandError::Usage(error.to_string()))
    }
}

#[derive(Debug, Clone)]
struct Invocation {
    command: Command,
    overrides: Overrides,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn parse_command(args: &[String]) -> Result<Invocation, CommandError> {
    let mut positional: Vec<&str> = Vec::new();
    let mut overrides = Overrides::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--endpoint" => {
                overrides.endpoint = Some(option_value(&mut rest, arg)?.to_string());
            }
            "--stroke-width" => {
                let value = option_value(&mut rest, arg)?;
                let stroke_width = value
                    .parse::<u32>()
                    .map_err(|_| CommandError::Usage(format!("invalid stroke width: {value}")))?;
                overrides.stroke_width = Some(stroke_width);
            }
            "--stroke-color" => {
                overrides.stroke_color = Some(parse_color(option_value(&mut rest, arg)?)?);
            }
            "--background" => {
                overrides.background_color = Some(parse_color(option_value(&mut rest, arg)?)?);
            }
            "-h" | "--help" => positional.insert(0, "help"),
            other if other.starts_with("--") => {
                return Err(CommandError::Usage(format!("unknown option: {other}")));
            }
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        [] | ["ui"] => Command::Ui,
        ["help", ..] => Command::Help,
        ["describe"] => return Err(CommandError::Usage("missing image path".to_string())),
        ["describe", path] => Command::Describe {
            image_path: path.to_string(),
        },
        ["ui" | "describe", extra, ..] => {
            return Err(CommandError::Usage(format!("unexpected argument: {extra}")));
        }
        [other, ..] => return Err(CommandError::Usage(format!("unknown command: {other}"))),
    };

    Ok(Invocation { command, overrides })
}

fn option_value<'a>(
    rest: &mut impl Iterator<Item = &'a String>,
    name: &str,
) -> Result<&'a str, CommandError> {
    rest.next()
        .map(String::as_str)
        .ok_or_else(|| CommandError::Usage(format!("missing value for {name}")))
}

fn parse_color(value: &str) -> Result<Color, CommandError> {
    Color::from_hex(value).map_err(|error| CommandError::Usage(error.to_string()))
}

fn run_command(invocation: Invocation) -> Result<(), CommandError> {
    let mut config = AppConfig::default();
    invocation.overrides.apply(&mut config)?;

    match invocation.command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Ui => {
            let mut session = build_analysis_session(&config)?;
            ui::launch_window(&mut session, &config).map_err(CommandError::Runtime)
        }
        Command::Describe { image_path } => {
            let canvas = ImageFileCanvas::open(Path::new(&image_path))
                .map_err(|error| CommandError::Runtime(format!("open failed: {error}")))?;
            let mut session = build_analysis_session(&config)?;

            eprint!("API key: ");
            let secret = read_secret_line(std::io::stdin().lock())?;
            session.set_credential(SetCredentialCommand { secret });

            match session.analyze(&canvas, AnalyzeCanvasCommand) {
                AnalysisStatus::Success { description } => {
                    println!("{description}");
                    Ok(())
                }
                other => Err(CommandError::Runtime(present_status(&other))),
            }
        }
    }
}

fn read_secret_line(mut reader: impl BufRead) -> Result<String, CommandError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|error| CommandError::Runtime(format!("failed to read API key: {error}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_usage() {
    println!("usage:");
    println!("  sketchboard [ui] [options]");
    println!("  sketchboard describe <image-file> [options]   (API key read from stdin)");
    println!("options:");
    println!("  --endpoint <url>          chat completions endpoint");
    println!("  --stroke-width <1-30>     initial stroke width");
    println!("  --stroke-color <#RRGGBB>  initial stroke color");
    println!("  --background <#RRGGBB>    initial background color");
}
