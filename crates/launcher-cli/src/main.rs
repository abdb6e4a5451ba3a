use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use launcher_cli::{
    config::RuntimeConfig,
    error::AppError,
    logging,
    process::{CommandOpener, CommandPicker},
    resolve_catalog,
};
use launcher_core::{Decision, DispatchOutcome, Dispatcher, Opener, Picker, RawInput};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Picker-driven launcher for shortcuts, URIs, hosts and searches"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prompt with the catalog and open the chosen or typed target.
    Run,
    /// Classify one line without prompting and print the resolved target.
    Classify {
        /// Text as the picker would return it.
        #[arg(long, default_value = "")]
        query: String,
        /// Output mode: tab-separated text or JSON.
        #[arg(long, value_enum, default_value_t = OutputMode::Human)]
        output: OutputMode,
    },
    /// Print catalog names in prompt order.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Human,
    Json,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ClassifyReport {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,
}

impl ClassifyReport {
    fn new(dispatcher: &Dispatcher, query: &str) -> Self {
        let decision = dispatcher.classify(&RawInput::new(query));
        let target = dispatcher.resolve_target(&decision);
        let (choices, template) = match &decision {
            Decision::StaticNested(sub) => (Some(sub.choices.clone()), Some(sub.template.clone())),
            _ => (None, None),
        };

        Self {
            kind: decision.kind(),
            target,
            choices,
            template,
        }
    }

    fn to_human(&self) -> String {
        if let Some(target) = &self.target {
            return format!("{}\t{target}", self.kind);
        }
        match &self.choices {
            Some(choices) => format!("{}\t{}", self.kind, choices.join(", ")),
            None => self.kind.to_string(),
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("error: {}", error.message);
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    let config = RuntimeConfig::from_env()?;
    let mut picker = CommandPicker::from_config(&config);
    let mut opener = CommandOpener::from_config(&config);
    run_with(cli, &config, &mut picker, &mut opener)
}

fn run_with(
    cli: Cli,
    config: &RuntimeConfig,
    picker: &mut dyn Picker,
    opener: &mut dyn Opener,
) -> Result<String, AppError> {
    let catalog = resolve_catalog(config)?;
    let mut dispatcher = Dispatcher::new(catalog, config.dispatch.clone());

    match cli.command {
        Commands::Run => {
            let outcome = dispatcher.run(picker, opener)?;
            Ok(render_outcome(&outcome))
        }
        Commands::Classify { query, output } => {
            let report = ClassifyReport::new(&dispatcher, &query);
            match output {
                OutputMode::Human => Ok(report.to_human()),
                OutputMode::Json => serde_json::to_string(&report).map_err(|error| {
                    AppError::runtime(format!("failed to serialize classification: {error}"))
                }),
            }
        }
        Commands::List => Ok(dispatcher.catalog().list_names().join("\n")),
    }
}

fn render_outcome(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Cancelled => "cancelled".to_string(),
        DispatchOutcome::Opened { target } => format!("opened {target}"),
        DispatchOutcome::OpenFailed { target, reason } => {
            format!("could not open {target}: {reason}")
        }
    }
}
