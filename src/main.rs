//! priority-calc entrypoint: gathers the five inputs from flags, optionally fills
//! the workload volume from reference data, scores, and prints the breakdown.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use priority_calc::{
    config::CalculatorConfig,
    logging::{LogEvent, StructuredLogger},
    reference::{default_volume, ReferenceDataLookup, ReferenceSource},
    scoring::{PriorityRequest, PriorityScorer, ScoreBreakdown, ScoringProfile},
    PriorityError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "priority-calc", version, about = "Request priority calculator")]
struct Cli {
    /// JSON config file
    #[arg(long, env = "PRIORITY_CALC_CONFIG", default_value = "config.json", global = true)]
    config: PathBuf,

    /// Use a built-in scoring profile instead of the configured one
    #[arg(long, value_enum, global = true)]
    profile: Option<Preset>,

    /// Reference data CSV path or URL (overrides config)
    #[arg(long, global = true)]
    reference: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Standard,
    Business,
}

impl Preset {
    fn profile(self) -> ScoringProfile {
        match self {
            Preset::Standard => ScoringProfile::standard(),
            Preset::Business => ScoringProfile::business(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Score one request
    Score(ScoreArgs),
    /// List accepted categories, priority tiers and reference entries
    Options,
}

#[derive(Args)]
struct ScoreArgs {
    #[arg(long, default_value = "")]
    impact: String,
    #[arg(long, default_value = "")]
    urgency: String,
    #[arg(long, default_value = "None")]
    escalation: String,
    /// 3-month workload; falls back to the reference entry for --reference-key
    #[arg(long, allow_negative_numbers = true)]
    workload_volume: Option<i64>,
    /// Current workload percentage
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    workload_pct: i64,
    /// Display-only title
    #[arg(long)]
    title: Option<String>,
    /// Reference label or identifier used to pre-fill the workload volume
    #[arg(long)]
    reference_key: Option<String>,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

/// Reference data failures are logged and the caller continues without defaults.
fn load_reference(config: &CalculatorConfig) -> Option<ReferenceDataLookup> {
    config.reference.source.as_ref()?;
    match ReferenceDataLookup::load(&config.reference) {
        Ok(lookup) => Some(lookup),
        Err(e) => {
            warn!(error = %e, "continuing without workload defaults");
            None
        }
    }
}

fn render_table(b: &ScoreBreakdown) -> String {
    let mut out = String::new();
    if let Some(title) = &b.title {
        out.push_str(&format!("Request:  {}\n", title));
    }
    out.push_str(&format!("Priority: {}\n", b.label));
    out.push_str(&format!("Total:    {:.2}\n\n", b.total));
    out.push_str(&format!(
        "{:<18}{:>8}{:>8}{:>10}\n",
        "factor", "raw", "weight", "weighted"
    ));
    for f in &b.factors {
        out.push_str(&format!(
            "{:<18}{:>8.2}{:>8.2}{:>10.2}\n",
            f.field.as_str(),
            f.raw,
            f.weight,
            f.weighted
        ));
    }
    out
}

fn run_score(
    scorer: &PriorityScorer,
    config: &CalculatorConfig,
    args: ScoreArgs,
) -> anyhow::Result<()> {
    let lookup = match (&args.workload_volume, &args.reference_key) {
        (None, Some(_)) => load_reference(config),
        _ => None,
    };
    let volume = default_volume(
        args.workload_volume,
        lookup.as_ref(),
        args.reference_key.as_deref(),
        &scorer.profile().workload,
    );
    if let (None, Some(key)) = (args.workload_volume, args.reference_key.as_deref()) {
        match lookup.as_ref().and_then(|l| l.get(key)) {
            Some(v) => info!(key, workload = v, "workload volume pre-filled"),
            None => info!(key, "no workload default for key"),
        }
    }

    let request = PriorityRequest {
        title: args.title,
        impact: args.impact,
        urgency: args.urgency,
        escalation: args.escalation,
        workload_volume: volume,
        workload_pct: args.workload_pct,
    };

    let breakdown = match scorer.score(&request) {
        Ok(b) => b,
        Err(e) => {
            if config.log.audit {
                let event = LogEvent::rejected(&request, &e);
                StructuredLogger::emit_json(&event, &mut std::io::stderr());
            }
            return Err(e.into());
        }
    };
    if config.log.audit {
        StructuredLogger::emit_json(&LogEvent::scored(&breakdown), &mut std::io::stderr());
    }

    match args.format {
        Format::Table => print!("{}", render_table(&breakdown)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
    }
    Ok(())
}

fn print_options(profile: &ScoringProfile, lookup: Option<&ReferenceDataLookup>) {
    println!("Profile: {}", profile.name);
    for (name, scale) in [
        ("Impact", &profile.impact),
        ("Urgency", &profile.urgency),
        ("Escalation", &profile.escalation),
    ] {
        println!("\n{}:", name);
        for (key, weight) in scale.iter() {
            println!("  {:<44} {}", key, weight);
        }
    }
    println!("\nPriority tiers:");
    for step in profile.ladder.steps() {
        println!("  >= {:<6.2} {}", step.min_score, step.label);
    }
    println!("  else      {}", profile.ladder.floor());
    if let Some(lookup) = lookup {
        println!("\nReference entries ({}):", lookup.len());
        for label in lookup.labels() {
            match lookup.get(label) {
                Some(v) => println!("  {:<60} {}", label, v),
                None => println!("  {:<60} -", label),
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CalculatorConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    StructuredLogger::init(config.log.json, &config.log.level);

    if let Some(preset) = cli.profile {
        config.scoring = preset.profile();
    }
    if let Some(reference) = &cli.reference {
        config.reference.source = Some(ReferenceSource::parse(reference));
    }
    info!(profile = %config.scoring.name, "priority calculator starting");

    let scorer = PriorityScorer::new(config.scoring.clone())?;
    match cli.command {
        Command::Score(args) => run_score(&scorer, &config, args),
        Command::Options => {
            print_options(scorer.profile(), load_reference(&config).as_ref());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            let user_facing = e
                .downcast_ref::<PriorityError>()
                .is_some_and(PriorityError::is_user_facing);
            if user_facing {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
