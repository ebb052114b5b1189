use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use uo_app::{AppError, AppResult, EvalSinks, WebhookNotifier};
use uo_core::{EvalError, Inputs, SweepSpec};
use uo_store::ResultLog;

#[derive(Parser)]
#[command(name = "uo-cli")]
#[command(about = "UnitOps CLI - chemical engineering calculator suite", long_about = None)]
struct Cli {
    /// SQLite result log; omit to skip persistence
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered tool, grouped by suite
    Tools,
    /// Evaluate one tool
    Eval {
        /// Tool name (see `tools`)
        tool: String,
        /// Input override, name=value (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
        /// Webhook URL to POST each result to
        #[arg(long)]
        webhook: Option<String>,
        /// Emit the result as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Also write a plain-text report of inputs and results
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Sweep one input and export the response curve as CSV
    Sweep {
        /// Tool name
        tool: String,
        /// Input parameter to sweep
        param: String,
        /// Output value to collect
        output: String,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        #[arg(long, default_value_t = 100)]
        points: usize,
        /// Logarithmic spacing instead of linear
        #[arg(long)]
        log_spacing: bool,
        /// Fixed input override, name=value (repeatable)
        #[arg(short = 'p', long = "param-fixed", value_name = "NAME=VALUE")]
        fixed: Vec<String>,
        /// CSV file path; omit for stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run a SEIR outbreak simulation and export the daily series
    Seir {
        #[arg(long, default_value_t = 10000.0)]
        population: f64,
        #[arg(long, default_value_t = 0.3)]
        beta: f64,
        #[arg(long, default_value_t = 0.2)]
        sigma: f64,
        #[arg(long, default_value_t = 0.1)]
        gamma: f64,
        #[arg(long, default_value_t = 10.0)]
        infected: f64,
        #[arg(long, default_value_t = 160)]
        days: usize,
        /// Transmission multiplier applied from --intervention-day onward
        #[arg(long)]
        intervention_factor: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        intervention_day: f64,
        /// CSV file path; omit for stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Optimize a crude blend
    Blend {
        /// Crude stream as name,cost,sulfur,viscosity (repeatable)
        #[arg(long = "crude", value_name = "NAME,COST,SULFUR,VISC", required = true)]
        crudes: Vec<String>,
        /// Blend sulfur cap, wt %
        #[arg(long)]
        max_sulfur: Option<f64>,
        /// Blend viscosity cap, cSt
        #[arg(long)]
        max_viscosity: Option<f64>,
    },
    /// Optimize well-to-refinery transport
    Transport {
        /// Well as name,lat,lon,supply (repeatable)
        #[arg(long = "well", value_name = "NAME,LAT,LON,SUPPLY", required = true)]
        wells: Vec<String>,
        /// Refinery as name,lat,lon,demand (repeatable)
        #[arg(long = "refinery", value_name = "NAME,LAT,LON,DEMAND", required = true)]
        refineries: Vec<String>,
        #[arg(long, default_value_t = 1.0)]
        cost_per_km: f64,
    },
    /// Detect anomalies in a sensor CSV (or a seeded demo stream)
    Detect {
        /// CSV with temperature,pressure,flow columns; omit for a demo stream
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0.05)]
        contamination: f64,
    },
    /// Show logged results, newest first
    History {
        /// Only this tool
        #[arg(long)]
        tool: Option<String>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let log = match &cli.db {
        Some(path) => Some(ResultLog::open(path)?),
        None => None,
    };

    match cli.command {
        Commands::Tools => cmd_tools(),
        Commands::Eval {
            tool,
            params,
            webhook,
            json,
            report,
        } => cmd_eval(
            &tool,
            &params,
            webhook.as_deref(),
            json,
            report.as_deref(),
            log.as_ref(),
        ),
        Commands::Sweep {
            tool,
            param,
            output,
            start,
            end,
            points,
            log_spacing,
            fixed,
            out,
        } => cmd_sweep(
            &tool,
            &param,
            &output,
            start,
            end,
            points,
            log_spacing,
            &fixed,
            out.as_deref(),
        ),
        Commands::Seir {
            population,
            beta,
            sigma,
            gamma,
            infected,
            days,
            intervention_factor,
            intervention_day,
            out,
        } => cmd_seir(
            population,
            beta,
            sigma,
            gamma,
            infected,
            days,
            intervention_factor,
            intervention_day,
            out.as_deref(),
            log.as_ref(),
        ),
        Commands::Blend {
            crudes,
            max_sulfur,
            max_viscosity,
        } => cmd_blend(&crudes, max_sulfur, max_viscosity),
        Commands::Transport {
            wells,
            refineries,
            cost_per_km,
        } => cmd_transport(&wells, &refineries, cost_per_km),
        Commands::Detect {
            input,
            seed,
            contamination,
        } => cmd_detect(input.as_deref(), seed, contamination, log.as_ref()),
        Commands::History { tool } => cmd_history(tool.as_deref(), log.as_ref()),
    }
}

fn cmd_tools() -> AppResult<()> {
    for id in uo_app::ALL_TOOLS {
        let d = id.descriptor();
        println!("{:<12} {:<30} {}", d.suite.name(), d.name, d.title);
    }
    Ok(())
}

/// Parse repeated `name=value` arguments into an input map.
fn parse_inputs(params: &[String]) -> AppResult<Inputs> {
    let mut inputs = Inputs::new();
    for raw in params {
        let (name, value) = raw.split_once('=').ok_or_else(|| {
            AppError::Eval(EvalError::domain(format!(
                "expected NAME=VALUE, got '{raw}'"
            )))
        })?;
        let value: f64 = value.trim().parse().map_err(|_| {
            AppError::Eval(EvalError::domain(format!(
                "'{value}' is not a number in '{raw}'"
            )))
        })?;
        inputs.insert(name.trim(), value);
    }
    Ok(inputs)
}

/// Parse a `name,f1,f2,f3` tuple argument.
fn parse_named_triple(raw: &str, what: &str) -> AppResult<(String, [f64; 3])> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(AppError::Eval(EvalError::domain(format!(
            "{what} must be NAME plus 3 numbers, got '{raw}'"
        ))));
    }
    let mut numbers = [0.0; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts[1..]) {
        *slot = part.parse().map_err(|_| {
            AppError::Eval(EvalError::domain(format!(
                "'{part}' is not a number in '{raw}'"
            )))
        })?;
    }
    Ok((parts[0].to_string(), numbers))
}

fn cmd_eval(
    tool: &str,
    params: &[String],
    webhook: Option<&str>,
    json: bool,
    report: Option<&Path>,
    log: Option<&ResultLog>,
) -> AppResult<()> {
    let inputs = parse_inputs(params)?;
    let notifier = match webhook {
        Some(url) => Some(WebhookNotifier::new(url)?),
        None => None,
    };
    let sinks = EvalSinks {
        log,
        notifier: notifier.as_ref(),
    };
    let result = uo_app::evaluate(tool, &inputs, &sinks)?;

    if let Some(path) = report {
        let descriptor = uo_app::resolve_tool(tool)?;
        let merged = uo_app::prepare_inputs(&descriptor, &inputs)?;
        let text = uo_store::report_to_text(descriptor.title, &merged, &result);
        std::fs::write(path, text)?;
        eprintln!("Wrote {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
    } else {
        for value in result.values() {
            if value.unit.is_empty() || value.unit == "-" {
                println!("{:<28} {:.6}", value.name, value.value);
            } else {
                println!("{:<28} {:.6} {}", value.name, value.value, value.unit);
            }
        }
    }
    Ok(())
}

fn write_or_print(csv: &str, out: Option<&Path>) -> AppResult<()> {
    match out {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_sweep(
    tool: &str,
    param: &str,
    output: &str,
    start: f64,
    end: f64,
    points: usize,
    log_spacing: bool,
    fixed: &[String],
    out: Option<&Path>,
) -> AppResult<()> {
    let inputs = parse_inputs(fixed)?;
    let spec = if log_spacing {
        SweepSpec::logarithmic(start, end, points)
    } else {
        SweepSpec::linear(start, end, points)
    }
    .map_err(AppError::Eval)?;

    let curve = uo_app::sweep(tool, &inputs, param, output, &spec)?;
    eprintln!(
        "{} valid points, {} gaps",
        curve.valid_points().count(),
        curve.num_gaps()
    );
    write_or_print(&uo_store::curve_to_csv(&curve), out)
}

#[allow(clippy::too_many_arguments)]
fn cmd_seir(
    population: f64,
    beta: f64,
    sigma: f64,
    gamma: f64,
    infected: f64,
    days: usize,
    intervention_factor: Option<f64>,
    intervention_day: f64,
    out: Option<&Path>,
    log: Option<&ResultLog>,
) -> AppResult<()> {
    let schedule = match intervention_factor {
        Some(factor) if intervention_day > 0.0 => uo_epi::BetaSchedule::Step {
            base: beta,
            start_day: intervention_day,
            factor,
        },
        Some(factor) => uo_epi::BetaSchedule::Scaled { base: beta, factor },
        None => uo_epi::BetaSchedule::Constant(beta),
    };
    let params = uo_epi::SeirParams {
        population,
        beta: schedule,
        sigma,
        gamma,
    };
    let spec = uo_epi::SimSpec {
        initial_exposed: 0.0,
        initial_infected: infected,
        initial_recovered: 0.0,
        days,
    };
    let series = uo_epi::simulate(&params, &spec).map_err(AppError::Eval)?;

    let (peak, peak_day) = series.peak_infected();
    eprintln!("Peak infected: {peak:.1} on day {peak_day:.0}");
    if let Some(log) = log {
        log.append_result("seir_outbreak", "Peak Infected", peak)?;
    }

    let csv = uo_store::series_to_csv(
        &["day", "susceptible", "exposed", "infected", "recovered"],
        &[
            &series.t,
            &series.susceptible,
            &series.exposed,
            &series.infected,
            &series.recovered,
        ],
    )?;
    write_or_print(&csv, out)
}

fn cmd_blend(
    crudes: &[String],
    max_sulfur: Option<f64>,
    max_viscosity: Option<f64>,
) -> AppResult<()> {
    let crudes: Vec<uo_petro::Crude> = crudes
        .iter()
        .map(|raw| {
            let (name, [cost, sulfur, viscosity]) = parse_named_triple(raw, "crude")?;
            Ok(uo_petro::Crude {
                name,
                cost,
                sulfur,
                viscosity,
            })
        })
        .collect::<AppResult<_>>()?;
    let names: Vec<String> = crudes.iter().map(|c| c.name.clone()).collect();

    let solution = uo_petro::BlendProblem {
        crudes,
        objective: uo_petro::BlendObjective::Cost,
        max_sulfur,
        max_viscosity,
    }
    .solve()
    .map_err(AppError::Eval)?;

    for (name, fraction) in names.iter().zip(&solution.fractions) {
        println!("{:<16} {:.4}", name, fraction);
    }
    println!("Blend cost      {:.4} $/bbl", solution.blend_cost);
    println!("Blend sulfur    {:.4} wt %", solution.blend_sulfur);
    println!("Blend viscosity {:.4} cSt", solution.blend_viscosity);
    Ok(())
}

fn cmd_transport(wells: &[String], refineries: &[String], cost_per_km: f64) -> AppResult<()> {
    let parse_sites = |raws: &[String], what: &str| -> AppResult<Vec<uo_petro::Site>> {
        raws.iter()
            .map(|raw| {
                let (name, [lat, lon, capacity]) = parse_named_triple(raw, what)?;
                Ok(uo_petro::Site {
                    name,
                    latitude: lat,
                    longitude: lon,
                    capacity,
                })
            })
            .collect()
    };
    let problem = uo_petro::TransportProblem {
        wells: parse_sites(wells, "well")?,
        refineries: parse_sites(refineries, "refinery")?,
        cost_per_km,
    };
    let solution = problem.solve().map_err(AppError::Eval)?;

    for (i, row) in solution.shipments.iter().enumerate() {
        for (j, &volume) in row.iter().enumerate() {
            if volume > 1e-9 {
                println!(
                    "{} -> {}: {:.2}",
                    problem.wells[i].name, problem.refineries[j].name, volume
                );
            }
        }
    }
    println!("Total cost: {:.2}", solution.total_cost);
    Ok(())
}

fn cmd_detect(
    input: Option<&Path>,
    seed: u64,
    contamination: f64,
    log: Option<&ResultLog>,
) -> AppResult<()> {
    let rows = match input {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let table = uo_store::parse_csv(&text, &["temperature", "pressure", "flow"])?;
            if let Some(log) = log {
                let filename = path.file_name().map(|f| f.to_string_lossy().to_string());
                log.append_upload(filename.as_deref().unwrap_or("sensors.csv"), "csv")?;
            }
            let t = table.require_column("temperature")?;
            let p = table.require_column("pressure")?;
            let f = table.require_column("flow")?;
            tracing::info!(rows = table.num_rows(), file = %path.display(), "parsed sensor table");
            (0..table.num_rows())
                .map(|i| vec![t[i], p[i], f[i]])
                .collect()
        }
        None => {
            eprintln!("No input file, generating a demo stream");
            let batch = uo_analytics::generate_batch(
                &uo_analytics::StreamConfig::default(),
                seed,
            )
            .map_err(AppError::Eval)?;
            batch.feature_rows()
        }
    };

    let config = uo_analytics::ForestConfig {
        contamination,
        ..uo_analytics::ForestConfig::default()
    };
    let summary = uo_app::detect_anomalies(&rows, &config, seed)?;

    println!("Level:       {:?}", summary.level);
    println!("Rows:        {}", summary.total_rows);
    println!(
        "Faults:      {} ({:.1}%)",
        summary.fault_count,
        100.0 * summary.fault_fraction
    );
    for (row, score) in &summary.worst_rows {
        println!("  row {:<6} score {:.3}", row, score);
    }
    Ok(())
}

fn cmd_history(tool: Option<&str>, log: Option<&ResultLog>) -> AppResult<()> {
    let Some(log) = log else {
        println!("No --db given, nothing to show");
        return Ok(());
    };
    let records = log.list_results(tool)?;
    if records.is_empty() {
        println!("No logged results");
        return Ok(());
    }
    for record in records {
        println!(
            "{:<6} {:<28} {:<28} {:>14.6}  {}",
            record.id, record.tool, record.parameter, record.value, record.timestamp
        );
    }
    Ok(())
}
