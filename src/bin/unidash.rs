use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use unidash::api::DEFAULT_BASE_URL;
use unidash::{Client, Country, Dashboard, DashboardConfig, FetchOutcome};
use unidash::{export, storage, table, viz};

#[derive(Parser, Debug)]
#[command(
    name = "unidash",
    version,
    about = "Fetch, tabulate, chart & export universities per country"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch universities for a country (and optionally print, chart, export and save them).
    Get(GetArgs),
    /// List the selectable countries.
    Countries,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Country name (India, "United States", "United Kingdom", Japan).
    #[arg(short, long, default_value = "India")]
    country: Country,
    /// Base URL of the universities service.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Do not print the university table.
    #[arg(long, default_value_t = false)]
    no_table: bool,
    /// Print universities per state.
    #[arg(long, default_value_t = false)]
    counts: bool,
    /// Write the pie chart to the given path (.svg or .png).
    #[arg(long)]
    chart: Option<PathBuf>,
    /// Export the chart as PDF to the given path.
    #[arg(long, num_args = 0..=1, default_missing_value = export::DEFAULT_PDF_NAME)]
    pdf: Option<PathBuf>,
    /// Save the list to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Width of the chart canvas (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the chart canvas (default 400).
    #[arg(long, default_value_t = 400)]
    height: u32,
    /// TTF font used for chart labels.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
        Command::Countries => {
            for c in Country::ALL {
                println!("{}", c);
            }
            Ok(())
        }
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let config = DashboardConfig {
        base_url: args.base_url.clone(),
        initial_country: args.country,
        chart_width: args.width,
        chart_height: args.height,
        font_path: args.font.clone(),
        labels: true,
    };
    let client = Client::new(&config.base_url);
    let mut dash = Dashboard::new(&config)?;

    match dash.load(&client)? {
        FetchOutcome::Applied { rows } => {
            eprintln!("Fetched {} universities for {}", rows, dash.country())
        }
        FetchOutcome::Failed => eprintln!(
            "Could not fetch universities for {} (see log; run with RUST_LOG=error)",
            dash.country()
        ),
        FetchOutcome::Stale => {}
    }

    if !args.no_table {
        print!("{}", table::render_text(dash.universities()));
    }

    if args.counts {
        let counts = dash.counts();
        for (state, n) in counts.iter() {
            println!("{}\t{}\t{:.1}%", state, n, counts.share(state));
        }
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(dash.universities(), path)?,
            "json" => storage::save_json(dash.universities(), path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!(
            "Saved {} rows to {}",
            dash.universities().len(),
            path.display()
        );
    }

    if let Some(chart_path) = args.chart.as_ref() {
        let labels = dash.chart().options().labels;
        viz::plot_pie(dash.counts(), chart_path, args.width, args.height, labels)?;
        eprintln!("Wrote chart to {}", chart_path.display());
    }

    if let Some(pdf_path) = args.pdf.as_ref() {
        let written = dash.export_pdf(pdf_path)?;
        eprintln!("Exported chart to {}", written.display());
    }

    dash.teardown();
    Ok(())
}
