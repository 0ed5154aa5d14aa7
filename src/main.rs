use clap::Parser;
use ingredient_lens::{cli, config, error, report, runner, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use ingredient_lens_common::{fixtures, DietaryFilterSet, MockAnalyzer, RandomDice};
use runner::{NonInteractive, PromptDecider, RunOptions, TokioSleeper};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { paths, filters, output, seed, failure_rate, no_delay, interactive } => {
            println!("🥗 ingredient-lens - Ingredient Safety Analyzer\n");

            let labels = scanner::collect_labels(&paths)?;
            println!("✔ {} label image(s)\n", labels.len());

            let mock = runner::effective_mock_config(&config, failure_rate, no_delay);
            let dice = match seed.or(config.seed) {
                Some(seed) => RandomDice::seeded(seed),
                None => RandomDice::from_entropy(),
            };
            let analyzer = MockAnalyzer::with_dice(mock, TokioSleeper, dice)?;

            let options = RunOptions {
                filters: filters.into_iter().collect::<DietaryFilterSet>(),
                timeout: mock.timeout(),
                show_progress: true,
            };
            if !options.filters.is_empty() {
                let names: Vec<&str> = options.filters.iter().map(|d| d.label()).collect();
                println!("✔ Filters: {}\n", names.join(", "));
            }

            let run = if interactive {
                runner::analyze_labels(&labels, &analyzer, &TokioSleeper, &mut PromptDecider, &options).await
            } else {
                runner::analyze_labels(&labels, &analyzer, &TokioSleeper, &mut NonInteractive, &options).await
            };

            // 途中で失敗しても完了分は保存する
            if let Some(output) = output {
                if run.error.is_none() || !run.reports.is_empty() {
                    runner::save_reports(&run.reports, &output)?;
                    println!("✔ Saved: {} ({} report(s))", output.display(), run.reports.len());
                }
            }
            run.into_result()?;

            println!("\n✅ Done");
        }

        Commands::Samples => {
            for (index, sample) in fixtures().iter().enumerate() {
                println!("── Sample {} ──", index + 1);
                println!("{}", report::render_result(sample, &DietaryFilterSet::new()));
            }
        }

        Commands::Config { set_failure_rate, set_timeout_ms, set_seed, clear_seed, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(rate) = set_failure_rate {
                config.mock.failure_rate = rate;
                changed = true;
            }
            if let Some(timeout_ms) = set_timeout_ms {
                config.mock.timeout_ms = timeout_ms;
                changed = true;
            }
            if let Some(seed) = set_seed {
                config.seed = Some(seed);
                changed = true;
            }
            if clear_seed {
                config.seed = None;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ Config saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Config:");
                println!("  Failure rate: {}", config.mock.failure_rate);
                println!("  Delay: {}..{} ms", config.mock.min_delay_ms, config.mock.max_delay_ms);
                println!("  Timeout: {} ms", config.mock.timeout_ms);
                println!(
                    "  Seed: {}",
                    config.seed.map(|s| s.to_string()).unwrap_or_else(|| "(random)".into())
                );
            }
        }
    }

    Ok(())
}
