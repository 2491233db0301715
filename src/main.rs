mod fetcher;
mod model;
mod output;
mod paginate;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fetcher::{HttpFetcher, PageFetcher};
use model::{ProductRow, RunContext};
use paginate::RunReport;
use settings::Settings;

#[derive(Parser)]
#[command(name = "cetrogar_sos", about = "Cetrogar share-of-shelf scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan all categories and write the SOS workbook
    Run {
        /// Output directory (overrides OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Category slug to scan; repeat for several (default: configured list)
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Stop each category after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
        /// Date stamped on rows and the file name (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Fetch one listing page and print its rows as JSON lines
    Fetch {
        /// Category slug as it appears in the URL
        category: String,
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// List configured categories
    Categories,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Run {
            output_dir,
            categories,
            max_pages,
            date,
        } => {
            let ctx = run_context(&settings, date);
            let categories = if categories.is_empty() {
                settings.categories.clone()
            } else {
                categories
            };
            let output_dir = output_dir.unwrap_or_else(|| settings.output_dir.clone());

            let fetcher = HttpFetcher::new(&settings.base_url, settings.timeout())?;
            println!("Scanning {} categories on {}...", categories.len(), settings.base_url);
            let report = paginate::scan_all(&fetcher, &ctx, &categories, max_pages);
            print_summary(&report);

            let (path, written) =
                output::write_report(report.rows, &output_dir, &ctx.date, &ctx.platform)?;
            println!("Saved {} rows to {}", written, path.display());
            Ok(())
        }
        Commands::Fetch { category, page } => {
            let ctx = run_context(&settings, None);
            let fetcher = HttpFetcher::new(&settings.base_url, settings.timeout())?;
            let markup = fetcher
                .fetch_page(&category, page)
                .with_context(|| format!("Failed to fetch {} page {}", category, page))?;

            let cards = parser::parse_page(&markup, &ctx);
            if cards.is_empty() {
                println!("No products on {} page {}.", category, page);
                return Ok(());
            }
            for (i, card) in cards.into_iter().enumerate() {
                let row = ProductRow::new(&ctx, &category, page, i as u32 + 1, card.fields);
                println!("{}", serde_json::to_string(&row)?);
            }
            Ok(())
        }
        Commands::Categories => {
            for category in &settings.categories {
                println!(
                    "{:<24} {}",
                    category,
                    fetcher::page_url(&settings.base_url, category, 1)
                );
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn run_context(settings: &Settings, date: Option<NaiveDate>) -> RunContext {
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    RunContext {
        date: date.format("%Y-%m-%d").to_string(),
        platform: settings.platform.clone(),
        country: settings.country.clone(),
        base_url: settings.base_url.clone(),
    }
}

fn print_summary(report: &RunReport) {
    println!(
        "\n{:<24} | {:>5} | {:>5} | {}",
        "Category", "Pages", "Rows", "Stopped"
    );
    println!("{}", "-".repeat(72));
    for scan in &report.scans {
        println!(
            "{:<24} | {:>5} | {:>5} | {}",
            truncate(&scan.category, 24),
            scan.pages_fetched,
            scan.rows_appended,
            scan.stop.describe()
        );
    }
    println!("{} rows collected\n", report.rows.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_long_category() {
        assert_eq!(truncate("Electrodomésticos", 24), "Electrodomésticos");
        assert_eq!(truncate("Bazar-y-decoración", 5), "Bazar...");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(std::time::Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn run_context_uses_given_date() {
        let settings = Settings {
            output_dir: PathBuf::from("./outputs"),
            base_url: "https://www.cetrogar.com.ar".into(),
            platform: "Cetrogar".into(),
            country: "Argentina".into(),
            timeout_secs: 30,
            categories: vec![],
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let ctx = run_context(&settings, Some(date));
        assert_eq!(ctx.date, "2025-03-01");
        assert_eq!(ctx.platform, "Cetrogar");
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "cetrogar_sos",
            "run",
            "-c",
            "Tecnología",
            "--category",
            "hogar",
            "--max-pages",
            "5",
            "--date",
            "2025-03-01",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                categories,
                max_pages,
                date,
                output_dir,
            } => {
                assert_eq!(categories, vec!["Tecnología", "hogar"]);
                assert_eq!(max_pages, Some(5));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 1));
                assert!(output_dir.is_none());
            }
            _ => panic!("expected run"),
        }
    }
}
