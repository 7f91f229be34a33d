//! Investment Illustration CLI
//!
//! Illustrates projected returns for one customer across every horizon
//! bucket, optionally comparing selected products.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use illustration_engine::customer::{share, FormInput, HorizonBucket};
use illustration_engine::format::{format_currency, format_growth, format_rate};
use illustration_engine::projection::{align_series, line_end_index};
use illustration_engine::{
    ComparisonSet, IllustrationConfig, IllustrationInputs, Illustrator, ProductCatalog,
};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Tab {
    Short,
    Intermediate,
    Long,
    Never,
}

impl From<Tab> for HorizonBucket {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Short => HorizonBucket::Short,
            Tab::Intermediate => HorizonBucket::Intermediate,
            Tab::Long => HorizonBucket::Long,
            Tab::Never => HorizonBucket::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "illustrate",
    about = "Projected returns for CDs, money market accounts, annuities and life insurance"
)]
struct Cli {
    #[arg(long, default_value = "")]
    age: String,
    #[arg(long, default_value = "", help = "male or female")]
    gender: String,
    #[arg(long, default_value = "", help = "yes or no")]
    tobacco: String,
    #[arg(long, default_value = "0", help = "Amount needed in less than 1 year")]
    short_term: String,
    #[arg(long, default_value = "0", help = "Amount needed in 2 to 5 years")]
    intermediate: String,
    #[arg(long, default_value = "0", help = "Amount needed in 5+ years")]
    long_term: String,
    #[arg(long, default_value = "0", help = "Amount that may never be needed")]
    never: String,
    #[arg(long, help = "Share token from a /results link; replaces the form fields")]
    token: Option<String>,
    #[arg(long, help = "Product catalog JSON; defaults to the built-in catalog")]
    catalog: Option<PathBuf>,
    #[arg(long, help = "Illustration config JSON")]
    config: Option<PathBuf>,
    #[arg(long, help = "Card id to compare; repeat for several")]
    compare: Vec<String>,
    #[arg(long, value_enum, default_value_t = Tab::Short, help = "Tab whose amount banking products use in comparisons")]
    tab: Tab,
    #[arg(long, help = "Print the illustration as JSON")]
    json: bool,
}

fn read_inputs(cli: &Cli) -> Result<IllustrationInputs> {
    if let Some(token) = &cli.token {
        return share::route_for_token(Some(token.as_str()))
            .map_err(|route| anyhow!("share token holds no data; start again at {}", route));
    }

    let form = FormInput {
        age: cli.age.clone(),
        gender: cli.gender.clone(),
        tobacco_use: cli.tobacco.clone(),
        short_term: cli.short_term.clone(),
        intermediate: cli.intermediate.clone(),
        long_term: cli.long_term.clone(),
        never: cli.never.clone(),
    };
    match form.validate() {
        Ok(inputs) => Ok(inputs),
        Err(errors) => {
            for error in &errors {
                eprintln!("  {}", error);
            }
            bail!("{} form field(s) invalid", errors.len())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = read_inputs(&cli)?;

    let catalog = match &cli.catalog {
        Some(path) => ProductCatalog::from_json_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => ProductCatalog::builtin(),
    };
    let config = match &cli.config {
        Some(path) => IllustrationConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => IllustrationConfig::default(),
    };
    info!("Illustrating against {} catalog products", catalog.len());

    let illustrator = Illustrator::new(catalog, config);
    let illustration = illustrator.illustrate(&inputs);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&illustration)?);
        return Ok(());
    }

    let profile = &inputs.profile;
    println!("Investment Illustration");
    println!("=======================\n");
    println!(
        "Age {} | {} | tobacco: {}\n",
        profile.age,
        profile.gender.as_str(),
        profile.tobacco_use.as_str()
    );

    for tab in &illustration.tabs {
        println!("{} - {}", tab.heading, format_currency(tab.investment));
        println!("{}", "-".repeat(88));
        for card in &tab.cards {
            println!(
                "  {:<18} {:<32} {:>5} {:>14} {:>12} {:>8}",
                card.card_id,
                card.label,
                card.term_label,
                format_currency(card.result.projected_value),
                format_growth(card.result.growth),
                format_rate(card.result.rate),
            );
            if let Some(rate) = &card.life_rate {
                println!(
                    "  {:<18} base {} | age {} | gender {} | tobacco {}",
                    "",
                    format_rate(rate.base),
                    format_rate(rate.age_adjustment),
                    format_rate(rate.gender_adjustment),
                    format_rate(rate.tobacco_adjustment),
                );
            }
        }
        println!();
    }

    let summary = &illustration.summary;
    println!("Total Investment Summary");
    println!("  Total Investment:       {}", format_currency(summary.total_investment));
    println!("  Total Projected Return: {}", format_currency(summary.total_return));
    println!("  Total Growth:           {}", format_currency(summary.total_growth));
    println!("\nShare: {}", share::results_path(&inputs));

    if !cli.compare.is_empty() {
        let mut selection = ComparisonSet::new();
        for id in &cli.compare {
            let Some(card) = illustration.card(id) else {
                bail!("no card with id '{}' in this illustration", id);
            };
            selection.toggle(card);
        }

        let lines = illustrator.comparison_series(&inputs, &selection, cli.tab.into());
        let rows = align_series(&lines);

        println!("\nComparison ({} products)", lines.len());
        print!("{:>8}", "x");
        for line in &lines {
            print!(" {:>22}", truncate(&line.label, 22));
        }
        println!();
        for (i, row) in rows.iter().enumerate() {
            print!("{:>8}", row.x);
            for (j, value) in row.values.iter().enumerate() {
                let marker = if line_end_index(&rows, j) == Some(i) { "*" } else { " " };
                match value {
                    Some(v) => print!(" {:>21}{}", format_currency(*v), marker),
                    None => print!(" {:>22}", ""),
                }
            }
            println!();
        }
    }

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
