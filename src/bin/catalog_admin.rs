//! Browse the product catalog the way the admin screen does
//!
//! Read-only: filters and sorts are applied to a copy and nothing is saved.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use illustration_engine::catalog::{loader, CatalogQuery, Product, RateGrid, SortDirection, SortKey};
use illustration_engine::format::format_rate;
use illustration_engine::{ProductCatalog, ProductKind};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Cd,
    MoneyMarket,
    Annuity,
    LifeInsurance,
}

impl From<KindArg> for ProductKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Cd => ProductKind::Cd,
            KindArg::MoneyMarket => ProductKind::MoneyMarket,
            KindArg::Annuity => ProductKind::Annuity,
            KindArg::LifeInsurance => ProductKind::LifeInsurance,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Provider,
    Term,
    Rate,
}

impl From<SortArg> for SortKey {
    fn from(key: SortArg) -> Self {
        match key {
            SortArg::Name => SortKey::ProductName,
            SortArg::Provider => SortKey::Provider,
            SortArg::Term => SortKey::Term,
            SortArg::Rate => SortKey::Rate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "catalog_admin", about = "List, filter and sort catalog products")]
struct Cli {
    #[arg(long, help = "Product catalog JSON; defaults to the built-in catalog")]
    catalog: Option<PathBuf>,
    #[arg(long, value_enum, help = "Only show one product type")]
    kind: Option<KindArg>,
    #[arg(long, default_value = "", help = "Match product name, institution or carrier")]
    search: String,
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    #[arg(long, help = "Sort descending")]
    desc: bool,
    #[arg(long, help = "Show the rate grid of one product")]
    id: Option<String>,
    #[arg(long, help = "Print a rate grid CSV (min_amount,max_amount,rate[,term_months])")]
    rate_grid: Option<PathBuf>,
}

fn print_grid(grid: &RateGrid) {
    println!("{:>6} {:>14} {:>14} {:>8}", "Term", "Min", "Max", "Rate");
    for band in grid.bands() {
        let term = band
            .term_months
            .map(|t| format!("{}m", t))
            .unwrap_or_else(|| "-".to_string());
        let max = band
            .max_amount
            .map(|m| format!("{:.0}", m))
            .unwrap_or_else(|| "no limit".to_string());
        println!(
            "{:>6} {:>14.0} {:>14} {:>8}",
            term,
            band.min_amount,
            max,
            format_rate(band.rate)
        );
    }
}

fn print_product(product: &Product) {
    println!("{} ({})", product.name(), product.id());
    println!("  Type:     {}", product.kind().label());
    println!("  Provider: {}", product.provider());
    println!("  Term:     {}", product.term_label());
    match product {
        Product::Annuity(a) => {
            println!("  Initial rate: {}", format_rate(a.initial_rate));
            println!("  Bonus rate:   {}", format_rate(a.bonus_rate));
            if let Some(period) = a.guarantee_period {
                println!("  Guarantee:    {} years", period);
            }
        }
        Product::MoneyMarket(mm) => {
            if let Some(min) = mm.minimum_balance {
                println!("  Minimum balance: {:.0}", min);
            }
        }
        Product::LifeInsurance(life) => {
            for row in &life.underwriting {
                println!(
                    "  Age {:>3} {:<6} tobacco {:<3} {}",
                    row.age,
                    row.gender.as_str(),
                    row.tobacco_use.as_str(),
                    format_rate(row.rate)
                );
            }
        }
        Product::Cd(_) => {}
    }
    if let Some(grid) = product.rate_grid() {
        println!();
        print_grid(grid);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(path) = &cli.rate_grid {
        let grid = loader::load_rate_grid(path)
            .with_context(|| format!("loading rate grid {}", path.display()))?;
        print_grid(&grid);
        return Ok(());
    }

    let catalog = match &cli.catalog {
        Some(path) => ProductCatalog::from_json_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => ProductCatalog::builtin(),
    };

    if let Some(id) = &cli.id {
        let Some(product) = catalog.get(id) else {
            bail!("no product with id '{}'", id);
        };
        print_product(product);
        return Ok(());
    }

    let mut query = CatalogQuery {
        kind: cli.kind.map(ProductKind::from),
        search: cli.search.clone(),
        sort: None,
    };
    if let Some(key) = cli.sort {
        query.toggle_sort(key.into());
        if cli.desc {
            query.toggle_sort(key.into());
        }
    }

    let rows = query.apply(&catalog);
    println!(
        "{:<18} {:<30} {:<16} {:>6} {:>8}",
        "Id", "Product", "Provider", "Term", "Rate"
    );
    println!("{}", "-".repeat(82));
    for product in &rows {
        let rate = product
            .headline_rate()
            .map(format_rate)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<18} {:<30} {:<16} {:>6} {:>8}",
            product.id(),
            product.name(),
            product.provider(),
            product.term_label(),
            rate
        );
    }
    println!(
        "\n{} of {} products ({})",
        rows.len(),
        catalog.len(),
        match query.sort {
            Some((_, SortDirection::Desc)) => "descending",
            Some((_, SortDirection::Asc)) => "ascending",
            None => "catalog order",
        }
    );

    Ok(())
}
