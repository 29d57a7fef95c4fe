//! Command-line surface: arguments, reports, charts and the interactive shell

pub mod command;
pub mod plot;
pub mod report;
pub mod shell;
pub mod table;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::PathBuf;

use crate::lib::{
    date::{self, Date},
    error::Error,
    record::{BranchRecord, ProductRecord, SaleRecord},
};
use command::Command;
use plot::{NullPresenter, Presenter, SvgPresenter};

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// directory holding the csv tables
    pub data_dir: PathBuf,
    /// where charts go, `None` to skip drawing
    pub charts: Option<PathBuf>,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let data_dir = PathBuf::from(matches.value_of("data-dir").unwrap_or("."));
        let charts = if matches.is_present("no-charts") {
            None
        } else {
            Some(PathBuf::from(matches.value_of("charts").unwrap_or("charts")))
        };
        Self { data_dir, charts }
    }

    pub fn presenter(&self) -> Box<dyn Presenter> {
        match &self.charts {
            Some(dir) => Box::new(SvgPresenter::new(dir)),
            None => Box::new(NullPresenter),
        }
    }
}

pub fn app() -> App<'static, 'static> {
    arguments(true)
}

/// Argument definitions, `env` enables the environment fallbacks
fn arguments(env: bool) -> App<'static, 'static> {
    let id = |name: &'static str| Arg::with_name(name).required(true);
    let date = Arg::with_name("date")
        .long("date")
        .takes_value(true)
        .help("Date as YYYY-MM-DD or MM/DD/YYYY, defaults to today");
    let mut data_dir = Arg::with_name("data-dir")
        .long("data-dir")
        .short("d")
        .takes_value(true)
        .default_value(".")
        .help("Directory of the csv tables");
    let mut charts = Arg::with_name("charts")
        .long("charts")
        .takes_value(true)
        .default_value("charts")
        .help("Directory where svg charts are written");
    if env {
        data_dir = data_dir.env("SALESTRACK_DATA");
        charts = charts.env("SALESTRACK_CHARTS");
    }
    App::new("salestrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Records branches, products and sales, and analyses them")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(data_dir)
        .arg(charts)
        .arg(
            Arg::with_name("no-charts")
                .long("no-charts")
                .help("Do not draw any chart"),
        )
        .subcommand(SubCommand::with_name("shell").about("Interactive session (default)"))
        .subcommand(SubCommand::with_name("total").about("Total amount of all sales"))
        .subcommand(
            SubCommand::with_name("weekly")
                .about("Total and average sales of one week")
                .arg(date.clone()),
        )
        .subcommand(
            SubCommand::with_name("branch")
                .about("Distribution of the sales of a branch")
                .arg(id("ID")),
        )
        .subcommand(
            SubCommand::with_name("product")
                .about("Price statistics of a product")
                .arg(id("ID")),
        )
        .subcommand(SubCommand::with_name("branches").about("Sales totals of all branches"))
        .subcommand(
            SubCommand::with_name("add-branch")
                .about("Register a new branch")
                .arg(id("ID"))
                .arg(id("NAME"))
                .arg(id("LOCATION")),
        )
        .subcommand(
            SubCommand::with_name("add-product")
                .about("Register a new product")
                .arg(id("ID"))
                .arg(id("NAME")),
        )
        .subcommand(
            SubCommand::with_name("add-sale")
                .about("Record a sale")
                .arg(id("BRANCH"))
                .arg(id("PRODUCT"))
                .arg(id("AMOUNT"))
                .arg(date),
        )
}

fn date_or(matches: &ArgMatches, today: Date) -> Result<Date, Error> {
    match matches.value_of("date") {
        Some(text) => Ok(date::parse_date(text)?),
        None => Ok(today),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    // clap enforces presence of required arguments
    matches.value_of(name).unwrap_or_default()
}

/// Command selected on the command line, `None` for the interactive shell
pub fn command(matches: &ArgMatches, today: Date) -> Result<Option<Command>, Error> {
    let command = match matches.subcommand() {
        ("total", _) => Command::TotalSales,
        ("branches", _) => Command::AllBranches,
        ("weekly", Some(m)) => Command::WeeklySales(date_or(m, today)?),
        ("branch", Some(m)) => Command::BranchSales(required(m, "ID").to_string()),
        ("product", Some(m)) => Command::ProductPrices(required(m, "ID").to_string()),
        ("add-branch", Some(m)) => Command::AddBranch(BranchRecord {
            branch_id: required(m, "ID").to_string(),
            name: required(m, "NAME").to_string(),
            location: required(m, "LOCATION").to_string(),
        }),
        ("add-product", Some(m)) => Command::AddProduct(ProductRecord {
            product_id: required(m, "ID").to_string(),
            name: required(m, "NAME").to_string(),
        }),
        ("add-sale", Some(m)) => {
            let amount = required(m, "AMOUNT");
            let amount = amount
                .parse::<u64>()
                .map_err(|_| Error::InvalidInput(format!("'{}' is not a whole amount", amount)))?;
            Command::AddSale(SaleRecord::new(
                required(m, "BRANCH"),
                required(m, "PRODUCT"),
                amount,
                date_or(m, today)?,
            ))
        }
        _ => return Ok(None),
    };
    Ok(Some(command))
}
