mod cli;
mod lib;
mod load;

use chrono::Local;
use log::debug;
use std::io;
use std::process;

use cli::{shell::Shell, Config};
use lib::error::Error;
use load::store::CsvStore;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        if let Some(hint) = err.fix_hint() {
            eprintln!("hint: {}", hint);
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let matches = cli::app().get_matches();
    let config = Config::from_matches(&matches);
    debug!("{:?}", config);
    let today = Local::now().date_naive();

    let mut store = CsvStore::new(&config.data_dir);
    store.init()?;
    let mut presenter = config.presenter();

    match cli::command(&matches, today)? {
        Some(command) => {
            let stdout = io::stdout();
            command.execute(&mut store, presenter.as_mut(), &mut stdout.lock())
        }
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut shell = Shell::new(store, presenter, stdin.lock(), stdout.lock(), today);
            shell.run()
        }
    }
}
