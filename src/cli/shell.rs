//! Interactive session: login, then a numbered menu until sign out
//!
//! Input and output are plain `BufRead`/`Write` so that a whole session
//! can be scripted. Running out of input ends the session quietly.

use log::{info, warn};
use std::io::{BufRead, Write};

use crate::cli::{
    command::{Choice, Command},
    plot::Presenter,
};
use crate::lib::{
    date::{self, Date},
    error::Error,
    record::{BranchRecord, SaleRecord, UserRecord},
};
use crate::load::store::RecordStore;

/// Check a username/password pair against the users table
pub fn login<S>(store: &S, username: &str, password: &str) -> Result<(), Error>
where
    S: RecordStore,
{
    let users = store.load::<UserRecord>()?;
    if users
        .iter()
        .any(|u| u.username == username && u.password == password)
    {
        info!("user {} logged in", username);
        Ok(())
    } else {
        warn!("failed login for {}", username);
        Err(Error::BadCredentials)
    }
}

pub struct Shell<S, R, W> {
    store: S,
    presenter: Box<dyn Presenter>,
    input: R,
    out: W,
    today: Date,
}

impl<S, R, W> Shell<S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub fn new(store: S, presenter: Box<dyn Presenter>, input: R, out: W, today: Date) -> Self {
        Self {
            store,
            presenter,
            input,
            out,
            today,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (S, W) {
        (self.store, self.out)
    }

    /// Print `msg` and read one line, `None` once input is exhausted
    fn prompt(&mut self, msg: &str) -> Result<Option<String>, Error> {
        write!(self.out, "{}", msg)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Ask for credentials until they match, `false` if input ends first
    pub fn authenticate(&mut self) -> Result<bool, Error> {
        writeln!(self.out, "///// Login /////")?;
        loop {
            let username = match self.prompt("Enter username: ")? {
                Some(u) => u,
                None => return Ok(false),
            };
            let password = match self.prompt("Enter password: ")? {
                Some(p) => p,
                None => return Ok(false),
            };
            match login(&self.store, &username, &password) {
                Ok(()) => {
                    writeln!(self.out, "Successful Login!")?;
                    return Ok(true);
                }
                Err(Error::BadCredentials) => {
                    writeln!(self.out, "Invalid login. Please try again.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Full session
    pub fn run(&mut self) -> Result<(), Error> {
        if !self.authenticate()? {
            return Ok(());
        }
        loop {
            writeln!(self.out, "\n///// Main Menu /////")?;
            for (i, c) in Choice::ALL.iter().enumerate() {
                writeln!(self.out, "{}. {}", i + 1, c.describe())?;
            }
            let line = match self.prompt("Choose an option (1-8): ")? {
                Some(line) => line,
                None => return Ok(()),
            };
            let choice = match Choice::parse(&line) {
                Some(Choice::SignOut) => {
                    writeln!(self.out, "Logged out.")?;
                    return Ok(());
                }
                Some(c) => c,
                None => {
                    writeln!(self.out, "Not a suitable choice. Type a number between 1 and 8 please.")?;
                    continue;
                }
            };
            let command = match self.read_command(choice) {
                Ok(Some(command)) => command,
                Ok(None) => return Ok(()),
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            if let Err(e) = command.execute(&mut self.store, self.presenter.as_mut(), &mut self.out) {
                self.report(&e)?;
            }
        }
    }

    fn report(&mut self, e: &Error) -> Result<(), Error> {
        warn!("command failed: {}", e);
        writeln!(self.out, "Error: {}", e)?;
        if let Some(hint) = e.fix_hint() {
            writeln!(self.out, "hint: {}", hint)?;
        }
        Ok(())
    }

    /// Ask for the arguments of `choice`
    fn read_command(&mut self, choice: Choice) -> Result<Option<Command>, Error> {
        macro_rules! ask {
            ( $msg:expr ) => {
                match self.prompt($msg)? {
                    Some(line) => line,
                    None => return Ok(None),
                }
            };
        }
        let command = match choice {
            Choice::AddBranch => {
                writeln!(self.out, "\n///// Add New Branch /////")?;
                Command::AddBranch(BranchRecord {
                    branch_id: ask!("Enter Branch ID: "),
                    name: ask!("Enter Branch Name: "),
                    location: ask!("Enter Location: "),
                })
            }
            Choice::AddSale => {
                writeln!(self.out, "\n///// Add New Sale /////")?;
                let branch_id = ask!("Enter Branch ID: ");
                let product_id = ask!("Enter Product ID: ");
                let amount = ask!("Enter Amount Sold: ");
                let amount = amount
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidInput(format!("'{}' is not a whole amount", amount)))?;
                Command::AddSale(SaleRecord::new(branch_id, product_id, amount, self.today))
            }
            Choice::BranchSales => Command::BranchSales(ask!("Enter Branch ID: ")),
            Choice::ProductPrices => Command::ProductPrices(ask!("Enter Product ID: ")),
            Choice::WeeklySales => {
                let text = ask!("Enter a date in the week (empty for today): ");
                if text.trim().is_empty() {
                    Command::WeeklySales(self.today)
                } else {
                    Command::WeeklySales(date::parse_date(&text)?)
                }
            }
            Choice::TotalSales => Command::TotalSales,
            Choice::AllBranches => Command::AllBranches,
            Choice::SignOut => return Ok(None),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cli::plot::NullPresenter;
    use crate::cli::report::test::fixture;
    use crate::load::store::MemoryStore;

    fn users() -> MemoryStore {
        let mut store = fixture();
        store
            .append(&[UserRecord {
                username: "testuser".to_string(),
                password: "testpass".to_string(),
            }])
            .unwrap();
        store
    }

    fn session(store: MemoryStore, script: &str) -> (MemoryStore, String) {
        let today = Date::from_ymd_opt(2024, 3, 6).unwrap();
        let mut shell = Shell::new(
            store,
            Box::new(NullPresenter),
            script.as_bytes(),
            Vec::new(),
            today,
        );
        shell.run().unwrap();
        let (store, out) = shell.into_parts();
        (store, String::from_utf8(out).unwrap())
    }

    #[test]
    fn credentials() {
        let store = users();
        assert!(login(&store, "testuser", "testpass").is_ok());
        assert!(matches!(
            login(&store, "invaliduser", "invalidpass"),
            Err(Error::BadCredentials)
        ));
        assert!(login(&store, "testuser", "").is_err());
        assert!(login(&MemoryStore::new(), "testuser", "testpass").is_err());
    }

    #[test]
    fn retries_login_then_signs_out() {
        let (_, out) = session(users(), "bad\nbad\ntestuser\ntestpass\n8\n");
        assert_eq!(out.matches("Invalid login").count(), 1);
        assert!(out.contains("Successful Login!"));
        assert!(out.contains("Logged out."));
    }

    #[test]
    fn exhausted_input_ends_session() {
        let (_, out) = session(users(), "bad\n");
        assert!(!out.contains("Main Menu"));
        let (_, out) = session(users(), "testuser\ntestpass\n");
        assert!(out.contains("Main Menu"));
    }

    #[test]
    fn records_branch_and_sale() {
        let script = "testuser\ntestpass\n1\n4\nBranch D\nLocation D\n2\n4\n1\n200\n7\n8\n";
        let (store, out) = session(users(), script);
        assert!(out.contains("Branch Branch D successfully added."));
        assert!(out.contains("Sale successfully added."));
        assert!(out.contains("│ 4 │   200 │"));
        let sales = store.load::<SaleRecord>().unwrap();
        assert_eq!(sales.last(), Some(&SaleRecord::new("4", "1", 200, Date::from_ymd_opt(2024, 3, 6).unwrap())));
    }

    #[test]
    fn bad_input_keeps_session_alive() {
        let script = "testuser\ntestpass\n12\n2\n1\n1\nlots\n5\n05-03-2024\n5\n\n8\n";
        let (store, out) = session(users(), script);
        assert!(out.contains("Not a suitable choice"));
        assert!(out.contains("Error: invalid input: 'lots' is not a whole amount"));
        assert!(out.contains("does not match any known date format"));
        assert!(out.contains("Total Sales for the Week: 150 LKR"));
        assert!(out.contains("Logged out."));
        assert_eq!(store.load::<SaleRecord>().unwrap().len(), 3);
    }

    #[test]
    fn orphan_sale_is_reported() {
        let script = "testuser\ntestpass\n2\n9\n1\n5\n7\n8\n";
        let (_, out) = session(users(), script);
        assert!(out.contains("Error: sale references unknown branch '9'"));
        assert!(out.contains("hint: register branch '9' or remove its sales"));
    }
}
