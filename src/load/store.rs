//! Flat-file persistence of the four tables
//!
//! Each table lives in its own CSV file with a header row. Rows are only
//! ever appended; there is no locking and no rewrite of existing content.

use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::lib::{
    error::Error,
    record::{BranchRecord, ProductRecord, SaleRecord, UserRecord},
};

/// A record type that is persisted as its own table
pub trait Table: Serialize + DeserializeOwned {
    const FILE: &'static str;
    const HEADERS: &'static [&'static str];
}

impl Table for UserRecord {
    const FILE: &'static str = "users.csv";
    const HEADERS: &'static [&'static str] = &["Username", "Password"];
}

impl Table for BranchRecord {
    const FILE: &'static str = "branches.csv";
    const HEADERS: &'static [&'static str] = &["Branch ID", "Branch Name", "Location"];
}

impl Table for ProductRecord {
    const FILE: &'static str = "products.csv";
    const HEADERS: &'static [&'static str] = &["Product ID", "Product Name"];
}

impl Table for SaleRecord {
    const FILE: &'static str = "sales.csv";
    const HEADERS: &'static [&'static str] = &["Branch ID", "Product ID", "Amount Sold", "Date"];
}

/// Where records come from and where new ones go
///
/// `load` returns a fresh snapshot in file order every time it is called.
pub trait RecordStore {
    fn load<T: Table>(&self) -> Result<Vec<T>, Error>;
    fn append<T: Table>(&mut self, rows: &[T]) -> Result<(), Error>;
}

/// Reads all rows after the header
pub fn read_rows<T, R>(reader: R) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let rows = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

/// Writes rows, preceded by the header of `T` if `header` is set
pub fn write_rows<T, W>(writer: W, rows: &[T], header: bool) -> Result<(), Error>
where
    T: Table,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    if header {
        wtr.write_record(T::HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Tables stored as CSV files inside one directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path<T: Table>(&self) -> PathBuf {
        self.dir.join(T::FILE)
    }

    /// Create the directory and every missing table with its header
    pub fn init(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;
        self.ensure::<UserRecord>()?;
        self.ensure::<BranchRecord>()?;
        self.ensure::<ProductRecord>()?;
        self.ensure::<SaleRecord>()?;
        Ok(())
    }

    fn ensure<T: Table>(&self) -> Result<(), Error> {
        let path = self.path::<T>();
        if !path.exists() {
            debug!("creating {}", path.display());
            write_rows::<T, _>(fs::File::create(&path)?, &[], true)?;
        }
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn load<T: Table>(&self) -> Result<Vec<T>, Error> {
        let path = self.path::<T>();
        if !path.exists() {
            debug!("{} does not exist yet", path.display());
            return Ok(Vec::new());
        }
        let rows = read_rows(fs::File::open(&path)?)?;
        debug!("loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn append<T: Table>(&mut self, rows: &[T]) -> Result<(), Error> {
        let path = self.path::<T>();
        let fresh = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        write_rows(file, rows, fresh)?;
        debug!("appended {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

/// Tables kept as CSV text in memory
///
/// Behaves like `CsvStore` without touching the disk.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: std::collections::HashMap<&'static str, Vec<u8>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents of a table, as it would be written to disk
    pub fn contents<T: Table>(&self) -> &[u8] {
        self.files.get(T::FILE).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
impl RecordStore for MemoryStore {
    fn load<T: Table>(&self) -> Result<Vec<T>, Error> {
        read_rows(self.contents::<T>())
    }

    fn append<T: Table>(&mut self, rows: &[T]) -> Result<(), Error> {
        let buf = self.files.entry(T::FILE).or_default();
        let fresh = buf.is_empty();
        write_rows(buf, rows, fresh)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn branch(id: &str) -> BranchRecord {
        BranchRecord {
            branch_id: id.to_string(),
            name: format!("Branch {}", id),
            location: format!("Location {}", id),
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("salestrack-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn reads_existing_files() {
        let text = "Branch ID,Product ID,Amount Sold,Date\n1,1,100,2024-03-05\n 2 , 1 , 50 ,03/06/2024\n";
        let rows: Vec<SaleRecord> = read_rows(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].branch_id, "2");
        assert_eq!(rows[1].amount, 50);
        assert_eq!(rows[1].date, "03/06/2024");
    }

    #[test]
    fn rejects_non_integer_amount() {
        let text = "Branch ID,Product ID,Amount Sold,Date\n1,1,ten,2024-03-05\n";
        let rows: Result<Vec<SaleRecord>, _> = read_rows(text.as_bytes());
        assert!(matches!(rows, Err(Error::Csv(_))));
    }

    #[test]
    fn header_written_once() {
        let mut store = MemoryStore::new();
        store.append(&[branch("1")]).unwrap();
        store.append(&[branch("2")]).unwrap();
        assert_eq!(
            String::from_utf8(store.contents::<BranchRecord>().to_vec()).unwrap(),
            "Branch ID,Branch Name,Location\n1,Branch 1,Location 1\n2,Branch 2,Location 2\n"
        );
        assert_eq!(store.load::<BranchRecord>().unwrap(), vec![branch("1"), branch("2")]);
    }

    #[test]
    fn missing_table_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load::<SaleRecord>().unwrap().is_empty());
        let store = CsvStore::new(scratch("missing"));
        assert!(store.load::<UserRecord>().unwrap().is_empty());
    }

    #[test]
    fn csv_files_roundtrip() {
        let dir = scratch("files");
        let mut store = CsvStore::new(&dir);
        store.init().unwrap();
        assert_eq!(
            fs::read_to_string(store.path::<ProductRecord>()).unwrap(),
            "Product ID,Product Name\n"
        );
        assert!(store.load::<BranchRecord>().unwrap().is_empty());
        store.append(&[branch("1")]).unwrap();
        store.append(&[branch("2"), branch("3")]).unwrap();
        // init again must not clobber existing rows
        store.init().unwrap();
        let loaded = store.load::<BranchRecord>().unwrap();
        assert_eq!(loaded, vec![branch("1"), branch("2"), branch("3")]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
