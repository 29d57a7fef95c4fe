//! The analyses offered to the user
//!
//! Each report reads a fresh snapshot from the store, reduces it with
//! `lib::aggregate`, prints the figures and passes the series on to the
//! presenter. Missing data for a branch or product is reported as text.

use std::io::Write;

use crate::cli::{plot::Presenter, table::Table};
use crate::lib::{
    aggregate,
    date::Date,
    error::Error,
    period::Between,
    record::SaleRecord,
};
use crate::load::{self, store::RecordStore};

/// Distribution of the amounts sold by one branch
pub fn branch_sales<S, W>(
    store: &S,
    presenter: &mut dyn Presenter,
    out: &mut W,
    branch_id: &str,
) -> Result<(), Error>
where
    S: RecordStore,
    W: Write,
{
    writeln!(out, "///// Monthly Sales Analysis - Branch {} /////", branch_id)?;
    let sales = store.load::<SaleRecord>()?;
    let branch = aggregate::filter_by_branch(&sales, branch_id);
    if branch.is_empty() {
        writeln!(out, "Branch ID {} cannot be identified in the sales data.", branch_id)?;
        return Ok(());
    }
    writeln!(
        out,
        "{} sales, {} LKR in total",
        branch.len(),
        aggregate::total_amount(&branch)?
    )?;
    presenter.histogram(
        &format!("Monthly Sales Analysis - Branch {}", branch_id),
        &aggregate::amounts(&branch),
    )
}

/// Descriptive statistics of the amounts recorded for one product
pub fn product_prices<S, W>(
    store: &S,
    presenter: &mut dyn Presenter,
    out: &mut W,
    product_id: &str,
) -> Result<(), Error>
where
    S: RecordStore,
    W: Write,
{
    writeln!(out, "///// Price Analysis - Product {} /////", product_id)?;
    let sales = store.load::<SaleRecord>()?;
    let product = aggregate::filter_by_product(&sales, product_id);
    let summary = match aggregate::summary_statistics(&product) {
        Ok(summary) => summary,
        Err(Error::EmptyInput) => {
            writeln!(out, "No sales data found for Product ID {}.", product_id)?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    write!(out, "{}", Table::from(&summary))?;
    presenter.boxplot(
        &format!("Price Distribution - Product {}", product_id),
        &aggregate::amounts(&product),
    )
}

/// Total and average of the sales in the week containing `reference`
pub fn weekly_sales<S, W>(store: &S, out: &mut W, reference: Date) -> Result<(), Error>
where
    S: RecordStore,
    W: Write,
{
    writeln!(out, "///// Weekly Sales Analysis - Supermarket Network /////")?;
    let sales = store.load::<SaleRecord>()?;
    let week = aggregate::filter_by_week(&sales, reference)?;
    writeln!(out, "Week: {}", Between::week_of(reference))?;
    writeln!(out, "Total Sales for the Week: {} LKR", aggregate::total_amount(&week)?)?;
    writeln!(out, "Average Sale Amount: {:.2} LKR", aggregate::average_amount(&week))?;
    Ok(())
}

pub fn total_sales<S, W>(store: &S, out: &mut W) -> Result<(), Error>
where
    S: RecordStore,
    W: Write,
{
    writeln!(out, "///// Total Sales Amount /////")?;
    let sales = store.load::<SaleRecord>()?;
    writeln!(out, "Sales Total Amount: {} LKR", aggregate::total_amount(&sales)?)?;
    Ok(())
}

/// Totals of every registered branch, side by side
pub fn all_branches<S, W>(store: &S, presenter: &mut dyn Presenter, out: &mut W) -> Result<(), Error>
where
    S: RecordStore,
    W: Write,
{
    writeln!(out, "///// Monthly Sales Analysis of All Branches /////")?;
    let (sales, branches) = load::read_branch_sales(store)?;
    let totals = aggregate::group_totals_by_branch(&sales, &branches)?;
    if totals.is_empty() {
        writeln!(out, "No branch registered.")?;
        return Ok(());
    }
    write!(out, "{}", Table::from(&totals))?;
    presenter.bar_chart(
        "Monthly Sales Analysis of All Branches",
        &totals.labels(),
        &totals.values(),
    )
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::lib::record::BranchRecord;
    use crate::load::store::MemoryStore;

    /// Remembers what it was asked to draw
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub charts: Vec<(String, String, Vec<u64>)>,
    }

    impl Presenter for Recorder {
        fn histogram(&mut self, title: &str, values: &[u64]) -> Result<(), Error> {
            self.charts.push(("histogram".to_string(), title.to_string(), values.to_vec()));
            Ok(())
        }

        fn boxplot(&mut self, title: &str, values: &[u64]) -> Result<(), Error> {
            self.charts.push(("boxplot".to_string(), title.to_string(), values.to_vec()));
            Ok(())
        }

        fn bar_chart(&mut self, title: &str, _: &[String], values: &[u64]) -> Result<(), Error> {
            self.charts.push(("bar".to_string(), title.to_string(), values.to_vec()));
            Ok(())
        }
    }

    pub fn sale(branch: &str, product: &str, amount: u64, date: &str) -> SaleRecord {
        SaleRecord {
            branch_id: branch.to_string(),
            product_id: product.to_string(),
            amount,
            date: date.to_string(),
        }
    }

    pub fn branch(id: &str) -> BranchRecord {
        BranchRecord {
            branch_id: id.to_string(),
            name: format!("Branch {}", id),
            location: format!("Location {}", id),
        }
    }

    pub fn fixture() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.append(&[branch("1"), branch("2"), branch("3")]).unwrap();
        store
            .append(&[
                sale("1", "1", 100, "2024-03-05"),
                sale("2", "1", 50, "2024-03-06"),
                sale("1", "2", 300, "03/11/2024"),
            ])
            .unwrap();
        store
    }

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), Error>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn branch_histogram() {
        let store = fixture();
        let mut rec = Recorder::default();
        let text = run(|out| branch_sales(&store, &mut rec, out, "1"));
        assert!(text.contains("2 sales, 400 LKR in total"));
        assert_eq!(
            rec.charts,
            vec![(
                "histogram".to_string(),
                "Monthly Sales Analysis - Branch 1".to_string(),
                vec![100, 300]
            )]
        );
    }

    #[test]
    fn unknown_branch_is_not_an_error() {
        let store = fixture();
        let mut rec = Recorder::default();
        let text = run(|out| branch_sales(&store, &mut rec, out, "9"));
        assert!(text.contains("cannot be identified"));
        assert!(rec.charts.is_empty());
    }

    #[test]
    fn product_statistics() {
        let store = fixture();
        let mut rec = Recorder::default();
        let text = run(|out| product_prices(&store, &mut rec, out, "1"));
        assert!(text.contains("│ Average │ 75.00 │"));
        assert!(text.contains("│ Median  │ 75.00 │"));
        assert_eq!(rec.charts[0].2, vec![100, 50]);
        let text = run(|out| product_prices(&store, &mut rec, out, "7"));
        assert!(text.contains("No sales data found for Product ID 7."));
        assert_eq!(rec.charts.len(), 1);
    }

    #[test]
    fn weekly_figures() {
        let store = fixture();
        let wed = Date::from_ymd_opt(2024, 3, 6).unwrap();
        let text = run(|out| weekly_sales(&store, out, wed));
        assert!(text.contains("Week: 2024-03-04..2024-03-10"));
        assert!(text.contains("Total Sales for the Week: 150 LKR"));
        assert!(text.contains("Average Sale Amount: 75.00 LKR"));
        let empty = Date::from_ymd_opt(2023, 1, 1).unwrap();
        let text = run(|out| weekly_sales(&store, out, empty));
        assert!(text.contains("Total Sales for the Week: 0 LKR"));
        assert!(text.contains("Average Sale Amount: 0.00 LKR"));
    }

    #[test]
    fn weekly_bad_date_fails() {
        let mut store = fixture();
        store.append(&[sale("1", "1", 1, "tomorrow")]).unwrap();
        let wed = Date::from_ymd_opt(2024, 3, 6).unwrap();
        let res = weekly_sales(&store, &mut Vec::<u8>::new(), wed);
        assert!(matches!(res, Err(Error::Format(_))));
    }

    #[test]
    fn grand_total() {
        let store = fixture();
        let text = run(|out| total_sales(&store, out));
        assert!(text.contains("Sales Total Amount: 450 LKR"));
    }

    #[test]
    fn oversized_amounts_fail() {
        let mut store = fixture();
        store
            .append(&[
                sale("1", "1", 10_000_000_000_000_000_000, "2024-03-05"),
                sale("2", "1", 10_000_000_000_000_000_000, "2024-03-05"),
            ])
            .unwrap();
        let res = total_sales(&store, &mut Vec::<u8>::new());
        assert!(matches!(res, Err(Error::Overflow)));
        let res = all_branches(&store, &mut Recorder::default(), &mut Vec::<u8>::new());
        assert!(matches!(res, Err(Error::Overflow)));
    }

    #[test]
    fn branches_side_by_side() {
        let store = fixture();
        let mut rec = Recorder::default();
        let text = run(|out| all_branches(&store, &mut rec, out));
        assert!(text.contains("│ 3 │     0 │"));
        assert_eq!(rec.charts[0].2, vec![400, 50, 0]);
    }

    #[test]
    fn orphan_sale_fails() {
        let mut store = fixture();
        store.append(&[sale("4", "1", 1, "2024-03-05")]).unwrap();
        let mut rec = Recorder::default();
        let res = all_branches(&store, &mut rec, &mut Vec::<u8>::new());
        assert!(matches!(res, Err(Error::UnknownKey(ref k)) if k == "4"));
        assert!(rec.charts.is_empty());
    }
}
