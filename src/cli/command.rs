use log::info;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::io::Write;

use crate::cli::{plot::Presenter, report};
use crate::lib::{
    date::Date,
    error::Error,
    record::{BranchRecord, ProductRecord, SaleRecord},
};
use crate::load::store::RecordStore;

/// Something the user asked for, with all its arguments resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddBranch(BranchRecord),
    AddProduct(ProductRecord),
    AddSale(SaleRecord),
    BranchSales(String),
    ProductPrices(String),
    WeeklySales(Date),
    TotalSales,
    AllBranches,
}

impl Command {
    pub fn execute<S, W>(
        &self,
        store: &mut S,
        presenter: &mut dyn Presenter,
        out: &mut W,
    ) -> Result<(), Error>
    where
        S: RecordStore,
        W: Write,
    {
        info!("executing {:?}", self);
        use Command::*;
        match self {
            AddBranch(b) => {
                store.append(std::slice::from_ref(b))?;
                writeln!(out, "Branch {} successfully added.", b.name)?;
            }
            AddProduct(p) => {
                store.append(std::slice::from_ref(p))?;
                writeln!(out, "Product {} successfully added.", p.name)?;
            }
            AddSale(s) => {
                store.append(std::slice::from_ref(s))?;
                writeln!(out, "Sale successfully added.")?;
            }
            BranchSales(id) => report::branch_sales(&*store, presenter, out, id)?,
            ProductPrices(id) => report::product_prices(&*store, presenter, out, id)?,
            WeeklySales(date) => report::weekly_sales(&*store, out, *date)?,
            TotalSales => report::total_sales(&*store, out)?,
            AllBranches => report::all_branches(&*store, presenter, out)?,
        }
        Ok(())
    }
}

/// Entries of the main menu, numbered as displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Choice {
    AddBranch = 1,
    AddSale,
    BranchSales,
    ProductPrices,
    WeeklySales,
    TotalSales,
    AllBranches,
    SignOut,
}

impl Choice {
    pub const ALL: [Choice; 8] = [
        Choice::AddBranch,
        Choice::AddSale,
        Choice::BranchSales,
        Choice::ProductPrices,
        Choice::WeeklySales,
        Choice::TotalSales,
        Choice::AllBranches,
        Choice::SignOut,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<usize>().ok().and_then(Self::from_usize)
    }

    pub fn describe(self) -> &'static str {
        use Choice::*;
        match self {
            AddBranch => "Register a New Branch",
            AddSale => "Record a New Sale",
            BranchSales => "Analyze Monthly Sales for a Specific Branch",
            ProductPrices => "Examine Price Data for a Specific Product",
            WeeklySales => "Review Weekly Sales for the Supermarket Network",
            TotalSales => "Analyze Total Sales Amounts",
            AllBranches => "Monthly Sales Analysis of All Branches",
            SignOut => "Sign out",
        }
    }
}
