//! Rows of the four tables kept by the chain
//!
//! Field names follow the column headers of the files written by earlier
//! versions of the tool, so existing data loads unchanged.

use serde::{Deserialize, Serialize};

use crate::lib::date::{self, Date, FormatError};

/// One sale: a quantity of a product sold in a branch on some day
///
/// The date is kept as found in the file and parsed on demand, so that
/// analyses that do not need it still work on rows with unusual dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Branch ID")]
    pub branch_id: String,
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Amount Sold")]
    pub amount: u64,
    #[serde(rename = "Date")]
    pub date: String,
}

impl SaleRecord {
    pub fn new<B, P>(branch_id: B, product_id: P, amount: u64, date: Date) -> Self
    where
        B: ToString,
        P: ToString,
    {
        Self {
            branch_id: branch_id.to_string(),
            product_id: product_id.to_string(),
            amount,
            date: date::format_date(date),
        }
    }

    pub fn date(&self) -> Result<Date, FormatError> {
        date::parse_date(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    #[serde(rename = "Branch ID")]
    pub branch_id: String,
    #[serde(rename = "Branch Name")]
    pub name: String,
    #[serde(rename = "Location")]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Product Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}
