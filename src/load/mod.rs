pub mod store;

use crate::lib::{
    error::Error,
    record::{BranchRecord, SaleRecord},
};
use store::RecordStore;

/// Sales and the identifiers of all registered branches, read together
pub fn read_branch_sales<S>(store: &S) -> Result<(Vec<SaleRecord>, Vec<String>), Error>
where
    S: RecordStore,
{
    let sales = store.load::<SaleRecord>()?;
    let branches = store
        .load::<BranchRecord>()?
        .into_iter()
        .map(|b| b.branch_id)
        .collect();
    Ok((sales, branches))
}
