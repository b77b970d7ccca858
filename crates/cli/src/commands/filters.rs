use anyhow::Result;
use folio_core::filters::{decode, encode, merge_into};

use super::FilterArgs;

pub(crate) fn run_encode(args: &FilterArgs, into: Option<&str>) -> Result<()> {
    let filters = args.to_filters();
    let query = match into {
        Some(existing) => merge_into(existing, &filters),
        None => encode(&filters),
    };
    println!("{query}");
    Ok(())
}

pub(crate) fn run_decode(query: &str) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&decode(query))?);
    Ok(())
}
