use super::{format_results, Context};
use crate::error::Result;

pub fn run(ctx: &Context, query: &[String]) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let query = query.join(" ");
    let found = catalog.search(&query);
    println!("{}", format_results(&query, &found));
    Ok(())
}
