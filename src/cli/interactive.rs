use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::export::export_records;
use super::{format_results, Context};
use crate::catalog::Catalog;
use crate::error::Result;

const EXIT_WORD: &str = "exit";

/// Read one trimmed line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Answer queries until `exit` or end of input.
pub fn search_loop<R: BufRead, W: Write>(catalog: &Catalog, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        write!(out, "Search (or '{EXIT_WORD}' to quit): ")?;
        out.flush()?;
        let Some(query) = read_line(input)? else {
            writeln!(out)?;
            break;
        };
        if query.eq_ignore_ascii_case(EXIT_WORD) {
            break;
        }
        let found = catalog.search(&query);
        writeln!(out, "{}", format_results(&query, &found))?;
    }
    Ok(())
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes" | "д" | "да")
}

/// Yes/no prompt; anything but an explicit yes (including end of input) is no.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "{prompt} [y/N]: ")?;
    out.flush()?;
    Ok(read_line(input)?.is_some_and(|a| is_yes(&a)))
}

pub fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    if catalog.is_empty() {
        println!("No products loaded from {}.", ctx.source_dir().display());
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();

    search_loop(&catalog, &mut input, &mut out)?;

    let path = PathBuf::from(&ctx.settings.report_path);
    let prompt = format!("Export to {}?", path.display());
    if confirm(&prompt, &mut input, &mut out)? {
        drop(out);
        export_records(catalog.records(), &path, None)?;
    }
    println!("Done.");
    Ok(())
}
