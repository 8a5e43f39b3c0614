//! Shared explore options and the table printer.

use std::io::Write;
use std::path::PathBuf;

use attendance_lib::explorer::Explorer;
use attendance_lib::export::export_filename;
use clap::Args;

use crate::error::CliError;

/// Search, sort, page and export options shared by every listing command.
#[derive(Args, Debug, Clone, Default)]
pub struct ExploreArgs {
    /// Case-insensitive search term
    #[arg(long, short)]
    pub search: Option<String>,

    /// Toggle sort on a column key; repeat the same key to sort descending
    #[arg(long, value_name = "KEY")]
    pub sort: Vec<String>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Export every matching row as CSV; a name is derived when PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Print the current page as JSON rows instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Where a derived export filename comes from.
pub struct ExportName<'a> {
    pub prefix: &'a str,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl ExportName<'_> {
    fn path(&self) -> PathBuf {
        PathBuf::from(export_filename(
            self.prefix,
            self.from.as_deref(),
            self.to.as_deref(),
        ))
    }
}

/// Applies `args` to `explorer` in the order a user would: search, then the
/// sort toggles, then the page.
pub fn apply(explorer: &mut Explorer, args: &ExploreArgs) {
    if let Some(term) = &args.search {
        explorer.set_search_term(term.as_str());
    }
    for key in &args.sort {
        if explorer.toggle_sort(key.as_str()).is_none() {
            log::warn!("ignoring sort on '{}'", key);
            eprintln!("Warning: '{}' is not a sortable column", key);
        }
    }
    explorer.set_page(args.page);
}

/// Prints the explorer's current page and runs the export, if requested.
pub fn print(
    out: &mut impl Write,
    explorer: &Explorer,
    args: &ExploreArgs,
    name: &ExportName<'_>,
) -> Result<(), CliError> {
    writeln!(out, "{} records found", explorer.rows().len())?;

    if args.json {
        let view = explorer.view();
        writeln!(out, "{}", serde_json::to_string_pretty(&view.page)?)?;
    } else {
        write!(out, "{}", explorer.render().to_text())?;
    }

    if let Some(path) = &args.export {
        let path = path.clone().unwrap_or_else(|| name.path());
        let count = explorer.write_csv_file(&path)?;
        writeln!(out, "Exported {} rows to {}", count, path.display())?;
    }
    Ok(())
}

/// [`apply`] then [`print`].
pub fn explore(
    out: &mut impl Write,
    mut explorer: Explorer,
    args: &ExploreArgs,
    name: &ExportName<'_>,
) -> Result<(), CliError> {
    apply(&mut explorer, args);
    print(out, &explorer, args, name)
}
