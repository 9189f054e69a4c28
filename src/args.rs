use clap::Parser;
use std::path::PathBuf;

// https://stackoverflow.com/questions/74068168/clap-rs-not-printing-colors-during-help
fn get_styles() -> clap::builder::Styles {
    let cyan = anstyle::Color::Ansi(anstyle::AnsiColor::Cyan);
    let green = anstyle::Color::Ansi(anstyle::AnsiColor::Green);
    let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);

    clap::builder::Styles::styled()
        .placeholder(anstyle::Style::new().fg_color(Some(yellow)))
        .usage(anstyle::Style::new().fg_color(Some(cyan)).bold())
        .header(
            anstyle::Style::new()
                .fg_color(Some(cyan))
                .bold()
                .underline(),
        )
        .literal(anstyle::Style::new().fg_color(Some(green)))
}

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

/// Command-line entry point for the demo binary: loads one file into the reference in-memory
/// backend, connects a `GridTable`, and drives a handful of scroll ticks while printing the
/// visible window to stdout.
#[derive(Parser, Debug, Clone)]
#[command(
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    styles = get_styles(),
)]
pub struct Arguments {
    /// CSV delimiter.
    #[arg(short, long, default_value = ";", help = "CSV delimiter character")]
    pub delimiter: String,

    /// Set the csv, json, ndjson or parquet path.
    #[arg(help = "Path to the data file (CSV, JSON, NDJSON or Parquet)")]
    pub path: PathBuf,

    /// Set the table_name registered with the SQL engine.
    #[arg(short, long, default_value = "grid", help = "Table name for SQL queries")]
    pub table_name: String,

    /// Optional initial SQL `WHERE` filter expression.
    #[arg(short = 'w', long, help = "Initial SQL WHERE filter expression")]
    pub filter: Option<String>,

    /// Number of rows fetched per window.
    #[arg(short = 'l', long, default_value_t = 200, help = "Row window fetch limit")]
    pub fetch_limit: usize,

    /// Number of rows visible in the simulated viewport.
    #[arg(long, default_value_t = 30, help = "Visible viewport row count")]
    pub viewport_rows: usize,
}

impl Arguments {
    /// Build Arguments struct
    pub fn build() -> Arguments {
        Arguments::parse()
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b';')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_build() {
        let args = Arguments::parse_from([
            "gridview",
            "--delimiter",
            ",",
            "--table-name",
            "mytable",
            "/tmp/data.csv",
        ]);

        assert_eq!(args.delimiter, ",");
        assert_eq!(args.path, PathBuf::from("/tmp/data.csv"));
        assert_eq!(args.table_name, "mytable");
        assert_eq!(args.delimiter_byte(), b',');
    }

    #[test]
    fn test_arguments_build_with_short_options() {
        let args = Arguments::parse_from([
            "gridview",
            "-d",
            "|",
            "my_file.parquet",
            "-t",
            "tablename",
            "-w",
            "id > 1",
            "-l",
            "500",
        ]);

        assert_eq!(args.delimiter, "|");
        assert_eq!(args.path, PathBuf::from("my_file.parquet"));
        assert_eq!(args.table_name, "tablename");
        assert_eq!(args.filter, Some("id > 1".to_string()));
        assert_eq!(args.fetch_limit, 500);
    }

    #[test]
    fn test_arguments_defaults() {
        let args = Arguments::parse_from(["gridview", "/tmp/data.csv"]);

        assert_eq!(args.delimiter, ";");
        assert_eq!(args.table_name, "grid");
        assert_eq!(args.filter, None);
        assert_eq!(args.fetch_limit, 200);
        assert_eq!(args.viewport_rows, 30);
    }
}
