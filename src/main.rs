mod app;
mod booking;
mod calendar;
mod cart;
mod catalog;
mod help;
mod picker;
mod query;
mod theme;
use crate::app::App;
use crate::booking::DisabledDays;
use crate::catalog::Product;
use crate::query::SearchParams;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    today: Option<Date>,
    catalog: Option<PathBuf>,
    variant: Option<String>,
    query: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("catalog") => opts.catalog = Some(PathBuf::from(parser.value()?)),
                Arg::Long("variant") => opts.variant = Some(parser.value()?.string()?),
                Arg::Long("query") => opts.query = Some(parser.value()?.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = match opts.today {
                    Some(d) => d,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                let product = match opts.catalog {
                    Some(path) => Product::load(&path).with_context(|| {
                        format!("failed to read catalog from {}", path.display())
                    })?,
                    None => Product::sample(),
                };
                let variant = product
                    .variant(opts.variant.as_deref())
                    .context("no matching product variant")?
                    .clone();
                let params = match opts.query {
                    Some(q) => SearchParams::parse(&q),
                    None => SearchParams::new(),
                };
                let submission = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let app = App::new(
                        today,
                        DisabledDays::sample(),
                        product.title,
                        variant,
                        params,
                    );
                    Ok(app.run(&mut terminal)?)
                })?;
                if let Some(sub) = submission {
                    let payload = serde_json::to_string_pretty(&sub.form)
                        .context("failed to serialize cart payload")?;
                    println!("{payload}");
                    println!("?{}", sub.query);
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: yoyaku [options]");
                println!();
                println!("Terminal date-range picker for booking a stay on a storefront product");
                println!();
                println!("Options:");
                println!("  --today <YYYY-MM-DD>   Pretend today is the given date");
                println!("  --catalog <FILE>       Read the product from a JSON catalog file");
                println!("  --variant <TITLE>      Pick the product variant by title");
                println!("  --query <QUERY>        Start from the given page query string");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
