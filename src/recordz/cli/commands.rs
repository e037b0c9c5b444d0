//! # CLI Layer
//!
//! This module is **one possible UI client** for recordz, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Raw argument strings are parsed with the entity validators before they reach a
//! manager, so a bad number or date is reported with the same wording the
//! library uses. A failed request returns `Err`, which `main` prints and turns
//! into exit code 1.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `handle_*()`: Per-command handlers that call a manager and print the result

use super::render::{
    print_messages, render_books, render_categories, render_student_detail, render_students,
    render_summary, render_text_list, render_transactions,
};
use super::setup::{BookCommands, BudgetCommands, Cli, Commands, ScoreArgs, StudentCommands};
use clap::Parser;
use recordz::commands::{CmdResult, Selector};
use recordz::config::{self, ConfigAction};
use recordz::error::{RecordzError, Result};
use recordz::init::{initialize, RecordzContext};
use recordz::inventory::BookUpdate;
use recordz::logging::init_logging;
use recordz::model::{Book, Student, Transaction};
use recordz::students::StudentUpdate;
use recordz::validation::parse_integer;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let ctx = initialize(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Students(cmd) => handle_students(&ctx, cmd),
        Commands::Books(cmd) => handle_books(&ctx, cmd),
        Commands::Budget(cmd) => handle_budget(&ctx, cmd),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

/// Load messages are only worth showing when something went wrong.
fn report_load<T>(loaded: &CmdResult<T>) {
    if loaded.has_errors() {
        print_messages(&loaded.messages);
    }
}

/// Prints messages and fails the request if any of them is an error.
fn finish<T>(result: &CmdResult<T>) -> Result<()> {
    print_messages(&result.messages);
    if result.has_errors() {
        return Err(RecordzError::Api("command finished with errors".into()));
    }
    Ok(())
}

fn parse_selector(raw: &str) -> Result<Selector> {
    raw.parse()
}

fn parse_scores(args: &ScoreArgs) -> Result<Vec<(String, f64)>> {
    args.scores
        .iter()
        .map(|raw| {
            Student::parse_score_entry(raw)
                .map(|(subject, score)| (subject.to_string(), score))
                .map_err(RecordzError::from)
        })
        .collect()
}

fn handle_students(ctx: &RecordzContext, cmd: StudentCommands) -> Result<()> {
    let (mut manager, loaded) = ctx.students();
    report_load(&loaded);

    match cmd {
        StudentCommands::Add { name, scores } => {
            let scores = parse_scores(&scores)?;
            finish(&manager.add(&name, scores)?)
        }
        StudentCommands::List => {
            print!("{}", render_students(&manager.list().listed));
            Ok(())
        }
        StudentCommands::Find { term } => {
            print!("{}", render_students(&manager.find(&term).listed));
            Ok(())
        }
        StudentCommands::Show { selector } => {
            let student = manager.get(&parse_selector(&selector)?)?;
            print!("{}", render_student_detail(student));
            Ok(())
        }
        StudentCommands::Update {
            selector,
            name,
            scores,
        } => {
            let update = StudentUpdate {
                name,
                scores: parse_scores(&scores)?,
            };
            finish(&manager.update(&parse_selector(&selector)?, &update)?)
        }
        StudentCommands::Delete { selector } => {
            finish(&manager.delete(&parse_selector(&selector)?)?)
        }
    }
}

fn handle_books(ctx: &RecordzContext, cmd: BookCommands) -> Result<()> {
    let (mut manager, loaded) = ctx.inventory();
    report_load(&loaded);
    let currency = &ctx.config.currency;

    match cmd {
        BookCommands::Add {
            title,
            author,
            price,
            stock,
        } => {
            let price = Book::parse_price(&price)?;
            let stock = Book::parse_stock(&stock)?;
            finish(&manager.add(&title, &author, price, i64::from(stock))?)
        }
        BookCommands::List => {
            print!("{}", render_books(&manager.list().listed, currency));
            println!("Total inventory value: {}{:.2}", currency, manager.total_value()?);
            Ok(())
        }
        BookCommands::Find { term } => {
            print!("{}", render_books(&manager.find(&term).listed, currency));
            Ok(())
        }
        BookCommands::Update {
            selector,
            title,
            author,
            price,
            stock,
        } => {
            let update = BookUpdate {
                title,
                author,
                price: price.as_deref().map(Book::parse_price).transpose()?,
                stock: stock
                    .as_deref()
                    .map(Book::parse_stock)
                    .transpose()?
                    .map(i64::from),
            };
            finish(&manager.update(&parse_selector(&selector)?, &update)?)
        }
        BookCommands::Delete { selector } => finish(&manager.delete(&parse_selector(&selector)?)?),
        BookCommands::Stock { selector, delta } => {
            let delta = parse_integer("stock change", &delta)?;
            finish(&manager.adjust_stock(&parse_selector(&selector)?, delta)?)
        }
    }
}

fn handle_budget(ctx: &RecordzContext, cmd: BudgetCommands) -> Result<()> {
    let (mut tracker, loaded) = ctx.budget();
    report_load(&loaded);
    let currency = &ctx.config.currency;

    match cmd {
        BudgetCommands::Add {
            date,
            category,
            amount,
        } => {
            let amount = Transaction::parse_amount(&amount)?;
            finish(&tracker.add(&date, &category, amount)?)
        }
        BudgetCommands::List => {
            print!("{}", render_transactions(&tracker.list().listed, currency));
            Ok(())
        }
        BudgetCommands::Find { term } => {
            print!("{}", render_transactions(&tracker.find(&term).listed, currency));
            Ok(())
        }
        BudgetCommands::Categories => {
            print!("{}", render_categories(&tracker.by_category()?, currency));
            Ok(())
        }
        BudgetCommands::Summary => {
            print!("{}", render_summary(&tracker.summary()?, currency));
            Ok(())
        }
        BudgetCommands::Delete { selector } => {
            finish(&tracker.delete(&parse_selector(&selector)?)?)
        }
    }
}

fn handle_config(ctx: &RecordzContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = config::run(&ctx.data_dir, action)?;
    let lines: Vec<String> = result
        .affected
        .iter()
        .map(|(k, v)| format!("{} = {}", k, v))
        .collect();
    if !lines.is_empty() || result.messages.is_empty() {
        print!("{}", render_text_list(&lines, "No configuration values."));
    }
    finish(&result)
}
