use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "recordz", bin_name = "recordz", version = get_version())]
#[command(about = "Student grades, bookstore inventory and budget tracking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the data files (defaults to $RECORDZ_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage student records and grades
    #[command(subcommand, alias = "s", display_order = 1)]
    Students(StudentCommands),

    /// Manage the bookstore inventory
    #[command(subcommand, alias = "b", display_order = 2)]
    Books(BookCommands),

    /// Track income and expenses
    #[command(subcommand, display_order = 3)]
    Budget(BudgetCommands),

    /// Get or set configuration
    #[command(display_order = 4)]
    Config {
        /// Configuration key (e.g., currency, books-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Subject score as SUBJECT=SCORE (repeatable, e.g. --score Math=95)
    #[arg(short, long = "score", value_name = "SUBJECT=SCORE")]
    pub scores: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Add a student
    #[command(display_order = 1)]
    Add {
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        scores: ScoreArgs,
    },

    /// List all students with average and grade
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Search students by name
    #[command(display_order = 3)]
    Find { term: String },

    /// Show one student's scores
    #[command(alias = "v", display_order = 4)]
    Show {
        /// List number or unique name fragment
        selector: String,
    },

    /// Rename a student or add/replace scores
    #[command(display_order = 5)]
    Update {
        /// List number or unique name fragment
        selector: String,

        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        scores: ScoreArgs,
    },

    /// Delete a student
    #[command(alias = "rm", display_order = 6)]
    Delete {
        /// List number or unique name fragment
        selector: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Add a book
    #[command(display_order = 1)]
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        #[arg(short, long, allow_hyphen_values = true)]
        price: String,

        #[arg(short, long, allow_hyphen_values = true)]
        stock: String,
    },

    /// List the inventory and its total value
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Search books by title or author
    #[command(display_order = 3)]
    Find { term: String },

    /// Change fields of a book
    #[command(display_order = 4)]
    Update {
        /// List number or unique title/author fragment
        selector: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        price: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        stock: Option<String>,
    },

    /// Delete a book
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// List number or unique title/author fragment
        selector: String,
    },

    /// Add to or remove from a book's stock
    #[command(display_order = 6)]
    Stock {
        /// List number or unique title/author fragment
        selector: String,

        /// Change in stock, e.g. 5 or -2
        #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
        delta: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Record a transaction
    #[command(display_order = 1)]
    Add {
        /// Date as YYYY-MM-DD, not in the future
        #[arg(short, long)]
        date: String,

        #[arg(short, long)]
        category: String,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
    },

    /// List transactions by date
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Search transactions by category or date
    #[command(display_order = 3)]
    Find { term: String },

    /// Transactions grouped by category
    #[command(display_order = 4)]
    Categories,

    /// Income, expenses and balance
    #[command(display_order = 5)]
    Summary,

    /// Delete a transaction
    #[command(alias = "rm", display_order = 6)]
    Delete {
        /// List number, or a unique category/date fragment
        selector: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_scores() {
        let cli = Cli::try_parse_from([
            "recordz", "students", "add", "--name", "jane doe", "--score", "Math=95", "-s",
            "Science=85",
        ])
        .unwrap();
        match cli.command {
            Commands::Students(StudentCommands::Add { name, scores }) => {
                assert_eq!(name, "jane doe");
                assert_eq!(scores.scores, vec!["Math=95", "Science=85"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_negative_stock_delta() {
        let cli = Cli::try_parse_from(["recordz", "books", "stock", "1", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Books(BookCommands::Stock { ref delta, .. }) if delta == "-2"
        ));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "recordz", "budget", "summary", "--data-dir", "/tmp/r", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/r")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["recordz"]).is_err());
    }
}
