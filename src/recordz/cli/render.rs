//! Terminal rendering for the CLI.
//!
//! Every `render_*` function builds a `String` so output can be checked in
//! tests; handlers print it. Column widths are measured with `unicode-width`
//! so names with wide characters still line up.

use colored::Colorize;
use recordz::budget::{BudgetSummary, CategoryGroup};
use recordz::commands::{CmdMessage, DisplayRecord, MessageLevel};
use recordz::model::{Book, Grade, Student, Transaction};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 30;
const TITLE_WIDTH: usize = 32;
const AUTHOR_WIDTH: usize = 22;
const CATEGORY_WIDTH: usize = 14;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub fn render_students(students: &[DisplayRecord<Student>]) -> String {
    if students.is_empty() {
        return "No students found.\n".to_string();
    }

    let mut out = format!(
        "{}{}{:>8}  {}\n",
        "    ",
        fit("Name", NAME_WIDTH).bold(),
        "Average".bold(),
        "Grade".bold()
    );
    for dr in students {
        let s = &dr.record;
        out.push_str(&format!(
            "{}{}{:>8.2}  {}\n",
            index_column(dr.index),
            fit(s.name(), NAME_WIDTH),
            s.average(),
            colored_grade(s.grade())
        ));
    }
    out
}

pub fn render_student_detail(student: &Student) -> String {
    let mut out = format!("{}\n", student.name().bold());
    out.push_str("--------------------------------\n");
    let width = student
        .scores()
        .keys()
        .map(|k| k.width())
        .max()
        .unwrap_or(0);
    for (subject, score) in student.scores() {
        out.push_str(&format!("  {}  {:>6.2}\n", fit(subject, width), score));
    }
    out.push_str("--------------------------------\n");
    out.push_str(&format!(
        "  Average: {:.2}  Grade: {}\n",
        student.average(),
        colored_grade(student.grade())
    ));
    out
}

pub fn render_books(books: &[DisplayRecord<Book>], currency: &str) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let mut out = format!(
        "{}{}{}{:>10}  {:>6}\n",
        "    ",
        fit("Title", TITLE_WIDTH).bold(),
        fit("Author", AUTHOR_WIDTH).bold(),
        "Price".bold(),
        "Stock".bold()
    );
    for dr in books {
        let b = &dr.record;
        let stock = format!("{:>6}", b.stock());
        out.push_str(&format!(
            "{}{}{}{:>10}  {}\n",
            index_column(dr.index),
            fit(b.title(), TITLE_WIDTH),
            fit(b.author(), AUTHOR_WIDTH),
            money(currency, b.price()),
            if b.stock() == 0 { stock.red() } else { stock.normal() }
        ));
    }
    out
}

pub fn render_transactions(transactions: &[DisplayRecord<Transaction>], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut out = format!(
        "{}{:<12}{}{:>12}\n",
        "    ",
        "Date".bold(),
        fit("Category", CATEGORY_WIDTH).bold(),
        "Amount".bold()
    );
    for dr in transactions {
        out.push_str(&format!(
            "{}{:<12}{}{}\n",
            index_column(dr.index),
            dr.record.date_string(),
            fit(dr.record.category(), CATEGORY_WIDTH),
            signed_amount(&dr.record, currency)
        ));
    }
    out
}

pub fn render_categories(groups: &[CategoryGroup], currency: &str) -> String {
    if groups.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} ({})\n",
            group.category.bold(),
            money(currency, group.total)
        ));
        for t in &group.transactions {
            out.push_str(&format!(
                "    {:<12}{:>12}\n",
                t.date_string(),
                money(currency, t.amount())
            ));
        }
    }
    out
}

pub fn render_summary(summary: &BudgetSummary, currency: &str) -> String {
    let net = format!("{:>14}", money(currency, summary.net));
    format!(
        "{:<10}{:>14}\n{:<10}{:>14}\n{:<10}{}\n",
        "Income",
        money(currency, summary.income),
        "Expenses",
        money(currency, summary.expenses),
        "Balance",
        if summary.net < 0.0 { net.red() } else { net.green() }
    )
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

fn index_column(index: usize) -> String {
    format!("{:>3} ", format!("{}.", index))
}

fn money(currency: &str, value: f64) -> String {
    if value < 0.0 {
        format!("-{}{:.2}", currency, -value)
    } else {
        format!("{}{:.2}", currency, value)
    }
}

fn signed_amount(t: &Transaction, currency: &str) -> String {
    let text = format!("{:>12}", money(currency, t.amount()));
    if t.is_income() {
        text.green().to_string()
    } else {
        text
    }
}

fn colored_grade(grade: Grade) -> colored::ColoredString {
    let text = grade.to_string();
    match grade {
        Grade::A | Grade::B => text.green(),
        Grade::C | Grade::D => text.yellow(),
        Grade::F => text.red(),
    }
}

/// Truncates or pads `s` to exactly `width` display columns.
fn fit(s: &str, width: usize) -> String {
    let shown = if s.width() > width {
        truncate_to_width(s, width)
    } else {
        s.to_string()
    };
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(2) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed<T>(records: Vec<T>) -> Vec<DisplayRecord<T>> {
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| DisplayRecord {
                index: i + 1,
                record,
            })
            .collect()
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        let long = fit("abcdefghij", 6);
        assert_eq!(long.width(), 6);
        assert!(long.starts_with("abcd…"));
    }

    #[test]
    fn test_fit_counts_wide_chars() {
        let s = fit("日本", 6);
        assert_eq!(s.width(), 6);
    }

    #[test]
    fn test_student_rows() {
        let out = render_students(&listed(vec![Student::new(
            "jane doe",
            [("Math", 95.0), ("Science", 85.0)],
        )
        .unwrap()]));
        assert!(out.contains("1. "));
        assert!(out.contains("Jane Doe"));
        assert!(out.contains("90.00"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(render_students(&[]), "No students found.\n");
        assert_eq!(render_books(&[], "€"), "No books found.\n");
        assert_eq!(render_transactions(&[], "€"), "No transactions found.\n");
        assert_eq!(render_text_list(&[], "Nothing."), "Nothing.\n");
    }

    #[test]
    fn test_books_use_currency() {
        let out = render_books(
            &listed(vec![Book::new("Dune", "Frank Herbert", 9.99, 2).unwrap()]),
            "$",
        );
        assert!(out.contains("$9.99"));
        assert!(out.contains("Frank Herbert"));
    }

    #[test]
    fn test_summary_shows_negative_balance() {
        let out = render_summary(
            &BudgetSummary {
                income: 0.0,
                expenses: 12.5,
                net: -12.5,
            },
            "€",
        );
        assert!(out.contains("€12.50"));
        assert!(out.contains("-€12.50"));
    }

    #[test]
    fn test_messages_one_per_line() {
        let out = render_messages(&[CmdMessage::success("a"), CmdMessage::error("b")]);
        assert_eq!(out.lines().count(), 2);
    }
}
