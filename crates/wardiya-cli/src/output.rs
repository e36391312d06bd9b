//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;
use wardiya_core::controller::RosterController;
use wardiya_core::events::RosterEvent;
use wardiya_core::rotation::model::{Participant, Role};
use wardiya_core::schedule::model::{WeekFilter, WeekRecord};
use wardiya_core::schedule::resolver::DisplaySlot;

const NOT_AVAILABLE: &str = "Not Available";

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Centre a plain string within a given visual width.
fn pad_center(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    let padding = width.saturating_sub(visual);
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(padding - left))
}

fn paint_person(person: Participant, text: &str) -> ColoredString {
    match person {
        Participant::Ahmed => text.cyan().bold(),
        Participant::Yousef => text.yellow().bold(),
        Participant::Omar => text.green().bold(),
    }
}

/// One line of a card: the plain text drives layout, the painted text is printed.
struct CardLine {
    plain: String,
    painted: String,
}

impl CardLine {
    fn plain(text: String) -> Self {
        Self {
            painted: text.clone(),
            plain: text,
        }
    }

    fn painted(plain: String, painted: impl ToString) -> Self {
        Self {
            plain,
            painted: painted.to_string(),
        }
    }

    /// Print padded to `width`; colour codes do not count towards the width.
    fn padded(&self, width: usize) -> String {
        let visual = UnicodeWidthStr::width(self.plain.as_str());
        format!("{}{}", self.painted, " ".repeat(width.saturating_sub(visual)))
    }
}

fn card_lines(slot: &DisplaySlot, week: Option<&WeekRecord>) -> Vec<CardLine> {
    let label = slot.position.label();
    let heading = if slot.highlighted {
        CardLine::painted(format!("▶ {label}"), format!("▶ {label}").blue().bold())
    } else {
        CardLine::painted(label.to_string(), label.bold())
    };

    let Some(week) = week else {
        return vec![
            heading,
            CardLine::plain(String::new()),
            CardLine::painted(NOT_AVAILABLE.into(), NOT_AVAILABLE.dimmed()),
        ];
    };

    let mut lines = vec![
        heading,
        CardLine::painted(format!("Week #{}", week.week_number), format!("Week #{}", week.week_number).dimmed()),
        CardLine::painted(week.date_range(), week.date_range().dimmed()),
    ];
    for (role, person) in week.assignment.iter() {
        let prefix = format!("{:<13}", role.label());
        lines.push(CardLine::painted(
            format!("{prefix}{}", person.name()),
            format!("{prefix}{}", paint_person(person, person.name())),
        ));
    }
    let rest = week.rest_day.to_string();
    lines.push(CardLine::painted(rest.clone(), rest.red()));
    lines
}

/// Print the last / current / next week cards.
///
/// Cards sit side by side when the terminal is wide enough and stack
/// otherwise. A missing neighbour renders as "Not Available".
pub fn print_dashboard(controller: &RosterController) {
    let window = controller.display_window();
    let cards: Vec<Vec<CardLine>> = window
        .slots()
        .iter()
        .map(|slot| card_lines(slot, slot.index.and_then(|i| controller.schedule().get(i))))
        .collect();

    println!(
        "{} {}",
        "Today".bold(),
        controller.today().format("%d/%m/%Y").to_string().dimmed()
    );
    if controller.current_index().is_none() {
        println!("{}", "Today is outside the schedule.".yellow());
    }
    println!();

    let width = term_width();
    if width < 78 {
        print_cards_compact(&cards);
    } else {
        print_cards_wide(&cards, width);
    }
}

fn print_cards_wide(cards: &[Vec<CardLine>], term_w: usize) {
    let num_cols = cards.len();
    let col_width = ((term_w - num_cols - 1) / num_cols).clamp(24, 32);
    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = (0..num_cols).map(|_| "─".repeat(col_width + 2)).collect();
        println!("{}", format!("{left}{}{right}", segments.join(mid)).dimmed());
    };

    border("┌", "┬", "┐");
    let rows = cards.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        print!("{}", "│".dimmed());
        for card in cards {
            let cell = card
                .get(row)
                .map(|line| line.padded(col_width))
                .unwrap_or_else(|| " ".repeat(col_width));
            print!(" {cell} {}", "│".dimmed());
        }
        println!();
    }
    border("└", "┴", "┘");
}

fn print_cards_compact(cards: &[Vec<CardLine>]) {
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            println!("{}", "─".repeat(30).dimmed());
        }
        for line in card {
            println!("  {}", line.painted);
        }
    }
}

/// Print weeks as a table, highlighting `current`.
pub fn print_schedule_table(weeks: &[&WeekRecord], current: Option<usize>, filter: &WeekFilter) {
    if let Some(person) = filter.participant {
        let role = filter.role.map(|r| format!(" as {}", r.label())).unwrap_or_default();
        println!("{} {}{}", "Filter:".bold(), paint_person(person, person.name()), role);
        println!();
    }

    if weeks.is_empty() {
        println!("{}", "No weeks match the filter.".dimmed());
        return;
    }

    let header = format!(
        "  {:<6} {:<12} {:<12} {:<8} {:<8} {:<8} {}",
        "Week", "Start", "End", "First", "Second", "Third", "Friday"
    );
    println!("{}", header.bold());
    println!("{}", "─".repeat(UnicodeWidthStr::width(header.as_str())).dimmed());

    for week in weeks {
        let is_current = current == Some(week.index());
        let marker = if is_current { "▶".blue().bold() } else { " ".normal() };
        let number = format!("{:<6}", week.week_number);
        let dates = format!("{:<12} {:<12}", week.week_start_formatted(), week.week_end_formatted());
        let shifts: Vec<String> = Role::ALL
            .iter()
            .map(|role| {
                let person = week.assignment.get(*role);
                paint_person(person, &pad_right(person.name(), 8)).to_string()
            })
            .collect();

        let (number, dates) = if is_current {
            (number.blue().bold(), dates.blue().bold())
        } else {
            (number.normal(), dates.normal())
        };
        println!(
            "{}  {} {} {} {}",
            marker,
            number,
            dates,
            shifts.join(" "),
            week.rest_day.label().red()
        );
    }

    println!();
    println!("{} week(s)", weeks.len());
}

/// Print a banner for each new-week notification among `events`.
pub fn print_notifications(events: &[RosterEvent]) {
    for event in events {
        if let RosterEvent::NewWeekNotification { week_number } = event {
            print_new_week_banner(*week_number);
        }
    }
}

pub fn print_new_week_banner(week_number: u32) {
    let text = format!("New Week Started! Week #{week_number}");
    let width = UnicodeWidthStr::width(text.as_str()) + 4;
    println!();
    println!("{}", format!("╭{}╮", "─".repeat(width)).blue());
    println!("{}{}{}", "│".blue(), pad_center(&text, width).bold(), "│".blue());
    println!("{}", format!("╰{}╯", "─".repeat(width)).blue());
}
