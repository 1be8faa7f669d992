use colored::Colorize;
use platebook::api::{CmdMessage, MessageLevel};
use platebook::config::PlatebookConfig;
use platebook::model::PlateRecord;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NOTE_WIDTH: usize = 40;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[PlateRecord]) {
    print!("{}", render_records(records));
}

pub(super) fn print_config(config: &PlatebookConfig) {
    for key in PlatebookConfig::KEYS {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}

/// Renders records as an aligned table, without colors.
pub(super) fn render_records(records: &[PlateRecord]) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                format!("#{}", r.id),
                r.plate().to_string(),
                format_phone(&r.phone_number),
                truncate_to_width(&r.note, NOTE_WIDTH),
            ]
        })
        .collect();

    let header = ["ID", "PLATE", "PHONE", "NOTE"];
    let mut widths = header.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let n = records.len();
    out.push_str(&format!("{} record{}\n", n, if n == 1 { "" } else { "s" }));
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        line.push_str(cell);
        if i + 1 < cells.len() {
            line.push_str(&" ".repeat(width.saturating_sub(cell.width()) + 2));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Adds separators to a stored phone number by length:
/// `0912345678` → `0912-345-678`, `123456789` → `12-345-6789`,
/// `1234567` → `123-4567`. Other lengths are shown as stored.
pub(super) fn format_phone(phone: &str) -> String {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return phone.to_string();
    }
    match phone.len() {
        10 => format!("{}-{}-{}", &phone[..4], &phone[4..7], &phone[7..]),
        9 => format!("{}-{}-{}", &phone[..2], &phone[2..5], &phone[5..]),
        7 => format!("{}-{}", &phone[..3], &phone[3..]),
        _ => phone.to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
