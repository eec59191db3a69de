//! Terminal rendering of events and summaries.

use chrono::{DateTime, Local, Utc};
use reports::format_hours;
use storage::{EventRecord, EventSummary};

const DAMAGE_PREVIEW_CHARS: usize = 80;

pub fn local_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %d, %Y").to_string()
}

pub fn local_datetime(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn status(event: &EventRecord) -> &'static str {
    if event.resolved { "Resolved" } else { "Active" }
}

/// `"2h 30m (actual)"` once resolved, `"2h 30m (est.)"` before.
pub fn duration_text(event: &EventRecord) -> String {
    match (event.resolved, event.actual_duration) {
        (true, Some(actual)) => format!("{} (actual)", format_hours(actual)),
        _ => format!("{} (est.)", format_hours(event.estimated_duration)),
    }
}

/// First block of the id, enough to address an event from the command line.
pub fn short_id(event: &EventRecord) -> String {
    event.id.to_string().chars().take(8).collect()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head.trim_end())
    }
}

pub fn causes_text(event: &EventRecord) -> String {
    event
        .causes
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_table_header() {
    println!(
        "{:<8}  {:<12}  {:<8}  {:<18}  LOCATION",
        "ID", "DATE", "STATUS", "DURATION"
    );
    println!("{}", "-".repeat(80));
}

pub fn print_row(event: &EventRecord) {
    println!(
        "{:<8}  {:<12}  {:<8}  {:<18}  {}",
        short_id(event),
        local_date(event.date),
        status(event),
        duration_text(event),
        event.location
    );
}

pub fn print_rows<'a>(events: impl IntoIterator<Item = &'a EventRecord>) {
    print_table_header();
    for event in events {
        print_row(event);
    }
}

pub fn print_detail(event: &EventRecord) {
    println!("Event:      {}", event.id);
    println!("Reported:   {}", local_datetime(event.date));
    println!("Status:     {}", status(event));
    println!("Location:   {}", event.location);
    println!("Estimated:  {}", format_hours(event.estimated_duration));
    match event.actual_duration {
        Some(actual) if event.resolved => println!("Actual:     {}", format_hours(actual)),
        _ => println!("Actual:     not yet resolved"),
    }
    if event.causes.is_empty() {
        println!("Causes:     none recorded");
    } else {
        println!("Causes:     {}", causes_text(event));
    }
    if event.has_damages() {
        println!("Damages:    {}", event.damages);
    } else {
        println!("Damages:    none reported");
    }
}

pub fn print_damage_card(event: &EventRecord) {
    println!(
        "[{}] {} ({})",
        short_id(event),
        event.location,
        status(event)
    );
    println!("    {}", truncate(&event.damages, DAMAGE_PREVIEW_CHARS));
}

pub fn print_summary(summary: &EventSummary) {
    let active = summary.total_events - summary.resolved_events;
    println!("Total outages:      {}", summary.total_events);
    println!("Resolved:           {}", summary.resolved_events);
    println!("Active:             {active}");
    if summary.average_duration > 0.0 {
        println!("Average duration:   {}", format_hours(summary.average_duration));
    } else {
        println!("Average duration:   N/A");
    }
    if !summary.most_affected_location.is_empty() {
        println!("Most affected:      {}", summary.most_affected_location);
    }
    if let Some(latest) = summary.latest_event_date {
        println!("Latest outage:      {}", local_datetime(latest));
    }
}
