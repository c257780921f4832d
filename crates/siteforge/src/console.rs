//! Colorful console output for search progress.
//!
//! Provides a custom `tracing` layer that renders the solver's structured
//! events with colors. Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Prints the
/// banner and installs a global subscriber. `RUST_LOG` directives are
/// honored, with `siteforge_solver=info` added on top.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "siteforge_solver=info".parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____  _ _       _____
/ ___|(_) |_ ___|  ___|__  _ __ __ _  ___
\___ \| | __/ _ \ |_ / _ \| '__/ _` |/ _ \
 ___) | | ||  __/  _| (_) | | | (_| |  __/
|____/|_|\__\___|_|  \___/|_|  \__, |\___|
                               |___/
"#;

    let version_line = format!(
        "          v{} - Exhaustive Site Selection\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("siteforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_search_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    site_count: Option<u64>,
    selection_size: Option<u64>,
    candidate_count: Option<u64>,
    feasible_count: Option<String>,
    thread_count: Option<u64>,
    chunk_size: Option<u64>,
    cost: Option<u64>,
    best_cost: Option<u64>,
    assignment: Option<String>,
    duration_ms: Option<u64>,
    candidates: Option<u64>,
    evaluations: Option<u64>,
    improvements: Option<u64>,
    error: Option<String>,
    chunk: Option<u64>,
    candidates_done: Option<u64>,
    elapsed_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "feasible_count" => self.feasible_count = Some(s),
            "assignment" => self.assignment = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "site_count" => self.site_count = Some(value),
            "selection_size" => self.selection_size = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "thread_count" => self.thread_count = Some(value),
            "chunk_size" => self.chunk_size = Some(value),
            "cost" => self.cost = Some(value),
            "best_cost" => self.best_cost = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "candidates" => self.candidates = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "improvements" => self.improvements = Some(value),
            "chunk" => self.chunk = Some(value),
            "candidates_done" => self.candidates_done = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "feasible_count" => self.feasible_count = Some(value.to_string()),
            "assignment" => self.assignment = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_search_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "search_start" => format_search_start(v),
        "new_best" => format_new_best(v),
        "search_end" => format_search_end(v),
        "search_aborted" => format_search_aborted(v),
        "chunk_start" => format_chunk_start(v),
        "chunk_end" => format_chunk_end(v),
        _ => String::new(),
    }
}

fn format_search_start(v: &EventVisitor) -> String {
    let site_count = v.site_count.unwrap_or(0);
    let selection_size = v.selection_size.unwrap_or(0);
    let candidate_count = v.candidate_count.unwrap_or(0);
    let feasible_count = v.feasible_count.as_deref().unwrap_or("?");

    format!(
        "{} {} {} sites ({}), stations ({}), candidates ({}), feasible ({}), threads ({}), chunk size ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Search]".bright_cyan(),
        site_count.to_formatted_string(&Locale::en).bright_yellow(),
        selection_size.to_formatted_string(&Locale::en).bright_yellow(),
        candidate_count.to_formatted_string(&Locale::en).bright_yellow(),
        feasible_count.bright_magenta(),
        v.thread_count.unwrap_or(1).to_string().white(),
        v.chunk_size.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let cost = v.cost.unwrap_or(0);
    let assignment = v.assignment.as_deref().unwrap_or("");

    format!(
        "    {} cost {:>9} | [{}]",
        "->".bright_blue(),
        cost.to_formatted_string(&Locale::en).bright_green(),
        assignment.white()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let best_cost = v.best_cost.unwrap_or(0);
    let duration_ms = v.duration_ms.unwrap_or(0);
    let candidates = v.candidates.unwrap_or(0);
    let evaluations = v.evaluations.unwrap_or(0);
    let improvements = v.improvements.unwrap_or(0);
    let assignment = v.assignment.as_deref().unwrap_or("");

    let mut output = format!(
        "{} {} {} Search ended: time spent ({}), candidates ({}), evaluations ({}), improvements ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Search]".bright_cyan(),
        format_duration_ms(duration_ms).yellow(),
        candidates.to_formatted_string(&Locale::en).white(),
        evaluations.to_formatted_string(&Locale::en).bright_magenta().bold(),
        improvements.to_formatted_string(&Locale::en).white()
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    let status_text = "OPTIMAL SELECTION FOUND";
    let status_padding = 58 - status_text.len();
    let left_pad = status_padding / 2;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_text.bright_green().bold(),
        " ".repeat(status_padding - left_pad),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best Cost:",
        best_cost.to_formatted_string(&Locale::en),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Selected:",
        selected_sites(assignment),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_search_aborted(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Search aborted: {}",
        timestamp().bright_black(),
        "WARN".bright_red(),
        "[Search]".bright_cyan(),
        v.error.as_deref().unwrap_or("unknown error").bright_red()
    )
}

fn format_chunk_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} chunk {}",
        timestamp().bright_black(),
        "TRACE".bright_black(),
        "[Search]".bright_cyan(),
        v.chunk.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_chunk_end(v: &EventVisitor) -> String {
    let done = v.candidates_done.unwrap_or(0);
    let total = v.candidate_count.unwrap_or(0).max(1);
    let percent = done as f64 * 100.0 / total as f64;

    format!(
        "{} {} {} chunk {} done: {} of {} candidates ({:.1}%) after {}",
        timestamp().bright_black(),
        "TRACE".bright_black(),
        "[Search]".bright_cyan(),
        v.chunk.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        done.to_formatted_string(&Locale::en).bright_yellow(),
        total.to_formatted_string(&Locale::en).white(),
        percent,
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow()
    )
}

/// Turns a rendered assignment like `0, 1, 1` into `1, 2`.
fn selected_sites(assignment: &str) -> String {
    let sites: Vec<String> = assignment
        .split(", ")
        .enumerate()
        .filter(|(_, bit)| *bit == "1")
        .map(|(i, _)| i.to_string())
        .collect();
    if sites.is_empty() {
        "none".to_string()
    } else {
        sites.join(", ")
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
