use std::fmt::Write as _;
use std::time::{Duration, Instant};

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::dice::dice_needed;
use crate::flakes::FlakeReport;

/// Bits per word below which a list is reported as weak.
pub const MIN_SAFE_ENTROPY_PER_WORD: f64 = 12.0;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

impl DisplayOptions {
    pub fn detect(quiet: bool) -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
            quiet,
        }
    }
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn status_style(ok: bool, color_support: bool) -> Style {
    match (color_support, ok) {
        (false, _) => Style::new(),
        (true, true) => Style::new().green(),
        (true, false) => Style::new().yellow(),
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

struct Tree<'a> {
    out: &'a mut String,
    options: &'a DisplayOptions,
}

impl Tree<'_> {
    fn row(&mut self, last: bool, label: &str, ok: bool, text: &str) {
        let (check_ok, check_warn) = get_status_symbols(self.options.unicode_support);
        let style = status_style(ok, self.options.color_support);
        let branch = if last { "└─" } else { "├─" };
        writeln!(
            self.out,
            "  {} {:<11}{} {}",
            branch,
            label,
            style.apply_to(format!("[{}]", if ok { check_ok } else { check_warn })),
            style.apply_to(text)
        )
        .ok();
    }

    fn plain(&mut self, last: bool, label: &str, text: &str) {
        let branch = if last { "└─" } else { "├─" };
        writeln!(self.out, "  {} {:<11}{}", branch, label, text).ok();
    }

    fn children<I: IntoIterator<Item = String>>(&mut self, parent_last: bool, items: I) {
        let items: Vec<String> = items.into_iter().collect();
        let stem = if parent_last { " " } else { "│" };
        for (i, item) in items.iter().enumerate() {
            let branch = if i == items.len() - 1 { "└─" } else { "├─" };
            writeln!(self.out, "  {}  {} {}", stem, branch, item).ok();
        }
    }
}

/// One line per flaw, nothing else.
pub fn render_flaws(report: &FlakeReport) -> String {
    let mut out = String::new();
    for term in &report.duplicates {
        writeln!(out, "duplicate: {}", term).ok();
    }
    for (prefix, term) in &report.prefixes {
        writeln!(out, "prefix: {} -> {}", prefix, term).ok();
    }
    for group in &report.case_duplicates {
        writeln!(out, "case: {}", group.join(", ")).ok();
    }
    for term in &report.ambiguous {
        writeln!(out, "ambiguous: {}", term).ok();
    }
    if !report.uniquely_decodable {
        writeln!(out, "not uniquely decodable").ok();
    }
    out
}

pub fn render_report(report: &FlakeReport, options: &DisplayOptions) -> String {
    if options.quiet {
        return render_flaws(report);
    }

    let mut out = String::new();
    let mut tree = Tree {
        out: &mut out,
        options,
    };

    writeln!(tree.out, "Flakes:").ok();

    let n = report.duplicates.len();
    tree.row(
        false,
        "Duplicates",
        n == 0,
        &format!("{} {}", n, plural(n, "term", "terms")),
    );
    tree.children(false, report.duplicates.iter().cloned());

    let n = report.prefixes.len();
    tree.row(
        false,
        "Prefixes",
        n == 0,
        &format!("{} {}", n, plural(n, "pair", "pairs")),
    );
    tree.children(
        false,
        report
            .prefixes
            .iter()
            .map(|(prefix, term)| format!("{} -> {}", prefix, term)),
    );

    let n = report.case_duplicates.len();
    tree.row(
        false,
        "Case",
        n == 0,
        &format!("{} {}", n, plural(n, "group", "groups")),
    );
    tree.children(false, report.case_duplicates.iter().map(|g| g.join(", ")));

    let n = report.ambiguous.len();
    tree.row(
        false,
        "Ambiguous",
        n == 0,
        &format!("{} {}", n, plural(n, "term", "terms")),
    );
    tree.children(false, report.ambiguous.iter().cloned());

    tree.row(
        true,
        "Decodable",
        report.uniquely_decodable,
        if report.uniquely_decodable { "yes" } else { "no" },
    );

    writeln!(tree.out).ok();
    writeln!(tree.out, "Stats:").ok();

    tree.plain(
        false,
        "Terms",
        &format!("{} ({} unique)", report.total, report.unique),
    );
    tree.plain(
        false,
        "Width",
        &format!("{}..{} chars", report.min_width, report.max_width),
    );
    tree.row(
        false,
        "Entropy",
        report.entropy_per_word >= MIN_SAFE_ENTROPY_PER_WORD,
        &format!("{:.1} bits per word", report.entropy_per_word),
    );
    let dice = dice_needed(report.unique, report.dice_sides);
    tree.row(
        true,
        "Dice",
        report.dice_aligned,
        &if report.dice_aligned {
            format!(
                "{} {}, {} sides",
                dice,
                plural(dice as usize, "die", "dice"),
                report.dice_sides
            )
        } else {
            format!("not a power of {}", report.dice_sides)
        },
    );

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let clean = !report.has_flakes();
    let style = status_style(clean, options.color_support);
    writeln!(
        tree.out,
        "\n{} {}",
        style.apply_to(format!("[{}]", if clean { check_ok } else { check_warn })),
        style.apply_to(if clean { "No flakes found" } else { "Flakes found" })
    )
    .ok();

    out
}

pub fn display_report(report: &FlakeReport, options: &DisplayOptions) {
    print!("{}", render_report(report, options));
}

/// Run `f` behind a spinner on stderr.
pub fn show_progress<F, T, E>(
    unicode_support: bool,
    message: &str,
    f: F,
) -> Result<(T, Duration), E>
where
    F: FnOnce() -> Result<T, E>,
{
    let term = Term::stderr();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}
