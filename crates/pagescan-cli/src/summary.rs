use std::path::Path;

use console::Style;
use pagescan_core::config::ScanConfig;
use pagescan_core::enhance::EnhancedPage;
use pagescan_core::sampling::SamplingPass;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    rejected: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            rejected: Style::new().red(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_scan_summary(config: &ScanConfig, input: &Path) {
    let s = Styles::new();
    let sampling = &config.sampling;

    print_title(&s, "Page Scan");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Sampling"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Density"),
        s.value.apply_to(format!("{:.2}", sampling.density))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Interval"),
        s.value.apply_to(format!("{:.0} ms", sampling.interval_ms()))
    );
    let range = match (sampling.start_ms, sampling.end_ms) {
        (None, None) => None,
        (start, end) => Some(format!(
            "{} - {}",
            start.unwrap_or(0),
            end.map_or_else(|| "end".to_string(), |e| e.to_string())
        )),
    };
    match range {
        Some(range) => println!(
            "    {:<12}{}",
            s.label.apply_to("Range"),
            s.value.apply_to(format!("{range} ms"))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Range"),
            s.disabled.apply_to("whole video")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Scoring"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Metric"),
        s.method.apply_to(config.metrics.sharpness_metric)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min sharp"),
        s.value.apply_to(config.scoring.sharpness_threshold)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Luminance"),
        s.value.apply_to(format!(
            "{} - {}",
            config.scoring.dark_threshold, config.scoring.bright_threshold
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Enhancement"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Filter"),
        s.method.apply_to(config.enhancement.default_filter)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Quality"),
        s.method.apply_to(config.enhancement.quality_tier)
    );
    println!();
}

/// Ranked candidate table followed by the rejection breakdown.
pub fn print_pass(pass: &SamplingPass) {
    let s = Styles::new();
    let report = pass.report();

    println!("  {}", s.header.apply_to("Candidates"));
    let mut ranked: Vec<_> = pass.candidates().iter().collect();
    ranked.sort_by(|a, b| b.quality_score.total_cmp(&a.quality_score));

    println!(
        "    {:<6}{:>10}  {:>7}  {:>9}  {:>7}  {}",
        s.label.apply_to("Rank"),
        s.label.apply_to("Time"),
        s.label.apply_to("Score"),
        s.label.apply_to("Sharpness"),
        s.label.apply_to("Luma"),
        s.label.apply_to("Verdict"),
    );
    for (rank, candidate) in ranked.iter().enumerate() {
        let verdict = match candidate.rejection_reason {
            Some(reason) => s.rejected.apply_to(reason.to_string()),
            None => s.method.apply_to("selected".to_string()),
        };
        println!(
            "    {:<6}{:>10}  {:>7.3}  {:>9.1}  {:>7.1}  {}",
            rank + 1,
            format!("{} ms", candidate.timestamp_ms),
            candidate.quality_score,
            candidate.metrics.sharpness,
            candidate.metrics.mean_luminance,
            verdict
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Selected"),
        s.value.apply_to(format!(
            "{} of {}",
            pass.selected_count(),
            pass.candidates().len()
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scheduled"),
        s.value.apply_to(report.scheduled)
    );
    if report.failed_reads > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed reads"),
            s.rejected.apply_to(report.failed_reads)
        );
    }
    if report.stale_frames > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Stale frames"),
            s.disabled.apply_to(report.stale_frames)
        );
    }

    let histogram = pass.histogram();
    if histogram.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Rejected"),
            s.disabled.apply_to("none")
        );
    } else {
        println!("  {}", s.header.apply_to("Rejected"));
        for (reason, count) in histogram.iter() {
            println!(
                "    {:<12}{}",
                s.label.apply_to(reason),
                s.value.apply_to(count)
            );
        }
    }

    if pass.is_exhausted() {
        if let Some(reason) = histogram.dominant() {
            println!();
            println!(
                "  {} {}",
                s.disabled.apply_to("No usable pages:"),
                s.disabled.apply_to(reason.hint())
            );
        }
    }
    println!();
}

pub fn print_written_pages(pages: &[(EnhancedPage, std::path::PathBuf)]) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Pages"));
    if pages.is_empty() {
        println!("    {}", s.disabled.apply_to("nothing written"));
    }
    for (i, (page, path)) in pages.iter().enumerate() {
        println!(
            "    {}. {}  {}",
            s.label.apply_to(i + 1),
            s.path.apply_to(path.display()),
            s.value.apply_to(format!(
                "{}x{} from {} ms",
                page.width(),
                page.height(),
                page.source_timestamp_ms
            ))
        );
    }
    println!();
}
