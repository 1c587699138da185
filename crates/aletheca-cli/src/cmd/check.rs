//! Check subcommand - decode local payload files and report failures

use std::collections::BTreeMap;
use std::io::BufRead;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result, bail};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use rayon::prelude::*;
use serde_json::Value;

use aletheca_core::{InputFile, InputFormat, SharedProgress, expand_inputs, fmt_num};
use aletheca_openalex::{BatchReport, EntityKind, ItemReport, decode_page, infer_kind};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input files or glob patterns (.json, .jsonl, .gz)
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Entity kind of every item (default: inferred from each `id`)
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<EntityKind>,

    /// Treat every `.json` input as a paginated list response
    #[arg(long)]
    pub page: bool,

    /// List non-fatal issues as well as failures
    #[arg(long)]
    pub show_issues: bool,

    /// Maximum number of items to check per file
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,
}

fn parse_kind(s: &str) -> Result<EntityKind, String> {
    EntityKind::from_name(s).ok_or_else(|| format!("unknown entity kind {s:?}"))
}

const NO_KIND: &str = "cannot infer entity kind from `id`";

/// A record pulled from an input file, before decoding
struct RawItem {
    label: String,
    value: Result<Value, String>,
}

/// What a file holds once parsed
enum Contents {
    Items(Vec<RawItem>),
    Page(Value),
}

fn is_page(value: &Value) -> bool {
    value.get("meta").is_some() && value.get("results").is_some()
}

fn load(file: &InputFile, args: &CheckArgs, progress: &SharedProgress) -> Result<Contents> {
    let limit = args.limit.unwrap_or(usize::MAX);
    match file.format {
        InputFormat::JsonLines => read_lines(file, limit, progress).map(Contents::Items),
        InputFormat::Json => {
            let text = file.read_to_string()?;
            let value: Value = match sonic_rs::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    return Ok(Contents::Items(vec![RawItem {
                        label: "-".to_string(),
                        value: Err(format!("invalid JSON: {e}")),
                    }]));
                }
            };
            if args.page || is_page(&value) {
                return Ok(Contents::Page(value));
            }
            let items = match value {
                Value::Array(values) => values
                    .into_iter()
                    .take(limit)
                    .enumerate()
                    .map(|(i, value)| RawItem {
                        label: format!("[{i}]"),
                        value: Ok(value),
                    })
                    .collect(),
                other => vec![RawItem {
                    label: "-".to_string(),
                    value: Ok(other),
                }],
            };
            Ok(Contents::Items(items))
        }
    }
}

/// One entity per line; blank lines are skipped.
fn read_lines(file: &InputFile, limit: usize, progress: &SharedProgress) -> Result<Vec<RawItem>> {
    let name = file.display_name();
    let (reader, counter) = file.open()?;
    let pb = progress.file_bar(&name, file.size());

    let mut items = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        if items.len() >= limit {
            break;
        }
        let line = line.with_context(|| format!("Failed to read {name}"))?;
        pb.set_position(counter.load(Ordering::Relaxed));
        if line.trim().is_empty() {
            continue;
        }
        let value = sonic_rs::from_str::<Value>(&line).map_err(|e| format!("invalid JSON: {e}"));
        items.push(RawItem {
            label: format!("line {}", n + 1),
            value,
        });
    }
    pb.finish_and_clear();
    log::debug!("{name}: {} lines read", items.len());
    Ok(items)
}

/// Decode outcomes of one file, in input order
struct FileCheck {
    name: String,
    /// Parallel to `report.items()`
    labels: Vec<String>,
    kinds: Vec<EntityKind>,
    report: BatchReport,
    /// Items that never reached the decoder, as (label, reason)
    unreadable: Vec<(String, String)>,
}

impl FileCheck {
    fn empty(name: String) -> Self {
        Self {
            name,
            labels: Vec::new(),
            kinds: Vec::new(),
            report: BatchReport::default(),
            unreadable: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.report.len() + self.unreadable.len()
    }
}

fn decode_pending((index, (kind, value)): (usize, &(EntityKind, Value))) -> ItemReport {
    ItemReport::decode(index, *kind, value)
}

fn check_items(
    name: String,
    items: Vec<RawItem>,
    forced: Option<EntityKind>,
    parallel: bool,
) -> FileCheck {
    let mut check = FileCheck::empty(name);
    let mut pending = Vec::with_capacity(items.len());
    for item in items {
        let value = match item.value {
            Ok(value) => value,
            Err(reason) => {
                check.unreadable.push((item.label, reason));
                continue;
            }
        };
        match forced.or_else(|| infer_kind(&value)) {
            Some(kind) => {
                check.labels.push(item.label);
                check.kinds.push(kind);
                pending.push((kind, value));
            }
            None => check.unreadable.push((item.label, NO_KIND.to_string())),
        }
    }

    let reports: Vec<ItemReport> = if parallel {
        pending.par_iter().enumerate().map(decode_pending).collect()
    } else {
        pending.iter().enumerate().map(decode_pending).collect()
    };
    check.report = BatchReport::new(reports);
    check
}

fn check_page(
    name: String,
    mut value: Value,
    forced: Option<EntityKind>,
    limit: Option<usize>,
) -> FileCheck {
    if let (Some(limit), Some(Value::Array(results))) = (limit, value.get_mut("results")) {
        results.truncate(limit);
    }
    let results = value.get("results").and_then(Value::as_array);
    let inferred = results.and_then(|r| r.iter().find_map(infer_kind));

    let mut check = FileCheck::empty(name);
    let Some(kind) = forced.or(inferred) else {
        if results.is_some_and(|r| !r.is_empty()) {
            check.unreadable.push(("results".to_string(), NO_KIND.to_string()));
        } else {
            log::debug!("{}: empty page, nothing to check", check.name);
        }
        return check;
    };

    match decode_page(kind, &value) {
        Ok(page) => {
            log::debug!(
                "{}: page {} of {} ({} {} total)",
                check.name,
                page.meta.page,
                page.meta.page_count(),
                fmt_num(page.meta.count.max(0) as usize),
                kind.collection()
            );
            check.labels = (0..page.results.len())
                .map(|i| format!("results[{i}]"))
                .collect();
            check.kinds = vec![kind; page.results.len()];
            check.report = page.results;
        }
        Err(err) => check.unreadable.push(("-".to_string(), err.to_string())),
    }
    check
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    decoded: usize,
    failed: usize,
    issues: usize,
}

/// One listed failure or issue
struct Row {
    file: String,
    item: String,
    message: String,
}

/// Running totals across all files
struct Summary {
    kinds: BTreeMap<EntityKind, Tally>,
    labels: BTreeMap<&'static str, usize>,
    unreadable: usize,
    failures: Vec<Row>,
    issues: Vec<Row>,
    max_rows: usize,
    keep_issues: bool,
}

impl Summary {
    fn new(max_rows: usize, keep_issues: bool) -> Self {
        Self {
            kinds: BTreeMap::new(),
            labels: BTreeMap::new(),
            unreadable: 0,
            failures: Vec::new(),
            issues: Vec::new(),
            max_rows,
            keep_issues,
        }
    }

    fn add(&mut self, check: FileCheck) {
        check.report.log(&check.name);
        for (label, count) in check.report.counts_by_label() {
            *self.labels.entry(label).or_insert(0) += count;
        }

        let items = check
            .labels
            .iter()
            .zip(&check.kinds)
            .zip(check.report.items());
        for ((item, kind), report) in items {
            let tally = self.kinds.entry(*kind).or_default();
            tally.issues += report.issues().len();
            if self.keep_issues {
                for issue in report.issues() {
                    if self.issues.len() < self.max_rows {
                        self.issues.push(Row {
                            file: check.name.clone(),
                            item: item.clone(),
                            message: issue.to_string(),
                        });
                    }
                }
            }
            match report.error() {
                None => tally.decoded += 1,
                Some(err) => {
                    tally.failed += 1;
                    if self.failures.len() < self.max_rows {
                        self.failures.push(Row {
                            file: check.name.clone(),
                            item: item.clone(),
                            message: err.to_string(),
                        });
                    }
                }
            }
        }

        for (item, message) in check.unreadable {
            self.unreadable += 1;
            if self.failures.len() < self.max_rows {
                self.failures.push(Row {
                    file: check.name.clone(),
                    item,
                    message,
                });
            }
        }
    }

    fn total(&self) -> usize {
        self.kinds
            .values()
            .map(|t| t.decoded + t.failed)
            .sum::<usize>()
            + self.unreadable
    }

    fn failed(&self) -> usize {
        self.kinds.values().map(|t| t.failed).sum::<usize>() + self.unreadable
    }

    fn issue_count(&self) -> usize {
        self.kinds.values().map(|t| t.issues).sum()
    }
}

fn styled_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

fn print_rows(title: &str, rows: &[Row], total: usize) {
    if rows.is_empty() {
        return;
    }
    let mut table = styled_table(&["File", "Item", title]);
    for row in rows {
        table.add_row(vec![&row.file, &row.item, &row.message]);
    }
    eprintln!("\n{table}");
    if total > rows.len() {
        eprintln!("... and {} more", fmt_num(total - rows.len()));
    }
}

fn print_summary(summary: &Summary, show_issues: bool) {
    let mut table = styled_table(&["Kind", "Decoded", "Failed", "Issues"]);
    for (kind, tally) in &summary.kinds {
        table.add_row(vec![
            kind.to_string(),
            fmt_num(tally.decoded),
            fmt_num(tally.failed),
            fmt_num(tally.issues),
        ]);
    }
    if summary.unreadable > 0 {
        table.add_row(vec![
            "unreadable".to_string(),
            "-".to_string(),
            fmt_num(summary.unreadable),
            "-".to_string(),
        ]);
    }
    eprintln!("\n{table}");

    if !summary.labels.is_empty() {
        let mut table = styled_table(&["Error", "Count"]);
        for (label, count) in &summary.labels {
            table.add_row(vec![label.to_string(), fmt_num(*count)]);
        }
        eprintln!("\n{table}");
    }

    print_rows("Failure", &summary.failures, summary.failed());
    if show_issues {
        print_rows("Issue", &summary.issues, summary.issue_count());
    }
}

pub fn run(args: CheckArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let files = expand_inputs(&args.inputs).context("Failed to resolve inputs")?;
    log::info!("Checking {} input files", files.len());

    let counter = progress.item_counter("check");
    let mut summary = Summary::new(config.check.max_failures_shown, args.show_issues);
    for file in &files {
        let name = file.display_name();
        let check = match load(file, &args, progress)? {
            Contents::Items(items) => check_items(name, items, args.kind, config.check.parallel),
            Contents::Page(value) => check_page(name, value, args.kind, args.limit),
        };
        counter.inc(check.len() as u64);
        summary.add(check);
    }
    counter.finish_and_clear();

    print_summary(&summary, args.show_issues);

    let failed = summary.failed();
    if failed > 0 {
        bail!(
            "{} of {} items failed to decode",
            fmt_num(failed),
            fmt_num(summary.total())
        );
    }
    log::info!("All {} items decoded", fmt_num(summary.total()));
    Ok(())
}
