//! Subcommand handlers.

use anyhow::{bail, Context, Result};
use serde::Serialize;

use varview_core::variants::{category_counts, detail_fields, distribution};
use varview_core::{
    assess_codes, classify_detailed, Assessment, Classification, DashboardConfig,
    EvidenceCatalog, SelectionSession, VariantTable,
};

use crate::cli::{CatalogArgs, ClassifyArgs, SessionArgs, VariantsArgs, VariantsCommand};

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn format_classification(classification: &Classification) -> String {
    let t = &classification.tally;
    format!(
        "{} (rule: {})\n  counts: PVS={} PS={} PM={} PP={} BA={} BS={} BP={}",
        classification.label,
        classification.rule_id,
        t.pvs,
        t.ps,
        t.pm,
        t.pp,
        t.ba,
        t.bs,
        t.bp
    )
}

fn print_assessment(assessment: &Assessment) {
    println!("{}", format_classification(&assessment.classification));

    let selected: Vec<_> = assessment.selected.iter().map(|c| c.as_str()).collect();
    println!("  evidence: {}", selected.join(", "));

    if let Some(focus) = &assessment.focus {
        println!("  {}: {}", focus.code, focus.description);
    }
}

pub fn classify(config: &DashboardConfig, args: &ClassifyArgs) -> Result<()> {
    if args.allow_unknown {
        let classification = classify_detailed(&args.codes);
        if classification.tally.unknown > 0 {
            tracing::warn!(
                unknown = classification.tally.unknown,
                "Unrecognised codes were ignored"
            );
        }

        if args.json {
            return print_json(&classification, true);
        }
        println!("{}", format_classification(&classification));
        return Ok(());
    }

    let catalog = config.load_catalog()?;
    let assessment =
        assess_codes(&catalog, &args.codes).context("Evidence codes must come from the catalog")?;

    if args.json {
        return print_json(&assessment, true);
    }
    print_assessment(&assessment);
    Ok(())
}

pub fn catalog(config: &DashboardConfig, args: &CatalogArgs) -> Result<()> {
    let catalog = config.load_catalog()?;

    if let Some(code) = &args.code {
        let description = catalog.describe(code.trim())?;
        if args.json {
            return print_json(&serde_json::json!({ "code": code.trim(), "description": description }), true);
        }
        println!("{}: {}", code.trim(), description);
        return Ok(());
    }

    if args.json {
        return print_json(&catalog.entries(), true);
    }

    print_grid(&catalog);
    Ok(())
}

fn print_grid(catalog: &EvidenceCatalog) {
    for row in catalog.rows() {
        println!("{}", row.evidence_type);
        for (column, codes) in catalog.columns().iter().zip(&row.cells) {
            if codes.is_empty() {
                continue;
            }
            let codes: Vec<_> = codes.iter().map(|c| c.as_str()).collect();
            println!(
                "  {:?} {}: {}",
                column.direction,
                column.strength,
                codes.join(", ")
            );
        }
    }
}

/// Split "+PM2" / "-PM2" into the code and whether it is checked.
fn parse_event(event: &str) -> Result<(bool, &str)> {
    let event = event.trim();
    match event.chars().next() {
        Some('+') => Ok((true, &event[1..])),
        Some('-') => Ok((false, &event[1..])),
        _ => bail!("Event {:?} must start with '+' (check) or '-' (uncheck)", event),
    }
}

pub fn session(config: &DashboardConfig, args: &SessionArgs) -> Result<()> {
    let catalog = config.load_catalog()?;
    let mut session = SelectionSession::new();

    for event in &args.events {
        let (checked, raw) = parse_event(event)?;
        let code = catalog
            .resolve(raw)
            .with_context(|| format!("Invalid event {:?}", event))?;

        session = session.toggle(code, checked);
        let assessment = session.assess(&catalog)?;

        if args.json {
            print_json(&assessment, false)?;
        } else {
            println!("[{}]", event);
            print_assessment(&assessment);
        }
    }

    Ok(())
}

pub fn variants(config: &DashboardConfig, args: &VariantsArgs) -> Result<()> {
    let path = args
        .table
        .clone()
        .unwrap_or_else(|| config.data.variant_table.clone());
    let table = VariantTable::from_path(&path, &config.columns.sort_by)
        .with_context(|| format!("Failed to load variant table {}", path.display()))?;

    match &args.command {
        VariantsCommand::Summary { json } => summary(config, &table, *json),
        VariantsCommand::List { limit } => list(config, &table, *limit),
        VariantsCommand::Show { id, json } => show(config, &table, *id, *json),
    }
}

fn summary(config: &DashboardConfig, table: &VariantTable, json: bool) -> Result<()> {
    let mut categories = Vec::new();
    for column in &config.columns.summary {
        categories.push((column.clone(), category_counts(table, column)?));
    }

    let mut distributions = Vec::new();
    for column in &config.columns.distribution {
        distributions.push(distribution(table, column)?);
    }

    if json {
        return print_json(
            &serde_json::json!({
                "variants": table.len(),
                "categories": categories,
                "distributions": distributions,
            }),
            true,
        );
    }

    println!("{} variants", table.len());
    for (column, counts) in &categories {
        println!("{}", column);
        for count in counts {
            println!("  {}\t{}", count.value, count.count);
        }
    }
    for dist in &distributions {
        match (dist.min, dist.median, dist.mean, dist.max) {
            (Some(min), Some(median), Some(mean), Some(max)) => println!(
                "{}: n={} missing={} min={:.3} median={:.3} mean={:.3} max={:.3}",
                dist.column, dist.count, dist.missing, min, median, mean, max
            ),
            _ => println!("{}: no values ({} missing)", dist.column, dist.missing),
        }
    }
    Ok(())
}

fn list(config: &DashboardConfig, table: &VariantTable, limit: usize) -> Result<()> {
    let mut columns = vec!["ID".to_string()];
    columns.extend(config.columns.main.iter().cloned());

    let rows = table.select(&columns)?;
    println!("{}", columns.join("\t"));
    for row in rows.iter().take(limit) {
        println!("{}", row.join("\t"));
    }

    if rows.len() > limit {
        tracing::info!(shown = limit, total = rows.len(), "Output truncated");
    }
    Ok(())
}

fn show(config: &DashboardConfig, table: &VariantTable, id: usize, json: bool) -> Result<()> {
    let record = table.get(id)?;
    let fields = detail_fields(record, &config.columns.detail, &config.links.gnomad_dataset)?;

    if json {
        return print_json(&fields, true);
    }

    for field in &fields {
        match &field.link {
            Some(link) => println!("{}\t{}\t{}", field.name, field.value, link),
            None => println!("{}\t{}", field.name, field.value),
        }
    }
    Ok(())
}
