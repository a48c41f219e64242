//! Loading a dashboard configuration and its data files from disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use varview_core::config::ConfigError;
use varview_core::variants::{category_counts, detail_fields, distribution};
use varview_core::{DashboardConfig, VariantTable};

const VARIANTS: &str = "Gene\tProtein Change\tHGVSg\tHGVSc\tExon\tChr\tStart\tEnd\tVAF\tVariant Depth\tRef Depth\toncokb_level\tClinVar_ClinSig\tcancer_hotspot\tSIFT\tPolyPhen2\tVariant Type\tMutation Type\tgnomAD\tdbSNP
TP53\tp.R175H\t17:g.7578406C>T\tc.524G>A\t5\t17\t7578406\t7578406\t0.41\t41\t59\t1\tPathogenic\tTrue\t0\t1\tSNP\tMissense\t0.00001\trs28934578
PIK3CA\tp.H1047R\t3:g.178952085A>G\tc.3140A>G\t21\t3\t178952085\t178952085\t0.22\t22\t78\t1\tPathogenic\tTrue\t0.01\t0.9\tSNP\tMissense\t\trs121913279
APC\tp.T1556fs\t5:g.112175951del\tc.4666del\t16\t5\t112175951\t112175951\t0.35\t35\t65\t\tPathogenic\tFalse\t\t\tDEL\tFrameshift\t\t.
";

const GRID: &str = "Evidence\tVery Strong\tStrong\tModerate\tSupporting\tSupporting\tStrong
Population data\t\t\tPM2\t\t\tBA1
Computational\tPVS1\t\t\tPP3\tBP4\t
";

const DETAILS: &str = "PVS1\tNull variant
PM2\tAbsent from controls
PP3\tDeleterious in silico
BA1\tCommon
BP4\tBenign in silico
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    write(dir.path(), "data/variants.tsv", VARIANTS);
    write(dir.path(), "data/grid.tsv", GRID);
    write(dir.path(), "data/details.tsv", DETAILS);
    write(
        dir.path(),
        "dashboard.yaml",
        r#"
config_version: "1.0"
name: "Integration"
data:
  variant_table: "data/variants.tsv"
  evidence_table: "data/grid.tsv"
  evidence_details: "data/details.tsv"
"#,
    );
    dir
}

#[test]
fn config_paths_resolve_against_config_dir() {
    let dir = setup();
    let config = DashboardConfig::from_file(dir.path().join("dashboard.yaml")).unwrap();

    assert_eq!(config.data.variant_table, dir.path().join("data/variants.tsv"));

    let catalog = config.load_catalog().unwrap();
    assert_eq!(catalog.codes().len(), 5);
    assert!(!catalog.contains("PS1"));
}

#[test]
fn variant_table_views() {
    let dir = setup();
    let config = DashboardConfig::from_file(dir.path().join("dashboard.yaml")).unwrap();
    let table = VariantTable::from_path(&config.data.variant_table, &config.columns.sort_by).unwrap();

    // oncokb 1 first, then by cancer_hotspot ("True" == "True"), then SIFT
    let genes = table.column("Gene").unwrap();
    assert_eq!(genes, vec!["TP53", "PIK3CA", "APC"]);

    let main = table.select(&config.columns.main).unwrap();
    assert_eq!(main[0][4], "41/100");

    let types = category_counts(&table, "Variant Type").unwrap();
    assert_eq!(types[0].value, "SNP");
    assert_eq!(types[0].count, 2);

    let vaf = distribution(&table, "VAF").unwrap();
    assert_eq!(vaf.count, 3);
    assert_eq!(vaf.max, Some(0.41));

    let record = table.get(0).unwrap();
    let details = detail_fields(record, &config.columns.detail, &config.links.gnomad_dataset).unwrap();
    let names: Vec<_> = details.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, config.columns.detail.iter().map(String::as_str).collect::<Vec<_>>());

    let apc = table.get(2).unwrap();
    let details = detail_fields(apc, &config.columns.detail, "gnomad_r3").unwrap();
    let dbsnp = details.iter().find(|f| f.name == "dbSNP").unwrap();
    assert!(dbsnp.link.is_none());
}

#[test]
fn broken_config_is_reported() {
    let dir = setup();
    write(
        dir.path(),
        "broken.json",
        r#"{"config_version": "one", "name": "x", "data": {"variant_table": "v.tsv"}}"#,
    );

    let result = DashboardConfig::from_file(dir.path().join("broken.json"));
    assert!(matches!(result, Err(ConfigError::SchemaError(_))));

    let missing = DashboardConfig::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(missing, Err(ConfigError::IoError(_))));
}
