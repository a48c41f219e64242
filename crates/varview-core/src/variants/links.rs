//! Links from a variant to external databases.

use serde::{Deserialize, Serialize};

use super::table::{is_missing, VariantRecord, VariantTableError};

const DBSNP_URL: &str = "https://www.ncbi.nlm.nih.gov/snp";
const GNOMAD_REGION_URL: &str = "https://gnomad.broadinstitute.org/region";

pub const DBSNP_COLUMN: &str = "dbSNP";
pub const GNOMAD_COLUMN: &str = "gnomAD";
pub const POP_FREQ_COLUMN: &str = "pop_freq";

/// dbSNP page of an rsID. None when the variant has no rsID.
pub fn dbsnp_url(rsid: &str) -> Option<String> {
    if is_missing(rsid) {
        return None;
    }
    Some(format!("{}/{}", DBSNP_URL, rsid.trim()))
}

/// gnomAD browser page of a genomic region.
pub fn gnomad_region_url(chrom: &str, start: &str, end: &str, dataset: &str) -> String {
    format!(
        "{}/{}-{}-{}?dataset={}",
        GNOMAD_REGION_URL, chrom, start, end, dataset
    )
}

/// HTML anchor opening in a new tab.
pub fn anchor(href: &str, text: &str) -> String {
    format!(r#"<a target="_blank" href="{}">{}</a>"#, href, text)
}

/// One line of the selected-variant detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailField {
    pub name: String,
    pub value: String,
    pub link: Option<String>,
}

impl DetailField {
    /// The value, wrapped in an anchor when it has a link.
    pub fn to_html(&self) -> String {
        match &self.link {
            Some(href) => anchor(href, &self.value),
            None => self.value.clone(),
        }
    }
}

/// Build the detail view of a variant.
///
/// The record's gnomAD column holds the population frequency; it is shown
/// as `pop_freq`, and `gnomAD` becomes a link to the variant's region.
/// `dbSNP` links to the rsID page.
pub fn detail_fields(
    record: &VariantRecord,
    columns: &[String],
    gnomad_dataset: &str,
) -> Result<Vec<DetailField>, VariantTableError> {
    columns
        .iter()
        .map(|column| match column.as_str() {
            DBSNP_COLUMN => {
                let rsid = record.require(DBSNP_COLUMN)?;
                Ok(DetailField {
                    name: column.clone(),
                    value: rsid.to_string(),
                    link: dbsnp_url(rsid),
                })
            }
            POP_FREQ_COLUMN => Ok(DetailField {
                name: column.clone(),
                value: record.require(GNOMAD_COLUMN)?.to_string(),
                link: None,
            }),
            GNOMAD_COLUMN => {
                let chrom = record.require("Chr")?;
                let start = record.require("Start")?;
                let end = record.require("End")?;
                Ok(DetailField {
                    name: column.clone(),
                    value: format!("{}-{}", chrom, start),
                    link: Some(gnomad_region_url(chrom, start, end, gnomad_dataset)),
                })
            }
            other => Ok(DetailField {
                name: column.clone(),
                value: record.require(other)?.to_string(),
                link: None,
            }),
        })
        .collect()
}
