//! Summary statistics behind the dashboard charts.

use serde::{Deserialize, Serialize};

use super::table::{is_missing, VariantTable, VariantTableError};

/// How often one value occurs in a categorical column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Counts per distinct value, in order of first appearance.
///
/// Missing cells are not counted.
pub fn category_counts(
    table: &VariantTable,
    column: &str,
) -> Result<Vec<CategoryCount>, VariantTableError> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for value in table.column(column)? {
        if is_missing(value) {
            continue;
        }
        match counts.iter_mut().find(|c| c.value == value) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                value: value.to_string(),
                count: 1,
            }),
        }
    }

    Ok(counts)
}

/// Summary of a numeric column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Distribution {
    pub column: String,

    /// Non-missing values
    pub count: usize,

    /// Missing cells
    pub missing: usize,

    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,

    /// The values in table order
    pub values: Vec<f64>,
}

/// Summarise a numeric column. Non-numeric, non-missing cells are an error.
pub fn distribution(table: &VariantTable, column: &str) -> Result<Distribution, VariantTableError> {
    let mut values = Vec::new();
    let mut missing = 0;

    for (row, value) in table.column(column)?.into_iter().enumerate() {
        if is_missing(value) {
            missing += 1;
            continue;
        }
        let number = value
            .trim()
            .parse::<f64>()
            .map_err(|_| VariantTableError::InvalidValue {
                row: row + 1,
                column: column.to_string(),
                value: value.to_string(),
            })?;
        values.push(number);
    }

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = (count > 0).then(|| sorted.iter().sum::<f64>() / count as f64);
    let median = match count {
        0 => None,
        n if n % 2 == 1 => Some(sorted[n / 2]),
        n => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    };

    Ok(Distribution {
        column: column.to_string(),
        count,
        missing,
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        mean,
        median,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "Gene\tVariant Type\tVAF\tVariant Depth\tRef Depth\n\
TP53\tSNP\t0.4\t4\t6\n\
KRAS\tSNP\t0.1\t1\t9\n\
EGFR\tDEL\t0.3\t3\t7\n\
BRAF\t\tNA\t2\t8\n";

    fn table() -> VariantTable {
        VariantTable::from_reader(TABLE.as_bytes(), &[]).unwrap()
    }

    #[test]
    fn test_category_counts_in_first_seen_order() {
        let counts = category_counts(&table(), "Variant Type").unwrap();
        assert_eq!(
            counts,
            vec![
                CategoryCount { value: "SNP".to_string(), count: 2 },
                CategoryCount { value: "DEL".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_distribution() {
        let dist = distribution(&table(), "VAF").unwrap();
        assert_eq!(dist.count, 3);
        assert_eq!(dist.missing, 1);
        assert_eq!(dist.min, Some(0.1));
        assert_eq!(dist.max, Some(0.4));
        assert_eq!(dist.median, Some(0.3));
        assert!((dist.mean.unwrap() - 0.8 / 3.0).abs() < 1e-9);
        assert_eq!(dist.values, vec![0.4, 0.1, 0.3]);
    }

    #[test]
    fn test_distribution_rejects_text() {
        assert!(matches!(
            distribution(&table(), "Gene"),
            Err(VariantTableError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_column() {
        assert!(category_counts(&table(), "Mutation Type").is_err());
    }
}
