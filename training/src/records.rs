//! Selection and formatting of classifier training records.

use std::collections::HashMap;
use std::fmt::Display;
use std::io::Write;

use rand::Rng;

use crate::error::{Result, TrainingError};
use crate::normalize::NameNormalizer;

/// Catalog entry as far as labelling is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: Option<String>,
    /// Category ids from the root down to the leaf.
    pub category_path: Vec<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, category_path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: Some(name.into()),
            category_path: category_path.into_iter().map(Into::into).collect(),
        }
    }

    /// Parent of the leaf category, or the leaf when the path has one level.
    pub fn label(&self) -> Option<&str> {
        let path = &self.category_path;
        match path.len() {
            0 => None,
            1 => path.first(),
            n => path.get(n - 2),
        }
        .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    /// Fraction of products considered at all.
    pub sample_rate: f64,
    /// Categories with fewer sampled products are dropped.
    pub min_products: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self { sample_rate: 1.0, min_products: 0 }
    }
}

/// One fastText line: `__label__{label} {name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRecord {
    pub label: String,
    pub name: String,
}

impl Display for TrainingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__label__{} {}", self.label, self.name)
    }
}

/// Samples the products once, counts sampled products per label, then emits
/// a record for every sampled product whose label reaches `min_products`.
///
/// Products without a name or category are skipped.
pub fn build_records<R: Rng>(products: &[Product], options: &TrainingOptions, rng: &mut R) -> Result<Vec<TrainingRecord>> {
    if !(0.0..=1.0).contains(&options.sample_rate) {
        return Err(TrainingError::InvalidSampleRate(options.sample_rate));
    }

    let sampled = products
        .iter()
        .filter(|_| rng.gen_bool(options.sample_rate))
        .filter_map(|product| Some((product.label()?, product.name.as_deref()?)))
        .collect::<Vec<_>>();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for (label, _) in &sampled {
        *frequency.entry(*label).or_default() += 1;
    }

    let mut normalizer = NameNormalizer::new();
    let records = sampled
        .into_iter()
        .filter(|(label, _)| frequency.get(label).copied().unwrap_or(0) >= options.min_products)
        .map(|(label, name)| TrainingRecord { label: label.to_string(), name: normalizer.normalize(name) })
        .collect::<Vec<_>>();

    tracing::info!(
        "Training records: {} of {} products, {} categories",
        records.len(),
        products.len(),
        frequency.values().filter(|count| **count >= options.min_products).count()
    );
    Ok(records)
}

/// Writes one record per line; returns the number written.
pub fn write_records<W: Write>(records: &[TrainingRecord], mut writer: W) -> Result<usize> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_label_is_parent_of_leaf() {
        let product = Product::new("Speakers", ["cat00000", "abcat0200000", "abcat0205000"]);
        assert_eq!(product.label(), Some("abcat0200000"));
        assert_eq!(Product::new("Speakers", ["abcat0200000"]).label(), Some("abcat0200000"));
        assert_eq!(Product::new("Speakers", Vec::<String>::new()).label(), None);
    }

    #[test]
    fn test_records_for_every_product() {
        let products = vec![
            Product::new("Running Shoes", ["root", "shoes", "running"]),
            Product::new("Speakers", ["root", "audio", "speakers"]),
        ];
        let records = build_records(&products, &TrainingOptions::default(), &mut rng()).unwrap();
        assert_eq!(
            records,
            vec![
                TrainingRecord { label: "shoes".to_string(), name: "run shoe".to_string() },
                TrainingRecord { label: "audio".to_string(), name: "speaker".to_string() },
            ]
        );
    }

    #[test]
    fn test_products_without_name_or_category_are_skipped() {
        let products = vec![
            Product { name: None, category_path: vec!["root".to_string(), "audio".to_string()] },
            Product::new("Speakers", Vec::<String>::new()),
            Product::new("Speakers", ["root", "audio"]),
        ];
        let records = build_records(&products, &TrainingOptions::default(), &mut rng()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_min_products_drops_rare_categories() {
        let products = vec![
            Product::new("Speakers", ["root", "audio", "a"]),
            Product::new("Headphones", ["root", "audio", "b"]),
            Product::new("Running Shoes", ["root", "shoes", "running"]),
        ];
        let options = TrainingOptions { min_products: 2, ..Default::default() };
        let records = build_records(&products, &options, &mut rng()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.label == "audio"));
    }

    #[test]
    fn test_zero_sample_rate_keeps_nothing() {
        let products = vec![Product::new("Speakers", ["root", "audio"])];
        let options = TrainingOptions { sample_rate: 0.0, ..Default::default() };
        assert!(build_records(&products, &options, &mut rng()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_sample_rate() {
        let options = TrainingOptions { sample_rate: 1.5, ..Default::default() };
        let err = build_records(&[], &options, &mut rng()).unwrap_err();
        assert!(matches!(err, TrainingError::InvalidSampleRate(_)));

        let options = TrainingOptions { sample_rate: f64::NAN, ..Default::default() };
        assert!(build_records(&[], &options, &mut rng()).is_err());
    }

    #[test]
    fn test_write_fasttext_lines() {
        let records = vec![
            TrainingRecord { label: "audio".to_string(), name: "speaker".to_string() },
            TrainingRecord { label: "shoes".to_string(), name: "run shoe".to_string() },
        ];
        let mut out = Vec::new();
        assert_eq!(write_records(&records, &mut out).unwrap(), 2);
        assert_eq!(String::from_utf8(out).unwrap(), "__label__audio speaker\n__label__shoes run shoe\n");
    }
}
