//! CSV and console output for ranked tables.

use std::path::Path;

use remedyx_common::Result;
use remedyx_ranker::CombinedRecord;

fn fmt_f64(v: f64) -> String {
    if v.is_infinite() {
        "inf".to_string()
    } else {
        format!("{v}")
    }
}

/// Write the full ranking as CSV.
pub fn write_combined_csv(path: &Path, records: &[CombinedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "drug_id",
        "disease_id",
        "drug_name",
        "disease_name",
        "n_overlap",
        "overlapping_genes",
        "jaccard",
        "mean_distance",
        "proximity_score",
        "norm_overlap",
        "combined_score",
    ])?;
    for rec in records {
        writer.write_record([
            rec.drug_id.as_str(),
            rec.disease_id.as_str(),
            rec.drug_name.as_deref().unwrap_or(""),
            rec.disease_name.as_deref().unwrap_or(""),
            &rec.n_overlap.to_string(),
            rec.overlapping_genes.as_deref().unwrap_or(""),
            &rec.jaccard.map(fmt_f64).unwrap_or_default(),
            &fmt_f64(rec.mean_distance),
            &fmt_f64(rec.proximity_score),
            &fmt_f64(rec.norm_overlap),
            &fmt_f64(rec.combined_score),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the top-k rows as a plain console table.
pub fn print_top_k(records: &[CombinedRecord], k: usize) {
    println!(
        "{:<16} {:<16} {:>9} {:>13} {:>10} {:>9}",
        "drug", "disease", "n_overlap", "mean_distance", "proximity", "combined"
    );
    for rec in records.iter().take(k) {
        let drug = rec.drug_name.as_deref().unwrap_or(&rec.drug_id);
        let disease = rec.disease_name.as_deref().unwrap_or(&rec.disease_id);
        println!(
            "{:<16} {:<16} {:>9} {:>13} {:>10.4} {:>9.4}",
            drug,
            disease,
            rec.n_overlap,
            fmt_f64(rec.mean_distance),
            rec.proximity_score,
            rec.combined_score
        );
    }
    if records.len() > k {
        println!("... {} more pairs", records.len() - k);
    }
}
