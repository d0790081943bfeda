//! Aggregate command

use crate::error::Result;
use bbob_ela::aggregate::{create_feature_table, LabelTable};
use bbob_ela::config::ExperimentConfig;

pub(crate) fn run(config: &ExperimentConfig) -> Result<()> {
    let labels = LabelTable::load(&config.paths.label_table, &config.classification.labels)?;
    let table_path = config.table_path();
    let summary = create_feature_table(
        &table_path,
        &config.feature_dir(),
        &config.aggregated_classes(),
        &config.classification.dims,
        &labels,
    )?;
    println!(
        "{} rows x {} columns written to {}",
        summary.rows,
        summary.columns,
        table_path.display()
    );
    Ok(())
}
