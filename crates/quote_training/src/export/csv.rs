use crate::evaluation::PredictionRecord;
use crate::trainer::FeatureImportance;

pub(crate) fn export_predictions_impl(
    predictions: &[PredictionRecord],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "row_index",
        "hour_of_day",
        "vehicle_type",
        "trip_distance",
        "actual_min",
        "predicted_min",
        "error_min",
    ])?;

    for p in predictions {
        wtr.write_record([
            p.row_index.to_string(),
            p.hour_of_day.to_string(),
            p.vehicle_type.to_string(),
            p.trip_distance.to_string(),
            p.actual_min.to_string(),
            format!("{:.3}", p.predicted_min),
            format!("{:.3}", p.error_min()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_importances_impl(
    importances: &[FeatureImportance],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["feature", "importance"])?;
    for item in importances {
        wtr.write_record([item.feature.clone(), format!("{:.6}", item.importance)])?;
    }
    wtr.flush()?;
    Ok(())
}
