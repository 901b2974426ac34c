use chrono::NaiveDate;

/// One dispensing line that survived classification.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub day: NaiveDate,
    pub item: String,
    /// Missing when the source quantity could not be coerced; sums skip it.
    pub quantity: Option<f64>,
    pub product_code: String,
    pub product_name: String,
    pub warehouse_id: String,
    pub warehouse: String,
    pub service_unit: String,
    pub prescriber_id: String,
    pub prescriber: String,
    pub patient_id: String,
    pub patient: String,
}
