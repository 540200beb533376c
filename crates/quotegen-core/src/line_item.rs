/// Directory entries and normalized quotation line items.
use serde::Serialize;

/// One row of the `Data Base` sheet, with blanks read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DirectoryEntry {
    /// Company name (column B).
    pub name: String,
    /// Charge description.
    pub description: String,
    /// Rate, as displayed.
    pub rate: String,
    /// Charging unit.
    pub unit: String,
    /// Currency code.
    pub currency: String,
    /// VAT flag.
    pub vat: String,
    /// Prepaid/collect flag.
    pub payment_term: String,
}

/// One output row of the quotation form.
///
/// All fields are strings at generation time; numeric coercion happens when
/// the row is written to the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineItem {
    /// Sequential index, `"1"` for the directory row.
    pub index: String,
    /// Charge description.
    pub description: String,
    /// Rate.
    pub rate: String,
    /// Charging unit.
    pub unit: String,
    /// Currency code.
    pub currency: String,
    /// Amount; always blank when generated.
    pub amount: String,
    /// VAT flag.
    pub vat: String,
    /// Prepaid/collect flag.
    pub payment_term: String,
}

impl LineItem {
    /// Builds a line item from the six descriptive fields, with a blank amount.
    pub fn new(index: usize, fields: [String; 6]) -> Self {
        let [description, rate, unit, currency, vat, payment_term] = fields;
        Self {
            index: index.to_string(),
            description,
            rate,
            unit,
            currency,
            amount: String::new(),
            vat,
            payment_term,
        }
    }

    /// The row used when the company is not in the directory: index `"1"`,
    /// the company name in the description column, everything else blank.
    pub fn placeholder(entity: &str) -> Self {
        Self {
            index: "1".to_owned(),
            description: entity.to_owned(),
            ..Self::default()
        }
    }

    /// The eight fields in form column order (A..H).
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.index,
            &self.description,
            &self.rate,
            &self.unit,
            &self.currency,
            &self.amount,
            &self.vat,
            &self.payment_term,
        ]
    }
}

impl From<&DirectoryEntry> for LineItem {
    fn from(entry: &DirectoryEntry) -> Self {
        Self::new(
            1,
            [
                entry.description.clone(),
                entry.rate.clone(),
                entry.unit.clone(),
                entry.currency.clone(),
                entry.vat.clone(),
                entry.payment_term.clone(),
            ],
        )
    }
}
