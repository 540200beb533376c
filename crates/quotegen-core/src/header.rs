/// Header placeholders and their textual substitution.
///
/// The `Form` sheet header carries literal tokens such as `{{job_id}}`.
/// Substitution is containment-based: a cell may hold several tokens mixed
/// with other text, and each occurrence is replaced in place.
use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::format_form_date;

/// A placeholder token recognised in the form header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Placeholder {
    /// `{{job_id}}`
    JobId,
    /// `{{com}}`
    Commodity,
    /// `{{volume}}`
    Volume,
    /// `{{ETD}}`
    Etd,
    /// `{{company}}`
    Company,
    /// `{{pol_pod}}`
    PolPod,
    /// `{{form-to}}`
    FormTo,
    /// `{{attn}}`
    Attn,
    /// `{{tel}}`
    Tel,
    /// `{{sop}}`
    Sop,
    /// `{{date}}`
    Date,
}

impl Placeholder {
    /// Every placeholder, in substitution order.
    pub const ALL: [Self; 11] = [
        Self::JobId,
        Self::Commodity,
        Self::Volume,
        Self::Etd,
        Self::Company,
        Self::PolPod,
        Self::FormTo,
        Self::Attn,
        Self::Tel,
        Self::Sop,
        Self::Date,
    ];

    /// The literal token as it appears in the template.
    pub const fn token(self) -> &'static str {
        match self {
            Self::JobId => "{{job_id}}",
            Self::Commodity => "{{com}}",
            Self::Volume => "{{volume}}",
            Self::Etd => "{{ETD}}",
            Self::Company => "{{company}}",
            Self::PolPod => "{{pol_pod}}",
            Self::FormTo => "{{form-to}}",
            Self::Attn => "{{attn}}",
            Self::Tel => "{{tel}}",
            Self::Sop => "{{sop}}",
            Self::Date => "{{date}}",
        }
    }
}

/// Shipment fields entered alongside the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    /// Job file identifier (upper-cased by the caller).
    pub job_id: String,
    /// Commodity description.
    pub commodity: String,
    /// Estimated volume, e.g. `1x20GP`.
    pub volume: String,
    /// Estimated time of departure.
    pub etd: NaiveDate,
    /// Quoted company.
    pub company: String,
    /// POL/POD string, e.g. `HCM-BKK`.
    pub pol_pod: String,
    /// Contact person.
    pub attn: String,
    /// Contact telephone.
    pub tel: String,
    /// Reference (SOP) number.
    pub sop: String,
    /// Quotation creation date.
    pub date: NaiveDate,
}

/// Ordered token → value pairs ready to apply to header cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSubstitutions {
    pairs: Vec<(Placeholder, String)>,
}

impl HeaderSubstitutions {
    /// Builds the substitution table; dates are rendered as `DD-MMM-YY`.
    pub fn from_fields(fields: &HeaderFields) -> Self {
        let pairs = Placeholder::ALL
            .into_iter()
            .map(|p| {
                let value = match p {
                    Placeholder::JobId => fields.job_id.clone(),
                    Placeholder::Commodity => fields.commodity.clone(),
                    Placeholder::Volume => fields.volume.clone(),
                    Placeholder::Etd => format_form_date(fields.etd),
                    Placeholder::Company => fields.company.clone(),
                    Placeholder::PolPod | Placeholder::FormTo => fields.pol_pod.clone(),
                    Placeholder::Attn => fields.attn.clone(),
                    Placeholder::Tel => fields.tel.clone(),
                    Placeholder::Sop => fields.sop.clone(),
                    Placeholder::Date => format_form_date(fields.date),
                };
                (p, value)
            })
            .collect();
        Self { pairs }
    }

    /// Builds a table from explicit pairs, applied in the given order.
    pub fn from_pairs(pairs: Vec<(Placeholder, String)>) -> Self {
        Self { pairs }
    }

    /// The value bound to `placeholder`, if any.
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(p, _)| *p == placeholder)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every occurrence of every token in `text`.
    ///
    /// Returns `None` if no token occurs, so callers can leave the cell alone.
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut out: Option<String> = None;
        for (placeholder, value) in &self.pairs {
            let current = out.as_deref().unwrap_or(text);
            if current.contains(placeholder.token()) {
                out = Some(current.replace(placeholder.token(), value));
            }
        }
        out
    }
}
