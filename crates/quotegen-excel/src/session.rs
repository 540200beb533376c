//! One operator session over one uploaded template.
//!
//! Lifecycle: created when the template is uploaded ([`QuoteSession::open`]),
//! populated when a company and job are loaded ([`QuoteSession::load`]),
//! optionally edited ([`QuoteSession::edit_grid`]), and consumed by
//! [`QuoteSession::export`]. Nothing is persisted between sessions.
use chrono::NaiveDate;
use serde::Serialize;

use quotegen_core::{
    Diagnostic, DiagnosticCode, EditedGrid, HeaderFields, HeaderSubstitutions, LineItem,
    Reported, RouteGroup, XLSX_MIME, export_file_name, format_form_date, pol_pod_from_job,
};

use crate::error::ExcelError;
use crate::mapper::map_line_items;
use crate::preview::preview_sheet;
use crate::reference::list_entities;
use crate::rewrite::{ExportOptions, RewriteRequest, rewrite, to_bytes};
use crate::template::TemplateWorkbook;

/// The mapped state produced by [`QuoteSession::load`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedQuote {
    /// Company the quotation is addressed to.
    pub company: String,
    /// Upper-cased job identifier.
    pub job_id: String,
    /// POL/POD derived from the job identifier.
    pub pol_pod: String,
    /// Route key; also the name of the secondary sheet.
    pub route_key: String,
    /// Route group the key belongs to.
    pub group: Option<RouteGroup>,
    /// Line items for the form.
    pub line_items: Vec<LineItem>,
    /// Current contents of the route-key sheet (edited or as loaded).
    pub grid: EditedGrid,
    /// Conditions raised while loading.
    pub diagnostics: Vec<Diagnostic>,
}

/// Shipment details typed in by the operator for the form header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentDetails {
    /// Commodity description.
    pub commodity: String,
    /// Estimated volume.
    pub volume: String,
    /// Estimated time of departure.
    pub etd: NaiveDate,
    /// Contact person.
    pub attn: String,
    /// Contact telephone.
    pub tel: String,
    /// Reference (SOP) number.
    pub sop: String,
    /// Quotation creation date.
    pub date: NaiveDate,
}

/// The exported quotation workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Sanitized download name, `QUO {job} {company}.xlsx`.
    pub file_name: String,
    /// MIME type of [`ExportArtifact::bytes`].
    pub mime: &'static str,
    /// The serialized workbook.
    pub bytes: Vec<u8>,
    /// Sheets contained in the workbook, in order.
    pub sheet_names: Vec<String>,
    /// Conditions raised during load and export.
    pub diagnostics: Vec<Diagnostic>,
}

/// Session state over one uploaded template.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    template: TemplateWorkbook,
    mapped: Option<MappedQuote>,
}

impl QuoteSession {
    /// Parses an uploaded template.
    ///
    /// # Errors
    ///
    /// Returns [`ExcelError::Unreadable`] if the bytes are not a readable
    /// `.xlsx` workbook.
    pub fn open(bytes: &[u8]) -> Result<Self, ExcelError> {
        Ok(Self {
            template: TemplateWorkbook::from_bytes(bytes)?,
            mapped: None,
        })
    }

    /// The underlying template.
    pub fn template(&self) -> &TemplateWorkbook {
        &self.template
    }

    /// Companies available in the directory.
    pub fn entities(&self) -> Reported<Vec<String>> {
        list_entities(self.template.values())
    }

    /// Maps `company` and `job_id` onto line items and loads the route-key
    /// sheet for editing. Replaces any earlier load.
    pub fn load(&mut self, company: &str, job_id: &str) -> &MappedQuote {
        let job_id = job_id.to_uppercase();
        let pol_pod = pol_pod_from_job(&job_id);
        let mapped = map_line_items(self.template.values(), company, &pol_pod);
        let mut diagnostics = mapped.diagnostics;

        let grid = match preview_sheet(self.template.formulas(), &mapped.route_key) {
            Some(grid) => grid,
            None if mapped.route_key.is_empty() => EditedGrid::new(),
            None => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::TargetSheetMissing,
                    Some(mapped.route_key.as_str()),
                    "no route sheet to preview; starting from an empty grid",
                ));
                EditedGrid::new()
            }
        };

        self.mapped.insert(MappedQuote {
            company: company.to_owned(),
            job_id,
            pol_pod,
            route_key: mapped.route_key,
            group: mapped.group,
            line_items: mapped.line_items,
            grid,
            diagnostics,
        })
    }

    /// The current mapped state, if loaded.
    pub fn mapped(&self) -> Option<&MappedQuote> {
        self.mapped.as_ref()
    }

    /// Replaces the route-key sheet grid with the operator's edits.
    ///
    /// # Errors
    ///
    /// Returns [`ExcelError::NotLoaded`] before [`QuoteSession::load`].
    pub fn edit_grid(&mut self, grid: EditedGrid) -> Result<(), ExcelError> {
        let mapped = self.mapped.as_mut().ok_or(ExcelError::NotLoaded)?;
        mapped.grid = grid;
        Ok(())
    }

    /// Rewrites the formula view and serializes it, consuming the session.
    ///
    /// # Errors
    ///
    /// Returns [`ExcelError::NotLoaded`] before [`QuoteSession::load`], or
    /// any rewrite or serialization error.
    pub fn export(
        self,
        details: &ShipmentDetails,
        options: ExportOptions,
    ) -> Result<ExportArtifact, ExcelError> {
        let mapped = self.mapped.ok_or(ExcelError::NotLoaded)?;
        let fields = HeaderFields {
            job_id: mapped.job_id.clone(),
            commodity: details.commodity.clone(),
            volume: details.volume.clone(),
            etd: details.etd,
            company: mapped.company.clone(),
            pol_pod: mapped.pol_pod.clone(),
            attn: details.attn.clone(),
            tel: details.tel.clone(),
            sop: details.sop.clone(),
            date: details.date,
        };
        let substitutions = HeaderSubstitutions::from_fields(&fields);
        let footer_date = format_form_date(details.date);

        let mut book = self.template.into_formulas();
        let report = rewrite(
            &mut book,
            &RewriteRequest {
                line_items: &mapped.line_items,
                substitutions: &substitutions,
                footer_date: &footer_date,
                target_sheet: &mapped.route_key,
                grid: &mapped.grid,
                options,
            },
        )?;
        let bytes = to_bytes(&book)?;

        let mut diagnostics = mapped.diagnostics;
        diagnostics.extend(report.diagnostics);
        Ok(ExportArtifact {
            file_name: export_file_name(&mapped.job_id, &mapped.company),
            mime: XLSX_MIME,
            bytes,
            sheet_names: report.kept_sheets,
            diagnostics,
        })
    }
}
