//! The shared create/edit form.
//!
//! One [`FormDraft`] is staged at a time. In create mode every field is
//! editable; in edit mode the draft is a copy of an existing ficha and its
//! code is locked to the original value.
//!
//! Submission is split in two so the in-flight guard holds across the
//! network call:
//! 1. [`FormController::begin_submit`] validates the draft, marks the form
//!    busy and hands back an owned [`SubmitRequest`]
//! 2. the caller sends it through a [`SyncClient`](crate::sync::SyncClient)
//! 3. [`FormController::finish_submit`] applies the outcome and frees the form
//!
//! A caller that may be cancelled between steps 1 and 3 holds a
//! [`SubmitGuard`] instead, which frees the form when dropped.

use chrono::NaiveDate;
use std::str::FromStr;

use crate::error::FichaError;
use crate::models::{date_part, Ficha, FichaStatus};

/// Editable copy of a ficha's fields.
///
/// Empty strings and `None` mean "not filled in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub code: String,
    pub start_date: String,
    pub end_classwork_date: String,
    pub end_record_date: String,
    pub program_id: Option<i64>,
    pub site_id: Option<i64>,
    pub status: Option<FichaStatus>,
}

impl FormDraft {
    /// Copies a ficha into a draft, keeping only the date part of each date.
    pub fn from_ficha(ficha: &Ficha) -> Self {
        Self {
            code: ficha.code.to_string(),
            start_date: date_part(&ficha.start_date).to_string(),
            end_classwork_date: date_part(&ficha.end_classwork_date).to_string(),
            end_record_date: date_part(&ficha.end_record_date).to_string(),
            program_id: Some(ficha.program_id),
            site_id: Some(ficha.site_id),
            status: Some(ficha.status),
        }
    }

    /// Names of the required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.code.trim().is_empty() {
            missing.push("code");
        }
        if self.start_date.trim().is_empty() {
            missing.push("startDate");
        }
        if self.end_classwork_date.trim().is_empty() {
            missing.push("endClassworkDate");
        }
        if self.end_record_date.trim().is_empty() {
            missing.push("endRecordDate");
        }
        if self.program_id.is_none() {
            missing.push("programId");
        }
        if self.site_id.is_none() {
            missing.push("siteId");
        }
        if self.status.is_none() {
            missing.push("status");
        }
        missing
    }

    /// Builds the request body, failing if any required field is empty.
    pub fn to_ficha(&self) -> Result<Ficha, FichaError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(FichaError::missing_fields(&missing));
        }

        let code = self.code.trim().parse::<i64>().map_err(|_| {
            FichaError::Validation(format!("code must be an integer, got '{}'", self.code))
        })?;

        // missing_fields guarantees these are set
        let (Some(program_id), Some(site_id), Some(status)) =
            (self.program_id, self.site_id, self.status)
        else {
            return Err(FichaError::missing_fields(&["programId", "siteId", "status"]));
        };

        Ok(Ficha {
            code,
            start_date: self.start_date.trim().to_string(),
            end_classwork_date: self.end_classwork_date.trim().to_string(),
            end_record_date: self.end_record_date.trim().to_string(),
            program_id,
            site_id,
            status,
        })
    }

    /// True when all three dates parse and are in lifecycle order.
    ///
    /// Returns `None` if any date is not a `YYYY-MM-DD` value.
    pub fn dates_in_order(&self) -> Option<bool> {
        let parse = |s: &str| NaiveDate::parse_from_str(date_part(s.trim()), "%Y-%m-%d").ok();
        let start = parse(&self.start_date)?;
        let end_classwork = parse(&self.end_classwork_date)?;
        let end_record = parse(&self.end_record_date)?;
        Some(start <= end_classwork && end_classwork <= end_record)
    }
}

/// Field names accepted by [`FormController::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Code,
    StartDate,
    EndClassworkDate,
    EndRecordDate,
    Program,
    Site,
    Status,
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "code" => Ok(DraftField::Code),
            "start" | "startdate" => Ok(DraftField::StartDate),
            "endclasswork" | "endclassworkdate" => Ok(DraftField::EndClassworkDate),
            "endrecord" | "endrecorddate" => Ok(DraftField::EndRecordDate),
            "program" | "programid" => Ok(DraftField::Program),
            "site" | "siteid" => Ok(DraftField::Site),
            "status" => Ok(DraftField::Status),
            _ => Err(format!(
                "Unknown field '{}'. Valid fields: code, start, end-classwork, end-record, program, site, status",
                s
            )),
        }
    }
}

/// Which ficha, if any, the form is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { original: Ficha },
}

/// A validated submission ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(Ficha),
    Update { code: i64, ficha: Ficha },
}

impl SubmitRequest {
    pub fn ficha(&self) -> &Ficha {
        match self {
            SubmitRequest::Create(ficha) => ficha,
            SubmitRequest::Update { ficha, .. } => ficha,
        }
    }
}

#[derive(Debug)]
pub struct FormController {
    draft: FormDraft,
    mode: FormMode,
    in_flight: bool,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            draft: FormDraft::default(),
            mode: FormMode::Create,
            in_flight: false,
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// The ficha being edited, if any.
    pub fn selected(&self) -> Option<&Ficha> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit { original } => Some(original),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// True while a submission is waiting for the server.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Loads `record` into the draft and switches to edit mode.
    pub fn begin_edit(&mut self, record: &Ficha) -> Result<(), FichaError> {
        self.ensure_idle()?;
        self.draft = FormDraft::from_ficha(record);
        self.mode = FormMode::Edit {
            original: record.clone(),
        };
        Ok(())
    }

    /// Drops the draft and returns to create mode.
    pub fn cancel(&mut self) -> Result<(), FichaError> {
        self.ensure_idle()?;
        self.reset();
        Ok(())
    }

    /// Sets one draft field from its text form.
    ///
    /// An empty value clears the field. The code cannot be changed while
    /// editing.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), FichaError> {
        self.ensure_idle()?;
        let value = value.trim();
        let draft = &mut self.draft;

        match field {
            DraftField::Code => {
                if let FormMode::Edit { original } = &self.mode {
                    return Err(FichaError::Validation(format!(
                        "code is locked to {} while editing",
                        original.code
                    )));
                }
                draft.code = value.to_string();
            }
            DraftField::StartDate => draft.start_date = value.to_string(),
            DraftField::EndClassworkDate => draft.end_classwork_date = value.to_string(),
            DraftField::EndRecordDate => draft.end_record_date = value.to_string(),
            DraftField::Program => draft.program_id = parse_id("program", value)?,
            DraftField::Site => draft.site_id = parse_id("site", value)?,
            DraftField::Status => {
                draft.status = if value.is_empty() {
                    None
                } else {
                    Some(FichaStatus::from_str(value).map_err(FichaError::Validation)?)
                };
            }
        }
        Ok(())
    }

    /// Validates the draft and marks the form as busy.
    ///
    /// Nothing is marked when validation fails, so the caller may fix the
    /// draft and try again.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, FichaError> {
        self.ensure_idle()?;

        let mut ficha = self.draft.to_ficha()?;

        if self.draft.dates_in_order() == Some(false) {
            tracing::warn!(
                "Ficha {} dates are out of order (start {}, end classwork {}, end record {})",
                ficha.code,
                ficha.start_date,
                ficha.end_classwork_date,
                ficha.end_record_date
            );
        }

        let request = match &self.mode {
            FormMode::Create => SubmitRequest::Create(ficha),
            FormMode::Edit { original } => {
                ficha.code = original.code;
                SubmitRequest::Update {
                    code: original.code,
                    ficha,
                }
            }
        };

        self.in_flight = true;
        Ok(request)
    }

    /// Applies the server's answer to a request from [`begin_submit`].
    ///
    /// Success resets the form to an empty create draft; failure keeps the
    /// draft exactly as submitted.
    ///
    /// [`begin_submit`]: FormController::begin_submit
    pub fn finish_submit(
        &mut self,
        outcome: Result<Ficha, FichaError>,
    ) -> Result<Ficha, FichaError> {
        self.in_flight = false;
        let ficha = outcome?;
        self.reset();
        Ok(ficha)
    }

    /// Holds the form busy until the returned guard is finished or dropped.
    pub fn in_flight_guard(&mut self) -> SubmitGuard<'_> {
        SubmitGuard { form: self }
    }

    /// Empties the draft and returns to create mode.
    pub(crate) fn reset(&mut self) {
        self.draft = FormDraft::default();
        self.mode = FormMode::Create;
    }

    fn ensure_idle(&self) -> Result<(), FichaError> {
        if self.in_flight {
            return Err(FichaError::RequestInFlight("the form".to_string()));
        }
        Ok(())
    }
}

/// Keeps a submission's in-flight flag tied to a scope.
///
/// Dropping the guard without calling [`SubmitGuard::finish`] (a timed out
/// or cancelled request) frees the form and keeps the draft, as a failed
/// submission would.
pub struct SubmitGuard<'a> {
    form: &'a mut FormController,
}

impl SubmitGuard<'_> {
    /// Applies the server's answer, see [`FormController::finish_submit`].
    pub fn finish(self, outcome: Result<Ficha, FichaError>) -> Result<Ficha, FichaError> {
        self.form.finish_submit(outcome)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.form.in_flight {
            tracing::warn!("Submission abandoned before the server answered");
            self.form.in_flight = false;
        }
    }
}

fn parse_id(name: &str, value: &str) -> Result<Option<i64>, FichaError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| FichaError::Validation(format!("{} must be a numeric id, got '{}'", name, value)))
}
