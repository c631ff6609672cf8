use super::slots::PairList;
use super::suggest::Suggestions;
use crate::error::EntryError;
use crate::protocol::{encode, EncodedLine, Record};
use crate::services::write::LineWriter;
use std::fmt;
use tracing::{debug, info, warn};

/// Outcome of the last submission, shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Failed(EntryError),
}

impl fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitStatus::Idle => Ok(()),
            SubmitStatus::Success => f.write_str("Success!"),
            SubmitStatus::Failed(EntryError::Invalid(e)) => write!(f, "{}: {}", e.field(), e),
            SubmitStatus::Failed(EntryError::WriteRejected { body, .. }) => write!(f, "Error: {}", body),
            SubmitStatus::Failed(EntryError::NetworkUnavailable(_)) => f.write_str("Network error"),
        }
    }
}

/// State of one entry form. Contents survive submission so the user can
/// tweak and resend.
#[derive(Debug, Clone)]
pub struct FormSession {
    measurement: String,
    tags: PairList,
    fields: PairList,
    status: SubmitStatus,
    submitting: bool,
    pub measurement_options: Suggestions,
    pub tag_options: Suggestions,
    pub field_options: Suggestions,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            measurement: String::new(),
            tags: PairList::with_blank(),
            fields: PairList::with_blank(),
            status: SubmitStatus::Idle,
            submitting: false,
            measurement_options: Suggestions::measurements(),
            tag_options: Suggestions::tag_keys(),
            field_options: Suggestions::field_keys(),
        }
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn set_measurement(&mut self, text: impl Into<String>) {
        self.measurement = text.into();
    }

    pub fn tags(&self) -> &PairList {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut PairList {
        &mut self.tags
    }

    pub fn fields(&self) -> &PairList {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut PairList {
        &mut self.fields
    }

    /// Tag slots together with the key suggestions that apply to them.
    pub fn tags_with_options(&mut self) -> (&mut PairList, &Suggestions) {
        (&mut self.tags, &self.tag_options)
    }

    /// Field slots together with the key suggestions that apply to them.
    pub fn fields_with_options(&mut self) -> (&mut PairList, &Suggestions) {
        (&mut self.fields, &self.field_options)
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Back to the blank form. Slot identities are regenerated.
    pub fn reset(&mut self) {
        self.measurement.clear();
        self.tags = PairList::with_blank();
        self.fields = PairList::with_blank();
        self.status = SubmitStatus::Idle;
    }

    /// Snapshot of the current inputs.
    pub fn record(&self) -> Record {
        Record {
            measurement: self.measurement.clone(),
            tags: self.tags.to_pairs(),
            fields: self.fields.to_pairs(),
        }
    }

    /// What would be sent right now, without sending it.
    pub fn preview(&self) -> Result<EncodedLine, EntryError> {
        Ok(encode(&self.record())?)
    }

    /// Validates, encodes and sends the current record through `writer`.
    /// Validation failures never reach the writer.
    pub async fn submit<W: LineWriter>(&mut self, writer: &W) -> &SubmitStatus {
        self.status = SubmitStatus::Idle;

        let line = match self.preview() {
            Ok(line) => line,
            Err(e) => {
                debug!("submission blocked: {}", e);
                self.status = SubmitStatus::Failed(e);
                return &self.status;
            }
        };

        let result = {
            let _in_flight = InFlight::start(&mut self.submitting);
            writer.write_line(&line).await
        };

        self.status = match result {
            Ok(()) => {
                info!(measurement = %self.measurement, "line written");
                SubmitStatus::Success
            }
            Err(e) => {
                warn!("submission failed: {}", e);
                SubmitStatus::Failed(e.into())
            }
        };
        &self.status
    }
}

/// Holds the in-flight flag for the duration of one write. Dropping the
/// submit future part way still clears it.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
