// Dataset workflow state machine: upload → summary fetch → display, and
// history selection → summary fetch → display. Owns the currently displayed
// dataset and the in-flight operation; nothing here performs I/O.

use crate::api::Summary;
use crate::errors::ChemvizError;

/// The dataset whose summary is currently displayed. The summary always
/// belongs to the last *confirmed* dataset id; it is replaced wholesale on
/// commit and never partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentDataset {
    pub dataset_id: i64,
    pub summary: Summary,
}

/// The single operation allowed in flight. Each carries the generation it
/// was issued with; a completion is applied only while its generation still
/// matches the pending operation, so superseded responses are dropped
/// instead of overwriting a newer selection.
#[derive(Debug, Clone, PartialEq)]
enum PendingOperation {
    Upload {
        generation: u64,
    },
    FetchSummary {
        dataset_id: i64,
        generation: u64,
        from_upload: bool,
    },
}

impl PendingOperation {
    fn generation(&self) -> u64 {
        match self {
            PendingOperation::Upload { generation } => *generation,
            PendingOperation::FetchSummary { generation, .. } => *generation,
        }
    }
}

/// Render-facing view of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Uploading,
    FetchingSummary,
    Ready(i64),
}

/// Outcome of applying a summary-fetch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The summary was stored and the dataset is now the displayed one.
    Committed { from_upload: bool },
    /// The completion no longer matched the pending operation.
    Discarded,
}

#[derive(Debug, Default)]
pub struct DatasetWorkflow {
    current: Option<CurrentDataset>,
    pending: Option<PendingOperation>,
    last_generation: u64,
}

impl DatasetWorkflow {
    pub fn state(&self) -> WorkflowState {
        match (&self.pending, &self.current) {
            (Some(PendingOperation::Upload { .. }), _) => WorkflowState::Uploading,
            (Some(PendingOperation::FetchSummary { .. }), _) => WorkflowState::FetchingSummary,
            (None, Some(current)) => WorkflowState::Ready(current.dataset_id),
            (None, None) => WorkflowState::Idle,
        }
    }

    /// True while an upload or summary fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current(&self) -> Option<&CurrentDataset> {
        self.current.as_ref()
    }

    pub fn current_dataset_id(&self) -> Option<i64> {
        self.current.as_ref().map(|c| c.dataset_id)
    }

    pub fn current_summary(&self) -> Option<&Summary> {
        self.current.as_ref().map(|c| &c.summary)
    }

    /// Start an upload. Rejected while anything is in flight: uploads are
    /// never queued or interleaved. Returns the generation tag the caller
    /// must attach to the background operation.
    pub fn begin_upload(&mut self) -> Result<u64, ChemvizError> {
        if self.pending.is_some() {
            return Err(ChemvizError::OperationInFlight);
        }
        let generation = self.next_generation();
        self.pending = Some(PendingOperation::Upload { generation });
        Ok(generation)
    }

    /// Start a summary fetch for a history selection. A selection supersedes
    /// an outstanding summary fetch (the old fetch keeps its stale generation
    /// and its completion is discarded on arrival) but is rejected while an
    /// upload is pending.
    pub fn begin_selection(&mut self, dataset_id: i64) -> Result<u64, ChemvizError> {
        if matches!(self.pending, Some(PendingOperation::Upload { .. })) {
            return Err(ChemvizError::OperationInFlight);
        }
        let generation = self.next_generation();
        self.pending = Some(PendingOperation::FetchSummary {
            dataset_id,
            generation,
            from_upload: false,
        });
        Ok(generation)
    }

    /// The upload was accepted and produced a dataset; the same operation
    /// now fetches that dataset's summary. Returns false if the upload was
    /// no longer the pending operation, in which case the response is
    /// dropped.
    pub fn upload_accepted(&mut self, generation: u64, dataset_id: i64) -> bool {
        match self.pending {
            Some(PendingOperation::Upload { generation: pending }) if pending == generation => {
                self.pending = Some(PendingOperation::FetchSummary {
                    dataset_id,
                    generation,
                    from_upload: true,
                });
                true
            }
            _ => false,
        }
    }

    /// Apply a completed summary fetch. Commits only while the completion's
    /// generation and target dataset still match the pending fetch.
    pub fn fetch_succeeded(
        &mut self,
        generation: u64,
        dataset_id: i64,
        summary: Summary,
    ) -> CommitOutcome {
        match self.pending {
            Some(PendingOperation::FetchSummary {
                dataset_id: target,
                generation: pending,
                from_upload,
            }) if pending == generation && target == dataset_id => {
                self.pending = None;
                self.current = Some(CurrentDataset {
                    dataset_id,
                    summary,
                });
                CommitOutcome::Committed { from_upload }
            }
            _ => CommitOutcome::Discarded,
        }
    }

    /// The in-flight operation failed. Clears it, reverting the state to the
    /// previous `Ready` or `Idle` with the last committed summary untouched,
    /// and reports whether the failure was still current. Failures of
    /// superseded operations are ignored.
    pub fn operation_failed(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.generation() == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop everything: displayed dataset and any in-flight operation.
    /// Completions issued before the reset no longer match and are dropped.
    pub fn reset(&mut self) {
        self.current = None;
        self.pending = None;
    }

    fn next_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }
}
