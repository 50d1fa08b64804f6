//! Two-state confirmation gate in front of doctor deletion.

use super::doctor::DoctorRecord;

/// Pending-deletion state.
///
/// `Confirming` doubles as the "confirmation visible" flag, so the pending
/// record and the prompt are always cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeletionFlow {
    /// Nothing awaits confirmation.
    #[default]
    Idle,
    /// The operator asked to delete this record and has not answered yet.
    Confirming(DoctorRecord),
}

impl DeletionFlow {
    /// Ask for confirmation before deleting `record`.
    ///
    /// A request made while already confirming replaces the pending record.
    pub fn request(&mut self, record: DoctorRecord) {
        *self = Self::Confirming(record);
    }

    /// Record awaiting confirmation, if any.
    pub fn pending(&self) -> Option<&DoctorRecord> {
        match self {
            Self::Idle => None,
            Self::Confirming(record) => Some(record),
        }
    }

    /// Return `true` while a confirmation prompt is showing.
    pub fn is_confirming(&self) -> bool {
        matches!(self, Self::Confirming(_))
    }

    /// Accept the prompt, returning the record to delete and going idle.
    pub fn confirm(&mut self) -> Option<DoctorRecord> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Confirming(record) => Some(record),
        }
    }

    /// Dismiss the prompt without side effects.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for deletion confirmation transitions.

    use super::*;
    use crate::domain::{DoctorDraft, DoctorId};
    use rstest::rstest;

    fn record(id: &str, name: &str) -> DoctorRecord {
        DoctorRecord::new(
            DoctorId::new(id).expect("id"),
            DoctorDraft {
                doctor_name: name.to_owned(),
                ..DoctorDraft::default()
            },
        )
    }

    #[rstest]
    fn confirm_hands_back_the_pending_record_and_goes_idle() {
        let mut flow = DeletionFlow::default();
        flow.request(record("1", "Dr. A"));
        assert!(flow.is_confirming());

        let confirmed = flow.confirm().expect("pending record");

        assert_eq!(confirmed.doctor_name(), "Dr. A");
        assert_eq!(flow, DeletionFlow::Idle);
    }

    #[rstest]
    fn cancel_discards_the_pending_record() {
        let mut flow = DeletionFlow::default();
        flow.request(record("1", "Dr. A"));

        flow.cancel();

        assert_eq!(flow.pending(), None);
        assert_eq!(flow.confirm(), None);
    }

    #[rstest]
    fn a_second_request_replaces_the_first() {
        let mut flow = DeletionFlow::default();
        flow.request(record("1", "Dr. A"));
        flow.request(record("2", "Dr. B"));

        let pending = flow.pending().expect("pending record");
        assert_eq!(pending.id().as_ref(), "2");
    }

    #[rstest]
    fn confirm_while_idle_is_a_no_op() {
        let mut flow = DeletionFlow::Idle;
        assert_eq!(flow.confirm(), None);
        assert!(!flow.is_confirming());
    }
}
