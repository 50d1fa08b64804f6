//! Tests for the doctor directory service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockDoctorDirectory;
use crate::domain::{DoctorDraft, DoctorField};

fn id(raw: &str) -> DoctorId {
    DoctorId::new(raw).expect("valid id")
}

fn valid_draft(name: &str) -> DoctorDraft {
    DoctorDraft {
        doctor_name: name.to_owned(),
        contact: "1234567890".to_owned(),
        address: "B".to_owned(),
        timing: "9-5".to_owned(),
        available_days: "Mon-Fri".to_owned(),
    }
}

fn record(raw_id: &str, name: &str) -> DoctorRecord {
    DoctorRecord::new(id(raw_id), valid_draft(name))
}

fn fill(service: &mut DoctorDirectoryService<MockDoctorDirectory>, draft: &DoctorDraft) {
    for field in DoctorField::ALL {
        service
            .form_mut()
            .update_field(field, draft.field(field).to_owned());
    }
}

fn listing(initial: Vec<DoctorRecord>) -> MockDoctorDirectory {
    let mut directory = MockDoctorDirectory::new();
    directory
        .expect_list()
        .times(1)
        .return_once(move || Ok(initial));
    directory
}

async fn loaded_service(
    directory: MockDoctorDirectory,
) -> DoctorDirectoryService<MockDoctorDirectory> {
    let mut service = DoctorDirectoryService::new(Arc::new(directory));
    service.refresh().await.expect("initial refresh");
    service
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_calling_the_collaborator() {
    let directory = MockDoctorDirectory::new();
    let mut service = DoctorDirectoryService::new(Arc::new(directory));
    service
        .form_mut()
        .update_field(DoctorField::Contact, "555-1234");

    let error = service.submit().await.expect_err("validation must fail");

    let SubmitError::Validation(errors) = error else {
        panic!("expected validation error, got {error:?}");
    };
    assert_eq!(errors.len(), 5);
    assert_eq!(service.form().errors(), &errors);
    assert_eq!(service.form().draft().contact, "555-1234");
}

#[tokio::test]
async fn create_refreshes_the_list_and_resets_the_form() {
    let mut directory = MockDoctorDirectory::new();
    let draft = valid_draft("A");
    directory
        .expect_create()
        .withf(|draft| draft.doctor_name == "A")
        .times(1)
        .return_once(|draft| Ok(DoctorRecord::new(id("1"), draft.clone())));
    directory
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![record("1", "A")]));
    let mut service = DoctorDirectoryService::new(Arc::new(directory));
    fill(&mut service, &draft);

    let outcome = service.submit().await.expect("create succeeds");

    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert_eq!(outcome.record().id(), &id("1"));
    assert_eq!(service.doctors(), &[record("1", "A")]);
    assert!(service.form().draft().is_blank());
    assert_eq!(service.form().mode(), &Mode::Create);
}

#[tokio::test]
async fn edit_mode_issues_an_update_for_the_edited_id() {
    let mut directory = listing(vec![record("4", "Original")]);
    directory
        .expect_update()
        .with(eq(id("4")), eq(valid_draft("Renamed")))
        .times(1)
        .return_once(|id, draft| Ok(DoctorRecord::new(id.clone(), draft.clone())));
    directory
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![record("4", "Renamed")]));
    let mut service = loaded_service(directory).await;

    service.begin_edit(&id("4")).expect("known doctor");
    service
        .form_mut()
        .update_field(DoctorField::DoctorName, "Renamed");
    let outcome = service.submit().await.expect("update succeeds");

    assert!(matches!(outcome, SubmitOutcome::Updated(_)));
    assert_eq!(service.doctors()[0].doctor_name(), "Renamed");
    assert_eq!(service.form().mode(), &Mode::Create);
}

#[tokio::test]
async fn failed_create_leaves_local_state_untouched() {
    let mut directory = listing(vec![record("1", "Existing")]);
    directory
        .expect_create()
        .times(1)
        .return_once(|_| Err(DoctorDirectoryError::status(500_u16, "boom")));
    let mut service = loaded_service(directory).await;
    let draft = valid_draft("New");
    fill(&mut service, &draft);

    let error = service.submit().await.expect_err("create fails");

    assert_eq!(
        error,
        SubmitError::Collaborator(DoctorDirectoryError::status(500_u16, "boom"))
    );
    assert_eq!(service.form().draft(), &draft);
    assert_eq!(service.form().mode(), &Mode::Create);
    assert_eq!(service.doctors(), &[record("1", "Existing")]);
}

#[tokio::test]
async fn write_is_merged_locally_when_the_follow_up_refresh_fails() {
    let mut directory = MockDoctorDirectory::new();
    directory
        .expect_create()
        .times(1)
        .return_once(|draft| Ok(DoctorRecord::new(id("9"), draft.clone())));
    directory
        .expect_list()
        .times(1)
        .return_once(|| Err(DoctorDirectoryError::timeout("list timed out")));
    let mut service = DoctorDirectoryService::new(Arc::new(directory));
    fill(&mut service, &valid_draft("A"));

    service.submit().await.expect("write still succeeds");

    assert_eq!(service.doctors(), &[record("9", "A")]);
    assert!(service.form().draft().is_blank());
}

#[tokio::test]
async fn fixing_a_field_drops_its_stale_error_before_submit() {
    let mut directory = MockDoctorDirectory::new();
    directory
        .expect_create()
        .times(1)
        .return_once(|draft| Ok(DoctorRecord::new(id("2"), draft.clone())));
    directory
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![record("2", "Dr. Lee")]));
    let mut service = DoctorDirectoryService::new(Arc::new(directory));
    let mut draft = valid_draft("Dr. Lee");
    draft.doctor_name.clear();
    fill(&mut service, &draft);
    service.submit().await.expect_err("name missing");
    assert!(
        service
            .form()
            .errors()
            .get(DoctorField::DoctorName)
            .is_some()
    );

    service
        .form_mut()
        .update_field(DoctorField::DoctorName, "Dr. Lee");
    assert!(
        service
            .form()
            .errors()
            .get(DoctorField::DoctorName)
            .is_none()
    );

    service.submit().await.expect("valid after fix");
    assert!(service.form().errors().is_empty());
}

#[tokio::test]
async fn removing_the_edited_doctor_cancels_the_edit_session() {
    let mut directory = listing(vec![record("3", "Dr. C"), record("5", "Dr. E")]);
    directory
        .expect_delete()
        .with(eq(id("3")))
        .times(1)
        .return_once(|_| Ok(()));
    let mut service = loaded_service(directory).await;
    service.begin_edit(&id("3")).expect("known doctor");

    service.remove(&id("3")).await.expect("delete succeeds");

    assert_eq!(service.doctors(), &[record("5", "Dr. E")]);
    assert_eq!(service.form().mode(), &Mode::Create);
    assert!(service.form().draft().is_blank());
}

#[tokio::test]
async fn removing_another_doctor_keeps_the_edit_session() {
    let mut directory = listing(vec![record("3", "Dr. C"), record("5", "Dr. E")]);
    directory.expect_delete().times(1).return_once(|_| Ok(()));
    let mut service = loaded_service(directory).await;
    service.begin_edit(&id("3")).expect("known doctor");

    service.remove(&id("5")).await.expect("delete succeeds");

    assert_eq!(service.form().mode(), &Mode::Edit(id("3")));
    assert_eq!(service.form().draft().doctor_name, "Dr. C");
}

#[tokio::test]
async fn failed_delete_closes_the_prompt_and_keeps_the_list() {
    let mut directory = listing(vec![record("3", "Dr. C")]);
    directory
        .expect_delete()
        .times(1)
        .return_once(|_| Err(DoctorDirectoryError::transport("connection refused")));
    let mut service = loaded_service(directory).await;
    service.begin_edit(&id("3")).expect("known doctor");
    service.request_delete(&id("3")).expect("known doctor");

    let error = service.confirm_delete().await.expect_err("delete fails");

    assert_eq!(error, DoctorDirectoryError::transport("connection refused"));
    assert_eq!(service.deletion(), &DeletionFlow::Idle);
    assert_eq!(service.doctors(), &[record("3", "Dr. C")]);
    assert_eq!(service.form().mode(), &Mode::Edit(id("3")));
}

#[tokio::test]
async fn confirm_delete_returns_the_deleted_record() {
    let mut directory = listing(vec![record("3", "Dr. C")]);
    directory.expect_delete().times(1).return_once(|_| Ok(()));
    let mut service = loaded_service(directory).await;
    service.request_delete(&id("3")).expect("known doctor");

    let deleted = service.confirm_delete().await.expect("delete succeeds");

    assert_eq!(deleted, Some(record("3", "Dr. C")));
    assert!(service.doctors().is_empty());
}

#[tokio::test]
async fn cancelled_delete_never_reaches_the_collaborator() {
    let directory = listing(vec![record("3", "Dr. C")]);
    let mut service = loaded_service(directory).await;
    service.request_delete(&id("3")).expect("known doctor");

    service.cancel_delete();
    let deleted = service.confirm_delete().await.expect("nothing pending");

    assert_eq!(deleted, None);
    assert_eq!(service.doctors().len(), 1);
}

#[rstest]
fn unknown_ids_are_reported() {
    let mut service = DoctorDirectoryService::new(Arc::new(MockDoctorDirectory::new()));

    let error = service.begin_edit(&id("404")).expect_err("empty list");

    assert_eq!(error, UnknownDoctorError { id: id("404") });
    assert!(service.request_delete(&id("404")).is_err());
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_list() {
    let mut directory = MockDoctorDirectory::new();
    let mut sequence = mockall::Sequence::new();
    directory
        .expect_list()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|| Ok(vec![record("1", "A")]));
    directory
        .expect_list()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|| Err(DoctorDirectoryError::decode("not an array")));
    let mut service = DoctorDirectoryService::new(Arc::new(directory));

    service.refresh().await.expect("first refresh");
    service.refresh().await.expect_err("second refresh fails");

    assert_eq!(service.doctors(), &[record("1", "A")]);
}
