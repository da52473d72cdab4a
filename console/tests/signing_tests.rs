//! Integration tests for the review/sign/decline flow: load handoff,
//! clause-conditional rendering, signature validation, and the terminal
//! status transitions.

mod common;

use api::prelude::*;
use common::{sample_contract, Call, RecordingService};
use console::session::Session;
use console::signature::{Point, SignaturePad};
use console::signing::{ReviewState, SignerDetails, SigningDesk, SigningError};

fn session_with_selection(contract_id: &str) -> Session {
    let mut session = Session::new();
    session.select_contract(contract_id);
    session
}

fn drawn_pad() -> SignaturePad {
    let mut pad = SignaturePad::new();
    pad.press(Point::new(10.0, 20.0));
    pad.drag(Point::new(42.0, 18.0));
    pad.drag(Point::new(55.0, 30.0));
    pad.release();
    pad
}

fn signer() -> SignerDetails {
    SignerDetails {
        name: "Jane Smith".to_string(),
        email: "jane@acme.com".to_string(),
        agreed_to_terms: true,
    }
}

#[tokio::test]
async fn test_load_without_selection_is_a_noop() {
    let service = RecordingService::new();
    let session = Session::new();

    let mut desk = SigningDesk::new();
    let state = desk.load_for_review(&service, &session).await;

    assert_eq!(*state, ReviewState::Idle);
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_load_failure_leaves_page_pending() {
    let service = RecordingService::new().failing_fetch();
    let session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    let state = desk.load_for_review(&service, &session).await;

    assert_eq!(*state, ReviewState::Pending);
    assert!(desk.contract().is_none());
}

#[tokio::test]
async fn test_rendered_terms_follow_fetched_clause_flags() {
    let contract = sample_contract(
        "contract-1",
        ContractStatus::Sent,
        Clauses {
            payment: true,
            liability: false,
            confidentiality: true,
            termination: false,
        },
    );
    let service = RecordingService::new().with_contract(contract);
    let session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    desk.load_for_review(&service, &session).await;

    let document = desk.terms().unwrap();
    assert!(document.has_section("Payment Terms"));
    assert!(document.has_section("Confidentiality"));
    assert!(!document.has_section("Limitation of Liability"));
    assert!(!document.has_section("Termination"));
    assert!(document.has_section("Signature"));
}

#[tokio::test]
async fn test_blank_signature_is_rejected_without_requests() {
    let service = RecordingService::new();
    let mut session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    let err = desk
        .sign(&service, &mut session, &signer(), &SignaturePad::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SigningError::EmptySignature));
    assert!(service.calls().is_empty());
    assert_eq!(session.selected_contract(), Some("contract-1"));
}

#[tokio::test]
async fn test_sign_requires_details_and_agreement() {
    let service = RecordingService::new();
    let mut session = session_with_selection("contract-1");
    let mut desk = SigningDesk::new();

    let unsigned_name = SignerDetails {
        name: "  ".to_string(),
        ..signer()
    };
    let err = desk
        .sign(&service, &mut session, &unsigned_name, &drawn_pad())
        .await
        .unwrap_err();
    assert!(matches!(err, SigningError::Validation { .. }));

    let not_agreed = SignerDetails {
        agreed_to_terms: false,
        ..signer()
    };
    let err = desk
        .sign(&service, &mut session, &not_agreed, &drawn_pad())
        .await
        .unwrap_err();
    assert!(matches!(err, SigningError::Validation { .. }));

    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn test_sign_requests_exactly_one_signed_transition() {
    let contract = sample_contract("contract-1", ContractStatus::Sent, Clauses::default());
    let service = RecordingService::new().with_contract(contract);
    let mut session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    let signed = desk
        .sign(&service, &mut session, &signer(), &drawn_pad())
        .await
        .unwrap();

    assert_eq!(signed.status, ContractStatus::Signed);
    assert!(signed.signed_at.is_some());
    assert_eq!(
        service.calls(),
        vec![Call::UpdateStatus {
            contract_id: "contract-1".to_string(),
            status: ContractStatus::Signed,
        }]
    );
    assert!(session.selected_contract().is_none());
}

#[tokio::test]
async fn test_decline_requires_confirmation() {
    let service = RecordingService::new();
    let mut session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    let outcome = desk.decline(&service, &mut session, false).await.unwrap();

    assert!(outcome.is_none());
    assert!(service.calls().is_empty());
    assert_eq!(session.selected_contract(), Some("contract-1"));
}

#[tokio::test]
async fn test_confirmed_decline_transitions_and_clears_selection() {
    let contract = sample_contract("contract-1", ContractStatus::Sent, Clauses::default());
    let service = RecordingService::new().with_contract(contract);
    let mut session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    let declined = desk
        .decline(&service, &mut session, true)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(declined.status, ContractStatus::Declined);
    assert_eq!(
        service.calls(),
        vec![Call::UpdateStatus {
            contract_id: "contract-1".to_string(),
            status: ContractStatus::Declined,
        }]
    );
    assert!(session.selected_contract().is_none());
}

#[tokio::test]
async fn test_only_terminal_transitions_are_ever_requested() {
    let contract = sample_contract("contract-1", ContractStatus::Sent, Clauses::default());
    let service = RecordingService::new().with_contract(contract);
    let mut session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    desk.load_for_review(&service, &session).await;
    desk.sign(&service, &mut session, &signer(), &drawn_pad())
        .await
        .unwrap();

    session.select_contract("contract-1");
    let _ = desk.decline(&service, &mut session, true).await;

    for status in service.requested_statuses() {
        assert!(
            status == ContractStatus::Signed || status == ContractStatus::Declined,
            "unexpected transition request to {status}"
        );
        assert!(ContractStatus::Sent.can_transition_to(status));
    }
}

#[tokio::test]
async fn test_backend_refusal_is_authoritative() {
    let detail = "Cannot sign \u{2014} contract status is 'declined' (must be 'sent')";
    let contract = sample_contract("contract-1", ContractStatus::Declined, Clauses::default());
    let service = RecordingService::new()
        .with_contract(contract)
        .rejecting_updates(detail);
    let mut session = session_with_selection("contract-1");

    let mut desk = SigningDesk::new();
    let err = desk
        .sign(&service, &mut session, &signer(), &drawn_pad())
        .await
        .unwrap_err();

    match err {
        SigningError::Api(api) => assert_eq!(api.to_string(), detail),
        other => panic!("expected Api error, got {other:?}"),
    }

    // A refused transition leaves the handoff in place.
    assert_eq!(session.selected_contract(), Some("contract-1"));
}
