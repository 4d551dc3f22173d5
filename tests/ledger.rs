// SPDX short identifier: Unlicense

use confidential_token::{
    common::*,
    algebra::{
        verify_addition,
        verify_subtraction
    },
    planner::*,
    ledger::*
};

const OPERATOR: &str = "operator";

fn amount(s: &str) -> Amount {
    return s.parse().unwrap()
}

fn ctx(caller: &str, height: Height) -> CallContext {
    return CallContext::new(caller, height)
}

fn new_ledger() -> Ledger {
    return Ledger::new(LedgerConfig::default(), OPERATOR, MemoryStore::new(), Vec::new())
}

fn known(ledger: &Ledger, address: &str) -> Option<Commitment> {
    let view = ledger.get_balance_commitment(address);
    return view.exists.then_some(view.commitment)
}

///Mint 10.5 into alice with blinding 111.
fn minted_ledger() -> Ledger {
    let mut ledger = new_ledger();
    let plan = build_mint(None, amount("10.5"), Some(U256::from_u64(111)), 1);
    ledger.submit_mint(&ctx(OPERATOR, 1), "alice", &plan).unwrap();
    return ledger
}

fn corrupt(c: Commitment) -> Commitment {
    return Commitment(c.0 ^ U256::ONE)
}

#[test]
fn mint_creates_commitment() {
    let ledger = minted_ledger();

    let alice = ledger.get_balance_commitment("alice");
    assert!(alice.exists);
    assert_eq!(alice.commitment, Opening::new(amount("10.5"), U256::from_u64(111)).commit());
    assert_eq!(alice.updates, 1);
    assert_eq!(alice.last_updated, 1);

    let metadata = ledger.get_metadata().unwrap();
    assert_eq!(metadata.total_supply, amount("10.5"));
    assert_eq!(metadata.supply_commitment, alice.commitment);
    assert_eq!(ledger.get_nonce(OPERATOR), 1);

    assert_eq!(ledger.events().len(), 1);
    match &ledger.events()[0] {
        LedgerEvent::MintCommitment { to, amount, amount_commitment, tx_id } => {
            assert_eq!(to, "alice");
            assert_eq!(amount, "10.5");
            assert_eq!(amount_commitment, &alice.commitment.to_hex());
            assert_eq!(*tx_id, 1);
        },
        event => panic!("unexpected event {event:?}")
    }
    assert!(ledger.verify_supply_invariant().ok);
}

#[test]
fn transfer_between_accounts() {
    let mut ledger = minted_ledger();
    let plan = build_confidential_transfer(known(&ledger, "alice"), known(&ledger, "bob"), amount("2.5"), None, 1);
    let tx_id = ledger.submit_transfer(&ctx("alice", 2), "bob", &plan).unwrap();
    assert_eq!(tx_id, 2);

    let alice = ledger.get_balance_commitment("alice");
    let bob = ledger.get_balance_commitment("bob");
    assert_eq!(alice.commitment, plan.new_sender_commitment);
    assert_eq!((alice.updates, alice.last_updated), (2, 2));
    assert_eq!(bob.commitment, plan.new_receiver_commitment);
    assert_eq!((bob.updates, bob.last_updated), (1, 2));
    assert_eq!(ledger.get_nonce("alice"), 1);

    assert_eq!(
        ledger.events().last(),
        Some(&LedgerEvent::ConfidentialTransfer {
            from: "alice".into(),
            to: "bob".into(),
            amount_commitment: plan.amount_commitment.to_hex(),
            tx_id: 2
        })
    );

    //transfers never change the supply
    let report = ledger.verify_supply_invariant();
    assert!(report.ok);
    assert_eq!(report.accounts, 2);
    assert_eq!(ledger.get_metadata().unwrap().total_supply, amount("10.5"));
}

#[test]
fn replayed_transfer_is_rejected() {
    let mut ledger = minted_ledger();
    let plan = build_confidential_transfer(known(&ledger, "alice"), None, amount("2.5"), None, 1);
    ledger.submit_transfer(&ctx("alice", 2), "bob", &plan).unwrap();
    let before = ledger.store().clone();

    let err = ledger.submit_transfer(&ctx("alice", 3), "bob", &plan).unwrap_err();
    assert_eq!(err, LedgerError::BadNonce { address: "alice".into(), expected: 2, provided: 1 });
    assert_eq!(err.kind(), ErrorKind::Replay);
    assert_eq!(ledger.store(), &before);
    assert_eq!(ledger.events().len(), 2);
}

#[test]
fn stale_plan_is_rejected() {
    let mut ledger = minted_ledger();
    //planned against a fresh sender instead of alice's real commitment
    let plan = build_confidential_transfer(None, None, amount("1"), None, 1);
    let err = ledger.submit_transfer(&ctx("alice", 2), "bob", &plan).unwrap_err();
    assert_eq!(err, LedgerError::SenderCommitmentMismatch);
    assert_eq!(err.kind(), ErrorKind::AlgebraMismatch);
    assert_eq!(ledger.get_nonce("alice"), 0);

    let mut plan = build_confidential_transfer(known(&ledger, "alice"), None, amount("1"), None, 1);
    plan.new_receiver_commitment = corrupt(plan.new_receiver_commitment);
    let err = ledger.submit_transfer(&ctx("alice", 2), "bob", &plan).unwrap_err();
    assert_eq!(err, LedgerError::ReceiverCommitmentMismatch);
    assert!(!ledger.get_balance_commitment("bob").exists);
}

#[test]
fn transfer_to_self_is_rejected() {
    let mut ledger = minted_ledger();
    let plan = build_confidential_transfer(known(&ledger, "alice"), known(&ledger, "alice"), amount("1"), None, 1);
    let err = ledger.submit_transfer(&ctx("alice", 2), "alice", &plan).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SelfTarget);
}

#[test]
fn approve_then_transfer_from() {
    let mut ledger = minted_ledger();
    let approve = build_confidential_approve(amount("3"), Some(U256::from_u64(555)), 1);
    ledger.submit_approve(&ctx("alice", 2), "bob", &approve).unwrap();

    let approval = ledger.get_confidential_approval("alice", "bob");
    assert!(approval.exists);
    assert_eq!(approval.commitment, approve.allowance_commitment);
    assert_eq!(approval.approved_at, 2);

    let owner_before = ledger.get_balance_commitment("alice").commitment;
    let receiver_before = ledger.get_balance_commitment("charlie").commitment;
    let allowance_before = approval.commitment;

    let plan = build_confidential_transfer_from(
        known(&ledger, "alice"),
        known(&ledger, "charlie"),
        Some(allowance_before),
        amount("2"),
        None,
        ledger.get_nonce("bob") + 1
    ).unwrap();
    ledger.submit_transfer_from(&ctx("bob", 5), "alice", "charlie", &plan).unwrap();

    //every stored commitment relates to its pre-call value through the amount
    let owner_after = ledger.get_balance_commitment("alice").commitment;
    let receiver_after = ledger.get_balance_commitment("charlie").commitment;
    let approval = ledger.get_confidential_approval("alice", "bob");
    assert!(verify_subtraction(&owner_before, &owner_after, &plan.amount_commitment));
    assert!(verify_addition(&receiver_before, &plan.amount_commitment, &receiver_after));
    assert!(verify_subtraction(&allowance_before, &approval.commitment, &plan.amount_commitment));
    assert_eq!(approval.approved_at, 2);

    //the spender's nonce moves, the owner's does not
    assert_eq!(ledger.get_nonce("bob"), 1);
    assert_eq!(ledger.get_nonce("alice"), 1);

    match ledger.events().last() {
        Some(LedgerEvent::ConfidentialTransfer { from, to, amount_commitment, .. }) => {
            assert_eq!((from.as_str(), to.as_str()), ("alice", "charlie"));
            assert_eq!(amount_commitment, &plan.amount_commitment.to_hex());
        },
        event => panic!("unexpected event {event:?}")
    }
    assert!(ledger.verify_supply_invariant().ok);
}

///Alice approves bob for 3 and bob plans moving 2 of it to charlie.
fn approved_transfer_from() -> (Ledger, TransferFromPlan) {
    let mut ledger = minted_ledger();
    let approve = build_confidential_approve(amount("3"), None, 1);
    ledger.submit_approve(&ctx("alice", 2), "bob", &approve).unwrap();
    let plan = build_confidential_transfer_from(
        known(&ledger, "alice"), None, Some(approve.allowance_commitment), amount("2"), None, 1
    ).unwrap();
    return (ledger, plan)
}

#[test]
fn transfer_from_owner_mismatch() {
    let (mut ledger, mut plan) = approved_transfer_from();
    plan.new_owner_commitment = corrupt(plan.new_owner_commitment);
    let before = ledger.store().clone();

    let err = ledger.submit_transfer_from(&ctx("bob", 3), "alice", "charlie", &plan).unwrap_err();
    assert_eq!(err, LedgerError::OwnerCommitmentMismatch);
    assert_eq!(err.kind(), ErrorKind::AlgebraMismatch);
    assert_eq!(ledger.store(), &before);
    assert_eq!(ledger.get_nonce("bob"), 0);
}

#[test]
fn transfer_from_receiver_mismatch() {
    let (mut ledger, mut plan) = approved_transfer_from();
    plan.new_receiver_commitment = corrupt(plan.new_receiver_commitment);
    let before = ledger.store().clone();

    let err = ledger.submit_transfer_from(&ctx("bob", 3), "alice", "charlie", &plan).unwrap_err();
    assert_eq!(err, LedgerError::ReceiverCommitmentMismatch);
    assert_eq!(err.kind(), ErrorKind::AlgebraMismatch);
    assert_eq!(ledger.store(), &before);
    assert_eq!(ledger.get_nonce("bob"), 0);
    assert!(!ledger.get_balance_commitment("charlie").exists);
}

#[test]
fn transfer_from_rejections() {
    let mut ledger = minted_ledger();
    let alice = known(&ledger, "alice");

    let plan = build_confidential_transfer_from(alice, None, Some(ZERO_COMMITMENT), amount("1"), None, 1).unwrap();
    let err = ledger.submit_transfer_from(&ctx("bob", 2), "alice", "charlie", &plan).unwrap_err();
    assert_eq!(err, LedgerError::NoApproval { owner: "alice".into(), spender: "bob".into() });
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = ledger.submit_transfer_from(&ctx("bob", 2), "dave", "charlie", &plan).unwrap_err();
    assert_eq!(err, LedgerError::NoOwnerCommitment("dave".into()));
    assert_eq!(err.kind(), ErrorKind::StateMissing);

    let err = ledger.submit_transfer_from(&ctx("bob", 2), "alice", "alice", &plan).unwrap_err();
    assert_eq!(err, LedgerError::SelfTransferFrom);

    //an allowance too small for the plan's claimed new allowance
    let approve = build_confidential_approve(amount("1"), None, 1);
    ledger.submit_approve(&ctx("alice", 2), "bob", &approve).unwrap();
    let plan = build_confidential_transfer_from(
        alice, None, Some(Opening::new(amount("5"), U256::ONE).commit()), amount("2"), None, 1
    ).unwrap();
    let err = ledger.submit_transfer_from(&ctx("bob", 3), "alice", "charlie", &plan).unwrap_err();
    assert_eq!(err, LedgerError::AllowanceCommitmentMismatch);
    assert_eq!(ledger.get_nonce("bob"), 0);
}

#[test]
fn corrupted_burn_is_rejected() {
    let mut ledger = minted_ledger();
    let mut plan = build_burn(known(&ledger, "alice"), amount("1"), None, 1).unwrap();
    plan.new_from_commitment = corrupt(plan.new_from_commitment);
    let before = ledger.store().clone();

    let err = ledger.submit_burn(&ctx("alice", 2), "alice", &plan).unwrap_err();
    assert_eq!(err, LedgerError::FromCommitmentMismatch);
    assert_eq!(ledger.store(), &before);
    assert_eq!(ledger.get_nonce("alice"), 0);
}

#[test]
fn burn_updates_supply() {
    let mut ledger = minted_ledger();
    let plan = build_burn(known(&ledger, "alice"), amount("0.5"), None, 1).unwrap();
    ledger.submit_burn(&ctx("alice", 2), "alice", &plan).unwrap();

    let metadata = ledger.get_metadata().unwrap();
    assert_eq!(metadata.total_supply, amount("10"));
    assert!(ledger.verify_supply_invariant().ok);

    match ledger.events().last() {
        Some(LedgerEvent::BurnCommitment { from, amount, tx_id, .. }) => {
            assert_eq!(from, "alice");
            assert_eq!(amount, "0.5");
            assert_eq!(*tx_id, 2);
        },
        event => panic!("unexpected event {event:?}")
    }
}

#[test]
fn operator_can_force_burn() {
    let mut ledger = minted_ledger();
    let plan = build_burn(known(&ledger, "alice"), amount("10.5"), Some(U256::from_u64(111)), 2).unwrap();
    ledger.submit_burn(&ctx(OPERATOR, 3), "alice", &plan).unwrap();

    assert_eq!(ledger.get_balance_commitment("alice").commitment, ZERO_COMMITMENT);
    assert_eq!(ledger.get_nonce(OPERATOR), 2);
    assert_eq!(ledger.get_nonce("alice"), 0);
    let metadata = ledger.get_metadata().unwrap();
    assert_eq!(metadata.total_supply, Amount::ZERO);
    assert_eq!(metadata.supply_commitment, ZERO_COMMITMENT);
}

#[test]
fn burn_authorization() {
    let mut ledger = minted_ledger();
    let plan = build_burn(known(&ledger, "alice"), amount("1"), None, 1).unwrap();
    let err = ledger.submit_burn(&ctx("mallory", 2), "alice", &plan).unwrap_err();
    assert_eq!(err, LedgerError::NotAuthorizedToBurn { caller: "mallory".into(), from: "alice".into() });

    let err = ledger.submit_burn(&ctx("bob", 2), "bob", &plan).unwrap_err();
    assert_eq!(err, LedgerError::NoBurnCommitment("bob".into()));
}

#[test]
fn mint_receiver_mismatch() {
    let mut ledger = minted_ledger();
    let mut plan = build_mint(known(&ledger, "alice"), amount("1"), None, 2);
    plan.new_receiver_commitment = corrupt(plan.new_receiver_commitment);
    let before = ledger.store().clone();

    let err = ledger.submit_mint(&ctx(OPERATOR, 2), "alice", &plan).unwrap_err();
    assert_eq!(err, LedgerError::ReceiverCommitmentMismatch);
    assert_eq!(err.kind(), ErrorKind::AlgebraMismatch);
    assert_eq!(ledger.store(), &before);
    assert_eq!(ledger.get_nonce(OPERATOR), 1);
    assert_eq!(ledger.get_metadata().unwrap().total_supply, amount("10.5"));
}

#[test]
fn supply_overflow_is_rejected() {
    let mut ledger = minted_ledger();
    let plan = build_mint(known(&ledger, "alice"), Amount::from_atoms(i128::MAX), None, 2);
    let before = ledger.store().clone();

    let err = ledger.submit_mint(&ctx(OPERATOR, 2), "alice", &plan).unwrap_err();
    assert_eq!(err, LedgerError::SupplyOverflow);
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
    assert_eq!(ledger.store(), &before);
    assert_eq!(ledger.get_nonce(OPERATOR), 1);
    assert_eq!(ledger.get_metadata().unwrap().total_supply, amount("10.5"));
    assert_eq!(ledger.events().len(), 1);
}

#[test]
fn only_operator_mints() {
    let mut ledger = new_ledger();
    let plan = build_mint(None, amount("1"), None, 1);
    let err = ledger.submit_mint(&ctx("alice", 1), "alice", &plan).unwrap_err();
    assert_eq!(err, LedgerError::NotOperator { caller: "alice".into() });
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert!(ledger.events().is_empty());
}

#[test]
fn nonces_are_shared_across_operations() {
    let mut ledger = minted_ledger();
    let approve = build_confidential_approve(amount("1"), None, 1);
    ledger.submit_approve(&ctx("alice", 2), "bob", &approve).unwrap();

    let stale = build_confidential_transfer(known(&ledger, "alice"), None, amount("1"), None, 1);
    assert_eq!(ledger.submit_transfer(&ctx("alice", 3), "bob", &stale).unwrap_err().kind(), ErrorKind::Replay);

    let plan = build_confidential_transfer(known(&ledger, "alice"), None, amount("1"), None, ledger.get_nonce("alice") + 1);
    ledger.submit_transfer(&ctx("alice", 3), "bob", &plan).unwrap();
    assert_eq!(ledger.get_nonce("alice"), 2);
}

#[test]
fn tampering_breaks_the_invariant() {
    let mut ledger = minted_ledger();
    let mut record = ledger.store().balance("alice").unwrap();
    record.commitment = corrupt(record.commitment);
    ledger.store_mut().set_balance("alice", record);

    let report = ledger.verify_supply_invariant();
    assert!(!report.ok);
    assert_eq!(report.accounts, 1);
    assert_eq!(report.product, record.commitment);
    assert_eq!(report.expected, ledger.get_metadata().unwrap().supply_commitment);
}

#[test]
fn empty_ledger_invariant() {
    let report = new_ledger().verify_supply_invariant();
    assert!(report.ok);
    assert_eq!(report.accounts, 0);
    assert_eq!(report.product, ZERO_COMMITMENT);
}

#[test]
fn absent_views_have_defaults() {
    let ledger = new_ledger();
    let view = ledger.get_balance_commitment("nobody");
    assert!(!view.exists);
    assert_eq!(view.commitment, ZERO_COMMITMENT);
    assert_eq!((view.updates, view.last_updated), (0, 0));

    let approval = ledger.get_confidential_approval("nobody", "else");
    assert!(!approval.exists);
    assert_eq!(approval.commitment, ZERO_COMMITMENT);
    assert_eq!(ledger.get_nonce("nobody"), 0);
}

#[cfg(feature = "to_bytes")]
#[test]
fn snapshot_and_restore() {
    let ledger = minted_ledger();
    let bytes = ledger.store().to_bytes().unwrap();

    let store = MemoryStore::from_bytes(&bytes).unwrap();
    let mut restored: Ledger = Ledger::open(store, Vec::new()).unwrap();
    assert_eq!(restored.get_metadata(), ledger.get_metadata());

    //the tx counter survives the snapshot
    let plan = build_confidential_transfer(known(&restored, "alice"), None, amount("1"), None, 1);
    assert_eq!(restored.submit_transfer(&ctx("alice", 2), "bob", &plan).unwrap(), 2);
}
