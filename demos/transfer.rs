// SPDX short identifier: Unlicense

use tracing_subscriber::EnvFilter;

use confidential_token::{
    common::*,
    pedersen::random_blinding,
    planner::{
        build_mint,
        build_confidential_transfer
    },
    ledger::*
};

fn main() {
    //RUST_LOG=debug also shows the planner and generator derivation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    //The deploying address becomes the operator
    let mut ledger: Ledger = Ledger::new(LedgerConfig::default(), "operator", MemoryStore::new(), Vec::new());

    //Alice keeps the opening of her balance to herself.
    //The ledger only ever sees the commitment.
    let alice_balance = Opening::random("10.5".parse().unwrap());
    let mint = build_mint(None, alice_balance.value, Some(alice_balance.blinding), 1);
    ledger.submit_mint(&CallContext::new("operator", 1), "alice", &mint).unwrap();
    assert_eq!(ledger.get_balance_commitment("alice").commitment, alice_balance.commit());

    //Alice sends 2.5 to bob. The plan is built from what alice knows about the current state.
    let sent: Amount = "2.5".parse().unwrap();
    let sent_blinding = random_blinding();
    let sender = ledger.get_balance_commitment("alice");
    let plan = build_confidential_transfer(
        Some(sender.commitment),
        None,
        sent,
        Some(sent_blinding),
        ledger.get_nonce("alice") + 1
    );
    ledger.submit_transfer(&CallContext::new("alice", 2), "bob", &plan).unwrap();

    //Alice's new commitment has no opening she can compute:
    //value exponents are hashes, so they do not subtract.
    //Only bob's side can be reopened, with the amount's own opening.
    let bob_balance = Opening::new(sent, sent_blinding);
    assert_eq!(ledger.get_balance_commitment("bob").commitment, bob_balance.commit());

    //Replaying the same call fails on the nonce
    let replay = ledger.submit_transfer(&CallContext::new("alice", 3), "bob", &plan);
    println!("replay: {}", replay.unwrap_err());

    let report = ledger.verify_supply_invariant();
    println!("supply invariant ok: {} over {} accounts", report.ok, report.accounts);
    for event in ledger.events() {
        println!("{} #{}", event.name(), event.tx_id());
    }
}
