// SPDX short identifier: Unlicense

use tracing_subscriber::EnvFilter;

use confidential_token::{
    common::*,
    planner::*,
    ledger::*
};

fn known(ledger: &Ledger, address: &str) -> Option<Commitment> {
    let view = ledger.get_balance_commitment(address);
    return view.exists.then_some(view.commitment)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let operator = CallContext::new("operator", 1);
    let mut ledger: Ledger = Ledger::new(LedgerConfig::default(), &operator.caller, MemoryStore::new(), Vec::new());

    let mint = build_mint(None, "100".parse().unwrap(), None, 1);
    ledger.submit_mint(&operator, "alice", &mint).unwrap();

    //Alice lets bob spend up to 30 on her behalf
    let approve = build_confidential_approve("30".parse().unwrap(), None, ledger.get_nonce("alice") + 1);
    ledger.submit_approve(&CallContext::new("alice", 2), "bob", &approve).unwrap();

    //Bob moves 12 from alice to charlie, spending from the allowance.
    //The nonce is bob's own.
    let allowance = ledger.get_confidential_approval("alice", "bob");
    let plan = build_confidential_transfer_from(
        known(&ledger, "alice"),
        known(&ledger, "charlie"),
        Some(allowance.commitment),
        "12".parse().unwrap(),
        None,
        ledger.get_nonce("bob") + 1
    ).unwrap();
    ledger.submit_transfer_from(&CallContext::new("bob", 3), "alice", "charlie", &plan).unwrap();

    let allowance = ledger.get_confidential_approval("alice", "bob");
    println!("allowance now {} (approved at height {})", allowance.commitment, allowance.approved_at);

    //Without an approval, dave cannot spend alice's balance
    let stolen = build_confidential_transfer_from(
        known(&ledger, "alice"), None, Some(ZERO_COMMITMENT), "1".parse().unwrap(), None, 1
    ).unwrap();
    let err = ledger.submit_transfer_from(&CallContext::new("dave", 4), "alice", "dave2", &stolen).unwrap_err();
    println!("dave: {err} ({:?})", err.kind());

    //The operator can force-burn from any account
    let burn = build_burn(known(&ledger, "alice"), "18".parse().unwrap(), None, ledger.get_nonce("operator") + 1).unwrap();
    ledger.submit_burn(&CallContext::new("operator", 5), "alice", &burn).unwrap();

    let metadata = ledger.get_metadata().unwrap();
    println!("{} ({}): total supply {}", metadata.name, metadata.symbol, metadata.total_supply);
    assert!(ledger.verify_supply_invariant().ok);
}
