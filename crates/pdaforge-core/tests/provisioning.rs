//! provisioning.rs
//!
//! Behaviour of `AccountProvisioner` against an in-memory chain:
//! - second `ensure` for the same pair is a no-op reporting `already_existed`
//! - racing callers converge on the same target
//! - rejected / unavailable submissions surface as typed errors

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use assert_matches::assert_matches;
use parking_lot::Mutex;
use pdaforge_core::prelude::*;

/// A chain that holds a set of existing accounts and applies creation
/// instructions atomically. Creating an existing account fails like the
/// on-chain program does in strict mode.
#[derive(Default)]
struct FakeChain {
    accounts: Mutex<HashSet<PublicKey>>,
    balances: Mutex<HashMap<PublicKey, u64>>,
    submissions: AtomicUsize,
    /// When set, the first `n` submitters wait here so they all pass the
    /// existence check before anyone creates.
    race_gate: Option<(Barrier, usize)>,
    /// Pretend the transaction confirmed without creating the account.
    swallow_creation: bool,
    offline_submitter: bool,
    /// Existence reads fail once anything has been submitted.
    offline_reader_after_submit: bool,
}

impl FakeChain {
    fn racing(n: usize) -> Self {
        Self { race_gate: Some((Barrier::new(n), n)), ..Self::default() }
    }

    fn fund(&self, who: PublicKey, lamports: u64) {
        self.balances.lock().insert(who, lamports);
    }

    fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

impl ChainStateReader for FakeChain {
    fn account_exists(&self, address: &PublicKey) -> PdaResult<bool> {
        if self.offline_reader_after_submit && self.submissions() > 0 {
            return Err(PdaError::chain_unavailable("rpc timed out"));
        }
        Ok(self.accounts.lock().contains(address))
    }

    fn balance(&self, address: &PublicKey) -> PdaResult<u64> {
        Ok(self.balances.lock().get(address).copied().unwrap_or(0))
    }
}

impl TransactionSubmitter for FakeChain {
    fn submit(&self, ix: &CreationInstruction, signers: &[PublicKey]) -> PdaResult<String> {
        if self.offline_submitter {
            return Err(PdaError::chain_unavailable("rpc timed out"));
        }
        let n = self.submissions.fetch_add(1, Ordering::SeqCst);
        if let Some((gate, parties)) = &self.race_gate {
            if n < *parties {
                gate.wait();
            }
        }
        assert!(signers.contains(&ix.payer), "payer must sign");

        let mut accounts = self.accounts.lock();
        if accounts.contains(&ix.target) {
            return match ix.mode {
                CreateMode::Idempotent => Ok(format!("sig-{n}")),
                CreateMode::Strict => Err(PdaError::creation_rejected(format!(
                    "account {} already in use",
                    ix.target
                ))),
            };
        }
        if !self.swallow_creation {
            accounts.insert(ix.target);
        }
        Ok(format!("sig-{n}"))
    }
}

fn owner() -> PublicKey {
    PublicKey::new_from_array([0x11; 32])
}

fn usdc_devnet() -> PublicKey {
    "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU".parse().unwrap()
}

fn provisioner(chain: &Arc<FakeChain>, cfg: ProvisionConfig) -> AccountProvisioner {
    AccountProvisioner::new(cfg, chain.clone(), chain.clone()).unwrap()
}

#[test]
fn ensure_is_idempotent() {
    let chain = Arc::new(FakeChain::default());
    let p = provisioner(&chain, ProvisionConfig::default());

    let first = p.ensure(&owner(), &usdc_devnet()).unwrap();
    let second = p.ensure(&owner(), &usdc_devnet()).unwrap();

    assert!(!first.already_existed);
    assert!(second.already_existed);
    assert_eq!(first.address, second.address);
    assert_eq!(chain.submissions(), 1, "second call must not submit");

    let expected =
        derive_associated_account(&owner(), &usdc_devnet(), &TOKEN_PROGRAM_ID, &ASSOCIATED_TOKEN_PROGRAM_ID)
            .unwrap();
    assert_eq!(first.address, expected);
}

#[test]
fn distinct_assets_get_distinct_accounts() {
    let chain = Arc::new(FakeChain::default());
    let p = provisioner(&chain, ProvisionConfig::default());

    let a = p.ensure(&owner(), &usdc_devnet()).unwrap();
    let b = p.ensure(&owner(), &PublicKey::new_from_array([0x22; 32])).unwrap();
    assert!(!a.already_existed && !b.already_existed);
    assert_ne!(a.address.address, b.address.address);
}

#[test]
fn concurrent_callers_converge() {
    let chain = Arc::new(FakeChain::racing(2));
    let p = Arc::new(provisioner(&chain, ProvisionConfig::default()));

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let p = Arc::clone(&p);
                s.spawn(move || {
                    p.ensure_with_retries(&owner(), &usdc_devnet(), &RetryPolicy { max_attempts: 2 })
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let results: Vec<ProvisionResult> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(results[0].address, results[1].address);
    let created = results.iter().filter(|r| !r.already_existed).count();
    assert_eq!(created, 1, "exactly one caller creates the account");
    assert_eq!(chain.submissions(), 2);
}

#[test]
fn race_loser_sees_creation_rejected_without_retry() {
    let chain = Arc::new(FakeChain::racing(2));
    let p = Arc::new(provisioner(&chain, ProvisionConfig::default()));

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let p = Arc::clone(&p);
                s.spawn(move || p.ensure(&owner(), &usdc_devnet()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1);
    let err = results.into_iter().find_map(|r| r.err()).unwrap();
    assert_matches!(err, PdaError::CreationRejected(_));

    // the loser re-resolves to "already exists"
    let again = p.ensure(&owner(), &usdc_devnet()).unwrap();
    assert!(again.already_existed);
}

#[test]
fn idempotent_mode_absorbs_the_race() {
    let chain = Arc::new(FakeChain::racing(2));
    let cfg = ProvisionConfig { create_mode: CreateMode::Idempotent, ..ProvisionConfig::default() };
    let p = Arc::new(provisioner(&chain, cfg));

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let p = Arc::clone(&p);
                s.spawn(move || p.ensure(&owner(), &usdc_devnet()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for r in &results {
        assert!(r.is_ok());
    }
}

#[test]
fn unavailable_submitter_is_terminal() {
    let chain = Arc::new(FakeChain { offline_submitter: true, ..FakeChain::default() });
    let p = provisioner(&chain, ProvisionConfig::default());

    let err = p.ensure(&owner(), &usdc_devnet()).unwrap_err();
    assert_matches!(err, PdaError::ChainUnavailable(_));

    // ensure_with_retries gives up after the budget and returns the last error
    let err = p
        .ensure_with_retries(&owner(), &usdc_devnet(), &RetryPolicy { max_attempts: 3 })
        .unwrap_err();
    assert_matches!(err, PdaError::ChainUnavailable(_));
}

#[test]
fn confirmed_but_missing_account_is_rejected() {
    let chain = Arc::new(FakeChain { swallow_creation: true, ..FakeChain::default() });
    let p = provisioner(&chain, ProvisionConfig::default());

    let err = p.ensure(&owner(), &usdc_devnet()).unwrap_err();
    assert_matches!(err, PdaError::CreationRejected(msg) if msg.contains("still absent"));

    let cfg = ProvisionConfig { verify_after_create: false, ..ProvisionConfig::default() };
    let p = provisioner(&chain, cfg);
    assert!(!p.ensure(&owner(), &usdc_devnet()).unwrap().already_existed);
}

#[test]
fn failed_reread_after_confirmed_creation_is_success() {
    let chain = Arc::new(FakeChain { offline_reader_after_submit: true, ..FakeChain::default() });
    let p = provisioner(&chain, ProvisionConfig::default());

    let res = p
        .ensure_with_retries(&owner(), &usdc_devnet(), &RetryPolicy { max_attempts: 3 })
        .unwrap();
    assert!(!res.already_existed);
    assert_eq!(chain.submissions(), 1, "a confirmed creation must not be resubmitted");
    assert!(chain.accounts.lock().contains(&res.address.address));
}

#[test]
fn thin_payer_is_refused_before_submission() {
    let chain = Arc::new(FakeChain::default());
    let payer = PublicKey::new_from_array([0x33; 32]);
    chain.fund(payer, 1_000);

    let cfg = ProvisionConfig {
        fee_payer: Some(payer),
        min_payer_balance: 2_039_280,
        ..ProvisionConfig::default()
    };
    let p = provisioner(&chain, cfg.clone());

    let err = p.ensure(&owner(), &usdc_devnet()).unwrap_err();
    assert_matches!(err, PdaError::InsufficientFunds { balance: 1_000, required: 2_039_280, .. });
    assert_eq!(chain.submissions(), 0);

    chain.fund(payer, 5_000_000);
    let p = provisioner(&chain, cfg);
    assert!(!p.ensure(&owner(), &usdc_devnet()).unwrap().already_existed);
}

#[test]
fn existing_account_skips_funding_check() {
    let chain = Arc::new(FakeChain::default());
    let target = derive_associated_account(
        &owner(),
        &usdc_devnet(),
        &TOKEN_PROGRAM_ID,
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .unwrap();
    chain.accounts.lock().insert(target.address);

    let cfg = ProvisionConfig { min_payer_balance: u64::MAX, ..ProvisionConfig::default() };
    let p = provisioner(&chain, cfg);
    let res = p.ensure(&owner(), &usdc_devnet()).unwrap();
    assert!(res.already_existed);
    assert_eq!(res.address, target);
    assert_eq!(chain.submissions(), 0);
}
