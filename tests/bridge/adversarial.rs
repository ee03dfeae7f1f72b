//! Adversarial bridge inputs
//!
//! Forged validator sets, garbage and misplaced signatures, nonce games and
//! cross-deployment replays. Every rejected call must leave the bridge
//! exactly as it was.

#![allow(
    unused_crate_dependencies,
    reason = "test dependencies shared across test suite"
)]

use common::harness::{
    first, funded_ledger, params_for, recipient, split_signatures, BridgeHarness, CUSTODY_FUNDS,
    POWER,
};
use integration_tests::common;
use peggy_bridge::{BridgeCore, BridgeError, RawSignatures, RawValset};
use peggy_crypto::{
    digest::{checkpoint_digest, withdraw_digest},
    test_utils::{garbage_signature, TestValidators},
};
use peggy_params::BridgeParams;
use peggy_primitives::{
    keccak256,
    signature::{EcdsaSignature, SignatureBundle},
    validator::ValidatorSet,
    Address, U256,
};
use peggy_state::BridgeState;

/// Snapshot of everything a rejected call must not touch.
fn fingerprint(harness: &BridgeHarness) -> (BridgeState, U256) {
    (
        harness.bridge().state().clone(),
        harness.balance_of(recipient()),
    )
}

// ============================================================================
// Forged validator sets
// ============================================================================

/// An attacker presenting their own keys as the current set is refused
/// before any signature is looked at.
#[test]
fn test_self_made_valset_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let attacker = TestValidators::with_seed_offset(66, &[POWER; 10]);
    let claim = harness.claim("heist", CUSTODY_FUNDS);
    let digest = withdraw_digest(
        harness.bridge().bridge_id(),
        claim.id,
        claim.amount,
        claim.destination,
    );
    let before = fingerprint(&harness);

    assert_eq!(
        harness.bridge_mut().withdraw(
            &claim,
            &attacker.validator_set(),
            0,
            &attacker.sign_all(&digest)
        ),
        Err(BridgeError::StaleOrForgedValidatorSet)
    );
    assert_eq!(fingerprint(&harness), before);
}

/// Inflating the powers of the real validators changes the checkpoint.
#[test]
fn test_inflated_powers_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let sigs = harness.sign_withdrawal(&claim, &[0]);

    let real = harness.current_set();
    let mut powers = real.powers().to_vec();
    powers[0] = U256::from(10 * POWER);
    let inflated = ValidatorSet::try_new(real.addresses().to_vec(), powers).unwrap();

    assert_eq!(
        harness.bridge_mut().withdraw(&claim, &inflated, 0, &sigs),
        Err(BridgeError::StaleOrForgedValidatorSet)
    );
}

/// Reordering the real validators changes the checkpoint.
#[test]
fn test_reordered_valset_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let sigs = harness.sign_withdrawal(&claim, &first(10));

    let real = harness.current_set();
    let mut addresses = real.addresses().to_vec();
    addresses.swap(0, 1);
    let reordered = ValidatorSet::try_new(addresses, real.powers().to_vec()).unwrap();

    assert_eq!(
        harness.bridge_mut().withdraw(&claim, &reordered, 0, &sigs),
        Err(BridgeError::StaleOrForgedValidatorSet)
    );
}

/// The right set at the wrong nonce is not the set in effect.
#[test]
fn test_wrong_current_nonce_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let sigs = harness.sign_withdrawal(&claim, &first(10));
    let set = harness.current_set();

    assert_eq!(
        harness.bridge_mut().withdraw(&claim, &set, 1, &sigs),
        Err(BridgeError::StaleOrForgedValidatorSet)
    );
}

// ============================================================================
// Signatures
// ============================================================================

/// Garbage in every slot attests nothing.
#[test]
fn test_garbage_signatures_carry_no_power() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let garbage: SignatureBundle = (0..10).map(garbage_signature).collect();
    let before = fingerprint(&harness);

    assert_eq!(
        harness.bridge_mut().withdraw(&claim, &set, 0, &garbage),
        Err(BridgeError::InsufficientPower {
            attested: U256::ZERO,
            required: U256::from(5 * POWER),
        })
    );
    assert_eq!(fingerprint(&harness), before);
}

/// Valid signatures with an out-of-range recovery byte are ignored.
#[test]
fn test_bad_recovery_byte_ignored() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let sigs: SignatureBundle = harness
        .sign_withdrawal(&claim, &first(10))
        .iter()
        .map(|sig| EcdsaSignature::new(sig.v - 27, sig.r, sig.s))
        .collect();

    assert!(matches!(
        harness.bridge_mut().withdraw(&claim, &set, 0, &sigs),
        Err(BridgeError::InsufficientPower { attested, .. }) if attested.is_zero()
    ));
}

/// A signature counts only in its own validator's slot.
#[test]
fn test_shifted_signatures_carry_no_power() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let mut sigs = harness.sign_withdrawal(&claim, &first(10)).into_inner();
    sigs.rotate_left(1);

    assert!(matches!(
        harness.bridge_mut().withdraw(&claim, &set, 0, &sigs),
        Err(BridgeError::InsufficientPower { attested, .. }) if attested.is_zero()
    ));
}

/// One validator's signature copied into every slot is counted once.
#[test]
fn test_duplicated_signature_counted_once() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let only = harness.sign_withdrawal(&claim, &[3])[3];
    let sigs = vec![only; 10];

    assert_eq!(
        harness.bridge_mut().withdraw(&claim, &set, 0, &sigs),
        Err(BridgeError::InsufficientPower {
            attested: U256::from(POWER),
            required: U256::from(5 * POWER),
        })
    );
}

#[test]
fn test_signature_count_mismatch_is_malformed() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let mut sigs = harness.sign_withdrawal(&claim, &first(10)).into_inner();
    sigs.pop();

    assert!(matches!(
        harness.bridge_mut().withdraw(&claim, &set, 0, &sigs),
        Err(BridgeError::MalformedInput(_))
    ));
    assert!(!harness.bridge().is_processed(&claim.id));
}

// ============================================================================
// Tampered claims and cross-purpose signatures
// ============================================================================

/// Redirecting a signed claim to another recipient voids the signatures.
#[test]
fn test_tampered_destination_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let sigs = harness.sign_withdrawal(&claim, &first(10));

    let mut redirected = claim.clone();
    redirected.destination = Address::repeat_byte(0x66);

    assert!(matches!(
        harness.bridge_mut().withdraw(&redirected, &set, 0, &sigs),
        Err(BridgeError::InsufficientPower { attested, .. }) if attested.is_zero()
    ));
    assert!(!harness.bridge().is_processed(&claim.id));
}

/// Signatures approving a rotation cannot be passed off as a withdrawal.
#[test]
fn test_checkpoint_signatures_not_valid_for_withdrawal() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let checkpoint = checkpoint_digest(harness.bridge().bridge_id(), 1, &set);
    let sigs = harness.validators().sign_all(&checkpoint);

    assert!(matches!(
        harness.bridge_mut().withdraw(&claim, &set, 0, &sigs),
        Err(BridgeError::InsufficientPower { attested, .. }) if attested.is_zero()
    ));
}

/// Signatures approving a withdrawal cannot be passed off as a rotation.
#[test]
fn test_withdrawal_signatures_not_valid_for_rotation() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let sigs = harness.sign_withdrawal(&claim, &first(10));
    let next = TestValidators::with_seed_offset(1, &[POWER; 10]).validator_set();

    assert!(matches!(
        harness.bridge_mut().update_valset(&next, 1, &set, 0, &sigs),
        Err(BridgeError::InsufficientPower { attested, .. }) if attested.is_zero()
    ));
    assert_eq!(harness.nonce(), 0);
}

/// A claim signed for one deployment is worthless on another deployment
/// secured by the same validators.
#[test]
fn test_cross_bridge_replay_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let sigs = harness.sign_withdrawal(&claim, &first(10));

    let other_params = BridgeParams {
        bridge_id: keccak256("other_peggy"),
        ..params_for(harness.validators(), 5 * POWER)
    };
    let mut other = BridgeCore::new(&other_params, funded_ledger()).unwrap();

    assert!(matches!(
        other.withdraw(&claim, &harness.current_set(), 0, &sigs),
        Err(BridgeError::InsufficientPower { attested, .. }) if attested.is_zero()
    ));

    // still good where it was meant for
    harness.withdraw(&claim, &first(10)).unwrap();
}

// ============================================================================
// Nonce games
// ============================================================================

#[test]
fn test_rotation_nonce_must_advance_by_one() {
    let mut harness = BridgeHarness::scenario_a();
    let set = harness.current_set();
    let next = TestValidators::with_seed_offset(1, &[POWER; 10]);

    for new_nonce in [0, 2, u64::MAX] {
        let sigs = harness.sign_rotation(&next, new_nonce, &first(10));
        assert_eq!(
            harness
                .bridge_mut()
                .update_valset(&next.validator_set(), new_nonce, &set, 0, &sigs),
            Err(BridgeError::NonceMismatch {
                expected: 1,
                got: new_nonce,
            })
        );
    }
    assert_eq!(harness.nonce(), 0);
}

/// A rotation that already happened cannot be submitted again.
#[test]
fn test_rotation_replay_rejected() {
    let mut harness = BridgeHarness::scenario_a();
    let genesis = harness.current_set();
    let next = TestValidators::with_seed_offset(1, &[POWER; 10]);
    let sigs = harness.sign_rotation(&next, 1, &first(10));

    harness
        .bridge_mut()
        .update_valset(&next.validator_set(), 1, &genesis, 0, &sigs)
        .unwrap();

    // as originally submitted, against the retired set
    assert_eq!(
        harness
            .bridge_mut()
            .update_valset(&next.validator_set(), 1, &genesis, 0, &sigs),
        Err(BridgeError::StaleOrForgedValidatorSet)
    );

    // against the set now in effect, the nonce no longer fits
    assert_eq!(
        harness.bridge_mut().update_valset(
            &next.validator_set(),
            1,
            &next.validator_set(),
            1,
            &sigs
        ),
        Err(BridgeError::NonceMismatch {
            expected: 2,
            got: 1,
        })
    );
    assert_eq!(harness.nonce(), 1);
}

// ============================================================================
// Failure leaves the id usable
// ============================================================================

/// A rejected attempt does not burn the withdrawal id.
#[test]
fn test_failed_withdrawal_can_be_retried() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);

    assert!(harness.withdraw(&claim, &first(2)).is_err());
    assert!(!harness.bridge().is_processed(&claim.id));

    harness.withdraw(&claim, &first(6)).unwrap();
    assert!(harness.bridge().is_processed(&claim.id));
}

/// A withdrawal the ledger cannot pay out is refused without consuming
/// the id.
#[test]
fn test_unfunded_withdrawal_can_be_retried() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("big", CUSTODY_FUNDS + 1);

    assert!(matches!(
        harness.withdraw(&claim, &first(10)),
        Err(BridgeError::Ledger(_))
    ));
    assert!(!harness.bridge().is_processed(&claim.id));
    assert!(harness.bridge_mut().take_events().is_empty());

    let custody = harness.bridge().ledger().custody();
    harness
        .bridge_mut()
        .ledger_mut()
        .mint(claim.token, custody, U256::from(1))
        .unwrap();
    harness.withdraw(&claim, &first(10)).unwrap();
    assert_eq!(
        harness.balance_of(recipient()),
        U256::from(CUSTODY_FUNDS + 1)
    );
}

// ============================================================================
// Raw relayer input
// ============================================================================

/// Correctly shaped parallel lists go through like a pre-built call.
#[test]
fn test_raw_withdrawal_accepted() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let (v, r, s) = split_signatures(&harness.sign_withdrawal(&claim, &first(5)));

    harness
        .bridge_mut()
        .withdraw_raw(
            &claim,
            RawValset::new(set.addresses(), set.powers()),
            0,
            RawSignatures::new(&v, &r, &s),
        )
        .unwrap();
    assert!(harness.bridge().is_processed(&claim.id));
    assert_eq!(harness.balance_of(recipient()), U256::from(100));
}

#[test]
fn test_raw_valset_length_mismatch_is_malformed() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let (v, r, s) = split_signatures(&harness.sign_withdrawal(&claim, &first(10)));
    let before = fingerprint(&harness);

    assert!(matches!(
        harness.bridge_mut().withdraw_raw(
            &claim,
            RawValset::new(set.addresses(), &set.powers()[..9]),
            0,
            RawSignatures::new(&v, &r, &s),
        ),
        Err(BridgeError::MalformedInput(_))
    ));
    assert_eq!(fingerprint(&harness), before);
}

#[test]
fn test_raw_signature_parts_mismatch_is_malformed() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);
    let set = harness.current_set();
    let (v, r, s) = split_signatures(&harness.sign_withdrawal(&claim, &first(10)));
    let before = fingerprint(&harness);

    assert!(matches!(
        harness.bridge_mut().withdraw_raw(
            &claim,
            RawValset::new(set.addresses(), set.powers()),
            0,
            RawSignatures::new(&v[..9], &r, &s),
        ),
        Err(BridgeError::MalformedInput(_))
    ));
    assert_eq!(fingerprint(&harness), before);

    // the id is still usable with well-formed input
    harness.withdraw(&claim, &first(5)).unwrap();
}

#[test]
fn test_raw_empty_valset_is_malformed() {
    let mut harness = BridgeHarness::scenario_a();
    let claim = harness.claim("tx1", 100);

    assert!(matches!(
        harness.bridge_mut().withdraw_raw(
            &claim,
            RawValset::new(&[], &[]),
            0,
            RawSignatures::new(&[], &[], &[]),
        ),
        Err(BridgeError::MalformedInput(_))
    ));
    assert!(!harness.bridge().is_processed(&claim.id));
}

/// Rotations submitted as raw lists, first with a malformed new set.
#[test]
fn test_raw_rotation() {
    let mut harness = BridgeHarness::scenario_a();
    let current = harness.current_set();
    let next = TestValidators::with_seed_offset(1, &[POWER; 10]);
    let next_set = next.validator_set();
    let (v, r, s) = split_signatures(&harness.sign_rotation(&next, 1, &first(10)));
    let before = harness.bridge().last_checkpoint();

    assert!(matches!(
        harness.bridge_mut().update_valset_raw(
            RawValset::new(next_set.addresses(), &next_set.powers()[..3]),
            1,
            RawValset::new(current.addresses(), current.powers()),
            0,
            RawSignatures::new(&v, &r, &s),
        ),
        Err(BridgeError::MalformedInput(_))
    ));
    assert_eq!(harness.nonce(), 0);
    assert_eq!(harness.bridge().last_checkpoint(), before);

    harness
        .bridge_mut()
        .update_valset_raw(
            RawValset::new(next_set.addresses(), next_set.powers()),
            1,
            RawValset::new(current.addresses(), current.powers()),
            0,
            RawSignatures::new(&v, &r, &s),
        )
        .unwrap();
    assert_eq!(harness.nonce(), 1);
}
