//! Property-based tests for the ledger invariants.
//!
//! 1. **Product monotonicity**: a swap never shrinks `token * base`, and its
//!    output is always below the output reserve.
//! 2. **Round trip**: a sole provider's deposit followed by a full
//!    withdrawal returns the deposit exactly.
//! 3. **Proportional minting**: equal-ratio deposits mint shares in
//!    proportion to size, independent of order.
//! 4. **Over-withdrawal**: burning more than the balance fails and leaves
//!    reserves untouched.
//! 5. **Slippage**: a minimum above the quote fails and leaves reserves
//!    untouched.
//! 6. **Exact-out minimality**: the exact-out input is the smallest input
//!    reaching the requested output.

use proptest::prelude::*;

use crate::config::{InitialShares, LedgerConfig};
use crate::domain::{AccountId, Amount, Asset, Decimals, FeeRate, Shares, Token, TokenAddress};
use crate::error::AmmError;
use crate::ledger::{PoolManager, SwapEngine};
use crate::math::product;

const OPERATOR: AccountId = AccountId::from_bytes([0xaa; 20]);
const ALICE: AccountId = AccountId::from_bytes([0x01; 20]);
const BOB: AccountId = AccountId::from_bytes([0x02; 20]);
const CAROL: AccountId = AccountId::from_bytes([0x03; 20]);
const TOKEN: TokenAddress = TokenAddress::from_bytes([0x10; 20]);

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn ledger(policy: InitialShares) -> PoolManager {
    let Ok(d) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    let config = LedgerConfig::new(OPERATOR)
        .with_token(Token::new(TOKEN, d, "TKN"))
        .with_initial_shares(policy);
    let Ok(m) = PoolManager::new(config) else {
        panic!("valid config");
    };
    m
}

fn seeded(token_reserve: u128, base_reserve: u128) -> PoolManager {
    seeded_with(InitialShares::GeometricMean, token_reserve, base_reserve)
}

fn seeded_with(policy: InitialShares, token_reserve: u128, base_reserve: u128) -> PoolManager {
    let m = ledger(policy);
    let Ok(_) = m.add_liquidity(
        TOKEN,
        Amount::new(token_reserve),
        Amount::new(base_reserve),
        ALICE,
    ) else {
        panic!("seed deposit should succeed");
    };
    m
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserves in [1_000, 10^24]: from dust pools to 18-decimal supplies.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000_000_000_000_000_000u128
}

fn fee_strategy() -> impl Strategy<Value = FeeRate> {
    (0u32..=100u32).prop_map(|n| FeeRate::new(n, 10_000).unwrap_or_default())
}

fn direction_strategy() -> impl Strategy<Value = bool> {
    any::<bool>()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_swap_never_shrinks_product(
        token_reserve in reserve_strategy(),
        base_reserve in reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000_000_000_000u128,
        base_in in direction_strategy(),
    ) {
        let m = seeded(token_reserve, base_reserve);
        let Ok(before) = m.get_reserves(TOKEN) else {
            panic!("funded pool");
        };
        let (token_in, token_out) = if base_in {
            (Asset::Base, Asset::Token(TOKEN))
        } else {
            (Asset::Token(TOKEN), Asset::Base)
        };

        match m.swap(token_in, token_out, Amount::new(amount_in), Amount::ZERO, BOB) {
            Ok(swap) => {
                let Ok(after) = m.get_reserves(TOKEN) else {
                    panic!("funded pool");
                };
                let reserve_out = if base_in { before.token() } else { before.base() };
                prop_assert!(swap.amount_out < reserve_out);
                prop_assert!(after.product() >= before.product());
            }
            Err(e) => {
                prop_assert!(matches!(e, AmmError::ZeroInput(_)), "unexpected {e}");
                prop_assert_eq!(m.get_reserves(TOKEN), Ok(before));
            }
        }
    }

    #[test]
    fn prop_engine_output_bounded_for_any_fee(
        reserve_in in reserve_strategy(),
        reserve_out in reserve_strategy(),
        amount_in in 1u128..=u128::MAX / 2,
        fee in fee_strategy(),
    ) {
        let engine = SwapEngine::new(fee);
        let Ok(out) = engine.amount_out(
            Amount::new(amount_in),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        ) else {
            panic!("pricing should not fail for positive inputs");
        };
        prop_assert!(out.get() < reserve_out);
        let Some(new_in) = reserve_in.checked_add(amount_in) else {
            return Ok(());
        };
        let new_out = reserve_out - out.get();
        prop_assert!(
            product(Amount::new(new_in), Amount::new(new_out))
                >= product(Amount::new(reserve_in), Amount::new(reserve_out))
        );
    }

    #[test]
    fn prop_sole_provider_round_trip(
        token_amount in reserve_strategy(),
        base_amount in reserve_strategy(),
    ) {
        let m = seeded(token_amount, base_amount);
        let shares = m.balance_of(TOKEN, ALICE);
        let Ok(removed) = m.remove_liquidity(TOKEN, shares, ALICE) else {
            panic!("full withdrawal should succeed");
        };
        prop_assert_eq!(removed.token_amount, Amount::new(token_amount));
        prop_assert_eq!(removed.base_amount, Amount::new(base_amount));
        prop_assert_eq!(m.total_shares(TOKEN), Shares::ZERO);
    }

    #[test]
    fn prop_proportional_minting_is_order_independent(
        unit_token in 1u128..=1_000_000u128,
        unit_base in 1u128..=1_000_000u128,
        k1 in 1u128..=1_000u128,
        k2 in 1u128..=1_000u128,
    ) {
        let deposit = |k: u128| (Amount::new(unit_token * k), Amount::new(unit_base * k));

        // 1_000 seed units backed by 1_000_000 shares keep every mint exact.
        let run = |first: (AccountId, u128), second: (AccountId, u128)| {
            let m = seeded_with(
                InitialShares::Fixed(Shares::new(1_000_000)),
                unit_token * 1_000,
                unit_base * 1_000,
            );
            for (who, k) in [first, second] {
                let (t, b) = deposit(k);
                let Ok(_) = m.add_liquidity(TOKEN, t, b, who) else {
                    panic!("equal-ratio deposit should succeed");
                };
            }
            (m.balance_of(TOKEN, BOB), m.balance_of(TOKEN, CAROL))
        };

        let (bob_a, carol_a) = run((BOB, k1), (CAROL, k2));
        let (bob_b, carol_b) = run((CAROL, k2), (BOB, k1));
        prop_assert_eq!(bob_a, bob_b);
        prop_assert_eq!(carol_a, carol_b);
        prop_assert_eq!(bob_a, Shares::new(1_000 * k1));
        prop_assert_eq!(bob_a.get() * k2, carol_a.get() * k1);
    }

    #[test]
    fn prop_over_withdrawal_changes_nothing(
        token_amount in reserve_strategy(),
        base_amount in reserve_strategy(),
        excess in 1u128..=1_000u128,
    ) {
        let m = seeded(token_amount, base_amount);
        let Ok(before) = m.get_reserves(TOKEN) else {
            panic!("funded pool");
        };
        let held = m.balance_of(TOKEN, ALICE);
        let requested = Shares::new(held.get() + excess);
        prop_assert_eq!(
            m.remove_liquidity(TOKEN, requested, ALICE),
            Err(AmmError::InsufficientShares { requested, available: held })
        );
        prop_assert_eq!(m.get_reserves(TOKEN), Ok(before));
    }

    #[test]
    fn prop_min_above_quote_changes_nothing(
        token_reserve in reserve_strategy(),
        base_reserve in reserve_strategy(),
        amount_in in 1u128..=1_000_000_000_000u128,
    ) {
        let m = seeded(token_reserve, base_reserve);
        let Ok(quote) = m.quote_swap(Asset::Base, Asset::Token(TOKEN), Amount::new(amount_in))
        else {
            panic!("funded pool quotes");
        };
        let Ok(before) = m.get_reserves(TOKEN) else {
            panic!("funded pool");
        };
        let min = Amount::new(quote.amount_out().get() + 1);
        let result = m.swap(Asset::Base, Asset::Token(TOKEN), Amount::new(amount_in), min, BOB);
        if quote.amount_out().is_zero() {
            prop_assert!(matches!(result, Err(AmmError::ZeroInput(_))), "unexpected {result:?}");
        } else {
            prop_assert_eq!(
                result,
                Err(AmmError::SlippageExceeded { expected_min: min, actual: quote.amount_out() })
            );
        }
        prop_assert_eq!(m.get_reserves(TOKEN), Ok(before));
    }

    #[test]
    fn prop_exact_out_is_minimal(
        reserve_in in reserve_strategy(),
        reserve_out in reserve_strategy(),
        fraction in 1u128..=999u128,
    ) {
        let engine = SwapEngine::new(FeeRate::DEFAULT);
        let target = (reserve_out * fraction / 1_000).max(1);
        let Ok(quote) = engine.quote_exact_out(
            Amount::new(target),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        ) else {
            panic!("exact-out should price");
        };
        let need = quote.amount_in().get();
        let Ok(enough) = engine.amount_out(
            Amount::new(need),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        ) else {
            panic!("exact-in should price");
        };
        prop_assert!(enough.get() >= target);
        if need > 1 {
            let Ok(short) = engine.amount_out(
                Amount::new(need - 1),
                Amount::new(reserve_in),
                Amount::new(reserve_out),
            ) else {
                panic!("exact-in should price");
            };
            prop_assert!(short.get() < target);
        }
    }
}
