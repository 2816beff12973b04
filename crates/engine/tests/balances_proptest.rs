//! Property-based tests for the balance fold.
//!
//! The ledger is an unordered multiset: folding it in any order must give the
//! same balances, and the balances of a space must add up to what was paid in
//! refills minus what was spent on journeys.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use engine::{Car, Fuel, Journey, LedgerItem, Member, Refill, SpaceBalances, raw_balances};

const TOLERANCE: f64 = 1e-6;

fn member(n: u128, name: &str, is_guest: bool) -> Member {
    Member {
        id: Uuid::from_u128(n),
        space_id: Uuid::nil(),
        name: name.to_string(),
        is_guest,
    }
}

/// Same ids on every call, so generated ledgers match the member list.
fn space_members() -> Vec<Member> {
    vec![
        member(1, "Ada", false),
        member(2, "Bea", false),
        member(3, "Carl", false),
        member(4, "Dan", true),
    ]
}

fn car() -> Car {
    Car::new(Uuid::nil(), "Panda".to_string(), Fuel::Diesel, 5.4)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

fn item_strategy(members: Vec<Member>) -> impl Strategy<Value = LedgerItem> {
    let journeys = (
        1i32..2_000,
        1u32..400,
        proptest::sample::subsequence(members.clone(), 1..=members.len()),
    )
        .prop_map(|(distance, cents, travelers)| {
            LedgerItem::Journey(Journey {
                id: Uuid::new_v4(),
                space_id: Uuid::nil(),
                date: date(),
                name: None,
                distance,
                fuel_cost: f64::from(cents) / 100.0,
                car: car(),
                members: travelers,
                created_at: Utc::now(),
            })
        });
    let refills = (100u32..20_000, proptest::sample::select(members)).prop_map(|(cents, payer)| {
        LedgerItem::Refill(Refill {
            id: Uuid::new_v4(),
            space_id: Uuid::nil(),
            date: date(),
            cost: f64::from(cents) / 100.0,
            fuel_cost: Some(1.8),
            car: car(),
            member: payer,
            created_at: Utc::now(),
        })
    });
    prop_oneof![journeys, refills]
}

fn ledger_and_shuffle() -> impl Strategy<Value = (Vec<LedgerItem>, Vec<LedgerItem>)> {
    proptest::collection::vec(item_strategy(space_members()), 0..40)
        .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fold_is_order_independent((items, shuffled) in ledger_and_shuffle()) {
        let a = raw_balances(&items);
        let b = raw_balances(&shuffled);

        prop_assert_eq!(a.len(), b.len());
        for (member_id, balance) in &a {
            let other = b.get(member_id).copied().unwrap_or(f64::NAN);
            prop_assert!((balance - other).abs() < TOLERANCE);
        }
    }

    #[test]
    fn balances_add_up_to_ledger_total((items, _) in ledger_and_shuffle()) {
        let expected: f64 = items.iter().map(LedgerItem::signed_cost).sum();
        let total: f64 = raw_balances(&items).values().sum();

        prop_assert!((expected - total).abs() < TOLERANCE);
    }

    #[test]
    fn regular_deviations_cancel_out((items, _) in ledger_and_shuffle()) {
        let members = space_members();
        let balances = SpaceBalances::compute(&members, &items);

        let deviations: f64 = balances
            .members
            .iter()
            .filter_map(|member| member.deviation)
            .sum();
        prop_assert!(deviations.abs() < TOLERANCE);
        prop_assert!(balances.members.iter().filter(|m| m.is_guest).all(|m| m.deviation.is_none()));
        prop_assert!(balances.unattributed.is_empty());
    }
}
