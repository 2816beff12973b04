//! Conversions from engine types to the JSON views.

use api_types::{
    Fuel,
    balances::{Balances, MemberBalanceView},
    journey::{JourneyView, MembershipChanges},
    ledger::LedgerEntry,
    refill::RefillView,
    space::{CarView, MemberView, SpaceView},
};
use engine::{Car, Journey, LedgerItem, Member, MembershipDiff, Refill, Space, SpaceOverview};

pub(crate) fn fuel_from_api(fuel: Fuel) -> engine::Fuel {
    match fuel {
        Fuel::Petrol => engine::Fuel::Petrol,
        Fuel::Diesel => engine::Fuel::Diesel,
    }
}

fn fuel_to_api(fuel: engine::Fuel) -> Fuel {
    match fuel {
        engine::Fuel::Petrol => Fuel::Petrol,
        engine::Fuel::Diesel => Fuel::Diesel,
    }
}

pub(crate) fn member(member: &Member) -> MemberView {
    MemberView {
        id: member.id,
        name: member.name.clone(),
        is_guest: member.is_guest,
    }
}

pub(crate) fn car(car: &Car) -> CarView {
    CarView {
        id: car.id,
        name: car.name.clone(),
        fuel: fuel_to_api(car.fuel),
        consumption: car.consumption,
    }
}

pub(crate) fn space(space: &Space) -> SpaceView {
    SpaceView {
        id: space.id,
        name: space.name.clone(),
        members: space.members.iter().map(member).collect(),
        cars: space.cars.iter().map(car).collect(),
    }
}

pub(crate) fn journey(journey: &Journey) -> JourneyView {
    JourneyView {
        id: journey.id,
        date: journey.date,
        name: journey.name.clone(),
        distance: journey.distance,
        fuel_cost: journey.fuel_cost,
        cost: journey.cost(),
        car: car(&journey.car),
        members: journey.members.iter().map(member).collect(),
    }
}

pub(crate) fn refill(refill: &Refill) -> RefillView {
    RefillView {
        id: refill.id,
        date: refill.date,
        cost: refill.cost,
        fuel_cost: refill.fuel_cost,
        volume: refill.fuel_volume(),
        car: car(&refill.car),
        member: member(&refill.member),
    }
}

pub(crate) fn ledger_entry(item: &LedgerItem) -> LedgerEntry {
    match item {
        LedgerItem::Journey(j) => LedgerEntry::Journey(journey(j)),
        LedgerItem::Refill(r) => LedgerEntry::Refill(refill(r)),
    }
}

pub(crate) fn membership_changes(diff: MembershipDiff) -> MembershipChanges {
    MembershipChanges {
        removed: diff.to_delete.into_iter().collect(),
        added: diff.to_insert.into_iter().collect(),
    }
}

pub(crate) fn balances(overview: SpaceOverview) -> Balances {
    let SpaceOverview { space, balances } = overview;
    Balances {
        space_id: space.id,
        name: space.name,
        members: balances
            .members
            .into_iter()
            .map(|balance| MemberBalanceView {
                member_id: balance.member_id,
                name: balance.name,
                is_guest: balance.is_guest,
                balance: balance.balance,
                deviation: balance.deviation,
            })
            .collect(),
        average: balances.average,
        unattributed: balances.unattributed,
        cars: space.cars.iter().map(car).collect(),
    }
}
