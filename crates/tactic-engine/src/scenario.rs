//! The demo Cover Tactic scenario: one plan state, one runtime world.
//!
//! The soldier has a live counterpart registered through identifier
//! remapping. The rifle and the cover spot are only known to the world
//! through proxy sources keyed by their abstract id.

use tactic_core::IdentifierRemapping;
use tactic_types::{
    AbstractObjectId, AbstractObjectRef, ActionKey, ActionKind, ActionKindId, Agent,
    CapabilityKind, Cover, GridPosition, Item, Location, Moveable, StateData, StateKey,
    StateStore,
};
use tactic_world::{Entity, RuntimeWorld};
use tracing::info;

use crate::error::EngineError;

const SOLDIER_ID: u32 = 3;
const RIFLE_ID: u32 = 5;
const COVER_ID: u32 = 7;

/// Everything the engine needs to run the scripted plan.
#[derive(Debug)]
pub struct Scenario {
    /// Snapshot store holding the plan state.
    pub states: StateStore,
    /// Key of the plan state the plan was computed in.
    pub state_key: StateKey,
    /// The runtime world.
    pub world: RuntimeWorld,
    /// Abstract to concrete mapping for the live soldier.
    pub remapping: IdentifierRemapping,
    /// Action keys in plan order.
    pub plan: Vec<ActionKey>,
}

/// Build the scenario.
///
/// # Errors
///
/// Returns [`EngineError::World`] if a proxy source is registered twice.
pub fn build() -> Result<Scenario, EngineError> {
    let mut state = StateData::new();
    let soldier = state.add_object(AbstractObjectId::named(SOLDIER_ID, "Soldier"));
    let rifle = state.add_object(AbstractObjectId::named(RIFLE_ID, "Rifle"));
    let cover = state.add_object(AbstractObjectId::new(COVER_ID));

    state.set_trait(
        soldier,
        Agent {
            has_weapon: false,
            health: 100,
        },
    );
    state.set_trait(
        soldier,
        Location {
            position: GridPosition::new(0, 0),
        },
    );
    state.set_trait(soldier, Moveable);
    state.set_trait(
        rifle,
        Item {
            is_weapon: true,
            damage: 25,
        },
    );
    state.set_trait(
        cover,
        Location {
            position: GridPosition::new(4, 2),
        },
    );
    state.set_trait(
        cover,
        Cover {
            protection: 60,
            occupied: false,
        },
    );

    let mut states = StateStore::new();
    let state_key = states.insert(state);

    let mut world = RuntimeWorld::new();
    let live_soldier = world.spawn(Entity::new(
        "Soldier",
        &[
            CapabilityKind::Transform,
            CapabilityKind::Navigator,
            CapabilityKind::WeaponHolder,
        ],
    ));
    world.register_proxy(RIFLE_ID, Entity::new("Rifle", &[CapabilityKind::Transform]))?;
    world.register_proxy(
        COVER_ID,
        Entity::new("Crate", &[CapabilityKind::Transform, CapabilityKind::CoverPoint]),
    )?;

    let mut remapping = IdentifierRemapping::new();
    remapping.insert(&AbstractObjectId::new(SOLDIER_ID), live_soldier);

    let plan = vec![
        ActionKey::new(ActionKind::PICKUP_WEAPON_ID, vec![soldier, rifle]),
        ActionKey::new(ActionKind::TAKE_COVER_ID, vec![soldier, cover]),
        ActionKey::new(ActionKind::SKIP_TURN_ID, vec![soldier]),
        // A key from a planner build this executor does not know about.
        ActionKey::new(ActionKindId::new(), vec![AbstractObjectRef(0)]),
    ];

    info!(
        objects = 3,
        live_entities = world.entity_count(),
        plan_length = plan.len(),
        "Scenario built"
    );

    Ok(Scenario {
        states,
        state_key,
        world,
        remapping,
        plan,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tactic_types::{DataSourceId, DataSourceResolver, StateSnapshot};

    use super::*;

    #[test]
    fn scenario_matches_plan() {
        let scenario = build().unwrap();
        assert_eq!(scenario.plan.len(), 4);
        assert_eq!(scenario.remapping.len(), 1);

        let state = scenario.states.get(scenario.state_key).unwrap();
        assert_eq!(state.object_count(), 3);
        assert!(
            scenario
                .world
                .data_source(DataSourceId::Abstract(COVER_ID))
                .is_some()
        );
    }
}
