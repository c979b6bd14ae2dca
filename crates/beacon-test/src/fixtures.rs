//! Test fixtures for common entities and events.

use beacon_events::{EntityId, Event, EventRegistry, IdentityConverter, Value};

use crate::mocks::CollectingReporter;

/// Entity id 5, the usual player in scenarios.
#[must_use]
pub fn test_player() -> EntityId {
    EntityId::new(5)
}

/// Entity id 6, a second player that should never see the first one's events.
#[must_use]
pub fn test_other_player() -> EntityId {
    EntityId::new(6)
}

/// A `spawn` event carrying the weapon name.
#[must_use]
pub fn spawn_event(entity: EntityId, weapon: &str) -> Event {
    Event::new("spawn", &entity).with_argument(weapon)
}

/// A `hit` event carrying the damage dealt.
#[must_use]
pub fn hit_event(entity: EntityId, damage: i64) -> Event {
    Event::new("hit", &entity).with_argument(damage)
}

/// A `move` event carrying the new position.
#[must_use]
pub fn move_event(entity: EntityId, position: [f32; 3]) -> Event {
    Event::new("move", &entity).with_argument(Value::Vector(position))
}

/// A registry handing callbacks the domain values unchanged.
#[must_use]
pub fn test_registry() -> EventRegistry<IdentityConverter> {
    EventRegistry::new(IdentityConverter)
}

/// A registry whose failures land in the returned reporter.
#[must_use]
pub fn test_registry_with_reporter() -> (EventRegistry<IdentityConverter>, CollectingReporter) {
    let reporter = CollectingReporter::new();
    let registry = EventRegistry::new(IdentityConverter).with_reporter(reporter.clone());
    (registry, reporter)
}
