use std::ops::Deref;
use std::ops::DerefMut;

use crate::world::World;
use crate::world::WorldState;

/// Scoped mutation of a [`World`].
///
/// Snapshots the world when created and restores the snapshot when dropped, so
/// callers observe the world untouched no matter how the scope is left (`?`,
/// early returns or unwinding).
///
/// ```
/// use world_search::world::{GridWorld, World, WorldGuard, Action};
///
/// let mut world = GridWorld::try_from("0.X").unwrap();
/// let before = world.get_state();
/// {
///     let mut guard = WorldGuard::new(&mut world);
///     guard.step(&[Action::East]).unwrap();
///     assert_ne!(guard.get_state(), before);
/// }
/// assert_eq!(world.get_state(), before);
/// ```
#[derive(Debug)]
pub struct WorldGuard<'w, W>
where
    W: World,
{
    world: &'w mut W,
    saved: WorldState,
}

impl<'w, W> WorldGuard<'w, W>
where
    W: World,
{
    pub fn new(world: &'w mut W) -> Self {
        let saved = world.get_state();
        Self { world, saved }
    }
}

impl<W> Deref for WorldGuard<'_, W>
where
    W: World,
{
    type Target = W;

    fn deref(&self) -> &Self::Target {
        self.world
    }
}

impl<W> DerefMut for WorldGuard<'_, W>
where
    W: World,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.world
    }
}

impl<W> Drop for WorldGuard<'_, W>
where
    W: World,
{
    fn drop(&mut self) {
        // The snapshot came from this world, restoring it can't be rejected.
        if let Err(e) = self.world.set_state(&self.saved) {
            log::error!("Failed to restore world snapshot {:?}: {e}", self.saved);
        }
    }
}
