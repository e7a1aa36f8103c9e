//! Narrow interfaces to the world outside the simulation
//!
//! The core never owns meshes, DOM text, or asset decoding. It pushes
//! transforms and score updates through these traits and polls the asset
//! source until each visual template has resolved.

use std::collections::HashMap;

use glam::{Quat, Vec3};

/// Opaque handle to a visual proxy owned by the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualId(pub u32);

/// Asset categories the core needs templates for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Player,
    Powerup,
    Enemy,
}

/// Scene-graph side of the core: clone templates, push transforms, detach
pub trait RenderBridge {
    /// Instantiate a new visual from a loaded template
    fn clone_visual(&mut self, template: VisualId) -> VisualId;
    /// Copy a body transform onto a visual
    fn sync_transform(&mut self, visual: VisualId, position: Vec3, orientation: Quat);
    /// Detach a visual from the scene
    fn remove_visual(&mut self, visual: VisualId);
}

/// Score readout collaborator
pub trait ScoreDisplay {
    fn set_score(&mut self, score: u64);
}

/// Terminal game-over readout collaborator
pub trait GameOverDisplay {
    fn show(&mut self, message: &str);
}

/// Resolves template visuals, possibly over several frames.
///
/// Returning `None` means the asset has not loaded yet; the session keeps
/// polling and stays inert for that category until it resolves.
pub trait AssetSource {
    fn poll_template(&mut self, kind: AssetKind) -> Option<VisualId>;
}

/// Records transforms instead of rendering. Used by the demo binary and by
/// tests that need to observe what the core pushed out.
#[derive(Debug, Default)]
pub struct HeadlessBridge {
    next_id: u32,
    /// Live visuals and their last synced transform
    pub transforms: HashMap<VisualId, (Vec3, Quat)>,
    /// Every visual that has been detached, in order
    pub removed: Vec<VisualId>,
}

impl HeadlessBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visuals currently attached
    pub fn live_count(&self) -> usize {
        self.transforms.len()
    }
}

impl RenderBridge for HeadlessBridge {
    fn clone_visual(&mut self, _template: VisualId) -> VisualId {
        let id = VisualId(self.next_id);
        self.next_id += 1;
        self.transforms.insert(id, (Vec3::ZERO, Quat::IDENTITY));
        id
    }

    fn sync_transform(&mut self, visual: VisualId, position: Vec3, orientation: Quat) {
        self.transforms.insert(visual, (position, orientation));
    }

    fn remove_visual(&mut self, visual: VisualId) {
        self.transforms.remove(&visual);
        self.removed.push(visual);
    }
}

/// Asset source whose templates are all ready immediately.
///
/// Template ids live in a reserved high range so they never collide with
/// visuals a [`HeadlessBridge`] clones from them.
#[derive(Debug, Default)]
pub struct InstantAssets;

impl AssetSource for InstantAssets {
    fn poll_template(&mut self, kind: AssetKind) -> Option<VisualId> {
        let id = match kind {
            AssetKind::Player => 0,
            AssetKind::Powerup => 1,
            AssetKind::Enemy => 2,
        };
        Some(VisualId(0xFFFF_0000 | id))
    }
}

/// Asset source that stays unresolved until told otherwise; exercises the
/// pools-before-assets no-op path.
#[derive(Debug, Default)]
pub struct PendingAssets {
    pub ready: bool,
}

impl AssetSource for PendingAssets {
    fn poll_template(&mut self, kind: AssetKind) -> Option<VisualId> {
        if self.ready {
            InstantAssets.poll_template(kind)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_bridge_tracks_live_visuals() {
        let mut bridge = HeadlessBridge::new();
        let template = VisualId(0xFFFF_0001);
        let a = bridge.clone_visual(template);
        let b = bridge.clone_visual(template);
        assert_ne!(a, b);
        assert_eq!(bridge.live_count(), 2);

        bridge.sync_transform(a, Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        assert_eq!(bridge.transforms[&a].0, Vec3::new(1.0, 2.0, 3.0));

        bridge.remove_visual(a);
        assert_eq!(bridge.live_count(), 1);
        assert_eq!(bridge.removed, vec![a]);
    }

    #[test]
    fn test_pending_assets_resolve_on_flip() {
        let mut assets = PendingAssets::default();
        assert!(assets.poll_template(AssetKind::Enemy).is_none());
        assets.ready = true;
        assert!(assets.poll_template(AssetKind::Enemy).is_some());
    }
}
