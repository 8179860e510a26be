//! Click dispatch: pick the console control under the cursor and turn it into
//! an action on the embedded document.

use crate::constants::{DPAD_DEADZONE, SCROLL_STEP};
use crate::control::ControlKind;
use crate::raycast::Hit;
use crate::scene::Scene;

/// What a console control press does to the embedded document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    /// Smooth relative scroll of the scroll container; negative is up.
    ScrollBy { top: f64 },
    /// Smooth scroll of the scroll container back to the top.
    ScrollToTop,
    /// Click the primary action element and play the press visual.
    ActivatePrimary,
}

/// First hit (in the given nearest-first order) whose node is a control.
///
/// Nearer non-control hits are skipped; a nearer control always wins.
pub fn select_control_hit<'a>(scene: &Scene, hits: &'a [Hit]) -> Option<(&'a Hit, ControlKind)> {
    hits.iter()
        .find_map(|h| scene.node(h.node).control.map(|kind| (h, kind)))
}

/// Scroll delta for a D-pad press at node-local height `local_y`.
#[inline]
pub fn dpad_scroll(local_y: f32) -> Option<f64> {
    if local_y > DPAD_DEADZONE {
        Some(-SCROLL_STEP)
    } else if local_y < -DPAD_DEADZONE {
        Some(SCROLL_STEP)
    } else {
        None
    }
}

pub fn action_for_hit(scene: &Scene, hit: &Hit, kind: ControlKind) -> Option<ControlAction> {
    match kind {
        ControlKind::DPad => {
            let local = scene.world_to_local(hit.node, hit.point);
            dpad_scroll(local.y).map(|top| ControlAction::ScrollBy { top })
        }
        ControlKind::Primary => Some(ControlAction::ActivatePrimary),
        ControlKind::ScrollTop => Some(ControlAction::ScrollToTop),
        ControlKind::Unmapped => None,
    }
}

/// Full decision for one click given its nearest-first hit list.
pub fn dispatch(scene: &Scene, hits: &[Hit]) -> Option<ControlAction> {
    let (hit, kind) = select_control_hit(scene, hits)?;
    log::info!("[click] {} ({:?})", scene.node(hit.node).name, kind);
    action_for_hit(scene, hit, kind)
}

/// One step of an element lookup chain inside the embedded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Id(&'static str),
    Selector(&'static str),
    Body,
}

pub const SCROLL_CONTAINER: &[Lookup] = &[
    Lookup::Id("main-scroll"),
    Lookup::Selector(".scroll-content"),
    Lookup::Body,
];

pub const PRIMARY_ACTION: &[Lookup] = &[Lookup::Selector(".main-btn"), Lookup::Selector("button")];

/// Minimal element lookup surface of a document.
pub trait DocumentQuery {
    type Element;

    fn by_id(&self, id: &str) -> Option<Self::Element>;
    fn select(&self, selector: &str) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;
}

/// First element found along `chain`; `None` when every step misses.
pub fn resolve<D: DocumentQuery>(doc: &D, chain: &[Lookup]) -> Option<D::Element> {
    chain.iter().find_map(|step| match step {
        Lookup::Id(id) => doc.by_id(id),
        Lookup::Selector(sel) => doc.select(sel),
        Lookup::Body => doc.body(),
    })
}
