/// Interactive role of a console part, resolved once from its node name.
///
/// A node is interactive when its name contains `Button`, `D_Pad` or
/// `Circle`. Interactive nodes are candidates for click dispatch even when
/// no action is mapped to them, so they still shadow farther parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Directional pad: scrolls the document up or down.
    DPad,
    /// `Button_A` / `Circle`: activates the document's primary action.
    Primary,
    /// `Button_B`: scrolls the document back to the top.
    ScrollTop,
    /// Any other button; pickable, no action.
    Unmapped,
}

impl ControlKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let interactive =
            name.contains("Button") || name.contains("D_Pad") || name.contains("Circle");
        if !interactive {
            return None;
        }
        let kind = if name.contains("D_Pad") {
            Self::DPad
        } else if name.contains("Button_A") || name.contains("Circle") {
            Self::Primary
        } else if name.contains("Button_B") {
            Self::ScrollTop
        } else {
            Self::Unmapped
        };
        Some(kind)
    }
}
