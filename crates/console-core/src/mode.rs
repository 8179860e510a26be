/// Class put on `<body>` while the page shows the flat 2D layout.
pub const FLAT_MODE_CLASS: &str = "flat-mode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Immersive,
    Flat,
}

/// Toggle button icon/label and controller state for a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChrome {
    pub icon_class: &'static str,
    pub label: &'static str,
    pub controls_enabled: bool,
}

impl ViewMode {
    #[inline]
    pub fn from_flat(flat: bool) -> Self {
        if flat {
            Self::Flat
        } else {
            Self::Immersive
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Immersive => Self::Flat,
            Self::Flat => Self::Immersive,
        }
    }

    #[inline]
    pub fn is_flat(self) -> bool {
        self == Self::Flat
    }

    pub fn chrome(self) -> ModeChrome {
        match self {
            Self::Flat => ModeChrome {
                icon_class: "fas fa-cube",
                label: "RETURN TO 3D",
                controls_enabled: false,
            },
            Self::Immersive => ModeChrome {
                icon_class: "fas fa-expand",
                label: "SWITCH TO 2D",
                controls_enabled: true,
            },
        }
    }
}
