//! Capability registry
//!
//! Every behaviour a component can opt into is listed once in
//! [`Capability::ALL`]. A component reports the set it implements through
//! [`Component::capabilities`](super::Component::capabilities) and exposes each
//! member through the matching `as_*` accessor. [`audit`] checks that the two
//! agree.

use bitflags::bitflags;

use super::Component;

bitflags! {
    /// A set of capabilities
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Has a string identifier
        const IDENTIFY = 1 << 0;
        /// Reports a 2D bounding rectangle
        const BOUNDING_RECT = 1 << 1;
        /// Reports a 3D bounding box
        const BOUNDING_BOX = 1 << 2;
        /// Answers collision tests
        const COLLIDE = 1 << 3;
        /// Can be disabled (stops updating)
        const DISABLE = 1 << 4;
        /// Issues draw calls
        const DRAW = 1 << 5;
        /// Can be hidden (stops drawing)
        const HIDE = 1 << 6;
        /// Resolves assets once before the first frame
        const LOAD = 1 << 7;
        /// Initialises itself from the game after loading
        const PREPARE = 1 << 8;
        /// Reports immediate children
        const SCAN = 1 << 9;
        /// Supplies a local transform
        const TRANSFORM = 1 << 10;
        /// Supplies a parallax factor
        const PARALLAX = 1 << 11;
        /// Supplies a draw-order key
        const Z_POSITION = 1 << 12;
        /// Runs once per frame
        const UPDATE = 1 << 13;
    }
}

/// A single named capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See [`super::Identifier`]
    Identify,
    /// See [`super::BoundingRecter`]
    BoundingRect,
    /// See [`super::BoundingBoxer`]
    BoundingBox,
    /// See [`super::Collider`]
    Collide,
    /// See [`super::Disabler`]
    Disable,
    /// See [`super::Drawer`]
    Draw,
    /// See [`super::Hider`]
    Hide,
    /// See [`super::Loader`]
    Load,
    /// See [`super::Prepper`]
    Prepare,
    /// See [`super::Scanner`]
    Scan,
    /// See [`super::Transformer`]
    Transform,
    /// See [`super::ParallaxScaler`]
    Parallax,
    /// See [`super::ZPositioner`]
    ZPosition,
    /// See [`super::Updater`]
    Update,
}

impl Capability {
    /// Every recognised capability
    pub const ALL: [Self; 14] = [
        Self::Identify,
        Self::BoundingRect,
        Self::BoundingBox,
        Self::Collide,
        Self::Disable,
        Self::Draw,
        Self::Hide,
        Self::Load,
        Self::Prepare,
        Self::Scan,
        Self::Transform,
        Self::Parallax,
        Self::ZPosition,
        Self::Update,
    ];

    /// The set containing only this capability
    pub const fn flag(self) -> Capabilities {
        match self {
            Self::Identify => Capabilities::IDENTIFY,
            Self::BoundingRect => Capabilities::BOUNDING_RECT,
            Self::BoundingBox => Capabilities::BOUNDING_BOX,
            Self::Collide => Capabilities::COLLIDE,
            Self::Disable => Capabilities::DISABLE,
            Self::Draw => Capabilities::DRAW,
            Self::Hide => Capabilities::HIDE,
            Self::Load => Capabilities::LOAD,
            Self::Prepare => Capabilities::PREPARE,
            Self::Scan => Capabilities::SCAN,
            Self::Transform => Capabilities::TRANSFORM,
            Self::Parallax => Capabilities::PARALLAX,
            Self::ZPosition => Capabilities::Z_POSITION,
            Self::Update => Capabilities::UPDATE,
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identify => "Identifier",
            Self::BoundingRect => "BoundingRecter",
            Self::BoundingBox => "BoundingBoxer",
            Self::Collide => "Collider",
            Self::Disable => "Disabler",
            Self::Draw => "Drawer",
            Self::Hide => "Hider",
            Self::Load => "Loader",
            Self::Prepare => "Prepper",
            Self::Scan => "Scanner",
            Self::Transform => "Transformer",
            Self::Parallax => "ParallaxScaler",
            Self::ZPosition => "ZPositioner",
            Self::Update => "Updater",
        }
    }

    /// Whether `component` actually exposes this capability through its accessor
    pub fn exposed_by(self, component: &mut dyn Component) -> bool {
        match self {
            Self::Identify => component.as_identifier().is_some(),
            Self::BoundingRect => component.as_bounding_rect().is_some(),
            Self::BoundingBox => component.as_bounding_box().is_some(),
            Self::Collide => component.as_collider().is_some(),
            Self::Disable => component.as_disabler().is_some(),
            Self::Draw => component.as_drawer().is_some(),
            Self::Hide => component.as_hider().is_some(),
            Self::Load => component.as_loader().is_some(),
            Self::Prepare => component.as_prepper().is_some(),
            Self::Scan => component.as_scanner().is_some(),
            Self::Transform => component.as_transformer().is_some(),
            Self::Parallax => component.as_parallax().is_some(),
            Self::ZPosition => component.as_z_positioner().is_some(),
            Self::Update => component.as_updater().is_some(),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities a component declares but does not expose, and vice versa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Declared by `capabilities()` but the accessor returns `None`
    pub missing: Capabilities,
    /// Exposed by an accessor but not declared
    pub undeclared: Capabilities,
}

impl AuditReport {
    /// Whether declaration and accessors agree
    pub const fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.undeclared.is_empty()
    }
}

/// Compare a component's declared capabilities against its accessors
pub fn audit(component: &mut dyn Component) -> AuditReport {
    let declared = component.capabilities();
    let mut report = AuditReport::default();
    for cap in Capability::ALL {
        match (declared.contains(cap.flag()), cap.exposed_by(component)) {
            (true, false) => report.missing |= cap.flag(),
            (false, true) => report.undeclared |= cap.flag(),
            _ => {}
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Hidden, Hider, Id, Identifier};

    struct Honest {
        id: Id,
        hidden: Hidden,
    }

    impl Component for Honest {
        fn name(&self) -> &'static str {
            "Honest"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::IDENTIFY | Capabilities::HIDE
        }

        fn as_identifier(&self) -> Option<&dyn Identifier> {
            Some(&self.id)
        }

        fn as_hider(&self) -> Option<&dyn Hider> {
            Some(&self.hidden)
        }

        fn as_hider_mut(&mut self) -> Option<&mut dyn Hider> {
            Some(&mut self.hidden)
        }
    }

    struct Liar;

    impl Component for Liar {
        fn name(&self) -> &'static str {
            "Liar"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities::DRAW
        }
    }

    #[test]
    fn test_all_flags_are_distinct() {
        let union = Capability::ALL
            .iter()
            .fold(Capabilities::empty(), |acc, c| acc | c.flag());
        assert_eq!(union, Capabilities::all());
        assert_eq!(union.bits().count_ones() as usize, Capability::ALL.len());
    }

    #[test]
    fn test_audit_flags_declared_but_missing() {
        let mut honest = Honest {
            id: Id::new("h"),
            hidden: Hidden::default(),
        };
        assert!(audit(&mut honest).is_clean());
        assert!(honest.implements(Capability::Hide));
        assert!(!honest.implements(Capability::Draw));

        let report = audit(&mut Liar);
        assert_eq!(report.missing, Capabilities::DRAW);
        assert!(report.undeclared.is_empty());
    }
}
