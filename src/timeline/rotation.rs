use crate::foundation::core::Rotation;

/// Display correction for previewing a clip whose effective rotation differs from
/// the source's native one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewRotation {
    /// Degrees to counter-rotate the displayed frame by.
    pub degrees: i32,
}

impl PreviewRotation {
    /// `true` when no counter-rotation is needed.
    pub fn is_identity(self) -> bool {
        self.degrees == 0
    }

    /// The displayed box must be squared so the rotated frame fits either way.
    pub fn swaps_aspect(self) -> bool {
        !self.is_identity()
    }
}

/// `native.angle - effective.angle`, where `effective` is the override if present.
pub fn preview_rotation(native: Rotation, rotation_override: Option<Rotation>) -> PreviewRotation {
    let effective = rotation_override.unwrap_or(native);
    PreviewRotation {
        degrees: native.angle_deg() - effective.angle_deg(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/rotation.rs"]
mod tests;
