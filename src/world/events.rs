/// Input the UI hands to the simulation and the viewer.
///
/// These replace live data binding: every change the user makes becomes one
/// explicit event, dispatched once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Double-click on the viewport.
    Throw,
    SetGravity(f32),
    SetThrowForce(f32),
    /// Viewport size in physical pixels.
    Resize { width: u32, height: u32 },
}

impl SimEvent {
    /// Whether the event targets the simulation rather than the camera.
    pub fn is_simulation(&self) -> bool {
        !matches!(self, SimEvent::Resize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resize_belongs_to_the_viewer() {
        assert!(SimEvent::Throw.is_simulation());
        assert!(SimEvent::SetGravity(1.0).is_simulation());
        assert!(SimEvent::SetThrowForce(1.0).is_simulation());
        assert!(!SimEvent::Resize { width: 1, height: 1 }.is_simulation());
    }
}
