use crate::rendering::scene::Object;

/// Everything the renderer draws.
///
/// Panels are written once when the container is built. Box meshes are
/// indexed in the same order as the session's dynamic bodies and are only
/// ever appended.
#[derive(Debug, Default)]
pub struct SceneGraph {
    panels: Vec<Object>,
    boxes: Vec<Object>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_panel(&mut self, object: Object) -> usize {
        self.panels.push(object);
        self.panels.len() - 1
    }

    pub fn add_box(&mut self, object: Object) -> usize {
        self.boxes.push(object);
        self.boxes.len() - 1
    }

    pub fn panels(&self) -> &[Object] {
        &self.panels
    }

    pub fn boxes(&self) -> &[Object] {
        &self.boxes
    }

    pub fn box_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.boxes.get_mut(index)
    }
}
