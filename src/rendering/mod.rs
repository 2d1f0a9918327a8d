pub mod camera;
pub mod camera_uniform;
pub mod engine;
pub mod frame;
pub mod light;
pub mod mesh;
pub mod scene;

pub use engine::{RenderEngine, SceneCallback};
pub use frame::FrameData;
