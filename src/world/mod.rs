pub mod boxes;
pub mod container;
pub mod events;
pub mod interaction;
pub mod physics;
pub mod session;

pub use events::SimEvent;
pub use physics::PhysicsWorld;
pub use session::{FrameStats, SimulationSession, Timestep};
