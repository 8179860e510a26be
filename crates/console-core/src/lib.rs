pub mod camera;
pub mod constants;
pub mod control;
pub mod css3d;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod mode;
pub mod orbit;
pub mod pointer;
pub mod raycast;
pub mod scene;
pub mod stage;
pub mod view;

pub use camera::PerspectiveCamera;
pub use control::ControlKind;
pub use dispatch::ControlAction;
pub use error::LoadError;
pub use loader::{load_glb, LoadToken, ModelAsset};
pub use mode::ViewMode;
pub use scene::{NodeId, Scene, Transform};
pub use stage::Stage;
