mod camera;
mod component;
mod controls;
mod error;
mod overlay;
mod render;
mod scene;
mod state;
mod types;
mod view;

pub use camera::Camera;
pub use component::{FrameLoop, Graph3dCanvas};
pub use controls::OrbitControls;
pub use error::{Graph3dError, Result};
pub use scene::{LineSegment, SceneGraph, SceneNode, BACKGROUND_COLOR, LABEL_OFFSET, LINE_COLOR};
pub use state::Graph3dState;
pub use types::{GraphData, GraphLink, GraphNode};
pub use view::Graph3dView;
