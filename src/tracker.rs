mod history;
mod rect;
mod selection;
mod session;
mod session_state;
mod smoother;

pub use history::{Centroid, PositionHistory};
pub use rect::Rect;
pub use selection::{Detection, select_best};
pub use session::{TrackerConfig, TrackerSession};
pub use session_state::SessionState;
pub use smoother::{DEFAULT_SMOOTHING_WINDOW, smooth_path};
