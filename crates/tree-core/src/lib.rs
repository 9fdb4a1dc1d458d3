pub mod camera;
pub mod capture;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod gesture;
pub mod motion;
pub mod music;
pub mod noise;
pub mod photo;
pub mod pick;
pub mod population;
pub mod progress;
pub mod scene;
pub mod state;

pub use camera::*;
pub use capture::*;
pub use error::*;
pub use gesture::*;
pub use motion::*;
pub use music::*;
pub use photo::*;
pub use population::*;
pub use progress::*;
pub use scene::*;
pub use state::*;
