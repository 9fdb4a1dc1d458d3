// DOM ids and capture settings for the web front-end.
// Scene tuning lives in `tree_core::constants`.

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "webcam";
pub const MUSIC_ID: &str = "bg-music";
pub const STATUS_ID: &str = "gesture-status";
pub const PHOTO_INPUT_ID: &str = "photo-input";
pub const PROGRESS_SLIDER_ID: &str = "progress-slider";

// Capture request
pub const VIDEO_WIDTH: u32 = 640;
pub const VIDEO_HEIGHT: u32 = 480;
pub const VIDEO_FACING_MODE: &str = "user";

// Global objects provided by the page's JS collaborators
pub const CLASSIFIER_GLOBAL: &str = "treeGestures";
pub const RENDERER_GLOBAL: &str = "treeRenderer";

// Keyboard
pub const KEY_PROGRESS_STEP: f32 = 0.05; // ArrowUp/ArrowDown nudge

// Largest frame step fed to the scene (tab switches, debugger pauses)
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Overlay text
pub const STATUS_LOADING: &str = "Loading AI…";
pub const STATUS_UNAVAILABLE: &str = "Gesture control unavailable";
