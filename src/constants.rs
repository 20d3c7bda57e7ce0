/// Page wiring and palette for the web front end.
///
/// Engine tuning lives in `starfield_core::constants`; this file only holds
/// what is specific to the page the starfield is embedded in.
// Elements
pub const CANVAS_ID: &str = "bg-stars";
pub const HERO_SELECTOR: &str = ".hero-visual";
pub const LIT_SELECTOR: &str = ".planet, .satellite";

// Assets
pub const SPRITE_URL: &str = "/assets/cat-astronaut.png";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Palette (rgb triples; alpha is supplied per draw)
pub const STAR_RGB: &str = "230,240,255";
pub const LINK_RGB: &str = "0,212,255";
pub const STREAK_RGB: &str = "230,240,255";
pub const GLOW_INNER: &str = "rgba(155, 94, 255, 0.08)";
pub const GLOW_OUTER: &str = "rgba(0, 0, 0, 0)";

// Background glow geometry, as fractions of the surface
pub const GLOW_INNER_CENTER: [f64; 2] = [0.2, 0.2];
pub const GLOW_OUTER_CENTER: [f64; 2] = [0.5, 0.6];
pub const GLOW_OUTER_RADIUS: f64 = 0.7; // of the longer side

// Hero lighting: custom property = BASE + SPAN * pointer fraction (percent)
pub const LIGHT_X_BASE: f32 = 25.0;
pub const LIGHT_X_SPAN: f32 = 50.0;
pub const LIGHT_Y_BASE: f32 = 28.0;
pub const LIGHT_Y_SPAN: f32 = 44.0;
pub const LIGHT_INITIAL: [f32; 2] = [30.0, 35.0];
