mod core;
mod cubes;
mod hud;
mod input;
mod sections;
mod shapes;
mod starfield;
mod transitions;
mod tween;

pub use self::core::CorePlugin;
pub use self::cubes::CubesPlugin;
pub use self::hud::HudPlugin;
pub use self::input::InputPlugin;
pub use self::sections::SectionsPlugin;
pub use self::shapes::ShapesPlugin;
pub use self::starfield::StarfieldPlugin;
pub use self::transitions::ViewsPlugin;
pub use self::tween::TweenPlugin;

pub(crate) use self::core::UpdateSet;
