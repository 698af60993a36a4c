use bevy::prelude::Vec3;

/// Number of views; re-exported so scene code has one import site.
pub use portfolio_shared::switcher::VIEW_COUNT;

// Tween timing, in seconds.
pub const SHRINK_DURATION: f32 = 0.4;
pub const GROW_DURATION: f32 = 0.5;
pub const CAMERA_DURATION: f32 = 0.4;
pub const CAMERA_DELAY: f32 = 0.3;
/// Views 0/1 swap geometry a quarter second into the shrink.
pub const SWAP_DELAY_FAST: f32 = 0.25;
/// Views 3/4 swap after the shrink has fully settled.
pub const SWAP_DELAY_SLOW: f32 = 0.5;

// Continuous motion rates, per second.
pub const SHAPE_SPIN_RATE: f32 = 0.3; // rad/s, outer +z / inner -z
pub const STAR_DRIFT_RATE: f32 = 0.12; // rad/s on x and z
pub const PARALLAX_GAIN: f32 = 0.001; // px of cursor offset -> radians
pub const PARALLAX_EASE_RATE: f32 = 15.0; // 1/s, fraction of gap closed per second

// Cube grid (view 2).
pub const CUBE_COUNT: usize = 9;
pub const CUBE_EDGE: f32 = 0.5;
pub const CUBE_SPACING: f32 = 1.0;
pub const CUBE_GRID_X_SHIFT: f32 = -2.0;
pub const CUBE_STAGGER: f32 = 0.05;
pub const CUBE_SPAWN_DELAY: f32 = 0.5;
pub const CUBE_REMOVE_DURATION: f32 = 0.5;

// Shared object group.
pub const GROUP_HOME: Vec3 = Vec3::new(2.5, 0.0, 0.0);
pub const GROUP_SMALL_SCALE: f32 = 0.5;

// Camera frustum.
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_HOME: Vec3 = Vec3::new(0.0, 0.0, 7.5);

// Starfield cloud, spread over [-STAR_SPREAD/2, STAR_SPREAD/2] per axis.
pub const STAR_SPREAD: f32 = 10.0;
pub const STAR_RADIUS: f32 = 0.035;

/// Per-view transition constants. Mesh selection lives with the mesh bank;
/// everything spatial and temporal is here.
#[derive(Clone, Copy)]
pub struct ViewSpec {
    pub camera_target: Vec3,
    /// `None` leaves the group where the previous view put it.
    pub group_position: Option<Vec3>,
    /// When the geometry/material swap happens, relative to routine start.
    pub swap_delay: f32,
    pub camera_delay: f32,
    pub wire_color: u32,
}

pub const VIEWS: [ViewSpec; VIEW_COUNT] = [
    ViewSpec {
        camera_target: Vec3::new(0.0, 0.0, 7.5),
        group_position: Some(Vec3::new(2.5, 0.0, 0.0)),
        swap_delay: SWAP_DELAY_FAST,
        camera_delay: CAMERA_DELAY,
        wire_color: Colors::WIRE_LIGHT,
    },
    ViewSpec {
        camera_target: Vec3::new(10.0, 0.0, 0.0),
        group_position: Some(Vec3::new(2.5, 0.0, 2.5)),
        swap_delay: SWAP_DELAY_FAST,
        camera_delay: CAMERA_DELAY,
        wire_color: Colors::WIRE_DARK,
    },
    ViewSpec {
        camera_target: Vec3::new(0.0, 0.0, -10.0),
        group_position: None,
        swap_delay: SWAP_DELAY_FAST,
        camera_delay: CAMERA_DELAY,
        wire_color: Colors::WIRE_DARK,
    },
    ViewSpec {
        camera_target: Vec3::new(-10.0, 0.0, 0.0),
        group_position: Some(Vec3::new(2.5, 0.0, -4.5)),
        swap_delay: SWAP_DELAY_SLOW,
        // Camera holds until the late swap has happened.
        camera_delay: SWAP_DELAY_SLOW + CAMERA_DELAY,
        wire_color: Colors::WIRE_DARK,
    },
    ViewSpec {
        camera_target: Vec3::new(0.0, 0.0, 10.0),
        group_position: Some(Vec3::new(4.5, 0.0, -4.5)),
        swap_delay: SWAP_DELAY_SLOW,
        camera_delay: SWAP_DELAY_SLOW + CAMERA_DELAY,
        wire_color: Colors::WIRE_DARK,
    },
];

/// The five observed sections of the virtual page. The view attribute is
/// declared as text and parsed by the intersection adapter, like the DOM
/// data attributes it stands in for.
pub struct SectionDef {
    pub label: &'static str,
    pub view_attr: &'static str,
}

pub const SECTIONS: [SectionDef; VIEW_COUNT] = [
    SectionDef {
        label: "Home",
        view_attr: "0",
    },
    SectionDef {
        label: "About",
        view_attr: "1",
    },
    SectionDef {
        label: "Projects",
        view_attr: "2",
    },
    SectionDef {
        label: "Lab",
        view_attr: "3",
    },
    SectionDef {
        label: "Contact",
        view_attr: "4",
    },
];

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const BACKDROP: u32 = 0x050510;
    pub const INNER: u32 = 0xffffff;
    pub const WIRE_LIGHT: u32 = 0xffffff;
    pub const WIRE_DARK: u32 = 0x000000;
    pub const CUBE: u32 = 0xffffff;
    pub const STAR: u32 = 0xffffff;
    pub const UI_TEXT: u32 = 0xdddddd;
    pub const UI_DIM: u32 = 0x888888;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}
