//! Photo ornaments.
//!
//! Placement is a pure function of the photo's index (a [`DeterministicSample`]
//! seeded with `index × 999.99`), so re-generating the gallery never moves an
//! existing photo. On top of the placement each ornament drifts in a slow orbit
//! with a vertical bob. A focused ornament instead flies to a point in front of
//! the camera and turns to face it.

use crate::focus::PhotoFocus;
use crate::growth::{GrowthState, RATE_SLOW};
use crate::reveal::RevealBand;
use crate::Animated;
use glam::{EulerRot, Mat3, Quat, Vec3 as GVec3};
use std::f32::consts::{FRAC_PI_2, TAU};
use tinsel_core::{Transform, Vec3};
use tinsel_particles::tree::TreeShape;
use tinsel_particles::{DeterministicSample, RandomSample};
use tinsel_runtime::{ExperienceSignal, FrameTick};

pub const PLACEMENT_SEED: f64 = 999.99;
/// Plane width and height before aspect correction; height drives both axes
pub const PHOTO_SIZE: [f32; 2] = [0.45, 0.525];
/// Distance in front of the camera a focused photo settles at
pub const FOCUS_DISTANCE: f32 = 8.0;
/// Photos rest this far into their layer so they sit on a branch
const LAYER_REST: f32 = 0.6;
/// Clearance between the branch silhouette and the photo
const SURFACE_CLEARANCE: f32 = 0.2;

const FOCUSED_SCALE: f32 = 4.0;
const HOVERED_SCALE: f32 = 1.5;
const SCALE_EASE: f32 = 0.1;
const FOCUS_EASE: f32 = 0.1;
const DRIFT_EASE: f32 = 0.05;

/// Render order buckets: focused photos draw over everything
pub const ORDER_FOCUSED: i32 = 9999;
pub const ORDER_HOVERED: i32 = 10;
pub const ORDER_DEFAULT: i32 = 1;

/// Where a photo hangs on the tree, in the tree group's local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentPlacement {
    pub position: [f32; 3],
    /// Euler XYZ, facing outward and tilted back along the cone slope
    pub rotation: [f32; 3],
    /// Normalized height; the photo appears once growth passes it
    pub reveal_key: f32,
}

impl OrnamentPlacement {
    pub fn for_index(index: usize, shape: &TreeShape) -> Self {
        Self::from_sample(DeterministicSample::for_index(index, PLACEMENT_SEED), shape)
    }

    pub fn from_sample(sample: DeterministicSample, shape: &TreeShape) -> Self {
        let height = shape.height;
        let layer_height = shape.layer_height();

        let y = sample.range(0, 0.1, 0.85) * height;
        // Snap down to the layer floor, then up to the resting point
        let y = y - shape.layer_t(y) * layer_height + LAYER_REST * layer_height;
        let h = y / height;

        let surface = shape.cone_radius(h) * TreeShape::branch_profile(LAYER_REST);
        let theta = sample.at(1) * TAU;
        let r = surface + SURFACE_CLEARANCE + sample.at(2) * 0.2;

        let slope = (shape.base_radius / height).atan();
        let rot_x = -slope - 0.15 + sample.centered(4, 0.1);
        let rot_y = -theta - FRAC_PI_2 + sample.centered(3, 0.15);
        let rot_z = sample.centered(5, 0.075);

        Self {
            position: [r * theta.cos(), y, r * theta.sin()],
            rotation: [rot_x, rot_y, rot_z],
            reveal_key: h,
        }
    }

    pub fn quat(&self) -> Quat {
        let [x, y, z] = self.rotation;
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }
}

/// Camera-derived focus target, expressed in the tree group's local frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusAnchor {
    /// Where a focused photo settles
    pub target: Vec3,
    /// Where a focused photo looks
    pub camera: Vec3,
}

impl FocusAnchor {
    /// Point `FOCUS_DISTANCE` along the view direction, mapped into `group`'s frame
    pub fn from_camera(camera: Vec3, view_dir: Vec3, group: &Transform) -> Self {
        let to_local = group.to_affine().inverse();
        let eye = GVec3::from(camera);
        let dir = GVec3::from(view_dir).normalize_or_zero();
        let target = eye + dir * FOCUS_DISTANCE;
        Self {
            target: to_local.transform_point3(target).into(),
            camera: to_local.transform_point3(eye).into(),
        }
    }
}

/// Per-photo drift parameters, drawn once from the shared stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftParams {
    /// Signed radians per second
    pub orbit_speed: f32,
    pub bob_speed: f32,
    pub bob_amp: f32,
    pub sway_phase: f32,
}

impl DriftParams {
    pub fn draw<R: RandomSample>(rng: &mut R) -> Self {
        let speed = rng.range(0.02, 0.07);
        let sign = if rng.next_f32() > 0.5 { 1.0 } else { -1.0 };
        Self {
            orbit_speed: speed * sign,
            bob_speed: rng.range(0.5, 1.5),
            bob_amp: rng.range(0.1, 0.3),
            sway_phase: rng.range(0.0, 10.0),
        }
    }
}

/// Rotation whose +Z axis points from `from` toward `to`, keeping +Y up
fn look_rotation(from: GVec3, to: GVec3) -> Option<Quat> {
    let z = (to - from).try_normalize()?;
    let x = GVec3::Y.cross(z).try_normalize()?;
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)))
}

#[derive(Debug, Clone)]
pub struct PhotoOrnament {
    pub url: String,
    pub placement: OrnamentPlacement,
    pub drift: DriftParams,
    initial_radius: f32,
    initial_angle: f32,
    aspect: f32,
    hovered: bool,
    growth: GrowthState,
    position: GVec3,
    rotation: Quat,
    scale: GVec3,
    visible: bool,
    render_order: i32,
    depth_test: bool,
    opacity: f32,
}

impl PhotoOrnament {
    pub fn new(url: impl Into<String>, placement: OrnamentPlacement, drift: DriftParams) -> Self {
        let [x, y, z] = placement.position;
        Self {
            url: url.into(),
            placement,
            drift,
            initial_radius: (x * x + z * z).sqrt(),
            initial_angle: z.atan2(x),
            aspect: 1.0,
            hovered: false,
            growth: GrowthState::new(RATE_SLOW),
            position: GVec3::new(x, y, z),
            rotation: placement.quat(),
            scale: GVec3::new(0.0, 0.0, 1.0),
            visible: false,
            render_order: ORDER_DEFAULT,
            depth_test: true,
            opacity: 1.0,
        }
    }

    /// Image dimensions once known; degenerate sizes fall back to square
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        self.aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Interaction is only possible once the photo has started to appear
    pub fn is_revealed(&self) -> bool {
        self.growth.value() > self.placement.reveal_key
    }

    /// Returns whether the hover took
    pub fn pointer_enter(&mut self) -> bool {
        self.hovered = self.is_revealed();
        self.hovered
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn growth(&self) -> f32 {
        self.growth.value()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render_order(&self) -> i32 {
        self.render_order
    }

    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn position(&self) -> Vec3 {
        self.position.into()
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale.into()
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position.into())
            .with_rotation(self.rotation)
            .with_scale(self.scale.into())
    }

    /// Orbit position and outward-facing sway at time `t`
    fn drift_pose(&self, t: f32) -> (GVec3, Quat) {
        let d = &self.drift;
        let angle = self.initial_angle + t * d.orbit_speed;
        let y = self.placement.position[1] + (t * d.bob_speed + d.sway_phase).sin() * d.bob_amp;
        let position = GVec3::new(
            self.initial_radius * angle.cos(),
            y,
            self.initial_radius * angle.sin(),
        );

        let face_out = -angle - FRAC_PI_2;
        let sway_x = (t * 0.5 + d.sway_phase).sin() * 0.1;
        let sway_z = (t * 0.3 + d.sway_phase).cos() * 0.1;
        let rotation = Quat::from_euler(EulerRot::XYZ, sway_x, face_out, sway_z);
        (position, rotation)
    }

    pub fn advance(
        &mut self,
        tick: &FrameTick,
        signal: &ExperienceSignal,
        focused: bool,
        anchor: &FocusAnchor,
        lights_on: bool,
    ) {
        let growth = self.growth.follow(signal);
        let reveal = RevealBand::PHOTO.visibility(self.placement.reveal_key, growth);

        let interaction = if focused {
            FOCUSED_SCALE
        } else if self.hovered {
            HOVERED_SCALE
        } else {
            1.0
        };
        let base = PHOTO_SIZE[1];
        let s = interaction * reveal;
        let target_scale = GVec3::new(base * self.aspect * s, base * s, 1.0);
        self.scale = self.scale.lerp(target_scale, SCALE_EASE);

        self.visible = reveal > crate::reveal::HIDDEN_EPSILON;
        self.render_order = if focused {
            ORDER_FOCUSED
        } else if self.hovered {
            ORDER_HOVERED
        } else {
            ORDER_DEFAULT
        };
        self.depth_test = !focused;
        self.opacity = if lights_on { 1.0 } else { 0.0 };

        if focused {
            self.position = self.position.lerp(anchor.target.into(), FOCUS_EASE);
            if let Some(look) = look_rotation(self.position, anchor.camera.into()) {
                self.rotation = look;
            }
        } else {
            let (position, rotation) = self.drift_pose(tick.time);
            self.position = self.position.lerp(position, DRIFT_EASE);
            self.rotation = self.rotation.slerp(rotation, DRIFT_EASE);
        }
    }
}

/// All photo ornaments plus the shared focus slot
#[derive(Debug, Clone, Default)]
pub struct PhotoGallery {
    ornaments: Vec<PhotoOrnament>,
    focus: PhotoFocus,
    anchor: FocusAnchor,
    lights_on: bool,
}

impl PhotoGallery {
    pub fn new<R: RandomSample>(urls: &[String], shape: &TreeShape, rng: &mut R) -> Self {
        let mut gallery = Self {
            lights_on: true,
            ..Default::default()
        };
        gallery.set_photos(urls, shape, rng);
        gallery
    }

    /// Sync with a new photo list. Placements are index-stable, and an
    /// ornament whose url is unchanged keeps its growth and drift.
    pub fn set_photos<R: RandomSample>(&mut self, urls: &[String], shape: &TreeShape, rng: &mut R) {
        let mut previous = std::mem::take(&mut self.ornaments).into_iter();
        self.ornaments = urls
            .iter()
            .enumerate()
            .map(|(i, url)| match previous.next() {
                Some(kept) if &kept.url == url => kept,
                _ => PhotoOrnament::new(
                    url.clone(),
                    OrnamentPlacement::for_index(i, shape),
                    DriftParams::draw(rng),
                ),
            })
            .collect();
        self.focus.retain_below(self.ornaments.len());
        log::info!("[photos] {} ornaments placed", self.ornaments.len());
    }

    pub fn ornaments(&self) -> &[PhotoOrnament] {
        &self.ornaments
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PhotoOrnament> {
        self.ornaments.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.ornaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ornaments.is_empty()
    }

    pub fn focus(&self) -> &PhotoFocus {
        &self.focus
    }

    pub fn set_anchor(&mut self, anchor: FocusAnchor) {
        self.anchor = anchor;
    }

    pub fn set_lights(&mut self, on: bool) {
        self.lights_on = on;
    }

    pub fn pointer_enter(&mut self, index: usize) -> bool {
        self.ornaments
            .get_mut(index)
            .is_some_and(|o| o.pointer_enter())
    }

    pub fn pointer_leave(&mut self, index: usize) {
        if let Some(o) = self.ornaments.get_mut(index) {
            o.pointer_leave();
        }
    }

    /// Click on a photo. Hidden photos ignore clicks.
    pub fn click(&mut self, index: usize) -> bool {
        match self.ornaments.get(index) {
            Some(o) if o.is_revealed() => {
                self.focus.toggle(index);
                true
            }
            _ => false,
        }
    }

    pub fn background_click(&mut self) {
        self.focus.dismiss();
    }

    /// Pointer cursor while any photo is hovered
    pub fn wants_pointer_cursor(&self) -> bool {
        self.ornaments.iter().any(|o| o.is_hovered())
    }
}

impl Animated for PhotoGallery {
    fn update(&mut self, tick: &FrameTick, signal: &ExperienceSignal) {
        for (i, ornament) in self.ornaments.iter_mut().enumerate() {
            let focused = self.focus.is_active(i);
            ornament.advance(tick, signal, focused, &self.anchor, self.lights_on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tinsel_particles::ParticleRng;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("photo-{i}.jpg")).collect()
    }

    fn run(gallery: &mut PhotoGallery, from: u64, frames: u64, active: bool) {
        let signal = ExperienceSignal { active, trigger: 1 };
        for frame in from..from + frames {
            let tick = FrameTick {
                time: frame as f32 / 60.0,
                delta: 1.0 / 60.0,
                frame,
            };
            gallery.update(&tick, &signal);
        }
    }

    #[test]
    fn placement_sits_on_a_layer() {
        let shape = TreeShape::default();
        for i in 0..20 {
            let p = OrnamentPlacement::for_index(i, &shape);
            let y = p.position[1];
            let t = shape.layer_t(y);
            assert!((t - LAYER_REST).abs() < 1e-3, "index {i} layer_t {t}");
            assert!((0.05..=0.9).contains(&p.reveal_key));
            assert!((p.reveal_key - y / shape.height).abs() < 1e-6);
        }
    }

    #[test]
    fn placement_hangs_outside_the_branches() {
        let shape = TreeShape::default();
        for i in 0..20 {
            let p = OrnamentPlacement::for_index(i, &shape);
            let [x, _, z] = p.position;
            let r = (x * x + z * z).sqrt();
            let surface = shape.cone_radius(p.reveal_key) * TreeShape::branch_profile(LAYER_REST);
            assert!(r >= surface + 0.2 - 1e-4 && r <= surface + 0.4 + 1e-4);
        }
    }

    #[test]
    fn first_placement_matches_hash() {
        // index 0 has seed 0: draw n is fract(sin(n) * 43758.5453)
        let shape = TreeShape::default();
        let p = OrnamentPlacement::for_index(0, &shape);
        let y0 = 0.1 * 12.0;
        let floor = y0 - shape.layer_t(y0) * 0.75;
        assert!((p.position[1] - (floor + 0.45)).abs() < 1e-4);
    }

    #[test]
    fn zero_image_size_is_square() {
        let placement = OrnamentPlacement::for_index(0, &TreeShape::default());
        let mut o = PhotoOrnament::new("a.png", placement, DriftParams::draw(&mut ParticleRng::new(1)));
        o.set_image_size(0, 0);
        assert_eq!(o.aspect(), 1.0);
        o.set_image_size(1600, 800);
        assert_eq!(o.aspect(), 2.0);
        o.set_image_size(800, 0);
        assert_eq!(o.aspect(), 1.0);
    }

    #[test]
    fn drift_params_in_range() {
        let mut rng = ParticleRng::new(77);
        for _ in 0..100 {
            let d = DriftParams::draw(&mut rng);
            assert!((0.02..0.07).contains(&d.orbit_speed.abs()));
            assert!((0.5..1.5).contains(&d.bob_speed));
            assert!((0.1..0.3).contains(&d.bob_amp));
        }
    }

    #[test]
    fn hidden_photos_ignore_pointer() {
        let mut g = PhotoGallery::new(&urls(3), &TreeShape::default(), &mut ParticleRng::new(4));
        run(&mut g, 0, 1, false);
        assert!(!g.pointer_enter(0));
        assert!(!g.click(0));
        assert_eq!(g.focus().active(), None);
        assert!(!g.wants_pointer_cursor());
        assert!(g.ornaments().iter().all(|o| !o.is_visible()));
    }

    #[test]
    fn photos_reveal_and_focus() {
        let mut g = PhotoGallery::new(&urls(3), &TreeShape::default(), &mut ParticleRng::new(4));
        run(&mut g, 0, 600, true);
        assert!(g.ornaments().iter().all(|o| o.is_visible()));

        assert!(g.pointer_enter(1));
        assert!(g.wants_pointer_cursor());
        assert!(g.click(1));
        assert_eq!(g.focus().active(), Some(1));

        g.set_anchor(FocusAnchor {
            target: Vec3::new(0.0, 5.0, 8.0),
            camera: Vec3::new(0.0, 5.0, 16.0),
        });
        run(&mut g, 600, 120, true);
        let o = &g.ornaments()[1];
        assert_eq!(o.render_order(), ORDER_FOCUSED);
        assert!(!o.depth_test());
        let p = o.position();
        assert!((p.z - 8.0).abs() < 1e-3 && (p.y - 5.0).abs() < 1e-3);
        // facing the camera: local +Z points along +Z
        let forward = o.rotation() * GVec3::Z;
        assert!(forward.dot(GVec3::Z) > 0.999);
        assert!(o.scale().y > PHOTO_SIZE[1] * 3.9);

        let other = &g.ornaments()[0];
        assert_eq!(other.render_order(), ORDER_DEFAULT);
        assert!(other.depth_test());

        g.background_click();
        assert_eq!(g.focus().active(), None);
    }

    #[test]
    fn photos_blank_with_lights_off() {
        let mut g = PhotoGallery::new(&urls(1), &TreeShape::default(), &mut ParticleRng::new(4));
        g.set_lights(false);
        run(&mut g, 0, 2, true);
        assert_eq!(g.ornaments()[0].opacity(), 0.0);
    }

    #[test]
    fn shrinking_gallery_drops_focus() {
        let shape = TreeShape::default();
        let mut rng = ParticleRng::new(4);
        let mut g = PhotoGallery::new(&urls(4), &shape, &mut rng);
        run(&mut g, 0, 600, true);
        assert!(g.click(3));
        g.set_photos(&urls(2), &shape, &mut rng);
        assert_eq!(g.focus().active(), None);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn appending_keeps_existing_ornaments() {
        let shape = TreeShape::default();
        let mut rng = ParticleRng::new(4);
        let mut g = PhotoGallery::new(&urls(2), &shape, &mut rng);
        run(&mut g, 0, 100, true);
        let grown = g.ornaments()[0].growth();
        let drift = g.ornaments()[1].drift;

        g.set_photos(&urls(3), &shape, &mut rng);
        assert_eq!(g.ornaments()[0].growth(), grown);
        assert_eq!(g.ornaments()[1].drift, drift);
        assert_eq!(g.ornaments()[2].growth(), 0.0);
        assert_eq!(g.ornaments()[2].placement, OrnamentPlacement::for_index(2, &shape));
    }

    #[test]
    fn anchor_maps_into_group_frame() {
        let group = Transform::from_position(Vec3::new(0.0, -3.0, 0.0)).with_scale(Vec3::splat(1.5));
        let anchor = FocusAnchor::from_camera(Vec3::new(0.0, 2.0, 16.0), Vec3::new(0.0, 0.0, -1.0), &group);
        assert!((anchor.target.z - 8.0 / 1.5).abs() < 1e-4);
        assert!((anchor.target.y - 5.0 / 1.5).abs() < 1e-4);
        assert!((anchor.camera.z - 16.0 / 1.5).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn placement_is_pure(index in 0usize..500) {
            let shape = TreeShape::default();
            let a = OrnamentPlacement::for_index(index, &shape);
            let b = OrnamentPlacement::for_index(index, &shape);
            prop_assert_eq!(a.position.map(f32::to_bits), b.position.map(f32::to_bits));
            prop_assert_eq!(a.rotation.map(f32::to_bits), b.rotation.map(f32::to_bits));
            prop_assert!(a.position.iter().all(|v| v.is_finite()));
        }
    }
}
