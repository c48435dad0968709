//! Scene orchestration.
//!
//! `ChristmasScene` owns the experience controller, every animated entity and
//! the ambient layer. Each frame it routes queued events, advances the
//! controller, then hands the controller's read-only signal to every entity.
//! Config changes are split into shape-affecting ones (full regeneration of the
//! affected particle set) and appearance-only ones (uniforms and flags).

use crate::ambient::AmbientLayer;
use crate::camera::CameraRig;
use crate::config::{ConfigCommand, ExperienceConfig, TreeShapeKey};
use crate::music::{MusicCommand, MusicGate};
use serde::Serialize;
use tinsel_animation::{
    Animated, FocusAnchor, GiftGroup, PhotoGallery, RibbonEntity, StarEntity, TreeEntity,
};
use tinsel_core::{Result, Transform, Vec3};
use tinsel_particles::{ParticleRng, ShadingPalette, SparkleStage};
use tinsel_runtime::{
    EventBus, ExperienceController, ExperiencePhase, FrameClock, FrameTick, RuntimeSystem,
    SceneEvent,
};

/// The rotating group sits below the origin so the tree is framed by the camera
pub const GROUP_POSITION: Vec3 = Vec3::new(0.0, -3.0, 0.0);
/// Tree, ribbon, star and photos are drawn at this scale inside the group
pub const TREE_SCALE: f32 = 1.5;

/// What the renderer needs for one photo ornament
#[derive(Debug, Clone, Serialize)]
pub struct PhotoFrame {
    pub visible: bool,
    pub transform: Transform,
    pub render_order: i32,
    pub depth_test: bool,
    pub opacity: f32,
}

/// Per-frame output of the scene
#[derive(Debug, Clone, Serialize)]
pub struct SceneFrame {
    pub frame: u64,
    pub time: f32,
    pub phase: ExperiencePhase,
    pub trigger: u32,
    pub panel_visible: bool,
    pub group_rotation: f32,
    pub tree_opacity: f32,
    pub ribbon_growth: f32,
    pub ribbon_drawn: bool,
    pub star_scale: f32,
    pub star_light: f32,
    pub gift_scale: f32,
    pub photos: Vec<PhotoFrame>,
    pub focused_photo: Option<usize>,
    pub pointer_cursor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<MusicCommand>,
}

pub struct ChristmasScene {
    config: ExperienceConfig,
    controller: ExperienceController,
    clock: FrameClock,
    events: EventBus,
    rng: ParticleRng,
    pub camera: CameraRig,
    group_rotation: f32,
    tree: TreeEntity,
    ribbon: RibbonEntity,
    star: StarEntity,
    gifts: GiftGroup,
    photos: PhotoGallery,
    ambient: AmbientLayer,
    music: MusicGate,
    tree_key: TreeShapeKey,
}

impl ChristmasScene {
    pub fn new(config: ExperienceConfig) -> Self {
        Self::with_rng(config, ParticleRng::from_entropy())
    }

    /// Reproducible generation, for tests and the CLI
    pub fn with_seed(config: ExperienceConfig, seed: u32) -> Self {
        Self::with_rng(config, ParticleRng::new(seed))
    }

    fn with_rng(config: ExperienceConfig, mut rng: ParticleRng) -> Self {
        let shape = config.tree_shape();
        let palette = ShadingPalette::new(config.tree_color(), config.star_color());

        let tree = TreeEntity::new(shape, &palette, &mut rng);
        let ribbon = RibbonEntity::new(&shape, config.ribbon_color(), &mut rng);
        let star = StarEntity::new(shape.height, config.star_color(), &mut rng);
        let gifts = GiftGroup::new(&mut rng);
        let photos = PhotoGallery::new(&config.photo_urls, &shape, &mut rng);
        let ambient = AmbientLayer::new(config.snow_count(), config.star_count(), &mut rng);

        let mut scene = Self {
            controller: ExperienceController::new(config.countdown_seconds()),
            clock: FrameClock::new(),
            events: EventBus::new(),
            camera: CameraRig::default(),
            group_rotation: 0.0,
            tree,
            ribbon,
            star,
            gifts,
            photos,
            ambient,
            music: MusicGate::new(),
            tree_key: config.tree_shape_key(),
            config,
            rng,
        };
        scene.sync_config();
        scene
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn controller(&self) -> &ExperienceController {
        &self.controller
    }

    pub fn tree(&self) -> &TreeEntity {
        &self.tree
    }

    pub fn ribbon(&self) -> &RibbonEntity {
        &self.ribbon
    }

    pub fn star(&self) -> &StarEntity {
        &self.star
    }

    pub fn gifts(&self) -> &GiftGroup {
        &self.gifts
    }

    pub fn photos(&self) -> &PhotoGallery {
        &self.photos
    }

    pub fn photos_mut(&mut self) -> &mut PhotoGallery {
        &mut self.photos
    }

    pub fn ambient(&self) -> &AmbientLayer {
        &self.ambient
    }

    /// Queue a user request for the next frame
    pub fn push_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Apply a control-panel action; invalid actions leave the scene unchanged
    pub fn apply(&mut self, command: ConfigCommand) -> Result<()> {
        self.config.apply(command)?;
        self.sync_config();
        Ok(())
    }

    /// Replace the whole configuration, e.g. after reloading the file.
    /// The controller-owned fields are kept.
    pub fn set_config(&mut self, mut config: ExperienceConfig) {
        config.is_experience_active = self.config.is_experience_active;
        config.ribbon_animation_trigger = self.config.ribbon_animation_trigger;
        self.config = config;
        log::info!("[scene] configuration reloaded");
        self.sync_config();
    }

    /// Rotating group: position and yaw, unscaled
    pub fn group_transform(&self) -> Transform {
        Transform::from_position(GROUP_POSITION).with_rotation(Transform::yaw(self.group_rotation))
    }

    /// Frame of the tree, ribbon, star and photos
    pub fn tree_transform(&self) -> Transform {
        self.group_transform().with_scale(Vec3::splat(TREE_SCALE))
    }

    /// Push config state into entities, regenerating only what changed shape
    fn sync_config(&mut self) {
        let shape = self.config.tree_shape();

        let key = self.config.tree_shape_key();
        if key != self.tree_key {
            let palette = ShadingPalette::new(self.config.tree_color(), self.config.star_color());
            self.tree.regenerate(shape, &palette, &mut self.rng);
            self.tree_key = key;
        }

        let (snow, stars) =
            self.ambient
                .resize(self.config.snow_count(), self.config.star_count(), &mut self.rng);
        if snow || stars {
            log::debug!("[scene] ambient resized (snow {snow}, stars {stars})");
        }
        self.photos
            .set_photos(&self.config.photo_urls, &shape, &mut self.rng);

        let lights = self.config.lights_on;
        self.tree.set_lights(lights);
        self.tree.set_reveal_with_growth(self.config.reveal_tree_with_growth);
        self.tree
            .set_glitter(self.config.glitter.then(SparkleStage::default));
        self.ribbon.set_lights(lights);
        self.ribbon.set_color(self.config.ribbon_color());
        self.star.set_color(self.config.star_color());
        self.gifts.set_follow_growth(self.config.gifts_follow_growth);
        self.photos.set_lights(lights);
        self.ambient.set_lights(lights);
        self.ambient.set_snow(self.config.snow_enabled);

        self.controller
            .set_countdown_seconds(self.config.countdown_seconds());
    }

    fn route_event(&mut self, event: SceneEvent) {
        if self.controller.handle_event(event) {
            return;
        }
        match event {
            SceneEvent::PointerEnter(i) => {
                self.photos.pointer_enter(i);
            }
            SceneEvent::PointerLeave(i) => self.photos.pointer_leave(i),
            SceneEvent::PointerClick(i) => {
                if !self.photos.click(i) {
                    log::debug!("[scene] click on hidden photo {i} ignored");
                }
            }
            SceneEvent::BackgroundClick => self.photos.background_click(),
            _ => {}
        }
    }

    /// Advance by `dt` seconds and return the frame output
    pub fn step(&mut self, dt: f64) -> SceneFrame {
        let tick = self.clock.advance(dt);
        self.run_frame(&tick)
    }

    fn run_frame(&mut self, tick: &FrameTick) -> SceneFrame {
        for event in self.events.drain() {
            self.route_event(event);
        }
        self.controller.advance(tick.delta as f64);

        let signal = self.controller.signal();
        self.config.is_experience_active = signal.active;
        self.config.ribbon_animation_trigger = signal.trigger;

        let speed = self.config.rotation_speed();
        if speed > 0.0 {
            self.group_rotation += tick.delta * speed;
        }

        let anchor = FocusAnchor::from_camera(
            self.camera.position,
            self.camera.view_dir(),
            &self.tree_transform(),
        );
        self.photos.set_anchor(anchor);

        self.tree.update(tick, &signal);
        self.ribbon.update(tick, &signal);
        self.star.update(tick, &signal);
        self.gifts.update(tick, &signal);
        self.photos.update(tick, &signal);
        self.ambient.update(tick.time);

        let music = self.music.update(
            self.config.music_enabled && signal.active,
            self.config.bgm_url.as_deref(),
        );

        SceneFrame {
            frame: tick.frame,
            time: tick.time,
            phase: self.controller.phase(),
            trigger: signal.trigger,
            panel_visible: self.controller.panel_visible(),
            group_rotation: self.group_rotation,
            tree_opacity: self.tree.opacity(),
            ribbon_growth: self.ribbon.growth(),
            ribbon_drawn: self.ribbon.is_drawn(),
            star_scale: self.star.scale(),
            star_light: self.star.light_intensity(),
            gift_scale: self.gifts.scale(),
            photos: self
                .photos
                .ornaments()
                .iter()
                .map(|o| PhotoFrame {
                    visible: o.is_visible(),
                    transform: o.transform(),
                    render_order: o.render_order(),
                    depth_test: o.depth_test(),
                    opacity: o.opacity(),
                })
                .collect(),
            focused_photo: self.photos.focus().active(),
            pointer_cursor: self.photos.wants_pointer_cursor(),
            music,
        }
    }
}

impl RuntimeSystem for ChristmasScene {
    fn initialize(&mut self) -> Result<()> {
        log::info!(
            "[scene] tree {} particles, ribbon {}, {} photos, {} gifts",
            self.tree.particles().len(),
            self.ribbon.particles().len(),
            self.photos.len(),
            self.gifts.boxes().len()
        );
        Ok(())
    }

    fn update(&mut self, tick: &FrameTick, events: &mut EventBus) -> Result<()> {
        for event in events.drain() {
            self.events.push(event);
        }
        self.run_frame(tick);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.controller.shutdown()
    }

    fn name(&self) -> &str {
        "christmas-scene"
    }
}
