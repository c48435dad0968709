//! Simulate command: drive the scene headlessly at a fixed frame rate

use anyhow::Result;
use tinsel_runtime::{ExperiencePhase, RuntimeSystem, SceneEvent};
use tinsel_scene::{ChristmasScene, SceneFrame};

pub struct SimulateArgs {
    pub config: Option<String>,
    pub seed: u32,
    pub seconds: f32,
    pub fps: u32,
    pub start_at: f32,
    pub close_at: Option<f32>,
    pub replay_at: Option<f32>,
    pub every: f32,
    pub format: String,
}

/// An event that fires on the first frame at or after `at`
struct Scheduled {
    at: f32,
    event: SceneEvent,
    fired: bool,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    if !(args.every.is_finite() && args.every > 0.0) {
        anyhow::bail!("--every must be positive");
    }
    if !matches!(args.format.as_str(), "text" | "json") {
        anyhow::bail!("Unknown format: {}", args.format);
    }

    let config = super::load_config(args.config.as_deref())?;
    let mut scene = ChristmasScene::with_seed(config, args.seed);
    scene.initialize()?;

    let mut schedule = vec![Scheduled {
        at: args.start_at,
        event: SceneEvent::StartRequested,
        fired: false,
    }];
    if let Some(at) = args.close_at {
        schedule.push(Scheduled {
            at,
            event: SceneEvent::CloseRequested,
            fired: false,
        });
    }
    if let Some(at) = args.replay_at {
        schedule.push(Scheduled {
            at,
            event: SceneEvent::ReplayRibbon,
            fired: false,
        });
    }

    let dt = 1.0 / args.fps as f64;
    let frames = (args.seconds as f64 * args.fps as f64).ceil() as u64;
    let mut elapsed = 0.0f32;
    let mut next_report = 0.0f32;
    let mut reports: Vec<SceneFrame> = Vec::new();

    for frame in 0..frames {
        for s in schedule.iter_mut().filter(|s| !s.fired && elapsed >= s.at) {
            log::debug!("[simulate] {:?} at {:.2}s", s.event, elapsed);
            scene.push_event(s.event);
            s.fired = true;
        }

        let out = scene.step(dt);
        elapsed = out.time;

        let last = frame + 1 == frames;
        if elapsed >= next_report || last {
            next_report += args.every;
            if let Some(music) = &out.music {
                log::info!("[simulate] music {:?}", music);
            }
            if args.format == "text" {
                print_frame(&out);
            }
            reports.push(out);
        }
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        let revealed = scene
            .photos()
            .ornaments()
            .iter()
            .filter(|o| o.is_revealed())
            .count();
        println!(
            "Done: {} frames, {}/{} photos revealed",
            frames,
            revealed,
            scene.photos().len()
        );
    }

    Ok(())
}

fn phase_label(phase: ExperiencePhase) -> String {
    match phase {
        ExperiencePhase::Idle => "idle".to_string(),
        ExperiencePhase::CountingDown { remaining } => format!("countdown {}", remaining),
        ExperiencePhase::Active => "active".to_string(),
    }
}

fn print_frame(f: &SceneFrame) {
    let visible = f.photos.iter().filter(|p| p.visible).count();
    println!(
        "t={:>6.2}s  {:<12} trigger {}  ribbon {:.3}{}  star {:.3}  gifts {:.3}  photos {}/{}  tree {:.2}",
        f.time,
        phase_label(f.phase),
        f.trigger,
        f.ribbon_growth,
        if f.ribbon_drawn { "" } else { " (hidden)" },
        f.star_scale,
        f.gift_scale,
        visible,
        f.photos.len(),
        f.tree_opacity
    );
}
