//! Generate command: build a single particle system and describe it

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;
use tinsel_animation::OrnamentPlacement;
use tinsel_particles::ambient::{generate_magic, generate_snow, generate_starfield};
use tinsel_particles::gifts::{generate_gifts, GIFT_COUNT};
use tinsel_particles::ribbon::generate_ribbon;
use tinsel_particles::star::generate_star_sparkles;
use tinsel_particles::texture::{ribbon_stripe_texture, soft_dot_texture};
use tinsel_particles::tree::generate_tree;
use tinsel_particles::{
    Particle, ParticleCategory, ParticleRng, ParticleSet, RibbonPath, ShadingPalette,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum System {
    Tree,
    Ribbon,
    Snow,
    Starfield,
    Magic,
    Sparkles,
    Gifts,
    Photos,
    RibbonTexture,
    SnowTexture,
}

pub struct GenerateArgs {
    pub system: System,
    pub config: Option<String>,
    pub seed: u32,
    pub format: String,
    pub output: Option<String>,
}

#[derive(Debug, Serialize)]
struct SetSummary {
    system: String,
    requested: usize,
    emitted: usize,
    yield_ratio: f32,
    body: usize,
    tips: usize,
    ornaments: usize,
    bounds_min: [f32; 3],
    bounds_max: [f32; 3],
    mean_size: f32,
}

impl SetSummary {
    fn new(system: System, set: &ParticleSet) -> Self {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in set.positions() {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        if set.is_empty() {
            min = [0.0; 3];
            max = [0.0; 3];
        }
        let mean_size = if set.is_empty() {
            0.0
        } else {
            set.sizes().iter().sum::<f32>() / set.len() as f32
        };

        Self {
            system: system_name(system),
            requested: set.requested(),
            emitted: set.len(),
            yield_ratio: set.yield_ratio(),
            body: set.count_category(ParticleCategory::Body),
            tips: set.count_category(ParticleCategory::Tip),
            ornaments: set.count_category(ParticleCategory::Ornament),
            bounds_min: min,
            bounds_max: max,
            mean_size,
        }
    }
}

fn system_name(system: System) -> String {
    system
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let mut rng = ParticleRng::new(args.seed);
    let shape = config.tree_shape();

    let set = match args.system {
        System::Tree => {
            let palette = ShadingPalette::new(config.tree_color(), config.star_color());
            generate_tree(&shape, &palette, &mut rng)
        }
        System::Ribbon => generate_ribbon(&RibbonPath::for_tree(&shape), &shape, &mut rng),
        System::Snow => generate_snow(config.snow_count(), &mut rng),
        System::Starfield => generate_starfield(config.star_count(), &mut rng),
        System::Magic => generate_magic(&mut rng),
        System::Sparkles => generate_star_sparkles(&mut rng),
        System::Gifts => return print_gifts(&mut rng, &args.format),
        System::Photos => return print_photos(&config.photo_urls, &shape, &args.format),
        System::RibbonTexture | System::SnowTexture => {
            return write_texture(args.system, args.seed, args.output.as_deref())
        }
    };

    let summary = SetSummary::new(args.system, &set);
    match args.format.as_str() {
        "summary" => print_summary(&summary),
        "json" => {
            let particles: Vec<_> = set.iter().map(|p| particle_json(&p)).collect();
            let doc = json!({ "summary": summary, "particles": particles });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => anyhow::bail!("Unknown format: {}", args.format),
    }

    Ok(())
}

fn particle_json(p: &Particle) -> serde_json::Value {
    json!({
        "position": p.position,
        "color": p.color,
        "size": p.size,
        "random": p.random,
        "phase": p.phase,
        "speed": p.speed,
        "category": p.category.name(),
        "reveal_key": p.reveal_key,
    })
}

fn print_summary(s: &SetSummary) {
    println!("System: {}", s.system);
    println!(
        "Particles: {} of {} ({:.1}%)",
        s.emitted,
        s.requested,
        s.yield_ratio * 100.0
    );
    if s.tips > 0 || s.ornaments > 0 {
        println!(
            "Categories: body {}, tips {}, ornaments {}",
            s.body, s.tips, s.ornaments
        );
    }
    println!(
        "Bounds: [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
        s.bounds_min[0], s.bounds_min[1], s.bounds_min[2], s.bounds_max[0], s.bounds_max[1],
        s.bounds_max[2]
    );
    println!("Mean size: {:.2}", s.mean_size);
}

fn print_gifts(rng: &mut ParticleRng, format: &str) -> Result<()> {
    let boxes = generate_gifts(GIFT_COUNT, rng);
    match format {
        "summary" => {
            let foil = boxes.iter().filter(|b| b.is_foil()).count();
            println!("System: gifts");
            println!("Boxes: {} ({} foil)", boxes.len(), foil);
            for (i, b) in boxes.iter().enumerate() {
                println!(
                    "  [{:>2}] {:?} at ({:.2}, {:.2}, {:.2}) wrap {} ribbon {}",
                    i,
                    b.style,
                    b.position[0],
                    b.position[1],
                    b.position[2],
                    b.wrap.to_hex_string(),
                    b.ribbon.to_hex_string()
                );
            }
        }
        "json" => {
            let doc: Vec<_> = boxes
                .iter()
                .map(|b| {
                    json!({
                        "style": format!("{:?}", b.style).to_lowercase(),
                        "position": b.position,
                        "rotation": b.rotation,
                        "size": b.size,
                        "wrap": b.wrap.to_hex_string(),
                        "ribbon": b.ribbon.to_hex_string(),
                        "roughness": b.finish.roughness,
                        "metalness": b.finish.metalness,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
    Ok(())
}

fn print_photos(urls: &[String], shape: &tinsel_particles::TreeShape, format: &str) -> Result<()> {
    let placements: Vec<_> = (0..urls.len())
        .map(|i| OrnamentPlacement::for_index(i, shape))
        .collect();

    match format {
        "summary" => {
            println!("System: photos");
            if urls.is_empty() {
                println!("No photo_urls configured");
            }
            for (url, p) in urls.iter().zip(&placements) {
                println!(
                    "  {} at ({:.2}, {:.2}, {:.2}) revealed at growth {:.2}",
                    url, p.position[0], p.position[1], p.position[2], p.reveal_key
                );
            }
        }
        "json" => {
            let doc: Vec<_> = urls
                .iter()
                .zip(&placements)
                .map(|(url, p)| {
                    json!({
                        "url": url,
                        "position": p.position,
                        "rotation": p.rotation,
                        "reveal_key": p.reveal_key,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
    Ok(())
}

fn write_texture(system: System, seed: u32, output: Option<&str>) -> Result<()> {
    let Some(output) = output else {
        anyhow::bail!("{} needs --output <file.png>", system_name(system));
    };

    let image = match system {
        System::RibbonTexture => ribbon_stripe_texture(seed),
        _ => soft_dot_texture(),
    };
    image
        .save(output)
        .with_context(|| format!("Failed to write texture: {}", output))?;

    println!(
        "Wrote {}x{} texture to {}",
        image.width(),
        image.height(),
        output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_set_has_zero_bounds() {
        let s = SetSummary::new(System::Snow, &ParticleSet::default());
        assert_eq!(s.emitted, 0);
        assert_eq!(s.bounds_min, [0.0; 3]);
        assert_eq!(s.bounds_max, [0.0; 3]);
        assert_eq!(s.mean_size, 0.0);
    }

    #[test]
    fn summary_counts_tree_categories() {
        let config = tinsel_scene::ExperienceConfig {
            tree_particles: 2_000,
            ..Default::default()
        };
        let shape = config.tree_shape();
        let palette = ShadingPalette::new(config.tree_color(), config.star_color());
        let set = generate_tree(&shape, &palette, &mut ParticleRng::new(7));

        let s = SetSummary::new(System::Tree, &set);
        assert_eq!(s.body + s.tips + s.ornaments, s.emitted);
        assert_eq!(s.requested, 2_000);
        for axis in 0..3 {
            assert!(s.bounds_min[axis] <= s.bounds_max[axis]);
        }
        assert!(s.mean_size > 0.0);
    }

    #[test]
    fn particle_json_names_its_category() {
        let p = Particle {
            category: ParticleCategory::Tip,
            reveal_key: 0.25,
            ..Default::default()
        };
        let v = particle_json(&p);
        assert_eq!(v["category"], "tip");
        assert_eq!(v["reveal_key"], 0.25);
    }

    #[test]
    fn system_names_are_kebab_case() {
        assert_eq!(system_name(System::RibbonTexture), "ribbon-texture");
        assert_eq!(system_name(System::Starfield), "starfield");
    }
}
