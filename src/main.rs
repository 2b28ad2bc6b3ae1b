use std::path::PathBuf;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use rand::rngs::StdRng;
use rand::SeedableRng;

use solar_orrery::bodies;
use solar_orrery::gui::Viewer;
use solar_orrery::sim::App;

/// Interactive 3D solar-system tour. Click a planet to inspect it.
#[derive(Parser)]
struct Args {
    /// Start with orbital motion paused
    #[arg(long)]
    paused: bool,

    /// Start in night mode (black backdrop)
    #[arg(long)]
    night: bool,

    /// Number of backdrop stars
    #[arg(long, default_value_t = 10_000)]
    stars: usize,

    /// Number of decorative debris chunks
    #[arg(long, default_value_t = 200)]
    debris: usize,

    /// Directory searched for planet textures; missing files fall back to
    /// flat colors
    #[arg(long, default_value = "textures")]
    texture_dir: PathBuf,

    /// Seed for starting angles and star/debris placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut app = App::new();
    app.paused = args.paused;
    app.night_mode = args.night;
    bodies::scatter_angles(&mut app.bodies, &mut rng);

    let mut window = Window::new("Solar System");
    window.set_light(Light::StickToCamera);
    // Angles advance by fixed per-tick steps, so pin the tick rate
    window.set_framerate_limit(Some(60));

    let viewer = Viewer::new(
        app,
        &mut window,
        &args.texture_dir,
        args.stars,
        args.debris,
        &mut rng,
    );
    window.render_loop(viewer);
}
