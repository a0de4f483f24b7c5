// main.rs
use anyhow::{Context, anyhow};
use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::{Color as RlColor, Image, KeyboardKey, RaylibDraw, RaylibHandle, Rectangle, Vector2};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use gridcaster::config::Config;
use gridcaster::core::maze::{Legend, load_maze};
use gridcaster::core::player::Player;
use gridcaster::core::process_events::{Controls, update_player};
use gridcaster::core::scene::{Plane, Tile};
use gridcaster::core::vector::Vec2;
use gridcaster::render::color::Color;
use gridcaster::render::framebuffer::{Canvas, Framebuffer};
use gridcaster::render::minimap::Minimap;
use gridcaster::render::render3d::{Viewport, render_3d};
use gridcaster::render::textures::{Pixmap, TextureManager, load_pixmap};

const SKY: Color = Color::rgb(50, 50, 100);

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Registers wall and plane textures and returns the legend that refers to them.
fn build_legend(textures: &mut TextureManager) -> (Legend, Plane, Plane) {
    let stone = textures.resolve("wall1", load_pixmap("assets/wall1.png"), Color::GRAY);
    let wood = textures.resolve("wall2", load_pixmap("assets/wall2.png"), Color::rgb(140, 90, 40));
    let bricks = textures.insert("bricks", Pixmap::bricks(64, 64, Color::rgb(150, 60, 40)));
    let tiles = textures.insert("ceiling", Pixmap::checker(32, 32, Color::rgb(60, 60, 70)));

    let mut legend = Legend::default();
    legend
        .insert('1', stone)
        .insert('2', wood)
        .insert('3', Tile::Texture(bricks))
        .insert('r', Tile::Color(Color::RED))
        .insert('g', Tile::Color(Color::GREEN))
        .insert('b', Tile::Color(Color::BLUE));

    let floor = Plane::Checker {
        even: Color::rgb(90, 90, 90),
        odd: Color::rgb(60, 60, 60),
    };
    (legend, floor, Plane::Texture(tiles))
}

fn sample_controls(window: &RaylibHandle) -> Controls {
    let down = |a, b| window.is_key_down(a) || window.is_key_down(b);
    Controls {
        forward: down(KeyboardKey::KEY_W, KeyboardKey::KEY_UP),
        backward: down(KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN),
        turn_left: down(KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT),
        turn_right: down(KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut config = Config::from_env();
    config.validate().context("invalid configuration")?;
    let viewport = Viewport::from(config.screen.viewport());
    info!(
        window = ?(config.screen.width, config.screen.height),
        viewport = ?(viewport.width, viewport.height),
        "starting gridcaster"
    );

    let (mut window, raylib_thread) = raylib::init()
        .size(config.screen.width as i32, config.screen.height as i32)
        .title("Gridcaster")
        .build();
    window.set_target_fps(60);

    let mut textures = TextureManager::new();
    let (legend, floor, ceiling) = build_legend(&mut textures);
    let maze = load_maze(&config.scene_path, &legend)
        .with_context(|| format!("loading {}", config.scene_path.display()))?;
    let scene = maze.scene.with_floor(floor).with_ceiling(ceiling);
    let spawn = maze.spawn.unwrap_or_else(|| {
        warn!("maze has no spawn point, starting at (1.5, 1.5)");
        Vec2::new(1.5, 1.5)
    });
    let mut player = Player::new(spawn.x, spawn.y, 0.0);

    let mut framebuffer = Framebuffer::new(viewport.width as u32, viewport.height as u32);
    framebuffer.set_background_color(SKY);
    let image = Image::gen_image_color(viewport.width as i32, viewport.height as i32, RlColor::from(SKY));
    let mut screen = window
        .load_texture_from_image(&raylib_thread, &image)
        .map_err(|e| anyhow!("failed to create screen texture: {e:?}"))?;

    let mut minimap = Minimap::fit(viewport, &scene, &config.minimap, config.player.size);
    let mut fps_timer = 0.0;

    while !window.window_should_close() {
        let dt = window.get_frame_time() as f64;

        if window.is_key_pressed(KeyboardKey::KEY_M) {
            config.minimap.enabled = !config.minimap.enabled;
        }
        if window.is_key_pressed(KeyboardKey::KEY_T) {
            minimap.trace_ray = !minimap.trace_ray;
        }
        update_player(&mut player, &scene, sample_controls(&window), dt, &config.player);

        {
            let mut canvas = Canvas::new(&mut framebuffer, &textures);
            render_3d(&mut canvas, &scene, &player, &config.camera, &textures, viewport, SKY);
            if config.minimap.enabled {
                minimap.render(&mut canvas, &scene, &player, &config.camera, &textures);
            }
        }
        let _ = screen.update_texture(framebuffer.as_bytes());

        fps_timer += dt;
        if fps_timer >= 1.0 {
            fps_timer = 0.0;
            debug!(fps = window.get_fps(), x = player.position.x, y = player.position.y, "frame");
        }

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(RlColor::BLACK);
        d.draw_texture_pro(
            &screen,
            Rectangle::new(0.0, 0.0, viewport.width as f32, viewport.height as f32),
            Rectangle::new(0.0, 0.0, config.screen.width as f32, config.screen.height as f32),
            Vector2::zero(),
            0.0,
            RlColor::WHITE,
        );
        d.draw_fps(10, 10);
    }

    info!("window closed");
    Ok(())
}
