//! Window shell for the glint ray tracer.
//!
//! Builds the demo scene, renders it, and shows the framebuffer in an egui
//! window. `A` toggles antialiasing, the arrow keys slide the cube along X,
//! `Escape` quits. The scene only ever changes between renders.

use std::time::Instant;

use anyhow::anyhow;
use egui::{CentralPanel, ColorImage, Key, TextureHandle, TextureOptions};
use glint_math::{Transform, Vec3};
use glint_renderer::{
    render, BitmapTexture, Camera, CheckerTexture, Color, Cube, CubemapEnvironment, Framebuffer,
    FramebufferError, Lambert, Layered, Node, Phong, Plane, PointLight, Reflection, Refraction,
    RenderConfig, Scene, SolidColor, Sphere, Texture,
};

const FRAME_WIDTH: u32 = 800;
const FRAME_HEIGHT: u32 = 600;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("glint")
            .with_inner_size([FRAME_WIDTH as f32, FRAME_HEIGHT as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "glint",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)?))),
    )
    .map_err(|err| anyhow!("event loop failed: {err}"))
}

struct ViewerApp {
    scene: Scene,
    camera: Camera,
    config: RenderConfig,
    framebuffer: Framebuffer,
    texture: TextureHandle,
    cube_index: usize,
}

impl ViewerApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, FramebufferError> {
        let (scene, cube_index) = build_scene();
        let mut camera = Camera::new()
            .with_frame(FRAME_WIDTH, FRAME_HEIGHT)
            .with_position(Vec3::new(0.0, 60.0, -120.0))
            .with_orientation((-10.0f32).to_radians(), (-15.0f32).to_radians(), 0.0);
        let config = RenderConfig::default();
        let mut framebuffer = Framebuffer::new(FRAME_WIDTH, FRAME_HEIGHT)?;

        let start = Instant::now();
        render(&scene, &mut camera, &config, &mut framebuffer);
        log::info!("Frame took {:?}", start.elapsed());

        let texture = cc.egui_ctx.load_texture(
            "rendered",
            framebuffer_image(&framebuffer),
            TextureOptions::NEAREST,
        );

        log::info!("A: toggle antialiasing, arrows: move the cube, Esc: quit");

        Ok(Self {
            scene,
            camera,
            config,
            framebuffer,
            texture,
            cube_index,
        })
    }

    fn rerender(&mut self) {
        let start = Instant::now();
        render(&self.scene, &mut self.camera, &self.config, &mut self.framebuffer);
        log::info!("Frame took {:?}", start.elapsed());

        self.texture
            .set(framebuffer_image(&self.framebuffer), TextureOptions::NEAREST);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (toggle_aa, cube_step, quit) = ctx.input(|input| {
            let step = input.key_pressed(Key::ArrowRight) as i32
                - input.key_pressed(Key::ArrowLeft) as i32;
            (
                input.key_pressed(Key::A),
                step,
                input.key_pressed(Key::Escape),
            )
        });

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let mut dirty = false;
        if toggle_aa {
            self.config.antialiasing = !self.config.antialiasing;
            log::info!("Antialiasing {}", if self.config.antialiasing { "on" } else { "off" });
            dirty = true;
        }
        if cube_step != 0 {
            // Scene edits happen here, strictly between renders
            self.scene.nodes[self.cube_index]
                .transform
                .translate(Vec3::new(10.0 * cube_step as f32, 0.0, 0.0));
            dirty = true;
        }
        if dirty {
            self.rerender();
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Image::from_texture(&self.texture).shrink_to_fit())
            });
        });
    }
}

fn framebuffer_image(framebuffer: &Framebuffer) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [framebuffer.width() as usize, framebuffer.height() as usize],
        &framebuffer.to_rgba(),
    )
}

/// The demo scene: a textured floor with a mirror sheen, a water ball, a
/// glossy ball and a tilted checker cube. Returns the cube's node index so
/// input can move it.
fn build_scene() -> (Scene, usize) {
    let mut scene = Scene::new();

    scene.ambient_light = Color::splat(0.5);
    scene.add_light(PointLight {
        position: Vec3::new(100.0, 200.0, -80.0),
        color: Color::new(1.0, 1.0, 0.9),
        intensity: 50_000.0,
    });

    match CubemapEnvironment::load("data/env/forest") {
        Ok(environment) => scene.environment = Some(Box::new(environment)),
        Err(err) => log::warn!("Rendering without an environment: {err}"),
    }

    let floor_tiles: Box<dyn Texture> = match BitmapTexture::load("data/floor.bmp", 1.0 / 100.0) {
        Ok(tiles) => Box::new(tiles),
        Err(err) => {
            log::warn!("Floor bitmap unavailable ({err}), falling back to checker");
            Box::new(
                CheckerTexture::new(Color::new(0.8, 0.8, 0.8), Color::new(0.25, 0.25, 0.25))
                    .with_scaling(1.0 / 25.0),
            )
        }
    };
    let floor_shader = Layered::new()
        .with_layer(Lambert::new(floor_tiles), Color::ONE)
        .with_layer(Reflection::new(1.0), Color::splat(0.01));
    scene.add_node(Node::new(Plane::new(80.0), floor_shader));

    let mut sphere_transform = Transform::identity();
    sphere_transform.translate(Vec3::new(-10.0, 60.0, 0.0));
    scene.add_node(
        Node::new(
            Sphere::new(Vec3::ZERO, 30.0),
            Refraction::new(1.33, Color::splat(0.95)),
        )
        .with_transform(sphere_transform),
    );

    let mut ball_transform = Transform::identity();
    ball_transform.translate(Vec3::new(-55.0, 20.0, 55.0));
    scene.add_node(
        Node::new(
            Sphere::new(Vec3::ZERO, 20.0),
            Phong::new(SolidColor::new(Color::new(0.2, 0.4, 1.0)), 20.0, 0.7),
        )
        .with_transform(ball_transform),
    );

    let checker = CheckerTexture::new(Color::new(1.0, 0.5, 0.5), Color::new(0.5, 1.0, 1.0))
        .with_scaling(0.2);
    let mut cube_transform = Transform::identity();
    cube_transform.rotate(30.0f32.to_radians(), 0.0, 60.0f32.to_radians());
    cube_transform.translate(Vec3::new(40.0, 16.0, 30.0));
    let cube_index = scene.add_node(
        Node::new(Cube::new(Vec3::ZERO, 15.0), Lambert::new(checker))
            .with_transform(cube_transform),
    );

    (scene, cube_index)
}
