use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::{Vec2, Vec3};

use strider::{
    logging,
    controller::{FrameLoop, InputSnapshot, MovementController, TextureScaler},
    sandbox::{FlatGround, MaterialTable, MixerLog},
    utils::{AudioClipId, AudioSourceId, ObjectId, RendererId},
    view::{AudioCue, MaterialMode, MaterialSurface},
    AudioBindings, MovementSettings, StriderConfig,
};

/// Drive the movement controller and a tiled floor headlessly through a
/// scripted walk, run, jump and turn.
#[derive(Debug, Parser)]
#[command(name = "strider", version, about)]
struct Args {
    /// TOML settings file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Texture whose width sets the tiling resolution.
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frame step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for footstep clip selection.
    #[arg(long)]
    seed: Option<u64>,
}

const FLOOR: ObjectId = ObjectId(1);
const FLOOR_RENDERER: RendererId = RendererId(1);

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Settings for the session. Demo audio handles stand in only when no
/// config file is given, so a file that leaves audio unset stays silent.
fn session_config(args: &Args) -> strider::Result<StriderConfig> {
    let mut config = match &args.config {
        Some(path) => StriderConfig::load(path)?,
        None => StriderConfig {
            movement: MovementSettings { audio: demo_audio(), ..MovementSettings::default() },
            ..StriderConfig::default()
        },
    };
    if let Some(texture) = &args.texture {
        config.texture = config.texture.with_resolution_from_image(texture)?;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> strider::Result<()> {
    let config = session_config(args)?;

    let controller = match args.seed {
        Some(seed) => MovementController::with_seed(config.movement.clone(), Vec3::new(0.0, 1.0, 0.0), seed),
        None => MovementController::new(config.movement.clone(), Vec3::new(0.0, 1.0, 0.0)),
    };

    let ground = FlatGround::new(0.0).bounded(Vec2::splat(-50.0), Vec2::splat(50.0));
    let mut materials = MaterialTable::new();
    materials.attach(FLOOR, FLOOR_RENDERER, Vec2::ONE);

    let mut frame_loop = FrameLoop::new(controller, ground, MixerLog::new(), materials);
    frame_loop.add_tiled(TextureScaler::new(FLOOR, config.texture.clone()), Vec3::new(100.0, 1.0, 100.0));
    frame_loop.refresh_tiling(MaterialMode::Authoring);

    let frames_per_log = (1.0 / args.dt.max(1e-3)).round().max(1.0) as u32;
    let mut cues = [0usize; 3];
    for frame in 0..args.frames {
        let t = frame as f32 * args.dt;
        let input = scripted_input(t, args.dt);
        let output = frame_loop.step_with(args.dt, &input);
        for event in &output.audio {
            let slot = match event.cue {
                AudioCue::Footstep => 0,
                AudioCue::Jump => 1,
                AudioCue::Land => 2,
            };
            cues[slot] += 1;
        }

        if frame % frames_per_log == 0 {
            let pose = output.pose;
            tracing::info!(
                t,
                position = ?pose.position,
                yaw = pose.yaw,
                pitch = pose.pitch,
                grounded = pose.is_grounded,
                "avatar"
            );
        }

        // floor grows halfway through; tiling follows
        if frame == args.frames / 2 {
            frame_loop.set_world_scale(FLOOR, Vec3::new(150.0, 1.0, 80.0));
        }
    }

    tracing::info!(
        frames = frame_loop.frame(),
        footsteps = cues[0],
        jumps = cues[1],
        landings = cues[2],
        played = frame_loop.audio.played.len(),
        floor_tiling = ?frame_loop.materials.texture_scale(FLOOR_RENDERER, MaterialMode::Simulation),
        "session finished"
    );
    Ok(())
}

/// Walk, run, jump, strafe while turning, then stand still, on a 10s cycle.
fn scripted_input(t: f32, dt: f32) -> InputSnapshot {
    let phase = t % 10.0;
    let mut input = InputSnapshot::default();
    match phase {
        p if p < 3.0 => input.move_axis = Vec2::Y,
        p if p < 5.0 => {
            input.move_axis = Vec2::Y;
            input.run_held = true;
        }
        p if p < 5.0 + dt => input.jump_pressed = true,
        p if p < 8.0 => {
            input.move_axis = Vec2::new(1.0, 1.0).normalize();
            input.look_delta = Vec2::new(0.5, 0.05);
        }
        _ => {}
    }
    input
}

/// Placeholder handles so the session log shows cues without a real mixer.
fn demo_audio() -> AudioBindings {
    AudioBindings {
        footstep_source: Some(AudioSourceId(1)),
        footstep_clips: (100..104).map(AudioClipId).collect(),
        jump_clip: Some(AudioClipId(200)),
        land_clip: Some(AudioClipId(300)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_audio_only_without_config_file() {
        let args = Args::parse_from(["strider"]);
        assert_eq!(session_config(&args).unwrap().movement.audio, demo_audio());

        let dir = std::env::temp_dir().join(format!("strider-main-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("silent.toml");
        StriderConfig::default().save(&path).unwrap();

        let args = Args::parse_from(["strider", "--config", path.to_str().unwrap()]);
        let config = session_config(&args).unwrap();
        assert_eq!(config.movement.audio, AudioBindings::default());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
