//! Context lifecycle demo
//!
//! Plays a stream of context loss/restore events against a surface with a
//! shader program, a texture and a vertex buffer registered, then prints what
//! happened. Stands in for the host bootstrap that owns one dispatcher per
//! surface.
//!
//! ```text
//! lifecycle_demo [--config app.toml] [--random N] [--seed S] [--fail-texture] [--host-default]
//! ```

mod mock_device;

use gpu_lifecycle::core::{ApplicationConfig, Config, InterruptionPolicy};
use gpu_lifecycle::events::{DispatchOutcome, SurfaceEventDispatcher};
use gpu_lifecycle::foundation::logging;
use gpu_lifecycle::resources::{
    BufferDescriptor, BufferUsage, Rgba8, ShaderProgramDescriptor, TextureDescriptor,
    TextureFilter, TrackedResource,
};
use mock_device::MockDevice;
use rand::prelude::*;
use std::rc::Rc;
use thiserror::Error;

const SCRIPTED_EVENTS: [&str; 5] = [
    "webglcontextrestored", // out of order: nothing was lost yet
    "webglcontextlost",
    "webglcontextlost", // duplicate
    "webglcontextrestored",
    "webglcontextlost",
];

const SPRITE_VS: &str = "attribute vec2 a_position;
attribute vec2 a_uv;
varying vec2 v_uv;
void main() { v_uv = a_uv; gl_Position = vec4(a_position, 0.0, 1.0); }";

const SPRITE_FS: &str = "precision mediump float;
uniform sampler2D u_texture;
varying vec2 v_uv;
void main() { gl_FragColor = texture2D(u_texture, v_uv); }";

#[derive(Error, Debug)]
enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid number for {flag}: {value}")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("unknown argument: {0}")]
    Unknown(String),
}

#[derive(Debug, Default)]
struct DemoArgs {
    config_path: Option<String>,
    random_events: Option<usize>,
    seed: u64,
    fail_texture: bool,
    host_default: bool,
}

impl DemoArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or(ArgsError::MissingValue("--config"))?;
                    parsed.config_path = Some(path);
                }
                "--random" => parsed.random_events = Some(parse_number(&mut args, "--random")?),
                "--seed" => parsed.seed = parse_number(&mut args, "--seed")?,
                "--fail-texture" => parsed.fail_texture = true,
                "--host-default" => parsed.host_default = true,
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }
        Ok(parsed)
    }
}

fn parse_number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, value })
}

fn event_stream(args: &DemoArgs) -> Vec<&'static str> {
    let Some(count) = args.random_events else {
        return SCRIPTED_EVENTS.to_vec();
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    (0..count)
        .map(|_| {
            if rng.gen_bool(0.5) {
                "webglcontextlost"
            } else {
                "webglcontextrestored"
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DemoArgs::parse(std::env::args().skip(1))?;

    let mut config = match &args.config_path {
        Some(path) => ApplicationConfig::load_from_file(path)?,
        None => ApplicationConfig::new("demo-canvas"),
    };
    if args.host_default {
        config.lifecycle.interruption = InterruptionPolicy::HostDefault;
    }
    config.validate()?;
    logging::init_with_level(&config.logging.log_level);

    log::info!("Starting lifecycle demo for surface '{}'", config.lifecycle.surface_label);

    let device = MockDevice::shared(args.fail_texture);
    let mut surface = SurfaceEventDispatcher::new(&config.lifecycle);
    println!("interruption policy: {:?}", surface.policy());

    // Registration order is dependency order: the program first, then what it samples.
    let program_device = Rc::clone(&device);
    let program = TrackedResource::create(
        surface.manager_mut(),
        ShaderProgramDescriptor::new("sprite-program", SPRITE_VS, SPRITE_FS)
            .with_attribute("a_position")
            .with_attribute("a_uv"),
        move |desc, generation| program_device.borrow_mut().create_program(desc, generation),
    )?;

    let texture_device = Rc::clone(&device);
    let checker = [
        Rgba8::new(255, 255, 255, 255),
        Rgba8::new(0, 0, 0, 255),
        Rgba8::new(0, 0, 0, 255),
        Rgba8::new(255, 255, 255, 255),
    ];
    let texture = TrackedResource::create(
        surface.manager_mut(),
        TextureDescriptor::from_texels("checkerboard", 2, 2, &checker)
            .with_filter(TextureFilter::Nearest),
        move |desc, generation| texture_device.borrow_mut().create_texture(desc, generation),
    )?;

    let buffer_device = Rc::clone(&device);
    let quad: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0];
    let vertices = TrackedResource::create(
        surface.manager_mut(),
        BufferDescriptor::from_pod("quad-vertices", BufferUsage::Vertex, &quad),
        move |desc, generation| buffer_device.borrow_mut().create_buffer(desc, generation),
    )?;

    for event in event_stream(&args) {
        let Some(response) = surface.dispatch_host_event(event) else {
            continue;
        };
        if response.prevent_default {
            log::debug!("'{event}': default action prevented");
        }
        match response.outcome {
            DispatchOutcome::Restored(generation) => println!("{event}: restored at {generation}"),
            outcome => println!("{event}: {outcome:?}"),
        }
        for report in surface.take_reports() {
            println!("  report: {}", report.error);
        }
    }

    let manager = surface.manager();
    let generation = manager.current_generation();
    println!();
    println!("final state: {} at {generation}", manager.state());
    println!(
        "resident: program={} texture={} vertices={}",
        program.borrow().handle(generation).is_some(),
        texture.borrow().handle(generation).is_some(),
        vertices.borrow().handle(generation).is_some(),
    );
    if let Some(degraded) = manager.degraded() {
        for failure in &degraded.failures {
            println!("failed: {failure}");
        }
    }
    println!("objects created: {}", device.borrow().created);
    println!(
        "stats: {}",
        ron::ser::to_string_pretty(&manager.stats(), ron::ser::PrettyConfig::default())?
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<DemoArgs, ArgsError> {
        DemoArgs::parse(list.iter().map(ToString::to_string))
    }

    #[test]
    fn test_parse_flags() {
        let parsed = args(&["--random", "12", "--seed", "7", "--fail-texture"]).unwrap();
        assert_eq!(parsed.random_events, Some(12));
        assert_eq!(parsed.seed, 7);
        assert!(parsed.fail_texture);
        assert!(!parsed.host_default);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(args(&["--seed"]), Err(ArgsError::MissingValue("--seed"))));
        assert!(matches!(args(&["--random", "x"]), Err(ArgsError::InvalidNumber { .. })));
        assert!(matches!(args(&["--wat"]), Err(ArgsError::Unknown(_))));
    }

    #[test]
    fn test_random_stream_is_seeded() {
        let parsed = args(&["--random", "20", "--seed", "3"]).unwrap();
        assert_eq!(event_stream(&parsed), event_stream(&parsed));
        assert_eq!(event_stream(&parsed).len(), 20);
        assert_eq!(event_stream(&DemoArgs::default()).len(), SCRIPTED_EVENTS.len());
    }
}
