//! glimmer: draws a triangle or quad with SDL2 and OpenGL 3.2 and pulses its
//! brightness until the window is closed or Escape is pressed.

use std::{path::PathBuf, process};

use clap::Parser;

use crate::{abs::App, config::Config, demo::Demo, error::DemoError, variant::Variant};

mod abs;
mod config;
mod demo;
mod error;
mod logging;
mod variant;

#[derive(Parser, Debug)]
#[command(name = "glimmer", about = "Minimal SDL2 + OpenGL shader demo")]
struct Cli {
    /// Which geometry to draw.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// JSON config file. Flags given on the command line take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vertex shader source. Defaults to shaders/<variant>/vertex.glsl.
    #[arg(long)]
    vertex: Option<PathBuf>,

    /// Fragment shader source. Defaults to shaders/<variant>/fragment.glsl.
    #[arg(long)]
    fragment: Option<PathBuf>,

    /// Texture image for the textured variant. Defaults to assets/texture.bmp.
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Present as fast as possible instead of waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,

    /// More log output. Repeat for trace level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Resolves the final configuration: file (or defaults), then flags.
    fn resolve_config(&self) -> Result<Config, DemoError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(path) = &self.vertex {
            config.vertex_shader = Some(path.clone());
        }
        if let Some(path) = &self.fragment {
            config.fragment_shader = Some(path.clone());
        }
        if let Some(path) = &self.texture {
            config.texture = Some(path.clone());
        }
        if self.no_vsync {
            config.vsync = false;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let config = cli.resolve_config()?;

    let mut app = App::new(&config.window)?;
    app.set_vsync(config.vsync);

    let mut demo = Demo::new(&app, &config)?;
    demo.run(&mut app);

    // The demo's GL objects must go before the context does.
    drop(demo);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose));
    log::info!("Arguments: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        log::error!("{e}");
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_gives_defaults() {
        let cli = Cli::try_parse_from(["glimmer"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap(), Config::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "glimmer",
            "--variant",
            "textured",
            "--texture",
            "crate.bmp",
            "--no-vsync",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.variant, Variant::Textured);
        assert_eq!(config.texture_path(), PathBuf::from("crate.bmp"));
        assert!(!config.vsync);
    }

    #[test]
    fn flags_override_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glimmer.json");
        std::fs::write(
            &path,
            r#"{ "variant": "triangle", "fragment_shader": "file.glsl" }"#,
        )
        .unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "glimmer".into(),
            "--config".into(),
            path.into_os_string(),
            "--fragment".into(),
            "flag.glsl".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.variant, Variant::Triangle);
        assert_eq!(config.fragment_shader_path(), PathBuf::from("flag.glsl"));
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(Cli::try_parse_from(["glimmer", "--variant", "cube"]).is_err());
    }
}
